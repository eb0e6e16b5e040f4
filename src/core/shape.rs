//! Data shaping: projecting resources down to a requested field subset
//!
//! Shapes declare an explicit field-accessor table instead of being walked
//! via runtime reflection: [`Shapeable::declared_fields`] lists readable
//! fields in declaration order and [`Shapeable::field_value`] reads one by
//! canonical name. Shaping produces ordered field -> value records that
//! serialize generically at the response boundary.

use indexmap::IndexMap;

use crate::core::field::{FieldSelection, FieldValue};

/// A shaped resource: ordered mapping from field name to scalar value
pub type ShapedRecord = IndexMap<String, FieldValue>;

/// A type that can be projected field-by-field
pub trait Shapeable {
    /// Readable field names, in declaration order
    fn declared_fields() -> &'static [&'static str];

    /// Value of a declared field. Only called with names from
    /// [`declared_fields`](Shapeable::declared_fields).
    fn field_value(&self, field: &str) -> FieldValue;
}

/// Validate a client fields list against a shape's declared fields.
///
/// Every token must case-insensitively match a declared field; an empty or
/// absent list is valid. This is the shaping-context counterpart of the
/// mapping registry's sort validation: the DTO's own fields and the sortable
/// storage aliases are distinct sets.
pub fn has_fields<T: Shapeable>(fields: Option<&str>) -> bool {
    let selection = FieldSelection::parse(fields);
    selection
        .tokens()
        .iter()
        .all(|token| resolve_field::<T>(token).is_some())
}

/// Project a single item down to the selected fields
pub fn shape<T: Shapeable>(item: &T, selection: &FieldSelection) -> ShapedRecord {
    let fields = selected_fields::<T>(selection);
    shape_with(item, &fields)
}

/// Project a collection, one record per item, preserving input order
pub fn shape_all<T: Shapeable>(items: &[T], selection: &FieldSelection) -> Vec<ShapedRecord> {
    // Resolve the field list once, then apply it to every item so all
    // records carry the same field set.
    let fields = selected_fields::<T>(selection);
    items.iter().map(|item| shape_with(item, &fields)).collect()
}

/// The effective field list for a selection: all declared fields in
/// declaration order when nothing was requested, otherwise the requested
/// fields in request order. Unknown names are silently skipped; the shaper
/// stays safe to call without prior validation.
fn selected_fields<T: Shapeable>(selection: &FieldSelection) -> Vec<&'static str> {
    if selection.is_empty() {
        T::declared_fields().to_vec()
    } else {
        selection
            .tokens()
            .iter()
            .filter_map(|token| resolve_field::<T>(token))
            .collect()
    }
}

fn resolve_field<T: Shapeable>(token: &str) -> Option<&'static str> {
    T::declared_fields()
        .iter()
        .find(|declared| declared.eq_ignore_ascii_case(token))
        .copied()
}

fn shape_with<T: Shapeable>(item: &T, fields: &[&'static str]) -> ShapedRecord {
    fields
        .iter()
        .map(|field| (field.to_string(), item.field_value(field)))
        .collect()
}
