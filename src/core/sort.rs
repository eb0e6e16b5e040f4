//! Dynamic multi-key sorting driven by property mappings
//!
//! An orderBy expression like `"name desc, age"` is turned into one composed,
//! stable ordering over storage entities. The first listed clause is the
//! primary key; later clauses only break ties. Each clause's alias resolves
//! through the property mapping to one or more storage properties, and the
//! effective direction per property is the requested direction XOR the
//! mapping's reverse flag.

use std::cmp::Ordering;

use crate::core::error::{FolioError, ValidationError};
use crate::core::field::FieldValue;
use crate::core::mapping::PropertyMapping;

/// Access to storage-entity properties by name, used as sort keys
///
/// The property table is declared statically per entity, which lets the
/// mapping registry verify destination properties at registration time.
pub trait Sortable {
    /// Storage property names that may appear as mapping destinations
    fn storage_properties() -> &'static [&'static str];

    /// Value of a storage property; `Null` for names outside the table
    fn sort_value(&self, property: &str) -> FieldValue;
}

/// One parsed orderBy clause: an alias plus a direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortClause {
    pub alias: String,
    pub descending: bool,
}

/// Parse an orderBy expression into clauses, in listed order.
///
/// Clauses are comma-separated; an optional direction follows the alias after
/// whitespace (`desc` sorts descending, anything else ascending). Empty
/// clauses are skipped.
pub fn parse_order_by(order_by: &str) -> Vec<SortClause> {
    order_by
        .split(',')
        .map(str::trim)
        .filter(|clause| !clause.is_empty())
        .map(|clause| {
            let mut parts = clause.split_whitespace();
            let alias = parts.next().unwrap_or_default().to_string();
            let descending = parts.next().is_some_and(|d| d.eq_ignore_ascii_case("desc"));
            SortClause { alias, descending }
        })
        .collect()
}

/// Sort `items` in place according to `order_by` and `mapping`.
///
/// An empty or whitespace expression leaves the input order unchanged. An
/// alias missing from the mapping yields a validation error; callers are
/// expected to have validated the expression already, so hitting it here
/// means a handler skipped validation.
pub fn apply_sort<T: Sortable>(
    items: &mut [T],
    order_by: &str,
    mapping: &PropertyMapping,
) -> Result<(), FolioError> {
    if order_by.trim().is_empty() {
        return Ok(());
    }

    // Flatten clauses into (property, descending) keys up front so alias
    // resolution fails before any reordering happens.
    let mut keys: Vec<(&'static str, bool)> = Vec::new();
    for clause in parse_order_by(order_by) {
        let value = mapping.resolve(&clause.alias).ok_or_else(|| {
            FolioError::Validation(ValidationError::UnknownSortAlias {
                alias: clause.alias.clone(),
            })
        })?;

        for property in &value.destination_properties {
            keys.push((property, clause.descending ^ value.reverse));
        }
    }

    items.sort_by(|a, b| {
        for (property, descending) in &keys {
            let ordering = a.sort_value(property).compare(&b.sort_value(property));
            let ordering = if *descending { ordering.reverse() } else { ordering };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });

    Ok(())
}
