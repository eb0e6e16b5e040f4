//! HTTP handlers for the library API
//!
//! Handlers follow one pipeline: validate client input (all-or-nothing,
//! before anything executes), query the repository, attach pagination
//! metadata out-of-band, shape the payload, and assemble hypermedia links.

pub mod author_collections;
pub mod authors;
pub mod books;

use serde::Serialize;
use std::sync::Arc;

use crate::config::ApiConfig;
use crate::core::error::{FolioError, ValidationError};
use crate::core::field::FieldSelection;
use crate::core::link::{LinkAssembler, RouteTable};
use crate::core::mapping::{MappingRegistry, PropertyMapping};
use crate::core::shape::{Shapeable, has_fields};
use crate::core::sort::parse_order_by;
use crate::storage::LibraryRepository;

/// Application state shared across handlers
///
/// Everything here is built once at start-up and read-only afterwards, so
/// arbitrarily many requests can use it concurrently without synchronization.
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn LibraryRepository>,
    pub registry: Arc<MappingRegistry>,
    pub routes: Arc<RouteTable>,
    pub links: LinkAssembler,
    pub config: Arc<ApiConfig>,
}

/// Reject an orderBy expression whose aliases the mapping does not know
pub(crate) fn ensure_valid_order_by(
    mapping: &PropertyMapping,
    order_by: &str,
) -> Result<(), FolioError> {
    for clause in parse_order_by(order_by) {
        if mapping.resolve(&clause.alias).is_none() {
            return Err(FolioError::Validation(ValidationError::UnknownSortAlias {
                alias: clause.alias,
            }));
        }
    }
    Ok(())
}

/// Reject a fields list naming fields the shape does not declare
pub(crate) fn ensure_known_fields<T: Shapeable>(fields: Option<&str>) -> Result<(), FolioError> {
    if has_fields::<T>(fields) {
        return Ok(());
    }

    let selection = FieldSelection::parse(fields);
    let field = selection
        .tokens()
        .iter()
        .find(|token| {
            !T::declared_fields()
                .iter()
                .any(|declared| declared.eq_ignore_ascii_case(token))
        })
        .cloned()
        .unwrap_or_default();

    Err(FolioError::Validation(ValidationError::UnknownField { field }))
}

pub(crate) fn to_json<T: Serialize>(value: &T) -> Result<serde_json::Value, FolioError> {
    serde_json::to_value(value).map_err(|e| FolioError::Internal(e.to_string()))
}
