//! Typed error handling for the folio API
//!
//! Errors are grouped by category so callers can match specifically instead of
//! dealing with a generic `anyhow::Error`:
//!
//! - [`EntityError`]: missing or conflicting resources
//! - [`ConfigError`]: start-up defects (mappings, route templates); never
//!   client-correctable
//! - [`ValidationError`]: rejected client input, surfaced before any sorting
//!   or shaping runs

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// The main error type for the folio API
#[derive(Debug)]
pub enum FolioError {
    /// Resource-related errors
    Entity(EntityError),

    /// Start-up configuration errors (server-side defects)
    Config(ConfigError),

    /// Client input validation errors
    Validation(ValidationError),

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for FolioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FolioError::Entity(e) => write!(f, "{}", e),
            FolioError::Config(e) => write!(f, "{}", e),
            FolioError::Validation(e) => write!(f, "{}", e),
            FolioError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for FolioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FolioError::Entity(e) => Some(e),
            FolioError::Config(e) => Some(e),
            FolioError::Validation(e) => Some(e),
            FolioError::Internal(_) => None,
        }
    }
}

impl From<anyhow::Error> for FolioError {
    fn from(err: anyhow::Error) -> Self {
        FolioError::Internal(err.to_string())
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl FolioError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            FolioError::Entity(e) => e.status_code(),
            FolioError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            FolioError::Validation(ValidationError::FieldErrors { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            FolioError::Validation(_) => StatusCode::BAD_REQUEST,
            FolioError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            FolioError::Entity(e) => e.error_code(),
            FolioError::Config(_) => "CONFIG_ERROR",
            FolioError::Validation(_) => "VALIDATION_ERROR",
            FolioError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    /// Get additional details for the error
    fn details(&self) -> Option<serde_json::Value> {
        match self {
            FolioError::Entity(EntityError::NotFound { resource, id }) => {
                Some(serde_json::json!({
                    "resource": resource,
                    "id": id.to_string()
                }))
            }
            FolioError::Validation(ValidationError::FieldErrors { errors }) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for FolioError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to resources
#[derive(Debug)]
pub enum EntityError {
    /// Resource was not found
    NotFound { resource: &'static str, id: Uuid },

    /// Resource already exists at a client-chosen location
    Conflict { resource: &'static str, id: Uuid },
}

impl EntityError {
    fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
            EntityError::Conflict { .. } => StatusCode::CONFLICT,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "NOT_FOUND",
            EntityError::Conflict { .. } => "CONFLICT",
        }
    }
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityError::NotFound { resource, id } => {
                write!(f, "{} '{}' not found", resource, id)
            }
            EntityError::Conflict { resource, id } => {
                write!(f, "{} '{}' already exists", resource, id)
            }
        }
    }
}

impl std::error::Error for EntityError {}

// =============================================================================
// Config Errors
// =============================================================================

/// Start-up configuration defects.
///
/// These indicate programming errors, not bad client input, and always map to
/// a 500 response.
#[derive(Debug)]
pub enum ConfigError {
    /// A property mapping was registered twice for the same shape pair
    DuplicateMapping { source: &'static str, destination: &'static str },

    /// No property mapping exists for a shape pair
    MappingNotFound { source: &'static str, destination: &'static str },

    /// A mapping names a destination property the storage entity lacks
    UnknownDestinationProperty { alias: String, property: String },

    /// No URI template is registered under a route name
    RouteNotFound { route: String },

    /// A URI template placeholder was not supplied a value
    MissingTemplateParam { route: String, param: String },

    /// Configuration file could not be parsed
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::DuplicateMapping { source, destination } => write!(
                f,
                "property mapping for {} -> {} is already registered",
                source, destination
            ),
            ConfigError::MappingNotFound { source, destination } => {
                write!(f, "no property mapping for {} -> {}", source, destination)
            }
            ConfigError::UnknownDestinationProperty { alias, property } => write!(
                f,
                "alias '{}' maps to unknown storage property '{}'",
                alias, property
            ),
            ConfigError::RouteNotFound { route } => {
                write!(f, "no URI template registered for route '{}'", route)
            }
            ConfigError::MissingTemplateParam { route, param } => write!(
                f,
                "route '{}' requires a value for placeholder '{}'",
                route, param
            ),
            ConfigError::Parse(msg) => write!(f, "configuration error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// Validation Errors
// =============================================================================

/// Rejected client input
#[derive(Debug)]
pub enum ValidationError {
    /// An orderBy clause names an alias missing from the property mapping
    UnknownSortAlias { alias: String },

    /// A fields token does not match any declared field of the shape
    UnknownField { field: String },

    /// A query or path parameter could not be interpreted
    InvalidParameter { param: String, reason: String },

    /// Body validation failures, keyed by field name
    FieldErrors { errors: Vec<(String, String)> },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::UnknownSortAlias { alias } => {
                write!(f, "unknown sort key '{}'", alias)
            }
            ValidationError::UnknownField { field } => {
                write!(f, "unknown field '{}'", field)
            }
            ValidationError::InvalidParameter { param, reason } => {
                write!(f, "invalid parameter '{}': {}", param, reason)
            }
            ValidationError::FieldErrors { errors } => {
                write!(f, "validation failed for {} field(s)", errors.len())
            }
        }
    }
}

impl std::error::Error for ValidationError {}
