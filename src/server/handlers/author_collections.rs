//! Handlers for bulk author operations

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{EntityError, FolioError, ValidationError};
use crate::models::{AuthorDto, CreateAuthorDto, validation_failure};
use crate::server::handlers::AppState;

/// `POST /api/authorcollections`
///
/// Creates several authors in one request. The Location header addresses
/// the whole batch through the comma-separated ID list route.
pub async fn create_author_collection(
    State(state): State<AppState>,
    Json(dtos): Json<Vec<CreateAuthorDto>>,
) -> Result<Response, FolioError> {
    if dtos.is_empty() {
        return Err(FolioError::Validation(ValidationError::InvalidParameter {
            param: "body".to_string(),
            reason: "at least one author is required".to_string(),
        }));
    }

    for dto in &dtos {
        dto.validate().map_err(validation_failure)?;
    }

    let mut ids = Vec::with_capacity(dtos.len());
    let mut views = Vec::with_capacity(dtos.len());
    for dto in dtos {
        let (author, books) = dto.into_rows();
        ids.push(author.id.to_string());
        views.push(AuthorDto::from(&author));
        state.repository.add_author(author, books).await?;
    }

    let location = state
        .routes
        .href("get_author_collection", &[("ids", ids.join(","))])?;

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(views)).into_response())
}

/// `GET /api/authorcollections/{ids}`
///
/// `ids` is a comma-separated UUID list; the whole collection 404s as soon
/// as any requested author is missing.
pub async fn get_author_collection(
    State(state): State<AppState>,
    Path(ids): Path<String>,
) -> Result<Json<Vec<AuthorDto>>, FolioError> {
    let parsed: Vec<Uuid> = ids
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(Uuid::parse_str)
        .collect::<Result<_, _>>()
        .map_err(|e| {
            FolioError::Validation(ValidationError::InvalidParameter {
                param: "ids".to_string(),
                reason: e.to_string(),
            })
        })?;

    if parsed.is_empty() {
        return Err(FolioError::Validation(ValidationError::InvalidParameter {
            param: "ids".to_string(),
            reason: "at least one id is required".to_string(),
        }));
    }

    let authors = state.repository.get_authors_by_ids(&parsed).await?;
    if authors.len() != parsed.len() {
        let missing = parsed
            .iter()
            .find(|id| !authors.iter().any(|author| &author.id == *id))
            .copied()
            .unwrap_or_else(Uuid::nil);
        return Err(FolioError::Entity(EntityError::NotFound {
            resource: "author",
            id: missing,
        }));
    }

    Ok(Json(authors.iter().map(AuthorDto::from).collect()))
}
