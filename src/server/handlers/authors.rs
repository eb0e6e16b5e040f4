//! Handlers for the authors resource

use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{EntityError, FolioError};
use crate::core::field::FieldSelection;
use crate::core::shape::{shape, shape_all};
use crate::core::query::AuthorQuery;
use crate::entities::Author;
use crate::models::{AuthorDto, CreateAuthorDto, validation_failure};
use crate::server::handlers::{AppState, ensure_known_fields, ensure_valid_order_by, to_json};

/// Pagination metadata header, serialized JSON
pub const PAGINATION_HEADER: &str = "x-pagination";

/// Query parameters for single-resource reads
#[derive(Debug, Default, Deserialize)]
pub struct FieldsParam {
    pub fields: Option<String>,
}

/// `GET /api/authors`
///
/// Validates sorting against the property mapping and shaping against the
/// DTO's declared fields before the repository runs. Pagination metadata
/// travels in the `x-pagination` header; the body carries the shaped items
/// plus collection links.
pub async fn list_authors(
    State(state): State<AppState>,
    Query(query): Query<AuthorQuery>,
) -> Result<Response, FolioError> {
    let mapping = state.registry.lookup::<AuthorDto, Author>()?;
    ensure_valid_order_by(mapping, &query.order_by)?;
    ensure_known_fields::<AuthorDto>(query.fields.as_deref())?;

    let page = state
        .repository
        .query_authors(
            &query,
            mapping,
            query.page_number(),
            query.page_size(state.config.paging.max_page_size),
        )
        .await?;

    let pagination =
        serde_json::to_string(&page.meta).map_err(|e| FolioError::Internal(e.to_string()))?;

    let dtos: Vec<AuthorDto> = page.items.iter().map(AuthorDto::from).collect();
    let selection = FieldSelection::parse(query.fields.as_deref());

    let mut values = Vec::with_capacity(dtos.len());
    for (dto, record) in dtos.iter().zip(shape_all(&dtos, &selection)) {
        let mut value = to_json(&record)?;
        value["links"] = to_json(&state.links.for_author(dto.id, query.fields.as_deref())?)?;
        values.push(value);
    }

    let links = state.links.for_authors(&query, &page.meta)?;
    let body = serde_json::json!({ "values": values, "links": links });

    Ok(([(PAGINATION_HEADER, pagination)], Json(body)).into_response())
}

/// `GET /api/authors/{id}`
pub async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<FieldsParam>,
) -> Result<Response, FolioError> {
    ensure_known_fields::<AuthorDto>(params.fields.as_deref())?;

    let author = state
        .repository
        .get_author(&id)
        .await?
        .ok_or(FolioError::Entity(EntityError::NotFound { resource: "author", id }))?;

    let dto = AuthorDto::from(&author);
    let selection = FieldSelection::parse(params.fields.as_deref());
    let mut value = to_json(&shape(&dto, &selection))?;
    value["links"] = to_json(&state.links.for_author(dto.id, params.fields.as_deref())?)?;

    Ok(Json(value).into_response())
}

/// `POST /api/authors`
pub async fn create_author(
    State(state): State<AppState>,
    Json(dto): Json<CreateAuthorDto>,
) -> Result<Response, FolioError> {
    dto.validate().map_err(validation_failure)?;

    let (author, books) = dto.into_rows();
    state.repository.add_author(author.clone(), books).await?;

    let view = AuthorDto::from(&author);
    let mut value = to_json(&shape(&view, &FieldSelection::default()))?;
    value["links"] = to_json(&state.links.for_author(view.id, None)?)?;

    let location = state
        .routes
        .href("get_author", &[("id", view.id.to_string())])?;

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(value)).into_response())
}

/// `POST /api/authors/{id}`
///
/// Creation at a client-chosen URI is not supported: answers 409 when the
/// author already exists and 404 otherwise.
pub async fn block_author_creation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, FolioError> {
    if state.repository.author_exists(&id).await? {
        Err(FolioError::Entity(EntityError::Conflict { resource: "author", id }))
    } else {
        Err(FolioError::Entity(EntityError::NotFound { resource: "author", id }))
    }
}

/// `DELETE /api/authors/{id}`
pub async fn delete_author(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, FolioError> {
    if !state.repository.delete_author(&id).await? {
        return Err(FolioError::Entity(EntityError::NotFound { resource: "author", id }));
    }

    Ok(StatusCode::NO_CONTENT.into_response())
}
