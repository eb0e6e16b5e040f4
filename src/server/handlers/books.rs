//! Handlers for the books sub-resource

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{EntityError, FolioError, ValidationError};
use crate::core::link::LinkDto;
use crate::entities::Book;
use crate::models::{
    BookDto, CreateBookDto, PatchBookDto, UpdateBookDto, title_matches_description,
    validation_failure,
};
use crate::server::handlers::AppState;

/// A book plus its hypermedia links
#[derive(Debug, Serialize)]
pub struct BookResponse {
    #[serde(flatten)]
    pub book: BookDto,
    pub links: Vec<LinkDto>,
}

fn title_description_error() -> FolioError {
    FolioError::Validation(ValidationError::FieldErrors {
        errors: vec![(
            "description".to_string(),
            "The title cannot be the same as the description".to_string(),
        )],
    })
}

async fn ensure_author(state: &AppState, author_id: Uuid) -> Result<(), FolioError> {
    if state.repository.author_exists(&author_id).await? {
        Ok(())
    } else {
        Err(FolioError::Entity(EntityError::NotFound {
            resource: "author",
            id: author_id,
        }))
    }
}

fn book_response(state: &AppState, book: &Book) -> Result<BookResponse, FolioError> {
    Ok(BookResponse {
        book: BookDto::from(book),
        links: state.links.for_book(book.author_id, book.id)?,
    })
}

fn created_book(state: &AppState, book: &Book) -> Result<Response, FolioError> {
    let location = state.routes.href(
        "get_book_for_author",
        &[
            ("authorId", book.author_id.to_string()),
            ("id", book.id.to_string()),
        ],
    )?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(book_response(state, book)?),
    )
        .into_response())
}

/// `GET /api/authors/{authorId}/books`
pub async fn list_books(
    State(state): State<AppState>,
    Path(author_id): Path<Uuid>,
) -> Result<Json<Vec<BookResponse>>, FolioError> {
    ensure_author(&state, author_id).await?;

    let books = state.repository.get_books_for_author(&author_id).await?;
    let responses = books
        .iter()
        .map(|book| book_response(&state, book))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(responses))
}

/// `GET /api/authors/{authorId}/books/{id}`
pub async fn get_book(
    State(state): State<AppState>,
    Path((author_id, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<BookResponse>, FolioError> {
    ensure_author(&state, author_id).await?;

    let book = state
        .repository
        .get_book_for_author(&author_id, &id)
        .await?
        .ok_or(FolioError::Entity(EntityError::NotFound { resource: "book", id }))?;

    Ok(Json(book_response(&state, &book)?))
}

/// `POST /api/authors/{authorId}/books`
pub async fn create_book(
    State(state): State<AppState>,
    Path(author_id): Path<Uuid>,
    Json(dto): Json<CreateBookDto>,
) -> Result<Response, FolioError> {
    dto.validate().map_err(validation_failure)?;
    if title_matches_description(&dto.title, dto.description.as_deref()) {
        return Err(title_description_error());
    }

    ensure_author(&state, author_id).await?;

    let book = Book::new(author_id, dto.title, dto.description);
    state.repository.add_book(book.clone()).await?;

    created_book(&state, &book)
}

/// `PUT /api/authors/{authorId}/books/{id}`
///
/// Replaces the book, or upserts it under the client-supplied ID when it
/// does not exist yet (204 on update, 201 on insert).
pub async fn update_book(
    State(state): State<AppState>,
    Path((author_id, id)): Path<(Uuid, Uuid)>,
    Json(dto): Json<UpdateBookDto>,
) -> Result<Response, FolioError> {
    dto.validate().map_err(validation_failure)?;
    if title_matches_description(&dto.title, Some(&dto.description)) {
        return Err(title_description_error());
    }

    ensure_author(&state, author_id).await?;

    let book = Book {
        id,
        author_id,
        title: dto.title,
        description: Some(dto.description),
    };

    match state.repository.get_book_for_author(&author_id, &id).await? {
        Some(_) => {
            state.repository.update_book(book).await?;
            Ok(StatusCode::NO_CONTENT.into_response())
        }
        None => {
            state.repository.add_book(book.clone()).await?;
            created_book(&state, &book)
        }
    }
}

/// `PATCH /api/authors/{authorId}/books/{id}`
///
/// Merges the patch over the stored book (or over an empty book when
/// upserting) and applies the full update validation to the result.
pub async fn patch_book(
    State(state): State<AppState>,
    Path((author_id, id)): Path<(Uuid, Uuid)>,
    Json(patch): Json<PatchBookDto>,
) -> Result<Response, FolioError> {
    patch.validate().map_err(validation_failure)?;

    ensure_author(&state, author_id).await?;

    let existing = state.repository.get_book_for_author(&author_id, &id).await?;

    let merged = match &existing {
        Some(book) => {
            let (title, description) = patch.apply_to(book);
            UpdateBookDto {
                title,
                description: description.unwrap_or_default(),
            }
        }
        None => UpdateBookDto {
            title: patch.title.unwrap_or_default(),
            description: patch.description.unwrap_or_default(),
        },
    };

    merged.validate().map_err(validation_failure)?;
    if title_matches_description(&merged.title, Some(&merged.description)) {
        return Err(title_description_error());
    }

    let book = Book {
        id,
        author_id,
        title: merged.title,
        description: Some(merged.description),
    };

    match existing {
        Some(_) => {
            state.repository.update_book(book).await?;
            Ok(StatusCode::NO_CONTENT.into_response())
        }
        None => {
            state.repository.add_book(book.clone()).await?;
            created_book(&state, &book)
        }
    }
}

/// `DELETE /api/authors/{authorId}/books/{id}`
pub async fn delete_book(
    State(state): State<AppState>,
    Path((author_id, id)): Path<(Uuid, Uuid)>,
) -> Result<Response, FolioError> {
    ensure_author(&state, author_id).await?;

    if !state.repository.delete_book(&author_id, &id).await? {
        return Err(FolioError::Entity(EntityError::NotFound { resource: "book", id }));
    }

    Ok(StatusCode::NO_CONTENT.into_response())
}
