//! Client-facing representations: read DTOs and validated write models
//!
//! Read DTOs implement [`Shapeable`] so the shaping engine can project them
//! without reflection; their declared field tables double as the reference
//! for `fields=` validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::core::error::{FolioError, ValidationError};
use crate::core::field::FieldValue;
use crate::core::shape::Shapeable;
use crate::entities::{Author, Book, current_age};

/// Author as presented to clients: a joined name and a derived age instead
/// of the stored name parts and birth date
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorDto {
    pub id: Uuid,
    pub name: String,
    pub age: i64,
    pub genre: String,
}

impl From<&Author> for AuthorDto {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id,
            name: format!("{} {}", author.first_name, author.last_name),
            age: current_age(author.date_of_birth),
            genre: author.genre.clone(),
        }
    }
}

impl Shapeable for AuthorDto {
    fn declared_fields() -> &'static [&'static str] {
        &["id", "name", "age", "genre"]
    }

    fn field_value(&self, field: &str) -> FieldValue {
        match field {
            "id" => FieldValue::Uuid(self.id),
            "name" => FieldValue::String(self.name.clone()),
            "age" => FieldValue::Integer(self.age),
            "genre" => FieldValue::String(self.genre.clone()),
            _ => FieldValue::Null,
        }
    }
}

/// Book as presented to clients
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDto {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub author_id: Uuid,
}

impl From<&Book> for BookDto {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            description: book.description.clone(),
            author_id: book.author_id,
        }
    }
}

impl Shapeable for BookDto {
    fn declared_fields() -> &'static [&'static str] {
        &["id", "title", "description", "authorId"]
    }

    fn field_value(&self, field: &str) -> FieldValue {
        match field {
            "id" => FieldValue::Uuid(self.id),
            "title" => FieldValue::String(self.title.clone()),
            "description" => match &self.description {
                Some(description) => FieldValue::String(description.clone()),
                None => FieldValue::Null,
            },
            "authorId" => FieldValue::Uuid(self.author_id),
            _ => FieldValue::Null,
        }
    }
}

/// Write model for creating an author, optionally with nested books
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthorDto {
    #[validate(length(min = 1, max = 50))]
    pub first_name: String,

    #[validate(length(min = 1, max = 50))]
    pub last_name: String,

    pub date_of_birth: DateTime<Utc>,

    #[validate(length(min = 1, max = 50))]
    pub genre: String,

    #[serde(default)]
    #[validate(nested)]
    pub books: Vec<CreateBookDto>,
}

impl CreateAuthorDto {
    /// Materialize the author row and its nested book rows
    pub fn into_rows(self) -> (Author, Vec<Book>) {
        let author = Author::new(self.first_name, self.last_name, self.date_of_birth, self.genre);
        let books = self
            .books
            .into_iter()
            .map(|book| Book::new(author.id, book.title, book.description))
            .collect();
        (author, books)
    }
}

/// Write model for creating a book
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookDto {
    #[validate(length(min = 1, max = 100))]
    pub title: String,

    #[validate(length(max = 500))]
    pub description: Option<String>,
}

/// Write model for replacing a book; unlike creation, the description is
/// mandatory
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookDto {
    #[validate(length(min = 1, max = 100))]
    pub title: String,

    #[validate(length(min = 1, max = 500))]
    pub description: String,
}

/// Write model for partially updating a book; absent fields keep their
/// current values
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PatchBookDto {
    #[validate(length(min = 1, max = 100))]
    pub title: Option<String>,

    #[validate(length(max = 500))]
    pub description: Option<String>,
}

impl PatchBookDto {
    /// Merge this patch over an existing book's fields
    pub fn apply_to(&self, book: &Book) -> (String, Option<String>) {
        let title = self.title.clone().unwrap_or_else(|| book.title.clone());
        let description = match &self.description {
            Some(description) => Some(description.clone()),
            None => book.description.clone(),
        };
        (title, description)
    }
}

/// Convert `validator` failures into the typed field-error taxonomy
pub fn validation_failure(errors: ValidationErrors) -> FolioError {
    let mut fields: Vec<(String, String)> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                (field.to_string(), message)
            })
        })
        .collect();
    fields.sort();

    FolioError::Validation(ValidationError::FieldErrors { errors: fields })
}

/// The cross-field rule shared by every book write model
pub fn title_matches_description(title: &str, description: Option<&str>) -> bool {
    description.is_some_and(|description| description == title)
}
