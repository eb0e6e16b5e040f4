//! Storage entities for the library catalog

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::field::FieldValue;
use crate::core::sort::Sortable;

/// An author row as stored by the repository
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: DateTime<Utc>,
    pub genre: String,
}

impl Author {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        date_of_birth: DateTime<Utc>,
        genre: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            date_of_birth,
            genre: genre.into(),
        }
    }
}

impl Sortable for Author {
    fn storage_properties() -> &'static [&'static str] {
        &["id", "first_name", "last_name", "date_of_birth", "genre"]
    }

    fn sort_value(&self, property: &str) -> FieldValue {
        match property {
            "id" => FieldValue::Uuid(self.id),
            "first_name" => FieldValue::String(self.first_name.clone()),
            "last_name" => FieldValue::String(self.last_name.clone()),
            "date_of_birth" => FieldValue::DateTime(self.date_of_birth),
            "genre" => FieldValue::String(self.genre.clone()),
            _ => FieldValue::Null,
        }
    }
}

/// A book row, always owned by one author
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub description: Option<String>,
}

impl Book {
    pub fn new(
        author_id: Uuid,
        title: impl Into<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id,
            title: title.into(),
            description,
        }
    }
}

/// Age in whole years as of now
pub fn current_age(date_of_birth: DateTime<Utc>) -> i64 {
    let today = Utc::now().date_naive();
    let born = date_of_birth.date_naive();

    let mut age = i64::from(today.year() - born.year());
    if (today.month(), today.day()) < (born.month(), born.day()) {
        age -= 1;
    }
    age.max(0)
}
