//! Field value types and client field selections

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use uuid::Uuid;

/// A polymorphic field value that can hold different scalar types
///
/// Shaped records and sort keys both use this closed set of variants, so the
/// response boundary can serialize any projected field generically.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Uuid(Uuid),
    DateTime(DateTime<Utc>),
    Null,
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the value as a UUID if possible
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            FieldValue::Uuid(u) => Some(*u),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Total ordering used by the dynamic sorter.
    ///
    /// Values of the same kind compare naturally. Null orders before everything
    /// else. Mismatched kinds compare equal; a well-formed property mapping
    /// never produces them for the same storage property.
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        use FieldValue::*;
        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Null, _) => Ordering::Less,
            (_, Null) => Ordering::Greater,
            (String(a), String(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Boolean(a), Boolean(b)) => a.cmp(b),
            (Uuid(a), Uuid(b)) => a.cmp(b),
            (DateTime(a), DateTime(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

/// A parsed client field selection (`?fields=name,genre`)
///
/// Tokens are trimmed; matching against declared fields is case-insensitive.
/// An empty or absent selection means "all declared fields".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSelection {
    tokens: Vec<String>,
}

impl FieldSelection {
    /// Parse a comma-separated field list; `None` or whitespace yields the
    /// empty selection
    pub fn parse(fields: Option<&str>) -> Self {
        let tokens = match fields {
            Some(raw) if !raw.trim().is_empty() => raw
                .split(',')
                .map(|token| token.trim().to_string())
                .filter(|token| !token.is_empty())
                .collect(),
            _ => Vec::new(),
        };

        Self { tokens }
    }

    /// True when no specific fields were requested
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Requested field names, in request order
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}
