//! # Folio
//!
//! A library catalog REST API built around a generic resource projection and
//! query-customization engine.
//!
//! ## Features
//!
//! - **Property mappings**: client-facing sort aliases resolve to one or
//!   more storage properties, optionally with an inverted direction
//!   (`age` → `date_of_birth` descending)
//! - **Dynamic sorting**: `orderBy=name desc, age` composes into one
//!   stable multi-key ordering
//! - **Data shaping**: `fields=name,genre` projects resources down to the
//!   requested fields, reflection-free, via per-shape accessor tables
//! - **Pagination**: clamped page sizes, out-of-band `x-pagination`
//!   metadata header
//! - **HATEOAS links**: self/next/previous collection links and sibling
//!   action links per resource, built from an injected route-template table
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use folio::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     ServerBuilder::new()
//!         .with_repository(InMemoryLibrary::seeded())
//!         .serve("127.0.0.1:3000")
//!         .await
//! }
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod models;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core engine ===
    pub use crate::core::{
        error::{ConfigError, EntityError, FolioError, ValidationError},
        field::{FieldSelection, FieldValue},
        link::{LinkAssembler, LinkDto, RouteTable},
        mapping::{MappingRegistry, PropertyMapping, PropertyMappingValue},
        query::{AuthorQuery, PagedList, PageMeta},
        shape::{ShapedRecord, Shapeable, has_fields, shape, shape_all},
        sort::{Sortable, apply_sort},
    };

    // === Domain ===
    pub use crate::entities::{Author, Book};
    pub use crate::models::{AuthorDto, BookDto, CreateAuthorDto, CreateBookDto, UpdateBookDto};

    // === Storage ===
    pub use crate::storage::{InMemoryLibrary, LibraryRepository};

    // === Config ===
    pub use crate::config::{ApiConfig, PagingConfig};

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder, build_router, library_registry};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
