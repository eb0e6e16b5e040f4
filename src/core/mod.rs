//! Core module: the resource projection & query-customization engine

pub mod error;
pub mod field;
pub mod link;
pub mod mapping;
pub mod query;
pub mod shape;
pub mod sort;

pub use error::{ConfigError, EntityError, FolioError, ValidationError};
pub use field::{FieldSelection, FieldValue};
pub use link::{LinkAssembler, LinkDto, RouteTable};
pub use mapping::{MappingRegistry, PropertyMapping, PropertyMappingValue};
pub use query::{AuthorQuery, PagedList, PageMeta};
pub use shape::{ShapedRecord, Shapeable, has_fields, shape, shape_all};
pub use sort::{Sortable, apply_sort, parse_order_by};
