//! Resource parameters and pagination metadata

use serde::{Deserialize, Serialize};

/// Default and maximum page size when no paging configuration overrides them
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Query parameters controlling paging, filtering, sorting, and shaping of
/// the authors collection
///
/// # Example
/// ```text
/// GET /api/authors?pageNumber=2&pageSize=10&orderBy=name desc&fields=name,genre
/// GET /api/authors?genre=Fantasy&searchQuery=orwell
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuthorQuery {
    /// Page number (starts at 1)
    pub page_number: usize,

    /// Number of items per page; silently clamped to the configured maximum
    pub page_size: usize,

    /// Exact-match genre filter
    pub genre: Option<String>,

    /// Case-insensitive substring search over genre and names
    pub search_query: Option<String>,

    /// Comma-separated sort clauses over client-facing aliases
    /// (`"name desc, age"`)
    pub order_by: String,

    /// Comma-separated field selection; absent means all fields
    pub fields: Option<String>,
}

impl Default for AuthorQuery {
    fn default() -> Self {
        Self {
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE,
            genre: None,
            search_query: None,
            order_by: "name".to_string(),
            fields: None,
        }
    }
}

impl AuthorQuery {
    /// Page number, ensuring a minimum of 1
    pub fn page_number(&self) -> usize {
        self.page_number.max(1)
    }

    /// Page size clamped to `1..=max`
    pub fn page_size(&self, max: usize) -> usize {
        self.page_size.clamp(1, max.max(1))
    }
}

/// Pagination metadata for a collection response.
///
/// Travels out-of-band in the `X-Pagination` response header rather than in
/// the body; the body already carries the item sequence plus hypermedia
/// links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Total number of items after filters
    pub total_count: usize,

    /// Effective (clamped) page size
    pub page_size: usize,

    /// Current page number (starts at 1)
    pub current_page: usize,

    /// Total number of pages (0 when there are no items)
    pub total_pages: usize,
}

impl PageMeta {
    pub fn new(total_count: usize, page_size: usize, current_page: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = if total_count == 0 {
            0
        } else {
            total_count.div_ceil(page_size)
        };

        Self {
            total_count,
            page_size,
            current_page: current_page.max(1),
            total_pages,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// One page of results plus its metadata
#[derive(Debug, Clone)]
pub struct PagedList<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T> PagedList<T> {
    /// Slice one page out of a fully filtered and sorted collection.
    ///
    /// A page number beyond the last page yields an empty item list, not an
    /// error; the metadata still reports the real totals.
    pub fn paginate(items: Vec<T>, page_number: usize, page_size: usize) -> Self {
        let meta = PageMeta::new(items.len(), page_size, page_number);
        let start = (meta.current_page - 1).saturating_mul(meta.page_size);

        let items = if start >= items.len() {
            Vec::new()
        } else {
            items
                .into_iter()
                .skip(start)
                .take(meta.page_size)
                .collect()
        };

        Self { items, meta }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_defaults() {
        let query = AuthorQuery::default();
        assert_eq!(query.page_number(), 1);
        assert_eq!(query.page_size(DEFAULT_PAGE_SIZE), 20);
        assert_eq!(query.order_by, "name");
        assert!(query.fields.is_none());
    }

    #[test]
    fn test_page_size_is_clamped() {
        let query = AuthorQuery { page_size: 500, ..Default::default() };
        assert_eq!(query.page_size(20), 20);

        let query = AuthorQuery { page_size: 0, ..Default::default() };
        assert_eq!(query.page_size(20), 1);
    }

    #[test]
    fn test_meta_total_pages() {
        let meta = PageMeta::new(45, 20, 1);
        assert_eq!(meta.total_pages, 3);

        let meta = PageMeta::new(0, 20, 1);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_next());
        assert!(!meta.has_previous());
    }

    #[test]
    fn test_meta_flags_across_pages() {
        let first = PageMeta::new(45, 20, 1);
        assert!(!first.has_previous());
        assert!(first.has_next());

        let last = PageMeta::new(45, 20, 3);
        assert!(last.has_previous());
        assert!(!last.has_next());
    }

    #[test]
    fn test_paginate_slices_pages() {
        let items: Vec<usize> = (0..45).collect();

        let page = PagedList::paginate(items.clone(), 1, 20);
        assert_eq!(page.items.len(), 20);
        assert_eq!(page.items[0], 0);

        let page = PagedList::paginate(items.clone(), 3, 20);
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.items[0], 40);
    }

    #[test]
    fn test_paginate_beyond_last_page() {
        let items: Vec<usize> = (0..45).collect();
        let page = PagedList::paginate(items, 4, 20);

        assert!(page.items.is_empty());
        assert!(page.meta.has_previous());
        assert!(!page.meta.has_next());
        assert_eq!(page.meta.total_pages, 3);
    }

    #[test]
    fn test_meta_serializes_camel_case() {
        let meta = PageMeta::new(45, 20, 2);
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["totalCount"], 45);
        assert_eq!(json["pageSize"], 20);
        assert_eq!(json["currentPage"], 2);
        assert_eq!(json["totalPages"], 3);
    }

    #[test]
    fn test_query_deserializes_camel_case() {
        let query: AuthorQuery = serde_json::from_str(
            r#"{"pageNumber": 2, "pageSize": 5, "orderBy": "age desc", "searchQuery": "or"}"#,
        )
        .unwrap();

        assert_eq!(query.page_number, 2);
        assert_eq!(query.page_size, 5);
        assert_eq!(query.order_by, "age desc");
        assert_eq!(query.search_query.as_deref(), Some("or"));
    }
}
