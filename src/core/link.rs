//! Hypermedia link assembly
//!
//! The assembler decides which relations a resource or collection exposes and
//! with what parameters. URI string construction is delegated to a
//! [`RouteTable`]: an injected route-name -> URI-template dictionary, keeping
//! the core decoupled from any particular routing mechanism.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

use crate::core::error::{ConfigError, FolioError};
use crate::core::query::{AuthorQuery, PageMeta};
use uuid::Uuid;

/// A hypermedia reference describing an available follow-up action
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LinkDto {
    pub href: String,
    pub rel: String,
    pub method: String,
}

impl LinkDto {
    pub fn new(href: impl Into<String>, rel: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            rel: rel.into(),
            method: method.into(),
        }
    }
}

/// Route-name -> URI-template dictionary
///
/// Templates use `{placeholder}` segments (`/api/authors/{id}`). Parameters
/// that match a placeholder are substituted into the path; leftover
/// parameters become the query string, in the order supplied.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    templates: HashMap<String, String>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route table matching the crate's own `/api` router
    pub fn library_defaults() -> Self {
        let mut table = Self::new();
        table.insert("get_authors", "/api/authors");
        table.insert("get_author", "/api/authors/{id}");
        table.insert("delete_author", "/api/authors/{id}");
        table.insert("get_author_collection", "/api/authorcollections/{ids}");
        table.insert("get_books_for_author", "/api/authors/{authorId}/books");
        table.insert("create_book_for_author", "/api/authors/{authorId}/books");
        table.insert("get_book_for_author", "/api/authors/{authorId}/books/{id}");
        table.insert("update_book_for_author", "/api/authors/{authorId}/books/{id}");
        table.insert(
            "partially_update_book_for_author",
            "/api/authors/{authorId}/books/{id}",
        );
        table.insert("delete_book_for_author", "/api/authors/{authorId}/books/{id}");
        table
    }

    pub fn insert(&mut self, route: impl Into<String>, template: impl Into<String>) {
        self.templates.insert(route.into(), template.into());
    }

    /// Build a URI for a named route.
    ///
    /// Fails when the route is unregistered or a `{placeholder}` in the
    /// template receives no value; both are configuration defects.
    pub fn href(&self, route: &str, params: &[(&str, String)]) -> Result<String, FolioError> {
        let template = self.templates.get(route).ok_or_else(|| {
            FolioError::Config(ConfigError::RouteNotFound { route: route.to_string() })
        })?;

        let mut path = template.clone();
        let mut query = String::new();

        for (name, value) in params {
            let placeholder = format!("{{{}}}", name);
            if path.contains(&placeholder) {
                path = path.replace(&placeholder, &encode_component(value));
            } else {
                query.push(if query.is_empty() { '?' } else { '&' });
                query.push_str(name);
                query.push('=');
                query.push_str(&encode_component(value));
            }
        }

        if let Some(start) = path.find('{') {
            let end = path[start..].find('}').map_or(path.len(), |e| start + e + 1);
            return Err(FolioError::Config(ConfigError::MissingTemplateParam {
                route: route.to_string(),
                param: path[start + 1..end - 1].to_string(),
            }));
        }

        Ok(format!("{}{}", path, query))
    }
}

/// Percent-encode everything outside the unreserved set
fn encode_component(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b',' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

/// Which page of a collection a link points at
enum PageLink {
    Current,
    Next,
    Previous,
}

/// Decides which hypermedia relations apply to authors, books, and the
/// authors collection
#[derive(Clone)]
pub struct LinkAssembler {
    routes: Arc<RouteTable>,
}

impl LinkAssembler {
    pub fn new(routes: Arc<RouteTable>) -> Self {
        Self { routes }
    }

    /// Links for a single author: self (echoing any restricted field set the
    /// resource was fetched with), delete, create-book, and books.
    pub fn for_author(&self, id: Uuid, fields: Option<&str>) -> Result<Vec<LinkDto>, FolioError> {
        let self_href = match fields {
            Some(fields) if !fields.trim().is_empty() => self.routes.href(
                "get_author",
                &[("id", id.to_string()), ("fields", fields.to_string())],
            )?,
            _ => self.routes.href("get_author", &[("id", id.to_string())])?,
        };

        Ok(vec![
            LinkDto::new(self_href, "self", "GET"),
            LinkDto::new(
                self.routes.href("delete_author", &[("id", id.to_string())])?,
                "delete_author",
                "DELETE",
            ),
            LinkDto::new(
                self.routes
                    .href("create_book_for_author", &[("authorId", id.to_string())])?,
                "create_book_for_author",
                "POST",
            ),
            LinkDto::new(
                self.routes
                    .href("get_books_for_author", &[("authorId", id.to_string())])?,
                "books",
                "GET",
            ),
        ])
    }

    /// Links for a single book: self plus the sibling write actions
    pub fn for_book(&self, author_id: Uuid, id: Uuid) -> Result<Vec<LinkDto>, FolioError> {
        let params = [("authorId", author_id.to_string()), ("id", id.to_string())];

        Ok(vec![
            LinkDto::new(self.routes.href("get_book_for_author", &params)?, "self", "GET"),
            LinkDto::new(
                self.routes.href("delete_book_for_author", &params)?,
                "delete_book",
                "DELETE",
            ),
            LinkDto::new(
                self.routes.href("update_book_for_author", &params)?,
                "update_book",
                "PUT",
            ),
            LinkDto::new(
                self.routes.href("partially_update_book_for_author", &params)?,
                "partially_update_book",
                "PATCH",
            ),
        ])
    }

    /// Links for the authors collection: self always, nextPage only when a
    /// next page exists, previousPage only when a previous page exists.
    pub fn for_authors(
        &self,
        query: &AuthorQuery,
        meta: &PageMeta,
    ) -> Result<Vec<LinkDto>, FolioError> {
        let mut links = vec![LinkDto::new(
            self.authors_uri(query, meta, PageLink::Current)?,
            "self",
            "GET",
        )];

        if meta.has_next() {
            links.push(LinkDto::new(
                self.authors_uri(query, meta, PageLink::Next)?,
                "nextPage",
                "GET",
            ));
        }

        if meta.has_previous() {
            links.push(LinkDto::new(
                self.authors_uri(query, meta, PageLink::Previous)?,
                "previousPage",
                "GET",
            ));
        }

        Ok(links)
    }

    fn authors_uri(
        &self,
        query: &AuthorQuery,
        meta: &PageMeta,
        page: PageLink,
    ) -> Result<String, FolioError> {
        let page_number = match page {
            PageLink::Current => meta.current_page,
            PageLink::Next => meta.current_page + 1,
            PageLink::Previous => meta.current_page - 1,
        };

        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(fields) = &query.fields {
            params.push(("fields", fields.clone()));
        }
        params.push(("orderBy", query.order_by.clone()));
        if let Some(genre) = &query.genre {
            params.push(("genre", genre.clone()));
        }
        if let Some(search) = &query.search_query {
            params.push(("searchQuery", search.clone()));
        }
        params.push(("pageNumber", page_number.to_string()));
        params.push(("pageSize", meta.page_size.to_string()));

        self.routes.href("get_authors", &params)
    }
}
