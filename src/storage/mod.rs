//! Storage collaborators for the library catalog
//!
//! The repository trait is the external persistence boundary: it executes
//! filtered, sorted, paginated queries and plain CRUD. The projection engine
//! never touches storage directly.

pub mod in_memory;

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::core::mapping::PropertyMapping;
use crate::core::query::{AuthorQuery, PagedList};
use crate::entities::{Author, Book};

pub use in_memory::InMemoryLibrary;

/// Repository capability consumed by the request handlers
///
/// Implementations are agnostic to shaping and links; they only apply the
/// filter, the mapped ordering expression, and pagination.
#[async_trait]
pub trait LibraryRepository: Send + Sync {
    /// Execute a filtered, sorted, paginated authors query.
    ///
    /// `mapping` resolves the orderBy aliases in `query`; callers validate
    /// the expression before calling.
    async fn query_authors(
        &self,
        query: &AuthorQuery,
        mapping: &PropertyMapping,
        page_number: usize,
        page_size: usize,
    ) -> Result<PagedList<Author>>;

    /// Get an author by ID
    async fn get_author(&self, id: &Uuid) -> Result<Option<Author>>;

    /// Check whether an author exists
    async fn author_exists(&self, id: &Uuid) -> Result<bool>;

    /// Authors for an explicit ID list, in the order the IDs were given;
    /// missing IDs are simply absent from the result
    async fn get_authors_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Author>>;

    /// Insert an author together with its nested books
    async fn add_author(&self, author: Author, books: Vec<Book>) -> Result<()>;

    /// Delete an author and, cascading, all of its books.
    /// Returns false when the author did not exist.
    async fn delete_author(&self, id: &Uuid) -> Result<bool>;

    /// Books of one author, ordered by title
    async fn get_books_for_author(&self, author_id: &Uuid) -> Result<Vec<Book>>;

    /// A specific book of a specific author
    async fn get_book_for_author(&self, author_id: &Uuid, book_id: &Uuid) -> Result<Option<Book>>;

    /// Insert a book
    async fn add_book(&self, book: Book) -> Result<()>;

    /// Replace a stored book by ID
    async fn update_book(&self, book: Book) -> Result<()>;

    /// Delete a book. Returns false when it did not exist for that author.
    async fn delete_book(&self, author_id: &Uuid, book_id: &Uuid) -> Result<bool>;
}
