//! In-memory implementation of LibraryRepository for testing and development

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::core::mapping::PropertyMapping;
use crate::core::query::{AuthorQuery, PagedList};
use crate::core::sort::apply_sort;
use crate::entities::{Author, Book};
use crate::storage::LibraryRepository;

/// In-memory library repository
///
/// Rows live in Vecs so the natural (insertion) order is deterministic when
/// no ordering expression is applied. Uses RwLock for thread-safe access.
#[derive(Clone, Default)]
pub struct InMemoryLibrary {
    authors: Arc<RwLock<Vec<Author>>>,
    books: Arc<RwLock<Vec<Book>>>,
}

impl InMemoryLibrary {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository preloaded with a small catalog
    pub fn seeded() -> Self {
        let repo = Self::new();
        {
            let mut authors = repo.authors.write().expect("fresh lock");
            let mut books = repo.books.write().expect("fresh lock");

            let seed = [
                ("George", "Orwell", 1903, 6, 25, "Dystopia", vec!["1984", "Animal Farm"]),
                ("Jane", "Austen", 1775, 12, 16, "Classic", vec!["Emma", "Persuasion"]),
                ("Ursula", "Le Guin", 1929, 10, 21, "Fantasy", vec!["The Dispossessed"]),
                ("Isaac", "Asimov", 1920, 1, 2, "Science Fiction", vec!["Foundation"]),
                ("Agatha", "Christie", 1890, 9, 15, "Mystery", vec![]),
                ("Mary", "Shelley", 1797, 8, 30, "Gothic", vec!["Frankenstein"]),
            ];

            for (first, last, year, month, day, genre, titles) in seed {
                let author = Author::new(
                    first,
                    last,
                    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap(),
                    genre,
                );
                for title in titles {
                    books.push(Book::new(author.id, title, None));
                }
                authors.push(author);
            }
        }
        repo
    }

    fn matches(author: &Author, query: &AuthorQuery) -> bool {
        if let Some(genre) = &query.genre {
            if !author.genre.trim().eq_ignore_ascii_case(genre.trim()) {
                return false;
            }
        }

        if let Some(search) = &query.search_query {
            let needle = search.trim().to_lowercase();
            if !needle.is_empty() {
                let haystack = format!(
                    "{} {} {}",
                    author.first_name, author.last_name, author.genre
                )
                .to_lowercase();
                if !haystack.contains(&needle) {
                    return false;
                }
            }
        }

        true
    }
}

#[async_trait]
impl LibraryRepository for InMemoryLibrary {
    async fn query_authors(
        &self,
        query: &AuthorQuery,
        mapping: &PropertyMapping,
        page_number: usize,
        page_size: usize,
    ) -> Result<PagedList<Author>> {
        let authors = self
            .authors
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let mut matching: Vec<Author> = authors
            .iter()
            .filter(|author| Self::matches(author, query))
            .cloned()
            .collect();
        drop(authors);

        apply_sort(&mut matching, &query.order_by, mapping)?;

        Ok(PagedList::paginate(matching, page_number, page_size))
    }

    async fn get_author(&self, id: &Uuid) -> Result<Option<Author>> {
        let authors = self
            .authors
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(authors.iter().find(|author| &author.id == id).cloned())
    }

    async fn author_exists(&self, id: &Uuid) -> Result<bool> {
        let authors = self
            .authors
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(authors.iter().any(|author| &author.id == id))
    }

    async fn get_authors_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Author>> {
        let authors = self
            .authors
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(ids
            .iter()
            .filter_map(|id| authors.iter().find(|author| &author.id == id).cloned())
            .collect())
    }

    async fn add_author(&self, author: Author, new_books: Vec<Book>) -> Result<()> {
        let mut authors = self
            .authors
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        let mut books = self
            .books
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        authors.push(author);
        books.extend(new_books);

        Ok(())
    }

    async fn delete_author(&self, id: &Uuid) -> Result<bool> {
        let mut authors = self
            .authors
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let before = authors.len();
        authors.retain(|author| &author.id != id);
        if authors.len() == before {
            return Ok(false);
        }
        drop(authors);

        let mut books = self
            .books
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        books.retain(|book| &book.author_id != id);

        Ok(true)
    }

    async fn get_books_for_author(&self, author_id: &Uuid) -> Result<Vec<Book>> {
        let books = self
            .books
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let mut result: Vec<Book> = books
            .iter()
            .filter(|book| &book.author_id == author_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| a.title.cmp(&b.title));

        Ok(result)
    }

    async fn get_book_for_author(&self, author_id: &Uuid, book_id: &Uuid) -> Result<Option<Book>> {
        let books = self
            .books
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(books
            .iter()
            .find(|book| &book.author_id == author_id && &book.id == book_id)
            .cloned())
    }

    async fn add_book(&self, book: Book) -> Result<()> {
        let mut books = self
            .books
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        books.push(book);
        Ok(())
    }

    async fn update_book(&self, book: Book) -> Result<()> {
        let mut books = self
            .books
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        match books.iter_mut().find(|stored| stored.id == book.id) {
            Some(stored) => {
                *stored = book;
                Ok(())
            }
            None => Err(anyhow!("Book not found")),
        }
    }

    async fn delete_book(&self, author_id: &Uuid, book_id: &Uuid) -> Result<bool> {
        let mut books = self
            .books
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let before = books.len();
        books.retain(|book| !(&book.author_id == author_id && &book.id == book_id));

        Ok(books.len() != before)
    }
}
