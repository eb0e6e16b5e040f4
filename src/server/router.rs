//! Router assembly for the library API

use axum::{Router, routing::get, routing::post};

use crate::server::handlers::{AppState, author_collections, authors, books};

/// Build the `/api` routes
///
/// - GET/POST /api/authors — paged, sorted, shaped collection / creation
/// - GET/POST/DELETE /api/authors/{id} — single author (POST blocks
///   client-chosen IDs)
/// - POST /api/authorcollections, GET /api/authorcollections/{ids} — bulk
/// - GET/POST /api/authors/{authorId}/books and
///   GET/PUT/PATCH/DELETE /api/authors/{authorId}/books/{id}
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/authors",
            get(authors::list_authors).post(authors::create_author),
        )
        .route(
            "/api/authors/{id}",
            get(authors::get_author)
                .post(authors::block_author_creation)
                .delete(authors::delete_author),
        )
        .route(
            "/api/authorcollections",
            post(author_collections::create_author_collection),
        )
        .route(
            "/api/authorcollections/{ids}",
            get(author_collections::get_author_collection),
        )
        .route(
            "/api/authors/{author_id}/books",
            get(books::list_books).post(books::create_book),
        )
        .route(
            "/api/authors/{author_id}/books/{id}",
            get(books::get_book)
                .put(books::update_book)
                .patch(books::patch_book)
                .delete(books::delete_book),
        )
        .with_state(state)
}
