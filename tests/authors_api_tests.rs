//! End-to-end tests for the library API
//!
//! These tests drive the assembled router over HTTP and verify:
//! - Pagination metadata and page-size clamping
//! - Alias-based sorting and field shaping, including their validation
//! - Hypermedia links on resources and collections
//! - Author, author-collection, and book CRUD semantics

use axum::http::StatusCode;
use axum_test::TestServer;
use folio::prelude::*;
use serde_json::{Value, json};
use uuid::Uuid;

fn server() -> TestServer {
    let app = ServerBuilder::new()
        .with_repository(InMemoryLibrary::seeded())
        .build()
        .unwrap();
    TestServer::new(app)
}

async fn author_id_by_search(server: &TestServer, search: &str) -> Uuid {
    let path = format!("/api/authors?searchQuery={}", search);
    let body: Value = server.get(&path).await.json();
    Uuid::parse_str(body["values"][0]["id"].as_str().unwrap()).unwrap()
}

fn pagination(response: &axum_test::TestResponse) -> Value {
    let header = response.header("x-pagination");
    serde_json::from_slice(header.as_bytes()).unwrap()
}

// =============================================================================
// Authors Collection
// =============================================================================

#[tokio::test]
async fn test_list_authors_carries_pagination_header() {
    let server = server();
    let response = server.get("/api/authors").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let meta = pagination(&response);
    assert_eq!(meta["totalCount"], 6);
    assert_eq!(meta["pageSize"], 20);
    assert_eq!(meta["currentPage"], 1);
    assert_eq!(meta["totalPages"], 1);

    let body: Value = response.json();
    assert_eq!(body["values"].as_array().unwrap().len(), 6);
    // Default ordering is by name.
    assert_eq!(body["values"][0]["name"], "Agatha Christie");
    assert_eq!(body["links"][0]["rel"], "self");
}

#[tokio::test]
async fn test_list_authors_shapes_fields() {
    let server = server();
    let body: Value = server.get("/api/authors?fields=name,genre").await.json();

    let first = body["values"][0].as_object().unwrap();
    assert!(first.contains_key("name"));
    assert!(first.contains_key("genre"));
    assert!(first.contains_key("links"));
    assert!(!first.contains_key("id"));
    assert!(!first.contains_key("age"));
}

#[tokio::test]
async fn test_list_authors_sorts_by_age_alias() {
    let server = server();
    let body: Value = server.get("/api/authors?orderBy=age").await.json();

    // Ascending age resolves to descending birth date: youngest first.
    assert_eq!(body["values"][0]["name"], "Ursula Le Guin");

    let body: Value = server.get("/api/authors?orderBy=age%20desc").await.json();
    assert_eq!(body["values"][0]["name"], "Jane Austen");
}

#[tokio::test]
async fn test_list_authors_rejects_unknown_sort_alias() {
    let server = server();
    let response = server.get("/api/authors?orderBy=title").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_list_authors_rejects_unknown_field() {
    let server = server();
    let response = server.get("/api/authors?fields=salary").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_authors_clamps_page_size() {
    let server = server();
    let response = server.get("/api/authors?pageSize=500").await;

    let meta = pagination(&response);
    assert_eq!(meta["pageSize"], 20);
}

#[tokio::test]
async fn test_list_authors_page_links() {
    let server = server();

    let response = server.get("/api/authors?pageSize=4").await;
    let meta = pagination(&response);
    assert_eq!(meta["totalPages"], 2);

    let body: Value = response.json();
    let rels: Vec<&str> = body["links"]
        .as_array()
        .unwrap()
        .iter()
        .map(|link| link["rel"].as_str().unwrap())
        .collect();
    assert_eq!(rels, ["self", "nextPage"]);

    let body: Value = server.get("/api/authors?pageSize=4&pageNumber=2").await.json();
    assert_eq!(body["values"].as_array().unwrap().len(), 2);
    let rels: Vec<&str> = body["links"]
        .as_array()
        .unwrap()
        .iter()
        .map(|link| link["rel"].as_str().unwrap())
        .collect();
    assert_eq!(rels, ["self", "previousPage"]);
}

#[tokio::test]
async fn test_list_authors_filters_by_genre() {
    let server = server();
    let response = server.get("/api/authors?genre=fantasy").await;

    let meta = pagination(&response);
    assert_eq!(meta["totalCount"], 1);

    let body: Value = response.json();
    assert_eq!(body["values"][0]["name"], "Ursula Le Guin");
}

// =============================================================================
// Single Author
// =============================================================================

#[tokio::test]
async fn test_get_author_not_found() {
    let server = server();
    let path = format!("/api/authors/{}", Uuid::new_v4());
    let response = server.get(&path).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(body["details"]["resource"], "author");
}

#[tokio::test]
async fn test_get_author_shapes_and_links() {
    let server = server();
    let id = author_id_by_search(&server, "orwell").await;

    let path = format!("/api/authors/{}?fields=name", id);
    let response = server.get(&path).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    let object = body.as_object().unwrap();
    assert_eq!(object["name"], "George Orwell");
    assert!(!object.contains_key("genre"));

    // The self link echoes the field restriction the resource was read with.
    let self_link = &body["links"][0];
    assert_eq!(self_link["rel"], "self");
    assert!(self_link["href"].as_str().unwrap().contains("fields=name"));

    let rels: Vec<&str> = body["links"]
        .as_array()
        .unwrap()
        .iter()
        .map(|link| link["rel"].as_str().unwrap())
        .collect();
    assert_eq!(rels, ["self", "delete_author", "create_book_for_author", "books"]);
}

#[tokio::test]
async fn test_create_author_returns_location() {
    let server = server();
    let response = server
        .post("/api/authors")
        .json(&json!({
            "firstName": "Frank",
            "lastName": "Herbert",
            "dateOfBirth": "1920-10-08T00:00:00Z",
            "genre": "Science Fiction"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let body: Value = response.json();
    assert_eq!(body["name"], "Frank Herbert");

    let location = response.header("location");
    let expected = format!("/api/authors/{}", body["id"].as_str().unwrap());
    assert_eq!(location.to_str().unwrap(), expected);
}

#[tokio::test]
async fn test_create_author_with_nested_books() {
    let server = server();
    let response = server
        .post("/api/authors")
        .json(&json!({
            "firstName": "Terry",
            "lastName": "Pratchett",
            "dateOfBirth": "1948-04-28T00:00:00Z",
            "genre": "Fantasy",
            "books": [
                { "title": "Mort" },
                { "title": "Small Gods", "description": "A tortoise and a prophet" }
            ]
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let body: Value = response.json();
    let path = format!("/api/authors/{}/books", body["id"].as_str().unwrap());
    let books: Value = server.get(&path).await.json();
    assert_eq!(books.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_create_author_validates_body() {
    let server = server();
    let response = server
        .post("/api/authors")
        .json(&json!({
            "firstName": "",
            "lastName": "Nameless",
            "dateOfBirth": "1950-01-01T00:00:00Z",
            "genre": "Unknown"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_post_to_author_uri_is_blocked() {
    let server = server();

    let existing = author_id_by_search(&server, "austen").await;
    let path = format!("/api/authors/{}", existing);
    let response = server.post(&path).await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);

    let path = format!("/api/authors/{}", Uuid::new_v4());
    let response = server.post(&path).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_author_cascades() {
    let server = server();
    let id = author_id_by_search(&server, "orwell").await;

    let path = format!("/api/authors/{}", id);
    let response = server.delete(&path).await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    assert_eq!(server.get(&path).await.status_code(), StatusCode::NOT_FOUND);
    let books_path = format!("/api/authors/{}/books", id);
    assert_eq!(server.get(&books_path).await.status_code(), StatusCode::NOT_FOUND);

    // Deleting again reports absence.
    assert_eq!(server.delete(&path).await.status_code(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Author Collections
// =============================================================================

#[tokio::test]
async fn test_author_collection_roundtrip() {
    let server = server();
    let response = server
        .post("/api/authorcollections")
        .json(&json!([
            {
                "firstName": "Octavia",
                "lastName": "Butler",
                "dateOfBirth": "1947-06-22T00:00:00Z",
                "genre": "Science Fiction"
            },
            {
                "firstName": "Shirley",
                "lastName": "Jackson",
                "dateOfBirth": "1916-12-14T00:00:00Z",
                "genre": "Gothic"
            }
        ]))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let created: Value = response.json();
    assert_eq!(created.as_array().unwrap().len(), 2);

    let location = response.header("location");
    let location = location.to_str().unwrap().to_string();
    assert!(location.starts_with("/api/authorcollections/"));
    assert!(location.contains(','));

    let fetched: Value = server.get(&location).await.json();
    let names: Vec<&str> = fetched
        .as_array()
        .unwrap()
        .iter()
        .map(|author| author["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Octavia Butler", "Shirley Jackson"]);
}

#[tokio::test]
async fn test_author_collection_rejects_empty_body() {
    let server = server();
    let response = server.post("/api/authorcollections").json(&json!([])).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_author_collection_rejects_malformed_ids() {
    let server = server();
    let response = server.get("/api/authorcollections/not-a-uuid").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_author_collection_missing_member_is_404() {
    let server = server();
    let existing = author_id_by_search(&server, "shelley").await;

    let path = format!("/api/authorcollections/{},{}", existing, Uuid::new_v4());
    let response = server.get(&path).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Books
// =============================================================================

async fn first_book(server: &TestServer, author_id: Uuid) -> Value {
    let path = format!("/api/authors/{}/books", author_id);
    let books: Value = server.get(&path).await.json();
    books[0].clone()
}

#[tokio::test]
async fn test_list_books_ordered_by_title() {
    let server = server();
    let id = author_id_by_search(&server, "orwell").await;

    let path = format!("/api/authors/{}/books", id);
    let books: Value = server.get(&path).await.json();

    let titles: Vec<&str> = books
        .as_array()
        .unwrap()
        .iter()
        .map(|book| book["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["1984", "Animal Farm"]);

    assert_eq!(books[0]["links"][0]["rel"], "self");
}

#[tokio::test]
async fn test_get_book_not_found() {
    let server = server();
    let id = author_id_by_search(&server, "orwell").await;

    let path = format!("/api/authors/{}/books/{}", id, Uuid::new_v4());
    let response = server.get(&path).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_book_returns_location_and_links() {
    let server = server();
    let id = author_id_by_search(&server, "christie").await;

    let path = format!("/api/authors/{}/books", id);
    let response = server
        .post(&path)
        .json(&json!({ "title": "The ABC Murders" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let body: Value = response.json();
    assert_eq!(body["title"], "The ABC Murders");
    assert_eq!(body["authorId"], id.to_string());

    let location = response.header("location");
    let expected = format!("/api/authors/{}/books/{}", id, body["id"].as_str().unwrap());
    assert_eq!(location.to_str().unwrap(), expected);

    let rels: Vec<&str> = body["links"]
        .as_array()
        .unwrap()
        .iter()
        .map(|link| link["rel"].as_str().unwrap())
        .collect();
    assert_eq!(rels, ["self", "delete_book", "update_book", "partially_update_book"]);
}

#[tokio::test]
async fn test_create_book_rejects_title_matching_description() {
    let server = server();
    let id = author_id_by_search(&server, "christie").await;

    let path = format!("/api/authors/{}/books", id);
    let response = server
        .post(&path)
        .json(&json!({ "title": "Endless Night", "description": "Endless Night" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_create_book_for_missing_author_is_404() {
    let server = server();
    let path = format!("/api/authors/{}/books", Uuid::new_v4());
    let response = server.post(&path).json(&json!({ "title": "Orphaned" })).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_put_replaces_existing_book() {
    let server = server();
    let author_id = author_id_by_search(&server, "orwell").await;
    let book = first_book(&server, author_id).await;

    let path = format!("/api/authors/{}/books/{}", author_id, book["id"].as_str().unwrap());
    let response = server
        .put(&path)
        .json(&json!({ "title": "1984", "description": "Big Brother is watching" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let stored: Value = server.get(&path).await.json();
    assert_eq!(stored["description"], "Big Brother is watching");
}

#[tokio::test]
async fn test_put_upserts_unknown_book() {
    let server = server();
    let author_id = author_id_by_search(&server, "orwell").await;
    let book_id = Uuid::new_v4();

    let path = format!("/api/authors/{}/books/{}", author_id, book_id);
    let response = server
        .put(&path)
        .json(&json!({ "title": "Coming Up for Air", "description": "George Bowling goes home" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    // The client-supplied ID is honored.
    let body: Value = response.json();
    assert_eq!(body["id"], book_id.to_string());
    assert_eq!(server.get(&path).await.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_patch_merges_over_stored_book() {
    let server = server();
    let author_id = author_id_by_search(&server, "shelley").await;
    let book = first_book(&server, author_id).await;

    let path = format!("/api/authors/{}/books/{}", author_id, book["id"].as_str().unwrap());
    let response = server
        .patch(&path)
        .json(&json!({ "description": "The modern Prometheus" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let stored: Value = server.get(&path).await.json();
    assert_eq!(stored["title"], "Frankenstein");
    assert_eq!(stored["description"], "The modern Prometheus");
}

#[tokio::test]
async fn test_patch_upserts_unknown_book() {
    let server = server();
    let author_id = author_id_by_search(&server, "shelley").await;
    let book_id = Uuid::new_v4();

    let path = format!("/api/authors/{}/books/{}", author_id, book_id);
    let response = server
        .patch(&path)
        .json(&json!({ "title": "The Last Man", "description": "A plague novel" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    // A partial upsert cannot satisfy the full update rules.
    let response = server
        .patch(&format!("/api/authors/{}/books/{}", author_id, Uuid::new_v4()))
        .json(&json!({ "description": "No title given" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_delete_book() {
    let server = server();
    let author_id = author_id_by_search(&server, "asimov").await;
    let book = first_book(&server, author_id).await;

    let path = format!("/api/authors/{}/books/{}", author_id, book["id"].as_str().unwrap());
    assert_eq!(server.delete(&path).await.status_code(), StatusCode::NO_CONTENT);
    assert_eq!(server.delete(&path).await.status_code(), StatusCode::NOT_FOUND);
}
