//! Book API integration tests

use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::{auth_header, generate_test_token, TestApp, VERIFIED_EMAIL};

/// App with one author; returns the app, a token and the author id
async fn app_with_author() -> (TestApp, String, i64) {
    let app = TestApp::new().await;
    let token = generate_test_token(&app.state, VERIFIED_EMAIL);
    let (name, value) = auth_header(&token);
    let response = app
        .server
        .post("/api/authors")
        .add_header(name, value)
        .json(&json!({"first_name": "Jane", "last_name": "Austen"}))
        .await;
    let author_id = response.json::<Value>()["author"]["id"].as_i64().unwrap();
    (app, token, author_id)
}

async fn create_book(app: &TestApp, token: &str, body: Value) -> axum_test::TestResponse {
    let (name, value) = auth_header(token);
    app.server.post("/api/books/").add_header(name, value).json(&body).await
}

#[tokio::test]
async fn test_create_and_get_book() {
    let (app, token, author_id) = app_with_author().await;

    let response = create_book(&app, &token, json!({"title": "Emma", "year": 1815, "author_id": author_id})).await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let id = response.json::<Value>()["book"]["id"].as_i64().unwrap();

    let fetched = app.server.get(&format!("/api/books/{}", id)).await;
    assert_eq!(fetched.status_code(), StatusCode::OK);
    assert_eq!(fetched.json::<Value>()["book"]["title"], "Emma");

    let listed = app.server.get("/api/books").await.json::<Value>();
    assert_eq!(listed["books"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_book_for_unknown_author() {
    let (app, token, _) = app_with_author().await;

    let response = create_book(&app, &token, json!({"title": "Orphan", "year": 2000, "author_id": 999})).await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_create_book_missing_year() {
    let (app, token, author_id) = app_with_author().await;

    let response = create_book(&app, &token, json!({"title": "Emma", "author_id": author_id})).await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_create_book_without_token() {
    let (app, _, author_id) = app_with_author().await;

    let response = app
        .server
        .post("/api/books")
        .json(&json!({"title": "Emma", "year": 1815, "author_id": author_id}))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_book() {
    let (app, token, author_id) = app_with_author().await;
    let id = create_book(&app, &token, json!({"title": "Emma", "year": 1815, "author_id": author_id}))
        .await
        .json::<Value>()["book"]["id"]
        .as_i64()
        .unwrap();
    let path = format!("/api/books/{}", id);

    let (name, value) = auth_header(&token);
    let replaced = app
        .server
        .put(&path)
        .add_header(name, value)
        .json(&json!({"title": "Persuasion", "year": 1817}))
        .await;
    assert_eq!(replaced.status_code(), StatusCode::OK);
    assert_eq!(replaced.json::<Value>()["book"]["title"], "Persuasion");

    let (name, value) = auth_header(&token);
    let incomplete = app
        .server
        .put(&path)
        .add_header(name, value)
        .json(&json!({"title": "Persuasion"}))
        .await;
    assert_eq!(incomplete.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

    let (name, value) = auth_header(&token);
    let patched = app
        .server
        .patch(&path)
        .add_header(name, value)
        .json(&json!({"year": 1818}))
        .await;
    assert_eq!(patched.status_code(), StatusCode::OK);
    let book = &patched.json::<Value>()["book"];
    assert_eq!(book["title"], "Persuasion");
    assert_eq!(book["year"], 1818);
}

#[tokio::test]
async fn test_delete_book() {
    let (app, token, author_id) = app_with_author().await;
    let id = create_book(&app, &token, json!({"title": "Emma", "year": 1815, "author_id": author_id}))
        .await
        .json::<Value>()["book"]["id"]
        .as_i64()
        .unwrap();

    let (name, value) = auth_header(&token);
    let deleted = app.server.delete(&format!("/api/books/{}", id)).add_header(name, value).await;
    assert_eq!(deleted.status_code(), StatusCode::NO_CONTENT);

    let missing = app.server.get(&format!("/api/books/{}", id)).await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleting_author_deletes_books() {
    let (app, token, author_id) = app_with_author().await;
    let id = create_book(&app, &token, json!({"title": "Emma", "year": 1815, "author_id": author_id}))
        .await
        .json::<Value>()["book"]["id"]
        .as_i64()
        .unwrap();

    let (name, value) = auth_header(&token);
    app.server
        .delete(&format!("/api/authors/{}", author_id))
        .add_header(name, value)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    assert_eq!(
        app.server.get(&format!("/api/books/{}", id)).await.status_code(),
        StatusCode::NOT_FOUND
    );
}
