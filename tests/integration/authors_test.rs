//! Author API integration tests

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use serde_json::{json, Value};

use crate::common::{auth_header, generate_test_token, TestApp, VERIFIED_EMAIL};

async fn create_author(app: &TestApp, token: &str, body: Value) -> Value {
    let (name, value) = auth_header(token);
    let response = app.server.post("/api/authors/").add_header(name, value).json(&body).await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json::<Value>()
}

#[tokio::test]
async fn test_create_author() {
    let app = TestApp::new().await;
    let token = generate_test_token(&app.state, VERIFIED_EMAIL);

    let body = create_author(&app, &token, json!({"first_name": "Johny", "last_name": "Doee"})).await;

    assert_eq!(body["code"], "success");
    assert_eq!(body["author"]["first_name"], "Johny");
    assert_eq!(body["author"]["books"], json!([]));
}

#[tokio::test]
async fn test_create_author_with_books() {
    let app = TestApp::new().await;
    let token = generate_test_token(&app.state, VERIFIED_EMAIL);

    let body = create_author(
        &app,
        &token,
        json!({
            "first_name": "Frank",
            "last_name": "Herbert",
            "books": [{"title": "Dune", "year": 1965}, {"title": "Dune Messiah", "year": 1969}]
        }),
    )
    .await;

    let id = body["author"]["id"].as_i64().unwrap();
    let detail = app.server.get(&format!("/api/authors/{}", id)).await.json::<Value>();
    assert_eq!(detail["author"]["books"].as_array().unwrap().len(), 2);
    assert_eq!(detail["author"]["books"][0]["title"], "Dune");
}

#[tokio::test]
async fn test_create_author_without_token() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/authors/")
        .json(&json!({"first_name": "Johny", "last_name": "Doee"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["code"], "notAuthorized");
}

#[tokio::test]
async fn test_create_author_with_forged_token() {
    let app = TestApp::new().await;
    let forged = bookshelf::backend::auth::TokenService::from_secrets(
        "dragvulcano",
        "dragvulcano",
        "some-other-secret",
        std::time::Duration::from_secs(900),
    )
    .issue_access_token(VERIFIED_EMAIL, None)
    .unwrap();
    let (name, value) = auth_header(&forged);

    let response = app
        .server
        .post("/api/authors")
        .add_header(name, value)
        .json(&json!({"first_name": "Johny", "last_name": "Doee"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_author_missing_name() {
    let app = TestApp::new().await;
    let (name, value) = auth_header(&generate_test_token(&app.state, VERIFIED_EMAIL));

    let response = app
        .server
        .post("/api/authors")
        .add_header(name, value)
        .json(&json!({"first_name": "Johny"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.json::<Value>()["code"], "invalidInput");
}

#[tokio::test]
async fn test_list_authors() {
    let app = TestApp::new().await;
    let token = generate_test_token(&app.state, VERIFIED_EMAIL);
    create_author(&app, &token, json!({"first_name": "John", "last_name": "Doe"})).await;
    create_author(&app, &token, json!({"first_name": "Jane", "last_name": "Doe"})).await;

    let body = app.server.get("/api/authors/").await.json::<Value>();

    let authors = body["authors"].as_array().unwrap();
    assert_eq!(authors.len(), 2);
    assert_eq!(authors[1]["first_name"], "Jane");
    assert!(authors[0].get("books").is_none());
}

#[tokio::test]
async fn test_get_unknown_author() {
    let app = TestApp::new().await;

    let response = app.server.get("/api/authors/999").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["code"], "notFound");
}

#[tokio::test]
async fn test_update_and_delete_author() {
    let app = TestApp::new().await;
    let token = generate_test_token(&app.state, VERIFIED_EMAIL);
    let id = create_author(&app, &token, json!({"first_name": "John", "last_name": "Doe"})).await["author"]["id"]
        .as_i64()
        .unwrap();
    let path = format!("/api/authors/{}", id);

    let (name, value) = auth_header(&token);
    let updated = app
        .server
        .patch(&path)
        .add_header(name, value)
        .json(&json!({"last_name": "Smith"}))
        .await;
    assert_eq!(updated.status_code(), StatusCode::OK);
    assert_eq!(updated.json::<Value>()["author"]["last_name"], "Smith");
    assert_eq!(updated.json::<Value>()["author"]["first_name"], "John");

    let (name, value) = auth_header(&token);
    let deleted = app.server.delete(&path).add_header(name, value).await;
    assert_eq!(deleted.status_code(), StatusCode::NO_CONTENT);

    assert_eq!(app.server.get(&path).await.status_code(), StatusCode::NOT_FOUND);

    let (name, value) = auth_header(&token);
    let again = app.server.delete(&path).add_header(name, value).await;
    assert_eq!(again.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_upload_avatar() {
    let app = TestApp::new().await;
    let token = generate_test_token(&app.state, VERIFIED_EMAIL);
    let id = create_author(&app, &token, json!({"first_name": "John", "last_name": "Doe"})).await["author"]["id"]
        .as_i64()
        .unwrap();

    let image = b"\x89PNG\r\n\x1a\nnot really a png".to_vec();
    let form = MultipartForm::new().add_part(
        "avatar",
        Part::bytes(image.clone()).file_name("my cat.png").mime_type("image/png"),
    );
    let (name, value) = auth_header(&token);
    let response = app
        .server
        .post(&format!("/api/authors/avatar/{}", id))
        .add_header(name, value)
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let avatar = response.json::<Value>()["author"]["avatar"].as_str().unwrap().to_string();
    assert!(avatar.starts_with("http://localhost:5000/avatar/"));
    assert!(avatar.ends_with("_my_cat.png"));

    let filename = avatar.rsplit('/').next().unwrap();
    assert!(app.upload_dir.path().join(filename).exists());

    let served = app.server.get(&format!("/avatar/{}", filename)).await;
    assert_eq!(served.status_code(), StatusCode::OK);
    assert_eq!(served.as_bytes().to_vec(), image);
}

#[tokio::test]
async fn test_upload_avatar_rejects_other_types() {
    let app = TestApp::new().await;
    let token = generate_test_token(&app.state, VERIFIED_EMAIL);
    let id = create_author(&app, &token, json!({"first_name": "John", "last_name": "Doe"})).await["author"]["id"]
        .as_i64()
        .unwrap();

    let form = MultipartForm::new().add_part(
        "avatar",
        Part::bytes(b"GIF89a".to_vec()).file_name("cat.gif").mime_type("image/gif"),
    );
    let (name, value) = auth_header(&token);
    let response = app
        .server
        .post(&format!("/api/authors/avatar/{}", id))
        .add_header(name, value)
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_upload_avatar_unknown_author() {
    let app = TestApp::new().await;
    let token = generate_test_token(&app.state, VERIFIED_EMAIL);

    let form = MultipartForm::new().add_part(
        "avatar",
        Part::bytes(b"jpeg bytes".to_vec()).file_name("a.jpg").mime_type("image/jpeg"),
    );
    let (name, value) = auth_header(&token);
    let response = app
        .server
        .post("/api/authors/avatar/42")
        .add_header(name, value)
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
