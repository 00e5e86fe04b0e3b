//! User API integration tests
//!
//! Signup, email confirmation and login.

use axum::body::Bytes;
use axum::http::StatusCode;
use bookshelf::backend::auth::users::UserStore;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{seed_users, TestApp, SEED_PASSWORD, UNVERIFIED_EMAIL, VERIFIED_EMAIL};

async fn seeded_app() -> TestApp {
    let app = TestApp::new().await;
    seed_users(&app.state).await;
    app
}

#[tokio::test]
async fn test_create_user() {
    let app = seeded_app().await;

    let response = app
        .server
        .post("/api/users/")
        .json(&json!({
            "username": "nicoCaos",
            "password": "1234567891011",
            "email": "andresortizchemist@gmail.com"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["code"], "success");
    assert_eq!(body["username"], "nicoCaos");
    assert_eq!(body["email"], "andresortizchemist@gmail.com");
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_create_user_sends_confirmation_link() {
    let app = TestApp::new().await;

    app.server
        .post("/api/users")
        .json(&json!({"username": "reader", "password": "pw", "email": "reader@example.com"}))
        .await
        .assert_status(StatusCode::CREATED);

    let sent = app.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "reader@example.com");
    assert!(sent[0].body.contains("http://localhost:5000/api/users/confirm/"));

    // The mailed link confirms the account.
    let link = sent[0]
        .body
        .lines()
        .find(|line| line.starts_with("http://"))
        .expect("link in mail body");
    let path = link.trim_start_matches("http://localhost:5000");
    let response = app.server.get(path).await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_create_user_without_username() {
    let app = seeded_app().await;

    let response = app
        .server
        .post("/api/users/")
        .json(&json!({"password": "helloworld", "email": "testemail@gmail.com"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["code"], "invalidInput");
    assert!(app.mailer.sent().is_empty());
    assert!(app
        .state
        .users
        .find_by_email("testemail@gmail.com")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_create_user_malformed_json() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/users")
        .bytes(Bytes::from_static(b"{not json"))
        .content_type("application/json")
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.json::<Value>()["code"], "invalidInput");
}

#[tokio::test]
async fn test_create_user_duplicate_email() {
    let app = seeded_app().await;

    let response = app
        .server
        .post("/api/users")
        .json(&json!({"username": "someoneElse", "password": "pw", "email": VERIFIED_EMAIL}))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["code"], "conflict");
}

#[tokio::test]
async fn test_create_user_when_mail_fails() {
    let (server, state) = TestApp::with_failing_mailer().await;

    let response = server
        .post("/api/users")
        .json(&json!({"username": "reader", "password": "pw", "email": "reader@example.com"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let stored = state.users.find_by_email("reader@example.com").await.unwrap();
    assert!(stored.is_some_and(|user| !user.verified));
}

#[tokio::test]
async fn test_login_user() {
    let app = seeded_app().await;

    let response = app
        .server
        .post("/api/users/login")
        .json(&json!({"email": VERIFIED_EMAIL, "password": SEED_PASSWORD}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["code"], "success");
    let token = body["access_token"].as_str().expect("access_token");
    let claims = app.state.tokens.validate_access_token(token).unwrap();
    assert_eq!(claims.sub, VERIFIED_EMAIL);
}

#[tokio::test]
async fn test_login_with_username() {
    let app = seeded_app().await;

    let response = app
        .server
        .post("/api/users/login")
        .json(&json!({"username": "DArchemist3", "password": SEED_PASSWORD}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.json::<Value>()["access_token"].is_string());
}

#[tokio::test]
async fn test_login_user_wrong_credentials() {
    let app = seeded_app().await;

    let wrong_password = app
        .server
        .post("/api/users/login")
        .json(&json!({"email": VERIFIED_EMAIL, "password": "helloworld12"}))
        .await;
    let unknown_email = app
        .server
        .post("/api/users/login")
        .json(&json!({"email": "nobody@example.com", "password": SEED_PASSWORD}))
        .await;

    assert_eq!(wrong_password.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.json::<Value>(), unknown_email.json::<Value>());
}

#[tokio::test]
async fn test_login_unverified_user() {
    let app = seeded_app().await;

    let response = app
        .server
        .post("/api/users/login")
        .json(&json!({"email": UNVERIFIED_EMAIL, "password": SEED_PASSWORD}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], "notVerified");
}

#[tokio::test]
async fn test_login_missing_password() {
    let app = seeded_app().await;

    let response = app
        .server
        .post("/api/users/login")
        .json(&json!({"email": VERIFIED_EMAIL}))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_confirm_email() {
    let app = seeded_app().await;
    let token = app.state.tokens.generate_verification_token(UNVERIFIED_EMAIL);

    let response = app.server.get(&format!("/api/users/confirm/{}", token)).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["code"], "success");

    // Now the account can log in.
    app.server
        .post("/api/users/login")
        .json(&json!({"email": UNVERIFIED_EMAIL, "password": SEED_PASSWORD}))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_confirm_email_twice() {
    let app = seeded_app().await;
    let token = app.state.tokens.generate_verification_token(UNVERIFIED_EMAIL);
    let path = format!("/api/users/confirm/{}", token);

    app.server.get(&path).await.assert_status_ok();
    let second = app.server.get(&path).await;

    assert_eq!(second.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(second.json::<Value>()["code"], "alreadyVerified");
}

#[tokio::test]
async fn test_confirm_email_for_verified_user() {
    let app = seeded_app().await;
    let token = app.state.tokens.generate_verification_token(VERIFIED_EMAIL);

    let response = app.server.get(&format!("/api/users/confirm/{}", token)).await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_confirm_email_with_incorrect_email() {
    let app = seeded_app().await;
    let token = app.state.tokens.generate_verification_token("darleyortizsz@hotmail.com");

    let response = app.server.get(&format!("/api/users/confirm/{}", token)).await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_confirm_email_with_tampered_token() {
    let app = seeded_app().await;
    let token = app.state.tokens.generate_verification_token(UNVERIFIED_EMAIL);
    let (payload, signature) = token.split_once('.').unwrap();
    let tampered = format!("{}.{}x", payload, signature);

    let response = app.server.get(&format!("/api/users/confirm/{}", tampered)).await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.json::<Value>()["code"], "invalidToken");
}
