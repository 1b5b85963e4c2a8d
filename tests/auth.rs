mod common;

use axum::http::StatusCode;
use bookreel::entities::user;
use common::TestApp;
use sea_orm::EntityTrait;
use serde_json::json;

#[tokio::test]
async fn signup_then_login() {
    let app = TestApp::empty().await;
    let (status, body) =
        app.post_json("/signup", json!({ "username": "alice", "password": "s3cret" })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User created");

    let (status, body) =
        app.post_json("/login", json!({ "username": "alice", "password": "s3cret" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "alice");
}

#[tokio::test]
async fn wrong_password_and_unknown_user_are_unauthorized() {
    let app = TestApp::empty().await;
    app.post_json("/signup", json!({ "username": "alice", "password": "s3cret" })).await;

    let (status, body) =
        app.post_json("/login", json!({ "username": "alice", "password": "nope" })).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    let (status, _) =
        app.post_json("/login", json!({ "username": "bob", "password": "s3cret" })).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn duplicate_username_conflicts() {
    let app = TestApp::empty().await;
    let creds = json!({ "username": "alice", "password": "one" });
    let (status, _) = app.post_json("/signup", creds.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = app.post_json("/signup", creds).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "username already exists");
}

#[tokio::test]
async fn blank_credentials_are_rejected() {
    let app = TestApp::empty().await;
    let (status, _) = app.post_json("/signup", json!({ "username": "  ", "password": "x" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = app.post_json("/signup", json!({ "username": "carol", "password": "" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn incomplete_bodies_are_json_errors() {
    let app = TestApp::empty().await;
    let (status, body) = app.post_json("/signup", json!({ "username": "x" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("password"));

    let (status, body) = app.post_json("/login", json!("not an object")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn passwords_are_stored_hashed() {
    let app = TestApp::empty().await;
    app.post_json("/signup", json!({ "username": "alice", "password": "s3cret" })).await;
    let users = user::Entity::find().all(&app.state.db).await.unwrap();
    assert_eq!(users.len(), 1);
    assert_ne!(users[0].password_hash, "s3cret");
    assert!(!users[0].password_hash.contains("s3cret"));
}

#[tokio::test]
async fn health_check() {
    let app = TestApp::empty().await;
    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
