//! Authentication API integration tests
//!
//! Tests for register, login, refresh, me and admin.

use axum::http::StatusCode;
use brainbridge::backend::auth::{TokenPair, TokenType, UserResponse};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{create_test_server, create_test_user, test_state};

fn registration(username: &str, email: &str) -> Value {
    json!({
        "username": username,
        "email": email,
        "password": "password123",
        "display_name": "Test User"
    })
}

#[tokio::test]
async fn test_register_success() {
    let server = create_test_server(test_state());

    let response = server
        .post("/auth/register")
        .json(&registration("alice", "alice@example.com"))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["username"], "alice");
    assert_eq!(body["email"], "alice@example.com");
    assert_eq!(body["is_admin"], false);
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email_and_username() {
    let server = create_test_server(test_state());
    server
        .post("/auth/register")
        .json(&registration("alice", "alice@example.com"))
        .await;

    let response = server
        .post("/auth/register")
        .json(&registration("other", "alice@example.com"))
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["error"], "Email already taken");

    let response = server
        .post("/auth/register")
        .json(&registration("alice", "other@example.com"))
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["error"], "Username already taken");
}

#[tokio::test]
async fn test_register_validation() {
    let server = create_test_server(test_state());

    let response = server
        .post("/auth/register")
        .json(&json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": "short",
            "display_name": "Alice"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_then_login() {
    let state = test_state();
    let server = create_test_server(state.clone());
    server
        .post("/auth/register")
        .json(&registration("alice", "alice@example.com"))
        .await;

    let response = server
        .post("/auth/login")
        .json(&json!({"email": "alice@example.com", "password": "password123"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let pair: TokenPair = response.json();
    let access = state.tokens.verify(&pair.access_token).unwrap();
    assert_eq!(access.token_type, TokenType::Access);
    assert_eq!(access.sub.as_deref(), Some("alice@example.com"));
    assert_eq!(state.tokens.verify(&pair.refresh_token).unwrap().token_type, TokenType::Refresh);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let state = test_state();
    let alice = create_test_user(&state, "alice", "alice@example.com", false).await;
    let server = create_test_server(state);

    let response = server
        .post("/auth/login")
        .json(&json!({"email": "alice@example.com", "password": alice.password}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = server
        .post("/auth/login")
        .json(&json!({"email": "alice@example.com", "password": "wrong-password"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["error"], "Incorrect email or password");
}

#[tokio::test]
async fn test_login_unknown_email() {
    let server = create_test_server(test_state());

    let response = server
        .post("/auth/login")
        .json(&json!({"email": "nobody@example.com", "password": "password123"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["error"], "Incorrect email or password");
}

#[tokio::test]
async fn test_me_with_valid_token() {
    let state = test_state();
    let alice = create_test_user(&state, "alice", "alice@example.com", false).await;
    let server = create_test_server(state);

    let response = server
        .get("/auth/me")
        .authorization_bearer(&alice.access_token)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: UserResponse = response.json();
    assert_eq!(body, UserResponse::from(&alice.user));
}

#[tokio::test]
async fn test_me_without_token() {
    let server = create_test_server(test_state());

    let response = server.get("/auth/me").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.header("www-authenticate"), "Bearer");
    assert_eq!(response.json::<Value>()["error"], "Could not validate credentials");
}

#[tokio::test]
async fn test_me_with_refresh_token() {
    let state = test_state();
    let alice = create_test_user(&state, "alice", "alice@example.com", false).await;
    let server = create_test_server(state);

    let response = server
        .get("/auth/me")
        .authorization_bearer(&alice.refresh_token)
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_for_deleted_subject_matches_invalid_token() {
    let state = test_state();
    let ghost_token = state.tokens.issue_access("ghost@example.com").unwrap();
    let server = create_test_server(state);

    let missing_user = server.get("/auth/me").authorization_bearer(&ghost_token).await;
    let garbage = server.get("/auth/me").authorization_bearer("not.a.token").await;

    assert_eq!(missing_user.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(garbage.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(missing_user.json::<Value>(), garbage.json::<Value>());
}

#[tokio::test]
async fn test_admin_flag() {
    let state = test_state();
    let admin = create_test_user(&state, "root", "root@example.com", true).await;
    let regular = create_test_user(&state, "alice", "alice@example.com", false).await;
    let server = create_test_server(state);

    let response = server.get("/auth/admin").authorization_bearer(&admin.access_token).await;
    assert_eq!(response.json::<Value>(), json!({"ok": true}));

    let response = server.get("/auth/admin").authorization_bearer(&regular.access_token).await;
    assert_eq!(response.json::<Value>(), json!({"ok": false}));

    let response = server.get("/auth/admin").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_accepts_client_admin_flag() {
    let server = create_test_server(test_state());

    let mut body = registration("root", "root@example.com");
    body["is_admin"] = json!(true);
    let response = server.post("/auth/register").json(&body).await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["is_admin"], true);

    let pair: TokenPair = server
        .post("/auth/login")
        .json(&json!({"email": "root@example.com", "password": "password123"}))
        .await
        .json();
    let response = server.get("/auth/admin").authorization_bearer(&pair.access_token).await;
    assert_eq!(response.json::<Value>(), json!({"ok": true}));
}

#[tokio::test]
async fn test_refresh_flow() {
    let state = test_state();
    let alice = create_test_user(&state, "alice", "alice@example.com", false).await;
    let server = create_test_server(state.clone());

    let response = server
        .post("/auth/refresh")
        .json(&json!({"refresh_token": alice.refresh_token}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let pair: TokenPair = response.json();

    let me = server.get("/auth/me").authorization_bearer(&pair.access_token).await;
    assert_eq!(me.status_code(), StatusCode::OK);

    let response = server
        .post("/auth/refresh")
        .json(&json!({"refresh_token": alice.access_token}))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health() {
    let server = create_test_server(test_state());

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["name"], "brainbridge");
}
