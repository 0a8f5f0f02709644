use serde_json::{Value, json};

use crate::helpers::{TestApp, error_message};

#[tokio::test]
async fn login_before_confirmation_is_rejected() {
    let app = TestApp::new().await;
    app.register("ada@example.com", "analytical-engine").await;

    let response = app
        .post_login(&json!({ "email": "ada@example.com", "password": "analytical-engine" }))
        .await;

    assert_eq!(response.status().as_u16(), 401);
    assert_eq!(error_message(response).await, "account not enabled");
}

#[tokio::test]
async fn login_after_confirmation_returns_user_details() {
    let app = TestApp::new().await;
    let token = app.register("ada@example.com", "analytical-engine").await;
    app.get_confirm(&token).await;

    let response = app
        .post_login(&json!({ "email": "ADA@example.com", "password": "analytical-engine" }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["email"], "ada@example.com");
    assert_eq!(body["authorities"], json!(["USER"]));
    assert_eq!(body["enabled"], true);
    assert_eq!(body["accountNonLocked"], true);
}

#[tokio::test]
async fn login_with_wrong_password_is_rejected() {
    let app = TestApp::new().await;
    let token = app.register("ada@example.com", "analytical-engine").await;
    app.get_confirm(&token).await;

    let response = app
        .post_login(&json!({ "email": "ada@example.com", "password": "difference-engine" }))
        .await;

    assert_eq!(response.status().as_u16(), 401);
    assert_eq!(error_message(response).await, "bad credentials");
}

#[tokio::test]
async fn login_for_unknown_user_looks_like_bad_credentials() {
    let app = TestApp::new().await;

    let response = app
        .post_login(&json!({ "email": "nobody@example.com", "password": "whatever" }))
        .await;

    assert_eq!(response.status().as_u16(), 401);
    let message = error_message(response).await;
    assert_eq!(message, "bad credentials");
    assert!(!message.contains("nobody@example.com"));
}
