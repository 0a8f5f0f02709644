use enrol_core::Email;
use serde_json::json;

use crate::helpers::{TestApp, error_message, registration_body};

#[tokio::test]
async fn register_returns_201_and_a_token() {
    let app = TestApp::new().await;

    let token = app.register("ada@example.com", "analytical-engine").await;

    assert!(uuid::Uuid::parse_str(&token).is_ok());
}

#[tokio::test]
async fn register_mails_the_confirmation_link() {
    let app = TestApp::new().await;

    let token = app.register("Ada@Example.com", "analytical-engine").await;

    let sent = app.email_client.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipient, Email::new("ada@example.com"));
    let link = format!("/confirm?token={token}");
    assert!(sent[0].message.html_body.contains(&link));
    assert!(sent[0].message.text_body.contains(&link));
    assert!(sent[0].message.text_body.contains("Hi Ada,"));
}

#[tokio::test]
async fn register_rejects_malformed_email() {
    let app = TestApp::new().await;

    let response = app
        .post_registration(&registration_body("not-an-email", "analytical-engine"))
        .await;

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(error_message(response).await, "email not valid");
    assert!(app.email_client.sent().await.is_empty());
}

#[tokio::test]
async fn register_rejects_taken_email() {
    let app = TestApp::new().await;
    app.register("ada@example.com", "analytical-engine").await;

    let response = app
        .post_registration(&registration_body("ADA@example.com", "difference-engine"))
        .await;

    assert_eq!(response.status().as_u16(), 409);
    assert_eq!(error_message(response).await, "email already taken");
}

#[tokio::test]
async fn register_returns_422_for_missing_fields() {
    let app = TestApp::new().await;

    let response = app
        .post_registration(&json!({ "email": "ada@example.com" }))
        .await;

    assert_eq!(response.status().as_u16(), 422);
}

#[tokio::test]
async fn confirm_enables_the_account() {
    let app = TestApp::new().await;
    let token = app.register("ada@example.com", "analytical-engine").await;

    let response = app.get_confirm(&token).await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.text().await.unwrap(), "confirmed");
}

#[tokio::test]
async fn confirm_twice_is_rejected() {
    let app = TestApp::new().await;
    let token = app.register("ada@example.com", "analytical-engine").await;
    assert_eq!(app.get_confirm(&token).await.status().as_u16(), 200);

    let response = app.get_confirm(&token).await;

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(error_message(response).await, "email already confirmed");
}

#[tokio::test]
async fn confirm_unknown_token_is_not_found() {
    let app = TestApp::new().await;

    let response = app.get_confirm("does-not-exist").await;

    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(error_message(response).await, "token not found");
}

#[tokio::test]
async fn confirm_without_token_is_bad_request() {
    let app = TestApp::new().await;

    let response = app
        .http_client
        .get(format!("{}/api/v1/registration/confirm", &app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
}
