use enrol_core::{Email, EmailClient, EmailMessage};
use reqwest::{Client, StatusCode, Url};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const EMAIL_ENDPOINT: &str = "/email";
const MESSAGE_STREAM: &str = "outbound";
const POSTMARK_AUTH_HEADER: &str = "X-Postmark-Server-Token";

#[derive(Debug, Error)]
enum PostmarkError {
    #[error("invalid Postmark base url: {0}")]
    InvalidBaseUrl(String),
    #[error("request to Postmark failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Postmark rejected the message ({status}): {message}")]
    Rejected { status: StatusCode, message: String },
}

/// Body of `POST /email`; field names follow Postmark's PascalCase API.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html_body: &'a str,
    text_body: &'a str,
    message_stream: &'a str,
}

/// Error payload Postmark returns alongside 4xx/5xx statuses.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PostmarkErrorBody {
    error_code: i64,
    message: String,
}

/// Delivers email through Postmark's HTTP API.
#[derive(Clone)]
pub struct PostmarkEmailClient {
    http_client: Client,
    base_url: String,
    sender: Email,
    server_token: Secret<String>,
}

impl PostmarkEmailClient {
    pub fn new(
        base_url: String,
        sender: Email,
        server_token: Secret<String>,
        http_client: Client,
    ) -> Self {
        Self {
            http_client,
            base_url,
            sender,
            server_token,
        }
    }

    fn endpoint(&self) -> Result<Url, PostmarkError> {
        Url::parse(&self.base_url)
            .and_then(|base| base.join(EMAIL_ENDPOINT))
            .map_err(|e| PostmarkError::InvalidBaseUrl(e.to_string()))
    }

    async fn deliver(&self, recipient: &Email, message: &EmailMessage) -> Result<(), PostmarkError> {
        let body = SendEmailRequest {
            from: self.sender.as_str(),
            to: recipient.as_str(),
            subject: &message.subject,
            html_body: &message.html_body,
            text_body: &message.text_body,
            message_stream: MESSAGE_STREAM,
        };

        let response = self
            .http_client
            .post(self.endpoint()?)
            .header(POSTMARK_AUTH_HEADER, self.server_token.expose_secret())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let message = match response.json::<PostmarkErrorBody>().await {
            Ok(error) => format!("error code {}: {}", error.error_code, error.message),
            Err(_) => "no error details".to_string(),
        };
        Err(PostmarkError::Rejected { status, message })
    }
}

#[async_trait::async_trait]
impl EmailClient for PostmarkEmailClient {
    #[tracing::instrument(name = "Sending email via Postmark", skip_all)]
    async fn send_email(&self, recipient: &Email, message: &EmailMessage) -> Result<(), String> {
        self.deliver(recipient, message)
            .await
            .map_err(|e| e.to_string())
    }
}
