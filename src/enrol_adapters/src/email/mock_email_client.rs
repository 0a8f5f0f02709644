use std::sync::Arc;

use enrol_core::{Email, EmailClient, EmailMessage};
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq)]
pub struct SentEmail {
    pub recipient: Email,
    pub message: EmailMessage,
}

/// Email client that keeps every message in memory instead of delivering it.
#[derive(Debug, Clone, Default)]
pub struct MockEmailClient {
    sent: Arc<RwLock<Vec<SentEmail>>>,
}

impl MockEmailClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<SentEmail> {
        self.sent.read().await.clone()
    }
}

#[async_trait::async_trait]
impl EmailClient for MockEmailClient {
    #[tracing::instrument(name = "Recording email", skip_all)]
    async fn send_email(&self, recipient: &Email, message: &EmailMessage) -> Result<(), String> {
        self.sent.write().await.push(SentEmail {
            recipient: recipient.clone(),
            message: message.clone(),
        });
        Ok(())
    }
}
