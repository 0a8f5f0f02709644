use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use enrol_core::{ConfirmationToken, ConfirmationTokenStore, ConfirmationTokenStoreError};
use tokio::sync::RwLock;

#[derive(Default, Clone)]
pub struct HashMapConfirmationTokenStore {
    tokens: Arc<RwLock<HashMap<String, ConfirmationToken>>>,
}

impl HashMapConfirmationTokenStore {
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait::async_trait]
impl ConfirmationTokenStore for HashMapConfirmationTokenStore {
    async fn save(&self, token: ConfirmationToken) -> Result<(), ConfirmationTokenStoreError> {
        let mut tokens = self.tokens.write().await;
        if tokens.contains_key(&token.token) {
            return Err(ConfirmationTokenStoreError::DuplicateToken);
        }
        tokens.insert(token.token.clone(), token);
        Ok(())
    }

    async fn find_by_token(
        &self,
        token: &str,
    ) -> Result<Option<ConfirmationToken>, ConfirmationTokenStoreError> {
        Ok(self.tokens.read().await.get(token).cloned())
    }

    async fn update_confirmed_at(
        &self,
        token: &str,
        confirmed_at: DateTime<Utc>,
    ) -> Result<u64, ConfirmationTokenStoreError> {
        let mut tokens = self.tokens.write().await;
        let Some(stored) = tokens.get_mut(token) else {
            return Ok(0);
        };
        if stored.confirmed_at.is_some() {
            return Ok(0);
        }
        stored.confirmed_at = Some(confirmed_at);
        Ok(1)
    }
}
