use chrono::{DateTime, Utc};
use enrol_core::{ConfirmationToken, ConfirmationTokenStore, ConfirmationTokenStoreError};

/// Thin service over the token store, shared by sign-up and confirmation.
#[derive(Clone)]
pub struct ConfirmationTokenService<T>
where
    T: ConfirmationTokenStore,
{
    token_store: T,
}

impl<T> ConfirmationTokenService<T>
where
    T: ConfirmationTokenStore,
{
    pub fn new(token_store: T) -> Self {
        Self { token_store }
    }

    #[tracing::instrument(name = "ConfirmationTokenService::save", skip_all)]
    pub async fn save_confirmation_token(
        &self,
        token: ConfirmationToken,
    ) -> Result<(), ConfirmationTokenStoreError> {
        self.token_store.save(token).await
    }

    #[tracing::instrument(name = "ConfirmationTokenService::get_token", skip_all)]
    pub async fn get_token(
        &self,
        token: &str,
    ) -> Result<Option<ConfirmationToken>, ConfirmationTokenStoreError> {
        self.token_store.find_by_token(token).await
    }

    /// Marks the token spent. Returns `false` when nothing was updated,
    /// i.e. the token was already confirmed by someone else.
    #[tracing::instrument(name = "ConfirmationTokenService::set_confirmed_at", skip(self, token))]
    pub async fn set_confirmed_at(
        &self,
        token: &str,
        confirmed_at: DateTime<Utc>,
    ) -> Result<bool, ConfirmationTokenStoreError> {
        let updated = self
            .token_store
            .update_confirmed_at(token, confirmed_at)
            .await?;
        Ok(updated > 0)
    }
}
