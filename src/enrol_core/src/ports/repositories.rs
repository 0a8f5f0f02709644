use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{confirmation_token::ConfirmationToken, email::Email, user::AppUser};

// AppUserStore port trait and errors
#[derive(Debug, Error)]
pub enum AppUserStoreError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for AppUserStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::UserAlreadyExists, Self::UserAlreadyExists)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Account persistence.
///
/// `save` must reject a second account with the same email even when a
/// caller skipped the `find_by_email` check, so concurrent sign-ups cannot
/// both succeed.
#[async_trait]
pub trait AppUserStore: Send + Sync {
    async fn find_by_email(&self, email: &Email) -> Result<Option<AppUser>, AppUserStoreError>;
    async fn save(&self, user: AppUser) -> Result<AppUser, AppUserStoreError>;
    /// Returns the number of accounts that were enabled.
    async fn enable_app_user(&self, email: &Email) -> Result<u64, AppUserStoreError>;
}

// ConfirmationTokenStore port trait and errors
#[derive(Debug, Error)]
pub enum ConfirmationTokenStoreError {
    #[error("Token already exists")]
    DuplicateToken,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for ConfirmationTokenStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::DuplicateToken, Self::DuplicateToken)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

#[async_trait]
pub trait ConfirmationTokenStore: Send + Sync {
    async fn save(&self, token: ConfirmationToken) -> Result<(), ConfirmationTokenStoreError>;
    async fn find_by_token(
        &self,
        token: &str,
    ) -> Result<Option<ConfirmationToken>, ConfirmationTokenStoreError>;
    /// Sets `confirmed_at` on a token that has not been confirmed yet.
    /// Returns the number of tokens updated; 0 means unknown or already spent.
    async fn update_confirmed_at(
        &self,
        token: &str,
        confirmed_at: DateTime<Utc>,
    ) -> Result<u64, ConfirmationTokenStoreError>;
}
