use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use super::{email::Email, user::UserId};

/// How long a freshly issued token can be redeemed.
pub const CONFIRMATION_TOKEN_VALIDITY: Duration = Duration::minutes(15);

/// Non-owning reference from a token to the account it confirms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenOwner {
    pub id: UserId,
    pub email: Email,
}

/// Where a token is in its lifecycle when read at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStatus {
    Issued,
    Confirmed,
    Expired,
}

/// Single-use email confirmation credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationToken {
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub owner: TokenOwner,
}

impl ConfirmationToken {
    pub fn new(
        token: impl Into<String>,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
        owner: TokenOwner,
    ) -> Self {
        Self {
            token: token.into(),
            created_at,
            expires_at,
            confirmed_at: None,
            owner,
        }
    }

    /// Issue a token with a fresh random value, valid for
    /// [`CONFIRMATION_TOKEN_VALIDITY`] from `now`.
    pub fn issue(owner: TokenOwner, now: DateTime<Utc>) -> Self {
        Self::new(
            Uuid::new_v4().to_string(),
            now,
            now + CONFIRMATION_TOKEN_VALIDITY,
            owner,
        )
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed_at.is_some()
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Confirmation wins over expiry: a spent token stays `Confirmed` forever.
    pub fn status_at(&self, now: DateTime<Utc>) -> TokenStatus {
        if self.is_confirmed() {
            TokenStatus::Confirmed
        } else if self.is_expired_at(now) {
            TokenStatus::Expired
        } else {
            TokenStatus::Issued
        }
    }
}
