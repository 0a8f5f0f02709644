//! In-memory doubles shared by the use case tests.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use enrol_core::{
    AppUser, AppUserStore, AppUserStoreError, ConfirmationToken, ConfirmationTokenStore,
    ConfirmationTokenStoreError, Email, EmailClient, EmailMessage, EmailValidator, Password,
    PasswordHash,
    PasswordHasher, PasswordHasherError,
};
use secrecy::{ExposeSecret, Secret};
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct MockAppUserStore {
    pub users: Arc<RwLock<HashMap<Email, AppUser>>>,
}

#[async_trait::async_trait]
impl AppUserStore for MockAppUserStore {
    async fn find_by_email(&self, email: &Email) -> Result<Option<AppUser>, AppUserStoreError> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn save(&self, user: AppUser) -> Result<AppUser, AppUserStoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(user.email()) {
            return Err(AppUserStoreError::UserAlreadyExists);
        }
        users.insert(user.email().clone(), user.clone());
        Ok(user)
    }

    async fn enable_app_user(&self, email: &Email) -> Result<u64, AppUserStoreError> {
        let mut users = self.users.write().await;
        match users.get_mut(email) {
            Some(user) => {
                user.enabled = true;
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

/// A store whose `find_by_email` always misses, to exercise the insert-time
/// uniqueness check.
#[derive(Clone, Default)]
pub struct BlindAppUserStore {
    pub inner: MockAppUserStore,
}

#[async_trait::async_trait]
impl AppUserStore for BlindAppUserStore {
    async fn find_by_email(&self, _email: &Email) -> Result<Option<AppUser>, AppUserStoreError> {
        Ok(None)
    }

    async fn save(&self, user: AppUser) -> Result<AppUser, AppUserStoreError> {
        self.inner.save(user).await
    }

    async fn enable_app_user(&self, email: &Email) -> Result<u64, AppUserStoreError> {
        self.inner.enable_app_user(email).await
    }
}

#[derive(Clone, Default)]
pub struct MockConfirmationTokenStore {
    pub tokens: Arc<RwLock<HashMap<String, ConfirmationToken>>>,
}

impl MockConfirmationTokenStore {
    pub async fn insert(&self, token: ConfirmationToken) {
        self.tokens.write().await.insert(token.token.clone(), token);
    }
}

#[async_trait::async_trait]
impl ConfirmationTokenStore for MockConfirmationTokenStore {
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
        match tokens.get_mut(token) {
            Some(stored) if stored.confirmed_at.is_none() => {
                stored.confirmed_at = Some(confirmed_at);
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}

/// Token store that always reads the token as unconfirmed but never wins the
/// write, as when another request redeems it between the read and the update.
#[derive(Clone)]
pub struct LostRaceTokenStore {
    pub snapshot: ConfirmationToken,
    pub update_attempts: Arc<RwLock<u32>>,
}

impl LostRaceTokenStore {
    pub fn new(snapshot: ConfirmationToken) -> Self {
        Self {
            snapshot,
            update_attempts: Arc::new(RwLock::new(0)),
        }
    }
}

#[async_trait::async_trait]
impl ConfirmationTokenStore for LostRaceTokenStore {
    async fn save(&self, _token: ConfirmationToken) -> Result<(), ConfirmationTokenStoreError> {
        Ok(())
    }

    async fn find_by_token(
        &self,
        token: &str,
    ) -> Result<Option<ConfirmationToken>, ConfirmationTokenStoreError> {
        Ok((self.snapshot.token == token).then(|| self.snapshot.clone()))
    }

    async fn update_confirmed_at(
        &self,
        _token: &str,
        _confirmed_at: DateTime<Utc>,
    ) -> Result<u64, ConfirmationTokenStoreError> {
        *self.update_attempts.write().await += 1;
        Ok(0)
    }
}

/// Reversible "hash" so tests can check that plaintext never reaches the store.
#[derive(Clone, Default)]
pub struct ReversedPasswordHasher;

#[async_trait::async_trait]
impl PasswordHasher for ReversedPasswordHasher {
    async fn hash(&self, password: Password) -> Result<PasswordHash, PasswordHasherError> {
        let reversed: String = password.as_ref().expose_secret().chars().rev().collect();
        Ok(PasswordHash::new(Secret::new(format!("hashed:{reversed}"))))
    }

    async fn verify(
        &self,
        password: Password,
        expected: &PasswordHash,
    ) -> Result<(), PasswordHasherError> {
        let computed = self.hash(password).await?;
        if computed.as_ref().expose_secret() == expected.as_ref().expose_secret() {
            Ok(())
        } else {
            Err(PasswordHasherError::Mismatch)
        }
    }
}

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub recipient: Email,
    pub message: EmailMessage,
}

#[derive(Clone, Default)]
pub struct RecordingEmailClient {
    pub sent: Arc<RwLock<Vec<SentEmail>>>,
    pub fail: bool,
}

#[async_trait::async_trait]
impl EmailClient for RecordingEmailClient {
    async fn send_email(&self, recipient: &Email, message: &EmailMessage) -> Result<(), String> {
        if self.fail {
            return Err("smtp relay unavailable".to_string());
        }
        self.sent.write().await.push(SentEmail {
            recipient: recipient.clone(),
            message: message.clone(),
        });
        Ok(())
    }
}

#[derive(Clone, Copy)]
pub struct FixedEmailValidator(pub bool);

impl EmailValidator for FixedEmailValidator {
    fn is_valid(&self, _candidate: &str) -> bool {
        self.0
    }
}

pub fn password(raw: &str) -> Password {
    Password::try_from(Secret::new(raw.to_string())).unwrap()
}

/// Layer that keeps every field value recorded on new spans.
#[derive(Clone, Default)]
pub struct SpanFieldRecorder {
    pub values: Arc<std::sync::Mutex<Vec<String>>>,
}

struct FieldValues<'a>(&'a mut Vec<String>);

impl tracing::field::Visit for FieldValues<'_> {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push(format!("{}={:?}", field.name(), value));
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for SpanFieldRecorder {
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        if let Ok(mut values) = self.values.lock() {
            attrs.record(&mut FieldValues(&mut values));
        }
    }
}
