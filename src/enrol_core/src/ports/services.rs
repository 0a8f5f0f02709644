use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    email::Email,
    email_message::EmailMessage,
    password::{Password, PasswordHash},
};

/// Port trait for email sending service
#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_email(&self, recipient: &Email, message: &EmailMessage) -> Result<(), String>;
}

#[derive(Debug, Error, PartialEq)]
pub enum PasswordHasherError {
    #[error("Failed to hash password: {0}")]
    Hashing(String),
    #[error("Password does not match")]
    Mismatch,
}

/// Port trait for one-way credential hashing
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: Password) -> Result<PasswordHash, PasswordHasherError>;
    async fn verify(
        &self,
        password: Password,
        expected: &PasswordHash,
    ) -> Result<(), PasswordHasherError>;
}
