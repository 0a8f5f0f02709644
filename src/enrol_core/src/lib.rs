pub mod domain;
pub mod ports;
pub mod strategies;

// Re-export commonly used types for convenience
pub use domain::{
    confirmation_token::{CONFIRMATION_TOKEN_VALIDITY, ConfirmationToken, TokenOwner, TokenStatus},
    email::Email,
    email_message::EmailMessage,
    error_kind::ErrorKind,
    password::{Password, PasswordError, PasswordHash},
    user::{AppUser, AppUserRole, NewAppUser, UserDetails, UserId},
};

pub use ports::{
    repositories::{
        AppUserStore, AppUserStoreError, ConfirmationTokenStore, ConfirmationTokenStoreError,
    },
    services::{EmailClient, PasswordHasher, PasswordHasherError},
};

pub use strategies::email_validator::{EmailValidator, RegexEmailValidator};
