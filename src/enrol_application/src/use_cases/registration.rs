use chrono::Utc;
use enrol_core::{
    AppUserRole, AppUserStore, CONFIRMATION_TOKEN_VALIDITY, ConfirmationTokenStore,
    ConfirmationTokenStoreError, Email, EmailClient, EmailValidator, ErrorKind, NewAppUser,
    Password, PasswordError, PasswordHasher, TokenStatus,
};
use secrecy::Secret;

use super::{
    app_user_service::{AppUserService, AppUserServiceError},
    confirmation_token_service::ConfirmationTokenService,
};
use crate::email_template::{ConfirmationEmail, confirmation_link};

/// Returned by a successful confirmation.
pub const CONFIRMED: &str = "confirmed";

/// Sign-up input as received from a transport.
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: Secret<String>,
}

/// Error types for registration and confirmation
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("email not valid")]
    EmailNotValid,
    #[error("password not valid: {0}")]
    PasswordNotValid(#[from] PasswordError),
    #[error(transparent)]
    AppUserServiceError(#[from] AppUserServiceError),
    #[error("token not found")]
    TokenNotFound,
    #[error("email already confirmed")]
    EmailAlreadyConfirmed,
    #[error("token expired")]
    TokenExpired,
    #[error("Confirmation token store error: {0}")]
    TokenStoreError(#[from] ConfirmationTokenStoreError),
}

impl RegistrationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistrationError::EmailNotValid | RegistrationError::PasswordNotValid(_) => {
                ErrorKind::Validation
            }
            RegistrationError::AppUserServiceError(e) => e.kind(),
            RegistrationError::TokenNotFound => ErrorKind::NotFound,
            RegistrationError::EmailAlreadyConfirmed | RegistrationError::TokenExpired => {
                ErrorKind::IllegalState
            }
            RegistrationError::TokenStoreError(_) => ErrorKind::Unexpected,
        }
    }
}

/// Registration service - sign-up and email confirmation
#[derive(Clone)]
pub struct RegistrationService<V, U, T, H, E>
where
    V: EmailValidator,
    U: AppUserStore,
    T: ConfirmationTokenStore,
    H: PasswordHasher,
    E: EmailClient,
{
    email_validator: V,
    app_user_service: AppUserService<U, T, H>,
    token_service: ConfirmationTokenService<T>,
    email_client: E,
    confirmation_base_url: String,
}

impl<V, U, T, H, E> RegistrationService<V, U, T, H, E>
where
    V: EmailValidator,
    U: AppUserStore,
    T: ConfirmationTokenStore,
    H: PasswordHasher,
    E: EmailClient,
{
    /// # Arguments
    /// * `confirmation_base_url` - Prefix of the link mailed to the user; the
    ///   link is `<confirmation_base_url>/confirm?token=<token>`
    pub fn new(
        email_validator: V,
        app_user_service: AppUserService<U, T, H>,
        token_service: ConfirmationTokenService<T>,
        email_client: E,
        confirmation_base_url: impl Into<String>,
    ) -> Self {
        Self {
            email_validator,
            app_user_service,
            token_service,
            email_client,
            confirmation_base_url: confirmation_base_url.into(),
        }
    }

    pub fn app_user_service(&self) -> &AppUserService<U, T, H> {
        &self.app_user_service
    }

    /// Register a new, disabled account and mail its confirmation link.
    ///
    /// # Returns
    /// The confirmation token string, or RegistrationError if the email is
    /// malformed or already taken
    #[tracing::instrument(name = "RegistrationService::register", skip_all)]
    pub async fn register(&self, request: RegistrationRequest) -> Result<String, RegistrationError> {
        if !self.email_validator.is_valid(&request.email) {
            return Err(RegistrationError::EmailNotValid);
        }

        let email = Email::new(&request.email);
        let password = Password::try_from(request.password)?;
        let candidate = NewAppUser::new(
            request.first_name,
            request.last_name,
            email.clone(),
            password,
            AppUserRole::User,
        );
        let first_name = candidate.first_name.clone();

        let token = self.app_user_service.sign_up_user(candidate).await?;

        self.send_confirmation_email(&email, &first_name, &token).await;

        Ok(token)
    }

    /// Redeem a confirmation token and enable its account.
    ///
    /// Checks run in a fixed order: unknown token, already confirmed, expired.
    /// Nothing is written unless all three pass.
    #[tracing::instrument(name = "RegistrationService::confirm_token", skip_all)]
    pub async fn confirm_token(&self, token: &str) -> Result<&'static str, RegistrationError> {
        let confirmation_token = self
            .token_service
            .get_token(token)
            .await?
            .ok_or(RegistrationError::TokenNotFound)?;

        let now = Utc::now();
        match confirmation_token.status_at(now) {
            TokenStatus::Confirmed => return Err(RegistrationError::EmailAlreadyConfirmed),
            TokenStatus::Expired => return Err(RegistrationError::TokenExpired),
            TokenStatus::Issued => {}
        }

        // A concurrent redemption may have won between the read and this write.
        if !self.token_service.set_confirmed_at(token, now).await? {
            return Err(RegistrationError::EmailAlreadyConfirmed);
        }

        self.app_user_service
            .enable_app_user(&confirmation_token.owner.email)
            .await?;

        Ok(CONFIRMED)
    }

    /// Delivery problems are logged, never returned: the account and token
    /// already exist at this point.
    async fn send_confirmation_email(&self, recipient: &Email, name: &str, token: &str) {
        let link = confirmation_link(&self.confirmation_base_url, token);
        let message = match (ConfirmationEmail {
            name,
            link: &link,
            validity_minutes: CONFIRMATION_TOKEN_VALIDITY.num_minutes(),
        })
        .render()
        {
            Ok(message) => message,
            Err(e) => {
                tracing::error!(error = %e, "Failed to render confirmation email");
                return;
            }
        };

        if let Err(e) = self.email_client.send_email(recipient, &message).await {
            tracing::error!(error = %e, "Failed to send confirmation email");
        }
    }
}
