use chrono::Utc;
use enrol_core::{
    AppUser, AppUserStore, AppUserStoreError, ConfirmationToken, ConfirmationTokenStore,
    ConfirmationTokenStoreError, Email, ErrorKind, NewAppUser, PasswordHasher, PasswordHasherError,
    TokenOwner, UserDetails,
};

use super::confirmation_token_service::ConfirmationTokenService;

/// Error types for the account service
#[derive(Debug, thiserror::Error)]
pub enum AppUserServiceError {
    #[error("user with email {0} not found")]
    UserNotFound(Email),
    #[error("email already taken")]
    EmailAlreadyTaken,
    #[error("User store error: {0}")]
    UserStoreError(AppUserStoreError),
    #[error("Confirmation token store error: {0}")]
    TokenStoreError(#[from] ConfirmationTokenStoreError),
    #[error("Password hasher error: {0}")]
    PasswordHasherError(#[from] PasswordHasherError),
}

impl AppUserServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppUserServiceError::UserNotFound(_) => ErrorKind::NotFound,
            AppUserServiceError::EmailAlreadyTaken => ErrorKind::Conflict,
            AppUserServiceError::UserStoreError(_)
            | AppUserServiceError::TokenStoreError(_)
            | AppUserServiceError::PasswordHasherError(_) => ErrorKind::Unexpected,
        }
    }
}

impl From<AppUserStoreError> for AppUserServiceError {
    fn from(error: AppUserStoreError) -> Self {
        match error {
            AppUserStoreError::UserAlreadyExists => AppUserServiceError::EmailAlreadyTaken,
            other => AppUserServiceError::UserStoreError(other),
        }
    }
}

/// Account service - creates, looks up and activates accounts
#[derive(Clone)]
pub struct AppUserService<U, T, H>
where
    U: AppUserStore,
    T: ConfirmationTokenStore,
    H: PasswordHasher,
{
    user_store: U,
    token_service: ConfirmationTokenService<T>,
    password_hasher: H,
}

impl<U, T, H> AppUserService<U, T, H>
where
    U: AppUserStore,
    T: ConfirmationTokenStore,
    H: PasswordHasher,
{
    pub fn new(user_store: U, token_service: ConfirmationTokenService<T>, password_hasher: H) -> Self {
        Self {
            user_store,
            token_service,
            password_hasher,
        }
    }

    pub fn password_hasher(&self) -> &H {
        &self.password_hasher
    }

    /// Look up an account, treating absence as an error that names the email.
    #[tracing::instrument(name = "AppUserService::find_by_email", skip_all)]
    pub async fn find_by_email(&self, email: &Email) -> Result<AppUser, AppUserServiceError> {
        self.user_store
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppUserServiceError::UserNotFound(email.clone()))
    }

    /// Lookup used by the login path.
    #[tracing::instrument(name = "AppUserService::load_user_by_username", skip_all)]
    pub async fn load_user_by_username(
        &self,
        email: &Email,
    ) -> Result<UserDetails, AppUserServiceError> {
        let user = self.find_by_email(email).await?;
        Ok(user.details())
    }

    /// Create a disabled account and issue its first confirmation token.
    ///
    /// # Returns
    /// The token string to embed in the confirmation link.
    ///
    /// The existence check and the insert are not atomic; the store's own
    /// uniqueness check turns a lost race into `EmailAlreadyTaken` as well.
    /// An error while saving the token leaves the account in place, disabled.
    #[tracing::instrument(name = "AppUserService::sign_up_user", skip_all)]
    pub async fn sign_up_user(&self, candidate: NewAppUser) -> Result<String, AppUserServiceError> {
        if self.user_store.find_by_email(&candidate.email).await?.is_some() {
            return Err(AppUserServiceError::EmailAlreadyTaken);
        }

        let password_hash = self.password_hasher.hash(candidate.password.clone()).await?;
        let user = self
            .user_store
            .save(candidate.into_app_user(password_hash))
            .await?;

        let token = ConfirmationToken::issue(
            TokenOwner {
                id: user.id,
                email: user.email.clone(),
            },
            Utc::now(),
        );
        let token_value = token.token.clone();
        self.token_service.save_confirmation_token(token).await?;

        Ok(token_value)
    }

    #[tracing::instrument(name = "AppUserService::enable_app_user", skip_all)]
    pub async fn enable_app_user(&self, email: &Email) -> Result<(), AppUserServiceError> {
        let updated = self.user_store.enable_app_user(email).await?;
        if updated == 0 {
            return Err(AppUserServiceError::UserNotFound(email.clone()));
        }
        Ok(())
    }
}
