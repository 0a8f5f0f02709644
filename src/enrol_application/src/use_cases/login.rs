use enrol_core::{
    AppUserStore, ConfirmationTokenStore, Email, ErrorKind, Password, PasswordHasher,
    PasswordHasherError, UserDetails,
};

use super::app_user_service::{AppUserService, AppUserServiceError};

/// Error types specific to login use case
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error(transparent)]
    AppUserServiceError(AppUserServiceError),
    #[error("account not enabled")]
    AccountNotEnabled,
    #[error("account locked")]
    AccountLocked,
    #[error("bad credentials")]
    BadCredentials,
    #[error("Password hasher error: {0}")]
    PasswordHasherError(PasswordHasherError),
}

impl LoginError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LoginError::AppUserServiceError(e) => e.kind(),
            LoginError::AccountNotEnabled
            | LoginError::AccountLocked
            | LoginError::BadCredentials => ErrorKind::Authentication,
            LoginError::PasswordHasherError(_) => ErrorKind::Unexpected,
        }
    }
}

/// An unknown email reads the same as a wrong password to the caller.
impl From<AppUserServiceError> for LoginError {
    fn from(error: AppUserServiceError) -> Self {
        match error {
            AppUserServiceError::UserNotFound(_) => LoginError::BadCredentials,
            other => LoginError::AppUserServiceError(other),
        }
    }
}

impl From<PasswordHasherError> for LoginError {
    fn from(error: PasswordHasherError) -> Self {
        match error {
            PasswordHasherError::Mismatch => LoginError::BadCredentials,
            other => LoginError::PasswordHasherError(other),
        }
    }
}

/// Login use case - checks credentials of a confirmed account
///
/// Only answers whether the credentials are good; no session is created.
pub struct LoginUseCase<'a, U, T, H>
where
    U: AppUserStore,
    T: ConfirmationTokenStore,
    H: PasswordHasher,
{
    app_user_service: &'a AppUserService<U, T, H>,
}

impl<'a, U, T, H> LoginUseCase<'a, U, T, H>
where
    U: AppUserStore,
    T: ConfirmationTokenStore,
    H: PasswordHasher,
{
    pub fn new(app_user_service: &'a AppUserService<U, T, H>) -> Self {
        Self { app_user_service }
    }

    /// Execute the login use case
    ///
    /// # Arguments
    /// * `email` - User's email address
    /// * `password` - User's password
    ///
    /// # Returns
    /// The account's UserDetails when the account is enabled, unlocked and
    /// the password matches
    #[tracing::instrument(name = "LoginUseCase::execute", skip_all)]
    pub async fn execute(&self, email: Email, password: Password) -> Result<UserDetails, LoginError> {
        let details = self.app_user_service.load_user_by_username(&email).await?;

        if !details.enabled {
            return Err(LoginError::AccountNotEnabled);
        }
        if !details.account_non_locked {
            return Err(LoginError::AccountLocked);
        }

        self.app_user_service
            .password_hasher()
            .verify(password, &details.password_hash)
            .await?;

        Ok(details)
    }
}
