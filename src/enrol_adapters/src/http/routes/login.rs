use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use enrol_application::{AppUserService, LoginUseCase};
use enrol_core::{
    AppUserStore, ConfirmationTokenStore, Email, Password, PasswordHasher, UserDetails,
};
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use super::error::ApiError;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: Secret<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginHttpResponse {
    pub email: String,
    pub authorities: Vec<String>,
    pub enabled: bool,
    pub account_non_locked: bool,
}

impl From<UserDetails> for LoginHttpResponse {
    fn from(details: UserDetails) -> Self {
        Self {
            email: details.username.into(),
            authorities: details.authorities,
            enabled: details.enabled,
            account_non_locked: details.account_non_locked,
        }
    }
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<U, T, H>(
    State(app_user_service): State<AppUserService<U, T, H>>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: AppUserStore + Clone + 'static,
    T: ConfirmationTokenStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
{
    let email = Email::new(&request.email);
    let password = Password::try_from(request.password)?;

    let details = LoginUseCase::new(&app_user_service)
        .execute(email, password)
        .await?;

    Ok((StatusCode::OK, Json(LoginHttpResponse::from(details))))
}
