use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use enrol_application::RegistrationService;
use enrol_core::{AppUserStore, ConfirmationTokenStore, EmailClient, EmailValidator, PasswordHasher};
use serde::Deserialize;

use super::error::ApiError;

#[derive(Deserialize)]
pub struct ConfirmQuery {
    pub token: String,
}

/// Target of the link in the confirmation email.
#[tracing::instrument(name = "Confirm", skip_all)]
pub async fn confirm<V, U, T, H, E>(
    State(service): State<RegistrationService<V, U, T, H, E>>,
    Query(query): Query<ConfirmQuery>,
) -> Result<impl IntoResponse, ApiError>
where
    V: EmailValidator + Clone + 'static,
    U: AppUserStore + Clone + 'static,
    T: ConfirmationTokenStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let confirmed = service.confirm_token(&query.token).await?;

    Ok((StatusCode::OK, confirmed))
}
