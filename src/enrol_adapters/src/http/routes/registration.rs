use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use enrol_application::{RegistrationRequest, RegistrationService};
use enrol_core::{AppUserStore, ConfirmationTokenStore, EmailClient, EmailValidator, PasswordHasher};
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use super::error::ApiError;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationBody {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: Secret<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegistrationHttpResponse {
    pub token: String,
}

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register<V, U, T, H, E>(
    State(service): State<RegistrationService<V, U, T, H, E>>,
    Json(request): Json<RegistrationBody>,
) -> Result<impl IntoResponse, ApiError>
where
    V: EmailValidator + Clone + 'static,
    U: AppUserStore + Clone + 'static,
    T: ConfirmationTokenStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let token = service
        .register(RegistrationRequest {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            password: request.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(RegistrationHttpResponse { token })))
}
