use color_eyre::eyre::Result;
use enrol_adapters::{
    config::Settings,
    email::PostmarkEmailClient,
    hashing::Argon2PasswordHasher,
    persistence::{PostgresAppUserStore, PostgresConfirmationTokenStore},
};
use enrol_application::{AppUserService, ConfirmationTokenService, RegistrationService};
use enrol_core::{Email, RegexEmailValidator};
use enrol_service::{EnrolService, configure_postgresql, telemetry::init_tracing};
use reqwest::Client as HttpClient;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let settings = Settings::load()?;

    let pg_pool = configure_postgresql(&settings.database).await?;

    // Create stores
    let user_store = PostgresAppUserStore::new(pg_pool.clone());
    let token_store = PostgresConfirmationTokenStore::new(pg_pool);

    // Create email client
    let http_client = HttpClient::builder()
        .timeout(settings.email_client.timeout())
        .build()?;

    let email_client = PostmarkEmailClient::new(
        settings.email_client.base_url.clone(),
        Email::new(&settings.email_client.sender),
        settings.email_client.auth_token.clone(),
        http_client,
    );

    let app_user_service = AppUserService::new(
        user_store,
        ConfirmationTokenService::new(token_store.clone()),
        Argon2PasswordHasher::new(),
    );

    let registration_service = RegistrationService::new(
        RegexEmailValidator,
        app_user_service,
        ConfirmationTokenService::new(token_store),
        email_client,
        settings.registration.confirmation_base_url.clone(),
    );

    let listener = tokio::net::TcpListener::bind(settings.server.address()).await?;
    tracing::info!("Starting enrol service...");

    EnrolService::new(registration_service)
        .run_standalone(listener, Some(settings.allowed_origins.clone()))
        .await?;

    Ok(())
}
