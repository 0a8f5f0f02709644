use std::time::Duration;

use axum::http::HeaderValue;
use config::{Config, ConfigError, Environment, File};
use secrecy::Secret;
use serde::Deserialize;

use super::constants::{defaults, env};

/// Runtime configuration of the service.
///
/// Sources, later ones winning: built-in defaults, an optional
/// `config/default.{toml,json,…}` file, then `ENROL__SECTION__KEY`
/// environment variables (a `.env` file is loaded first if present).
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub email_client: EmailClientSettings,
    pub registration: RegistrationSettings,
    #[serde(default)]
    pub allowed_origins: AllowedOrigins,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: Secret<String>,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender: String,
    pub auth_token: Secret<String>,
    pub timeout_millis: u64,
}

impl EmailClientSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_millis)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationSettings {
    /// Prefix of the link mailed after sign-up.
    pub confirmation_base_url: String,
}

/// Origins allowed to call the service from a browser.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct AllowedOrigins(Vec<String>);

impl AllowedOrigins {
    pub fn new(origins: Vec<String>) -> Self {
        Self(origins)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, origin: &HeaderValue) -> bool {
        origin
            .to_str()
            .map(|origin| self.0.iter().any(|allowed| allowed == origin))
            .unwrap_or(false)
    }
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(
                Environment::with_prefix(env::ENV_PREFIX)
                    .prefix_separator(env::ENV_SEPARATOR)
                    .separator(env::ENV_SEPARATOR)
                    .list_separator(",")
                    .with_list_parse_key("allowed_origins")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", defaults::HOST)?
            .set_default("server.port", i64::from(defaults::PORT))?
            .set_default("database.url", defaults::DATABASE_URL)?
            .set_default(
                "database.max_connections",
                i64::from(defaults::DATABASE_MAX_CONNECTIONS),
            )?
            .set_default("email_client.base_url", defaults::email_client::BASE_URL)?
            .set_default("email_client.sender", defaults::email_client::SENDER)?
            .set_default("email_client.auth_token", "")?
            .set_default(
                "email_client.timeout_millis",
                defaults::email_client::TIMEOUT_MILLIS as i64,
            )?
            .set_default(
                "registration.confirmation_base_url",
                defaults::CONFIRMATION_BASE_URL,
            )?
            .set_default("allowed_origins", Vec::<String>::new())
    }
}
