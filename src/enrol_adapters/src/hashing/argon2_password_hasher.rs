use argon2::{
    Algorithm, Argon2, Params, PasswordHash as PhcHash, PasswordVerifier, Version,
    password_hash::{PasswordHasher as _, SaltString, rand_core},
};
use enrol_core::{Password, PasswordHash, PasswordHasher, PasswordHasherError};
use secrecy::{ExposeSecret, Secret};

/// Argon2id hasher. Hashing runs on the blocking pool inside the caller's span.
#[derive(Debug, Clone, Default)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self
    }
}

fn argon2() -> Result<Argon2<'static>, String> {
    Ok(Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(15000, 2, 1, None).map_err(|e| e.to_string())?,
    ))
}

#[async_trait::async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    #[tracing::instrument(name = "Computing password hash", skip_all)]
    async fn hash(&self, password: Password) -> Result<PasswordHash, PasswordHasherError> {
        let current_span: tracing::Span = tracing::Span::current();

        let result = tokio::task::spawn_blocking(move || {
            current_span.in_scope(move || {
                let salt: SaltString = SaltString::generate(rand_core::OsRng);
                argon2()?
                    .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
                    .map(|h| PasswordHash::new(Secret::new(h.to_string())))
                    .map_err(|e| e.to_string())
            })
        })
        .await
        .map_err(|e| PasswordHasherError::Hashing(e.to_string()))?;

        result.map_err(PasswordHasherError::Hashing)
    }

    #[tracing::instrument(name = "Verify password hash", skip_all)]
    async fn verify(
        &self,
        password: Password,
        expected: &PasswordHash,
    ) -> Result<(), PasswordHasherError> {
        let current_span: tracing::Span = tracing::Span::current();
        let expected: Secret<String> = expected.as_ref().clone();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| {
                let expected_hash = PhcHash::new(expected.expose_secret())
                    .map_err(|e| PasswordHasherError::Hashing(e.to_string()))?;

                argon2()
                    .map_err(PasswordHasherError::Hashing)?
                    .verify_password(password.as_ref().expose_secret().as_bytes(), &expected_hash)
                    .map_err(|_| PasswordHasherError::Mismatch)
            })
        })
        .await
        .map_err(|e| PasswordHasherError::Hashing(e.to_string()))?
    }
}
