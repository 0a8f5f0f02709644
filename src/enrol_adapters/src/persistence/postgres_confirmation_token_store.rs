use chrono::{DateTime, Utc};
use enrol_core::{
    ConfirmationToken, ConfirmationTokenStore, ConfirmationTokenStoreError, Email, TokenOwner,
    UserId,
};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

#[derive(Clone)]
pub struct PostgresConfirmationTokenStore {
    pool: PgPool,
}

impl PostgresConfirmationTokenStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ConfirmationTokenRow {
    token: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    confirmed_at: Option<DateTime<Utc>>,
    app_user_id: Uuid,
    email: String,
}

impl From<ConfirmationTokenRow> for ConfirmationToken {
    fn from(row: ConfirmationTokenRow) -> Self {
        ConfirmationToken {
            token: row.token,
            created_at: row.created_at,
            expires_at: row.expires_at,
            confirmed_at: row.confirmed_at,
            owner: TokenOwner {
                id: UserId::from(row.app_user_id),
                email: Email::new(row.email),
            },
        }
    }
}

#[async_trait::async_trait]
impl ConfirmationTokenStore for PostgresConfirmationTokenStore {
    #[tracing::instrument(name = "Adding confirmation token to PostgreSQL", skip_all)]
    async fn save(&self, token: ConfirmationToken) -> Result<(), ConfirmationTokenStoreError> {
        sqlx::query(
            r#"
                INSERT INTO confirmation_tokens
                    (token, created_at, expires_at, confirmed_at, app_user_id)
                VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&token.token)
        .bind(token.created_at)
        .bind(token.expires_at)
        .bind(token.confirmed_at)
        .bind(token.owner.id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return ConfirmationTokenStoreError::DuplicateToken;
                }
            }
            ConfirmationTokenStoreError::UnexpectedError(e.to_string())
        })?;

        Ok(())
    }

    #[tracing::instrument(name = "Retrieving confirmation token from PostgreSQL", skip_all)]
    async fn find_by_token(
        &self,
        token: &str,
    ) -> Result<Option<ConfirmationToken>, ConfirmationTokenStoreError> {
        let row = sqlx::query_as::<_, ConfirmationTokenRow>(
            r#"
                SELECT t.token, t.created_at, t.expires_at, t.confirmed_at, t.app_user_id, u.email
                FROM confirmation_tokens t
                JOIN app_users u ON u.id = t.app_user_id
                WHERE t.token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ConfirmationTokenStoreError::UnexpectedError(e.to_string()))?;

        Ok(row.map(ConfirmationToken::from))
    }

    #[tracing::instrument(name = "Confirming token in PostgreSQL", skip(self, token))]
    async fn update_confirmed_at(
        &self,
        token: &str,
        confirmed_at: DateTime<Utc>,
    ) -> Result<u64, ConfirmationTokenStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE confirmation_tokens
                SET confirmed_at = $2
                WHERE token = $1 AND confirmed_at IS NULL
            "#,
        )
        .bind(token)
        .bind(confirmed_at)
        .execute(&self.pool)
        .await
        .map_err(|e| ConfirmationTokenStoreError::UnexpectedError(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
