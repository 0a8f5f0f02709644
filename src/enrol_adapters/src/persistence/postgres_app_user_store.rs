use enrol_core::{
    AppUser, AppUserRole, AppUserStore, AppUserStoreError, Email, PasswordHash, UserId,
};
use secrecy::{ExposeSecret, Secret};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

#[derive(Clone)]
pub struct PostgresAppUserStore {
    pool: PgPool,
}

impl PostgresAppUserStore {
    pub fn new(pool: PgPool) -> Self {
        PostgresAppUserStore { pool }
    }
}

#[derive(FromRow)]
struct AppUserRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    password_hash: String,
    role: String,
    locked: bool,
    enabled: bool,
}

impl TryFrom<AppUserRow> for AppUser {
    type Error = AppUserStoreError;

    fn try_from(row: AppUserRow) -> Result<Self, Self::Error> {
        let role = AppUserRole::parse(&row.role).ok_or_else(|| {
            AppUserStoreError::UnexpectedError(format!("unknown role {}", row.role))
        })?;

        Ok(AppUser {
            id: UserId::from(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            email: Email::new(row.email),
            password_hash: PasswordHash::new(Secret::new(row.password_hash)),
            role,
            locked: row.locked,
            enabled: row.enabled,
        })
    }
}

#[async_trait::async_trait]
impl AppUserStore for PostgresAppUserStore {
    #[tracing::instrument(name = "Retrieving user from PostgreSQL", skip_all)]
    async fn find_by_email(&self, email: &Email) -> Result<Option<AppUser>, AppUserStoreError> {
        let row = sqlx::query_as::<_, AppUserRow>(
            r#"
                SELECT id, first_name, last_name, email, password_hash, role, locked, enabled
                FROM app_users
                WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppUserStoreError::UnexpectedError(e.to_string()))?;

        row.map(AppUser::try_from).transpose()
    }

    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn save(&self, user: AppUser) -> Result<AppUser, AppUserStoreError> {
        let query = sqlx::query(
            r#"
                INSERT INTO app_users
                    (id, first_name, last_name, email, password_hash, role, locked, enabled)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.email.as_str())
        .bind(user.password_hash.as_ref().expose_secret())
        .bind(user.role.as_str())
        .bind(user.locked)
        .bind(user.enabled);

        query.execute(&self.pool).await.map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppUserStoreError::UserAlreadyExists;
                }
            }
            AppUserStoreError::UnexpectedError(e.to_string())
        })?;

        Ok(user)
    }

    #[tracing::instrument(name = "Enabling user in PostgreSQL", skip_all)]
    async fn enable_app_user(&self, email: &Email) -> Result<u64, AppUserStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE app_users
                SET enabled = TRUE
                WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| AppUserStoreError::UnexpectedError(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
