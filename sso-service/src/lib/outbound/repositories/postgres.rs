use std::time::Duration;

use async_trait::async_trait;
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::AppRecord;
use super::UserRecord;
use crate::domain::auth::errors::StoreError;
use crate::domain::auth::models::AppId;
use crate::domain::auth::models::Application;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::PasswordHash;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::AdminRepository;
use crate::domain::auth::ports::AppRepository;
use crate::domain::auth::ports::UserRepository;

const USERS_EMAIL_KEY: &str = "users_email_key";

/// PostgreSQL implementation of the credential store.
///
/// Concurrency is delegated to the connection pool.
pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a connection pool.
    ///
    /// # Arguments
    /// * `url` - PostgreSQL connection URL
    /// * `max_connections` - Pool size
    /// * `acquire_timeout` - Longest wait for a free connection
    pub async fn connect(
        url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect(url)
            .await?;

        Ok(Self::new(pool))
    }

    /// Apply the embedded schema migrations.
    pub async fn migrate(&self) -> Result<(), MigrateError> {
        sqlx::migrate!("./migrations/postgres").run(&self.pool).await
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserRepository for PostgresCredentialStore {
    async fn save_user(
        &self,
        email: &EmailAddress,
        password_hash: &PasswordHash,
    ) -> Result<UserId, StoreError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (email, pass_hash)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(email.as_str())
        .bind(password_hash.as_bytes())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() && db_err.constraint() == Some(USERS_EMAIL_KEY) {
                    return StoreError::UserExists;
                }
            }
            StoreError::Database(e.to_string())
        })?;

        tracing::debug!(user_id = id, "User inserted");
        Ok(UserId(id))
    }

    async fn find_user_by_email(&self, email: &EmailAddress) -> Result<User, StoreError> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, email, pass_hash
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        record.ok_or(StoreError::UserNotFound)?.try_into()
    }
}

#[async_trait]
impl AppRepository for PostgresCredentialStore {
    async fn find_app(&self, id: AppId) -> Result<Application, StoreError> {
        let record = sqlx::query_as::<_, AppRecord>(
            r#"
            SELECT id, name, secret
            FROM apps
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        record.map(Application::from).ok_or(StoreError::AppNotFound)
    }
}

#[async_trait]
impl AdminRepository for PostgresCredentialStore {
    async fn is_admin(&self, user_id: UserId) -> Result<bool, StoreError> {
        // No row: the user itself is unknown.
        let is_admin = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (SELECT 1 FROM admins WHERE user_id = $1)
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        is_admin.ok_or(StoreError::UserNotFound)
    }
}
