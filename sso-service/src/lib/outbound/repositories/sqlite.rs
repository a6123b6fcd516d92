use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::migrate::MigrateError;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::sqlite::SqliteJournalMode;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

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

/// Embedded SQLite implementation of the credential store.
///
/// The database lives in a single file. Writers are serialized by SQLite
/// itself; `busy_timeout` makes contending connections wait instead of
/// failing.
pub struct SqliteCredentialStore {
    pool: SqlitePool,
}

impl SqliteCredentialStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if needed) the database file at `url`.
    ///
    /// # Arguments
    /// * `url` - SQLite URL, e.g. `sqlite://sso.db`
    /// * `max_connections` - Pool size
    /// * `acquire_timeout` - Longest wait for a free connection or a lock
    pub async fn connect(
        url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(acquire_timeout);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect_with(options)
            .await?;

        Ok(Self::new(pool))
    }

    /// Open a private in-memory database.
    ///
    /// Pinned to one connection that is never recycled, since every SQLite
    /// connection to `:memory:` sees its own database.
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Ok(Self::new(pool))
    }

    /// Apply the embedded schema migrations.
    pub async fn migrate(&self) -> Result<(), MigrateError> {
        sqlx::migrate!("./migrations/sqlite").run(&self.pool).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl UserRepository for SqliteCredentialStore {
    async fn save_user(
        &self,
        email: &EmailAddress,
        password_hash: &PasswordHash,
    ) -> Result<UserId, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (email, pass_hash)
            VALUES (?1, ?2)
            "#,
        )
        .bind(email.as_str())
        .bind(password_hash.as_bytes())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                // users.email is the only unique column on the table
                if db_err.is_unique_violation() {
                    return StoreError::UserExists;
                }
            }
            StoreError::Database(e.to_string())
        })?;

        let id = result.last_insert_rowid();
        tracing::debug!(user_id = id, "User inserted");
        Ok(UserId(id))
    }

    async fn find_user_by_email(&self, email: &EmailAddress) -> Result<User, StoreError> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, email, pass_hash
            FROM users
            WHERE email = ?1
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
impl AppRepository for SqliteCredentialStore {
    async fn find_app(&self, id: AppId) -> Result<Application, StoreError> {
        let record = sqlx::query_as::<_, AppRecord>(
            r#"
            SELECT id, name, secret
            FROM apps
            WHERE id = ?1
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
impl AdminRepository for SqliteCredentialStore {
    async fn is_admin(&self, user_id: UserId) -> Result<bool, StoreError> {
        // No row: the user itself is unknown.
        let is_admin = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (SELECT 1 FROM admins WHERE user_id = ?1)
            FROM users
            WHERE id = ?1
            "#,
        )
        .bind(user_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        is_admin.ok_or(StoreError::UserNotFound)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::*;

    async fn store() -> SqliteCredentialStore {
        let store = SqliteCredentialStore::in_memory()
            .await
            .expect("Failed to open in-memory database");
        store.migrate().await.expect("Failed to run migrations");
        store
    }

    fn email(raw: &str) -> EmailAddress {
        EmailAddress::new(raw.to_string()).unwrap()
    }

    fn hash() -> PasswordHash {
        PasswordHash::new("$argon2id$v=19$m=1024,t=1,p=1$c2FsdA$aGFzaA".to_string())
    }

    #[tokio::test]
    async fn test_save_and_find_user() {
        let store = store().await;

        let id = store
            .save_user(&email("user@example.com"), &hash())
            .await
            .unwrap();

        let user = store
            .find_user_by_email(&email("user@example.com"))
            .await
            .unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.email.as_str(), "user@example.com");
        assert_eq!(user.password_hash, hash());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_user_exists() {
        let store = store().await;

        store
            .save_user(&email("user@example.com"), &hash())
            .await
            .unwrap();
        let result = store.save_user(&email("user@example.com"), &hash()).await;

        assert_eq!(result, Err(StoreError::UserExists));
    }

    #[tokio::test]
    async fn test_email_lookup_is_case_sensitive() {
        let store = store().await;

        store
            .save_user(&email("User@Example.com"), &hash())
            .await
            .unwrap();

        let result = store
            .find_user_by_email(&email("user@example.com"))
            .await;
        assert_eq!(result, Err(StoreError::UserNotFound));
    }

    #[tokio::test]
    async fn test_find_app() {
        let store = store().await;
        sqlx::query("INSERT INTO apps (id, name, secret) VALUES (1, 'test', 'test-secret')")
            .execute(store.pool())
            .await
            .unwrap();

        let app = store.find_app(AppId(1)).await.unwrap();
        assert_eq!(app.name, "test");
        assert_eq!(app.secret, "test-secret");

        assert_eq!(
            store.find_app(AppId(999)).await,
            Err(StoreError::AppNotFound)
        );
    }

    #[tokio::test]
    async fn test_is_admin() {
        let store = store().await;
        let admin = store
            .save_user(&email("admin@example.com"), &hash())
            .await
            .unwrap();
        let regular = store
            .save_user(&email("regular@example.com"), &hash())
            .await
            .unwrap();
        sqlx::query("INSERT INTO admins (user_id) VALUES (?1)")
            .bind(admin.0)
            .execute(store.pool())
            .await
            .unwrap();

        assert_eq!(store.is_admin(admin).await, Ok(true));
        assert_eq!(store.is_admin(regular).await, Ok(false));
        assert_eq!(
            store.is_admin(UserId(4242)).await,
            Err(StoreError::UserNotFound)
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_saves_on_file_database() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let url = format!("sqlite://{}", dir.path().join("sso.db").display());
        let store = SqliteCredentialStore::connect(&url, 5, Duration::from_secs(5))
            .await
            .expect("Failed to open database file");
        store.migrate().await.expect("Failed to run migrations");
        let store = Arc::new(store);

        let mut handles = Vec::new();
        for i in 0..64 {
            let store = Arc::clone(&store);
            // Even tasks all race for the same address.
            let raw = if i % 2 == 0 {
                "shared@example.com".to_string()
            } else {
                format!("user{}@example.com", i)
            };
            handles.push(tokio::spawn(async move {
                store.save_user(&email(&raw), &hash()).await
            }));
        }

        let mut ids = HashSet::new();
        let mut exists = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(id) => assert!(ids.insert(id), "duplicate id {}", id),
                Err(StoreError::UserExists) => exists += 1,
                Err(e) => panic!("unexpected store error: {}", e),
            }
        }

        assert_eq!(ids.len(), 33);
        assert_eq!(exists, 31);

        let shared = store
            .find_user_by_email(&email("shared@example.com"))
            .await
            .unwrap();
        assert!(ids.contains(&shared.id));
    }
}
