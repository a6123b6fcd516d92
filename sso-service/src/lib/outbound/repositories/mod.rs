use sqlx::FromRow;

use crate::domain::auth::errors::StoreError;
use crate::domain::auth::models::AppId;
use crate::domain::auth::models::Application;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::PasswordHash;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;

pub mod postgres;
pub mod sqlite;

pub use postgres::PostgresCredentialStore;
pub use sqlite::SqliteCredentialStore;

/// Row shape of `users`, identical in both schemas.
#[derive(FromRow)]
struct UserRecord {
    id: i64,
    email: String,
    pass_hash: Vec<u8>,
}

impl TryFrom<UserRecord> for User {
    type Error = StoreError;

    fn try_from(record: UserRecord) -> Result<Self, Self::Error> {
        let email = EmailAddress::new(record.email).map_err(|e| {
            StoreError::Database(format!("stored email for user {} is invalid: {}", record.id, e))
        })?;
        let password_hash = PasswordHash::from_bytes(record.pass_hash).ok_or_else(|| {
            StoreError::Database(format!("stored hash for user {} is not UTF-8", record.id))
        })?;

        Ok(User {
            id: UserId(record.id),
            email,
            password_hash,
        })
    }
}

/// Row shape of `apps`, identical in both schemas.
#[derive(FromRow)]
struct AppRecord {
    id: i32,
    name: String,
    secret: String,
}

impl From<AppRecord> for Application {
    fn from(record: AppRecord) -> Self {
        Application {
            id: AppId(record.id),
            name: record.name,
            secret: record.secret,
        }
    }
}
