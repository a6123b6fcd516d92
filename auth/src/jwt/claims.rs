use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Identity claims carried by an issued token.
///
/// Binds a user to the application the token was requested for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// User identifier
    pub uid: i64,

    /// User email as stored
    pub email: String,

    /// Application the token was issued for
    pub app_id: i32,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl TokenClaims {
    /// Build claims issued at `issued_at` and valid for `ttl`.
    ///
    /// # Arguments
    /// * `uid` - User identifier
    /// * `email` - User email
    /// * `app_id` - Requesting application
    /// * `issued_at` - Issuance instant
    /// * `ttl` - Time-to-live added to `issued_at` to get `exp`
    pub fn new(
        uid: i64,
        email: impl Into<String>,
        app_id: i32,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            uid,
            email: email.into(),
            app_id,
            exp: (issued_at + ttl).timestamp(),
            iat: issued_at.timestamp(),
        }
    }
}
