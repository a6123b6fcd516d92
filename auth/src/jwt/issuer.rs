use chrono::Duration;
use chrono::Utc;

use super::claims::TokenClaims;
use super::errors::JwtError;
use super::handler::JwtHandler;

/// Issues identity tokens signed with the requesting application's secret.
///
/// Holds no key material of its own: every call is keyed by the secret of
/// the application the token is for, so a token minted for one application
/// never verifies under another application's secret. The TTL is shared by
/// all applications.
#[derive(Debug, Clone, Copy)]
pub struct TokenIssuer {
    ttl: Duration,
}

impl TokenIssuer {
    /// Create an issuer whose tokens expire `ttl` after issuance.
    pub fn new(ttl: Duration) -> Self {
        Self { ttl }
    }

    /// Sign a token for `uid`/`email` scoped to `app_id`.
    ///
    /// # Arguments
    /// * `uid` - User identifier
    /// * `email` - User email
    /// * `app_id` - Application the token is issued for
    /// * `app_secret` - That application's signing secret
    ///
    /// # Returns
    /// Compact HS256 JWT with `exp = now + ttl`
    ///
    /// # Errors
    /// * `InvalidKey` - Application secret is unusable
    /// * `EncodingFailed` - Signing failed
    pub fn issue(
        &self,
        uid: i64,
        email: &str,
        app_id: i32,
        app_secret: &[u8],
    ) -> Result<String, JwtError> {
        let handler = JwtHandler::new(app_secret)?;
        let claims = TokenClaims::new(uid, email, app_id, Utc::now(), self.ttl);

        handler.encode(&claims)
    }

    /// Verify a token against an application's secret and return its claims.
    ///
    /// # Errors
    /// * `InvalidKey` - Application secret is unusable
    /// * `TokenExpired` - Token has expired
    /// * `DecodingFailed` - Token is malformed or was not signed with `app_secret`
    pub fn verify(&self, token: &str, app_secret: &[u8]) -> Result<TokenClaims, JwtError> {
        JwtHandler::new(app_secret)?.decode(token)
    }
}
