use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenIssuer;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::StoreError;
use crate::domain::auth::errors::ValidationError;
use crate::domain::auth::models::AppId;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::Password;
use crate::domain::auth::models::PasswordHash;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::CredentialStore;

/// Domain service implementation for authentication operations.
///
/// Holds no mutable state: every call is answered from its inputs and the
/// store's current content, so one instance serves concurrent calls.
pub struct AuthService<S>
where
    S: CredentialStore,
{
    store: Arc<S>,
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
    operation_timeout: Duration,
}

impl<S> AuthService<S>
where
    S: CredentialStore,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Credential persistence implementation
    /// * `password_hasher` - Hasher carrying the deployment's fixed cost
    /// * `token_issuer` - Token signer carrying the configured TTL
    /// * `operation_timeout` - Deadline for each storage call
    pub fn new(
        store: Arc<S>,
        password_hasher: PasswordHasher,
        token_issuer: TokenIssuer,
        operation_timeout: Duration,
    ) -> Self {
        Self {
            store,
            password_hasher,
            token_issuer,
            operation_timeout,
        }
    }

    // Dropping the storage future on expiry aborts the in-flight call.
    async fn within_deadline<T>(
        &self,
        operation: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<Result<T, StoreError>, AuthError> {
        tokio::time::timeout(self.operation_timeout, operation)
            .await
            .map_err(|_| {
                tracing::error!(
                    timeout_ms = self.operation_timeout.as_millis() as u64,
                    "Storage call exceeded deadline"
                );
                AuthError::Timeout
            })
    }
}

fn internal(context: &str, cause: impl Display) -> AuthError {
    tracing::error!(error = %cause, "{}", context);
    AuthError::Internal(format!("{}: {}", context, cause))
}

#[async_trait]
impl<S> AuthServicePort for AuthService<S>
where
    S: CredentialStore,
{
    #[tracing::instrument(skip_all, fields(app_id = app_id))]
    async fn login(&self, email: &str, password: &str, app_id: i32) -> Result<String, AuthError> {
        let email = EmailAddress::new(email.to_string()).map_err(ValidationError::from)?;
        let password = Password::new(password.to_string()).map_err(ValidationError::from)?;
        let app_id = AppId::new(app_id).map_err(ValidationError::from)?;

        tracing::info!(email = %email, "Attempting login");

        // Unknown email and wrong password collapse into one outcome here.
        let user = match self
            .within_deadline(self.store.find_user_by_email(&email))
            .await?
        {
            Ok(user) => Some(user),
            Err(StoreError::UserNotFound) => None,
            Err(e) => return Err(internal("Failed to look up user", e)),
        };

        let user = match user {
            Some(user) => {
                let matched = self
                    .password_hasher
                    .verify(password.expose(), user.password_hash.as_str())
                    .map_err(|e| internal("Failed to verify password", e))?;
                matched.then_some(user)
            }
            None => {
                self.password_hasher.verify_decoy(password.expose());
                None
            }
        };

        let Some(user) = user else {
            tracing::warn!(email = %email, "Login rejected: invalid credentials");
            return Err(AuthError::InvalidCredentials);
        };

        let app = match self.within_deadline(self.store.find_app(app_id)).await? {
            Ok(app) => app,
            Err(StoreError::AppNotFound) => {
                tracing::warn!(app_id = %app_id, "Login rejected: app not found");
                return Err(AuthError::InvalidAppId);
            }
            Err(e) => return Err(internal("Failed to look up app", e)),
        };

        let token = self
            .token_issuer
            .issue(user.id.0, user.email.as_str(), app.id.0, app.secret.as_bytes())
            .map_err(|e| internal("Failed to issue token", e))?;

        tracing::info!(user_id = %user.id, app_id = %app.id, "User logged in");

        Ok(token)
    }

    #[tracing::instrument(skip_all)]
    async fn register(&self, email: &str, password: &str) -> Result<UserId, AuthError> {
        let email = EmailAddress::new(email.to_string()).map_err(ValidationError::from)?;
        let password = Password::new(password.to_string()).map_err(ValidationError::from)?;

        tracing::info!(email = %email, "Registering user");

        let password_hash = self
            .password_hasher
            .hash(password.expose())
            .map(PasswordHash::new)
            .map_err(|e| internal("Failed to hash password", e))?;

        match self
            .within_deadline(self.store.save_user(&email, &password_hash))
            .await?
        {
            Ok(user_id) => {
                tracing::info!(user_id = %user_id, "User registered");
                Ok(user_id)
            }
            Err(StoreError::UserExists) => {
                tracing::warn!(email = %email, "Registration rejected: user already exists");
                Err(AuthError::UserExists)
            }
            Err(e) => Err(internal("Failed to save user", e)),
        }
    }

    #[tracing::instrument(skip_all, fields(user_id = user_id))]
    async fn is_admin(&self, user_id: i64) -> Result<bool, AuthError> {
        let user_id = UserId::new(user_id).map_err(ValidationError::from)?;

        match self.within_deadline(self.store.is_admin(user_id)).await? {
            Ok(is_admin) => {
                tracing::info!(is_admin, "Checked admin privilege");
                Ok(is_admin)
            }
            Err(StoreError::UserNotFound) => {
                tracing::warn!("Admin check rejected: user not found");
                Err(AuthError::UserNotFound)
            }
            Err(e) => Err(internal("Failed to check admin privilege", e)),
        }
    }
}
