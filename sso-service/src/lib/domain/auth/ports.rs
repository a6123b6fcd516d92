use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::StoreError;
use crate::domain::auth::models::AppId;
use crate::domain::auth::models::Application;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::PasswordHash;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;

/// Port for authentication domain service operations.
///
/// Inputs arrive raw from the transports and are validated inside the
/// service before any storage access.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Validate credentials and issue a token scoped to `app_id`.
    ///
    /// # Arguments
    /// * `email` - Account email
    /// * `password` - Plaintext password
    /// * `app_id` - Application requesting the token
    ///
    /// # Returns
    /// Signed token
    ///
    /// # Errors
    /// * `InvalidInput` - Malformed email, short password or zero app id
    /// * `InvalidCredentials` - Unknown email or wrong password (indistinguishable)
    /// * `InvalidAppId` - Application is not provisioned
    /// * `Timeout` - Storage did not answer within the deadline
    /// * `Internal` - Storage or signing failure
    async fn login(&self, email: &str, password: &str, app_id: i32) -> Result<String, AuthError>;

    /// Register a new account.
    ///
    /// # Returns
    /// Identifier assigned to the new user
    ///
    /// # Errors
    /// * `InvalidInput` - Malformed email or short password
    /// * `UserExists` - Email is already registered
    /// * `Timeout` - Storage did not answer within the deadline
    /// * `Internal` - Hashing or storage failure
    async fn register(&self, email: &str, password: &str) -> Result<UserId, AuthError>;

    /// Report whether the user holds the admin privilege.
    ///
    /// # Errors
    /// * `InvalidInput` - Zero user id
    /// * `UserNotFound` - No such user
    /// * `Timeout` - Storage did not answer within the deadline
    /// * `Internal` - Storage failure
    async fn is_admin(&self, user_id: i64) -> Result<bool, AuthError>;
}

/// User persistence and lookup.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Returns
    /// Identifier assigned by the store
    ///
    /// # Errors
    /// * `UserExists` - Email uniqueness violated
    /// * `Database` - Any other storage failure
    async fn save_user(
        &self,
        email: &EmailAddress,
        password_hash: &PasswordHash,
    ) -> Result<UserId, StoreError>;

    /// Retrieve user by email, matched exactly.
    ///
    /// # Errors
    /// * `UserNotFound` - No user with this email
    /// * `Database` - Any other storage failure
    async fn find_user_by_email(&self, email: &EmailAddress) -> Result<User, StoreError>;
}

/// Application lookup.
#[async_trait]
pub trait AppRepository: Send + Sync + 'static {
    /// Retrieve a provisioned application with its signing secret.
    ///
    /// # Errors
    /// * `AppNotFound` - Application is not provisioned
    /// * `Database` - Any other storage failure
    async fn find_app(&self, id: AppId) -> Result<Application, StoreError>;
}

/// Admin privilege lookup.
#[async_trait]
pub trait AdminRepository: Send + Sync + 'static {
    /// Whether an existing user is an admin.
    ///
    /// A user without an admin record is not an admin.
    ///
    /// # Errors
    /// * `UserNotFound` - User does not exist
    /// * `Database` - Any other storage failure
    async fn is_admin(&self, user_id: UserId) -> Result<bool, StoreError>;
}

/// Everything the authentication service needs from storage.
///
/// Implemented automatically for any type providing all three capabilities.
pub trait CredentialStore: UserRepository + AppRepository + AdminRepository {}

impl<T> CredentialStore for T where T: UserRepository + AppRepository + AdminRepository {}
