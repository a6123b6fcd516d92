use thiserror::Error;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("email is not valid: {0}")]
    InvalidFormat(String),
}

/// Error for Password policy failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("password too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },
}

/// Error for UserId validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("user id is required")]
    Missing,
}

/// Error for AppId validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AppIdError {
    #[error("app id is required")]
    Missing,
}

/// Caller input rejected before any storage access.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error(transparent)]
    Email(#[from] EmailError),

    #[error(transparent)]
    Password(#[from] PasswordPolicyError),

    #[error(transparent)]
    UserId(#[from] UserIdError),

    #[error(transparent)]
    AppId(#[from] AppIdError),
}

/// Backend-agnostic storage outcomes.
///
/// Every credential store adapter translates its engine's failure signals
/// (constraint violations, empty result sets) into these variants.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("user already exists")]
    UserExists,

    #[error("user not found")]
    UserNotFound,

    #[error("app not found")]
    AppNotFound,

    #[error("database error: {0}")]
    Database(String),
}

/// Top-level error for all authentication operations
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("invalid app id")]
    InvalidAppId,

    #[error("user already exists")]
    UserExists,

    #[error("user not found")]
    UserNotFound,

    #[error("app not found")]
    AppNotFound,

    #[error("operation timed out")]
    Timeout,

    // Cause is for operators only; transports never forward it.
    #[error("internal error: {0}")]
    Internal(String),
}
