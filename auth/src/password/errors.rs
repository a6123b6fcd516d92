use thiserror::Error;

/// Failures raised while hashing or checking passwords.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("argon2 parameters rejected: {0}")]
    InvalidCost(String),

    #[error("could not hash password: {0}")]
    HashingFailed(String),

    /// The stored value is not a PHC string; a wrong password is `Ok(false)`, not this.
    #[error("stored password hash is malformed: {0}")]
    MalformedHash(String),
}
