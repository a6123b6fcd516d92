use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    /// Empty or otherwise unusable application secret.
    #[error("signing secret is unusable: {0}")]
    InvalidKey(String),

    #[error("could not sign token: {0}")]
    EncodingFailed(String),

    /// Bad signature, wrong secret or malformed token.
    #[error("token rejected: {0}")]
    DecodingFailed(String),

    #[error("token has expired")]
    TokenExpired,
}
