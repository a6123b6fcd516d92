use tonic::Status;

use crate::domain::auth::errors::AuthError;

pub mod is_admin;
pub mod login;
pub mod register;

impl From<AuthError> for Status {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidInput(e) => Status::invalid_argument(e.to_string()),
            AuthError::InvalidCredentials => Status::unauthenticated("invalid email or password"),
            AuthError::InvalidAppId => Status::invalid_argument("invalid app id"),
            AuthError::UserExists => Status::already_exists("user already exists"),
            AuthError::UserNotFound => Status::not_found("user not found"),
            AuthError::AppNotFound => Status::not_found("app not found"),
            AuthError::Timeout => Status::deadline_exceeded("deadline exceeded"),
            // Cause was logged where it occurred.
            AuthError::Internal(_) => Status::internal("internal error"),
        }
    }
}
