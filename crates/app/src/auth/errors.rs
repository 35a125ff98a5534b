//! Auth service errors.

use bcrypt::BcryptError;
use sqlx::Error;
use thiserror::Error;

use crate::{auth::TokenError, domain::users::UsersServiceError};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("email is already registered")]
    EmailTaken,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("password must not be empty")]
    InvalidPassword,

    #[error("user error")]
    Users(#[source] UsersServiceError),

    #[error("password hashing error")]
    PasswordHash(#[from] BcryptError),

    #[error("token processing error")]
    Token(#[from] TokenError),
}

impl From<UsersServiceError> for AuthServiceError {
    fn from(error: UsersServiceError) -> Self {
        match error {
            UsersServiceError::EmailTaken => Self::EmailTaken,
            other => Self::Users(other),
        }
    }
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        UsersServiceError::from(error).into()
    }
}
