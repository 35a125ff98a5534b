//! Library service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::promotions::PromotionsServiceError;

#[derive(Debug, Error)]
pub enum LibraryServiceError {
    #[error("user not found")]
    UserNotFound,

    #[error("game not found")]
    GameNotFound,

    #[error("user already owns this game")]
    AlreadyOwned,

    #[error("purchase price must be greater than zero")]
    InvalidPrice,

    #[error("library entry not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("pricing error")]
    Pricing(#[source] PromotionsServiceError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for LibraryServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            // Only (user, game) is unique besides the primary key.
            Some(ErrorKind::UniqueViolation) => Self::AlreadyOwned,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            _ => Self::Sql(error),
        }
    }
}

impl From<PromotionsServiceError> for LibraryServiceError {
    fn from(error: PromotionsServiceError) -> Self {
        Self::Pricing(error)
    }
}
