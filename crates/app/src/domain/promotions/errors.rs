//! Promotions service errors.

use gamestore::{DiscountError, RuleViolation};
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromotionsServiceError {
    #[error("promotion already exists")]
    AlreadyExists,

    #[error("promotion not found")]
    NotFound,

    #[error("game not found")]
    GameNotFound,

    #[error("promotion must start before it ends")]
    InvalidRange,

    #[error("promotion must carry a positive percentage (at most 100) or a positive amount")]
    InvalidDiscount,

    #[error("promotion may not run longer than {max_days} days")]
    DurationExceeded { max_days: i64 },

    #[error("promotion may not start in the past")]
    PastStartDate,

    #[error("game already has {limit} active promotions")]
    PromotionLimitExceeded { limit: usize },

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("discount could not be applied")]
    Discount(#[from] DiscountError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for PromotionsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            _ => Self::Sql(error),
        }
    }
}

impl From<RuleViolation> for PromotionsServiceError {
    fn from(violation: RuleViolation) -> Self {
        match violation {
            RuleViolation::InvalidRange => Self::InvalidRange,
            RuleViolation::InvalidDiscount => Self::InvalidDiscount,
            RuleViolation::DurationExceeded { max_days } => Self::DurationExceeded { max_days },
            RuleViolation::PastStartDate => Self::PastStartDate,
            RuleViolation::PromotionLimitExceeded { limit } => {
                Self::PromotionLimitExceeded { limit }
            }
        }
    }
}
