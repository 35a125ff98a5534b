//! Promotion Rules

use jiff::Timestamp;
use thiserror::Error;

use crate::{discounts::Discount, schedule::Schedule, schedule::utc_date};

/// Longest allowed promotion, in whole days.
pub const MAX_DURATION_DAYS: i64 = 30;

/// Most promotions that may be live for one game at the same instant.
pub const MAX_ACTIVE_PER_GAME: usize = 3;

/// A broken promotion rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RuleViolation {
    /// The start is not strictly before the end.
    #[error("promotion must start before it ends")]
    InvalidRange,

    /// No positive discount, or a percentage outside `[0, 100]` or with more
    /// than two decimal places.
    #[error("promotion must carry a positive percentage (at most 100) or a positive amount")]
    InvalidDiscount,

    /// Longer than the allowed number of whole days.
    #[error("promotion may not run longer than {max_days} days")]
    DurationExceeded {
        /// Allowed maximum.
        max_days: i64,
    },

    /// Starts on a calendar date before today.
    #[error("promotion may not start in the past")]
    PastStartDate,

    /// The game already has the maximum number of live promotions.
    #[error("game already has {limit} active promotions")]
    PromotionLimitExceeded {
        /// Allowed maximum.
        limit: usize,
    },
}

/// Limits applied when creating or updating promotions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromotionRules {
    /// Longest allowed promotion, in whole days.
    pub max_duration_days: i64,

    /// Most live promotions per game.
    pub max_active_per_game: usize,
}

impl Default for PromotionRules {
    fn default() -> Self {
        Self {
            max_duration_days: MAX_DURATION_DAYS,
            max_active_per_game: MAX_ACTIVE_PER_GAME,
        }
    }
}

impl PromotionRules {
    /// Start must be strictly before end.
    ///
    /// # Errors
    ///
    /// Returns [`RuleViolation::InvalidRange`] otherwise.
    pub fn check_range(&self, schedule: &Schedule) -> Result<(), RuleViolation> {
        if schedule.is_ordered() {
            Ok(())
        } else {
            Err(RuleViolation::InvalidRange)
        }
    }

    /// At least one mechanism must be positive, and the percentage must lie
    /// in `[0, 100]` with at most two decimal places.
    ///
    /// # Errors
    ///
    /// Returns [`RuleViolation::InvalidDiscount`] otherwise.
    pub fn check_discount(&self, discount: &Discount) -> Result<(), RuleViolation> {
        if discount.has_positive_mechanism()
            && discount.percentage_in_range()
            && discount.percentage_fits_scale()
        {
            Ok(())
        } else {
            Err(RuleViolation::InvalidDiscount)
        }
    }

    /// Whole days between start and end must not exceed the maximum.
    ///
    /// # Errors
    ///
    /// Returns [`RuleViolation::DurationExceeded`] otherwise.
    pub fn check_duration(&self, schedule: &Schedule) -> Result<(), RuleViolation> {
        if schedule.whole_days() > self.max_duration_days {
            return Err(RuleViolation::DurationExceeded {
                max_days: self.max_duration_days,
            });
        }

        Ok(())
    }

    /// The UTC start date must not precede the UTC date of `now`.
    ///
    /// Only the calendar date is compared: any time on today's date passes.
    ///
    /// # Errors
    ///
    /// Returns [`RuleViolation::PastStartDate`] otherwise.
    pub fn check_start_date(&self, schedule: &Schedule, now: Timestamp) -> Result<(), RuleViolation> {
        if schedule.start_date() < utc_date(now) {
            return Err(RuleViolation::PastStartDate);
        }

        Ok(())
    }

    /// `live_count` other promotions are live for the game.
    ///
    /// # Errors
    ///
    /// Returns [`RuleViolation::PromotionLimitExceeded`] when the game is
    /// already at the limit.
    pub fn check_active_limit(&self, live_count: usize) -> Result<(), RuleViolation> {
        if live_count >= self.max_active_per_game {
            return Err(RuleViolation::PromotionLimitExceeded {
                limit: self.max_active_per_game,
            });
        }

        Ok(())
    }

    /// Discount, duration and start-date checks, in that order.
    ///
    /// The range check and the per-game limit need context (game existence,
    /// a live count) and are run by the caller around this.
    ///
    /// # Errors
    ///
    /// Returns the first [`RuleViolation`] found.
    pub fn check_terms(
        &self,
        discount: &Discount,
        schedule: &Schedule,
        now: Timestamp,
    ) -> Result<(), RuleViolation> {
        self.check_discount(discount)?;
        self.check_duration(schedule)?;
        self.check_start_date(schedule, now)?;

        Ok(())
    }
}
