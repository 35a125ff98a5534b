//! Discounts

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use thiserror::Error;

/// Largest percentage a discount may take off.
pub const MAX_PERCENTAGE: Decimal = Decimal::ONE_HUNDRED;

/// Decimal places a percentage may carry.
pub const PERCENTAGE_SCALE: u32 = 2;

/// Errors raised while applying a discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DiscountError {
    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,
}

/// The reduction in minor units that `percent` takes off `minor`, rounded
/// half away from zero.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] when the calculation
/// overflows or the result does not fit in a `u64`.
pub fn percent_of_minor(percent: &Percentage, minor: u64) -> Result<u64, DiscountError> {
    ((*percent) * Decimal::ONE)
        .checked_mul(Decimal::from(minor))
        .ok_or(DiscountError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .ok_or(DiscountError::PercentConversion)
}

/// The discount mechanisms carried by a promotion.
///
/// A promotion may specify a percentage, a fixed amount, or both. When both
/// are present the larger absolute reduction wins; the two are never summed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Discount {
    /// Percentage points taken off the base price, in `[0, 100]`. Zero means
    /// the percentage mechanism is unused.
    pub percentage: Decimal,

    /// Fixed amount in minor units taken off the base price.
    pub amount: Option<u64>,
}

impl Discount {
    /// A percentage-only discount.
    #[must_use]
    pub const fn percentage_off(percentage: Decimal) -> Self {
        Self {
            percentage,
            amount: None,
        }
    }

    /// A fixed-amount-only discount.
    #[must_use]
    pub const fn amount_off(amount: u64) -> Self {
        Self {
            percentage: Decimal::ZERO,
            amount: Some(amount),
        }
    }

    /// A discount carrying both mechanisms.
    #[must_use]
    pub const fn combined(percentage: Decimal, amount: u64) -> Self {
        Self {
            percentage,
            amount: Some(amount),
        }
    }

    /// Whether at least one mechanism would reduce a price.
    pub fn has_positive_mechanism(&self) -> bool {
        self.percentage > Decimal::ZERO || self.amount.is_some_and(|amount| amount > 0)
    }

    /// Whether the percentage lies within `[0, 100]`.
    pub fn percentage_in_range(&self) -> bool {
        self.percentage >= Decimal::ZERO && self.percentage <= MAX_PERCENTAGE
    }

    /// Whether the percentage carries at most [`PERCENTAGE_SCALE`] decimal
    /// places once trailing zeros are dropped.
    pub fn percentage_fits_scale(&self) -> bool {
        self.percentage.normalize().scale() <= PERCENTAGE_SCALE
    }

    /// The absolute reduction this discount applies to `base`.
    ///
    /// The larger of the percentage reduction and the fixed amount. Never
    /// exceeds `base`.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::PercentConversion`] when the percentage
    /// reduction cannot be computed.
    pub fn reduction(&self, base: u64) -> Result<u64, DiscountError> {
        let by_percentage = match self.fraction()? {
            Some(percent) => percent_of_minor(&percent, base)?,
            None => 0,
        };
        let by_amount = self.amount.unwrap_or(0);

        Ok(by_percentage.max(by_amount).min(base))
    }

    /// The price left after applying this discount to `base`, clamped at zero.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::PercentConversion`] when the percentage
    /// reduction cannot be computed.
    pub fn discounted_price(&self, base: u64) -> Result<u64, DiscountError> {
        Ok(base.saturating_sub(self.reduction(base)?))
    }

    /// The percentage as a fraction of one, capped at 100%. `None` when the
    /// percentage mechanism is unused.
    fn fraction(&self) -> Result<Option<Percentage>, DiscountError> {
        if self.percentage <= Decimal::ZERO {
            return Ok(None);
        }

        self.percentage
            .min(MAX_PERCENTAGE)
            .checked_div(Decimal::ONE_HUNDRED)
            .map(|fraction| Some(Percentage::from(fraction)))
            .ok_or(DiscountError::PercentConversion)
    }
}
