//! Best Offer Selection

use crate::discounts::{Discount, DiscountError};

/// Something carrying a discount that can be priced against a game.
pub trait Discounted {
    /// The discount to apply.
    fn discount(&self) -> &Discount;
}

impl Discounted for Discount {
    fn discount(&self) -> &Discount {
        self
    }
}

/// A candidate together with the price it yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offer<T> {
    /// The winning candidate.
    pub candidate: T,

    /// Price after applying the candidate's discount.
    pub price: u64,
}

/// Pick the candidate yielding the lowest price for `base_price`.
///
/// Ties keep the earliest candidate in iteration order, so callers that need
/// a deterministic winner should supply candidates in a stable order.
/// Returns `None` when there are no candidates.
///
/// # Errors
///
/// Returns a [`DiscountError`] when any candidate's discount cannot be
/// applied to `base_price`.
pub fn best_offer<T, I>(candidates: I, base_price: u64) -> Result<Option<Offer<T>>, DiscountError>
where
    T: Discounted,
    I: IntoIterator<Item = T>,
{
    candidates
        .into_iter()
        .try_fold(None, |best: Option<Offer<T>>, candidate| {
            let price = candidate.discount().discounted_price(base_price)?;

            Ok(match best {
                Some(current) if current.price <= price => Some(current),
                _ => Some(Offer { candidate, price }),
            })
        })
}
