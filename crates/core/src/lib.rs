//! Gamestore pricing core.
//!
//! Pure promotion rules for the storefront: discount arithmetic, promotion
//! schedules, validation rules and best-offer selection. Nothing in this crate
//! performs I/O; callers supply the evaluation instant explicitly.
//!
//! Prices are expressed in minor currency units (`u64`).

pub mod discounts;
pub mod rules;
pub mod schedule;
pub mod selection;

pub use discounts::{Discount, DiscountError};
pub use rules::{PromotionRules, RuleViolation};
pub use schedule::Schedule;
pub use selection::{Discounted, Offer, best_offer};
