//! Storefront Domain Concerns

pub mod games;
pub mod library;
pub mod promotions;
pub mod users;
