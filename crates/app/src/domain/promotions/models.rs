//! Promotion Models

use gamestore::{Discount, Discounted, Schedule};
use jiff::Timestamp;

use crate::{domain::games::models::GameUuid, uuids::TypedUuid};

/// Promotion UUID
pub type PromotionUuid = TypedUuid<Promotion>;

/// Promotion Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Promotion {
    pub uuid: PromotionUuid,
    pub game_uuid: GameUuid,
    pub title: String,
    pub description: String,
    pub discount: Discount,
    pub schedule: Schedule,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Promotion {
    /// Whether the promotion applies at `point_in_time`.
    pub fn is_live_at(&self, point_in_time: Timestamp) -> bool {
        self.schedule.is_live_at(point_in_time)
    }
}

impl Discounted for Promotion {
    fn discount(&self) -> &Discount {
        &self.discount
    }
}

/// New Promotion Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPromotion {
    pub uuid: PromotionUuid,
    pub game_uuid: GameUuid,
    pub title: String,
    pub description: String,
    pub discount: Discount,
    pub schedule: Schedule,
}

/// Promotion Update Model
///
/// Every mutable field is replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionUpdate {
    pub game_uuid: GameUuid,
    pub title: String,
    pub description: String,
    pub discount: Discount,
    pub schedule: Schedule,
}

/// Price reported for a game with no live promotion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum UnpromotedPrice {
    /// Report zero.
    #[default]
    Zero,

    /// Report the game's list price.
    ListPrice,
}
