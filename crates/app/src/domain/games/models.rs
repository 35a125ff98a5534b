//! Game Models

use jiff::Timestamp;

use crate::{domain::promotions::models::Promotion, uuids::TypedUuid};

/// Game UUID
pub type GameUuid = TypedUuid<Game>;

/// Game Model
#[derive(Debug, Clone)]
pub struct Game {
    pub uuid: GameUuid,
    pub title: String,

    /// List price in minor units.
    pub price: u64,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Game Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewGame {
    pub uuid: GameUuid,
    pub title: String,
    pub price: u64,
}

/// Game Update Model
#[derive(Debug, Clone, PartialEq)]
pub struct GameUpdate {
    pub title: String,
    pub price: u64,
}

/// A game together with the promotions live at the requested instant.
#[derive(Debug, Clone)]
pub struct GameWithPromotions {
    pub game: Game,
    pub promotions: Vec<Promotion>,
}
