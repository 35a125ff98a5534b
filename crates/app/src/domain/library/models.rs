//! Library Models

use jiff::Timestamp;

use crate::{
    domain::{games::models::GameUuid, users::models::UserUuid},
    uuids::TypedUuid,
};

/// Library Entry UUID
pub type LibraryEntryUuid = TypedUuid<LibraryEntry>;

/// A game owned by a user, with both names resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryEntry {
    pub uuid: LibraryEntryUuid,
    pub user_uuid: UserUuid,
    pub user_name: String,
    pub game_uuid: GameUuid,
    pub game_title: String,
    pub created_at: Timestamp,
}

/// New Library Entry Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLibraryEntry {
    pub uuid: LibraryEntryUuid,
    pub user_uuid: UserUuid,
    pub game_uuid: GameUuid,
}
