//! Library Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::domain::{
    games::models::GameUuid,
    library::models::{LibraryEntry, LibraryEntryUuid, NewLibraryEntry},
    users::models::UserUuid,
};

const FIND_ENTRY_SQL: &str = include_str!("sql/find_entry.sql");
const LIST_ENTRIES_FOR_USER_SQL: &str = include_str!("sql/list_entries_for_user.sql");
const USER_OWNS_GAME_SQL: &str = include_str!("sql/user_owns_game.sql");
const CREATE_ENTRY_SQL: &str = include_str!("sql/create_entry.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgLibraryRepository;

impl PgLibraryRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find_entry(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        entry: LibraryEntryUuid,
    ) -> Result<LibraryEntry, sqlx::Error> {
        query_as::<Postgres, LibraryEntry>(FIND_ENTRY_SQL)
            .bind(entry.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_entries_for_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<LibraryEntry>, sqlx::Error> {
        query_as::<Postgres, LibraryEntry>(LIST_ENTRIES_FOR_USER_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn user_owns_game(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        game: GameUuid,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(USER_OWNS_GAME_SQL)
            .bind(user.into_uuid())
            .bind(game.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_entry(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        entry: &NewLibraryEntry,
    ) -> Result<LibraryEntry, sqlx::Error> {
        query_as::<Postgres, LibraryEntry>(CREATE_ENTRY_SQL)
            .bind(entry.uuid.into_uuid())
            .bind(entry.user_uuid.into_uuid())
            .bind(entry.game_uuid.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for LibraryEntry {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: LibraryEntryUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            user_name: row.try_get("user_name")?,
            game_uuid: GameUuid::from_uuid(row.try_get("game_uuid")?),
            game_title: row.try_get("game_title")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
