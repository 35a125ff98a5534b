//! Games Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::{
    database::{try_get_amount, try_i64_from_u64},
    domain::games::models::{Game, GameUuid},
};

const LIST_GAMES_SQL: &str = include_str!("sql/list_games.sql");
const FIND_GAME_SQL: &str = include_str!("sql/find_game.sql");
const LOCK_GAME_SQL: &str = include_str!("sql/lock_game.sql");
const GAME_EXISTS_SQL: &str = include_str!("sql/game_exists.sql");
const CREATE_GAME_SQL: &str = include_str!("sql/create_game.sql");
const UPDATE_GAME_SQL: &str = include_str!("sql/update_game.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgGamesRepository;

impl PgGamesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_games(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Game>, sqlx::Error> {
        query_as::<Postgres, Game>(LIST_GAMES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn find_game(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        game: GameUuid,
    ) -> Result<Option<Game>, sqlx::Error> {
        query_as::<Postgres, Game>(FIND_GAME_SQL)
            .bind(game.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Fetch the game and hold a row lock on it until the transaction ends.
    pub(crate) async fn lock_game(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        game: GameUuid,
    ) -> Result<Option<Game>, sqlx::Error> {
        query_as::<Postgres, Game>(LOCK_GAME_SQL)
            .bind(game.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn game_exists(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        game: GameUuid,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(GAME_EXISTS_SQL)
            .bind(game.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_game(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        game: GameUuid,
        title: &str,
        price: u64,
    ) -> Result<Game, sqlx::Error> {
        query_as::<Postgres, Game>(CREATE_GAME_SQL)
            .bind(game.into_uuid())
            .bind(title)
            .bind(try_i64_from_u64(price, "price")?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_game(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        game: GameUuid,
        title: &str,
        price: u64,
    ) -> Result<Game, sqlx::Error> {
        query_as::<Postgres, Game>(UPDATE_GAME_SQL)
            .bind(game.into_uuid())
            .bind(title)
            .bind(try_i64_from_u64(price, "price")?)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Game {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: GameUuid::from_uuid(row.try_get("uuid")?),
            title: row.try_get("title")?,
            price: try_get_amount(row, "price")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
