//! Games service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        games::{
            errors::GamesServiceError,
            models::{Game, GameUpdate, GameUuid, GameWithPromotions, NewGame},
            repository::PgGamesRepository,
        },
        promotions::repository::PgPromotionsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgGamesService {
    db: Db,
    repository: PgGamesRepository,
    promotions: PgPromotionsRepository,
}

impl PgGamesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgGamesRepository::new(),
            promotions: PgPromotionsRepository::new(),
        }
    }
}

/// Trimmed title, or `InvalidTitle` when nothing is left.
fn validated_title(title: &str) -> Result<&str, GamesServiceError> {
    let title = title.trim();

    if title.is_empty() {
        return Err(GamesServiceError::InvalidTitle);
    }

    Ok(title)
}

fn validated_price(price: u64) -> Result<u64, GamesServiceError> {
    if price == 0 {
        return Err(GamesServiceError::InvalidPrice);
    }

    Ok(price)
}

#[async_trait]
impl GamesService for PgGamesService {
    async fn list_games(&self) -> Result<Vec<Game>, GamesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let games = self.repository.list_games(&mut tx).await?;

        tx.commit().await?;

        Ok(games)
    }

    async fn get_game(&self, game: GameUuid) -> Result<Game, GamesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let game = self
            .repository
            .find_game(&mut tx, game)
            .await?
            .ok_or(GamesServiceError::NotFound)?;

        tx.commit().await?;

        Ok(game)
    }

    async fn game_exists(&self, game: GameUuid) -> Result<bool, GamesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let exists = self.repository.game_exists(&mut tx, game).await?;

        tx.commit().await?;

        Ok(exists)
    }

    #[tracing::instrument(
        name = "games.service.create_game",
        skip(self, game),
        fields(game_uuid = %game.uuid),
        err
    )]
    async fn create_game(&self, game: NewGame) -> Result<Game, GamesServiceError> {
        let title = validated_title(&game.title)?;
        let price = validated_price(game.price)?;

        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .repository
            .create_game(&mut tx, game.uuid, title, price)
            .await?;

        tx.commit().await?;

        info!(game_uuid = %created.uuid, price = created.price, "created game");

        Ok(created)
    }

    #[tracing::instrument(
        name = "games.service.update_game",
        skip(self, update),
        fields(game_uuid = %game),
        err
    )]
    async fn update_game(
        &self,
        game: GameUuid,
        update: GameUpdate,
    ) -> Result<Game, GamesServiceError> {
        let title = validated_title(&update.title)?;
        let price = validated_price(update.price)?;

        let mut tx = self.db.begin_transaction().await?;

        let updated = self
            .repository
            .update_game(&mut tx, game, title, price)
            .await?;

        tx.commit().await?;

        info!(game_uuid = %updated.uuid, price = updated.price, "updated game");

        Ok(updated)
    }

    async fn get_game_with_promotions(
        &self,
        game: GameUuid,
        point_in_time: Timestamp,
    ) -> Result<GameWithPromotions, GamesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let game = self
            .repository
            .find_game(&mut tx, game)
            .await?
            .ok_or(GamesServiceError::NotFound)?;

        let promotions = self
            .promotions
            .list_active_promotions_for_game(&mut tx, game.uuid, point_in_time)
            .await?;

        tx.commit().await?;

        Ok(GameWithPromotions { game, promotions })
    }
}

#[automock]
#[async_trait]
pub trait GamesService: Send + Sync {
    /// Retrieves all games, ordered by title.
    async fn list_games(&self) -> Result<Vec<Game>, GamesServiceError>;

    /// Retrieve a single game.
    async fn get_game(&self, game: GameUuid) -> Result<Game, GamesServiceError>;

    /// Whether a game with the given UUID exists.
    async fn game_exists(&self, game: GameUuid) -> Result<bool, GamesServiceError>;

    /// Creates a new game. The title must not be blank and the price must be positive.
    async fn create_game(&self, game: NewGame) -> Result<Game, GamesServiceError>;

    /// Replaces a game's title and price.
    async fn update_game(
        &self,
        game: GameUuid,
        update: GameUpdate,
    ) -> Result<Game, GamesServiceError>;

    /// Retrieve a game together with its promotions live at `point_in_time`.
    async fn get_game_with_promotions(
        &self,
        game: GameUuid,
        point_in_time: Timestamp,
    ) -> Result<GameWithPromotions, GamesServiceError>;
}
