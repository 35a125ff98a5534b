//! Promotions Service

use async_trait::async_trait;
use gamestore::{Discount, Offer, PromotionRules, Schedule, best_offer};
use jiff::Timestamp;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::{Span, info};

use crate::{
    database::Db,
    domain::{
        games::{
            models::{Game, GameUuid},
            repository::PgGamesRepository,
        },
        promotions::{
            PromotionsServiceError,
            models::{NewPromotion, Promotion, PromotionUpdate, PromotionUuid, UnpromotedPrice},
            repository::PgPromotionsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgPromotionsService {
    db: Db,
    promotions: PgPromotionsRepository,
    games: PgGamesRepository,
    rules: PromotionRules,
    unpromoted_price: UnpromotedPrice,
}

impl PgPromotionsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            promotions: PgPromotionsRepository::new(),
            games: PgGamesRepository::new(),
            rules: PromotionRules::default(),
            unpromoted_price: UnpromotedPrice::default(),
        }
    }

    /// Choose what [`PromotionsService::get_discounted_price`] reports for a
    /// game with no live promotion.
    #[must_use]
    pub fn with_unpromoted_price(mut self, unpromoted_price: UnpromotedPrice) -> Self {
        self.unpromoted_price = unpromoted_price;
        self
    }

    /// Validate a promotion about to be written for `game_uuid`.
    ///
    /// Locks the game row so concurrent mutations for the same game queue
    /// behind this transaction before the live count is taken.
    async fn validate(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        game_uuid: GameUuid,
        discount: &Discount,
        schedule: &Schedule,
        excluding: Option<PromotionUuid>,
        point_in_time: Timestamp,
    ) -> Result<(), PromotionsServiceError> {
        self.rules.check_range(schedule)?;

        self.games
            .lock_game(tx, game_uuid)
            .await?
            .ok_or(PromotionsServiceError::GameNotFound)?;

        self.rules.check_terms(discount, schedule, point_in_time)?;

        let active_count = self
            .promotions
            .count_active_promotions_for_game(tx, game_uuid, point_in_time, excluding)
            .await?;

        Span::current().record("active_count", active_count);

        self.rules.check_active_limit(active_count)?;

        Ok(())
    }

    /// The game and its cheapest live offer, or `None` when the game is unknown.
    async fn best_offer_for_game(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        game: GameUuid,
        point_in_time: Timestamp,
    ) -> Result<Option<(Game, Option<Offer<Promotion>>)>, PromotionsServiceError> {
        let Some(game) = self.games.find_game(tx, game).await? else {
            return Ok(None);
        };

        // Ordered by uuid, so ties keep the oldest promotion.
        let promotions = self
            .promotions
            .list_active_promotions_for_game(tx, game.uuid, point_in_time)
            .await?;

        let offer = best_offer(promotions, game.price)?;

        Ok(Some((game, offer)))
    }
}

#[async_trait]
impl PromotionsService for PgPromotionsService {
    async fn get_promotion(
        &self,
        promotion: PromotionUuid,
    ) -> Result<Promotion, PromotionsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let promotion = self.promotions.find_promotion(&mut tx, promotion).await?;

        tx.commit().await?;

        Ok(promotion)
    }

    async fn list_active_promotions(
        &self,
        point_in_time: Timestamp,
    ) -> Result<Vec<Promotion>, PromotionsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let promotions = self
            .promotions
            .list_active_promotions(&mut tx, point_in_time)
            .await?;

        tx.commit().await?;

        Ok(promotions)
    }

    async fn list_active_promotions_for_game(
        &self,
        game: GameUuid,
        point_in_time: Timestamp,
    ) -> Result<Vec<Promotion>, PromotionsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let promotions = self
            .promotions
            .list_active_promotions_for_game(&mut tx, game, point_in_time)
            .await?;

        tx.commit().await?;

        Ok(promotions)
    }

    #[tracing::instrument(
        name = "promotions.service.create_promotion",
        skip(self, promotion),
        fields(
            promotion_uuid = %promotion.uuid,
            game_uuid = %promotion.game_uuid,
            active_count = tracing::field::Empty
        ),
        err
    )]
    async fn create_promotion(
        &self,
        promotion: NewPromotion,
        point_in_time: Timestamp,
    ) -> Result<Promotion, PromotionsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.validate(
            &mut tx,
            promotion.game_uuid,
            &promotion.discount,
            &promotion.schedule,
            None,
            point_in_time,
        )
        .await?;

        let created = self.promotions.create_promotion(&mut tx, &promotion).await?;

        tx.commit().await?;

        info!(promotion_uuid = %created.uuid, game_uuid = %created.game_uuid, "created promotion");

        Ok(created)
    }

    #[tracing::instrument(
        name = "promotions.service.update_promotion",
        skip(self, update),
        fields(
            promotion_uuid = %uuid,
            game_uuid = %update.game_uuid,
            active_count = tracing::field::Empty
        ),
        err
    )]
    async fn update_promotion(
        &self,
        uuid: PromotionUuid,
        update: PromotionUpdate,
        point_in_time: Timestamp,
    ) -> Result<Promotion, PromotionsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.promotions.find_promotion(&mut tx, uuid).await?;

        self.validate(
            &mut tx,
            update.game_uuid,
            &update.discount,
            &update.schedule,
            Some(uuid),
            point_in_time,
        )
        .await?;

        let updated = self
            .promotions
            .update_promotion(&mut tx, uuid, &update)
            .await?;

        tx.commit().await?;

        info!(promotion_uuid = %uuid, "updated promotion");

        Ok(updated)
    }

    #[tracing::instrument(
        name = "promotions.service.delete_promotion",
        skip(self),
        fields(promotion_uuid = %uuid),
        err
    )]
    async fn delete_promotion(&self, uuid: PromotionUuid) -> Result<(), PromotionsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.promotions.delete_promotion(&mut tx, uuid).await?;

        if rows_affected == 0 {
            return Err(PromotionsServiceError::NotFound);
        }

        tx.commit().await?;

        info!(promotion_uuid = %uuid, "deleted promotion");

        Ok(())
    }

    async fn get_best_promotion_for_game(
        &self,
        game: GameUuid,
        point_in_time: Timestamp,
    ) -> Result<Option<Promotion>, PromotionsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let best = self
            .best_offer_for_game(&mut tx, game, point_in_time)
            .await?
            .and_then(|(_, offer)| offer)
            .map(|offer| offer.candidate);

        tx.commit().await?;

        Ok(best)
    }

    async fn get_discounted_price(
        &self,
        game: GameUuid,
        point_in_time: Timestamp,
    ) -> Result<u64, PromotionsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let best = self.best_offer_for_game(&mut tx, game, point_in_time).await?;

        tx.commit().await?;

        let price = match best {
            None => 0,
            Some((_, Some(offer))) => offer.price,
            Some((game, None)) => match self.unpromoted_price {
                UnpromotedPrice::Zero => 0,
                UnpromotedPrice::ListPrice => game.price,
            },
        };

        Ok(price)
    }
}

#[automock]
#[async_trait]
pub trait PromotionsService: Send + Sync {
    /// Retrieve a single promotion.
    async fn get_promotion(
        &self,
        promotion: PromotionUuid,
    ) -> Result<Promotion, PromotionsServiceError>;

    /// Promotions live at `point_in_time`, ordered by UUID.
    async fn list_active_promotions(
        &self,
        point_in_time: Timestamp,
    ) -> Result<Vec<Promotion>, PromotionsServiceError>;

    /// Promotions for one game live at `point_in_time`, ordered by UUID.
    async fn list_active_promotions_for_game(
        &self,
        game: GameUuid,
        point_in_time: Timestamp,
    ) -> Result<Vec<Promotion>, PromotionsServiceError>;

    /// Validate and store a new promotion.
    async fn create_promotion(
        &self,
        promotion: NewPromotion,
        point_in_time: Timestamp,
    ) -> Result<Promotion, PromotionsServiceError>;

    /// Validate and replace every field of an existing promotion.
    async fn update_promotion(
        &self,
        uuid: PromotionUuid,
        update: PromotionUpdate,
        point_in_time: Timestamp,
    ) -> Result<Promotion, PromotionsServiceError>;

    /// Deletes a promotion with the given UUID.
    async fn delete_promotion(&self, uuid: PromotionUuid) -> Result<(), PromotionsServiceError>;

    /// The live promotion giving the lowest price for `game`, if any.
    ///
    /// An unknown game yields `None` rather than an error.
    async fn get_best_promotion_for_game(
        &self,
        game: GameUuid,
        point_in_time: Timestamp,
    ) -> Result<Option<Promotion>, PromotionsServiceError>;

    /// Price of `game` after its best live promotion.
    ///
    /// With no live promotion the result depends on [`UnpromotedPrice`].
    async fn get_discounted_price(
        &self,
        game: GameUuid,
        point_in_time: Timestamp,
    ) -> Result<u64, PromotionsServiceError>;
}
