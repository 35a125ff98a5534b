//! Promotions Repository

use gamestore::{Discount, Schedule};
use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{
    FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar,
};
use uuid::Uuid;

use crate::{
    database::{try_get_optional_amount, try_i64_from_u64},
    domain::{
        games::models::GameUuid,
        promotions::models::{NewPromotion, Promotion, PromotionUpdate, PromotionUuid},
    },
};

const COLUMN_DISCOUNT_AMOUNT: &str = "discount_amount";

const FIND_PROMOTION_SQL: &str = include_str!("sql/find_promotion.sql");
const LIST_ACTIVE_PROMOTIONS_SQL: &str = include_str!("sql/list_active_promotions.sql");
const LIST_ACTIVE_PROMOTIONS_FOR_GAME_SQL: &str =
    include_str!("sql/list_active_promotions_for_game.sql");
const COUNT_ACTIVE_PROMOTIONS_FOR_GAME_SQL: &str =
    include_str!("sql/count_active_promotions_for_game.sql");
const CREATE_PROMOTION_SQL: &str = include_str!("sql/create_promotion.sql");
const UPDATE_PROMOTION_SQL: &str = include_str!("sql/update_promotion.sql");
const DELETE_PROMOTION_SQL: &str = include_str!("sql/delete_promotion.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPromotionsRepository;

impl PgPromotionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find_promotion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: PromotionUuid,
    ) -> Result<Promotion, sqlx::Error> {
        query_as::<Postgres, Promotion>(FIND_PROMOTION_SQL)
            .bind(promotion.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_active_promotions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        point_in_time: Timestamp,
    ) -> Result<Vec<Promotion>, sqlx::Error> {
        query_as::<Postgres, Promotion>(LIST_ACTIVE_PROMOTIONS_SQL)
            .bind(SqlxTimestamp::from(point_in_time))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_active_promotions_for_game(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        game: GameUuid,
        point_in_time: Timestamp,
    ) -> Result<Vec<Promotion>, sqlx::Error> {
        query_as::<Postgres, Promotion>(LIST_ACTIVE_PROMOTIONS_FOR_GAME_SQL)
            .bind(game.into_uuid())
            .bind(SqlxTimestamp::from(point_in_time))
            .fetch_all(&mut **tx)
            .await
    }

    /// Count promotions live for `game` at `point_in_time`, leaving out
    /// `excluding` when given.
    pub(crate) async fn count_active_promotions_for_game(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        game: GameUuid,
        point_in_time: Timestamp,
        excluding: Option<PromotionUuid>,
    ) -> Result<usize, sqlx::Error> {
        let count = query_scalar::<Postgres, i64>(COUNT_ACTIVE_PROMOTIONS_FOR_GAME_SQL)
            .bind(game.into_uuid())
            .bind(SqlxTimestamp::from(point_in_time))
            .bind(excluding.map(PromotionUuid::into_uuid))
            .fetch_one(&mut **tx)
            .await?;

        usize::try_from(count).map_err(|e| sqlx::Error::ColumnDecode {
            index: "count".to_string(),
            source: Box::new(e),
        })
    }

    pub(crate) async fn create_promotion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: &NewPromotion,
    ) -> Result<Promotion, sqlx::Error> {
        let discount_amount = try_optional_i64_from_u64(promotion.discount.amount)?;

        query_as::<Postgres, Promotion>(CREATE_PROMOTION_SQL)
            .bind(promotion.uuid.into_uuid())
            .bind(promotion.game_uuid.into_uuid())
            .bind(&promotion.title)
            .bind(&promotion.description)
            .bind(promotion.discount.percentage)
            .bind(discount_amount)
            .bind(SqlxTimestamp::from(promotion.schedule.starts_at))
            .bind(SqlxTimestamp::from(promotion.schedule.ends_at))
            .bind(promotion.schedule.is_active)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_promotion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: PromotionUuid,
        update: &PromotionUpdate,
    ) -> Result<Promotion, sqlx::Error> {
        let discount_amount = try_optional_i64_from_u64(update.discount.amount)?;

        query_as::<Postgres, Promotion>(UPDATE_PROMOTION_SQL)
            .bind(promotion.into_uuid())
            .bind(update.game_uuid.into_uuid())
            .bind(&update.title)
            .bind(&update.description)
            .bind(update.discount.percentage)
            .bind(discount_amount)
            .bind(SqlxTimestamp::from(update.schedule.starts_at))
            .bind(SqlxTimestamp::from(update.schedule.ends_at))
            .bind(update.schedule.is_active)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_promotion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: PromotionUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PROMOTION_SQL)
            .bind(promotion.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

fn try_optional_i64_from_u64(value: Option<u64>) -> Result<Option<i64>, sqlx::Error> {
    value
        .map(|v| try_i64_from_u64(v, COLUMN_DISCOUNT_AMOUNT))
        .transpose()
}

impl<'r> FromRow<'r, PgRow> for Promotion {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: PromotionUuid::from_uuid(row.try_get("uuid")?),
            game_uuid: GameUuid::from_uuid(row.try_get::<Uuid, _>("game_uuid")?),
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            discount: Discount {
                percentage: row.try_get("discount_percentage")?,
                amount: try_get_optional_amount(row, COLUMN_DISCOUNT_AMOUNT)?,
            },
            schedule: Schedule {
                starts_at: row.try_get::<SqlxTimestamp, _>("starts_at")?.to_jiff(),
                ends_at: row.try_get::<SqlxTimestamp, _>("ends_at")?.to_jiff(),
                is_active: row.try_get("is_active")?,
            },
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
