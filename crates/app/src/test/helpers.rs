//! Test Helpers

use jiff::{SignedDuration, Timestamp};
use rust_decimal::Decimal;

use gamestore::{Discount, Schedule};

use crate::{
    domain::{
        games::{
            GamesService, GamesServiceError,
            models::{Game, GameUuid, NewGame},
        },
        library::{LibraryService, LibraryServiceError, models::LibraryEntry},
        promotions::{
            PromotionsService, PromotionsServiceError,
            models::{NewPromotion, Promotion, PromotionUuid},
        },
        users::{
            UsersService, UsersServiceError,
            models::{NewUser, User, UserRole, UserUuid},
        },
    },
    test::TestContext,
};

/// Now, truncated to whole seconds so values survive a database round trip
/// unchanged.
pub(crate) fn now() -> Result<Timestamp, jiff::Error> {
    Timestamp::from_second(Timestamp::now().as_second())
}

pub(crate) fn days(days: i64) -> SignedDuration {
    SignedDuration::from_hours(days * 24)
}

pub(crate) fn amount_off(amount: u64) -> Discount {
    Discount::amount_off(amount)
}

pub(crate) fn percentage_off(percentage: i64) -> Discount {
    Discount::percentage_off(Decimal::from(percentage))
}

pub(crate) async fn create_game(
    ctx: &TestContext,
    title: &str,
    price: u64,
) -> Result<Game, GamesServiceError> {
    ctx.games
        .create_game(NewGame {
            uuid: GameUuid::new(),
            title: title.to_string(),
            price,
        })
        .await
}

pub(crate) async fn create_user(
    ctx: &TestContext,
    name: &str,
    email: &str,
) -> Result<User, UsersServiceError> {
    ctx.users
        .create_user(NewUser {
            uuid: UserUuid::new(),
            name: name.to_string(),
            email: email.to_string(),
            role: UserRole::User,
            password_hash: "not-a-real-hash".to_string(),
        })
        .await
}

/// Store an active week-long promotion starting at `starts_at`.
pub(crate) async fn create_promotion(
    ctx: &TestContext,
    game: GameUuid,
    discount: Discount,
    starts_at: Timestamp,
) -> Result<Promotion, PromotionsServiceError> {
    store_promotion(ctx, game, discount, starts_at, true).await
}

pub(crate) async fn create_inactive_promotion(
    ctx: &TestContext,
    game: GameUuid,
    starts_at: Timestamp,
) -> Result<Promotion, PromotionsServiceError> {
    store_promotion(ctx, game, amount_off(100), starts_at, false).await
}

async fn store_promotion(
    ctx: &TestContext,
    game: GameUuid,
    discount: Discount,
    starts_at: Timestamp,
    is_active: bool,
) -> Result<Promotion, PromotionsServiceError> {
    ctx.promotions
        .create_promotion(
            NewPromotion {
                uuid: PromotionUuid::new(),
                game_uuid: game,
                title: "Test Sale".to_string(),
                description: String::new(),
                discount,
                schedule: Schedule::new(starts_at, starts_at + days(7), is_active),
            },
            starts_at,
        )
        .await
}

pub(crate) async fn purchase(
    ctx: &TestContext,
    user: UserUuid,
    game: GameUuid,
) -> Result<LibraryEntry, LibraryServiceError> {
    let point_in_time = now().map_err(|_| LibraryServiceError::InvalidData)?;

    ctx.library.purchase_game(user, game, point_in_time).await
}
