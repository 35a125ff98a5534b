//! Library service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{Span, info};

use crate::{
    database::Db,
    domain::{
        games::{models::GameUuid, repository::PgGamesRepository},
        library::{
            errors::LibraryServiceError,
            models::{LibraryEntry, LibraryEntryUuid, NewLibraryEntry},
            repository::PgLibraryRepository,
        },
        promotions::PromotionsService,
        users::{models::UserUuid, repository::PgUsersRepository},
    },
};

#[derive(Clone)]
pub struct PgLibraryService {
    db: Db,
    library: PgLibraryRepository,
    users: PgUsersRepository,
    games: PgGamesRepository,
    pricing: Arc<dyn PromotionsService>,
}

impl PgLibraryService {
    #[must_use]
    pub fn new(db: Db, pricing: Arc<dyn PromotionsService>) -> Self {
        Self {
            db,
            library: PgLibraryRepository::new(),
            users: PgUsersRepository::new(),
            games: PgGamesRepository::new(),
            pricing,
        }
    }
}

#[async_trait]
impl LibraryService for PgLibraryService {
    #[tracing::instrument(
        name = "library.service.purchase_game",
        skip(self, user, game),
        fields(
            user_uuid = %user,
            game_uuid = %game,
            final_price = tracing::field::Empty
        ),
        err
    )]
    async fn purchase_game(
        &self,
        user: UserUuid,
        game: GameUuid,
        point_in_time: Timestamp,
    ) -> Result<LibraryEntry, LibraryServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        if !self.users.user_exists(&mut tx, user).await? {
            return Err(LibraryServiceError::UserNotFound);
        }

        if !self.games.game_exists(&mut tx, game).await? {
            return Err(LibraryServiceError::GameNotFound);
        }

        if self.library.user_owns_game(&mut tx, user, game).await? {
            return Err(LibraryServiceError::AlreadyOwned);
        }

        tx.commit().await?;

        // Pricing takes its own connection, so none may be held here.
        let final_price = self
            .pricing
            .get_discounted_price(game, point_in_time)
            .await?;

        Span::current().record("final_price", final_price);

        if final_price == 0 {
            return Err(LibraryServiceError::InvalidPrice);
        }

        let mut tx = self.db.begin_transaction().await?;

        // A concurrent purchase of the same pair surfaces here as AlreadyOwned,
        // a party deleted since the checks as InvalidReference.
        let entry = self
            .library
            .create_entry(
                &mut tx,
                &NewLibraryEntry {
                    uuid: LibraryEntryUuid::new(),
                    user_uuid: user,
                    game_uuid: game,
                },
            )
            .await?;

        tx.commit().await?;

        info!(
            library_entry_uuid = %entry.uuid,
            user_uuid = %user,
            game_uuid = %game,
            final_price,
            "purchased game"
        );

        Ok(entry)
    }

    async fn get_user_library(
        &self,
        user: UserUuid,
    ) -> Result<Vec<LibraryEntry>, LibraryServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        if !self.users.user_exists(&mut tx, user).await? {
            return Err(LibraryServiceError::UserNotFound);
        }

        let entries = self.library.list_entries_for_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(entries)
    }

    async fn get_library_entry(
        &self,
        entry: LibraryEntryUuid,
    ) -> Result<LibraryEntry, LibraryServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let entry = self.library.find_entry(&mut tx, entry).await?;

        tx.commit().await?;

        Ok(entry)
    }

    async fn user_owns_game(
        &self,
        user: UserUuid,
        game: GameUuid,
    ) -> Result<bool, LibraryServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let owns = self.library.user_owns_game(&mut tx, user, game).await?;

        tx.commit().await?;

        Ok(owns)
    }
}

#[automock]
#[async_trait]
pub trait LibraryService: Send + Sync {
    /// Buy `game` for `user` at its best price at `point_in_time`.
    ///
    /// Fails when either party is missing, the user already owns the game,
    /// or the final price is not positive.
    async fn purchase_game(
        &self,
        user: UserUuid,
        game: GameUuid,
        point_in_time: Timestamp,
    ) -> Result<LibraryEntry, LibraryServiceError>;

    /// Every game owned by `user`, oldest purchase first.
    async fn get_user_library(
        &self,
        user: UserUuid,
    ) -> Result<Vec<LibraryEntry>, LibraryServiceError>;

    /// Retrieve a single library entry.
    async fn get_library_entry(
        &self,
        entry: LibraryEntryUuid,
    ) -> Result<LibraryEntry, LibraryServiceError>;

    async fn user_owns_game(
        &self,
        user: UserUuid,
        game: GameUuid,
    ) -> Result<bool, LibraryServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::promotions::{MockPromotionsService, PgPromotionsService, PromotionsServiceError},
        test::{TestContext, helpers},
    };

    use super::*;

    fn priced_at(price: u64) -> MockPromotionsService {
        let mut pricing = MockPromotionsService::new();

        pricing
            .expect_get_discounted_price()
            .returning(move |_, _| Ok(price));

        pricing
    }

    fn unpriced() -> MockPromotionsService {
        let mut pricing = MockPromotionsService::new();

        pricing.expect_get_discounted_price().never();

        pricing
    }

    fn library_with(ctx: &TestContext, pricing: MockPromotionsService) -> PgLibraryService {
        PgLibraryService::new(ctx.app_db(), Arc::new(pricing))
    }

    #[tokio::test]
    async fn purchase_game_returns_entry_with_names() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::create_user(&ctx, "Ada", "ada@example.com").await?;
        let game = helpers::create_game(&ctx, "Celeste", 2_000).await?;
        let library = library_with(&ctx, priced_at(1_500));

        let entry = library
            .purchase_game(user.uuid, game.uuid, Timestamp::now())
            .await?;

        assert_eq!(entry.user_uuid, user.uuid);
        assert_eq!(entry.user_name, "Ada");
        assert_eq!(entry.game_uuid, game.uuid);
        assert_eq!(entry.game_title, "Celeste");

        assert!(library.user_owns_game(user.uuid, game.uuid).await?);

        let fetched = library.get_library_entry(entry.uuid).await?;

        assert_eq!(fetched, entry);

        Ok(())
    }

    #[tokio::test]
    async fn purchase_game_unknown_user_returns_user_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let game = helpers::create_game(&ctx, "Celeste", 2_000).await?;
        let library = library_with(&ctx, unpriced());

        let result = library
            .purchase_game(UserUuid::new(), game.uuid, Timestamp::now())
            .await;

        assert!(
            matches!(result, Err(LibraryServiceError::UserNotFound)),
            "expected UserNotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn purchase_game_unknown_game_returns_game_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::create_user(&ctx, "Ada", "ada@example.com").await?;
        let library = library_with(&ctx, unpriced());

        let result = library
            .purchase_game(user.uuid, GameUuid::new(), Timestamp::now())
            .await;

        assert!(
            matches!(result, Err(LibraryServiceError::GameNotFound)),
            "expected GameNotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn purchase_game_twice_returns_already_owned() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::create_user(&ctx, "Ada", "ada@example.com").await?;
        let game = helpers::create_game(&ctx, "Celeste", 2_000).await?;
        let library = library_with(&ctx, priced_at(1_500));

        library
            .purchase_game(user.uuid, game.uuid, Timestamp::now())
            .await?;

        let result = library
            .purchase_game(user.uuid, game.uuid, Timestamp::now())
            .await;

        assert!(
            matches!(result, Err(LibraryServiceError::AlreadyOwned)),
            "expected AlreadyOwned, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn purchase_game_at_zero_price_returns_invalid_price() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::create_user(&ctx, "Ada", "ada@example.com").await?;
        let game = helpers::create_game(&ctx, "Celeste", 2_000).await?;
        let library = library_with(&ctx, priced_at(0));

        let result = library
            .purchase_game(user.uuid, game.uuid, Timestamp::now())
            .await;

        assert!(
            matches!(result, Err(LibraryServiceError::InvalidPrice)),
            "expected InvalidPrice, got {result:?}"
        );
        assert!(!library.user_owns_game(user.uuid, game.uuid).await?);

        Ok(())
    }

    #[tokio::test]
    async fn purchase_game_pricing_failure_is_reported() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::create_user(&ctx, "Ada", "ada@example.com").await?;
        let game = helpers::create_game(&ctx, "Celeste", 2_000).await?;

        let mut pricing = MockPromotionsService::new();

        pricing
            .expect_get_discounted_price()
            .returning(|_, _| Err(PromotionsServiceError::InvalidData));

        let library = library_with(&ctx, pricing);

        let result = library
            .purchase_game(user.uuid, game.uuid, Timestamp::now())
            .await;

        assert!(
            matches!(
                result,
                Err(LibraryServiceError::Pricing(PromotionsServiceError::InvalidData))
            ),
            "expected Pricing, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_purchases_record_a_single_entry() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::create_user(&ctx, "Ada", "ada@example.com").await?;
        let game = helpers::create_game(&ctx, "Celeste", 2_000).await?;
        let library = library_with(&ctx, priced_at(1_500));
        let now = Timestamp::now();

        let (first, second) = tokio::join!(
            library.purchase_game(user.uuid, game.uuid, now),
            library.purchase_game(user.uuid, game.uuid, now),
        );

        let outcomes = [&first, &second];

        let succeeded = outcomes.iter().filter(|result| result.is_ok()).count();
        let rejected = outcomes
            .iter()
            .filter(|result| matches!(result, Err(LibraryServiceError::AlreadyOwned)))
            .count();

        assert_eq!(succeeded, 1, "exactly one purchase should win: {outcomes:?}");
        assert_eq!(rejected, 1, "the other should be AlreadyOwned: {outcomes:?}");

        assert_eq!(library.get_user_library(user.uuid).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn purchase_game_completes_on_a_single_connection_pool() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::create_user(&ctx, "Ada", "ada@example.com").await?;
        let game = helpers::create_game(&ctx, "Celeste", 2_000).await?;

        helpers::create_promotion(&ctx, game.uuid, helpers::percentage_off(25), helpers::now()?)
            .await?;

        let db = ctx.single_connection_db().await?;
        let library = PgLibraryService::new(db.clone(), Arc::new(PgPromotionsService::new(db)));

        let entry = library
            .purchase_game(user.uuid, game.uuid, Timestamp::now())
            .await?;

        assert_eq!(entry.game_uuid, game.uuid);
        assert!(library.user_owns_game(user.uuid, game.uuid).await?);

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_purchases_share_a_small_pool() -> TestResult {
        let ctx = TestContext::new().await;
        let game = helpers::create_game(&ctx, "Celeste", 2_000).await?;

        helpers::create_promotion(&ctx, game.uuid, helpers::percentage_off(25), helpers::now()?)
            .await?;

        let db = ctx.single_connection_db().await?;
        let library = Arc::new(PgLibraryService::new(
            db.clone(),
            Arc::new(PgPromotionsService::new(db)),
        ));

        let mut handles = Vec::new();

        for n in 0..8 {
            let user =
                helpers::create_user(&ctx, &format!("Player {n}"), &format!("player{n}@example.com"))
                    .await?;
            let library = Arc::clone(&library);

            handles.push(tokio::spawn(async move {
                library
                    .purchase_game(user.uuid, game.uuid, Timestamp::now())
                    .await
            }));
        }

        for handle in handles {
            let result = handle.await?;

            assert!(result.is_ok(), "expected purchase to succeed, got {result:?}");
        }

        Ok(())
    }

    #[tokio::test]
    async fn purchase_without_live_promotion_is_rejected_by_default() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::create_user(&ctx, "Ada", "ada@example.com").await?;
        let game = helpers::create_game(&ctx, "Celeste", 2_000).await?;

        let result = helpers::purchase(&ctx, user.uuid, game.uuid).await;

        assert!(
            matches!(result, Err(LibraryServiceError::InvalidPrice)),
            "expected InvalidPrice, got {result:?}"
        );

        helpers::create_promotion(&ctx, game.uuid, helpers::percentage_off(25), helpers::now()?)
            .await?;

        let entry = helpers::purchase(&ctx, user.uuid, game.uuid).await?;

        assert_eq!(entry.game_uuid, game.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn get_user_library_unknown_user_returns_user_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.library.get_user_library(UserUuid::new()).await;

        assert!(
            matches!(result, Err(LibraryServiceError::UserNotFound)),
            "expected UserNotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn get_library_entry_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.library.get_library_entry(LibraryEntryUuid::new()).await;

        assert!(
            matches!(result, Err(LibraryServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
