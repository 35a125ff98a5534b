//! Test context for service-level integration tests.

use std::{sync::Arc, time::Duration};

use sqlx::postgres::PgPoolOptions;

use crate::{
    auth::{PgAuthService, TokenConfig, TokenIssuer},
    database::Db,
    domain::{
        games::PgGamesService, library::PgLibraryService, promotions::PgPromotionsService,
        users::PgUsersService,
    },
};

use super::db::TestDb;

const TEST_TOKEN_SECRET: &str = "gamestore-test-signing-secret-0123456789";

pub struct TestContext {
    pub db: TestDb,
    pub games: PgGamesService,
    pub users: PgUsersService,
    pub promotions: PgPromotionsService,
    pub library: PgLibraryService,
    pub auth: PgAuthService,
}

impl TestContext {
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        let issuer = TokenIssuer::new(&TokenConfig {
            secret: TEST_TOKEN_SECRET.to_string(),
            issuer: "gamestore-test".to_string(),
            audience: "gamestore-test".to_string(),
            expiry_minutes: 5,
        })
        .expect("Failed to build test token issuer");

        Self {
            games: PgGamesService::new(db.clone()),
            users: PgUsersService::new(db.clone()),
            promotions: PgPromotionsService::new(db.clone()),
            library: PgLibraryService::new(
                db.clone(),
                Arc::new(PgPromotionsService::new(db.clone())),
            ),
            auth: PgAuthService::new(db, issuer).with_password_cost(4 /* bcrypt minimum cost; bcrypt::MIN_COST is private */),
            db: test_db,
        }
    }

    /// A fresh handle on this test's database, for building services with
    /// non-default collaborators.
    pub fn app_db(&self) -> Db {
        Db::new(self.db.pool().clone())
    }

    /// A separate pool on this test's database that never opens more than
    /// one connection.
    pub async fn single_connection_db(&self) -> Result<Db, sqlx::Error> {
        let options = (*self.db.pool().connect_options()).clone();

        let pool = PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(options)
            .await?;

        Ok(Db::new(pool))
    }
}
