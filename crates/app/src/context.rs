//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService, TokenConfig, TokenError, TokenIssuer},
    database::{self, Db},
    domain::{
        games::{GamesService, PgGamesService},
        library::{LibraryService, PgLibraryService},
        promotions::{PgPromotionsService, PromotionsService, models::UnpromotedPrice},
        users::{PgUsersService, UsersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("invalid token configuration")]
    Token(#[source] TokenError),
}

/// Every storefront service, wired to one connection pool.
#[derive(Clone)]
pub struct AppContext {
    pub games: Arc<dyn GamesService>,
    pub users: Arc<dyn UsersService>,
    pub promotions: Arc<dyn PromotionsService>,
    pub library: Arc<dyn LibraryService>,
    db: Db,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        unpromoted_price: UnpromotedPrice,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::from_db(Db::new(pool), unpromoted_price))
    }

    #[must_use]
    pub fn from_db(db: Db, unpromoted_price: UnpromotedPrice) -> Self {
        let promotions: Arc<dyn PromotionsService> =
            Arc::new(PgPromotionsService::new(db.clone()).with_unpromoted_price(unpromoted_price));

        Self {
            games: Arc::new(PgGamesService::new(db.clone())),
            users: Arc::new(PgUsersService::new(db.clone())),
            library: Arc::new(PgLibraryService::new(db.clone(), Arc::clone(&promotions))),
            promotions,
            db,
        }
    }

    /// Build the auth service on this context's pool.
    ///
    /// # Errors
    ///
    /// Returns an error when the token configuration is rejected.
    pub fn auth(&self, config: &TokenConfig) -> Result<Arc<dyn AuthService>, AppInitError> {
        let issuer = TokenIssuer::new(config).map_err(AppInitError::Token)?;

        Ok(Arc::new(PgAuthService::new(self.db.clone(), issuer)))
    }
}
