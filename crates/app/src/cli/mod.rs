use clap::{Parser, Subcommand};
use gamestore_app::{
    config::{DatabaseConfig, LoggingConfig},
    context::AppContext,
    domain::promotions::models::UnpromotedPrice,
    observability,
};

mod db;
mod game;
mod library;
mod promotion;
mod user;

#[derive(Debug, Parser)]
#[command(name = "gamestore-app", about = "Game Store CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    Game(game::GameCommand),
    User(user::UserCommand),
    Promotion(promotion::PromotionCommand),
    Library(library::LibraryCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        observability::init_subscriber(&self.logging)
            .map_err(|error| format!("failed to initialise logging: {error}"))?;

        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::Game(command) => game::run(command).await,
            Commands::User(command) => user::run(command).await,
            Commands::Promotion(command) => promotion::run(command).await,
            Commands::Library(command) => library::run(command).await,
        }
    }
}

async fn connect(
    database: &DatabaseConfig,
    unpromoted_price: UnpromotedPrice,
) -> Result<AppContext, String> {
    AppContext::from_database_url(&database.database_url, unpromoted_price)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))
}
