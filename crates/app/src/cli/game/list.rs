use clap::Args;
use gamestore_app::{config::DatabaseConfig, domain::promotions::models::UnpromotedPrice};

use crate::cli::connect;

#[derive(Debug, Args)]
pub(crate) struct ListGamesArgs {
    #[command(flatten)]
    database: DatabaseConfig,
}

pub(crate) async fn run(args: ListGamesArgs) -> Result<(), String> {
    let ctx = connect(&args.database, UnpromotedPrice::default()).await?;

    let games = ctx
        .games
        .list_games()
        .await
        .map_err(|error| format!("failed to list games: {error}"))?;

    if games.is_empty() {
        println!("no games found");
        return Ok(());
    }

    for game in games {
        super::print_game(&game);
        println!();
    }

    Ok(())
}
