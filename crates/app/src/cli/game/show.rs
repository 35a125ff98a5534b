use clap::Args;
use gamestore_app::{config::DatabaseConfig, domain::promotions::models::UnpromotedPrice};
use jiff::Timestamp;
use uuid::Uuid;

use crate::cli::{connect, promotion::print_promotion};

#[derive(Debug, Args)]
pub(crate) struct ShowGameArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    /// Game UUID
    #[arg(long)]
    game_uuid: Uuid,

    /// Instant at which promotions are evaluated; defaults to now
    #[arg(long)]
    at: Option<Timestamp>,
}

pub(crate) async fn run(args: ShowGameArgs) -> Result<(), String> {
    let ctx = connect(&args.database, UnpromotedPrice::default()).await?;

    let view = ctx
        .games
        .get_game_with_promotions(args.game_uuid.into(), args.at.unwrap_or_else(Timestamp::now))
        .await
        .map_err(|error| format!("failed to load game: {error}"))?;

    super::print_game(&view.game);

    if view.promotions.is_empty() {
        println!("promotions: none");
        return Ok(());
    }

    for promotion in &view.promotions {
        println!();
        print_promotion(promotion);
    }

    Ok(())
}
