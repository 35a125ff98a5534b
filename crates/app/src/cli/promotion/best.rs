use clap::Args;
use gamestore_app::{config::DatabaseConfig, domain::promotions::models::UnpromotedPrice};
use jiff::Timestamp;
use uuid::Uuid;

use crate::cli::connect;

#[derive(Debug, Args)]
pub(crate) struct BestPromotionArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    /// Game UUID
    #[arg(long)]
    game_uuid: Uuid,

    /// Instant to evaluate; defaults to now
    #[arg(long)]
    at: Option<Timestamp>,
}

pub(crate) async fn run(args: BestPromotionArgs) -> Result<(), String> {
    let ctx = connect(&args.database, UnpromotedPrice::default()).await?;

    let best = ctx
        .promotions
        .get_best_promotion_for_game(args.game_uuid.into(), args.at.unwrap_or_else(Timestamp::now))
        .await
        .map_err(|error| format!("failed to find best promotion: {error}"))?;

    match best {
        Some(promotion) => super::print_promotion(&promotion),
        None => println!("no applicable promotion for game {}", args.game_uuid),
    }

    Ok(())
}
