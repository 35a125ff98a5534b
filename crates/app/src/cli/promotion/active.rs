use clap::Args;
use gamestore_app::{config::DatabaseConfig, domain::promotions::models::UnpromotedPrice};
use jiff::Timestamp;
use uuid::Uuid;

use crate::cli::connect;

#[derive(Debug, Args)]
pub(crate) struct ActivePromotionsArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    /// Only list promotions for this game
    #[arg(long)]
    game_uuid: Option<Uuid>,

    /// Instant to evaluate; defaults to now
    #[arg(long)]
    at: Option<Timestamp>,
}

pub(crate) async fn run(args: ActivePromotionsArgs) -> Result<(), String> {
    let ctx = connect(&args.database, UnpromotedPrice::default()).await?;
    let point_in_time = args.at.unwrap_or_else(Timestamp::now);

    let promotions = match args.game_uuid {
        Some(game) => {
            ctx.promotions
                .list_active_promotions_for_game(game.into(), point_in_time)
                .await
        }
        None => ctx.promotions.list_active_promotions(point_in_time).await,
    }
    .map_err(|error| format!("failed to list promotions: {error}"))?;

    if promotions.is_empty() {
        println!("no active promotions at {point_in_time}");
        return Ok(());
    }

    for promotion in promotions {
        super::print_promotion(&promotion);
        println!();
    }

    Ok(())
}
