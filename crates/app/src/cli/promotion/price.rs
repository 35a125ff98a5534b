use clap::Args;
use gamestore_app::config::{DatabaseConfig, PricingConfig};
use jiff::Timestamp;
use uuid::Uuid;

use crate::cli::connect;

#[derive(Debug, Args)]
pub(crate) struct PriceArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    #[command(flatten)]
    pricing: PricingConfig,

    /// Game UUID
    #[arg(long)]
    game_uuid: Uuid,

    /// Instant to evaluate; defaults to now
    #[arg(long)]
    at: Option<Timestamp>,
}

pub(crate) async fn run(args: PriceArgs) -> Result<(), String> {
    let ctx = connect(&args.database, args.pricing.unpromoted_price).await?;

    let price = ctx
        .promotions
        .get_discounted_price(args.game_uuid.into(), args.at.unwrap_or_else(Timestamp::now))
        .await
        .map_err(|error| format!("failed to compute price: {error}"))?;

    println!("game_uuid: {}", args.game_uuid);
    println!("price: {price}");

    Ok(())
}
