use clap::Args;
use gamestore_app::config::{DatabaseConfig, PricingConfig};
use jiff::Timestamp;
use uuid::Uuid;

use crate::cli::connect;

#[derive(Debug, Args)]
pub(crate) struct PurchaseArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    #[command(flatten)]
    pricing: PricingConfig,

    /// Buying user's UUID
    #[arg(long)]
    user_uuid: Uuid,

    /// Game UUID
    #[arg(long)]
    game_uuid: Uuid,
}

pub(crate) async fn run(args: PurchaseArgs) -> Result<(), String> {
    let ctx = connect(&args.database, args.pricing.unpromoted_price).await?;

    let entry = ctx
        .library
        .purchase_game(args.user_uuid.into(), args.game_uuid.into(), Timestamp::now())
        .await
        .map_err(|error| format!("failed to purchase game: {error}"))?;

    super::print_entry(&entry);

    Ok(())
}
