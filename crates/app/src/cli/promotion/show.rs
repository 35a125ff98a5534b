use clap::Args;
use gamestore_app::{config::DatabaseConfig, domain::promotions::models::UnpromotedPrice};
use uuid::Uuid;

use crate::cli::connect;

#[derive(Debug, Args)]
pub(crate) struct ShowPromotionArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    /// Promotion UUID
    #[arg(long)]
    promotion_uuid: Uuid,
}

pub(crate) async fn run(args: ShowPromotionArgs) -> Result<(), String> {
    let ctx = connect(&args.database, UnpromotedPrice::default()).await?;

    let promotion = ctx
        .promotions
        .get_promotion(args.promotion_uuid.into())
        .await
        .map_err(|error| format!("failed to load promotion: {error}"))?;

    super::print_promotion(&promotion);

    Ok(())
}
