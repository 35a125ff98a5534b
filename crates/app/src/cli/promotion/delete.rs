use clap::Args;
use gamestore_app::{config::DatabaseConfig, domain::promotions::models::UnpromotedPrice};
use uuid::Uuid;

use crate::cli::connect;

#[derive(Debug, Args)]
pub(crate) struct DeletePromotionArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    /// Promotion UUID
    #[arg(long)]
    promotion_uuid: Uuid,
}

pub(crate) async fn run(args: DeletePromotionArgs) -> Result<(), String> {
    let ctx = connect(&args.database, UnpromotedPrice::default()).await?;

    ctx.promotions
        .delete_promotion(args.promotion_uuid.into())
        .await
        .map_err(|error| format!("failed to delete promotion: {error}"))?;

    println!("deleted promotion: {}", args.promotion_uuid);

    Ok(())
}
