use clap::Args;
use gamestore_app::{
    config::DatabaseConfig,
    domain::promotions::models::{PromotionUpdate, UnpromotedPrice},
};
use jiff::Timestamp;
use uuid::Uuid;

use crate::cli::connect;

use super::PromotionTerms;

#[derive(Debug, Args)]
pub(crate) struct UpdatePromotionArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    /// Promotion UUID
    #[arg(long)]
    promotion_uuid: Uuid,

    #[command(flatten)]
    terms: PromotionTerms,
}

pub(crate) async fn run(args: UpdatePromotionArgs) -> Result<(), String> {
    let ctx = connect(&args.database, UnpromotedPrice::default()).await?;

    let promotion = ctx
        .promotions
        .update_promotion(
            args.promotion_uuid.into(),
            PromotionUpdate {
                game_uuid: args.terms.game_uuid.into(),
                discount: args.terms.discount(),
                schedule: args.terms.schedule(),
                title: args.terms.title,
                description: args.terms.description,
            },
            Timestamp::now(),
        )
        .await
        .map_err(|error| format!("failed to update promotion: {error}"))?;

    super::print_promotion(&promotion);

    Ok(())
}
