use clap::Args;
use gamestore_app::{
    config::DatabaseConfig,
    domain::promotions::models::{NewPromotion, PromotionUuid, UnpromotedPrice},
};
use jiff::Timestamp;

use crate::cli::connect;

use super::PromotionTerms;

#[derive(Debug, Args)]
pub(crate) struct CreatePromotionArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    #[command(flatten)]
    terms: PromotionTerms,
}

pub(crate) async fn run(args: CreatePromotionArgs) -> Result<(), String> {
    let ctx = connect(&args.database, UnpromotedPrice::default()).await?;

    let promotion = ctx
        .promotions
        .create_promotion(
            NewPromotion {
                uuid: PromotionUuid::new(),
                game_uuid: args.terms.game_uuid.into(),
                discount: args.terms.discount(),
                schedule: args.terms.schedule(),
                title: args.terms.title,
                description: args.terms.description,
            },
            Timestamp::now(),
        )
        .await
        .map_err(|error| format!("failed to create promotion: {error}"))?;

    super::print_promotion(&promotion);

    Ok(())
}
