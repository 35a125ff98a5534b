use clap::Args;
use gamestore_app::{
    config::DatabaseConfig,
    domain::{
        games::models::{GameUuid, NewGame},
        promotions::models::UnpromotedPrice,
    },
};
use uuid::Uuid;

use crate::cli::connect;

#[derive(Debug, Args)]
pub(crate) struct CreateGameArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    /// Game title
    #[arg(long)]
    title: String,

    /// List price in minor currency units
    #[arg(long)]
    price: u64,

    /// Optional game UUID; generated when omitted
    #[arg(long)]
    game_uuid: Option<Uuid>,
}

pub(crate) async fn run(args: CreateGameArgs) -> Result<(), String> {
    let ctx = connect(&args.database, UnpromotedPrice::default()).await?;

    let game = ctx
        .games
        .create_game(NewGame {
            uuid: args.game_uuid.map_or_else(GameUuid::new, GameUuid::from),
            title: args.title,
            price: args.price,
        })
        .await
        .map_err(|error| format!("failed to create game: {error}"))?;

    super::print_game(&game);

    Ok(())
}
