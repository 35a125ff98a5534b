use clap::Args;
use gamestore_app::{config::DatabaseConfig, domain::promotions::models::UnpromotedPrice};
use uuid::Uuid;

use crate::cli::{connect, library::print_entry};

#[derive(Debug, Args)]
pub(crate) struct ShowUserArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    /// User UUID
    #[arg(long)]
    user_uuid: Uuid,
}

pub(crate) async fn run(args: ShowUserArgs) -> Result<(), String> {
    let ctx = connect(&args.database, UnpromotedPrice::default()).await?;

    let view = ctx
        .users
        .get_user_with_library(args.user_uuid.into())
        .await
        .map_err(|error| format!("failed to load user: {error}"))?;

    println!("user_uuid: {}", view.user.uuid);
    println!("name: {}", view.user.name);
    println!("email: {}", view.user.email);
    println!("role: {}", view.user.role);
    println!("created_at: {}", view.user.created_at);
    println!("games_owned: {}", view.library.len());

    for entry in &view.library {
        println!();
        print_entry(entry);
    }

    Ok(())
}
