use clap::Args;
use gamestore_app::{config::DatabaseConfig, domain::promotions::models::UnpromotedPrice};
use uuid::Uuid;

use crate::cli::connect;

#[derive(Debug, Args)]
pub(crate) struct ListLibraryArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    /// User UUID whose library should be listed
    #[arg(long)]
    user_uuid: Uuid,
}

pub(crate) async fn run(args: ListLibraryArgs) -> Result<(), String> {
    let ctx = connect(&args.database, UnpromotedPrice::default()).await?;

    let entries = ctx
        .library
        .get_user_library(args.user_uuid.into())
        .await
        .map_err(|error| format!("failed to list library: {error}"))?;

    if entries.is_empty() {
        println!("no games owned by user {}", args.user_uuid);
        return Ok(());
    }

    for entry in entries {
        super::print_entry(&entry);
        println!();
    }

    Ok(())
}
