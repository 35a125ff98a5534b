use clap::{Args, Subcommand};
use gamestore_app::domain::library::models::LibraryEntry;

mod list;
mod purchase;

#[derive(Debug, Args)]
pub(crate) struct LibraryCommand {
    #[command(subcommand)]
    command: LibrarySubcommand,
}

#[derive(Debug, Subcommand)]
enum LibrarySubcommand {
    Purchase(purchase::PurchaseArgs),
    List(list::ListLibraryArgs),
}

pub(crate) async fn run(command: LibraryCommand) -> Result<(), String> {
    match command.command {
        LibrarySubcommand::Purchase(args) => purchase::run(args).await,
        LibrarySubcommand::List(args) => list::run(args).await,
    }
}

pub(crate) fn print_entry(entry: &LibraryEntry) {
    println!("entry_uuid: {}", entry.uuid);
    println!("user: {} ({})", entry.user_name, entry.user_uuid);
    println!("game: {} ({})", entry.game_title, entry.game_uuid);
    println!("purchased_at: {}", entry.created_at);
}
