use clap::{Args, Subcommand};
use gamestore_app::domain::games::models::Game;

mod create;
mod list;
mod show;

#[derive(Debug, Args)]
pub(crate) struct GameCommand {
    #[command(subcommand)]
    command: GameSubcommand,
}

#[derive(Debug, Subcommand)]
enum GameSubcommand {
    Create(create::CreateGameArgs),
    List(list::ListGamesArgs),
    Show(show::ShowGameArgs),
}

pub(crate) async fn run(command: GameCommand) -> Result<(), String> {
    match command.command {
        GameSubcommand::Create(args) => create::run(args).await,
        GameSubcommand::List(args) => list::run(args).await,
        GameSubcommand::Show(args) => show::run(args).await,
    }
}

fn print_game(game: &Game) {
    println!("game_uuid: {}", game.uuid);
    println!("title: {}", game.title);
    println!("price: {}", game.price);
    println!("created_at: {}", game.created_at);
    println!("updated_at: {}", game.updated_at);
}
