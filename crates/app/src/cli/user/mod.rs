use clap::{Args, Subcommand};
use gamestore_app::auth::AuthResponse;

mod login;
mod register;
mod show;

#[derive(Debug, Args)]
pub(crate) struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Debug, Subcommand)]
enum UserSubcommand {
    Register(register::RegisterArgs),
    Login(login::LoginArgs),
    Show(show::ShowUserArgs),
}

pub(crate) async fn run(command: UserCommand) -> Result<(), String> {
    match command.command {
        UserSubcommand::Register(args) => register::run(args).await,
        UserSubcommand::Login(args) => login::run(args).await,
        UserSubcommand::Show(args) => show::run(args).await,
    }
}

fn print_auth_response(response: &AuthResponse) {
    println!("user_uuid: {}", response.user.uuid);
    println!("name: {}", response.user.name);
    println!("email: {}", response.user.email);
    println!("role: {}", response.user.role);
    println!("token: {}", response.token.token);
    println!("expires_at: {}", response.token.expires_at);
}
