use clap::Args;
use gamestore_app::{
    auth::Credentials,
    config::{DatabaseConfig, TokenArgs},
    domain::promotions::models::UnpromotedPrice,
};

use crate::cli::connect;

#[derive(Debug, Args)]
pub(crate) struct LoginArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    #[command(flatten)]
    token: TokenArgs,

    /// Email address
    #[arg(long)]
    email: String,

    /// Account password
    #[arg(long, env = "USER_PASSWORD", hide_env_values = true)]
    password: String,
}

pub(crate) async fn run(args: LoginArgs) -> Result<(), String> {
    let ctx = connect(&args.database, UnpromotedPrice::default()).await?;

    let auth = ctx
        .auth(&args.token.into_config())
        .map_err(|error| format!("failed to configure tokens: {error}"))?;

    let response = auth
        .login(Credentials {
            email: args.email,
            password: args.password,
        })
        .await
        .map_err(|error| format!("failed to log in: {error}"))?;

    super::print_auth_response(&response);

    Ok(())
}
