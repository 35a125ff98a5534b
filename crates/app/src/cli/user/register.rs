use clap::Args;
use gamestore_app::{
    auth::Registration,
    config::{DatabaseConfig, TokenArgs},
    domain::{promotions::models::UnpromotedPrice, users::models::UserRole},
};

use crate::cli::connect;

#[derive(Debug, Args)]
pub(crate) struct RegisterArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    #[command(flatten)]
    token: TokenArgs,

    /// Display name
    #[arg(long)]
    name: String,

    /// Email address used to sign in
    #[arg(long)]
    email: String,

    /// Account password
    #[arg(long, env = "USER_PASSWORD", hide_env_values = true)]
    password: String,

    /// Account role
    #[arg(long, value_enum, default_value_t = UserRole::User)]
    role: UserRole,
}

pub(crate) async fn run(args: RegisterArgs) -> Result<(), String> {
    let ctx = connect(&args.database, UnpromotedPrice::default()).await?;

    let auth = ctx
        .auth(&args.token.into_config())
        .map_err(|error| format!("failed to configure tokens: {error}"))?;

    let response = auth
        .register(Registration {
            name: args.name,
            email: args.email,
            password: args.password,
            role: args.role,
        })
        .await
        .map_err(|error| format!("failed to register user: {error}"))?;

    super::print_auth_response(&response);

    Ok(())
}
