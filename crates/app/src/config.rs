//! Runtime configuration shared by the CLI commands.

use clap::Args;

use crate::{
    auth::{DEFAULT_EXPIRY_MINUTES, TokenConfig},
    domain::promotions::models::UnpromotedPrice,
};

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,
}

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(
        long,
        global = true,
        env = "LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Compact
    )]
    pub log_format: LogFormat,
}

/// Pricing settings.
#[derive(Debug, Args)]
pub struct PricingConfig {
    /// Price reported for games with no live promotion
    #[arg(
        long,
        env = "UNPROMOTED_PRICE",
        value_enum,
        default_value_t = UnpromotedPrice::Zero
    )]
    pub unpromoted_price: UnpromotedPrice,
}

/// Access token settings.
#[derive(Debug, Args)]
pub struct TokenArgs {
    /// Shared secret used to sign access tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Token issuer claim
    #[arg(long, env = "JWT_ISSUER", default_value = "gamestore")]
    pub jwt_issuer: String,

    /// Token audience claim
    #[arg(long, env = "JWT_AUDIENCE", default_value = "gamestore")]
    pub jwt_audience: String,

    /// Token lifetime in minutes
    #[arg(long, env = "JWT_EXPIRY_MINUTES", default_value_t = DEFAULT_EXPIRY_MINUTES)]
    pub jwt_expiry_minutes: i64,
}

impl TokenArgs {
    #[must_use]
    pub fn into_config(self) -> TokenConfig {
        TokenConfig {
            secret: self.jwt_secret,
            issuer: self.jwt_issuer,
            audience: self.jwt_audience,
            expiry_minutes: self.jwt_expiry_minutes,
        }
    }
}
