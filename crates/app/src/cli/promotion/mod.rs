use clap::{Args, Subcommand};
use gamestore::{Discount, Schedule};
use gamestore_app::domain::promotions::models::Promotion;
use jiff::Timestamp;
use rust_decimal::Decimal;
use uuid::Uuid;

mod active;
mod best;
mod create;
mod delete;
mod price;
mod show;
mod update;

#[derive(Debug, Args)]
pub(crate) struct PromotionCommand {
    #[command(subcommand)]
    command: PromotionSubcommand,
}

#[derive(Debug, Subcommand)]
enum PromotionSubcommand {
    Create(create::CreatePromotionArgs),
    Update(update::UpdatePromotionArgs),
    Delete(delete::DeletePromotionArgs),
    Show(show::ShowPromotionArgs),
    Active(active::ActivePromotionsArgs),
    Best(best::BestPromotionArgs),
    Price(price::PriceArgs),
}

pub(crate) async fn run(command: PromotionCommand) -> Result<(), String> {
    match command.command {
        PromotionSubcommand::Create(args) => create::run(args).await,
        PromotionSubcommand::Update(args) => update::run(args).await,
        PromotionSubcommand::Delete(args) => delete::run(args).await,
        PromotionSubcommand::Show(args) => show::run(args).await,
        PromotionSubcommand::Active(args) => active::run(args).await,
        PromotionSubcommand::Best(args) => best::run(args).await,
        PromotionSubcommand::Price(args) => price::run(args).await,
    }
}

/// Promotion fields shared by `create` and `update`.
#[derive(Debug, Args)]
pub(crate) struct PromotionTerms {
    /// Game the promotion applies to
    #[arg(long)]
    game_uuid: Uuid,

    /// Promotion title
    #[arg(long)]
    title: String,

    /// Promotion description
    #[arg(long, default_value = "")]
    description: String,

    /// Percentage off the list price, 0 to 100
    #[arg(long, default_value_t = Decimal::ZERO)]
    percentage: Decimal,

    /// Fixed amount off in minor currency units
    #[arg(long)]
    amount: Option<u64>,

    /// First instant the promotion applies (RFC 3339)
    #[arg(long)]
    starts_at: Timestamp,

    /// Last instant the promotion applies (RFC 3339)
    #[arg(long)]
    ends_at: Timestamp,

    /// Store the promotion switched off
    #[arg(long)]
    inactive: bool,
}

impl PromotionTerms {
    fn discount(&self) -> Discount {
        Discount {
            percentage: self.percentage,
            amount: self.amount,
        }
    }

    fn schedule(&self) -> Schedule {
        Schedule::new(self.starts_at, self.ends_at, !self.inactive)
    }
}

pub(crate) fn print_promotion(promotion: &Promotion) {
    println!("promotion_uuid: {}", promotion.uuid);
    println!("game_uuid: {}", promotion.game_uuid);
    println!("title: {}", promotion.title);

    if !promotion.description.is_empty() {
        println!("description: {}", promotion.description);
    }

    println!("percentage: {}", promotion.discount.percentage);
    println!(
        "amount: {}",
        promotion
            .discount
            .amount
            .map_or_else(|| "none".to_string(), |value| value.to_string())
    );
    println!("starts_at: {}", promotion.schedule.starts_at);
    println!("ends_at: {}", promotion.schedule.ends_at);
    println!("is_active: {}", promotion.schedule.is_active);
}
