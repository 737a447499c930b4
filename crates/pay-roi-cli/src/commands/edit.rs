use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use pay_roi_core::allocation::FxTier;
use pay_roi_core::model::Provider;
use pay_roi_core::EngineConfig;

use super::load_calculator;

/// Arguments for a single field edit
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct UpdateArgs {
    /// Dotted field path, e.g. paymentTypeDistribution.localPercent or fxMargins.tier2
    #[arg(long)]
    pub path: String,

    /// New value; thousands separators are accepted
    #[arg(long)]
    pub value: String,

    /// Edit this provider's fee schedule instead of the customer info
    /// (tungsten or currentProvider)
    #[arg(long)]
    pub provider: Option<Provider>,

    /// Path to JSON calculation snapshot
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for FX tier rebalancing
#[derive(Args)]
pub struct AdjustFxTierArgs {
    /// Tier to set (1, 2 or 3)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=3))]
    pub tier: u8,

    /// New share for the tier, clamped to 0-100
    #[arg(long)]
    pub percent: Decimal,

    /// Path to JSON calculation snapshot
    #[arg(long)]
    pub input: Option<String>,
}

/// Which two-way distribution to move
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SplitKind {
    /// Local vs cross-border (sets the local share)
    Type,
    /// Rail vs card (sets the rail share)
    Method,
}

/// Arguments for moving a two-way split
#[derive(Args)]
pub struct AdjustSplitArgs {
    #[arg(long, value_enum)]
    pub split: SplitKind,

    /// New share for the first side, clamped to 0-100; the other side takes the rest
    #[arg(long)]
    pub percent: Decimal,

    /// Path to JSON calculation snapshot
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_update(args: UpdateArgs, config: &EngineConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let mut calc = load_calculator(args.input.as_deref(), config)?;
    match args.provider {
        Some(provider) => calc.set_fee(provider, &args.path, args.value.as_str())?,
        None => calc.update_field(&args.path, args.value.as_str())?,
    }
    Ok(serde_json::to_value(calc.export_snapshot())?)
}

pub fn run_adjust_fx_tier(
    args: AdjustFxTierArgs,
    config: &EngineConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let tier = FxTier::from_number(args.tier).ok_or("--tier must be 1, 2 or 3")?;
    let mut calc = load_calculator(args.input.as_deref(), config)?;
    calc.adjust_fx_tier(tier, args.percent);
    Ok(serde_json::to_value(calc.export_snapshot())?)
}

pub fn run_adjust_split(
    args: AdjustSplitArgs,
    config: &EngineConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let mut calc = load_calculator(args.input.as_deref(), config)?;
    match args.split {
        SplitKind::Type => calc.adjust_type_split(args.percent),
        SplitKind::Method => calc.adjust_method_split(args.percent),
    }
    Ok(serde_json::to_value(calc.export_snapshot())?)
}
