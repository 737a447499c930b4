use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use pay_roi_core::currency::convert;
use pay_roi_core::{round_cents, Currency, EngineConfig};

use super::load_calculator;

/// Arguments for a one-off currency conversion
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ConvertArgs {
    /// Amount to convert
    #[arg(long)]
    pub amount: Decimal,

    /// Source currency (USD, GBP, EUR)
    #[arg(long)]
    pub from: Currency,

    /// Target currency (USD, GBP, EUR)
    #[arg(long)]
    pub to: Currency,
}

#[derive(Args)]
pub struct SetCurrencyArgs {
    /// New base currency (USD, GBP, EUR)
    #[arg(long)]
    pub currency: Currency,

    /// Path to JSON calculation snapshot
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_convert(args: ConvertArgs, config: &EngineConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let rates = &config.exchange_rates;
    let converted = convert(rates, args.amount, args.from, args.to)?;
    Ok(json!({
        "amount": args.amount,
        "from": args.from,
        "to": args.to,
        "factor": rates.factor(args.from, args.to)?,
        "converted": round_cents(converted),
        "symbol": args.to.symbol(),
        "available": rates.currencies().map(Currency::code).collect::<Vec<_>>(),
    }))
}

pub fn run_set_currency(
    args: SetCurrencyArgs,
    config: &EngineConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let mut calc = load_calculator(args.input.as_deref(), config)?;
    calc.set_currency(args.currency)?;
    Ok(serde_json::to_value(calc.export_snapshot())?)
}
