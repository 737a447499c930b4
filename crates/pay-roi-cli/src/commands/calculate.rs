use clap::Args;
use serde_json::Value;

use pay_roi_core::report::SavingsReport;
use pay_roi_core::{calculate_roi, EngineConfig};

use super::load_calculator;

/// Arguments for the full ROI calculation
#[derive(Args)]
pub struct CalculateArgs {
    /// Path to JSON calculation snapshot (defaults when omitted and nothing is piped)
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Path to JSON calculation snapshot
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(Args)]
pub struct ReportArgs {
    /// Path to JSON calculation snapshot
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_calculate(args: CalculateArgs, config: &EngineConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let calc = load_calculator(args.input.as_deref(), config)?;
    let output = calculate_roi(calc.data())?;
    Ok(serde_json::to_value(output)?)
}

pub fn run_validate(args: ValidateArgs, config: &EngineConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let calc = load_calculator(args.input.as_deref(), config)?;
    Ok(serde_json::to_value(calc.validate())?)
}

pub fn run_report(args: ReportArgs, config: &EngineConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let calc = load_calculator(args.input.as_deref(), config)?;
    let report = SavingsReport::from_results(&calc.compute_results());
    Ok(serde_json::to_value(report)?)
}

pub fn run_defaults(config: &EngineConfig) -> Result<Value, Box<dyn std::error::Error>> {
    Ok(serde_json::to_value(&config.defaults)?)
}
