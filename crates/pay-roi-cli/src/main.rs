mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::calculate::{CalculateArgs, ReportArgs, ValidateArgs};
use commands::currency::{ConvertArgs, SetCurrencyArgs};
use commands::edit::{AdjustFxTierArgs, AdjustSplitArgs, UpdateArgs};
use commands::saved::SavedCommand;

/// Payments optimisation ROI calculations
#[derive(Parser)]
#[command(
    name = "payroi",
    version,
    about = "Payments optimisation ROI calculations",
    long_about = "A CLI for modelling the annual cost and rebate impact of moving a \
                  customer's payment flows to a new provider. Supports payment \
                  breakdowns, fee edits, FX tier rebalancing, currency switching, \
                  savings reports and saved calculations."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Engine configuration (exchange rates and defaults), JSON or YAML
    #[arg(long, global = true)]
    config: Option<String>,

    /// Log engine activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute breakdown, costs, savings and total annual benefit
    Calculate(CalculateArgs),
    /// Set a customer field or provider fee by dotted path
    Update(UpdateArgs),
    /// Move one FX tier and rebalance the other two
    AdjustFxTier(AdjustFxTierArgs),
    /// Move the local/cross-border or rail/card split, keeping it at 100%
    AdjustSplit(AdjustSplitArgs),
    /// Convert an amount between currencies
    Convert(ConvertArgs),
    /// Switch a calculation's base currency
    SetCurrency(SetCurrencyArgs),
    /// Check a calculation for range and distribution errors
    Validate(ValidateArgs),
    /// Build the savings report with value-driver notes
    Report(ReportArgs),
    /// Print the default calculation
    Defaults,
    /// Manage saved calculations
    #[command(subcommand)]
    Saved(SavedCommand),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match input::file::read_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Calculate(args) => commands::calculate::run_calculate(args, &config),
        Commands::Update(args) => commands::edit::run_update(args, &config),
        Commands::AdjustFxTier(args) => commands::edit::run_adjust_fx_tier(args, &config),
        Commands::AdjustSplit(args) => commands::edit::run_adjust_split(args, &config),
        Commands::Convert(args) => commands::currency::run_convert(args, &config),
        Commands::SetCurrency(args) => commands::currency::run_set_currency(args, &config),
        Commands::Validate(args) => commands::calculate::run_validate(args, &config),
        Commands::Report(args) => commands::calculate::run_report(args, &config),
        Commands::Defaults => commands::calculate::run_defaults(&config),
        Commands::Saved(cmd) => commands::saved::run_saved(cmd, &config),
        Commands::Version => {
            println!("payroi {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
