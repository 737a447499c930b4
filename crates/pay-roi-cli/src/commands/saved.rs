use chrono::Utc;
use clap::{Args, Subcommand};
use serde_json::{json, Value};

use pay_roi_core::storage::CalculationStore;
use pay_roi_core::EngineConfig;

use super::load_calculator;
use crate::input;

const DEFAULT_STORE: &str = "payroi-store.json";

#[derive(Args)]
pub struct StoreArgs {
    /// Path to the saved-calculations document (created on first save)
    #[arg(long, default_value = DEFAULT_STORE)]
    pub store: String,
}

#[derive(Subcommand)]
pub enum SavedCommand {
    /// List saved calculations, newest first
    List(StoreArgs),
    /// Save a calculation under a name (updates an existing entry of the same name)
    Save {
        #[command(flatten)]
        store: StoreArgs,
        /// Name for the calculation; numbered automatically when omitted
        #[arg(long)]
        name: Option<String>,
        /// Path to JSON calculation snapshot
        #[arg(long)]
        input: Option<String>,
    },
    /// Print a saved calculation's snapshot
    Load {
        #[command(flatten)]
        store: StoreArgs,
        #[arg(long)]
        id: String,
    },
    /// Remove a saved calculation
    Delete {
        #[command(flatten)]
        store: StoreArgs,
        #[arg(long)]
        id: String,
    },
    /// Remove all saved calculations
    Clear(StoreArgs),
    /// Keep only the most recently updated calculations
    Cleanup(StoreArgs),
}

fn open_store(path: &str) -> Result<CalculationStore, Box<dyn std::error::Error>> {
    match input::file::read_text_if_exists(path)? {
        Some(text) => Ok(CalculationStore::from_json_str(&text)?),
        None => Ok(CalculationStore::new(Utc::now())),
    }
}

fn write_store(path: &str, store: &CalculationStore) -> Result<(), Box<dyn std::error::Error>> {
    input::file::write_text(path, &store.to_json_string()?)
}

pub fn run_saved(cmd: SavedCommand, config: &EngineConfig) -> Result<Value, Box<dyn std::error::Error>> {
    match cmd {
        SavedCommand::List(args) => {
            let store = open_store(&args.store)?;
            Ok(serde_json::to_value(store.list())?)
        }
        SavedCommand::Save { store: args, name, input } => {
            let calc = load_calculator(input.as_deref(), config)?;
            let mut store = open_store(&args.store)?;
            let now = Utc::now();
            store.save_current(calc.export_snapshot(), now);
            let saved = store.save_named(name.as_deref(), calc.export_snapshot(), now);
            let summary = json!({
                "id": saved.id,
                "name": saved.name,
                "createdAt": saved.created_at,
                "updatedAt": saved.updated_at,
            });
            write_store(&args.store, &store)?;
            Ok(summary)
        }
        SavedCommand::Load { store: args, id } => {
            let store = open_store(&args.store)?;
            let data = store
                .load(&id)
                .ok_or_else(|| format!("No saved calculation with id '{id}'"))?;
            Ok(serde_json::to_value(data)?)
        }
        SavedCommand::Delete { store: args, id } => {
            let mut store = open_store(&args.store)?;
            if !store.delete(&id, Utc::now()) {
                return Err(format!("No saved calculation with id '{id}'").into());
            }
            write_store(&args.store, &store)?;
            Ok(json!({ "deleted": id, "remaining": store.list().len() }))
        }
        SavedCommand::Clear(args) => {
            let mut store = open_store(&args.store)?;
            store.clear(Utc::now());
            write_store(&args.store, &store)?;
            Ok(json!({ "remaining": 0 }))
        }
        SavedCommand::Cleanup(args) => {
            let mut store = open_store(&args.store)?;
            store.cleanup_old();
            write_store(&args.store, &store)?;
            Ok(serde_json::to_value(store.list())?)
        }
    }
}
