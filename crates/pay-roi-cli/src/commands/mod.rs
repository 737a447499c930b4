pub mod calculate;
pub mod currency;
pub mod edit;
pub mod saved;

use pay_roi_core::{EngineConfig, RoiCalculator};

use crate::input;

/// Build a calculator over the snapshot given by `--input`, piped stdin, or
/// the configured defaults, in that order.
pub fn load_calculator(
    path: Option<&str>,
    config: &EngineConfig,
) -> Result<RoiCalculator, Box<dyn std::error::Error>> {
    let mut calc = RoiCalculator::with_config(config.clone());
    if let Some(path) = path {
        let value = input::file::read_json_value(path)?;
        calc.import_snapshot(&value)?;
    } else if let Some(value) = input::stdin::read_stdin()? {
        calc.import_snapshot(&value)?;
    }
    Ok(calc)
}
