use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;

use pay_roi_core::allocation::FxTier;
use pay_roi_core::model::Provider;
use pay_roi_core::report::SavingsReport;
use pay_roi_core::{Currency, RoiCalculator};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn calculator_from(snapshot_json: &str) -> NapiResult<RoiCalculator> {
    let value: serde_json::Value = serde_json::from_str(snapshot_json).map_err(to_napi_error)?;
    let mut calc = RoiCalculator::new();
    calc.import_snapshot(&value).map_err(to_napi_error)?;
    Ok(calc)
}

fn snapshot_json(calc: &RoiCalculator) -> NapiResult<String> {
    serde_json::to_string(calc.data()).map_err(to_napi_error)
}

fn decimal_from(value: f64, field: &str) -> NapiResult<Decimal> {
    Decimal::try_from(value).map_err(|_| to_napi_error(format!("{field} is not a finite number")))
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_results(snapshot: String) -> NapiResult<String> {
    let calc = calculator_from(&snapshot)?;
    let output = pay_roi_core::calculate_roi(calc.data()).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn validate_calculation(snapshot: String) -> NapiResult<String> {
    let calc = calculator_from(&snapshot)?;
    serde_json::to_string(&calc.validate()).map_err(to_napi_error)
}

#[napi]
pub fn savings_report(snapshot: String) -> NapiResult<String> {
    let calc = calculator_from(&snapshot)?;
    let report = SavingsReport::from_results(&calc.compute_results());
    serde_json::to_string(&report).map_err(to_napi_error)
}

#[napi]
pub fn default_snapshot() -> NapiResult<String> {
    snapshot_json(&RoiCalculator::new())
}

// ---------------------------------------------------------------------------
// Edits (each returns the updated snapshot)
// ---------------------------------------------------------------------------

#[napi]
pub fn update_field(snapshot: String, path: String, value: String) -> NapiResult<String> {
    let mut calc = calculator_from(&snapshot)?;
    calc.update_field(&path, value).map_err(to_napi_error)?;
    snapshot_json(&calc)
}

#[napi]
pub fn set_fee(snapshot: String, provider: String, path: String, value: String) -> NapiResult<String> {
    let provider: Provider = provider.parse().map_err(to_napi_error)?;
    let mut calc = calculator_from(&snapshot)?;
    calc.set_fee(provider, &path, value).map_err(to_napi_error)?;
    snapshot_json(&calc)
}

#[napi]
pub fn adjust_fx_tier(snapshot: String, tier: u32, percent: f64) -> NapiResult<String> {
    let tier = u8::try_from(tier)
        .ok()
        .and_then(FxTier::from_number)
        .ok_or_else(|| to_napi_error("tier must be 1, 2 or 3"))?;
    let percent = decimal_from(percent, "percent")?;
    let mut calc = calculator_from(&snapshot)?;
    calc.adjust_fx_tier(tier, percent);
    snapshot_json(&calc)
}

/// Set the local share; cross-border takes the rest.
#[napi]
pub fn adjust_type_split(snapshot: String, local_percent: f64) -> NapiResult<String> {
    let local_percent = decimal_from(local_percent, "localPercent")?;
    let mut calc = calculator_from(&snapshot)?;
    calc.adjust_type_split(local_percent);
    snapshot_json(&calc)
}

/// Set the rail share; cards take the rest.
#[napi]
pub fn adjust_method_split(snapshot: String, rail_percent: f64) -> NapiResult<String> {
    let rail_percent = decimal_from(rail_percent, "railPercent")?;
    let mut calc = calculator_from(&snapshot)?;
    calc.adjust_method_split(rail_percent);
    snapshot_json(&calc)
}

#[napi]
pub fn set_currency(snapshot: String, currency: String) -> NapiResult<String> {
    let currency: Currency = currency.parse().map_err(to_napi_error)?;
    let mut calc = calculator_from(&snapshot)?;
    calc.set_currency(currency).map_err(to_napi_error)?;
    snapshot_json(&calc)
}

// ---------------------------------------------------------------------------
// Currency helpers
// ---------------------------------------------------------------------------

/// Converted amount as a decimal string, rounded to cents.
#[napi]
pub fn convert_currency(amount: f64, from: String, to: String) -> NapiResult<String> {
    let amount = decimal_from(amount, "amount")?;
    let from: Currency = from.parse().map_err(to_napi_error)?;
    let to: Currency = to.parse().map_err(to_napi_error)?;
    let calc = RoiCalculator::new();
    let converted = calc
        .exchange_rates()
        .convert_rounded(amount, from, to)
        .map_err(to_napi_error)?;
    Ok(converted.to_string())
}

#[napi]
pub fn currency_symbol(code: String) -> String {
    pay_roi_core::currency::currency_symbol(&code).to_string()
}
