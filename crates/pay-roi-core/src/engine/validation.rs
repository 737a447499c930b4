use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::allocation::sums_to_hundred;
use crate::error::PayRoiError;
use crate::model::{CalculationData, CustomerField, FeeField, Provider};
use crate::types::{check_magnitude, Percent, ONE_HUNDRED};
use crate::PayRoiResult;

/// Outcome of checking a snapshot. Never an error: problems are listed as
/// human-readable messages for the caller to surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

fn check_percent(errors: &mut Vec<String>, label: &str, value: Percent) {
    if value < Decimal::ZERO || value > ONE_HUNDRED {
        errors.push(format!("{label} must be between 0 and 100 (got {value})"));
    }
}

fn check_sum(errors: &mut Vec<String>, label: &str, values: &[Percent]) {
    if !sums_to_hundred(values) {
        let total: Decimal = values.iter().copied().sum();
        errors.push(format!("{label} must sum to 100% (got {total}%)"));
    }
}

/// Every field whose magnitude is beyond what the engine computes with.
fn bound_violations(data: &CalculationData) -> Vec<PayRoiError> {
    let info = &data.customer_info;
    let mut out: Vec<PayRoiError> = CustomerField::ALL
        .iter()
        .filter_map(|field| field.check(field.read(info)).err())
        .collect();
    for provider in [Provider::CurrentProvider, Provider::Tungsten] {
        let schedule = data.fees.get(provider);
        out.extend(FeeField::ALL.iter().filter_map(|field| {
            let label = format!("{provider}.{}", field.path());
            check_magnitude(&label, field.read(schedule), field.limit()).err()
        }));
    }
    out
}

/// Fail on the first out-of-range field. A snapshot that passes can be
/// computed without arithmetic overflow.
pub fn check_bounds(data: &CalculationData) -> PayRoiResult<()> {
    match bound_violations(data).into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

pub fn validate(data: &CalculationData) -> ValidationReport {
    let mut errors: Vec<String> = bound_violations(data)
        .into_iter()
        .map(|e| e.to_string())
        .collect();
    let info = &data.customer_info;
    let type_dist = &info.payment_type_distribution;
    let method_dist = &info.payment_method_distribution;
    let tiers = info.fx_volume.distribution.as_array();

    if info.total_payment_value < Decimal::ZERO {
        errors.push("Total payment value must not be negative".to_string());
    }
    if info.total_payment_count < 0 {
        errors.push("Total payment count must not be negative".to_string());
    }

    check_percent(&mut errors, "Local payment percentage", type_dist.local_percent);
    check_percent(&mut errors, "Cross-border payment percentage", type_dist.cross_border_percent);
    check_percent(&mut errors, "Rail payment percentage", method_dist.rail_percent);
    check_percent(&mut errors, "Card payment percentage", method_dist.card_percent);
    check_percent(&mut errors, "FX percentage of cross-border", info.fx_percent_of_cross_border);
    for (i, tier) in tiers.iter().enumerate() {
        check_percent(&mut errors, &format!("FX tier {} percentage", i + 1), *tier);
    }

    check_sum(
        &mut errors,
        "Payment type distribution",
        &[type_dist.local_percent, type_dist.cross_border_percent],
    );
    check_sum(
        &mut errors,
        "Payment method distribution",
        &[method_dist.rail_percent, method_dist.card_percent],
    );
    check_sum(&mut errors, "FX tier distribution", &tiers);

    for provider in [Provider::CurrentProvider, Provider::Tungsten] {
        let schedule = data.fees.get(provider);
        for field in FeeField::ALL {
            let value = field.read(schedule);
            let label = format!("{provider} {}", field.path());
            if field.is_monetary() {
                if value < Decimal::ZERO {
                    errors.push(format!("{label} must not be negative (got {value})"));
                }
            } else {
                check_percent(&mut errors, &label, value);
            }
        }
    }

    ValidationReport::from_errors(errors)
}
