use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::breakdown::{
    average_transaction_size, calculate_breakdown, calculate_fx_volumes, FxVolumes,
    PaymentBreakdown,
};
use crate::costs::{aggregate, calculate_provider_costs, CostComparison, IncentiveComparison, ProviderCosts};
use crate::engine::validation::{check_bounds, validate};
use crate::model::{CalculationData, Provider};
use crate::types::{with_metadata, ComputationOutput, Currency, Money};
use crate::PayRoiResult;

/// Per-provider cost detail, kept for charts and the savings report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedCosts {
    pub current: ProviderCosts,
    pub tungsten: ProviderCosts,
}

/// Everything derived from one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Results {
    pub breakdown: PaymentBreakdown,
    pub fx_volumes: FxVolumes,
    pub average_transaction_size: Money,
    pub costs: CostComparison,
    pub incentives: IncentiveComparison,
    pub total_annual_benefit: Money,
    /// Card value, reported alongside but never added to the benefit
    pub freed_working_capital: Money,
    pub detailed_costs: DetailedCosts,
    pub currency: Currency,
    pub currency_symbol: String,
    /// The inputs these results were computed from
    pub data: CalculationData,
}

/// Run the full pipeline: breakdown, FX volumes, both providers' costs,
/// then the comparison.
///
/// `data` must pass [`check_bounds`]; larger inputs can overflow Decimal.
/// Snapshots held by `RoiCalculator` always do.
pub fn compute_results(data: &CalculationData) -> Results {
    let info = &data.customer_info;
    let breakdown = calculate_breakdown(info);
    let fx_volumes = calculate_fx_volumes(info, &breakdown);

    let price = |provider: Provider| {
        calculate_provider_costs(
            &breakdown,
            &fx_volumes,
            data.fees.get(provider),
            info.total_payment_value,
            info.total_payment_count,
        )
    };
    let current = price(Provider::CurrentProvider);
    let tungsten = price(Provider::Tungsten);
    let savings = aggregate(&current, &tungsten);

    Results {
        average_transaction_size: average_transaction_size(info),
        costs: savings.costs,
        incentives: savings.incentives,
        total_annual_benefit: savings.total_annual_benefit,
        freed_working_capital: breakdown.method.card.value,
        detailed_costs: DetailedCosts { current, tungsten },
        currency: info.currency,
        currency_symbol: info.currency.symbol().to_string(),
        data: data.clone(),
        breakdown,
        fx_volumes,
    }
}

/// Compute results wrapped in the standard output envelope. Validation
/// problems do not stop the calculation; they are carried as warnings.
pub fn calculate_roi(data: &CalculationData) -> PayRoiResult<ComputationOutput<Results>> {
    let start = Instant::now();
    check_bounds(data)?;

    let report = validate(data);
    let mut warnings = report.errors;

    let results = compute_results(data);

    if results.total_annual_benefit < Decimal::ZERO {
        warnings.push("Alternative provider is more expensive overall (negative annual benefit)".into());
    }
    if data.customer_info.total_payment_count == 0 {
        warnings.push("Total payment count is zero; per-transaction metrics reported as 0".into());
    }

    let info = &data.customer_info;
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Provider cost comparison: method-then-type payment split with tiered FX margins",
        &serde_json::json!({
            "currency": info.currency.code(),
            "total_payment_value": info.total_payment_value.to_string(),
            "total_payment_count": info.total_payment_count,
            "rail_percent": info.payment_method_distribution.rail_percent.to_string(),
            "local_percent": info.payment_type_distribution.local_percent.to_string(),
            "fx_percent_of_cross_border": info.fx_percent_of_cross_border.to_string(),
        }),
        warnings,
        elapsed,
        results,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_results() {
        let r = compute_results(&CalculationData::default());
        assert_eq!(r.costs.current, dec!(2036025));
        assert_eq!(r.costs.tungsten, dec!(1122525));
        assert_eq!(r.costs.savings.total, dec!(913500));
        assert_eq!(r.incentives.differential, dec!(25000));
        assert_eq!(r.incentives.increase_percentage, dec!(50));
        assert_eq!(r.total_annual_benefit, dec!(938500));
        assert_eq!(r.freed_working_capital, dec!(5000000));
        assert_eq!(r.currency_symbol, "$");
    }

    #[test]
    fn test_recompute_is_identical() {
        let data = CalculationData::default();
        assert_eq!(compute_results(&data), compute_results(&data));
    }

    #[test]
    fn test_oversized_value_is_an_error_not_a_panic() {
        let mut data = CalculationData::default();
        data.customer_info.total_payment_value = dec!(70000000000000000000000000000);
        let err = calculate_roi(&data).unwrap_err();
        assert!(matches!(err, crate::PayRoiError::InvalidInput { .. }));
    }

    #[test]
    fn test_envelope_carries_validation_warnings() {
        let mut data = CalculationData::default();
        data.customer_info.fx_volume.distribution.tier1_percent = dec!(10);
        let out = calculate_roi(&data).unwrap();
        assert!(out
            .warnings
            .iter()
            .any(|w| w.contains("FX tier distribution")));
        assert!(out.result.total_annual_benefit > Decimal::ZERO);
    }
}
