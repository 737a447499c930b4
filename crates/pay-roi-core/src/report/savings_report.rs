use serde::{Deserialize, Serialize};

use crate::engine::Results;
use crate::report::format::{format_currency, CurrencyStyle};
use crate::report::value_drivers::{value_driver_note, ValueDriverCategory};
use crate::types::{percent_of, Money, Percent};

/// One line of the cost comparison table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsRow {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ValueDriverCategory>,
    pub current: Money,
    pub tungsten: Money,
    pub savings: Money,
    pub percent_saved: Percent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_driver: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncentiveRow {
    pub label: String,
    pub current: Money,
    pub tungsten: Money,
    pub differential: Money,
    pub increase_percentage: Percent,
    pub value_driver: String,
}

/// The figures behind the exported savings report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsReport {
    pub currency_symbol: String,
    pub cost_rows: Vec<SavingsRow>,
    pub total_row: SavingsRow,
    pub incentive_row: IncentiveRow,
    pub total_annual_benefit: Money,
    /// "Cost savings: X + Incentive differential: Y"
    pub benefit_summary: String,
}

fn cost_row(label: &str, category: ValueDriverCategory, current: Money, tungsten: Money, savings: Money) -> SavingsRow {
    let percent_saved = if current > Money::ZERO {
        percent_of(savings, current)
    } else {
        Money::ZERO
    };
    SavingsRow {
        label: label.to_string(),
        category: Some(category),
        current,
        tungsten,
        savings,
        percent_saved,
        value_driver: Some(value_driver_note(category, percent_saved).to_string()),
    }
}

impl SavingsReport {
    pub fn from_results(results: &Results) -> Self {
        build_savings_report(results)
    }
}

pub fn build_savings_report(results: &Results) -> SavingsReport {
    let current = &results.detailed_costs.current;
    let tungsten = &results.detailed_costs.tungsten;
    let savings = &results.costs.savings;
    let symbol = results.currency_symbol.as_str();

    let cost_rows = vec![
        cost_row(
            "Local rail",
            ValueDriverCategory::LocalRail,
            current.local_rail,
            tungsten.local_rail,
            savings.local_rail,
        ),
        cost_row(
            "Cross-border",
            ValueDriverCategory::CrossBorder,
            current.cross_border_rail,
            tungsten.cross_border_rail,
            savings.cross_border_rail,
        ),
        cost_row(
            "FX",
            ValueDriverCategory::Fx,
            current.fx.total,
            tungsten.fx.total,
            savings.fx,
        ),
    ];

    let total_row = SavingsRow {
        label: "TOTAL COSTS".to_string(),
        category: None,
        current: results.costs.current,
        tungsten: results.costs.tungsten,
        savings: savings.total,
        percent_saved: results.costs.savings_percentage,
        value_driver: None,
    };

    let incentives = &results.incentives;
    let incentive_row = IncentiveRow {
        label: "Card rebates".to_string(),
        current: incentives.current,
        tungsten: incentives.tungsten,
        differential: incentives.differential,
        increase_percentage: incentives.increase_percentage,
        value_driver: value_driver_note(
            ValueDriverCategory::Cards,
            incentives.increase_percentage.abs(),
        )
        .to_string(),
    };

    let benefit_summary = format!(
        "Cost savings: {} + Incentive differential: {}",
        format_currency(savings.total, 0, symbol, CurrencyStyle::Abbreviated),
        format_currency(incentives.differential, 0, symbol, CurrencyStyle::Abbreviated),
    );

    SavingsReport {
        currency_symbol: symbol.to_string(),
        cost_rows,
        total_row,
        incentive_row,
        total_annual_benefit: results.total_annual_benefit,
        benefit_summary,
    }
}
