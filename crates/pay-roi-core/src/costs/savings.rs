use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::costs::provider::ProviderCosts;
use crate::types::{percent_of, Money, Percent};

/// Current minus alternative cost, per category. Positive means the
/// alternative is cheaper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySavings {
    pub local_rail: Money,
    pub cross_border_rail: Money,
    pub rails: Money,
    pub fx: Money,
    pub total: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostComparison {
    pub current: Money,
    pub tungsten: Money,
    pub savings: CategorySavings,
    pub savings_percentage: Percent,
}

/// Card rebate comparison. `differential` is alternative minus current, so a
/// larger rebate shows as a positive benefit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncentiveComparison {
    pub current: Money,
    pub tungsten: Money,
    pub differential: Money,
    pub increase_percentage: Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsResult {
    pub costs: CostComparison,
    pub incentives: IncentiveComparison,
    /// Cost savings plus incentive differential. Either part may be negative.
    pub total_annual_benefit: Money,
}

pub fn aggregate(current: &ProviderCosts, tungsten: &ProviderCosts) -> SavingsResult {
    let savings = CategorySavings {
        local_rail: current.local_rail - tungsten.local_rail,
        cross_border_rail: current.cross_border_rail - tungsten.cross_border_rail,
        rails: current.rails - tungsten.rails,
        fx: current.fx.total - tungsten.fx.total,
        total: current.total - tungsten.total,
    };

    let differential = tungsten.card_rebate - current.card_rebate;
    let total_annual_benefit = savings.total + differential;

    let savings_percentage = if current.total > Decimal::ZERO {
        percent_of(savings.total, current.total)
    } else {
        Decimal::ZERO
    };
    let increase_percentage = if current.card_rebate > Decimal::ZERO {
        percent_of(differential, current.card_rebate)
    } else {
        Decimal::ZERO
    };

    SavingsResult {
        costs: CostComparison {
            current: current.total,
            tungsten: tungsten.total,
            savings,
            savings_percentage,
        },
        incentives: IncentiveComparison {
            current: current.card_rebate,
            tungsten: tungsten.card_rebate,
            differential,
            increase_percentage,
        },
        total_annual_benefit,
    }
}
