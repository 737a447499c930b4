use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::Percent;

/// Report categories that carry an explanatory "value driver" note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueDriverCategory {
    LocalRail,
    CrossBorder,
    Fx,
    Cards,
}

struct Band {
    min: Decimal,
    max: Decimal,
    message: &'static str,
}

const NO_SAVINGS: &str = "No savings in this category";

fn bands(category: ValueDriverCategory) -> [Band; 3] {
    let [low, mid, high] = match category {
        ValueDriverCategory::LocalRail => [
            "Savings through Pay+ local payment routing optimization",
            "Significant savings through Pay+ optimized payment processing",
            "Exceptional savings from leveraging Pay+ payment processing economics",
        ],
        ValueDriverCategory::CrossBorder => [
            "Initial cross-border payment optimization with competitive rates",
            "Savings through strong Pay+ cross-border processing efficiency",
            "Savings through market-leading Pay+ cross-border processing efficiency",
        ],
        ValueDriverCategory::Fx => [
            "Competitive Pay+ FX margins providing baseline savings across tiers",
            "Excellent Pay+ FX pricing with substantial margin improvements",
            "Industry-leading FX rates delivering maximum savings leveraging Pay+ global network",
        ],
        ValueDriverCategory::Cards => [
            "Improved card rebate rates through optimized processing",
            "Significant card processing savings via enhanced rebate agreements",
            "Exceptional card rebate value with best-in-class rates and processing",
        ],
    };
    [
        Band { min: dec!(0), max: dec!(20), message: low },
        Band { min: dec!(20), max: dec!(50), message: mid },
        Band { min: dec!(50), max: dec!(100), message: high },
    ]
}

/// Explanatory note for a category given its savings percentage.
///
/// Bands are half-open `[min, max)`; anything at or beyond the top band
/// (e.g. exactly 100%) gets the top band's message.
pub fn value_driver_note(category: ValueDriverCategory, savings_percent: Percent) -> &'static str {
    if savings_percent <= Decimal::ZERO {
        return NO_SAVINGS;
    }
    let bands = bands(category);
    bands
        .iter()
        .find(|b| savings_percent >= b.min && savings_percent < b.max)
        .unwrap_or(&bands[bands.len() - 1])
        .message
}
