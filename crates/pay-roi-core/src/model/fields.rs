use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

use crate::allocation::FxTier;
use crate::error::PayRoiError;
use crate::model::snapshot::{CustomerInfo, FeeSchedule};
use crate::types::{
    check_magnitude, round_count, MAX_FLAT_FEE, MAX_PAYMENT_COUNT, MAX_PAYMENT_VALUE, MAX_PERCENT_INPUT,
};
use crate::PayRoiResult;

// ---------------------------------------------------------------------------
// Incoming values
// ---------------------------------------------------------------------------

/// A value arriving from a form field or a generic caller: either already
/// numeric or raw text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(Decimal),
    Text(String),
}

impl FieldValue {
    /// Coerce to a number. Thousands separators are stripped; anything that
    /// still fails to parse becomes zero.
    pub fn to_decimal(&self) -> Decimal {
        match self {
            FieldValue::Number(d) => *d,
            FieldValue::Text(s) => {
                let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
                if cleaned.is_empty() {
                    return Decimal::ZERO;
                }
                Decimal::from_str(&cleaned)
                    .or_else(|_| Decimal::from_scientific(&cleaned))
                    .unwrap_or_else(|_| {
                        warn!(input = %s, "non-numeric field value, using 0");
                        Decimal::ZERO
                    })
            }
        }
    }
}

impl From<Decimal> for FieldValue {
    fn from(d: Decimal) -> Self {
        FieldValue::Number(d)
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        FieldValue::Number(Decimal::from(n))
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(Decimal::from(n))
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

// ---------------------------------------------------------------------------
// Customer fields
// ---------------------------------------------------------------------------

/// Every numeric customer input that can be set individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CustomerField {
    TotalPaymentValue,
    TotalPaymentCount,
    LocalPercent,
    CrossBorderPercent,
    RailPercent,
    CardPercent,
    FxPercentOfCrossBorder,
    FxTierPercent(FxTier),
}

impl CustomerField {
    pub const ALL: [CustomerField; 10] = [
        CustomerField::TotalPaymentValue,
        CustomerField::TotalPaymentCount,
        CustomerField::LocalPercent,
        CustomerField::CrossBorderPercent,
        CustomerField::RailPercent,
        CustomerField::CardPercent,
        CustomerField::FxPercentOfCrossBorder,
        CustomerField::FxTierPercent(FxTier::Tier1),
        CustomerField::FxTierPercent(FxTier::Tier2),
        CustomerField::FxTierPercent(FxTier::Tier3),
    ];

    /// Dotted path into the persisted snapshot.
    pub fn path(&self) -> &'static str {
        match self {
            CustomerField::TotalPaymentValue => "totalPaymentValue",
            CustomerField::TotalPaymentCount => "totalPaymentCount",
            CustomerField::LocalPercent => "paymentTypeDistribution.localPercent",
            CustomerField::CrossBorderPercent => "paymentTypeDistribution.crossBorderPercent",
            CustomerField::RailPercent => "paymentMethodDistribution.railPercent",
            CustomerField::CardPercent => "paymentMethodDistribution.cardPercent",
            CustomerField::FxPercentOfCrossBorder => "fxPercentOfCrossBorder",
            CustomerField::FxTierPercent(FxTier::Tier1) => "fxVolume.distribution.tier1Percent",
            CustomerField::FxTierPercent(FxTier::Tier2) => "fxVolume.distribution.tier2Percent",
            CustomerField::FxTierPercent(FxTier::Tier3) => "fxVolume.distribution.tier3Percent",
        }
    }

    /// Largest magnitude this field accepts.
    pub fn limit(&self) -> Decimal {
        match self {
            CustomerField::TotalPaymentValue => MAX_PAYMENT_VALUE,
            CustomerField::TotalPaymentCount => Decimal::from(MAX_PAYMENT_COUNT),
            _ => MAX_PERCENT_INPUT,
        }
    }

    pub fn check(&self, value: Decimal) -> PayRoiResult<()> {
        check_magnitude(self.path(), value, self.limit())
    }

    /// Write `value` into `info`. Counts are rounded to the nearest integer.
    pub fn apply(&self, info: &mut CustomerInfo, value: Decimal) {
        match self {
            CustomerField::TotalPaymentValue => info.total_payment_value = value,
            CustomerField::TotalPaymentCount => {
                info.total_payment_count = round_count(value).unwrap_or(0)
            }
            CustomerField::LocalPercent => info.payment_type_distribution.local_percent = value,
            CustomerField::CrossBorderPercent => {
                info.payment_type_distribution.cross_border_percent = value
            }
            CustomerField::RailPercent => info.payment_method_distribution.rail_percent = value,
            CustomerField::CardPercent => info.payment_method_distribution.card_percent = value,
            CustomerField::FxPercentOfCrossBorder => info.fx_percent_of_cross_border = value,
            CustomerField::FxTierPercent(FxTier::Tier1) => {
                info.fx_volume.distribution.tier1_percent = value
            }
            CustomerField::FxTierPercent(FxTier::Tier2) => {
                info.fx_volume.distribution.tier2_percent = value
            }
            CustomerField::FxTierPercent(FxTier::Tier3) => {
                info.fx_volume.distribution.tier3_percent = value
            }
        }
    }

    pub fn read(&self, info: &CustomerInfo) -> Decimal {
        match self {
            CustomerField::TotalPaymentValue => info.total_payment_value,
            CustomerField::TotalPaymentCount => Decimal::from(info.total_payment_count),
            CustomerField::LocalPercent => info.payment_type_distribution.local_percent,
            CustomerField::CrossBorderPercent => info.payment_type_distribution.cross_border_percent,
            CustomerField::RailPercent => info.payment_method_distribution.rail_percent,
            CustomerField::CardPercent => info.payment_method_distribution.card_percent,
            CustomerField::FxPercentOfCrossBorder => info.fx_percent_of_cross_border,
            CustomerField::FxTierPercent(tier) => info.fx_volume.distribution.get(*tier),
        }
    }
}

impl FromStr for CustomerField {
    type Err = PayRoiError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        CustomerField::ALL
            .iter()
            .copied()
            .find(|f| f.path() == path)
            .ok_or_else(|| PayRoiError::UnknownField {
                entity: "customerInfo".into(),
                path: path.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// Fee fields
// ---------------------------------------------------------------------------

/// Every settable field of a fee schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeeField {
    LocalRailFee,
    CrossBorderFee,
    FxMargin(FxTier),
    CardRebate,
}

/// Field names older callers still send, and their current equivalents.
const LEGACY_FEE_NAMES: [(&str, &str); 2] = [
    ("localRail", "localRailFee"),
    ("crossBorder", "crossBorderFee"),
];

impl FeeField {
    pub const ALL: [FeeField; 6] = [
        FeeField::LocalRailFee,
        FeeField::CrossBorderFee,
        FeeField::FxMargin(FxTier::Tier1),
        FeeField::FxMargin(FxTier::Tier2),
        FeeField::FxMargin(FxTier::Tier3),
        FeeField::CardRebate,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            FeeField::LocalRailFee => "localRailFee",
            FeeField::CrossBorderFee => "crossBorderFee",
            FeeField::FxMargin(FxTier::Tier1) => "fxMargins.tier1",
            FeeField::FxMargin(FxTier::Tier2) => "fxMargins.tier2",
            FeeField::FxMargin(FxTier::Tier3) => "fxMargins.tier3",
            FeeField::CardRebate => "cardRebate",
        }
    }

    /// Flat per-transaction fees are money; the rest are percentages.
    pub fn is_monetary(&self) -> bool {
        matches!(self, FeeField::LocalRailFee | FeeField::CrossBorderFee)
    }

    pub fn limit(&self) -> Decimal {
        if self.is_monetary() {
            MAX_FLAT_FEE
        } else {
            MAX_PERCENT_INPUT
        }
    }

    pub fn check(&self, value: Decimal) -> PayRoiResult<()> {
        check_magnitude(self.path(), value, self.limit())
    }

    pub fn apply(&self, schedule: &mut FeeSchedule, value: Decimal) {
        match self {
            FeeField::LocalRailFee => schedule.local_rail_fee = value,
            FeeField::CrossBorderFee => schedule.cross_border_fee = value,
            FeeField::FxMargin(FxTier::Tier1) => schedule.fx_margins.tier1 = value,
            FeeField::FxMargin(FxTier::Tier2) => schedule.fx_margins.tier2 = value,
            FeeField::FxMargin(FxTier::Tier3) => schedule.fx_margins.tier3 = value,
            FeeField::CardRebate => schedule.card_rebate = value,
        }
    }

    pub fn read(&self, schedule: &FeeSchedule) -> Decimal {
        match self {
            FeeField::LocalRailFee => schedule.local_rail_fee,
            FeeField::CrossBorderFee => schedule.cross_border_fee,
            FeeField::FxMargin(tier) => schedule.fx_margins.get(*tier),
            FeeField::CardRebate => schedule.card_rebate,
        }
    }
}

impl FromStr for FeeField {
    type Err = PayRoiError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let resolved = LEGACY_FEE_NAMES
            .iter()
            .find(|(old, _)| *old == path)
            .map(|(_, new)| *new)
            .unwrap_or(path);
        FeeField::ALL
            .iter()
            .copied()
            .find(|f| f.path() == resolved)
            .ok_or_else(|| PayRoiError::UnknownField {
                entity: "fees".into(),
                path: path.to_string(),
            })
    }
}
