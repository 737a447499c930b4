use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::allocation::FxTier;
use crate::error::PayRoiError;
use crate::types::{round_count, Count, Currency, Money, Percent};

// ---------------------------------------------------------------------------
// Customer inputs
// ---------------------------------------------------------------------------

/// Split of payments by geography.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentTypeDistribution {
    pub local_percent: Percent,
    pub cross_border_percent: Percent,
}

/// Split of payments by method (bank rail vs. card).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodDistribution {
    pub rail_percent: Percent,
    pub card_percent: Percent,
}

/// Share of FX volume falling into each margin tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FxTierDistribution {
    pub tier1_percent: Percent,
    pub tier2_percent: Percent,
    pub tier3_percent: Percent,
}

impl FxTierDistribution {
    pub fn as_array(&self) -> [Percent; 3] {
        [self.tier1_percent, self.tier2_percent, self.tier3_percent]
    }

    pub fn from_array(values: [Percent; 3]) -> Self {
        Self {
            tier1_percent: values[0],
            tier2_percent: values[1],
            tier3_percent: values[2],
        }
    }

    pub fn get(&self, tier: FxTier) -> Percent {
        self.as_array()[tier.index()]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FxVolumeInput {
    pub distribution: FxTierDistribution,
}

/// Everything the customer tells us about their payments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    pub currency: Currency,
    /// Annual payment value, in `currency` units
    pub total_payment_value: Money,
    /// Annual number of payments
    #[serde(deserialize_with = "deserialize_count")]
    pub total_payment_count: Count,
    pub payment_type_distribution: PaymentTypeDistribution,
    pub payment_method_distribution: PaymentMethodDistribution,
    /// Share of cross-border rail value that needs foreign exchange
    pub fx_percent_of_cross_border: Percent,
    pub fx_volume: FxVolumeInput,
}

/// Older documents may store a fractional count; it is rounded the same way
/// a count edit is.
fn deserialize_count<'de, D>(deserializer: D) -> Result<Count, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = <Decimal as Deserialize>::deserialize(deserializer)?;
    round_count(raw).ok_or_else(|| serde::de::Error::custom(format!("payment count {raw} is out of range")))
}

impl Default for CustomerInfo {
    fn default() -> Self {
        Self {
            currency: Currency::USD,
            total_payment_value: dec!(50000000),
            total_payment_count: 1_100_000,
            payment_type_distribution: PaymentTypeDistribution {
                local_percent: dec!(60),
                cross_border_percent: dec!(40),
            },
            payment_method_distribution: PaymentMethodDistribution {
                rail_percent: dec!(90),
                card_percent: dec!(10),
            },
            fx_percent_of_cross_border: dec!(50),
            fx_volume: FxVolumeInput {
                distribution: FxTierDistribution {
                    tier1_percent: dec!(40),
                    tier2_percent: dec!(35),
                    tier3_percent: dec!(25),
                },
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Fee schedules
// ---------------------------------------------------------------------------

/// FX margin per tier, in percent of the tier's volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FxMargins {
    pub tier1: Percent,
    pub tier2: Percent,
    pub tier3: Percent,
}

impl FxMargins {
    pub fn get(&self, tier: FxTier) -> Percent {
        match tier {
            FxTier::Tier1 => self.tier1,
            FxTier::Tier2 => self.tier2,
            FxTier::Tier3 => self.tier3,
        }
    }
}

/// One provider's pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeSchedule {
    /// Flat fee per local rail payment, in currency units
    pub local_rail_fee: Money,
    /// Flat fee per cross-border rail payment, in currency units
    pub cross_border_fee: Money,
    pub fx_margins: FxMargins,
    /// Rebate paid to the customer on card value, in percent
    pub card_rebate: Percent,
}

impl FeeSchedule {
    pub fn tungsten_default() -> Self {
        Self {
            local_rail_fee: dec!(0.50),
            cross_border_fee: dec!(2.00),
            fx_margins: FxMargins {
                tier1: dec!(0.50),
                tier2: dec!(0.35),
                tier3: dec!(0.20),
            },
            card_rebate: dec!(1.50),
        }
    }

    pub fn current_provider_default() -> Self {
        Self {
            local_rail_fee: dec!(1.00),
            cross_border_fee: dec!(3.50),
            fx_margins: FxMargins {
                tier1: dec!(0.75),
                tier2: dec!(0.60),
                tier3: dec!(0.45),
            },
            card_rebate: dec!(1.00),
        }
    }
}

/// The two providers being compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Provider {
    /// The proposed provider
    Tungsten,
    /// The incumbent
    CurrentProvider,
}

impl Provider {
    pub fn key(&self) -> &'static str {
        match self {
            Provider::Tungsten => "tungsten",
            Provider::CurrentProvider => "currentProvider",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Provider {
    type Err = PayRoiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "tungsten" => Ok(Provider::Tungsten),
            "currentProvider" | "current_provider" | "current" => Ok(Provider::CurrentProvider),
            other => Err(PayRoiError::InvalidInput {
                field: "provider".into(),
                reason: format!("Expected 'tungsten' or 'currentProvider', got '{other}'"),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fees {
    pub tungsten: FeeSchedule,
    pub current_provider: FeeSchedule,
}

impl Default for Fees {
    fn default() -> Self {
        Self {
            tungsten: FeeSchedule::tungsten_default(),
            current_provider: FeeSchedule::current_provider_default(),
        }
    }
}

impl Fees {
    pub fn get(&self, provider: Provider) -> &FeeSchedule {
        match provider {
            Provider::Tungsten => &self.tungsten,
            Provider::CurrentProvider => &self.current_provider,
        }
    }

    pub fn get_mut(&mut self, provider: Provider) -> &mut FeeSchedule {
        match provider {
            Provider::Tungsten => &mut self.tungsten,
            Provider::CurrentProvider => &mut self.current_provider,
        }
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// The full set of inputs behind one calculation. This is what gets
/// exported, persisted and imported.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationData {
    pub customer_info: CustomerInfo,
    pub fees: Fees,
}

impl CalculationData {
    /// Parse a snapshot, rejecting documents with missing or ill-typed
    /// fields instead of defaulting them.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, PayRoiError> {
        serde_json::from_value(value.clone()).map_err(|e| PayRoiError::MalformedSnapshot(e.to_string()))
    }

    pub fn from_json_str(json: &str) -> Result<Self, PayRoiError> {
        serde_json::from_str(json).map_err(|e| PayRoiError::MalformedSnapshot(e.to_string()))
    }
}
