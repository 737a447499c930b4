use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PayRoiError;

/// Monetary amounts in the snapshot currency.
pub type Money = Decimal;

/// Percentages expressed in points (5 = 5%), the way the UI enters them.
pub type Percent = Decimal;

/// Transaction counts. Signed so validation can report negative input.
pub type Count = i64;

/// Tolerance for "sums to 100" checks on percentage sets.
pub const PERCENT_TOLERANCE: Decimal = dec!(0.01);

pub const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

// Input bounds. Within these, every product the cost model forms stays
// inside Decimal's range.

/// Largest annual payment value accepted (one quadrillion).
pub const MAX_PAYMENT_VALUE: Money = dec!(1000000000000000);

/// Largest annual payment count accepted.
pub const MAX_PAYMENT_COUNT: Count = 1_000_000_000_000;

/// Largest per-transaction flat fee accepted.
pub const MAX_FLAT_FEE: Money = dec!(1000000);

/// Largest magnitude accepted for a percentage input. Values between 100
/// and this are stored so validation can report them.
pub const MAX_PERCENT_INPUT: Percent = dec!(1000);

/// Supported base currencies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    USD,
    GBP,
    EUR,
}

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::USD, Currency::GBP, Currency::EUR];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::GBP => "GBP",
            Currency::EUR => "EUR",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::GBP => "£",
            Currency::EUR => "€",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = PayRoiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "USD" => Ok(Currency::USD),
            "GBP" => Ok(Currency::GBP),
            "EUR" => Ok(Currency::EUR),
            _ => Err(PayRoiError::UnknownCurrency(s.to_string())),
        }
    }
}

/// Round a monetary amount to cents, half away from zero.
pub fn round_cents(amount: Money) -> Money {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `numerator / denominator`, or zero when the denominator is zero or the
/// quotient does not fit in a Decimal.
pub fn safe_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}

/// `part / whole * 100`, or zero when `whole` is zero or the ratio is not
/// representable.
pub fn percent_of(part: Decimal, whole: Decimal) -> Percent {
    safe_div(part, whole)
        .checked_mul(ONE_HUNDRED)
        .unwrap_or(Decimal::ZERO)
}

/// Reject `value` when its magnitude exceeds `limit`.
pub fn check_magnitude(field: &str, value: Decimal, limit: Decimal) -> Result<(), PayRoiError> {
    if value.abs() > limit {
        return Err(PayRoiError::InvalidInput {
            field: field.to_string(),
            reason: format!("{value} is outside the supported range (±{limit})"),
        });
    }
    Ok(())
}

/// Round to a whole count, half away from zero. None when the result does
/// not fit in a `Count`.
pub fn round_count(value: Decimal) -> Option<Count> {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

/// Apply `percent` to `count`, rounding half away from zero, and keep the
/// result between zero and `count` so its complement cannot change sign.
pub fn share_of_count(count: Count, percent: Percent) -> Count {
    let raw = Decimal::from(count) * percent / ONE_HUNDRED;
    let rounded = round_count(raw).unwrap_or(0);
    let (lo, hi) = if count >= 0 { (0, count) } else { (count, 0) };
    rounded.clamp(lo, hi)
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_cents_half_away_from_zero() {
        assert_eq!(round_cents(dec!(2.765)), dec!(2.77));
        assert_eq!(round_cents(dec!(-2.765)), dec!(-2.77));
        assert_eq!(round_cents(dec!(2.764)), dec!(2.76));
    }

    #[test]
    fn test_safe_div_zero_denominator() {
        assert_eq!(safe_div(dec!(10), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(percent_of(dec!(1), dec!(4)), dec!(25));
    }

    #[test]
    fn test_unrepresentable_ratio_is_zero() {
        assert_eq!(safe_div(Decimal::MAX, dec!(0.0001)), Decimal::ZERO);
        assert_eq!(percent_of(Decimal::MAX, Decimal::ONE), Decimal::ZERO);
    }

    #[test]
    fn test_check_magnitude() {
        assert!(check_magnitude("x", dec!(-1000), MAX_PERCENT_INPUT).is_ok());
        let err = check_magnitude("x", dec!(1000.01), MAX_PERCENT_INPUT).unwrap_err();
        assert!(matches!(err, PayRoiError::InvalidInput { .. }));
    }

    #[test]
    fn test_share_of_count_rounding() {
        assert_eq!(share_of_count(1_100_000, dec!(90)), 990_000);
        assert_eq!(share_of_count(5, dec!(50)), 3);
        assert_eq!(share_of_count(10, dec!(150)), 10);
        assert_eq!(share_of_count(10, dec!(-20)), 0);
    }

    #[test]
    fn test_currency_parse_and_symbol() {
        assert_eq!("gbp".parse::<Currency>().unwrap(), Currency::GBP);
        assert_eq!(Currency::EUR.symbol(), "€");
        assert!(matches!(
            "JPY".parse::<Currency>(),
            Err(PayRoiError::UnknownCurrency(_))
        ));
    }
}
