use serde::{Deserialize, Serialize};

use crate::currency::ExchangeRateTable;
use crate::engine::check_bounds;
use crate::error::PayRoiError;
use crate::model::CalculationData;
use crate::PayRoiResult;

/// Settings injected into a calculator: the rate table used for currency
/// changes and the snapshot restored by `reset`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    pub exchange_rates: ExchangeRateTable,
    pub defaults: CalculationData,
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> PayRoiResult<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.check()?;
        Ok(config)
    }

    /// The defaults' currency must have a usable rate, and the defaults
    /// must be within the engine's input bounds.
    pub fn check(&self) -> PayRoiResult<()> {
        check_bounds(&self.defaults)?;
        let currency = self.defaults.customer_info.currency;
        self.exchange_rates.rate(currency).map_err(|e| match e {
            PayRoiError::UnknownCurrency(c) => PayRoiError::InvalidInput {
                field: "exchange_rates".into(),
                reason: format!("No rate for default currency {c}"),
            },
            other => other,
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Currency;
    use rust_decimal_macros::dec;

    #[test]
    fn test_partial_config_falls_back_to_defaults() {
        let config = EngineConfig::from_json_str(r#"{"exchangeRates": {"USD": 1, "GBP": 0.8, "EUR": 0.9}}"#)
            .unwrap();
        assert_eq!(config.exchange_rates.rate(Currency::GBP).unwrap(), dec!(0.8));
        assert_eq!(config.defaults, CalculationData::default());
    }

    #[test]
    fn test_missing_default_currency_rate_rejected() {
        let err = EngineConfig::from_json_str(r#"{"exchangeRates": {"GBP": 0.8}}"#).unwrap_err();
        assert!(matches!(err, PayRoiError::InvalidInput { .. }));
    }

    #[test]
    fn test_oversized_defaults_rejected() {
        let mut config = EngineConfig::default();
        config.defaults.customer_info.total_payment_value = dec!(100000000000000000000);
        let err = config.check().unwrap_err();
        assert!(matches!(err, PayRoiError::InvalidInput { ref field, .. } if field == "totalPaymentValue"));
    }
}
