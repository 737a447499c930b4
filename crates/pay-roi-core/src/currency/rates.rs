use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

use crate::error::PayRoiError;
use crate::types::{round_cents, Currency, Money};
use crate::PayRoiResult;

// ---------------------------------------------------------------------------
// Exchange rate table
// ---------------------------------------------------------------------------

/// Currency -> USD-equivalent rate (units of the currency per one USD).
///
/// Injected into the engine so rates can be refreshed from configuration
/// without a rebuild.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExchangeRateTable {
    rates: BTreeMap<Currency, Decimal>,
}

impl Default for ExchangeRateTable {
    fn default() -> Self {
        let mut rates = BTreeMap::new();
        rates.insert(Currency::USD, dec!(1.00));
        rates.insert(Currency::GBP, dec!(0.79));
        rates.insert(Currency::EUR, dec!(0.92));
        Self { rates }
    }
}

impl ExchangeRateTable {
    pub fn new(rates: BTreeMap<Currency, Decimal>) -> Self {
        Self { rates }
    }

    pub fn with_rate(mut self, currency: Currency, rate: Decimal) -> Self {
        self.rates.insert(currency, rate);
        self
    }

    pub fn rate(&self, currency: Currency) -> PayRoiResult<Decimal> {
        let rate = self
            .rates
            .get(&currency)
            .copied()
            .ok_or_else(|| PayRoiError::UnknownCurrency(currency.to_string()))?;
        if rate <= Decimal::ZERO {
            return Err(PayRoiError::InvalidInput {
                field: format!("exchange_rates.{currency}"),
                reason: "Exchange rate must be positive".into(),
            });
        }
        Ok(rate)
    }

    /// Multiplier taking an amount in `from` to an amount in `to`.
    pub fn factor(&self, from: Currency, to: Currency) -> PayRoiResult<Decimal> {
        if from == to {
            return Ok(Decimal::ONE);
        }
        let (to_rate, from_rate) = (self.rate(to)?, self.rate(from)?);
        to_rate.checked_div(from_rate).ok_or_else(|| PayRoiError::InvalidInput {
            field: format!("exchange_rates.{from}"),
            reason: format!("Rate {from_rate} gives an unrepresentable {from}->{to} factor"),
        })
    }

    /// Convert and round to cents (half away from zero).
    pub fn convert_rounded(&self, amount: Money, from: Currency, to: Currency) -> PayRoiResult<Money> {
        Ok(round_cents(convert(self, amount, from, to)?))
    }

    pub fn currencies(&self) -> impl Iterator<Item = &Currency> {
        self.rates.keys()
    }
}

/// Convert `amount` between currencies using `table`. Unrounded.
pub fn convert(
    table: &ExchangeRateTable,
    amount: Money,
    from: Currency,
    to: Currency,
) -> PayRoiResult<Money> {
    amount
        .checked_mul(table.factor(from, to)?)
        .ok_or_else(|| PayRoiError::InvalidInput {
            field: "amount".into(),
            reason: format!("{amount} {from} is too large to convert to {to}"),
        })
}

/// Symbol for a currency code, falling back to `$` for codes outside the
/// supported set.
pub fn currency_symbol(code: &str) -> &'static str {
    match code.parse::<Currency>() {
        Ok(c) => c.symbol(),
        Err(_) => {
            warn!(code, "unknown currency code, using default symbol");
            "$"
        }
    }
}
