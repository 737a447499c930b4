use rust_decimal::Decimal;
use tracing::debug;

use crate::allocation::{adjust_pair, adjust_tier, FxTier};
use crate::config::EngineConfig;
use crate::currency::ExchangeRateTable;
use crate::engine::results::{compute_results, Results};
use crate::engine::validation::{check_bounds, validate, ValidationReport};
use crate::model::{
    CalculationData, CustomerField, FeeField, FieldValue, FxTierDistribution, PaymentMethodDistribution,
    PaymentTypeDistribution, Provider,
};
use crate::types::{check_magnitude, Currency, Money, ONE_HUNDRED, MAX_FLAT_FEE, MAX_PAYMENT_VALUE};
use crate::PayRoiResult;

/// Holds one live snapshot and applies edits to it.
///
/// Edits are addressed either by typed field (`set_customer_field`,
/// `set_fee_field`) or by the dotted paths the browser UI and persisted
/// configurations use (`update_field`, `set_fee`). Every edit is range
/// checked, so the held snapshot can always be computed.
#[derive(Debug, Clone)]
pub struct RoiCalculator {
    data: CalculationData,
    config: EngineConfig,
}

impl Default for RoiCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl RoiCalculator {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            data: config.defaults.clone(),
            config,
        }
    }

    pub fn data(&self) -> &CalculationData {
        &self.data
    }

    pub fn exchange_rates(&self) -> &ExchangeRateTable {
        &self.config.exchange_rates
    }

    // -- Field edits --------------------------------------------------------

    pub fn set_customer_field(&mut self, field: CustomerField, value: Decimal) -> PayRoiResult<()> {
        field.check(value)?;
        debug!(field = field.path(), %value, "customer field updated");
        field.apply(&mut self.data.customer_info, value);
        Ok(())
    }

    /// Set a customer field by dotted path, e.g.
    /// `paymentTypeDistribution.localPercent`. Non-numeric values become 0.
    pub fn update_field(&mut self, path: &str, value: impl Into<FieldValue>) -> PayRoiResult<()> {
        let field: CustomerField = path.parse()?;
        self.set_customer_field(field, value.into().to_decimal())
    }

    pub fn set_fee_field(&mut self, provider: Provider, field: FeeField, value: Decimal) -> PayRoiResult<()> {
        field.check(value)?;
        debug!(%provider, field = field.path(), %value, "fee updated");
        field.apply(self.data.fees.get_mut(provider), value);
        Ok(())
    }

    /// Set a fee by dotted path. Accepts the legacy names `localRail` and
    /// `crossBorder`.
    pub fn set_fee(
        &mut self,
        provider: Provider,
        path: &str,
        value: impl Into<FieldValue>,
    ) -> PayRoiResult<()> {
        let field: FeeField = path.parse()?;
        self.set_fee_field(provider, field, value.into().to_decimal())
    }

    /// Move one FX tier and redistribute the others proportionally.
    /// `percent` is clamped to [0, 100].
    pub fn adjust_fx_tier(&mut self, tier: FxTier, percent: Decimal) {
        let percent = percent.clamp(Decimal::ZERO, ONE_HUNDRED);
        let dist = &mut self.data.customer_info.fx_volume.distribution;
        let adjusted = adjust_tier(dist.as_array(), tier, percent);
        *dist = FxTierDistribution::from_array(adjusted);
        debug!(?tier, %percent, ?adjusted, "fx tiers redistributed");
    }

    /// Set the local share and give cross-border the rest, so the pair
    /// keeps summing to 100. `local_percent` is clamped to [0, 100].
    pub fn adjust_type_split(&mut self, local_percent: Decimal) {
        let local_percent = local_percent.clamp(Decimal::ZERO, ONE_HUNDRED);
        let dist = &mut self.data.customer_info.payment_type_distribution;
        let [local, cross_border] =
            adjust_pair([dist.local_percent, dist.cross_border_percent], 0, local_percent);
        *dist = PaymentTypeDistribution {
            local_percent: local,
            cross_border_percent: cross_border,
        };
        debug!(%local, %cross_border, "payment type split adjusted");
    }

    /// Set the rail share and give cards the rest. `rail_percent` is clamped
    /// to [0, 100].
    pub fn adjust_method_split(&mut self, rail_percent: Decimal) {
        let rail_percent = rail_percent.clamp(Decimal::ZERO, ONE_HUNDRED);
        let dist = &mut self.data.customer_info.payment_method_distribution;
        let [rail, card] = adjust_pair([dist.rail_percent, dist.card_percent], 0, rail_percent);
        *dist = PaymentMethodDistribution {
            rail_percent: rail,
            card_percent: card,
        };
        debug!(%rail, %card, "payment method split adjusted");
    }

    /// Switch the base currency, converting the payment value and all flat
    /// fees. Percentages are unaffected.
    pub fn set_currency(&mut self, currency: Currency) -> PayRoiResult<()> {
        let from = self.data.customer_info.currency;
        if from == currency {
            return Ok(());
        }
        let rates = &self.config.exchange_rates;
        let convert = |amount: Money| rates.convert_rounded(amount, from, currency);

        // Convert everything before writing so a failed lookup leaves the
        // snapshot untouched.
        let value = convert(self.data.customer_info.total_payment_value)?;
        check_magnitude("totalPaymentValue", value, MAX_PAYMENT_VALUE)?;
        let mut fees = self.data.fees.clone();
        for provider in [Provider::Tungsten, Provider::CurrentProvider] {
            let schedule = fees.get_mut(provider);
            schedule.local_rail_fee = convert(schedule.local_rail_fee)?;
            schedule.cross_border_fee = convert(schedule.cross_border_fee)?;
            check_magnitude("localRailFee", schedule.local_rail_fee, MAX_FLAT_FEE)?;
            check_magnitude("crossBorderFee", schedule.cross_border_fee, MAX_FLAT_FEE)?;
        }

        self.data.customer_info.total_payment_value = value;
        self.data.customer_info.currency = currency;
        self.data.fees = fees;
        debug!(%from, to = %currency, "currency changed");
        Ok(())
    }

    // -- Derived values -----------------------------------------------------

    pub fn currency_symbol(&self) -> &'static str {
        self.data.customer_info.currency.symbol()
    }

    pub fn average_transaction_size(&self) -> Money {
        crate::breakdown::average_transaction_size(&self.data.customer_info)
    }

    pub fn compute_results(&self) -> Results {
        compute_results(&self.data)
    }

    pub fn validate(&self) -> ValidationReport {
        validate(&self.data)
    }

    // -- Snapshot lifecycle -------------------------------------------------

    /// A deep copy of the live snapshot.
    pub fn export_snapshot(&self) -> CalculationData {
        self.data.clone()
    }

    /// Replace the live snapshot from an untyped document. On failure the
    /// current snapshot is kept.
    pub fn import_snapshot(&mut self, value: &serde_json::Value) -> PayRoiResult<()> {
        self.import_data(CalculationData::from_value(value)?)
    }

    /// Replace the live snapshot. Values beyond the supported range are
    /// rejected and the current snapshot is kept.
    pub fn import_data(&mut self, data: CalculationData) -> PayRoiResult<()> {
        check_bounds(&data)?;
        self.data = data;
        debug!("snapshot imported");
        Ok(())
    }

    pub fn reset(&mut self) {
        self.data = self.config.defaults.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PayRoiError;
    use rust_decimal_macros::dec;

    #[test]
    fn test_update_field_by_path() {
        let mut calc = RoiCalculator::new();
        calc.update_field("paymentTypeDistribution.localPercent", "70").unwrap();
        calc.update_field("totalPaymentValue", "1,000,000").unwrap();
        calc.update_field("fxVolume.distribution.tier2Percent", dec!(10)).unwrap();
        let info = &calc.data().customer_info;
        assert_eq!(info.payment_type_distribution.local_percent, dec!(70));
        assert_eq!(info.total_payment_value, dec!(1000000));
        assert_eq!(info.fx_volume.distribution.tier2_percent, dec!(10));
    }

    #[test]
    fn test_update_field_invalid_value_becomes_zero() {
        let mut calc = RoiCalculator::new();
        calc.update_field("fxPercentOfCrossBorder", "n/a").unwrap();
        assert_eq!(calc.data().customer_info.fx_percent_of_cross_border, Decimal::ZERO);
    }

    #[test]
    fn test_update_unknown_path() {
        let mut calc = RoiCalculator::new();
        let err = calc.update_field("fxVolume.total", 5).unwrap_err();
        assert!(matches!(err, PayRoiError::UnknownField { .. }));
    }

    #[test]
    fn test_set_fee_legacy_name() {
        let mut calc = RoiCalculator::new();
        calc.set_fee(Provider::Tungsten, "localRail", "0.25").unwrap();
        calc.set_fee(Provider::CurrentProvider, "fxMargins.tier3", dec!(0.9)).unwrap();
        assert_eq!(calc.data().fees.tungsten.local_rail_fee, dec!(0.25));
        assert_eq!(calc.data().fees.current_provider.fx_margins.tier3, dec!(0.9));
    }

    #[test]
    fn test_set_currency_converts_money_only() {
        let mut calc = RoiCalculator::new();
        calc.set_currency(Currency::GBP).unwrap();
        let data = calc.data();
        assert_eq!(data.customer_info.currency, Currency::GBP);
        assert_eq!(data.customer_info.total_payment_value, dec!(39500000));
        assert_eq!(data.fees.current_provider.local_rail_fee, dec!(0.79));
        assert_eq!(data.fees.current_provider.cross_border_fee, dec!(2.77));
        assert_eq!(data.fees.tungsten.local_rail_fee, dec!(0.40));
        assert_eq!(data.fees.tungsten.cross_border_fee, dec!(1.58));
        assert_eq!(data.fees.tungsten.card_rebate, dec!(1.50));
        assert_eq!(data.fees.current_provider.fx_margins.tier1, dec!(0.75));
        assert_eq!(calc.currency_symbol(), "£");
    }

    #[test]
    fn test_set_same_currency_is_noop() {
        let mut calc = RoiCalculator::new();
        let before = calc.export_snapshot();
        calc.set_currency(Currency::USD).unwrap();
        assert_eq!(calc.export_snapshot(), before);
    }

    #[test]
    fn test_failed_conversion_leaves_snapshot() {
        let config = EngineConfig {
            exchange_rates: ExchangeRateTable::default().with_rate(Currency::EUR, Decimal::ZERO),
            ..EngineConfig::default()
        };
        let mut calc = RoiCalculator::with_config(config);
        let before = calc.export_snapshot();
        assert!(calc.set_currency(Currency::EUR).is_err());
        assert_eq!(calc.export_snapshot(), before);
    }

    #[test]
    fn test_export_is_a_copy() {
        let mut calc = RoiCalculator::new();
        let mut snapshot = calc.export_snapshot();
        snapshot.customer_info.total_payment_value = dec!(1);
        assert_eq!(calc.data().customer_info.total_payment_value, dec!(50000000));
        calc.import_data(snapshot).unwrap();
        assert_eq!(calc.data().customer_info.total_payment_value, dec!(1));
        calc.reset();
        assert_eq!(calc.data(), &CalculationData::default());
    }

    #[test]
    fn test_bad_import_keeps_snapshot() {
        let mut calc = RoiCalculator::new();
        calc.update_field("totalPaymentCount", 42).unwrap();
        let err = calc
            .import_snapshot(&serde_json::json!({ "customerInfo": {} }))
            .unwrap_err();
        assert!(matches!(err, PayRoiError::MalformedSnapshot(_)));
        assert_eq!(calc.data().customer_info.total_payment_count, 42);
    }

    #[test]
    fn test_oversized_edits_rejected() {
        let mut calc = RoiCalculator::new();
        let err = calc
            .update_field("totalPaymentValue", "70000000000000000000000000000")
            .unwrap_err();
        assert!(matches!(err, PayRoiError::InvalidInput { .. }));
        assert_eq!(calc.data().customer_info.total_payment_value, dec!(50000000));

        let err = calc.set_fee(Provider::Tungsten, "crossBorderFee", "1e9").unwrap_err();
        assert!(matches!(err, PayRoiError::InvalidInput { .. }));
        assert_eq!(calc.data().fees.tungsten.cross_border_fee, dec!(2.00));

        assert!(calc.validate().valid);
        calc.compute_results();
    }

    #[test]
    fn test_oversized_import_rejected() {
        let mut calc = RoiCalculator::new();
        let mut snapshot = calc.export_snapshot();
        snapshot.customer_info.total_payment_count = i64::MAX;
        assert!(calc.import_data(snapshot).is_err());
        assert_eq!(calc.data(), &CalculationData::default());
    }

    #[test]
    fn test_currency_switch_rejects_out_of_range_result() {
        let config = EngineConfig {
            exchange_rates: ExchangeRateTable::default().with_rate(Currency::EUR, dec!(1000000000)),
            ..EngineConfig::default()
        };
        let mut calc = RoiCalculator::with_config(config);
        let before = calc.export_snapshot();
        assert!(calc.set_currency(Currency::EUR).is_err());
        assert_eq!(calc.export_snapshot(), before);
    }

    #[test]
    fn test_type_split_stays_closed() {
        let mut calc = RoiCalculator::new();
        calc.adjust_type_split(dec!(70));
        let dist = &calc.data().customer_info.payment_type_distribution;
        assert_eq!(dist.local_percent, dec!(70));
        assert_eq!(dist.cross_border_percent, dec!(30));
        assert!(calc.validate().valid);
    }

    #[test]
    fn test_method_split_clamps() {
        let mut calc = RoiCalculator::new();
        calc.adjust_method_split(dec!(120));
        let dist = &calc.data().customer_info.payment_method_distribution;
        assert_eq!(dist.rail_percent, dec!(100));
        assert_eq!(dist.card_percent, Decimal::ZERO);
        assert!(calc.validate().valid);
    }

    #[test]
    fn test_average_transaction_size() {
        let mut calc = RoiCalculator::new();
        assert!((calc.average_transaction_size() - dec!(45.4545)).abs() < dec!(0.0001));
        calc.update_field("totalPaymentCount", 0).unwrap();
        assert_eq!(calc.average_transaction_size(), Decimal::ZERO);
    }

    #[test]
    fn test_adjust_fx_tier() {
        let mut calc = RoiCalculator::new();
        calc.adjust_fx_tier(FxTier::Tier2, dec!(50));
        let dist = &calc.data().customer_info.fx_volume.distribution;
        assert_eq!(dist.tier2_percent, dec!(50));
        // 40:25 share of the remaining 50
        assert!((dist.tier1_percent - dec!(30.769)).abs() < dec!(0.001));
        assert!((dist.tier3_percent - dec!(19.231)).abs() < dec!(0.001));
    }
}
