use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::breakdown::{FxVolumes, PaymentBreakdown};
use crate::model::FeeSchedule;
use crate::types::{percent_of, safe_div, Count, Money, Percent, ONE_HUNDRED};

/// FX margin cost by tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FxCosts {
    pub tier1: Money,
    pub tier2: Money,
    pub tier3: Money,
    pub total: Money,
}

/// What one provider charges (and rebates) on the customer's payment book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderCosts {
    /// Local rail count x flat local fee
    pub local_rail: Money,
    /// Cross-border rail count x flat cross-border fee
    pub cross_border_rail: Money,
    pub rails: Money,
    /// Rebate on card value. A benefit, not part of `total`.
    pub card_rebate: Money,
    pub fx: FxCosts,
    /// Rails + FX
    pub total: Money,
    pub cost_per_transaction: Money,
    /// Total cost as a percentage of total payment value
    pub effective_rate: Percent,
}

/// Price the breakdown under one fee schedule.
///
/// Rail fees are flat per transaction and use rail-only counts; FX margins
/// and the card rebate are percentages of value.
pub fn calculate_provider_costs(
    breakdown: &PaymentBreakdown,
    fx_volumes: &FxVolumes,
    fees: &FeeSchedule,
    total_payment_value: Money,
    total_payment_count: Count,
) -> ProviderCosts {
    let local_rail = Decimal::from(breakdown.rails.local.count) * fees.local_rail_fee;
    let cross_border_rail = Decimal::from(breakdown.rails.cross_border.count) * fees.cross_border_fee;
    let rails = local_rail + cross_border_rail;

    let card_rebate = breakdown.method.card.value * fees.card_rebate / ONE_HUNDRED;

    let tier1 = fx_volumes.tier1 * fees.fx_margins.tier1 / ONE_HUNDRED;
    let tier2 = fx_volumes.tier2 * fees.fx_margins.tier2 / ONE_HUNDRED;
    let tier3 = fx_volumes.tier3 * fees.fx_margins.tier3 / ONE_HUNDRED;
    let fx_total = tier1 + tier2 + tier3;

    let total = rails + fx_total;

    let cost_per_transaction = if total_payment_count > 0 {
        safe_div(total, Decimal::from(total_payment_count))
    } else {
        Decimal::ZERO
    };
    let effective_rate = if total_payment_value > Decimal::ZERO {
        percent_of(total, total_payment_value)
    } else {
        Decimal::ZERO
    };

    ProviderCosts {
        local_rail,
        cross_border_rail,
        rails,
        card_rebate,
        fx: FxCosts {
            tier1,
            tier2,
            tier3,
            total: fx_total,
        },
        total,
        cost_per_transaction,
        effective_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breakdown::{calculate_breakdown, calculate_fx_volumes};
    use crate::model::CustomerInfo;
    use rust_decimal_macros::dec;

    fn costs_for(info: &CustomerInfo, fees: &FeeSchedule) -> ProviderCosts {
        let b = calculate_breakdown(info);
        let fx = calculate_fx_volumes(info, &b);
        calculate_provider_costs(
            &b,
            &fx,
            fees,
            info.total_payment_value,
            info.total_payment_count,
        )
    }

    #[test]
    fn test_current_provider_default_costs() {
        let info = CustomerInfo::default();
        let c = costs_for(&info, &FeeSchedule::current_provider_default());

        assert_eq!(c.local_rail, dec!(594000));
        assert_eq!(c.cross_border_rail, dec!(1386000));
        assert_eq!(c.rails, dec!(1980000));
        assert_eq!(c.fx.tier1, dec!(27000));
        assert_eq!(c.fx.tier2, dec!(18900));
        assert_eq!(c.fx.tier3, dec!(10125));
        assert_eq!(c.fx.total, dec!(56025));
        assert_eq!(c.total, dec!(2036025));
        assert_eq!(c.card_rebate, dec!(50000));
        assert_eq!(c.effective_rate, dec!(4.07205));
    }

    #[test]
    fn test_tungsten_default_costs() {
        let info = CustomerInfo::default();
        let c = costs_for(&info, &FeeSchedule::tungsten_default());

        assert_eq!(c.rails, dec!(1089000));
        assert_eq!(c.fx.total, dec!(33525));
        assert_eq!(c.total, dec!(1122525));
        assert_eq!(c.card_rebate, dec!(75000));
    }

    #[test]
    fn test_rebate_not_in_total() {
        let info = CustomerInfo::default();
        let mut fees = FeeSchedule::current_provider_default();
        let before = costs_for(&info, &fees).total;
        fees.card_rebate = dec!(50);
        let after = costs_for(&info, &fees);
        assert_eq!(after.total, before);
        assert_eq!(after.card_rebate, dec!(2500000));
    }

    #[test]
    fn test_zero_denominators() {
        let mut info = CustomerInfo::default();
        info.total_payment_count = 0;
        info.total_payment_value = Decimal::ZERO;
        let c = costs_for(&info, &FeeSchedule::current_provider_default());
        assert_eq!(c.cost_per_transaction, Decimal::ZERO);
        assert_eq!(c.effective_rate, Decimal::ZERO);
        assert_eq!(c.total, Decimal::ZERO);
    }
}
