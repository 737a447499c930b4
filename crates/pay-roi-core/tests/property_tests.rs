use pay_roi_core::allocation::{adjust_tier, redistribute, FxTier};
use pay_roi_core::breakdown::calculate_breakdown;
use pay_roi_core::currency::ExchangeRateTable;
use pay_roi_core::model::{CalculationData, FeeSchedule, FxMargins};
use pay_roi_core::{compute_results, Currency};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Percent with two decimals in [0, 100].
fn percent() -> impl Strategy<Value = Decimal> {
    (0u32..=10_000u32).prop_map(|bp| Decimal::new(bp as i64, 2))
}

/// Non-negative money with two decimals.
fn money(max_cents: i64) -> impl Strategy<Value = Decimal> {
    (0i64..=max_cents).prop_map(|c| Decimal::new(c, 2))
}

/// Three tiers that sum to exactly 100.
fn tiers() -> impl Strategy<Value = [Decimal; 3]> {
    (percent(), percent()).prop_map(|(a, b)| {
        let first = a;
        let second = (dec!(100) - first) * b / dec!(100);
        [first, second, dec!(100) - first - second]
    })
}

fn fee_schedule() -> impl Strategy<Value = FeeSchedule> {
    (money(1_000), money(5_000), percent(), percent(), percent(), percent()).prop_map(
        |(local, cb, t1, t2, t3, rebate)| FeeSchedule {
            local_rail_fee: local,
            cross_border_fee: cb,
            fx_margins: FxMargins {
                tier1: t1,
                tier2: t2,
                tier3: t3,
            },
            card_rebate: rebate,
        },
    )
}

fn snapshot() -> impl Strategy<Value = CalculationData> {
    (
        money(100_000_000_000),
        0i64..5_000_000,
        percent(),
        percent(),
        percent(),
        tiers(),
        fee_schedule(),
        fee_schedule(),
    )
        .prop_map(|(value, count, local, rail, fx, tiers, alt, current)| {
            let mut data = CalculationData::default();
            let info = &mut data.customer_info;
            info.total_payment_value = value;
            info.total_payment_count = count;
            info.payment_type_distribution.local_percent = local;
            info.payment_type_distribution.cross_border_percent = dec!(100) - local;
            info.payment_method_distribution.rail_percent = rail;
            info.payment_method_distribution.card_percent = dec!(100) - rail;
            info.fx_percent_of_cross_border = fx;
            info.fx_volume.distribution.tier1_percent = tiers[0];
            info.fx_volume.distribution.tier2_percent = tiers[1];
            info.fx_volume.distribution.tier3_percent = tiers[2];
            data.fees.tungsten = alt;
            data.fees.current_provider = current;
            data
        })
}

proptest! {
    #[test]
    fn prop_fx_tiers_stay_closed(start in tiers(), tier in 1u8..=3, v in percent()) {
        let tier = FxTier::from_number(tier).unwrap();
        let out = adjust_tier(start, tier, v);
        let total: Decimal = out.iter().copied().sum();
        prop_assert!((total - dec!(100)).abs() <= dec!(0.01), "sum {}", total);
        prop_assert_eq!(out[tier.index()], v);
    }

    #[test]
    fn prop_redistribute_n_way_closes(
        values in prop::collection::vec(0u32..1_000u32, 2..8),
        pick in any::<prop::sample::Index>(),
        v in percent(),
    ) {
        let values: Vec<Decimal> = values.into_iter().map(Decimal::from).collect();
        let idx = pick.index(values.len());
        let out = redistribute(&values, idx, v);
        let total: Decimal = out.iter().copied().sum();
        prop_assert!((total - dec!(100)).abs() <= dec!(0.01), "sum {}", total);
    }

    #[test]
    fn prop_breakdown_conserves_value_and_count(data in snapshot()) {
        let info = &data.customer_info;
        let b = calculate_breakdown(info);
        prop_assert_eq!(b.method.rail.value + b.method.card.value, info.total_payment_value);
        prop_assert_eq!(b.rails.local.value + b.rails.cross_border.value, b.method.rail.value);
        prop_assert_eq!(b.method.rail.count + b.method.card.count, info.total_payment_count);
        prop_assert_eq!(b.rails.local.count + b.rails.cross_border.count, b.method.rail.count);
        prop_assert_eq!(
            b.payment_type.local.count + b.payment_type.cross_border.count,
            info.total_payment_count
        );
        prop_assert!(b.rails.cross_border.count >= 0);
        prop_assert!(b.method.card.count >= 0);
    }

    #[test]
    fn prop_benefit_decomposes(data in snapshot()) {
        let r = compute_results(&data);
        prop_assert_eq!(
            r.total_annual_benefit,
            r.costs.savings.total + r.incentives.differential
        );
        prop_assert_eq!(r.costs.savings.total, r.costs.current - r.costs.tungsten);
        prop_assert_eq!(r.freed_working_capital, r.breakdown.method.card.value);
    }

    #[test]
    fn prop_recompute_is_bit_identical(data in snapshot()) {
        let a = serde_json::to_string(&compute_results(&data)).unwrap();
        let b = serde_json::to_string(&compute_results(&data)).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_currency_round_trip(cents in 0i64..10_000_000_000i64) {
        let table = ExchangeRateTable::default();
        let amount = Decimal::new(cents, 2);
        for other in [Currency::GBP, Currency::EUR] {
            let there = table.convert_rounded(amount, Currency::USD, other).unwrap();
            let back = table.convert_rounded(there, other, Currency::USD).unwrap();
            prop_assert!((back - amount).abs() <= dec!(0.02), "{} -> {} -> {}", amount, there, back);
        }
    }
}
