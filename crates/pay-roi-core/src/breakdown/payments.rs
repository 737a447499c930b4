use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::CustomerInfo;
use crate::types::{safe_div, share_of_count, Count, Money, Percent, ONE_HUNDRED};

// ---------------------------------------------------------------------------
// Breakdown types
// ---------------------------------------------------------------------------

/// A slice of the payment book with the percentage that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub value: Money,
    pub count: Count,
    pub percent: Percent,
}

/// A rail-only slice. This is what the cost model prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RailSegment {
    pub value: Money,
    pub count: Count,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodSplit {
    pub rail: Segment,
    pub card: Segment,
}

/// Local vs. cross-border including a proportional card share. Display only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeSplit {
    pub local: Segment,
    pub cross_border: Segment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RailSplit {
    pub local: RailSegment,
    pub cross_border: RailSegment,
}

/// Method-then-type breakdown of the customer's payments.
///
/// `type` is for the geography charts; `rails` feeds the cost model. The two
/// must not be swapped: only `rails` excludes card volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentBreakdown {
    #[serde(rename = "type")]
    pub payment_type: TypeSplit,
    pub method: MethodSplit,
    pub rails: RailSplit,
}

/// FX-eligible value split by margin tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FxVolumes {
    pub tier1: Money,
    pub tier2: Money,
    pub tier3: Money,
    pub total: Money,
}

// ---------------------------------------------------------------------------
// Computation
// ---------------------------------------------------------------------------

/// Split `value`/`count` by `percent`, giving the remainder to the second
/// half so neither side is rounded independently.
fn split(value: Money, count: Count, percent: Percent) -> ((Money, Count), (Money, Count)) {
    let first_value = value * percent / ONE_HUNDRED;
    let first_count = share_of_count(count, percent);
    ((first_value, first_count), (value - first_value, count - first_count))
}

/// Break the payment book down by method first, then rail volume by type.
///
/// Order matters: the type split is applied to the already-rounded rail
/// count, never to the total count.
pub fn calculate_breakdown(info: &CustomerInfo) -> PaymentBreakdown {
    let type_dist = &info.payment_type_distribution;
    let method_dist = &info.payment_method_distribution;
    let local_pct = type_dist.local_percent;

    // Step 1: method split
    let ((rail_value, rail_count), (card_value, card_count)) = split(
        info.total_payment_value,
        info.total_payment_count,
        method_dist.rail_percent,
    );

    // Step 2: rail-only type split
    let ((local_rail_value, local_rail_count), (cb_rail_value, cb_rail_count)) =
        split(rail_value, rail_count, local_pct);

    // Step 3: display view, cards allocated by the same geography share
    let ((local_card_value, local_card_count), (cb_card_value, cb_card_count)) =
        split(card_value, card_count, local_pct);

    PaymentBreakdown {
        payment_type: TypeSplit {
            local: Segment {
                value: local_rail_value + local_card_value,
                count: local_rail_count + local_card_count,
                percent: local_pct,
            },
            cross_border: Segment {
                value: cb_rail_value + cb_card_value,
                count: cb_rail_count + cb_card_count,
                percent: type_dist.cross_border_percent,
            },
        },
        method: MethodSplit {
            rail: Segment {
                value: rail_value,
                count: rail_count,
                percent: method_dist.rail_percent,
            },
            card: Segment {
                value: card_value,
                count: card_count,
                percent: method_dist.card_percent,
            },
        },
        rails: RailSplit {
            local: RailSegment {
                value: local_rail_value,
                count: local_rail_count,
            },
            cross_border: RailSegment {
                value: cb_rail_value,
                count: cb_rail_count,
            },
        },
    }
}

/// FX volume is a share of cross-border *rail* value, split across tiers.
pub fn calculate_fx_volumes(info: &CustomerInfo, breakdown: &PaymentBreakdown) -> FxVolumes {
    let total =
        breakdown.rails.cross_border.value * info.fx_percent_of_cross_border / ONE_HUNDRED;
    let dist = &info.fx_volume.distribution;

    FxVolumes {
        tier1: total * dist.tier1_percent / ONE_HUNDRED,
        tier2: total * dist.tier2_percent / ONE_HUNDRED,
        tier3: total * dist.tier3_percent / ONE_HUNDRED,
        total,
    }
}

pub fn average_transaction_size(info: &CustomerInfo) -> Money {
    if info.total_payment_count > 0 {
        safe_div(info.total_payment_value, Decimal::from(info.total_payment_count))
    } else {
        Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_breakdown() {
        let info = CustomerInfo::default();
        let b = calculate_breakdown(&info);

        assert_eq!(b.method.rail.value, dec!(45000000));
        assert_eq!(b.method.card.value, dec!(5000000));
        assert_eq!(b.method.rail.count, 990_000);
        assert_eq!(b.method.card.count, 110_000);

        assert_eq!(b.rails.local.value, dec!(27000000));
        assert_eq!(b.rails.cross_border.value, dec!(18000000));
        assert_eq!(b.rails.local.count, 594_000);
        assert_eq!(b.rails.cross_border.count, 396_000);

        assert_eq!(b.payment_type.local.value, dec!(30000000));
        assert_eq!(b.payment_type.cross_border.value, dec!(20000000));
        assert_eq!(b.payment_type.local.count, 660_000);
        assert_eq!(b.payment_type.cross_border.count, 440_000);
    }

    #[test]
    fn test_rail_view_excludes_cards() {
        let info = CustomerInfo::default();
        let b = calculate_breakdown(&info);
        let rail_total = b.rails.local.count + b.rails.cross_border.count;
        let type_total = b.payment_type.local.count + b.payment_type.cross_border.count;
        assert_eq!(rail_total, b.method.rail.count);
        assert_eq!(type_total, info.total_payment_count);
        assert_ne!(b.rails.local.value, b.payment_type.local.value);
    }

    #[test]
    fn test_odd_counts_conserved() {
        let mut info = CustomerInfo::default();
        info.total_payment_count = 7;
        info.payment_method_distribution.rail_percent = dec!(33.3);
        info.payment_type_distribution.local_percent = dec!(50);
        let b = calculate_breakdown(&info);
        // 7 * 0.333 = 2.331 -> 2 rails; 2 * 0.5 = 1 local
        assert_eq!(b.method.rail.count, 2);
        assert_eq!(b.method.card.count, 5);
        assert_eq!(b.rails.local.count, 1);
        assert_eq!(b.rails.cross_border.count, 1);
    }

    #[test]
    fn test_fx_volumes_from_cross_border_rails() {
        let info = CustomerInfo::default();
        let b = calculate_breakdown(&info);
        let fx = calculate_fx_volumes(&info, &b);
        assert_eq!(fx.total, dec!(9000000));
        assert_eq!(fx.tier1, dec!(3600000));
        assert_eq!(fx.tier2, dec!(3150000));
        assert_eq!(fx.tier3, dec!(2250000));
    }

    #[test]
    fn test_average_transaction_size_zero_count() {
        let mut info = CustomerInfo::default();
        info.total_payment_count = 0;
        assert_eq!(average_transaction_size(&info), Decimal::ZERO);
        info.total_payment_count = 1_000;
        info.total_payment_value = dec!(250000);
        assert_eq!(average_transaction_size(&info), dec!(250));
    }
}
