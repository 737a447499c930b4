use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Percent, ONE_HUNDRED, PERCENT_TOLERANCE};

/// One of the three FX volume brackets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FxTier {
    Tier1,
    Tier2,
    Tier3,
}

impl FxTier {
    pub const ALL: [FxTier; 3] = [FxTier::Tier1, FxTier::Tier2, FxTier::Tier3];

    /// Zero-based slot in a tier vector.
    pub fn index(&self) -> usize {
        match self {
            FxTier::Tier1 => 0,
            FxTier::Tier2 => 1,
            FxTier::Tier3 => 2,
        }
    }

    /// Accepts the 1-based numbering the UI sliders use.
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(FxTier::Tier1),
            2 => Some(FxTier::Tier2),
            3 => Some(FxTier::Tier3),
            _ => None,
        }
    }
}

/// Whether `values` sum to 100 within the percentage tolerance.
pub fn sums_to_hundred(values: &[Percent]) -> bool {
    let total: Decimal = values.iter().copied().sum();
    (total - ONE_HUNDRED).abs() <= PERCENT_TOLERANCE
}

/// Move slot `changed` to `new_value` and re-normalise the rest.
///
/// The other slots share `100 - new_value` in proportion to their current
/// weights, or evenly when they all weigh zero. If the result is still more
/// than 0.01 away from 100, the residual is added to the last slot. That slot
/// is fixed regardless of which one moved; displayed percentages depend on it.
///
/// `new_value` is not clamped here. An out-of-range `changed` index leaves
/// the vector untouched.
pub fn redistribute(values: &[Percent], changed: usize, new_value: Percent) -> Vec<Percent> {
    let mut out = values.to_vec();
    if changed >= out.len() {
        return out;
    }

    let remaining = ONE_HUNDRED - new_value;
    out[changed] = new_value;

    let others: Vec<usize> = (0..out.len()).filter(|&i| i != changed).collect();
    if !others.is_empty() {
        let weight: Decimal = others.iter().map(|&i| values[i]).sum();
        if weight > Decimal::ZERO {
            for &i in &others {
                out[i] = values[i] / weight * remaining;
            }
        } else {
            let share = remaining / Decimal::from(others.len());
            for &i in &others {
                out[i] = share;
            }
        }
    }

    close_to_hundred(&mut out);
    out
}

/// Push any residual beyond the tolerance into the last slot.
fn close_to_hundred(values: &mut [Percent]) {
    let total: Decimal = values.iter().copied().sum();
    if (total - ONE_HUNDRED).abs() > PERCENT_TOLERANCE {
        if let Some(last) = values.last_mut() {
            *last += ONE_HUNDRED - total;
        }
    }
}

/// Three-tier convenience wrapper over [`redistribute`].
pub fn adjust_tier(tiers: [Percent; 3], tier: FxTier, new_value: Percent) -> [Percent; 3] {
    let out = redistribute(&tiers, tier.index(), new_value);
    [out[0], out[1], out[2]]
}

/// Two-way wrapper over [`redistribute`]: the untouched side takes
/// `100 - new_value`.
pub fn adjust_pair(pair: [Percent; 2], changed: usize, new_value: Percent) -> [Percent; 2] {
    let out = redistribute(&pair, changed, new_value);
    [out[0], out[1]]
}
