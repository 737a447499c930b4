pub mod distribution;

pub use distribution::{adjust_pair, adjust_tier, redistribute, sums_to_hundred, FxTier};
