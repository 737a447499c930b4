pub mod payments;

pub use payments::{
    average_transaction_size, calculate_breakdown, calculate_fx_volumes, FxVolumes, MethodSplit,
    PaymentBreakdown, RailSegment, RailSplit, Segment, TypeSplit,
};
