pub mod fields;
pub mod snapshot;

pub use fields::{CustomerField, FeeField, FieldValue};
pub use snapshot::{
    CalculationData, CustomerInfo, FeeSchedule, Fees, FxMargins, FxTierDistribution, FxVolumeInput,
    PaymentMethodDistribution, PaymentTypeDistribution, Provider,
};
