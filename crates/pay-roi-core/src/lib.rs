pub mod allocation;
pub mod breakdown;
pub mod config;
pub mod costs;
pub mod currency;
pub mod engine;
pub mod error;
pub mod model;
pub mod types;

#[cfg(feature = "report")]
pub mod report;

#[cfg(feature = "storage")]
pub mod storage;

pub use config::EngineConfig;
pub use engine::{calculate_roi, compute_results, Results, RoiCalculator, ValidationReport};
pub use error::PayRoiError;
pub use types::*;

/// Standard result type for all pay-roi operations
pub type PayRoiResult<T> = Result<T, PayRoiError>;
