pub mod calculator;
pub mod results;
pub mod validation;

pub use calculator::RoiCalculator;
pub use results::{calculate_roi, compute_results, DetailedCosts, Results};
pub use validation::{check_bounds, validate, ValidationReport};
