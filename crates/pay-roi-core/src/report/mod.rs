pub mod format;
pub mod savings_report;
pub mod value_drivers;

pub use format::{format_currency, format_percent, CurrencyStyle};
pub use savings_report::{build_savings_report, IncentiveRow, SavingsReport, SavingsRow};
pub use value_drivers::{value_driver_note, ValueDriverCategory};
