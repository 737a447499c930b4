pub mod rates;

pub use rates::{convert, currency_symbol, ExchangeRateTable};
