use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// How monetary figures are written in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CurrencyStyle {
    /// `$1.25M`, `£940.00K`
    #[default]
    Abbreviated,
    /// `$1,250,000`
    Grouped,
}

fn fixed(value: Decimal, decimals: u32) -> String {
    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", decimals as usize, rounded)
}

fn group_thousands(digits: &str) -> String {
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    match frac_part {
        Some(f) => format!("{grouped}.{f}"),
        None => grouped,
    }
}

/// Format a monetary amount with its currency symbol. The sign is written
/// before the symbol.
pub fn format_currency(value: Decimal, decimals: u32, symbol: &str, style: CurrencyStyle) -> String {
    let sign = if value < Decimal::ZERO { "-" } else { "" };
    let abs = value.abs();

    let body = match style {
        CurrencyStyle::Grouped => group_thousands(&fixed(abs, decimals)),
        CurrencyStyle::Abbreviated => {
            if abs >= dec!(1000000000) {
                format!("{}B", fixed(abs / dec!(1000000000), 2))
            } else if abs >= dec!(1000000) {
                format!("{}M", fixed(abs / dec!(1000000), 2))
            } else if abs >= dec!(1000) {
                format!("{}K", fixed(abs / dec!(1000), 2))
            } else {
                fixed(abs, decimals)
            }
        }
    };
    format!("{sign}{symbol}{body}")
}

/// Percentages are always shown with two decimals.
pub fn format_percent(value: Decimal) -> String {
    format!("{}%", fixed(value, 2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abbreviated() {
        let s = CurrencyStyle::Abbreviated;
        assert_eq!(format_currency(dec!(938500), 0, "$", s), "$938.50K");
        assert_eq!(format_currency(dec!(2036025), 0, "£", s), "£2.04M");
        assert_eq!(format_currency(dec!(1500000000), 0, "€", s), "€1.50B");
        assert_eq!(format_currency(dec!(-45), 0, "$", s), "-$45");
        assert_eq!(format_currency(dec!(12.5), 2, "$", s), "$12.50");
    }

    #[test]
    fn test_grouped() {
        let s = CurrencyStyle::Grouped;
        assert_eq!(format_currency(dec!(1122525), 0, "$", s), "$1,122,525");
        assert_eq!(format_currency(dec!(-1234.567), 2, "£", s), "-£1,234.57");
        assert_eq!(format_currency(dec!(999), 0, "$", s), "$999");
    }

    #[test]
    fn test_percent() {
        assert_eq!(format_percent(dec!(44.866858)), "44.87%");
        assert_eq!(format_percent(dec!(50)), "50.00%");
    }
}
