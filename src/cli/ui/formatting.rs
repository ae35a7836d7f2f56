use chrono::NaiveDate;

use crate::domain::DATE_FORMAT;

/// Formats an amount with two decimals, placing the sign before the currency symbol.
pub fn format_amount(amount: f64, symbol: &str) -> String {
    let magnitude = format!("{:.2}", amount.abs());
    // Rounding can turn a tiny negative into "0.00"; never print "-$0.00".
    if amount < 0.0 && magnitude != "0.00" {
        format!("-{}{}", symbol, magnitude)
    } else {
        format!("{}{}", symbol, magnitude)
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}
