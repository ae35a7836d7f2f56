//! Expense records and the boundary parsers that guard their construction.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{ExpenseError, Result};

use super::common::{Amounted, Displayable};

/// Calendar format used for input, display, and the persisted `date` column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Storage-assigned identifier of a persisted expense. Stable across removals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One expense entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Record {
    pub fn new(date: NaiveDate, description: impl Into<String>, amount: f64) -> Self {
        Self {
            date,
            description: description.into(),
            amount,
            category: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Validates raw user input and builds an uncategorized record.
    pub fn parse(date: &str, description: &str, amount: &str) -> Result<Self> {
        let date = parse_date(date)?;
        let amount = parse_amount(amount)?;
        Ok(Self::new(date, description, amount))
    }

    pub fn date_label(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

impl Amounted for Record {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Displayable for Record {
    fn display_label(&self) -> String {
        format!(
            "{} {} {:.2}{}",
            self.date_label(),
            self.description,
            self.amount,
            self.category
                .as_deref()
                .map(|name| format!(" [{}]", name))
                .unwrap_or_default()
        )
    }
}

/// Parses a strict `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    let invalid = || {
        ExpenseError::InvalidInput(format!(
            "`{}` is not a valid date (expected YYYY-MM-DD)",
            trimmed
        ))
    };
    // chrono alone accepts single-digit fields and a signed year.
    if !has_iso_shape(trimmed) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| invalid())
}

fn has_iso_shape(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(idx, byte)| match idx {
            4 | 7 => *byte == b'-',
            _ => byte.is_ascii_digit(),
        })
}

/// Parses a signed amount, tolerating a leading `$`.
pub fn parse_amount(input: &str) -> Result<f64> {
    let trimmed = input.trim();
    let (negative, rest) = if let Some(rest) = trimmed.strip_prefix('-') {
        (true, rest.trim_start())
    } else if let Some(rest) = trimmed.strip_prefix('+') {
        (false, rest.trim_start())
    } else {
        (false, trimmed)
    };
    let digits = rest.strip_prefix('$').unwrap_or(rest).trim_start();
    let value = digits
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && !digits.starts_with(['+', '-']))
        .ok_or_else(|| ExpenseError::InvalidInput(format!("`{}` is not a valid amount", trimmed)))?;
    Ok(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_builds_uncategorized_record() {
        let record = Record::parse("2024-01-01", "coffee", "3.50").expect("valid input");
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(record.description, "coffee");
        assert_eq!(record.amount, 3.5);
        assert!(record.category.is_none());
    }

    #[test]
    fn parse_date_rejects_other_layouts() {
        for raw in [
            "01/02/2024",
            "2024-13-01",
            "2024-02-30",
            "yesterday",
            "",
            "2024-1-5",
            "2024-01-5",
            "+2024-01-05",
            "2024-01-05x",
            "２024-01-05",
        ] {
            let err = parse_date(raw).expect_err("date should be rejected");
            assert!(matches!(err, ExpenseError::InvalidInput(_)), "{raw}: {err}");
        }
        assert!(parse_date(" 2024-02-29 ").is_ok());
    }

    #[test]
    fn parse_amount_accepts_signs_and_currency_symbol() {
        assert_eq!(parse_amount("12").unwrap(), 12.0);
        assert_eq!(parse_amount("$12.25").unwrap(), 12.25);
        assert_eq!(parse_amount("-4.5").unwrap(), -4.5);
        assert_eq!(parse_amount("-$4.5").unwrap(), -4.5);
        assert_eq!(parse_amount("+5").unwrap(), 5.0);
        assert_eq!(parse_amount("+$5").unwrap(), 5.0);
    }

    #[test]
    fn parse_amount_rejects_non_numeric_values() {
        for raw in ["", "abc", "NaN", "inf", "--3", "+-3", "++3", "-+3", "$", "+", "1,50"] {
            assert!(
                matches!(parse_amount(raw), Err(ExpenseError::InvalidInput(_))),
                "`{raw}` should be rejected"
            );
        }
    }

    #[test]
    fn record_serializes_iso_date_and_skips_missing_category() {
        let record = Record::parse("2024-03-05", "bus", "2").unwrap();
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"date":"2024-03-05","description":"bus","amount":2.0}"#
        );
        let tagged = record.with_category("transport");
        assert!(serde_json::to_string(&tagged)
            .unwrap()
            .contains(r#""category":"transport""#));
    }

    #[test]
    fn display_label_shows_category_when_present() {
        let record = Record::parse("2024-03-05", "bus", "2").unwrap();
        assert_eq!(record.display_label(), "2024-03-05 bus 2.00");
        assert_eq!(
            record.with_category("transport").display_label(),
            "2024-03-05 bus 2.00 [transport]"
        );
    }
}
