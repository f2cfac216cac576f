use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when parsing a `"Month Year"` period label.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayPeriodError {
    #[error("unrecognized period '{0}', expected the form \"March 2025\"")]
    Unparseable(String),

    #[error("unknown month name '{0}'")]
    UnknownMonth(String),
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A named payroll period such as `"March 2025"`.
///
/// Ordering is by `(year, month)`. Period labels must never be compared as
/// strings: lexicographic order breaks across year boundaries and puts
/// `"April"` before `"March"`.
///
/// Field order matters for the derived `Ord`: `year` first, then `month`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct PayPeriod {
    pub year: i32,
    /// Calendar month, 1 through 12.
    pub month: u32,
}

impl PayPeriod {
    /// Creates a period, returning `None` if `month` is outside 1..=12.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// The period containing the given calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// English month name, e.g. `"March"`.
    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }
}

impl fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month_name(), self.year)
    }
}

impl FromStr for PayPeriod {
    type Err = PayPeriodError;

    /// Parses a `"Month Year"` label, case-insensitively.
    ///
    /// ```
    /// use payroll_core::PayPeriod;
    ///
    /// let period: PayPeriod = "March 2025".parse().unwrap();
    /// assert_eq!(period, PayPeriod::new(2025, 3).unwrap());
    /// assert_eq!(period.to_string(), "March 2025");
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        static PATTERN: OnceLock<Regex> = OnceLock::new();
        let pattern = PATTERN
            .get_or_init(|| Regex::new(r"^\s*([A-Za-z]+)\s+(\d{4})\s*$").expect("valid regex"));

        let captures = pattern
            .captures(s)
            .ok_or_else(|| PayPeriodError::Unparseable(s.to_string()))?;

        let name = &captures[1];
        let month = MONTH_NAMES
            .iter()
            .position(|m| m.eq_ignore_ascii_case(name))
            .ok_or_else(|| PayPeriodError::UnknownMonth(name.to_string()))?
            as u32
            + 1;

        // The regex guarantees four digits.
        let year: i32 = captures[2].parse().expect("four-digit year");

        Ok(Self { year, month })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_month_year_label() {
        let period: PayPeriod = "March 2025".parse().unwrap();

        assert_eq!(period, PayPeriod { year: 2025, month: 3 });
    }

    #[test]
    fn parsing_ignores_case_and_whitespace() {
        let period: PayPeriod = "  december 2024 ".parse().unwrap();

        assert_eq!(period, PayPeriod { year: 2024, month: 12 });
    }

    #[test]
    fn rejects_unknown_month_name() {
        let result: Result<PayPeriod, _> = "Smarch 2025".parse();

        assert_eq!(
            result,
            Err(PayPeriodError::UnknownMonth("Smarch".to_string()))
        );
    }

    #[test]
    fn rejects_malformed_label() {
        let result: Result<PayPeriod, _> = "2025-03".parse();

        assert_eq!(
            result,
            Err(PayPeriodError::Unparseable("2025-03".to_string()))
        );
    }

    #[test]
    fn display_round_trips() {
        let period = PayPeriod { year: 2025, month: 4 };

        assert_eq!(period.to_string(), "April 2025");
        assert_eq!("April 2025".parse::<PayPeriod>().unwrap(), period);
    }

    #[test]
    fn orders_by_calendar_not_lexicographically() {
        // "April 2025" < "March 2025" as strings, but April follows March.
        let march: PayPeriod = "March 2025".parse().unwrap();
        let april: PayPeriod = "April 2025".parse().unwrap();

        assert!(march < april);
    }

    #[test]
    fn orders_across_year_boundaries() {
        // "December 2024" > "January 2025" as strings.
        let december: PayPeriod = "December 2024".parse().unwrap();
        let january: PayPeriod = "January 2025".parse().unwrap();

        assert!(december < january);
    }

    #[test]
    fn new_rejects_out_of_range_month() {
        assert_eq!(PayPeriod::new(2025, 0), None);
        assert_eq!(PayPeriod::new(2025, 13), None);
        assert!(PayPeriod::new(2025, 12).is_some());
    }

    #[test]
    fn from_date_takes_year_and_month() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 17).unwrap();

        assert_eq!(
            PayPeriod::from_date(date),
            PayPeriod { year: 2025, month: 3 }
        );
    }
}
