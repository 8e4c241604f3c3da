//! Normalized travel date (`dd/mm/yyyy`) and its extraction from free text

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::PlannerError;

/// chrono format string matching the normalized representation
pub const DATE_FORMAT: &str = "%d/%m/%Y";

static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[0-9]{2}/[0-9]{2}/[0-9]{4}\b").expect("valid date pattern"));

/// Calendar date in `dd/mm/yyyy` form.
///
/// Only the ranges are checked (day 1-31, month 1-12); a day that does not
/// exist in its month (31/02) is still a well-formed normalized date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedDate {
    pub day: u8,
    pub month: u8,
    pub year: u16,
}

impl NormalizedDate {
    pub fn new(day: u8, month: u8, year: u16) -> crate::Result<Self> {
        if !(1..=31).contains(&day) {
            return Err(PlannerError::validation(format!("day {day} out of range")));
        }
        if !(1..=12).contains(&month) {
            return Err(PlannerError::validation(format!(
                "month {month} out of range"
            )));
        }
        Ok(Self { day, month, year })
    }

    /// Convert to a real calendar date, `None` for impossible days like 31/04
    #[must_use]
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(
            i32::from(self.year),
            u32::from(self.month),
            u32::from(self.day),
        )
    }
}

impl From<NaiveDate> for NormalizedDate {
    fn from(date: NaiveDate) -> Self {
        // chrono guarantees day/month ranges; the year is clamped to the 4-digit form
        Self {
            day: date.day() as u8,
            month: date.month() as u8,
            year: date.year().clamp(0, 9999) as u16,
        }
    }
}

impl FromStr for NormalizedDate {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PlannerError::validation(format!("'{s}' is not a dd/mm/yyyy date"));

        let mut parts = s.trim().split('/');
        let (Some(day), Some(month), Some(year), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };
        if day.len() != 2 || month.len() != 2 || year.len() != 4 {
            return Err(invalid());
        }

        let day = day.parse::<u8>().map_err(|_| invalid())?;
        let month = month.parse::<u8>().map_err(|_| invalid())?;
        let year = year.parse::<u16>().map_err(|_| invalid())?;
        Self::new(day, month, year)
    }
}

impl fmt::Display for NormalizedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}/{:04}", self.day, self.month, self.year)
    }
}

/// Scan `text` for `dd/mm/yyyy` dates and return the last valid one.
///
/// Models tend to restate the examples before answering, so the final
/// occurrence is taken as the answer.
#[must_use]
pub fn extract_last_date(text: &str) -> Option<NormalizedDate> {
    DATE_PATTERN
        .find_iter(text)
        .filter_map(|m| m.as_str().parse::<NormalizedDate>().ok())
        .last()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("05/04/2025", Some("05/04/2025"))]
    #[case("The date is 05/04/2025.", Some("05/04/2025"))]
    #[case("Next saturday is 05/04/2025, not 12/04/2025", Some("12/04/2025"))]
    #[case("system: 07/04/2025\nAnswer: \"09/04/2025\"", Some("09/04/2025"))]
    #[case("01/04/2025 then 45/13/2025", Some("01/04/2025"))]
    #[case("2025-04-05", None)]
    #[case("5/4/2025", None)]
    #[case("", None)]
    #[case("ref 123/04/20251", None)]
    fn test_extract_last_date(#[case] text: &str, #[case] expected: Option<&str>) {
        let found = extract_last_date(text).map(|d| d.to_string());
        assert_eq!(found.as_deref(), expected);
    }

    #[test]
    fn test_parse_and_display() {
        let date: NormalizedDate = "05/04/2025".parse().unwrap();
        assert_eq!(date.day, 5);
        assert_eq!(date.month, 4);
        assert_eq!(date.year, 2025);
        assert_eq!(date.to_string(), "05/04/2025");
    }

    #[rstest]
    #[case("00/04/2025")]
    #[case("32/04/2025")]
    #[case("10/13/2025")]
    #[case("10/00/2025")]
    #[case("1/04/2025")]
    #[case("10/04/2025/1")]
    #[case("aa/bb/cccc")]
    fn test_parse_rejects(#[case] input: &str) {
        assert!(input.parse::<NormalizedDate>().is_err());
    }

    #[test]
    fn test_naive_date_conversion() {
        let date = NormalizedDate::from(NaiveDate::from_ymd_opt(2025, 3, 31).unwrap());
        assert_eq!(date.to_string(), "31/03/2025");
        assert_eq!(
            date.to_naive_date(),
            NaiveDate::from_ymd_opt(2025, 3, 31)
        );

        let impossible = NormalizedDate::new(31, 4, 2025).unwrap();
        assert!(impossible.to_naive_date().is_none());
    }
}
