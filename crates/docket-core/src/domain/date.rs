//! Submission dates.
//!
//! Dates are always held as a calendar date and rendered zero-padded
//! (`YYYY-MM-DD`), so calendar order and lexical order of the rendering agree.
//! Strings that are not zero-padded are rejected at the boundary instead of
//! being compared lexically.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rendering used for every stored date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("date '{0}' is not in YYYY-MM-DD form")]
    Format(String),

    #[error("date '{0}' must be zero-padded as YYYY-MM-DD")]
    NotPadded(String),

    #[error("date '{0}' is not a valid calendar date")]
    OutOfRange(String),
}

/// The day a task entered the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SubmissionDate(NaiveDate);

impl SubmissionDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// Parse `YYYY-M-D` as well as `YYYY-MM-DD`, normalizing to the padded form.
    pub fn parse_normalized(raw: &str) -> Result<Self, DateError> {
        let fields = split_fields(raw)?;
        build(raw, fields)
    }
}

/// Splits `raw` into year, month and day, checking only the digit shape.
fn split_fields(raw: &str) -> Result<[&str; 3], DateError> {
    let mut parts = raw.split('-');
    let (Some(year), Some(month), Some(day), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(DateError::Format(raw.to_string()));
    };

    let digits = |part: &str, max: usize| {
        !part.is_empty() && part.len() <= max && part.bytes().all(|b| b.is_ascii_digit())
    };
    if year.len() != 4 || !digits(year, 4) || !digits(month, 2) || !digits(day, 2) {
        return Err(DateError::Format(raw.to_string()));
    }
    Ok([year, month, day])
}

fn build(raw: &str, [year, month, day]: [&str; 3]) -> Result<SubmissionDate, DateError> {
    let format_err = |_| DateError::Format(raw.to_string());
    let year = year.parse::<i32>().map_err(format_err)?;
    let month = month.parse::<u32>().map_err(format_err)?;
    let day = day.parse::<u32>().map_err(format_err)?;
    SubmissionDate::from_ymd(year, month, day).ok_or_else(|| DateError::OutOfRange(raw.to_string()))
}

impl FromStr for SubmissionDate {
    type Err = DateError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let fields = split_fields(raw)?;
        if fields[1].len() != 2 || fields[2].len() != 2 {
            return Err(DateError::NotPadded(raw.to_string()));
        }
        build(raw, fields)
    }
}

impl fmt::Display for SubmissionDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl From<NaiveDate> for SubmissionDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl TryFrom<String> for SubmissionDate {
    type Error = DateError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl From<SubmissionDate> for String {
    fn from(date: SubmissionDate) -> Self {
        date.to_string()
    }
}

/// Which calendar a clock reading is turned into a date in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateZone {
    /// The host's local time zone.
    #[default]
    Local,
    Utc,
}

impl DateZone {
    pub fn date_of(self, now: DateTime<Utc>) -> SubmissionDate {
        match self {
            DateZone::Local => SubmissionDate(now.with_timezone(&Local).date_naive()),
            DateZone::Utc => SubmissionDate(now.date_naive()),
        }
    }
}

/// How caller-supplied threshold dates are accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdDates {
    /// Only `YYYY-MM-DD`.
    #[default]
    Strict,

    /// Also `YYYY-M-D`, padded before comparison.
    Normalize,
}

impl ThresholdDates {
    pub fn parse(self, raw: &str) -> Result<SubmissionDate, DateError> {
        match self {
            ThresholdDates::Strict => raw.parse(),
            ThresholdDates::Normalize => SubmissionDate::parse_normalized(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    #[rstest]
    #[case::padded("2025-05-27", 2025, 5, 27)]
    #[case::year_end("1999-12-31", 1999, 12, 31)]
    #[case::leap_day("2024-02-29", 2024, 2, 29)]
    fn strict_parse_accepts_padded_dates(
        #[case] raw: &str,
        #[case] year: i32,
        #[case] month: u32,
        #[case] day: u32,
    ) {
        let date: SubmissionDate = raw.parse().unwrap();
        assert_eq!(date, SubmissionDate::from_ymd(year, month, day).unwrap());
        assert_eq!(date.to_string(), raw);
    }

    #[rstest]
    #[case::short_month("2025-5-27")]
    #[case::short_day("2025-05-7")]
    #[case::both_short("2025-5-7")]
    fn strict_parse_rejects_unpadded_dates(#[case] raw: &str) {
        assert_eq!(
            raw.parse::<SubmissionDate>(),
            Err(DateError::NotPadded(raw.to_string()))
        );
    }

    #[rstest]
    #[case::empty("")]
    #[case::slashes("2025/05/27")]
    #[case::short_year("25-05-27")]
    #[case::extra_field("2025-05-27-01")]
    #[case::letters("2025-ab-27")]
    #[case::three_digit_month("2025-005-27")]
    fn malformed_dates_are_format_errors(#[case] raw: &str) {
        assert_eq!(
            raw.parse::<SubmissionDate>(),
            Err(DateError::Format(raw.to_string()))
        );
        assert_eq!(
            SubmissionDate::parse_normalized(raw),
            Err(DateError::Format(raw.to_string()))
        );
    }

    #[test]
    fn impossible_calendar_dates_are_out_of_range() {
        assert_eq!(
            "2023-02-29".parse::<SubmissionDate>(),
            Err(DateError::OutOfRange("2023-02-29".to_string()))
        );
        assert_eq!(
            SubmissionDate::parse_normalized("2025-13-1"),
            Err(DateError::OutOfRange("2025-13-1".to_string()))
        );
    }

    #[test]
    fn normalized_parse_pads_fields() {
        let date = SubmissionDate::parse_normalized("2025-5-7").unwrap();
        assert_eq!(date.to_string(), "2025-05-07");
    }

    #[test]
    fn calendar_order_matches_padded_lexical_order() {
        // Unpadded these would compare "2025-10-1" < "2025-9-30".
        let october = SubmissionDate::from_ymd(2025, 10, 1).unwrap();
        let september = SubmissionDate::from_ymd(2025, 9, 30).unwrap();
        assert!(september < october);
        assert!(september.to_string() < october.to_string());
    }

    #[test]
    fn serializes_as_padded_string() {
        let date = SubmissionDate::from_ymd(2025, 1, 2).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"2025-01-02\"");
        assert!(serde_json::from_str::<SubmissionDate>("\"2025-1-2\"").is_err());
    }

    #[test]
    fn utc_zone_uses_utc_calendar_day() {
        let now = Utc.with_ymd_and_hms(2025, 5, 27, 23, 30, 0).unwrap();
        assert_eq!(
            DateZone::Utc.date_of(now),
            SubmissionDate::from_ymd(2025, 5, 27).unwrap()
        );
    }

    #[test]
    fn threshold_policy_controls_padding() {
        assert!(ThresholdDates::Strict.parse("2025-5-27").is_err());
        assert_eq!(
            ThresholdDates::Normalize.parse("2025-5-27").unwrap().to_string(),
            "2025-05-27"
        );
    }
}
