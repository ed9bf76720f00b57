//! Calendar values attached to medication events.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A known Gregorian calendar day.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Builds a date from an exact year/month/day triple.
    ///
    /// Returns `None` for triples that do not name a real day.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Fixed-width digit rendering anchored at noon: `YYYYMMDD1200`.
    pub fn to_digit_string(&self) -> String {
        format!(
            "{:04}{:02}{:02}1200",
            self.year(),
            self.month(),
            self.day()
        )
    }

    /// Structured year/month/day fields without zero padding, as written
    /// back onto dated medications.
    pub fn to_structured(&self) -> StructuredDate {
        StructuredDate {
            year: Some(self.year().to_string()),
            month: Some(self.month().to_string()),
            day: Some(self.day().to_string()),
        }
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Outcome of date normalization: a known day or the unknown marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarValue {
    Known(CalendarDate),
    Unknown,
}

impl CalendarValue {
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    pub fn known(&self) -> Option<CalendarDate> {
        match self {
            Self::Known(date) => Some(*date),
            Self::Unknown => None,
        }
    }
}

impl From<Option<CalendarDate>> for CalendarValue {
    fn from(date: Option<CalendarDate>) -> Self {
        date.map_or(Self::Unknown, Self::Known)
    }
}

impl fmt::Display for CalendarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(date) => write!(f, "{date}"),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

/// Separate year/month/day strings as carried by a time mention.
///
/// Any field may be missing or hold non-digit text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredDate {
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub month: Option<String>,
    #[serde(default)]
    pub day: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_string_is_noon_anchored_and_padded() {
        let date = CalendarDate::from_ymd(2001, 3, 5).unwrap();
        assert_eq!(date.to_digit_string(), "200103051200");
        let early = CalendarDate::from_ymd(99, 1, 1).unwrap();
        assert_eq!(early.to_digit_string(), "009901011200");
    }

    #[test]
    fn unknown_is_distinct_from_any_date() {
        let first = CalendarValue::Known(CalendarDate::from_ymd(1, 1, 1).unwrap());
        assert!(!first.is_unknown());
        assert!(CalendarValue::Unknown.is_unknown());
        assert_ne!(first, CalendarValue::Unknown);
        assert_eq!(CalendarValue::from(None), CalendarValue::Unknown);
    }

    #[test]
    fn structured_fields_are_unpadded() {
        let date = CalendarDate::from_ymd(2000, 1, 9).unwrap();
        let structured = date.to_structured();
        assert_eq!(structured.year.as_deref(), Some("2000"));
        assert_eq!(structured.month.as_deref(), Some("1"));
        assert_eq!(structured.day.as_deref(), Some("9"));
    }

    #[test]
    fn serializes_as_iso_day() {
        let date = CalendarDate::from_ymd(2000, 12, 31).unwrap();
        assert_eq!(serde_json::to_string(&date).unwrap(), "\"2000-12-31\"");
        assert_eq!(date.to_string(), "2000-12-31");
    }
}
