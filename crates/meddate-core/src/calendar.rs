//! Calendar normalization for structured and fixed-format dates.
//!
//! Every input resolves to a [`CalendarValue`]; malformed input degrades to
//! [`CalendarValue::Unknown`] instead of producing an error.
//!
//! Construction is lenient in the Gregorian sense: out-of-range months and
//! days roll into the neighbouring unit (`13/1/2000` is January 1st 2001).

use std::sync::LazyLock;

use chrono::{Days, Months, NaiveDate};
use regex::Regex;

use meddate_model::{CalendarDate, CalendarValue, StructuredDate};

use crate::phrase::DatePhraseParser;

/// Year used when a structured date carries a month or day but no year.
pub const DEFAULT_YEAR: i64 = 1970;

static SLASH_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{0,2}/[0-9]{0,2}/[0-9]{2,4}$").expect("valid slash date pattern")
});

static CHUNK_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{0,2}/[0-9]{0,2}/[0-9]{4}$").expect("valid chunk date pattern")
});

static DASH_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{1,4}-[0-9]{1,2}-[0-9]{1,4}$").expect("valid dash date pattern")
});

/// True for `M/D/YY`-shaped text: 0-2 digit month and day, 2-4 digit year.
pub fn is_slash_date(text: &str) -> bool {
    SLASH_DATE.is_match(text)
}

/// Stricter slash shape for syntactic chunks: the year must have 4 digits.
pub fn is_chunk_date(text: &str) -> bool {
    CHUNK_DATE.is_match(text)
}

/// True for `Y-M-D`-shaped text with 1-4, 1-2 and 1-4 digit fields.
pub fn is_dash_date(text: &str) -> bool {
    DASH_DATE.is_match(text)
}

/// Builds a calendar value from separate year, month and day strings.
///
/// Fields that are missing, empty, or contain anything but ASCII digits
/// count as absent. Only when all three are absent is the result unknown;
/// otherwise absent fields fall back to year 1970, January, day 1.
pub fn from_structured(
    year: Option<&str>,
    month: Option<&str>,
    day: Option<&str>,
) -> CalendarValue {
    let year = parse_digits(year);
    let month = parse_digits(month);
    let day = parse_digits(day);
    if year.is_none() && month.is_none() && day.is_none() {
        return CalendarValue::Unknown;
    }
    lenient_date(
        year.unwrap_or(DEFAULT_YEAR),
        month.unwrap_or(1),
        day.unwrap_or(1),
    )
}

/// [`from_structured`] over a [`StructuredDate`].
pub fn from_structured_date(date: &StructuredDate) -> CalendarValue {
    from_structured(
        date.year.as_deref(),
        date.month.as_deref(),
        date.day.as_deref(),
    )
}

/// Reads `month/day/year` text.
///
/// An empty or zero month or day defaults to 1; a missing year makes the
/// whole value unknown. The caller is expected to have checked the shape
/// with [`is_slash_date`].
pub fn from_slash_text(text: &str) -> CalendarValue {
    let mut fields = text.split('/');
    let (Some(month), Some(day), Some(year)) = (fields.next(), fields.next(), fields.next())
    else {
        return CalendarValue::Unknown;
    };
    from_ordered_fields(year, month, day)
}

/// Reads `year-month-day` text with the same defaults as [`from_slash_text`].
pub fn from_dash_text(text: &str) -> CalendarValue {
    let mut fields = text.split('-');
    let (Some(year), Some(month), Some(day)) = (fields.next(), fields.next(), fields.next())
    else {
        return CalendarValue::Unknown;
    };
    from_ordered_fields(year, month, day)
}

/// Resolves free text: slash and dash shaped dates are read directly,
/// anything else goes to the phrase parser.
pub fn resolve_text(text: &str, parser: &dyn DatePhraseParser) -> CalendarValue {
    let trimmed = text.trim();
    if is_slash_date(trimmed) {
        return from_slash_text(trimmed);
    }
    if is_dash_date(trimmed) {
        return from_dash_text(trimmed);
    }
    parser.parse(trimmed)
}

/// Resolves a time mention: its structured date when that yields a day,
/// else its covered text.
pub fn resolve_time_mention(
    date: Option<&StructuredDate>,
    covered_text: &str,
    parser: &dyn DatePhraseParser,
) -> CalendarValue {
    if let Some(date) = date {
        let value = from_structured_date(date);
        if !value.is_unknown() {
            return value;
        }
    }
    resolve_text(covered_text, parser)
}

/// Digit rendering of a resolved value, `None` for unknown.
pub fn to_digit_string(value: &CalendarValue) -> Option<String> {
    value.known().map(|date| date.to_digit_string())
}

fn from_ordered_fields(year: &str, month: &str, day: &str) -> CalendarValue {
    let Some(year) = parse_digits(Some(year)) else {
        return CalendarValue::Unknown;
    };
    let month = parse_digits(Some(month)).filter(|m| *m > 0).unwrap_or(1);
    let day = parse_digits(Some(day)).filter(|d| *d > 0).unwrap_or(1);
    lenient_date(year, month, day)
}

/// Parses a non-empty all-ASCII-digit string.
fn parse_digits(text: Option<&str>) -> Option<i64> {
    let text = text?;
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// January 1st of `year`, then `month - 1` months and `day - 1` days later.
fn lenient_date(year: i64, month: i64, day: i64) -> CalendarValue {
    let date = i32::try_from(year)
        .ok()
        .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
        .and_then(|date| shift_months(date, month - 1))
        .and_then(|date| shift_days(date, day - 1));
    CalendarValue::from(date.map(CalendarDate::from))
}

fn shift_months(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let amount = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        date.checked_add_months(amount)
    } else {
        date.checked_sub_months(amount)
    }
}

fn shift_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    let amount = Days::new(days.unsigned_abs());
    if days >= 0 {
        date.checked_add_days(amount)
    } else {
        date.checked_sub_days(amount)
    }
}
