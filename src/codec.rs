//! Date codec for localized score record dates.
//!
//! Raw score records carry their day as a `DD.MM.YYYY` string. This module
//! turns that string into a [`NaiveDate`] and back into the two string forms
//! the rest of the crate needs: a sortable lookup key and a chart label.

use chrono::{Datelike, Duration, NaiveDate};

use crate::error::{Error, Result};
use crate::window::Granularity;

/// Format of the canonical lookup key.
pub const KEY_FORMAT: &str = "%Y-%m-%d";

/// Windows at least this long get the year in their labels.
pub const YEAR_LABEL_MIN_DAYS: u32 = 360;

const SHORT_FORMAT: &str = "%b %-d";
const SHORT_FORMAT_WITH_YEAR: &str = "%b %-d, %Y";
const SHAPE_REASON: &str = "expected DD.MM.YYYY";

/// Parse a `DD.MM.YYYY` date string.
///
/// The input must be exactly two day digits, two month digits and four year
/// digits separated by dots. Anything else, including dates that do not exist
/// on the calendar, is rejected with [`Error::InvalidDate`].
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use qs_trends::codec::parse;
///
/// assert_eq!(parse("05.03.2024").ok(), NaiveDate::from_ymd_opt(2024, 3, 5));
/// assert!(parse("31.13.2024").is_err());
/// assert!(parse("2024-03-05").is_err());
/// ```
pub fn parse(input: &str) -> Result<NaiveDate> {
    let mut parts = input.split('.');
    let (Some(day), Some(month), Some(year), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(Error::invalid_date(input, SHAPE_REASON));
    };

    let day = parse_component(input, day, 2)?;
    let month = parse_component(input, month, 2)?;
    let year = parse_component(input, year, 4)?;

    if !(1..=12).contains(&month) {
        return Err(Error::invalid_date(input, "month out of range"));
    }

    let year = i32::try_from(year).map_err(|_| Error::invalid_date(input, "year out of range"))?;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| Error::invalid_date(input, "day out of range for month"))
}

/// Parse one fixed-width, all-digit date component.
fn parse_component(input: &str, part: &str, width: usize) -> Result<u32> {
    if part.len() != width || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::invalid_date(input, SHAPE_REASON));
    }
    part.parse()
        .map_err(|_| Error::invalid_date(input, SHAPE_REASON))
}

/// Canonical `YYYY-MM-DD` key for a date. Used for lookups, never displayed.
#[must_use]
pub fn to_key(date: NaiveDate) -> String {
    date.format(KEY_FORMAT).to_string()
}

/// Monday of the ISO week containing `date`.
#[must_use]
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Chart label for a date.
///
/// Daily labels use the short month and day (`Jun 1`). Weekly labels use the
/// same form for the Monday of the date's week. Windows of
/// [`YEAR_LABEL_MIN_DAYS`] or more append the year (`Jun 1, 2024`).
#[must_use]
pub fn to_display(date: NaiveDate, granularity: Granularity, window_days: u32) -> String {
    let date = match granularity {
        Granularity::Daily => date,
        Granularity::Weekly => week_start(date),
    };
    let format = if window_days >= YEAR_LABEL_MIN_DAYS {
        SHORT_FORMAT_WITH_YEAR
    } else {
        SHORT_FORMAT
    };
    date.format(format).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_valid() {
        assert_eq!(parse("05.03.2024").unwrap(), date(2024, 3, 5));
        assert_eq!(parse("31.12.1999").unwrap(), date(1999, 12, 31));
    }

    #[test]
    fn test_parse_leap_day() {
        assert_eq!(parse("29.02.2024").unwrap(), date(2024, 2, 29));
        assert!(parse("29.02.2023").is_err());
    }

    #[test]
    fn test_parse_invalid_month() {
        let err = parse("31.13.2024").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidDate {
                reason: "month out of range",
                ..
            }
        ));
    }

    #[test]
    fn test_parse_invalid_day() {
        assert!(parse("31.04.2024").is_err());
        assert!(parse("00.04.2024").is_err());
    }

    #[test]
    fn test_parse_rejects_other_shapes() {
        for input in [
            "",
            "2024-03-05",
            "5.3.2024",
            "05/03/2024",
            "05.03.24",
            "05.03.2024.",
            "aa.03.2024",
            " 05.03.2024",
            "05.03.2024 ",
            "+5.03.2024",
        ] {
            assert!(parse(input).is_err(), "accepted {input:?}");
        }
    }

    #[test]
    fn test_to_key() {
        assert_eq!(to_key(date(2024, 6, 1)), "2024-06-01");
    }

    #[test]
    fn test_week_start() {
        // 2024-06-07 is a Friday
        assert_eq!(week_start(date(2024, 6, 7)), date(2024, 6, 3));
        assert_eq!(week_start(date(2024, 6, 3)), date(2024, 6, 3));
        // Sunday belongs to the week that started six days earlier
        assert_eq!(week_start(date(2024, 6, 9)), date(2024, 6, 3));
    }

    #[test]
    fn test_to_display_daily() {
        assert_eq!(to_display(date(2024, 6, 1), Granularity::Daily, 7), "Jun 1");
        assert_eq!(
            to_display(date(2024, 6, 15), Granularity::Daily, 30),
            "Jun 15"
        );
    }

    #[test]
    fn test_to_display_weekly_uses_monday() {
        assert_eq!(
            to_display(date(2024, 6, 7), Granularity::Weekly, 90),
            "Jun 3"
        );
    }

    #[test]
    fn test_to_display_long_window_includes_year() {
        assert_eq!(
            to_display(date(2024, 6, 7), Granularity::Weekly, 365),
            "Jun 3, 2024"
        );
        assert_eq!(
            to_display(date(2024, 6, 7), Granularity::Daily, 360),
            "Jun 7, 2024"
        );
    }
}
