//! Calendar helpers for report ranges and buckets

use chrono::{Datelike, Duration, NaiveDate};

use crate::error::{CoreError, CoreResult};

/// Format of every date crossing the API and storage boundary
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date.
///
/// The year must be exactly four digits; chrono alone would also accept
/// signed and longer years.
pub fn parse_iso_date(value: &str) -> CoreResult<NaiveDate> {
    let invalid = || CoreError::InvalidDate {
        value: value.to_string(),
    };
    let bytes = value.as_bytes();
    if bytes.len() != 10 || !bytes[..4].iter().all(u8::is_ascii_digit) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(value, ISO_DATE_FORMAT).map_err(|_| invalid())
}

/// Monday of the week containing `date`; `None` if that falls before
/// the earliest representable date
pub fn week_start(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_signed(Duration::days(i64::from(date.weekday().num_days_from_monday())))
}

/// First day of the month containing `date`
pub fn month_start(date: NaiveDate) -> Option<NaiveDate> {
    date.with_day(1)
}
