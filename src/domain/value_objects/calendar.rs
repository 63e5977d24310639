//! # Calendar Helpers
//!
//! Date enumeration and weekend detection for fare searches.

use crate::domain::errors::{DomainError, DomainResult};
use chrono::{Datelike, NaiveDate, Weekday};

/// Longest inclusive span [`date_span`] will enumerate.
pub const MAX_SPAN_DAYS: i64 = 366;

/// Returns true for Saturday and Sunday.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use fare_radar::domain::value_objects::calendar::is_weekend;
///
/// let saturday = NaiveDate::from_ymd_opt(2024, 12, 7).unwrap();
/// assert!(is_weekend(saturday));
/// ```
#[inline]
#[must_use]
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Returns every date of the given month in order.
///
/// # Errors
///
/// Returns `DomainError::InvalidDate` if `month` is not in `1..=12` or the
/// year is out of range.
pub fn month_dates(year: i32, month: u32) -> DomainResult<Vec<NaiveDate>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| DomainError::invalid_date(format!("no such month {year}-{month:02}")))?;
    Ok(first
        .iter_days()
        .take_while(|d| d.month() == month)
        .collect())
}

/// Returns every date from `start` to `end` inclusive.
///
/// # Errors
///
/// Returns `DomainError::InvalidDate` if `end` is before `start` or the span
/// exceeds [`MAX_SPAN_DAYS`].
pub fn date_span(start: NaiveDate, end: NaiveDate) -> DomainResult<Vec<NaiveDate>> {
    if end < start {
        return Err(DomainError::invalid_date(format!(
            "end {end} is before start {start}"
        )));
    }
    let days = (end - start).num_days() + 1;
    if days > MAX_SPAN_DAYS {
        return Err(DomainError::invalid_date(format!(
            "span of {days} days exceeds {MAX_SPAN_DAYS}"
        )));
    }
    Ok(start.iter_days().take_while(|d| *d <= end).collect())
}
