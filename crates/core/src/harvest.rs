//! Monthly harvest report parameters.
//!
//! The report endpoint takes a `MM-YYYY` token. This module parses that
//! token and turns it into the inclusive instant range covering the whole
//! calendar month in a given time zone (the server's local zone in
//! production).

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Error message returned for any malformed month-year token.
pub const INVALID_MONTH_YEAR: &str = "Invalid month-year format. Use MM-YYYY.";

/// A calendar month of a specific year, e.g. February 2024.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthYear {
    month: u32,
    year: i32,
}

impl MonthYear {
    /// Build a month-year, validating that `month` is 1-12 and the year is
    /// representable as a calendar date.
    pub fn new(month: u32, year: i32) -> Result<Self, CoreError> {
        if !(1..=12).contains(&month) || NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(CoreError::Validation(INVALID_MONTH_YEAR.to_string()));
        }
        Ok(Self { month, year })
    }

    /// Parse a `MM-YYYY` token (`2-2024` and `02-2024` are both accepted).
    ///
    /// # Examples
    ///
    /// ```
    /// use allotment_core::harvest::MonthYear;
    ///
    /// let feb = MonthYear::parse("02-2024").unwrap();
    /// assert_eq!(feb.month(), 2);
    /// assert_eq!(feb.year(), 2024);
    /// assert!(MonthYear::parse("13-2024").is_err());
    /// ```
    pub fn parse(token: &str) -> Result<Self, CoreError> {
        let invalid = || CoreError::Validation(INVALID_MONTH_YEAR.to_string());

        let (month_str, year_str) = token.split_once('-').ok_or_else(invalid)?;
        let (month_str, year_str) = (month_str.trim(), year_str.trim());
        if !is_digits(month_str) || !is_digits(year_str) {
            return Err(invalid());
        }
        let month: u32 = month_str.parse().map_err(|_| invalid())?;
        let year: i32 = year_str.parse().map_err(|_| invalid())?;

        Self::new(month, year)
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// First day of the month.
    fn first_day(&self) -> NaiveDate {
        // Validated in `new`.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// Last day of the month (28, 29, 30 or 31).
    fn last_day(&self) -> NaiveDate {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|d| d.pred_opt())
            .unwrap_or_else(|| self.first_day())
    }

    /// Inclusive `[start, end]` bounds of the month in time zone `tz`.
    ///
    /// `start` is the first day at `00:00:00.000` and `end` the last day at
    /// `23:59:59.999`, both converted to UTC.
    pub fn bounds_in<Tz: TimeZone>(&self, tz: &Tz) -> (Timestamp, Timestamp) {
        let start = self.first_day().and_time(NaiveTime::MIN);
        let end = self.last_day().and_time(end_of_day());
        (
            resolve_local(tz, start, true),
            resolve_local(tz, end, false),
        )
    }

    /// Inclusive bounds of the month in the server's local time zone.
    pub fn local_bounds(&self) -> (Timestamp, Timestamp) {
        self.bounds_in(&Local)
    }
}

/// Unsigned decimal: no sign, no empty string.
fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN)
}

/// Map a wall-clock time in `tz` to UTC.
///
/// Ambiguous times (DST fall-back) take the earliest instant for range
/// starts and the latest for range ends. Non-existent times (DST gap) are
/// read as UTC.
fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime, is_start: bool) -> Timestamp {
    let mapped = tz.from_local_datetime(&naive);
    let resolved = if is_start {
        mapped.earliest()
    } else {
        mapped.latest()
    };
    match resolved {
        Some(dt) => dt.with_timezone(&Utc),
        None => naive.and_utc(),
    }
}
