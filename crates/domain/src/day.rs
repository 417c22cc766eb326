// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Competition day helpers.
//!
//! The day (session) number tagged onto generated matches is never stored on
//! the competition itself. It is the 1-based position of a court's date in the
//! competition's list of days.

use crate::error::DomainError;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// Storage and wire format for competition dates.
pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Returns the 1-based day index of `date` within `days`.
///
/// `days` may be unsorted and may contain duplicates.
///
/// # Errors
///
/// Returns an error if `date` is not one of `days`.
pub fn day_index(days: &[Date], date: Date) -> Result<u32, DomainError> {
    let mut sorted: Vec<Date> = days.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    sorted
        .iter()
        .position(|d| *d == date)
        .and_then(|index| u32::try_from(index + 1).ok())
        .ok_or(DomainError::DayNotInCompetition { date })
}

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns an error if the string is not a valid date.
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value, DATE_FORMAT).map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}

/// Formats a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}
