// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Court, competition day and queue state queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tanding_domain::{Court, QueueState, format_date, parse_date};
use time::Date;

use super::column_u32;
use crate::data_models::{CourtRow, QueueStateRow};
use crate::diesel_schema::{competition_days, competitions, court_classes, courts, queue_states};
use crate::error::PersistenceError;

/// Returns whether a competition exists.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn competition_exists(
    conn: &mut SqliteConnection,
    competition_id: i64,
) -> Result<bool, PersistenceError> {
    let count: i64 = competitions::table
        .filter(competitions::competition_id.eq(competition_id))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}

/// Lists the days of a competition in calendar order.
///
/// # Errors
///
/// Returns an error if the query fails or a stored date is malformed.
pub fn list_competition_days(
    conn: &mut SqliteConnection,
    competition_id: i64,
) -> Result<Vec<Date>, PersistenceError> {
    let rows: Vec<String> = competition_days::table
        .filter(competition_days::competition_id.eq(competition_id))
        .order(competition_days::day_date.asc())
        .select(competition_days::day_date)
        .load(conn)?;

    rows.iter().map(|d| stored_date(d)).collect()
}

/// Loads one court with its class assignment and queue state.
///
/// # Errors
///
/// Returns `CourtNotFound` if the court does not exist.
pub fn get_court(conn: &mut SqliteConnection, court_id: i64) -> Result<Court, PersistenceError> {
    let row: CourtRow = courts::table
        .find(court_id)
        .select(CourtRow::as_select())
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::CourtNotFound(court_id))?;

    court_from_row(conn, row)
}

/// Lists the courts of a competition by date, optionally limited to one day.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_courts(
    conn: &mut SqliteConnection,
    competition_id: i64,
    date: Option<Date>,
) -> Result<Vec<Court>, PersistenceError> {
    let mut query = courts::table
        .filter(courts::competition_id.eq(competition_id))
        .select(CourtRow::as_select())
        .order((courts::day_date.asc(), courts::court_id.asc()))
        .into_boxed();

    if let Some(date) = date {
        query = query.filter(courts::day_date.eq(format_date(date)));
    }

    let rows: Vec<CourtRow> = query.load(conn)?;
    rows.into_iter()
        .map(|row| court_from_row(conn, row))
        .collect()
}

/// Returns the class identifiers assigned to a court, in assignment order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_court_class_ids(
    conn: &mut SqliteConnection,
    court_id: i64,
) -> Result<Vec<i64>, PersistenceError> {
    Ok(court_classes::table
        .filter(court_classes::court_id.eq(court_id))
        .order(court_classes::position.asc())
        .select(court_classes::class_id)
        .load(conn)?)
}

/// Returns the stored queue state of a court, if one was ever saved.
///
/// # Errors
///
/// Returns an error if the query fails or a stored value is out of range.
pub fn get_queue_state(
    conn: &mut SqliteConnection,
    court_id: i64,
) -> Result<Option<QueueState>, PersistenceError> {
    let row: Option<QueueStateRow> = queue_states::table
        .find(court_id)
        .select(QueueStateRow::as_select())
        .first(conn)
        .optional()?;

    row.map(|row| {
        Ok(QueueState::new(
            column_u32(row.bertanding, "bertanding")?,
            column_u32(row.persiapan, "persiapan")?,
            column_u32(row.pemanasan, "pemanasan")?,
        ))
    })
    .transpose()
}

fn court_from_row(conn: &mut SqliteConnection, row: CourtRow) -> Result<Court, PersistenceError> {
    let date: Date = stored_date(&row.day_date)?;
    let mut court: Court = Court::new(row.court_id, row.competition_id, date, &row.name);
    court.class_ids = list_court_class_ids(conn, row.court_id)?;
    court.queue_state = get_queue_state(conn, row.court_id)?;
    Ok(court)
}

fn stored_date(value: &str) -> Result<Date, PersistenceError> {
    parse_date(value).map_err(|e| PersistenceError::InvalidRow(e.to_string()))
}
