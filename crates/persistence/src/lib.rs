// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for court scheduling.
//!
//! This crate stores competitions, courts, championship classes, drawn
//! brackets, match numbers and per-court queue state in `SQLite` via Diesel.
//!
//! ## Storage Model
//!
//! - Courts belong to one competition day. The day index used to tag
//!   numbered matches is derived from the competition's day list and is
//!   never stored on the court.
//! - Class assignment to courts is ordered (`court_classes.position`).
//! - A class has at most one bracket; redrawing replaces it.
//! - Match numbers and day tags live on `bracket_matches`.
//!
//! ## Testing
//!
//! Tests use `Persistence::new_in_memory()`, which gives each call an
//! isolated shared-cache in-memory database.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tanding::{CourtSchedule, ScheduleStore};
use tanding_domain::{
    Bracket, ChampionshipClass, Court, MatchAssignment, QueueState, day_index,
};
use time::Date;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

use backend::PersistenceBackend;

/// Persistence adapter for the court schedule.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:tanding_memdb_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    // ========================================================================
    // Seeding
    // ========================================================================

    /// Creates a competition and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_competition(&mut self, name: &str) -> Result<i64, PersistenceError> {
        mutations::seed::create_competition(&mut self.conn, name)
    }

    /// Adds a day to a competition.
    ///
    /// # Errors
    ///
    /// Returns an error if the competition does not exist or already has
    /// this day.
    pub fn add_competition_day(
        &mut self,
        competition_id: i64,
        date: Date,
    ) -> Result<i64, PersistenceError> {
        mutations::seed::add_competition_day(&mut self.conn, competition_id, date)
    }

    /// Creates a court on a competition day.
    ///
    /// # Errors
    ///
    /// Returns an error if the competition does not exist or `date` is not
    /// one of its days.
    pub fn create_court(
        &mut self,
        competition_id: i64,
        date: Date,
        name: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::seed::create_court(&mut self.conn, competition_id, date, name)
    }

    /// Registers a class, drawing its bracket if it carries one.
    ///
    /// # Errors
    ///
    /// Returns an error if the competition does not exist or an insert fails.
    pub fn create_class(
        &mut self,
        competition_id: i64,
        class: &ChampionshipClass,
    ) -> Result<i64, PersistenceError> {
        mutations::seed::create_class(&mut self.conn, competition_id, class)
    }

    /// Draws or redraws the bracket of a class.
    ///
    /// # Errors
    ///
    /// Returns an error if the class does not exist or an insert fails.
    pub fn create_bracket(
        &mut self,
        class_id: i64,
        bracket: &Bracket,
    ) -> Result<i64, PersistenceError> {
        mutations::seed::create_bracket(&mut self.conn, class_id, bracket)
    }

    // ========================================================================
    // Courts & Classes
    // ========================================================================

    /// Replaces the ordered class list of a court.
    ///
    /// # Errors
    ///
    /// Returns an error if the court or a class is missing, or the
    /// assignment breaks the one-court-per-day rule.
    pub fn assign_classes(
        &mut self,
        court_id: i64,
        class_ids: &[i64],
    ) -> Result<(), PersistenceError> {
        mutations::assignment::assign_classes(&mut self.conn, court_id, class_ids)
    }

    /// Loads one court.
    ///
    /// # Errors
    ///
    /// Returns `CourtNotFound` if the court does not exist.
    pub fn get_court(&mut self, court_id: i64) -> Result<Court, PersistenceError> {
        queries::courts::get_court(&mut self.conn, court_id)
    }

    /// Lists the courts of a competition, optionally for one day.
    ///
    /// # Errors
    ///
    /// Returns `CompetitionNotFound` if the competition does not exist.
    pub fn list_courts(
        &mut self,
        competition_id: i64,
        date: Option<Date>,
    ) -> Result<Vec<Court>, PersistenceError> {
        if !queries::courts::competition_exists(&mut self.conn, competition_id)? {
            return Err(PersistenceError::CompetitionNotFound(competition_id));
        }
        queries::courts::list_courts(&mut self.conn, competition_id, date)
    }

    /// Lists the days of a competition in calendar order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_competition_days(
        &mut self,
        competition_id: i64,
    ) -> Result<Vec<Date>, PersistenceError> {
        queries::courts::list_competition_days(&mut self.conn, competition_id)
    }

    /// Loads one class with its bracket.
    ///
    /// # Errors
    ///
    /// Returns `ClassNotFound` if the class does not exist.
    pub fn get_class(&mut self, class_id: i64) -> Result<ChampionshipClass, PersistenceError> {
        queries::classes::get_class(&mut self.conn, class_id)
    }

    /// Loads everything numbering needs for one court.
    ///
    /// Classes keep their assignment order and the day is the court's
    /// 1-based position among the competition's days.
    ///
    /// # Errors
    ///
    /// Returns an error if the court is missing or its date is not a
    /// competition day.
    pub fn load_court_schedule(&mut self, court_id: i64) -> Result<CourtSchedule, PersistenceError> {
        let court: Court = queries::courts::get_court(&mut self.conn, court_id)?;
        let days: Vec<Date> =
            queries::courts::list_competition_days(&mut self.conn, court.competition_id)?;
        let day: u32 = day_index(&days, court.date)?;
        let classes: Vec<ChampionshipClass> =
            queries::classes::load_classes(&mut self.conn, &court.class_ids)?;

        Ok(CourtSchedule::new(court, classes, day))
    }

    // ========================================================================
    // Queue State
    // ========================================================================

    /// Returns the stored queue state of a court.
    ///
    /// A court whose queue was never saved reports `(0, 0, 0)`.
    ///
    /// # Errors
    ///
    /// Returns `CourtNotFound` if the court does not exist.
    pub fn get_queue_state(&mut self, court_id: i64) -> Result<QueueState, PersistenceError> {
        let court: Court = queries::courts::get_court(&mut self.conn, court_id)?;
        Ok(court.queue_state.unwrap_or_else(QueueState::zeroed))
    }
}

impl ScheduleStore for Persistence {
    type Error = PersistenceError;

    fn clear_numbers(&mut self, class_ids: &[i64]) -> Result<usize, Self::Error> {
        mutations::numbering::clear_numbers(&mut self.conn, class_ids)
    }

    fn assign_numbers(
        &mut self,
        day: u32,
        assignments: &[MatchAssignment],
    ) -> Result<usize, Self::Error> {
        mutations::numbering::assign_numbers(&mut self.conn, day, assignments)
    }

    fn save_queue_state(&mut self, court_id: i64, state: QueueState) -> Result<(), Self::Error> {
        mutations::numbering::save_queue_state(&mut self.conn, court_id, state)
    }
}
