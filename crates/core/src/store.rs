// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::state::Intent;
use std::fmt::Display;
use tanding_domain::{MatchAssignment, QueueState};

/// The write surface the core needs from a schedule store.
///
/// Each method is one persistence step. Implementations decide whether a
/// step is transactional; the core only relies on each call either
/// succeeding or returning an error.
pub trait ScheduleStore {
    /// The store's error type.
    type Error: Display;

    /// Clears `match_number` and `day` on every match of the given classes.
    ///
    /// Returns the number of matches touched.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn clear_numbers(&mut self, class_ids: &[i64]) -> Result<usize, Self::Error>;

    /// Writes match numbers and tags each numbered match with `day`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn assign_numbers(
        &mut self,
        day: u32,
        assignments: &[MatchAssignment],
    ) -> Result<usize, Self::Error>;

    /// Stores the queue state for a court.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn save_queue_state(&mut self, court_id: i64, state: QueueState) -> Result<(), Self::Error>;
}

/// Executes a single intent against a store.
///
/// Returns the number of rows the step affected.
///
/// # Errors
///
/// Returns the store's error unchanged.
pub fn execute<S: ScheduleStore>(store: &mut S, intent: &Intent) -> Result<usize, S::Error> {
    match intent {
        Intent::ClearNumbers { class_ids, .. } => store.clear_numbers(class_ids),
        Intent::AssignNumbers {
            day, assignments, ..
        } => store.assign_numbers(*day, assignments),
        Intent::SetQueueState { court_id, state } => {
            store.save_queue_state(*court_id, *state)?;
            Ok(1)
        }
    }
}
