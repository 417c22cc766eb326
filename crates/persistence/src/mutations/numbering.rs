// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Match number and queue state writes.
//!
//! Each function is one step of numbering and runs in its own transaction,
//! so a step either lands completely or not at all.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tanding_domain::{MatchAssignment, QueueState};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::debug;

use crate::diesel_schema::{bracket_matches, brackets, courts, queue_states};
use crate::error::PersistenceError;

/// Clears `match_number` and `day` on every match of the given classes.
///
/// Returns the number of matches touched, numbered or not.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn clear_numbers(
    conn: &mut SqliteConnection,
    class_ids: &[i64],
) -> Result<usize, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let bracket_ids = brackets::table
            .filter(brackets::class_id.eq_any(class_ids))
            .select(brackets::bracket_id);

        let cleared: usize =
            diesel::update(bracket_matches::table.filter(bracket_matches::bracket_id.eq_any(bracket_ids)))
                .set((
                    bracket_matches::match_number.eq(None::<i64>),
                    bracket_matches::day.eq(None::<i64>),
                ))
                .execute(conn)?;

        debug!(classes = class_ids.len(), cleared, "Cleared match numbers");
        Ok(cleared)
    })
}

/// Writes match numbers and tags each numbered match with `day`.
///
/// # Errors
///
/// Returns `NotFound` if an assignment names a missing match; nothing is
/// written in that case.
pub fn assign_numbers(
    conn: &mut SqliteConnection,
    day: u32,
    assignments: &[MatchAssignment],
) -> Result<usize, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let mut assigned: usize = 0;
        for assignment in assignments {
            let updated: usize = diesel::update(bracket_matches::table.find(assignment.match_id))
                .set((
                    bracket_matches::match_number.eq(Some(i64::from(assignment.match_number))),
                    bracket_matches::day.eq(Some(i64::from(day))),
                ))
                .execute(conn)?;
            if updated == 0 {
                return Err(PersistenceError::NotFound(format!(
                    "match {} of class {}",
                    assignment.match_id, assignment.class_id
                )));
            }
            assigned += updated;
        }

        debug!(day, assigned, "Assigned match numbers");
        Ok(assigned)
    })
}

/// Stores the queue state of a court, replacing any previous state.
///
/// # Errors
///
/// Returns `CourtNotFound` if the court does not exist.
pub fn save_queue_state(
    conn: &mut SqliteConnection,
    court_id: i64,
    state: QueueState,
) -> Result<(), PersistenceError> {
    let exists: i64 = courts::table
        .filter(courts::court_id.eq(court_id))
        .count()
        .get_result(conn)?;
    if exists == 0 {
        return Err(PersistenceError::CourtNotFound(court_id));
    }

    let now: String = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;

    diesel::insert_into(queue_states::table)
        .values((
            queue_states::court_id.eq(court_id),
            queue_states::bertanding.eq(i64::from(state.bertanding)),
            queue_states::persiapan.eq(i64::from(state.persiapan)),
            queue_states::pemanasan.eq(i64::from(state.pemanasan)),
            queue_states::updated_at.eq(&now),
        ))
        .on_conflict(queue_states::court_id)
        .do_update()
        .set((
            queue_states::bertanding.eq(i64::from(state.bertanding)),
            queue_states::persiapan.eq(i64::from(state.persiapan)),
            queue_states::pemanasan.eq(i64::from(state.pemanasan)),
            queue_states::updated_at.eq(&now),
        ))
        .execute(conn)?;

    debug!(
        court_id,
        bertanding = state.bertanding,
        persiapan = state.persiapan,
        pemanasan = state.pemanasan,
        "Saved queue state"
    );
    Ok(())
}
