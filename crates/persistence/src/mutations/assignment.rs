// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tanding_domain::{Court, validate_court_assignment};
use tracing::info;

use crate::diesel_schema::{championship_classes, court_classes};
use crate::error::PersistenceError;
use crate::queries::courts::{get_court, list_courts};

/// Replaces the ordered class list of a court.
///
/// # Errors
///
/// Returns an error if:
/// - The court or any class does not exist, or a class belongs to another
///   competition
/// - A class is listed twice or is already on another court that day
pub fn assign_classes(
    conn: &mut SqliteConnection,
    court_id: i64,
    class_ids: &[i64],
) -> Result<(), PersistenceError> {
    let court: Court = get_court(conn, court_id)?;

    let known: Vec<i64> = championship_classes::table
        .filter(championship_classes::class_id.eq_any(class_ids))
        .filter(championship_classes::competition_id.eq(court.competition_id))
        .select(championship_classes::class_id)
        .load(conn)?;
    if let Some(missing) = class_ids.iter().find(|id| !known.contains(*id)) {
        return Err(PersistenceError::ClassNotFound(*missing));
    }

    let same_day: Vec<Court> = list_courts(conn, court.competition_id, Some(court.date))?;
    validate_court_assignment(&same_day, &court, class_ids)?;

    conn.transaction::<_, PersistenceError, _>(|conn| {
        diesel::delete(court_classes::table.filter(court_classes::court_id.eq(court_id)))
            .execute(conn)?;

        for (position, class_id) in (1_i64..).zip(class_ids) {
            diesel::insert_into(court_classes::table)
                .values((
                    court_classes::court_id.eq(court_id),
                    court_classes::class_id.eq(*class_id),
                    court_classes::position.eq(position),
                ))
                .execute(conn)?;
        }
        Ok(())
    })?;

    info!(court_id, classes = class_ids.len(), "Assigned classes to court");
    Ok(())
}
