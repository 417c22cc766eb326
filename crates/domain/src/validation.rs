// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::Court;
use std::collections::HashSet;

/// Validates a starting match number.
///
/// # Arguments
///
/// * `starting_number` - The requested first match number
///
/// # Returns
///
/// The starting number as a match number.
///
/// # Errors
///
/// Returns an error if the number is below 1 or too large for a match number.
pub fn validate_starting_number(starting_number: i64) -> Result<u32, DomainError> {
    if starting_number < 1 {
        return Err(DomainError::InvalidStartingNumber { starting_number });
    }
    u32::try_from(starting_number)
        .map_err(|_| DomainError::InvalidStartingNumber { starting_number })
}

/// Validates a day (session) identifier.
///
/// Days are 1-based positions in the competition's day list.
///
/// # Errors
///
/// Returns an error if the day is below 1 or too large.
pub fn validate_day(day: i64) -> Result<u32, DomainError> {
    if day < 1 {
        return Err(DomainError::InvalidDay { day });
    }
    u32::try_from(day).map_err(|_| DomainError::InvalidDay { day })
}

/// Validates assigning classes to a court.
///
/// A class may be assigned to at most one court per competition day. This is
/// a scheduling rule; storage does not enforce it.
///
/// # Arguments
///
/// * `courts` - All courts of the competition (any day)
/// * `court` - The court receiving the assignment
/// * `class_ids` - The new ordered class list for `court`
///
/// # Errors
///
/// Returns an error if:
/// - A class appears twice in `class_ids`
/// - A class is already assigned to another court on the same day
pub fn validate_court_assignment(
    courts: &[Court],
    court: &Court,
    class_ids: &[i64],
) -> Result<(), DomainError> {
    let mut seen: HashSet<i64> = HashSet::new();
    for class_id in class_ids {
        if !seen.insert(*class_id) {
            return Err(DomainError::DuplicateClassAssignment {
                class_id: *class_id,
            });
        }
    }

    let same_day = courts.iter().filter(|other| {
        other.court_id != court.court_id
            && other.competition_id == court.competition_id
            && other.date == court.date
    });

    for other in same_day {
        if let Some(class_id) = class_ids.iter().find(|id| other.has_class(**id)) {
            return Err(DomainError::ClassAlreadyAssigned {
                class_id: *class_id,
                court_id: other.court_id,
                date: other.date,
            });
        }
    }

    Ok(())
}
