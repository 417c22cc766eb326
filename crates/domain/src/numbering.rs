// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Match number planning.
//!
//! This module contains the single traversal used by both the numbering
//! preview and the persisted generation. Because both callers share
//! [`plan_numbering`], a preview shown to an operator is exactly what
//! generation will write.
//!
//! ## Traversal
//!
//! - Classes are walked in the order given (see `order_classes`)
//! - Each class's bracket is walked fully, round then position, before the
//!   next class starts; this holds for prestasi classes as well
//! - Byes are counted and skipped
//! - Every other match takes the cursor value, then the cursor advances
//!
//! A class without a bracket contributes an empty range and is flagged as
//! missing. A class with a drawn but empty bracket contributes an empty range.

use crate::error::DomainError;
use crate::types::{ChampionshipClass, Level};
use crate::validation::validate_starting_number;

/// One match number to be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchAssignment {
    /// The match receiving the number.
    pub match_id: i64,
    /// The class the match belongs to.
    pub class_id: i64,
    /// The assigned match number.
    pub match_number: u32,
}

/// The numbered range of one class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchNumberRange {
    /// The class identifier.
    pub class_id: i64,
    /// The class display name.
    pub class_name: String,
    /// The class level.
    pub level: Level,
    /// First assigned number, `None` when the class has no numbered match.
    pub start: Option<u32>,
    /// Last assigned number, `None` when the class has no numbered match.
    pub end: Option<u32>,
    /// Approved participants in the class.
    pub participant_count: u32,
    /// Number of matches that received a number.
    pub match_count: u32,
    /// Number of bye matches skipped.
    pub bye_count: u32,
    /// Whether the class has never had a bracket drawn.
    pub bracket_missing: bool,
}

impl MatchNumberRange {
    /// Returns whether any match of this class was numbered.
    #[must_use]
    pub const fn has_matches(&self) -> bool {
        self.start.is_some()
    }

    /// Formats the range as `start-end`, or `no matches` when empty.
    #[must_use]
    pub fn label(&self) -> String {
        format_range(self.start, self.end)
    }
}

/// The complete numbering outcome for one court.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberingPlan {
    /// The first number handed out.
    pub starting_number: u32,
    /// Per-class ranges in traversal order.
    pub ranges: Vec<MatchNumberRange>,
    /// Every match number to write, in traversal order.
    pub assignments: Vec<MatchAssignment>,
    /// Total numbered matches.
    pub total_matches: u32,
    /// Total bye matches skipped.
    pub total_bye_skipped: u32,
}

impl NumberingPlan {
    /// Returns the first and last assigned numbers across all classes.
    #[must_use]
    pub fn overall_range(&self) -> Option<(u32, u32)> {
        let first = self.assignments.first()?;
        let last = self.assignments.last()?;
        Some((first.match_number, last.match_number))
    }

    /// Formats the overall range as `start-end`, or `no matches` when empty.
    #[must_use]
    pub fn range_label(&self) -> String {
        let range = self.overall_range();
        format_range(range.map(|(s, _)| s), range.map(|(_, e)| e))
    }

    /// Returns the classes that have no bracket drawn.
    #[must_use]
    pub fn missing_brackets(&self) -> Vec<i64> {
        self.ranges
            .iter()
            .filter(|r| r.bracket_missing)
            .map(|r| r.class_id)
            .collect()
    }

    /// Returns the ranges of one level, preserving traversal order.
    pub fn ranges_for(&self, level: Level) -> impl Iterator<Item = &MatchNumberRange> {
        self.ranges.iter().filter(move |r| r.level == level)
    }

    /// Ensures every class in the plan has a drawn bracket.
    ///
    /// Generation requires this; preview reports missing brackets per class
    /// instead.
    ///
    /// # Errors
    ///
    /// Returns `BracketNotFound` for the first class without a bracket.
    pub fn require_brackets(&self) -> Result<(), DomainError> {
        match self.ranges.iter().find(|r| r.bracket_missing) {
            Some(range) => Err(DomainError::BracketNotFound {
                class_id: range.class_id,
                class_name: range.class_name.clone(),
            }),
            None => Ok(()),
        }
    }
}

fn format_range(start: Option<u32>, end: Option<u32>) -> String {
    match (start, end) {
        (Some(start), Some(end)) => format!("{start}-{end}"),
        _ => String::from("no matches"),
    }
}

/// Plans match numbers for classes already in numbering order.
///
/// # Arguments
///
/// * `classes_in_order` - Classes as returned by `order_classes`
/// * `starting_number` - The first match number (must be at least 1)
///
/// # Errors
///
/// Returns an error if:
/// - `starting_number` is below 1 or does not fit a match number
/// - numbering would exceed the largest representable match number
pub fn plan_numbering(
    classes_in_order: &[ChampionshipClass],
    starting_number: i64,
) -> Result<NumberingPlan, DomainError> {
    let starting_number: u32 = validate_starting_number(starting_number)?;

    let mut cursor: u64 = u64::from(starting_number);
    let mut ranges: Vec<MatchNumberRange> = Vec::with_capacity(classes_in_order.len());
    let mut assignments: Vec<MatchAssignment> = Vec::new();
    let mut total_matches: u32 = 0;
    let mut total_bye_skipped: u32 = 0;

    for class in classes_in_order {
        let mut range = MatchNumberRange {
            class_id: class.class_id,
            class_name: class.name.clone(),
            level: class.level,
            start: None,
            end: None,
            participant_count: class.approved_participants,
            match_count: 0,
            bye_count: 0,
            bracket_missing: class.bracket.is_none(),
        };

        if let Some(bracket) = &class.bracket {
            for bracket_match in bracket.ordered_matches() {
                if bracket_match.is_bye() {
                    range.bye_count += 1;
                    continue;
                }

                let match_number: u32 =
                    u32::try_from(cursor).map_err(|_| DomainError::MatchNumberOverflow {
                        class_id: class.class_id,
                    })?;

                assignments.push(MatchAssignment {
                    match_id: bracket_match.match_id,
                    class_id: class.class_id,
                    match_number,
                });
                range.start.get_or_insert(match_number);
                range.end = Some(match_number);
                range.match_count += 1;
                cursor += 1;
            }
        }

        total_matches += range.match_count;
        total_bye_skipped += range.bye_count;
        ranges.push(range);
    }

    Ok(NumberingPlan {
        starting_number,
        ranges,
        assignments,
        total_matches,
        total_bye_skipped,
    })
}
