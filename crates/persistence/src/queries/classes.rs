// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Championship class and bracket queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use std::collections::HashMap;
use tanding_domain::{
    Bracket, BracketKind, BracketMatch, Branch, ChampionshipClass, Level, MatchStatus,
};

use super::{column_opt_u32, column_u32};
use crate::data_models::{BracketMatchRow, ClassRow};
use crate::diesel_schema::{bracket_matches, brackets, championship_classes};
use crate::error::PersistenceError;

/// Loads one class with its bracket.
///
/// # Errors
///
/// Returns `ClassNotFound` if the class does not exist.
pub fn get_class(
    conn: &mut SqliteConnection,
    class_id: i64,
) -> Result<ChampionshipClass, PersistenceError> {
    let row: ClassRow = championship_classes::table
        .find(class_id)
        .select(ClassRow::as_select())
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::ClassNotFound(class_id))?;

    class_from_row(conn, row)
}

/// Loads classes with their brackets, preserving the order of `class_ids`.
///
/// # Errors
///
/// Returns `ClassNotFound` for the first identifier with no class.
pub fn load_classes(
    conn: &mut SqliteConnection,
    class_ids: &[i64],
) -> Result<Vec<ChampionshipClass>, PersistenceError> {
    let rows: Vec<ClassRow> = championship_classes::table
        .filter(championship_classes::class_id.eq_any(class_ids))
        .select(ClassRow::as_select())
        .load(conn)?;

    let mut by_id: HashMap<i64, ClassRow> = rows.into_iter().map(|r| (r.class_id, r)).collect();

    class_ids
        .iter()
        .map(|class_id| {
            let row: ClassRow = by_id
                .remove(class_id)
                .ok_or(PersistenceError::ClassNotFound(*class_id))?;
            class_from_row(conn, row)
        })
        .collect()
}

/// Loads the bracket of a class, or `None` if it was never drawn.
///
/// Matches are returned in `(round, position)` order.
///
/// # Errors
///
/// Returns an error if the query fails or a stored value is invalid.
pub fn get_bracket(
    conn: &mut SqliteConnection,
    class_id: i64,
) -> Result<Option<Bracket>, PersistenceError> {
    let bracket: Option<(i64, String)> = brackets::table
        .filter(brackets::class_id.eq(class_id))
        .select((brackets::bracket_id, brackets::kind))
        .first(conn)
        .optional()?;

    let Some((bracket_id, kind)) = bracket else {
        return Ok(None);
    };

    let kind: BracketKind = kind
        .parse()
        .map_err(|e: tanding_domain::DomainError| PersistenceError::InvalidRow(e.to_string()))?;

    let rows: Vec<BracketMatchRow> = bracket_matches::table
        .filter(bracket_matches::bracket_id.eq(bracket_id))
        .order((
            bracket_matches::round.asc(),
            bracket_matches::position.asc(),
            bracket_matches::match_id.asc(),
        ))
        .select(BracketMatchRow::as_select())
        .load(conn)?;

    let matches: Vec<BracketMatch> = rows
        .into_iter()
        .map(match_from_row)
        .collect::<Result<_, _>>()?;

    Ok(Some(Bracket::new(kind, matches)))
}

fn class_from_row(
    conn: &mut SqliteConnection,
    row: ClassRow,
) -> Result<ChampionshipClass, PersistenceError> {
    let branch: Branch = row
        .branch
        .parse()
        .map_err(|e: tanding_domain::DomainError| PersistenceError::InvalidRow(e.to_string()))?;
    let level: Level = Level::from_category_name(&row.level_category);
    let participants: u32 = column_u32(row.approved_participants, "approved_participants")?;

    let mut class: ChampionshipClass =
        ChampionshipClass::new(row.class_id, &row.name, branch, level, participants);
    class.age_group = row.age_group;
    class.subclass = row.subclass;
    class.bracket = get_bracket(conn, row.class_id)?;
    Ok(class)
}

fn match_from_row(row: BracketMatchRow) -> Result<BracketMatch, PersistenceError> {
    let status: MatchStatus = row
        .status
        .parse()
        .map_err(|e: tanding_domain::DomainError| PersistenceError::InvalidRow(e.to_string()))?;

    let mut bracket_match: BracketMatch = BracketMatch::new(
        row.match_id,
        column_u32(row.round, "round")?,
        column_u32(row.position, "position")?,
        row.participant_a,
        row.participant_b,
    );
    bracket_match.winner = row.winner;
    bracket_match.score_a = column_opt_u32(row.score_a, "score_a")?;
    bracket_match.score_b = column_opt_u32(row.score_b, "score_b")?;
    bracket_match.status = status;
    bracket_match.match_number = column_opt_u32(row.match_number, "match_number")?;
    bracket_match.day = column_opt_u32(row.day, "day")?;
    Ok(bracket_match)
}
