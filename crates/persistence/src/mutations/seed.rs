// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Writes that stand in for the registration and bracket-drawing systems.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tanding_domain::{Bracket, ChampionshipClass, format_date};
use time::Date;
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::{NewBracketMatch, NewClass};
use crate::diesel_schema::{
    bracket_matches, brackets, championship_classes, competition_days, competitions, courts,
};
use crate::error::PersistenceError;
use crate::queries::courts::{competition_exists, list_competition_days};

/// Creates a competition.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_competition(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(competitions::table)
        .values(competitions::name.eq(name))
        .execute(conn)?;

    let competition_id: i64 = conn.get_last_insert_rowid()?;
    info!(competition_id, name, "Created competition");
    Ok(competition_id)
}

/// Adds a day to a competition.
///
/// # Errors
///
/// Returns `CompetitionNotFound` if the competition does not exist, or an
/// error if the day already exists.
pub fn add_competition_day(
    conn: &mut SqliteConnection,
    competition_id: i64,
    date: Date,
) -> Result<i64, PersistenceError> {
    if !competition_exists(conn, competition_id)? {
        return Err(PersistenceError::CompetitionNotFound(competition_id));
    }

    diesel::insert_into(competition_days::table)
        .values((
            competition_days::competition_id.eq(competition_id),
            competition_days::day_date.eq(format_date(date)),
        ))
        .execute(conn)?;

    conn.get_last_insert_rowid()
}

/// Creates a court on one of the competition's days.
///
/// # Errors
///
/// Returns an error if the competition does not exist or `date` is not
/// one of its days.
pub fn create_court(
    conn: &mut SqliteConnection,
    competition_id: i64,
    date: Date,
    name: &str,
) -> Result<i64, PersistenceError> {
    if !competition_exists(conn, competition_id)? {
        return Err(PersistenceError::CompetitionNotFound(competition_id));
    }
    let days: Vec<Date> = list_competition_days(conn, competition_id)?;
    if !days.contains(&date) {
        return Err(tanding_domain::DomainError::DayNotInCompetition { date }.into());
    }

    diesel::insert_into(courts::table)
        .values((
            courts::competition_id.eq(competition_id),
            courts::day_date.eq(format_date(date)),
            courts::name.eq(name),
        ))
        .execute(conn)?;

    let court_id: i64 = conn.get_last_insert_rowid()?;
    info!(court_id, competition_id, name, "Created court");
    Ok(court_id)
}

/// Registers a class in a competition.
///
/// The class identifier in `class` is ignored; the new identifier is
/// returned. If `class` carries a bracket it is drawn as well.
///
/// # Errors
///
/// Returns an error if the competition does not exist or an insert fails.
pub fn create_class(
    conn: &mut SqliteConnection,
    competition_id: i64,
    class: &ChampionshipClass,
) -> Result<i64, PersistenceError> {
    if !competition_exists(conn, competition_id)? {
        return Err(PersistenceError::CompetitionNotFound(competition_id));
    }

    conn.transaction::<_, PersistenceError, _>(|conn| {
        diesel::insert_into(championship_classes::table)
            .values(NewClass {
                competition_id,
                name: &class.name,
                branch: class.branch.as_str(),
                level_category: class.level.as_str(),
                age_group: class.age_group.as_deref(),
                subclass: class.subclass.as_deref(),
                approved_participants: i64::from(class.approved_participants),
            })
            .execute(conn)?;

        let class_id: i64 = conn.get_last_insert_rowid()?;

        if let Some(bracket) = &class.bracket {
            draw_bracket(conn, class_id, bracket)?;
        }

        debug!(class_id, name = %class.name, "Created class");
        Ok(class_id)
    })
}

/// Draws (or redraws) the bracket of a class.
///
/// Any previous bracket and its matches are replaced. Match identifiers in
/// `bracket` are ignored.
///
/// # Errors
///
/// Returns `ClassNotFound` if the class does not exist, or an error if an
/// insert fails.
pub fn create_bracket(
    conn: &mut SqliteConnection,
    class_id: i64,
    bracket: &Bracket,
) -> Result<i64, PersistenceError> {
    let exists: i64 = championship_classes::table
        .filter(championship_classes::class_id.eq(class_id))
        .count()
        .get_result(conn)?;
    if exists == 0 {
        return Err(PersistenceError::ClassNotFound(class_id));
    }

    conn.transaction::<_, PersistenceError, _>(|conn| draw_bracket(conn, class_id, bracket))
}

fn draw_bracket(
    conn: &mut SqliteConnection,
    class_id: i64,
    bracket: &Bracket,
) -> Result<i64, PersistenceError> {
    // Matches go with the bracket via ON DELETE CASCADE.
    diesel::delete(brackets::table.filter(brackets::class_id.eq(class_id))).execute(conn)?;

    diesel::insert_into(brackets::table)
        .values((
            brackets::class_id.eq(class_id),
            brackets::kind.eq(bracket.kind.as_str()),
        ))
        .execute(conn)?;
    let bracket_id: i64 = conn.get_last_insert_rowid()?;

    for m in &bracket.matches {
        diesel::insert_into(bracket_matches::table)
            .values(NewBracketMatch {
                bracket_id,
                round: i64::from(m.round),
                position: i64::from(m.position),
                participant_a: m.participant_a,
                participant_b: m.participant_b,
                winner: m.winner,
                score_a: m.score_a.map(i64::from),
                score_b: m.score_b.map(i64::from),
                status: m.status.as_str().to_string(),
                match_number: m.match_number.map(i64::from),
                day: m.day.map(i64::from),
            })
            .execute(conn)?;
    }

    info!(
        class_id,
        bracket_id,
        matches = bracket.matches.len(),
        byes = bracket.bye_count(),
        "Drew bracket"
    );
    Ok(bracket_id)
}
