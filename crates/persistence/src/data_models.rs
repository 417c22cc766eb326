// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types mapped to the schedule tables.
//!
//! Rows hold raw column values. Conversion to domain types happens in
//! `queries/`, where invalid stored values surface as `InvalidRow`.

use diesel::prelude::*;

use crate::diesel_schema::{
    bracket_matches, championship_classes, courts, queue_states,
};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = courts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CourtRow {
    pub court_id: i64,
    pub competition_id: i64,
    pub day_date: String,
    pub name: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = championship_classes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ClassRow {
    pub class_id: i64,
    pub name: String,
    pub branch: String,
    pub level_category: String,
    pub age_group: Option<String>,
    pub subclass: Option<String>,
    pub approved_participants: i64,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = bracket_matches)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BracketMatchRow {
    pub match_id: i64,
    pub round: i64,
    pub position: i64,
    pub participant_a: Option<i64>,
    pub participant_b: Option<i64>,
    pub winner: Option<i64>,
    pub score_a: Option<i64>,
    pub score_b: Option<i64>,
    pub status: String,
    pub match_number: Option<i64>,
    pub day: Option<i64>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bracket_matches)]
pub struct NewBracketMatch {
    pub bracket_id: i64,
    pub round: i64,
    pub position: i64,
    pub participant_a: Option<i64>,
    pub participant_b: Option<i64>,
    pub winner: Option<i64>,
    pub score_a: Option<i64>,
    pub score_b: Option<i64>,
    pub status: String,
    pub match_number: Option<i64>,
    pub day: Option<i64>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = championship_classes)]
pub struct NewClass<'a> {
    pub competition_id: i64,
    pub name: &'a str,
    pub branch: &'a str,
    pub level_category: &'a str,
    pub age_group: Option<&'a str>,
    pub subclass: Option<&'a str>,
    pub approved_participants: i64,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = queue_states)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct QueueStateRow {
    pub bertanding: i64,
    pub persiapan: i64,
    pub pemanasan: i64,
}
