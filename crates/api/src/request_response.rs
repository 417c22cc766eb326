// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use std::collections::BTreeMap;

/// Numbered range of one class, as shown in the preview.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RangeInfo {
    /// The class identifier.
    pub class_id: i64,
    /// The class display name.
    pub class_name: String,
    /// `PEMULA` or `PRESTASI`.
    pub level: String,
    /// `"first-last"`, or `"no matches"` for a class with nothing numbered.
    pub range: String,
    /// First number, if any match was numbered.
    pub start: Option<u32>,
    /// Last number, if any match was numbered.
    pub end: Option<u32>,
    /// Approved participants.
    pub participant_count: u32,
    /// Matches that received a number.
    pub match_count: u32,
    /// Byes skipped.
    pub bye_count: u32,
    /// True when no bracket has been drawn for the class.
    pub bracket_missing: bool,
}

/// Preview ranges grouped by level.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PreviewSummary {
    /// Beginner classes, numbered first.
    pub pemula: Vec<RangeInfo>,
    /// Achievement classes.
    pub prestasi: Vec<RangeInfo>,
}

/// API response for a numbering preview.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NumberingPreviewResponse {
    /// The court.
    pub court_id: i64,
    /// The starting number the preview was computed from.
    pub starting_number: u32,
    /// Matches that would be numbered.
    pub total_matches: u32,
    /// Byes that would be skipped.
    pub total_bye_skipped: u32,
    /// Overall range, `"first-last"` or `"no matches"`.
    pub range: String,
    /// Per-class ranges.
    pub summary: PreviewSummary,
    /// Classes with no bracket drawn. Generation is refused while non-empty.
    pub missing_brackets: Vec<i64>,
}

/// API request to generate match numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GenerateNumbersRequest {
    /// First match number. Defaults to 1.
    #[serde(default)]
    pub starting_number: Option<i64>,
    /// Day (session) tag. Defaults to the court's day index.
    #[serde(default)]
    pub day: Option<i64>,
}

/// API response for match number generation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GenerateNumbersResponse {
    /// True when the match numbers were written.
    pub success: bool,
    /// Overall range, `"first-last"` or `"no matches"`.
    pub range: String,
    /// A human-readable summary.
    pub message: String,
    /// Matches numbered.
    pub total_matches: u32,
    /// Byes skipped.
    pub total_bye_skipped: u32,
    /// The day the matches were tagged with.
    pub day: u32,
    /// Non-fatal problems, such as a failed queue update.
    pub warnings: Vec<String>,
}

/// API request carrying the confirmation required by destructive resets.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ResetRequest {
    /// Must be true.
    #[serde(default)]
    pub confirm: bool,
}

/// API response for a reset.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ResetResponse {
    /// True when every attempted step succeeded.
    pub success: bool,
    /// A human-readable summary naming each step's outcome.
    pub message: String,
    /// Matches whose numbers were cleared.
    pub cleared: usize,
}

/// API request to save all three queue slots.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QueueStateRequest {
    /// Currently fighting.
    pub bertanding: u32,
    /// Preparing.
    pub persiapan: u32,
    /// Warming up.
    pub pemanasan: u32,
}

/// API request to set the currently fighting match.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SetBertandingRequest {
    /// Currently fighting. The other slots follow it.
    pub bertanding: u32,
}

/// API response carrying a court's queue state.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QueueStateResponse {
    /// Always true on success.
    pub success: bool,
    /// The court.
    pub court_id: i64,
    /// Currently fighting.
    pub bertanding: u32,
    /// Preparing.
    pub persiapan: u32,
    /// Warming up.
    pub pemanasan: u32,
}

/// API request to list the courts of a competition.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListCourtsRequest {
    /// The competition.
    pub competition_id: i64,
    /// Restrict to one day (`YYYY-MM-DD`).
    #[serde(default)]
    pub date: Option<String>,
}

/// Court information for listing.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CourtInfo {
    /// The court.
    pub court_id: i64,
    /// The competition.
    pub competition_id: i64,
    /// The court's day (`YYYY-MM-DD`).
    pub date: String,
    /// The court's display name.
    pub name: String,
    /// Assigned classes in order.
    pub class_ids: Vec<i64>,
    /// Currently fighting, 0 when never saved.
    pub bertanding: u32,
    /// Preparing, 0 when never saved.
    pub persiapan: u32,
    /// Warming up, 0 when never saved.
    pub pemanasan: u32,
}

/// API response for listing courts.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListCourtsResponse {
    /// The competition.
    pub competition_id: i64,
    /// Courts, ordered by date then identifier.
    pub courts: Vec<CourtInfo>,
}

/// Participant and bracket summary of one class.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ClassBracketInfo {
    /// The class.
    pub class_id: i64,
    /// The class display name.
    pub name: String,
    /// `KYORUGI` or `POOMSAE`.
    pub branch: String,
    /// `PEMULA` or `PRESTASI`.
    pub level: String,
    /// Age group label.
    pub age_group: Option<String>,
    /// Subclass label.
    pub subclass: Option<String>,
    /// Approved participants.
    pub approved_participants: u32,
    /// True once a bracket has been drawn.
    pub bracket_drawn: bool,
    /// `single` or `double`, when drawn.
    pub bracket_kind: Option<String>,
    /// All bracket matches, byes included.
    pub match_count: usize,
    /// Byes in the bracket.
    pub bye_count: usize,
    /// Rounds in the bracket.
    pub round_count: u32,
    /// Matches that currently hold a number.
    pub numbered_matches: usize,
}

/// API response merging the bracket summaries of a court's classes.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CourtBracketInfoResponse {
    /// The court.
    pub court_id: i64,
    /// Summaries keyed by class identifier. Classes that failed to load are absent.
    pub classes: BTreeMap<i64, ClassBracketInfo>,
}

/// API request to replace a court's class list.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AssignClassesRequest {
    /// Classes in the order they should be assigned.
    pub class_ids: Vec<i64>,
}

/// API response for a class assignment.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AssignClassesResponse {
    /// The court.
    pub court_id: i64,
    /// The stored class list.
    pub class_ids: Vec<i64>,
    /// A success message.
    pub message: String,
}
