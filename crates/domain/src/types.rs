// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::queue::QueueState;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The competition branch a class belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Branch {
    /// Sparring.
    Kyorugi,
    /// Forms.
    Poomsae,
}

impl Branch {
    /// Converts this branch to its storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Kyorugi => "KYORUGI",
            Self::Poomsae => "POOMSAE",
        }
    }
}

impl FromStr for Branch {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "KYORUGI" => Ok(Self::Kyorugi),
            "POOMSAE" => Ok(Self::Poomsae),
            _ => Err(DomainError::InvalidBranch(s.to_string())),
        }
    }
}

impl std::fmt::Display for Branch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The competitive level of a class.
///
/// Pemula (beginner) classes are always scheduled before prestasi
/// (achievement) classes on a court.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    /// Beginner level.
    Pemula,
    /// Competitive level.
    Prestasi,
}

impl Level {
    /// Derives the level from a level-category name.
    ///
    /// Any category whose name contains "pemula" (case-insensitive) is a
    /// beginner class; everything else is prestasi.
    #[must_use]
    pub fn from_category_name(name: &str) -> Self {
        if name.to_lowercase().contains("pemula") {
            Self::Pemula
        } else {
            Self::Prestasi
        }
    }

    /// Returns the display name of this level.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pemula => "pemula",
            Self::Prestasi => "prestasi",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Elimination format of a drawn bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BracketKind {
    /// Single elimination.
    #[default]
    Single,
    /// Double elimination.
    Double,
}

impl BracketKind {
    /// Converts this kind to its storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Double => "double",
        }
    }
}

impl FromStr for BracketKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(Self::Single),
            "double" => Ok(Self::Double),
            _ => Err(DomainError::InvalidBracketKind(s.to_string())),
        }
    }
}

/// Live status of a bracket match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Not started.
    #[default]
    Pending,
    /// Currently being fought.
    Ongoing,
    /// Result recorded.
    Finished,
}

impl MatchStatus {
    /// Converts this status to its storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Ongoing => "ongoing",
            Self::Finished => "finished",
        }
    }
}

impl FromStr for MatchStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "ongoing" => Ok(Self::Ongoing),
            "finished" => Ok(Self::Finished),
            _ => Err(DomainError::InvalidMatchStatus(s.to_string())),
        }
    }
}

/// One node of a class's elimination tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketMatch {
    /// The canonical match identifier.
    pub match_id: i64,
    /// The 1-based round number.
    pub round: u32,
    /// The 1-based position within the round.
    pub position: u32,
    /// First participant slot. `None` is an empty slot.
    pub participant_a: Option<i64>,
    /// Second participant slot. `None` is an empty slot.
    pub participant_b: Option<i64>,
    /// The winning participant, once decided.
    pub winner: Option<i64>,
    /// Score of the first participant.
    pub score_a: Option<u32>,
    /// Score of the second participant.
    pub score_b: Option<u32>,
    /// Live status.
    pub status: MatchStatus,
    /// Assigned match number, if numbering has been generated.
    pub match_number: Option<u32>,
    /// Day (session) the number was generated for.
    pub day: Option<u32>,
}

impl BracketMatch {
    /// Creates an unnumbered, pending match.
    #[must_use]
    pub const fn new(
        match_id: i64,
        round: u32,
        position: u32,
        participant_a: Option<i64>,
        participant_b: Option<i64>,
    ) -> Self {
        Self {
            match_id,
            round,
            position,
            participant_a,
            participant_b,
            winner: None,
            score_a: None,
            score_b: None,
            status: MatchStatus::Pending,
            match_number: None,
            day: None,
        }
    }

    /// Returns whether this match is a bye.
    ///
    /// A bye has exactly one filled slot: the participant advances without
    /// a game, so the match never receives a number. A match with both slots
    /// empty is still waiting for earlier winners and is not a bye.
    #[must_use]
    pub const fn is_bye(&self) -> bool {
        self.participant_a.is_some() != self.participant_b.is_some()
    }
}

/// A drawn bracket for one class.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Bracket {
    /// Elimination format.
    pub kind: BracketKind,
    /// All matches of the bracket, in any order.
    pub matches: Vec<BracketMatch>,
}

impl Bracket {
    /// Creates a bracket from its matches.
    #[must_use]
    pub const fn new(kind: BracketKind, matches: Vec<BracketMatch>) -> Self {
        Self { kind, matches }
    }

    /// Returns the matches in round-then-position order.
    #[must_use]
    pub fn ordered_matches(&self) -> Vec<&BracketMatch> {
        let mut ordered: Vec<&BracketMatch> = self.matches.iter().collect();
        ordered.sort_by_key(|m| (m.round, m.position, m.match_id));
        ordered
    }

    /// Returns the number of bye matches.
    #[must_use]
    pub fn bye_count(&self) -> usize {
        self.matches.iter().filter(|m| m.is_bye()).count()
    }

    /// Returns the highest round number, or 0 for an empty bracket.
    #[must_use]
    pub fn round_count(&self) -> u32 {
        self.matches.iter().map(|m| m.round).max().unwrap_or(0)
    }
}

/// A championship class (competition category).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChampionshipClass {
    /// The canonical class identifier.
    pub class_id: i64,
    /// Display name.
    pub name: String,
    /// Competition branch.
    pub branch: Branch,
    /// Competitive level.
    pub level: Level,
    /// Age group label.
    pub age_group: Option<String>,
    /// Weight class or poomsae subclass label.
    pub subclass: Option<String>,
    /// Number of approved participants.
    pub approved_participants: u32,
    /// The drawn bracket. `None` means no bracket has been drawn.
    pub bracket: Option<Bracket>,
}

impl ChampionshipClass {
    /// Creates a class without a bracket.
    #[must_use]
    pub fn new(
        class_id: i64,
        name: &str,
        branch: Branch,
        level: Level,
        approved_participants: u32,
    ) -> Self {
        Self {
            class_id,
            name: name.to_string(),
            branch,
            level,
            age_group: None,
            subclass: None,
            approved_participants,
            bracket: None,
        }
    }

    /// Attaches a drawn bracket.
    #[must_use]
    pub fn with_bracket(mut self, bracket: Bracket) -> Self {
        self.bracket = Some(bracket);
        self
    }

    /// Returns whether the class is a beginner class.
    #[must_use]
    pub const fn is_pemula(&self) -> bool {
        matches!(self.level, Level::Pemula)
    }
}

/// A competition area (lapangan) scheduled for one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Court {
    /// The canonical court identifier.
    pub court_id: i64,
    /// The owning competition.
    pub competition_id: i64,
    /// The competition day this court runs on.
    pub date: time::Date,
    /// Display name.
    pub name: String,
    /// Assigned class identifiers, in assignment order.
    pub class_ids: Vec<i64>,
    /// Current queue state, if one has been initialized.
    pub queue_state: Option<QueueState>,
}

impl Court {
    /// Creates a court with no classes and a zeroed queue.
    #[must_use]
    pub fn new(court_id: i64, competition_id: i64, date: time::Date, name: &str) -> Self {
        Self {
            court_id,
            competition_id,
            date,
            name: name.to_string(),
            class_ids: Vec::new(),
            queue_state: Some(QueueState::zeroed()),
        }
    }

    /// Returns whether the class is assigned to this court.
    #[must_use]
    pub fn has_class(&self, class_id: i64) -> bool {
        self.class_ids.contains(&class_id)
    }
}
