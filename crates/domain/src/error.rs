// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation and numbering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The starting match number is below 1.
    InvalidStartingNumber {
        /// The rejected starting number.
        starting_number: i64,
    },
    /// The day (session) identifier is below 1.
    InvalidDay {
        /// The rejected day value.
        day: i64,
    },
    /// A class referenced by a court has never had a bracket drawn.
    BracketNotFound {
        /// The class identifier.
        class_id: i64,
        /// The class display name.
        class_name: String,
    },
    /// The currently fighting match leaves no room for the two matches
    /// after it.
    InvalidBertanding {
        /// The rejected match number.
        bertanding: u32,
    },
    /// Match numbering ran past the largest representable number.
    MatchNumberOverflow {
        /// The class being numbered when the overflow happened.
        class_id: i64,
    },
    /// Branch value is not KYORUGI or POOMSAE.
    InvalidBranch(String),
    /// Bracket kind value is not recognized.
    InvalidBracketKind(String),
    /// Match status value is not recognized.
    InvalidMatchStatus(String),
    /// A class is already assigned to another court on the same day.
    ClassAlreadyAssigned {
        /// The class identifier.
        class_id: i64,
        /// The court that already holds the class.
        court_id: i64,
        /// The competition day.
        date: time::Date,
    },
    /// The same class appears more than once in one assignment list.
    DuplicateClassAssignment {
        /// The repeated class identifier.
        class_id: i64,
    },
    /// The court's date is not one of the competition's days.
    DayNotInCompetition {
        /// The date that could not be located.
        date: time::Date,
    },
    /// Failed to parse date from string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidStartingNumber { starting_number } => {
                write!(
                    f,
                    "Invalid starting number: {starting_number}. Must be at least 1"
                )
            }
            Self::InvalidDay { day } => {
                write!(f, "Invalid day: {day}. Must be at least 1")
            }
            Self::BracketNotFound {
                class_id,
                class_name,
            } => {
                write!(
                    f,
                    "Class '{class_name}' ({class_id}) has no bracket drawn"
                )
            }
            Self::InvalidBertanding { bertanding } => {
                write!(
                    f,
                    "Invalid bertanding: {bertanding}. Must be at most {}",
                    u32::MAX - 2
                )
            }
            Self::MatchNumberOverflow { class_id } => {
                write!(f, "Match number overflow while numbering class {class_id}")
            }
            Self::InvalidBranch(value) => {
                write!(
                    f,
                    "Invalid branch: '{value}'. Must be KYORUGI or POOMSAE"
                )
            }
            Self::InvalidBracketKind(value) => {
                write!(
                    f,
                    "Invalid bracket kind: '{value}'. Must be single or double"
                )
            }
            Self::InvalidMatchStatus(value) => write!(f, "Invalid match status: '{value}'"),
            Self::ClassAlreadyAssigned {
                class_id,
                court_id,
                date,
            } => {
                write!(
                    f,
                    "Class {class_id} is already assigned to court {court_id} on {date}"
                )
            }
            Self::DuplicateClassAssignment { class_id } => {
                write!(f, "Class {class_id} appears more than once in the assignment")
            }
            Self::DayNotInCompetition { date } => {
                write!(f, "Date {date} is not a day of this competition")
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
