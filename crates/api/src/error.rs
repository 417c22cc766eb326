// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use tanding::{CoreError, PipelineStep};
use tanding_domain::DomainError;
use tanding_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// Another operation holds the court.
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// A numbering or reset step failed after earlier steps were persisted.
    PartialPipelineFailure {
        /// The step that failed.
        step: String,
        /// What was and was not persisted.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Conflict { message } => write!(f, "Conflict: {message}"),
            Self::PartialPipelineFailure { step, message } => {
                write!(f, "Failed at step '{step}': {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidStartingNumber { .. } => ApiError::InvalidInput {
            field: String::from("starting_number"),
            message: err.to_string(),
        },
        DomainError::InvalidDay { .. } => ApiError::InvalidInput {
            field: String::from("day"),
            message: err.to_string(),
        },
        DomainError::InvalidBertanding { .. } => ApiError::InvalidInput {
            field: String::from("bertanding"),
            message: err.to_string(),
        },
        DomainError::DateParseError { .. } => ApiError::InvalidInput {
            field: String::from("date"),
            message: err.to_string(),
        },
        DomainError::InvalidBranch(_) => ApiError::InvalidInput {
            field: String::from("branch"),
            message: err.to_string(),
        },
        DomainError::InvalidBracketKind(_) => ApiError::InvalidInput {
            field: String::from("bracket_kind"),
            message: err.to_string(),
        },
        DomainError::InvalidMatchStatus(_) => ApiError::InvalidInput {
            field: String::from("status"),
            message: err.to_string(),
        },
        DomainError::BracketNotFound { .. } => ApiError::DomainRuleViolation {
            rule: String::from("bracket_required"),
            message: err.to_string(),
        },
        DomainError::MatchNumberOverflow { .. } => ApiError::DomainRuleViolation {
            rule: String::from("match_number_range"),
            message: err.to_string(),
        },
        DomainError::ClassAlreadyAssigned { .. } => ApiError::DomainRuleViolation {
            rule: String::from("one_court_per_day"),
            message: err.to_string(),
        },
        DomainError::DuplicateClassAssignment { .. } => ApiError::DomainRuleViolation {
            rule: String::from("unique_class_assignment"),
            message: err.to_string(),
        },
        DomainError::DayNotInCompetition { .. } => ApiError::DomainRuleViolation {
            rule: String::from("competition_day"),
            message: err.to_string(),
        },
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::CourtBusy { .. } => ApiError::Conflict {
            message: err.to_string(),
        },
        CoreError::InvalidPipelineStage { .. } => ApiError::Internal {
            message: err.to_string(),
        },
        CoreError::PipelineFailed { step, message } => partial_failure(step, message),
    }
}

/// Translates a persistence error into an API error.
///
/// Missing rows become `ResourceNotFound`; storage failures are internal.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::CompetitionNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Competition"),
            message: format!("Competition {id} does not exist"),
        },
        PersistenceError::CourtNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Court"),
            message: format!("Court {id} does not exist"),
        },
        PersistenceError::ClassNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Class"),
            message: format!("Class {id} does not exist"),
        },
        PersistenceError::NotFound(msg) => ApiError::ResourceNotFound {
            resource_type: String::from("Resource"),
            message: msg,
        },
        PersistenceError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}

pub(crate) fn partial_failure(step: PipelineStep, message: String) -> ApiError {
    ApiError::PartialPipelineFailure {
        step: step.as_str().to_string(),
        message,
    }
}
