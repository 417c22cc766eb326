// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Live queue state for a court.
//!
//! Venue staff see three match-number pointers per court:
//!
//! - `bertanding`: the match currently being fought
//! - `persiapan`: the match preparing at the edge of the court
//! - `pemanasan`: the match warming up
//!
//! Every derived queue state keeps `persiapan = bertanding + 1` and
//! `pemanasan = bertanding + 2`. Only the manual bulk save path may store
//! an arbitrary triple.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// The three live match-number pointers of a court.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct QueueState {
    /// Match currently fighting.
    pub bertanding: u32,
    /// Match preparing.
    pub persiapan: u32,
    /// Match warming up.
    pub pemanasan: u32,
}

impl QueueState {
    /// Creates a queue state from three explicit values.
    ///
    /// This bypasses the derived-triple invariant and exists for the manual
    /// per-field override.
    #[must_use]
    pub const fn new(bertanding: u32, persiapan: u32, pemanasan: u32) -> Self {
        Self {
            bertanding,
            persiapan,
            pemanasan,
        }
    }

    /// The cleared queue, `(0, 0, 0)`.
    #[must_use]
    pub const fn zeroed() -> Self {
        Self::new(0, 0, 0)
    }

    /// The queue right after numbers are generated, `(1, 2, 3)`.
    ///
    /// This does not depend on how many matches exist on the court.
    #[must_use]
    pub const fn initial() -> Self {
        Self::new(1, 2, 3)
    }

    /// Derives the full triple from the currently fighting match.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBertanding` if `bertanding + 2` does not fit in `u32`.
    pub const fn from_bertanding(bertanding: u32) -> Result<Self, DomainError> {
        match (bertanding.checked_add(1), bertanding.checked_add(2)) {
            (Some(persiapan), Some(pemanasan)) => Ok(Self::new(bertanding, persiapan, pemanasan)),
            _ => Err(DomainError::InvalidBertanding { bertanding }),
        }
    }

    /// Returns whether this state satisfies the derived-triple invariant.
    #[must_use]
    pub const fn is_derived(&self) -> bool {
        matches!(
            (self.bertanding.checked_add(1), self.bertanding.checked_add(2)),
            (Some(persiapan), Some(pemanasan))
                if persiapan == self.persiapan && pemanasan == self.pemanasan
        )
    }

    /// Returns whether this is the cleared queue.
    #[must_use]
    pub const fn is_zeroed(&self) -> bool {
        self.bertanding == 0 && self.persiapan == 0 && self.pemanasan == 0
    }
}

/// Returns the queue state set immediately after a successful generation.
#[must_use]
pub const fn derive_initial() -> QueueState {
    QueueState::initial()
}

/// Recomputes the queue from an operator's "currently fighting" edit.
///
/// The preparing and warming-up fields are always recomputed and never
/// taken from prior state.
///
/// # Errors
///
/// Returns `InvalidBertanding` if the triple would not fit in `u32`.
pub const fn derive_from_bertanding(bertanding: u32) -> Result<QueueState, DomainError> {
    QueueState::from_bertanding(bertanding)
}
