// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use tanding_domain::QueueState;

/// A command represents operator intent for one court, as data only.
///
/// Commands are the only way to request numbering or queue changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Clear existing numbers, generate new ones and set the queue to `(1, 2, 3)`.
    GenerateNumbers {
        /// The first match number. Must be at least 1.
        starting_number: i64,
        /// The day (session) to tag matches with. Defaults to the court's
        /// derived day index.
        day: Option<i64>,
    },
    /// Clear match numbers only, leaving the queue untouched.
    ResetNumbers,
    /// Clear match numbers and zero the queue.
    ResetAndRezero,
    /// Set the currently fighting match; the other two slots are derived.
    SetBertanding {
        /// The currently fighting match number.
        bertanding: u32,
    },
    /// Save all three queue slots as given (manual override).
    SetQueueState {
        /// The state to store.
        state: QueueState,
    },
}

impl Command {
    /// Returns the command name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::GenerateNumbers { .. } => "GenerateNumbers",
            Self::ResetNumbers => "ResetNumbers",
            Self::ResetAndRezero => "ResetAndRezero",
            Self::SetBertanding { .. } => "SetBertanding",
            Self::SetQueueState { .. } => "SetQueueState",
        }
    }
}
