// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::pipeline::PipelineStep;
use tanding_domain::{
    ChampionshipClass, Court, MatchAssignment, NumberingPlan, QueueState, order_classes,
};

/// Everything numbering needs to know about one court.
///
/// This is loaded from storage before a command is applied and is never
/// mutated by the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourtSchedule {
    /// The court.
    pub court: Court,
    /// The court's assigned classes with their brackets, in assignment order.
    pub classes: Vec<ChampionshipClass>,
    /// The court's 1-based day index within the competition.
    pub day: u32,
}

impl CourtSchedule {
    /// Creates a schedule for a court.
    #[must_use]
    pub const fn new(court: Court, classes: Vec<ChampionshipClass>, day: u32) -> Self {
        Self {
            court,
            classes,
            day,
        }
    }

    /// Returns the court identifier.
    #[must_use]
    pub const fn court_id(&self) -> i64 {
        self.court.court_id
    }

    /// Returns the classes in numbering order.
    #[must_use]
    pub fn ordered_classes(&self) -> Vec<ChampionshipClass> {
        order_classes(self.classes.clone())
    }

    /// Returns the identifiers of all classes on the court.
    #[must_use]
    pub fn class_ids(&self) -> Vec<i64> {
        self.classes.iter().map(|c| c.class_id).collect()
    }
}

/// A single persistence step requested by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Clear `match_number` and `day` on every match of these classes.
    ClearNumbers {
        /// The court being cleared.
        court_id: i64,
        /// The court's classes.
        class_ids: Vec<i64>,
    },
    /// Write match numbers and tag them with a day.
    AssignNumbers {
        /// The court being numbered.
        court_id: i64,
        /// The day (session) tag.
        day: u32,
        /// The numbers to write.
        assignments: Vec<MatchAssignment>,
    },
    /// Store a queue state for the court.
    SetQueueState {
        /// The court.
        court_id: i64,
        /// The new queue state.
        state: QueueState,
    },
}

impl Intent {
    /// Returns the pipeline step this intent performs.
    #[must_use]
    pub const fn step(&self) -> PipelineStep {
        match self {
            Self::ClearNumbers { .. } => PipelineStep::Resetting,
            Self::AssignNumbers { .. } => PipelineStep::Generating,
            Self::SetQueueState { .. } => PipelineStep::QueueUpdating,
        }
    }
}

/// The result of applying a command.
///
/// Applying is pure; nothing happens until the intents are executed
/// against a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The court the intents target.
    pub court_id: i64,
    /// Persistence steps, in execution order.
    pub intents: Vec<Intent>,
    /// The numbering plan, for generation commands.
    pub plan: Option<NumberingPlan>,
}
