// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::apply::apply;
use crate::command::Command;
use crate::error::CoreError;
use crate::pipeline::PipelineStep;
use crate::state::CourtSchedule;
use crate::store::{ScheduleStore, execute};
use tracing::{info, warn};

/// The result of one reset step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The step succeeded, touching this many rows.
    Succeeded(usize),
    /// The step failed.
    Failed(String),
    /// The step was not part of this reset.
    Skipped,
}

impl StepOutcome {
    /// Returns whether the step failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Per-step result of a reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetOutcome {
    /// The court that was reset.
    pub court_id: i64,
    /// Clearing match numbers.
    pub numbers: StepOutcome,
    /// Zeroing the queue.
    pub queue: StepOutcome,
}

impl ResetOutcome {
    /// Returns whether every attempted step succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        !self.numbers.is_failed() && !self.queue.is_failed()
    }

    /// Returns the first failed step, if any.
    #[must_use]
    pub fn failure(&self) -> Option<(PipelineStep, String)> {
        if let StepOutcome::Failed(message) = &self.numbers {
            return Some((PipelineStep::Resetting, message.clone()));
        }
        if let StepOutcome::Failed(message) = &self.queue {
            return Some((PipelineStep::QueueUpdating, message.clone()));
        }
        None
    }

    /// Returns the operator-facing summary.
    #[must_use]
    pub fn message(&self) -> String {
        let numbers: String = match &self.numbers {
            StepOutcome::Succeeded(count) => format!("Cleared numbers on {count} matches"),
            StepOutcome::Failed(e) => format!("Failed to clear match numbers: {e}"),
            StepOutcome::Skipped => String::from("Match numbers untouched"),
        };
        match &self.queue {
            StepOutcome::Succeeded(_) => format!("{numbers}. Queue reset to 0"),
            StepOutcome::Failed(e) => format!("{numbers}. Failed to reset queue: {e}"),
            StepOutcome::Skipped => numbers,
        }
    }
}

/// Clears match numbers and day tags on every class of the court.
///
/// The queue is left untouched. Clearing an already cleared court is a
/// no-op that still succeeds.
///
/// # Errors
///
/// Returns an error only if the reset cannot be planned. Store failures
/// are reported in the outcome.
pub fn reset_numbers<S: ScheduleStore>(
    schedule: &CourtSchedule,
    store: &mut S,
) -> Result<ResetOutcome, CoreError> {
    run_reset(schedule, store, Command::ResetNumbers)
}

/// Clears match numbers and zeroes the queue.
///
/// Both steps are attempted even if the first one fails.
///
/// # Errors
///
/// Returns an error only if the reset cannot be planned. Store failures
/// are reported in the outcome.
pub fn reset_and_rezero<S: ScheduleStore>(
    schedule: &CourtSchedule,
    store: &mut S,
) -> Result<ResetOutcome, CoreError> {
    run_reset(schedule, store, Command::ResetAndRezero)
}

fn run_reset<S: ScheduleStore>(
    schedule: &CourtSchedule,
    store: &mut S,
    command: Command,
) -> Result<ResetOutcome, CoreError> {
    let name: &'static str = command.name();
    let result = apply(schedule, command)?;

    let mut outcome: ResetOutcome = ResetOutcome {
        court_id: result.court_id,
        numbers: StepOutcome::Skipped,
        queue: StepOutcome::Skipped,
    };

    for intent in &result.intents {
        let step_outcome: StepOutcome = match execute(store, intent) {
            Ok(count) => StepOutcome::Succeeded(count),
            Err(e) => {
                warn!(court_id = result.court_id, command = name, error = %e, "Reset step failed");
                StepOutcome::Failed(e.to_string())
            }
        };
        match intent.step() {
            PipelineStep::QueueUpdating => outcome.queue = step_outcome,
            PipelineStep::Resetting | PipelineStep::Generating => outcome.numbers = step_outcome,
        }
    }

    info!(
        court_id = result.court_id,
        command = name,
        success = outcome.is_success(),
        "Court reset finished"
    );
    Ok(outcome)
}
