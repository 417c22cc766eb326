// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The generate-numbers saga.
//!
//! Generation is three persistence steps run in order:
//! clear prior numbers, write new numbers, set the queue to `(1, 2, 3)`.
//! The steps are not one transaction. The pipeline records which step
//! failed so the remaining steps can be retried with [`NumberingPipeline::resume`].

use crate::apply::plan_generation;
use crate::error::CoreError;
use crate::state::{CourtSchedule, Intent};
use crate::store::{ScheduleStore, execute};
use std::fmt;
use tanding_domain::NumberingPlan;
use tracing::{debug, info, warn};

/// A persistence step of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStep {
    /// Clearing the court's prior match numbers.
    Resetting,
    /// Writing new match numbers.
    Generating,
    /// Setting the queue state.
    QueueUpdating,
}

impl PipelineStep {
    /// Returns the step name used in messages and API responses.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Resetting => "resetting",
            Self::Generating => "generating",
            Self::QueueUpdating => "queue_updating",
        }
    }

    fn failure_message(self, error: &str) -> String {
        match self {
            Self::Resetting => format!("Reset failed, no numbers were generated: {error}"),
            Self::Generating => {
                format!("Match numbers were cleared but not regenerated: {error}")
            }
            Self::QueueUpdating => {
                format!("Match numbers were generated but the queue was not updated: {error}")
            }
        }
    }
}

impl fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where the pipeline currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineStage {
    /// Not started.
    Idle,
    /// Clearing prior numbers.
    Resetting,
    /// Writing new numbers.
    Generating,
    /// Setting the queue.
    QueueUpdating,
    /// All steps succeeded.
    Done,
    /// A step failed. Steps before it have been persisted.
    Failed {
        /// The step that failed.
        step: PipelineStep,
        /// Operator-facing description of the failure.
        message: String,
    },
}

impl PipelineStage {
    const fn running(step: PipelineStep) -> Self {
        match step {
            PipelineStep::Resetting => Self::Resetting,
            PipelineStep::Generating => Self::Generating,
            PipelineStep::QueueUpdating => Self::QueueUpdating,
        }
    }

    /// Returns the stage name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Resetting => "resetting",
            Self::Generating => "generating",
            Self::QueueUpdating => "queue_updating",
            Self::Done => "done",
            Self::Failed { .. } => "failed",
        }
    }
}

/// What a pipeline run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    /// The court that was numbered.
    pub court_id: i64,
    /// The plan that was written.
    pub plan: NumberingPlan,
    /// The day tag written with the numbers.
    pub day: u32,
    /// Matches whose prior numbers were cleared.
    pub cleared: usize,
    /// Matches that received a number.
    pub assigned: usize,
    /// Non-fatal problems, such as a failed queue update.
    pub warnings: Vec<String>,
}

impl PipelineReport {
    /// Returns the operator-facing summary.
    #[must_use]
    pub fn message(&self) -> String {
        let mut message: String = format!(
            "Generated {} match numbers ({}), {} byes skipped",
            self.plan.total_matches,
            self.plan.range_label(),
            self.plan.total_bye_skipped
        );
        for warning in &self.warnings {
            message.push_str(". Warning: ");
            message.push_str(warning);
        }
        message
    }
}

/// Runs generation for one court as a resumable sequence of steps.
#[derive(Debug, Clone)]
pub struct NumberingPipeline {
    court_id: i64,
    class_ids: Vec<i64>,
    plan: NumberingPlan,
    day: u32,
    intents: Vec<Intent>,
    next: usize,
    stage: PipelineStage,
    cleared: usize,
    assigned: usize,
    warnings: Vec<String>,
}

impl NumberingPipeline {
    /// Plans generation for a court.
    ///
    /// Nothing is persisted until [`Self::run`].
    ///
    /// # Errors
    ///
    /// Returns an error if the starting number or day is invalid, or a
    /// class on the court has no bracket.
    pub fn new(
        schedule: &CourtSchedule,
        starting_number: i64,
        day: Option<i64>,
    ) -> Result<Self, CoreError> {
        let (plan, day, intents) = plan_generation(schedule, starting_number, day)?;

        Ok(Self {
            court_id: schedule.court_id(),
            class_ids: schedule.class_ids(),
            plan,
            day,
            intents,
            next: 0,
            stage: PipelineStage::Idle,
            cleared: 0,
            assigned: 0,
            warnings: Vec::new(),
        })
    }

    /// Returns the current stage.
    #[must_use]
    pub const fn stage(&self) -> &PipelineStage {
        &self.stage
    }

    /// Returns the court this pipeline numbers.
    #[must_use]
    pub const fn court_id(&self) -> i64 {
        self.court_id
    }

    /// Returns the classes the court held when the pipeline was planned.
    #[must_use]
    pub fn class_ids(&self) -> &[i64] {
        &self.class_ids
    }

    /// Returns the plan this pipeline writes.
    #[must_use]
    pub const fn plan(&self) -> &NumberingPlan {
        &self.plan
    }

    /// Runs all steps from the start.
    ///
    /// A queue update failure does not fail the run: the generated numbers
    /// stand, the report carries a warning and the stage is left as
    /// `Failed { step: QueueUpdating, .. }` so the queue can be retried.
    ///
    /// # Errors
    ///
    /// Returns `PipelineFailed` if clearing or writing numbers fails, and
    /// `InvalidPipelineStage` if the pipeline has already run.
    pub fn run<S: ScheduleStore>(&mut self, store: &mut S) -> Result<PipelineReport, CoreError> {
        if self.stage != PipelineStage::Idle {
            return Err(CoreError::InvalidPipelineStage {
                stage: self.stage.as_str().to_string(),
            });
        }
        info!(
            court_id = self.court_id,
            total_matches = self.plan.total_matches,
            "Starting match numbering"
        );
        self.drive(store)
    }

    /// Retries from the step that failed.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPipelineStage` unless the pipeline is in a failed
    /// stage, otherwise the same errors as [`Self::run`].
    pub fn resume<S: ScheduleStore>(
        &mut self,
        store: &mut S,
    ) -> Result<PipelineReport, CoreError> {
        if !matches!(self.stage, PipelineStage::Failed { .. }) {
            return Err(CoreError::InvalidPipelineStage {
                stage: self.stage.as_str().to_string(),
            });
        }
        info!(court_id = self.court_id, next_step = self.next, "Resuming match numbering");
        self.warnings.clear();
        self.drive(store)
    }

    fn drive<S: ScheduleStore>(&mut self, store: &mut S) -> Result<PipelineReport, CoreError> {
        while let Some(intent) = self.intents.get(self.next) {
            let step: PipelineStep = intent.step();
            self.stage = PipelineStage::running(step);
            debug!(court_id = self.court_id, %step, "Running pipeline step");

            match execute(store, intent) {
                Ok(count) => {
                    match step {
                        PipelineStep::Resetting => self.cleared = count,
                        PipelineStep::Generating => self.assigned = count,
                        PipelineStep::QueueUpdating => {}
                    }
                    self.next += 1;
                }
                Err(e) => {
                    let message: String = step.failure_message(&e.to_string());
                    self.stage = PipelineStage::Failed {
                        step,
                        message: message.clone(),
                    };

                    if step == PipelineStep::QueueUpdating {
                        warn!(court_id = self.court_id, error = %e, "Queue update failed after numbering");
                        self.warnings.push(message);
                        return Ok(self.report());
                    }

                    warn!(court_id = self.court_id, %step, error = %e, "Numbering pipeline failed");
                    return Err(CoreError::PipelineFailed { step, message });
                }
            }
        }

        self.stage = PipelineStage::Done;
        info!(
            court_id = self.court_id,
            range = %self.plan.range_label(),
            "Match numbering complete"
        );
        Ok(self.report())
    }

    fn report(&self) -> PipelineReport {
        PipelineReport {
            court_id: self.court_id,
            plan: self.plan.clone(),
            day: self.day,
            cleared: self.cleared,
            assigned: self.assigned,
            warnings: self.warnings.clone(),
        }
    }
}
