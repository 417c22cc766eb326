// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod command;
mod error;
mod guard;
mod pipeline;
mod reset;
mod state;
mod store;

#[cfg(test)]
mod tests;

use tanding_domain::{Court, DomainError, day_index};
use time::Date;

// Re-export public types and functions
pub use apply::{apply, preview};
pub use command::Command;
pub use error::CoreError;
pub use guard::{CourtGuard, CourtLease};
pub use pipeline::{NumberingPipeline, PipelineReport, PipelineStage, PipelineStep};
pub use reset::{ResetOutcome, StepOutcome, reset_and_rezero, reset_numbers};
pub use state::{CourtSchedule, Intent, TransitionResult};
pub use store::{ScheduleStore, execute};

/// Resolves the 1-based day index of a court within its competition.
///
/// # Arguments
///
/// * `competition_days` - Every date of the court's competition
/// * `court` - The court to resolve
///
/// # Errors
///
/// Returns an error if the court's date is not a competition day.
pub fn court_day_index(competition_days: &[Date], court: &Court) -> Result<u32, DomainError> {
    day_index(competition_days, court.date)
}
