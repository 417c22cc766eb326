// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{CourtSchedule, Intent, TransitionResult};
use tanding_domain::{NumberingPlan, QueueState, plan_numbering, validate_day};

/// Computes the numbering preview for a court.
///
/// The preview uses the same ordering and traversal as generation, so the
/// returned plan is exactly what `GenerateNumbers` would write. Classes
/// without a bracket are reported in the plan rather than rejected.
///
/// # Errors
///
/// Returns an error if the starting number is invalid.
pub fn preview(
    schedule: &CourtSchedule,
    starting_number: i64,
) -> Result<NumberingPlan, CoreError> {
    let ordered = schedule.ordered_classes();
    Ok(plan_numbering(&ordered, starting_number)?)
}

/// Plans generation and the three intents that persist it.
///
/// Also returns the validated day tag.
pub(crate) fn plan_generation(
    schedule: &CourtSchedule,
    starting_number: i64,
    day: Option<i64>,
) -> Result<(NumberingPlan, u32, Vec<Intent>), CoreError> {
    let court_id: i64 = schedule.court_id();
    let day: u32 = validate_day(day.unwrap_or_else(|| i64::from(schedule.day)))?;

    let plan: NumberingPlan = preview(schedule, starting_number)?;
    plan.require_brackets()?;

    let intents: Vec<Intent> = vec![
        Intent::ClearNumbers {
            court_id,
            class_ids: schedule.class_ids(),
        },
        Intent::AssignNumbers {
            court_id,
            day,
            assignments: plan.assignments.clone(),
        },
        Intent::SetQueueState {
            court_id,
            state: QueueState::initial(),
        },
    ];

    Ok((plan, day, intents))
}

/// Applies a command to a court schedule, producing persistence intents.
///
/// # Arguments
///
/// * `schedule` - The current court schedule (immutable)
/// * `command` - The command to apply
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the ordered intents
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The starting number or day is invalid
/// - A class on the court has no bracket drawn (generation only)
/// - `bertanding` leaves no room for the two matches after it
pub fn apply(schedule: &CourtSchedule, command: Command) -> Result<TransitionResult, CoreError> {
    let court_id: i64 = schedule.court_id();

    match command {
        Command::GenerateNumbers {
            starting_number,
            day,
        } => {
            let (plan, _, intents) = plan_generation(schedule, starting_number, day)?;
            Ok(TransitionResult {
                court_id,
                intents,
                plan: Some(plan),
            })
        }
        Command::ResetNumbers => Ok(TransitionResult {
            court_id,
            intents: vec![Intent::ClearNumbers {
                court_id,
                class_ids: schedule.class_ids(),
            }],
            plan: None,
        }),
        Command::ResetAndRezero => Ok(TransitionResult {
            court_id,
            intents: vec![
                Intent::ClearNumbers {
                    court_id,
                    class_ids: schedule.class_ids(),
                },
                Intent::SetQueueState {
                    court_id,
                    state: QueueState::zeroed(),
                },
            ],
            plan: None,
        }),
        Command::SetBertanding { bertanding } => Ok(TransitionResult {
            court_id,
            intents: vec![Intent::SetQueueState {
                court_id,
                state: QueueState::from_bertanding(bertanding)?,
            }],
            plan: None,
        }),
        Command::SetQueueState { state } => Ok(TransitionResult {
            court_id,
            intents: vec![Intent::SetQueueState { court_id, state }],
            plan: None,
        }),
    }
}
