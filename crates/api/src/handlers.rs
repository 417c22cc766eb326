// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.

use tanding::{
    Command, CourtGuard, CourtLease, CourtSchedule, NumberingPipeline, PipelineReport,
    ResetOutcome, StepOutcome, TransitionResult, apply, execute, preview,
};
use tanding_domain::{
    ChampionshipClass, Court, Level, MatchNumberRange, NumberingPlan, QueueState, format_date,
    parse_date,
};
use tanding_persistence::Persistence;
use tracing::{info, warn};

use crate::error::{
    ApiError, partial_failure, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
use crate::pending::PendingPipelines;
use crate::request_response::{
    AssignClassesRequest, AssignClassesResponse, ClassBracketInfo, CourtInfo,
    GenerateNumbersRequest, GenerateNumbersResponse, ListCourtsRequest, ListCourtsResponse,
    NumberingPreviewResponse, PreviewSummary, QueueStateRequest, QueueStateResponse, RangeInfo,
    ResetRequest, ResetResponse, SetBertandingRequest,
};

/// Starting number used when a request omits one.
pub const DEFAULT_STARTING_NUMBER: i64 = 1;

fn load_schedule(
    persistence: &mut Persistence,
    court_id: i64,
) -> Result<CourtSchedule, ApiError> {
    persistence
        .load_court_schedule(court_id)
        .map_err(translate_persistence_error)
}

/// Claims a court for a numbering, reset or class assignment operation.
///
/// Callers take the lease before waiting on the store, so an overlapping
/// operation on the same court is rejected instead of queued.
///
/// # Errors
///
/// Returns `Conflict` if another operation holds the court.
pub fn acquire_court(guard: &CourtGuard, court_id: i64) -> Result<CourtLease, ApiError> {
    guard.acquire(court_id).map_err(|e| {
        warn!(court_id, "Rejected concurrent court operation");
        translate_core_error(e)
    })
}

fn range_info(range: &MatchNumberRange) -> RangeInfo {
    RangeInfo {
        class_id: range.class_id,
        class_name: range.class_name.clone(),
        level: range.level.as_str().to_string(),
        range: range.label(),
        start: range.start,
        end: range.end,
        participant_count: range.participant_count,
        match_count: range.match_count,
        bye_count: range.bye_count,
        bracket_missing: range.bracket_missing,
    }
}

/// Computes the numbering a court would receive, without writing anything.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `court_id` - The court to preview
/// * `starting_number` - The first match number, defaulting to 1
///
/// # Errors
///
/// Returns an error if the court does not exist or the starting number is
/// below 1. Classes without a bracket are reported in `missing_brackets`.
pub fn get_numbering_preview(
    persistence: &mut Persistence,
    court_id: i64,
    starting_number: Option<i64>,
) -> Result<NumberingPreviewResponse, ApiError> {
    let schedule: CourtSchedule = load_schedule(persistence, court_id)?;
    let plan: NumberingPlan = preview(
        &schedule,
        starting_number.unwrap_or(DEFAULT_STARTING_NUMBER),
    )
    .map_err(translate_core_error)?;

    Ok(NumberingPreviewResponse {
        court_id,
        starting_number: plan.starting_number,
        total_matches: plan.total_matches,
        total_bye_skipped: plan.total_bye_skipped,
        range: plan.range_label(),
        summary: PreviewSummary {
            pemula: plan.ranges_for(Level::Pemula).map(range_info).collect(),
            prestasi: plan.ranges_for(Level::Prestasi).map(range_info).collect(),
        },
        missing_brackets: plan.missing_brackets(),
    })
}

fn generate_response(report: &PipelineReport) -> GenerateNumbersResponse {
    GenerateNumbersResponse {
        success: true,
        range: report.plan.range_label(),
        message: report.message(),
        total_matches: report.plan.total_matches,
        total_bye_skipped: report.plan.total_bye_skipped,
        day: report.day,
        warnings: report.warnings.clone(),
    }
}

/// Clears a court's numbers, numbers its matches and sets the queue to `(1, 2, 3)`.
///
/// A failed queue update does not fail the request: the response carries
/// a warning and the run can be finished with [`resume_numbering`].
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `lease` - The caller's claim on the court to number
/// * `pending` - Keeps failed runs for resumption
/// * `request` - Starting number and day, both optional
///
/// # Errors
///
/// Returns an error if:
/// - The court does not exist
/// - The starting number or day is invalid
/// - A class on the court has no bracket
/// - Clearing or writing numbers fails
pub fn generate_numbers(
    persistence: &mut Persistence,
    lease: &CourtLease,
    pending: &mut PendingPipelines,
    request: &GenerateNumbersRequest,
) -> Result<GenerateNumbersResponse, ApiError> {
    let court_id: i64 = lease.court_id();
    let schedule: CourtSchedule = load_schedule(persistence, court_id)?;

    let mut pipeline: NumberingPipeline = NumberingPipeline::new(
        &schedule,
        request.starting_number.unwrap_or(DEFAULT_STARTING_NUMBER),
        request.day,
    )
    .map_err(translate_core_error)?;

    let result = pipeline.run(persistence);
    pending.record(pipeline);
    let report: PipelineReport = result.map_err(translate_core_error)?;

    info!(
        court_id,
        range = %report.plan.range_label(),
        day = report.day,
        "Generated match numbers"
    );
    Ok(generate_response(&report))
}

/// Retries a court's failed numbering run from the step that failed.
///
/// The run is dropped, not retried, if the court's classes changed since
/// it was planned.
///
/// # Errors
///
/// Returns an error if the court has no failed run, its classes changed,
/// or the retried step fails again.
pub fn resume_numbering(
    persistence: &mut Persistence,
    lease: &CourtLease,
    pending: &mut PendingPipelines,
) -> Result<GenerateNumbersResponse, ApiError> {
    let court_id: i64 = lease.court_id();
    let schedule: CourtSchedule = load_schedule(persistence, court_id)?;

    let Some(mut pipeline) = pending.take(court_id) else {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Failed numbering run"),
            message: format!("Court {court_id} has no failed numbering run to resume"),
        });
    };

    if pipeline.class_ids() != schedule.class_ids().as_slice() {
        warn!(court_id, "Dropped failed numbering run planned for other classes");
        return Err(ApiError::Conflict {
            message: format!(
                "The classes on court {court_id} changed since numbering failed; generate numbers again"
            ),
        });
    }

    let result = pipeline.resume(persistence);
    pending.record(pipeline);
    let report: PipelineReport = result.map_err(translate_core_error)?;

    info!(court_id, "Resumed match numbering");
    Ok(generate_response(&report))
}

fn require_confirmation(request: &ResetRequest) -> Result<(), ApiError> {
    if request.confirm {
        Ok(())
    } else {
        Err(ApiError::InvalidInput {
            field: String::from("confirm"),
            message: String::from("Resetting match numbers requires confirm: true"),
        })
    }
}

fn reset_response(outcome: &ResetOutcome) -> Result<ResetResponse, ApiError> {
    if let Some((step, _)) = outcome.failure() {
        return Err(partial_failure(step, outcome.message()));
    }

    let cleared: usize = match outcome.numbers {
        StepOutcome::Succeeded(count) => count,
        StepOutcome::Failed(_) | StepOutcome::Skipped => 0,
    };
    Ok(ResetResponse {
        success: true,
        message: outcome.message(),
        cleared,
    })
}

/// Clears the match numbers of a court, leaving its queue untouched.
///
/// # Errors
///
/// Returns an error if the request is unconfirmed, the court does not
/// exist, or clearing fails.
pub fn reset_numbers(
    persistence: &mut Persistence,
    lease: &CourtLease,
    pending: &mut PendingPipelines,
    request: &ResetRequest,
) -> Result<ResetResponse, ApiError> {
    require_confirmation(request)?;
    let court_id: i64 = lease.court_id();
    let schedule: CourtSchedule = load_schedule(persistence, court_id)?;

    let outcome: ResetOutcome =
        tanding::reset_numbers(&schedule, persistence).map_err(translate_core_error)?;
    pending.discard(court_id);

    info!(court_id, success = outcome.is_success(), "Reset match numbers");
    reset_response(&outcome)
}

/// Clears the match numbers of a court and zeroes its queue.
///
/// Both steps are attempted even when the first fails.
///
/// # Errors
///
/// Returns an error if the request is unconfirmed, the court does not
/// exist, or either step fails. A failure message names the outcome of
/// both steps.
pub fn reset_and_rezero(
    persistence: &mut Persistence,
    lease: &CourtLease,
    pending: &mut PendingPipelines,
    request: &ResetRequest,
) -> Result<ResetResponse, ApiError> {
    require_confirmation(request)?;
    let court_id: i64 = lease.court_id();
    let schedule: CourtSchedule = load_schedule(persistence, court_id)?;

    let outcome: ResetOutcome =
        tanding::reset_and_rezero(&schedule, persistence).map_err(translate_core_error)?;
    pending.discard(court_id);

    info!(
        court_id,
        success = outcome.is_success(),
        "Reset match numbers and queue"
    );
    reset_response(&outcome)
}

fn queue_response(court_id: i64, state: QueueState) -> QueueStateResponse {
    QueueStateResponse {
        success: true,
        court_id,
        bertanding: state.bertanding,
        persiapan: state.persiapan,
        pemanasan: state.pemanasan,
    }
}

fn apply_queue_command(
    persistence: &mut Persistence,
    court_id: i64,
    command: Command,
) -> Result<QueueState, ApiError> {
    let schedule: CourtSchedule = load_schedule(persistence, court_id)?;

    // Apply command via core
    let name: &'static str = command.name();
    let result: TransitionResult = apply(&schedule, command).map_err(translate_core_error)?;

    for intent in &result.intents {
        execute(persistence, intent).map_err(translate_persistence_error)?;
    }

    let state: QueueState = persistence
        .get_queue_state(court_id)
        .map_err(translate_persistence_error)?;
    info!(
        court_id,
        command = name,
        bertanding = state.bertanding,
        persiapan = state.persiapan,
        pemanasan = state.pemanasan,
        "Saved queue state"
    );
    Ok(state)
}

/// Saves all three queue slots of a court as given.
///
/// # Errors
///
/// Returns an error if the court does not exist or the save fails.
pub fn set_queue_state(
    persistence: &mut Persistence,
    court_id: i64,
    request: &QueueStateRequest,
) -> Result<QueueStateResponse, ApiError> {
    let state: QueueState =
        QueueState::new(request.bertanding, request.persiapan, request.pemanasan);
    let saved: QueueState =
        apply_queue_command(persistence, court_id, Command::SetQueueState { state })?;
    Ok(queue_response(court_id, saved))
}

/// Sets the currently fighting match of a court; the other slots follow it.
///
/// # Errors
///
/// Returns an error if the court does not exist or the save fails.
pub fn set_bertanding(
    persistence: &mut Persistence,
    court_id: i64,
    request: &SetBertandingRequest,
) -> Result<QueueStateResponse, ApiError> {
    let saved: QueueState = apply_queue_command(
        persistence,
        court_id,
        Command::SetBertanding {
            bertanding: request.bertanding,
        },
    )?;
    Ok(queue_response(court_id, saved))
}

/// Returns the queue state of a court, `(0, 0, 0)` if never saved.
///
/// # Errors
///
/// Returns an error if the court does not exist.
pub fn get_queue_state(
    persistence: &mut Persistence,
    court_id: i64,
) -> Result<QueueStateResponse, ApiError> {
    let state: QueueState = persistence
        .get_queue_state(court_id)
        .map_err(translate_persistence_error)?;
    Ok(queue_response(court_id, state))
}

fn court_info(court: Court) -> CourtInfo {
    let queue: QueueState = court.queue_state.unwrap_or_else(QueueState::zeroed);
    CourtInfo {
        court_id: court.court_id,
        competition_id: court.competition_id,
        date: format_date(court.date),
        name: court.name,
        class_ids: court.class_ids,
        bertanding: queue.bertanding,
        persiapan: queue.persiapan,
        pemanasan: queue.pemanasan,
    }
}

/// Lists the courts of a competition, optionally for one day.
///
/// # Errors
///
/// Returns an error if the date is malformed or the competition does not exist.
pub fn list_courts(
    persistence: &mut Persistence,
    request: &ListCourtsRequest,
) -> Result<ListCourtsResponse, ApiError> {
    let date = request
        .date
        .as_deref()
        .map(parse_date)
        .transpose()
        .map_err(translate_domain_error)?;

    let courts: Vec<Court> = persistence
        .list_courts(request.competition_id, date)
        .map_err(translate_persistence_error)?;

    Ok(ListCourtsResponse {
        competition_id: request.competition_id,
        courts: courts.into_iter().map(court_info).collect(),
    })
}

/// Returns the class identifiers assigned to a court, in order.
///
/// # Errors
///
/// Returns an error if the court does not exist.
pub fn court_class_ids(persistence: &mut Persistence, court_id: i64) -> Result<Vec<i64>, ApiError> {
    let court: Court = persistence
        .get_court(court_id)
        .map_err(translate_persistence_error)?;
    Ok(court.class_ids)
}

/// Summarizes one class and its bracket.
///
/// # Errors
///
/// Returns an error if the class does not exist.
pub fn get_class_bracket_info(
    persistence: &mut Persistence,
    class_id: i64,
) -> Result<ClassBracketInfo, ApiError> {
    let class: ChampionshipClass = persistence
        .get_class(class_id)
        .map_err(translate_persistence_error)?;

    let bracket = class.bracket.as_ref();
    Ok(ClassBracketInfo {
        class_id: class.class_id,
        name: class.name.clone(),
        branch: class.branch.as_str().to_string(),
        level: class.level.as_str().to_string(),
        age_group: class.age_group.clone(),
        subclass: class.subclass.clone(),
        approved_participants: class.approved_participants,
        bracket_drawn: bracket.is_some(),
        bracket_kind: bracket.map(|b| b.kind.as_str().to_string()),
        match_count: bracket.map_or(0, |b| b.matches.len()),
        bye_count: bracket.map_or(0, |b| b.bye_count()),
        round_count: bracket.map_or(0, |b| b.round_count()),
        numbered_matches: bracket.map_or(0, |b| {
            b.matches.iter().filter(|m| m.match_number.is_some()).count()
        }),
    })
}

/// Replaces the ordered class list of a court.
///
/// Failed numbering runs planned for this court or for any of the
/// assigned classes are dropped.
///
/// # Errors
///
/// Returns an error if the court or a class does not exist, or a class is
/// already on another court that day.
pub fn assign_classes(
    persistence: &mut Persistence,
    lease: &CourtLease,
    pending: &mut PendingPipelines,
    request: &AssignClassesRequest,
) -> Result<AssignClassesResponse, ApiError> {
    let court_id: i64 = lease.court_id();

    persistence
        .assign_classes(court_id, &request.class_ids)
        .map_err(translate_persistence_error)?;
    pending.discard(court_id);
    pending.discard_classes(&request.class_ids);

    info!(court_id, classes = request.class_ids.len(), "Assigned classes to court");
    Ok(AssignClassesResponse {
        court_id,
        class_ids: request.class_ids.clone(),
        message: format!(
            "Assigned {} classes to court {court_id}",
            request.class_ids.len()
        ),
    })
}
