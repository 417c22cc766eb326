// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Numbering round trips through the store.

use crate::tests::seed_competition;
use crate::{Persistence, PersistenceError};
use tanding::{
    CourtSchedule, NumberingPipeline, PipelineReport, ResetOutcome, ScheduleStore,
    reset_and_rezero, reset_numbers,
};
use tanding_domain::{BracketMatch, MatchAssignment, QueueState};

fn numbered_matches(schedule: &CourtSchedule) -> Vec<(i64, Option<u32>, Option<u32>)> {
    schedule
        .ordered_classes()
        .iter()
        .filter_map(|c| c.bracket.as_ref())
        .flat_map(|b| b.ordered_matches())
        .map(|m: &BracketMatch| (m.match_id, m.match_number, m.day))
        .collect()
}

#[test]
fn test_generated_numbers_and_day_survive_reload() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let seeded = seed_competition(&mut persistence);
    let schedule: CourtSchedule = persistence.load_court_schedule(seeded.court_id).unwrap();

    let report: PipelineReport = NumberingPipeline::new(&schedule, 1, None)
        .unwrap()
        .run(&mut persistence)
        .unwrap();

    let reloaded: CourtSchedule = persistence.load_court_schedule(seeded.court_id).unwrap();
    let numbers: Vec<u32> = numbered_matches(&reloaded)
        .iter()
        .filter_map(|(_, number, _)| *number)
        .collect();

    assert_eq!(report.assigned, 12);
    assert_eq!(numbers, (1..=12).collect::<Vec<u32>>());
    assert!(
        numbered_matches(&reloaded)
            .iter()
            .filter(|(_, number, _)| number.is_some())
            .all(|(_, _, day)| *day == Some(2))
    );
    assert_eq!(
        persistence.get_queue_state(seeded.court_id).unwrap(),
        QueueState::new(1, 2, 3)
    );
}

#[test]
fn test_bye_match_is_not_numbered_in_storage() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let seeded = seed_competition(&mut persistence);
    let schedule: CourtSchedule = persistence.load_court_schedule(seeded.court_id).unwrap();
    NumberingPipeline::new(&schedule, 1, None)
        .unwrap()
        .run(&mut persistence)
        .unwrap();

    let class = persistence.get_class(seeded.pemula_b).unwrap();
    let bracket = class.bracket.unwrap();
    let bye: &BracketMatch = bracket.matches.iter().find(|m| m.is_bye()).unwrap();

    assert_eq!(bye.match_number, None);
    assert_eq!(bye.day, None);
    let numbered: Vec<Option<u32>> = bracket
        .ordered_matches()
        .iter()
        .filter(|m| !m.is_bye())
        .map(|m| m.match_number)
        .collect();
    assert_eq!(numbered, vec![Some(1), Some(2), Some(3)]);
}

#[test]
fn test_reset_clears_numbers_and_zeroes_queue() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let seeded = seed_competition(&mut persistence);
    let schedule: CourtSchedule = persistence.load_court_schedule(seeded.court_id).unwrap();
    NumberingPipeline::new(&schedule, 1, None)
        .unwrap()
        .run(&mut persistence)
        .unwrap();

    let outcome: ResetOutcome = reset_and_rezero(&schedule, &mut persistence).unwrap();

    assert!(outcome.is_success());
    let reloaded: CourtSchedule = persistence.load_court_schedule(seeded.court_id).unwrap();
    assert!(
        numbered_matches(&reloaded)
            .iter()
            .all(|(_, number, day)| number.is_none() && day.is_none())
    );
    assert_eq!(
        persistence.get_queue_state(seeded.court_id).unwrap(),
        QueueState::zeroed()
    );
}

#[test]
fn test_reset_numbers_keeps_queue() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let seeded = seed_competition(&mut persistence);
    let schedule: CourtSchedule = persistence.load_court_schedule(seeded.court_id).unwrap();
    NumberingPipeline::new(&schedule, 1, None)
        .unwrap()
        .run(&mut persistence)
        .unwrap();

    reset_numbers(&schedule, &mut persistence).unwrap();
    let again: ResetOutcome = reset_numbers(&schedule, &mut persistence).unwrap();

    assert!(again.is_success());
    assert_eq!(
        persistence.get_queue_state(seeded.court_id).unwrap(),
        QueueState::new(1, 2, 3)
    );
}

#[test]
fn test_assigning_unknown_match_writes_nothing() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let seeded = seed_competition(&mut persistence);
    let schedule: CourtSchedule = persistence.load_court_schedule(seeded.court_id).unwrap();
    let known: i64 = numbered_matches(&schedule)[0].0;

    let result = persistence.assign_numbers(
        1,
        &[
            MatchAssignment {
                match_id: known,
                class_id: seeded.pemula_b,
                match_number: 1,
            },
            MatchAssignment {
                match_id: 999_999,
                class_id: seeded.pemula_b,
                match_number: 2,
            },
        ],
    );

    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
    let reloaded: CourtSchedule = persistence.load_court_schedule(seeded.court_id).unwrap();
    assert!(
        numbered_matches(&reloaded)
            .iter()
            .all(|(_, number, _)| number.is_none())
    );
}

#[test]
fn test_queue_state_upserts() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let seeded = seed_competition(&mut persistence);

    persistence
        .save_queue_state(seeded.court_id, QueueState::from_bertanding(4).unwrap())
        .unwrap();
    persistence
        .save_queue_state(seeded.court_id, QueueState::new(9, 12, 14))
        .unwrap();

    assert_eq!(
        persistence.get_queue_state(seeded.court_id).unwrap(),
        QueueState::new(9, 12, 14)
    );
}

#[test]
fn test_queue_state_for_missing_court_is_rejected() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let result = persistence.save_queue_state(77, QueueState::initial());

    assert_eq!(result, Err(PersistenceError::CourtNotFound(77)));
}
