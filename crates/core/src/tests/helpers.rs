// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{CourtSchedule, PipelineStep, ScheduleStore};
use std::collections::HashMap;
use tanding_domain::{
    Bracket, BracketKind, BracketMatch, Branch, ChampionshipClass, Court, Level, MatchAssignment,
    QueueState,
};
use time::macros::date;

/// In-memory store that can be told to fail a given step.
#[derive(Debug, Default)]
pub struct FakeStore {
    /// match_id -> (class_id, match_number, day)
    pub matches: HashMap<i64, (i64, Option<u32>, Option<u32>)>,
    pub queues: HashMap<i64, QueueState>,
    pub fail_on: Option<PipelineStep>,
    pub calls: Vec<PipelineStep>,
}

impl FakeStore {
    pub fn for_schedule(schedule: &CourtSchedule) -> Self {
        let mut store: Self = Self::default();
        for class in &schedule.classes {
            if let Some(bracket) = &class.bracket {
                for m in &bracket.matches {
                    store
                        .matches
                        .insert(m.match_id, (class.class_id, m.match_number, m.day));
                }
            }
        }
        store
    }

    pub fn failing_on(mut self, step: PipelineStep) -> Self {
        self.fail_on = Some(step);
        self
    }

    pub fn number_of(&self, match_id: i64) -> Option<u32> {
        self.matches.get(&match_id).and_then(|(_, number, _)| *number)
    }

    pub fn day_of(&self, match_id: i64) -> Option<u32> {
        self.matches.get(&match_id).and_then(|(_, _, day)| *day)
    }

    pub fn numbered_count(&self) -> usize {
        self.matches.values().filter(|(_, n, _)| n.is_some()).count()
    }

    fn check(&mut self, step: PipelineStep) -> Result<(), String> {
        self.calls.push(step);
        if self.fail_on == Some(step) {
            return Err(format!("simulated {step} failure"));
        }
        Ok(())
    }
}

impl ScheduleStore for FakeStore {
    type Error = String;

    fn clear_numbers(&mut self, class_ids: &[i64]) -> Result<usize, Self::Error> {
        self.check(PipelineStep::Resetting)?;
        let mut touched: usize = 0;
        for (class_id, number, day) in self.matches.values_mut() {
            if class_ids.contains(class_id) {
                *number = None;
                *day = None;
                touched += 1;
            }
        }
        Ok(touched)
    }

    fn assign_numbers(
        &mut self,
        day: u32,
        assignments: &[MatchAssignment],
    ) -> Result<usize, Self::Error> {
        self.check(PipelineStep::Generating)?;
        for assignment in assignments {
            self.matches.insert(
                assignment.match_id,
                (assignment.class_id, Some(assignment.match_number), Some(day)),
            );
        }
        Ok(assignments.len())
    }

    fn save_queue_state(&mut self, court_id: i64, state: QueueState) -> Result<(), Self::Error> {
        self.check(PipelineStep::QueueUpdating)?;
        self.queues.insert(court_id, state);
        Ok(())
    }
}

/// PEMULA-A: 3 participants, 2 matches.
pub fn create_pemula_a() -> ChampionshipClass {
    ChampionshipClass::new(1, "PEMULA-A", Branch::Kyorugi, Level::Pemula, 3).with_bracket(
        Bracket::new(
            BracketKind::Single,
            vec![
                BracketMatch::new(101, 1, 1, Some(1), Some(2)),
                BracketMatch::new(102, 2, 1, None, None),
            ],
        ),
    )
}

/// PEMULA-B: 5 participants, 4 matches of which 1 is a bye.
pub fn create_pemula_b() -> ChampionshipClass {
    ChampionshipClass::new(2, "PEMULA-B", Branch::Kyorugi, Level::Pemula, 5).with_bracket(
        Bracket::new(
            BracketKind::Single,
            vec![
                BracketMatch::new(201, 1, 1, Some(11), Some(12)),
                BracketMatch::new(202, 1, 2, Some(13), Some(14)),
                BracketMatch::new(203, 1, 3, Some(15), None),
                BracketMatch::new(204, 2, 1, None, None),
            ],
        ),
    )
}

/// PRESTASI-X: 8 participants, 7 matches.
pub fn create_prestasi_x() -> ChampionshipClass {
    let mut matches: Vec<BracketMatch> = Vec::new();
    for position in 1..=4_u32 {
        let a: i64 = 20 + i64::from(position) * 2;
        matches.push(BracketMatch::new(
            300 + i64::from(position),
            1,
            position,
            Some(a),
            Some(a + 1),
        ));
    }
    matches.push(BracketMatch::new(305, 2, 1, None, None));
    matches.push(BracketMatch::new(306, 2, 2, None, None));
    matches.push(BracketMatch::new(307, 3, 1, None, None));

    ChampionshipClass::new(3, "PRESTASI-X", Branch::Kyorugi, Level::Prestasi, 8)
        .with_bracket(Bracket::new(BracketKind::Single, matches))
}

pub fn create_test_court() -> Court {
    let mut court: Court = Court::new(7, 1, date!(2026 - 03 - 15), "Lapangan A");
    court.class_ids = vec![1, 2, 3];
    court
}

/// The three-class court, in assignment order A, B, X.
pub fn create_test_schedule() -> CourtSchedule {
    CourtSchedule::new(
        create_test_court(),
        vec![create_pemula_a(), create_pemula_b(), create_prestasi_x()],
        2,
    )
}
