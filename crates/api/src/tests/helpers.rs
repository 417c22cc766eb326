// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use tanding_domain::{Bracket, BracketKind, BracketMatch, Branch, ChampionshipClass, Level};
use tanding_persistence::Persistence;
use time::Date;
use time::macros::date;

pub const FIRST_DAY: Date = date!(2026 - 03 - 14);
pub const SECOND_DAY: Date = date!(2026 - 03 - 15);

pub struct Seeded {
    pub competition_id: i64,
    pub court_id: i64,
    pub pemula_a: i64,
    pub pemula_b: i64,
    pub prestasi_x: i64,
}

pub fn create_pemula_a() -> ChampionshipClass {
    ChampionshipClass::new(0, "PEMULA-A", Branch::Kyorugi, Level::Pemula, 3).with_bracket(
        Bracket::new(
            BracketKind::Single,
            vec![
                BracketMatch::new(0, 1, 1, Some(1), Some(2)),
                BracketMatch::new(0, 2, 1, None, None),
            ],
        ),
    )
}

pub fn create_pemula_b() -> ChampionshipClass {
    ChampionshipClass::new(0, "PEMULA-B", Branch::Kyorugi, Level::Pemula, 5).with_bracket(
        Bracket::new(
            BracketKind::Single,
            vec![
                BracketMatch::new(0, 1, 1, Some(11), Some(12)),
                BracketMatch::new(0, 1, 2, Some(13), Some(14)),
                BracketMatch::new(0, 1, 3, Some(15), None),
                BracketMatch::new(0, 2, 1, None, None),
            ],
        ),
    )
}

pub fn create_prestasi_x() -> ChampionshipClass {
    let mut matches: Vec<BracketMatch> = (1..=4_u32)
        .map(|position| {
            let a: i64 = 20 + i64::from(position) * 2;
            BracketMatch::new(0, 1, position, Some(a), Some(a + 1))
        })
        .collect();
    matches.push(BracketMatch::new(0, 2, 1, None, None));
    matches.push(BracketMatch::new(0, 2, 2, None, None));
    matches.push(BracketMatch::new(0, 3, 1, None, None));

    ChampionshipClass::new(0, "PRESTASI-X", Branch::Kyorugi, Level::Prestasi, 8)
        .with_bracket(Bracket::new(BracketKind::Single, matches))
}

/// A two-day competition with one court on the second day holding
/// PEMULA-A, PEMULA-B and PRESTASI-X in that order.
pub fn create_seeded_persistence() -> (Persistence, Seeded) {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let competition_id: i64 = persistence.create_competition("Kejurnas 2026").unwrap();
    persistence
        .add_competition_day(competition_id, FIRST_DAY)
        .unwrap();
    persistence
        .add_competition_day(competition_id, SECOND_DAY)
        .unwrap();
    let court_id: i64 = persistence
        .create_court(competition_id, SECOND_DAY, "Lapangan A")
        .unwrap();

    let pemula_a: i64 = persistence
        .create_class(competition_id, &create_pemula_a())
        .unwrap();
    let pemula_b: i64 = persistence
        .create_class(competition_id, &create_pemula_b())
        .unwrap();
    let prestasi_x: i64 = persistence
        .create_class(competition_id, &create_prestasi_x())
        .unwrap();
    persistence
        .assign_classes(court_id, &[pemula_a, pemula_b, prestasi_x])
        .unwrap();

    (
        persistence,
        Seeded {
            competition_id,
            court_id,
            pemula_a,
            pemula_b,
            prestasi_x,
        },
    )
}
