// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Class ordering for a court.
//!
//! The ordering produced here is authoritative: it drives the class picker
//! and, more importantly, the sequence in which match numbers are generated.
//!
//! ## Ordering Rules
//!
//! 1. Pemula classes before prestasi classes
//! 2. Within each level, more approved participants first
//! 3. Remaining ties keep their input order
//!
//! Rule 3 relies on `sort_by` being stable. Preview and generation must
//! agree exactly, so no unstable sort may ever be used here.

use crate::types::{ChampionshipClass, Level};
use std::cmp::{Ordering, Reverse};

/// Orders classes for numbering.
///
/// # Arguments
///
/// * `classes` - The classes assigned to a court, in assignment order
///
/// # Returns
///
/// The same classes, pemula first, then by descending participant count.
#[must_use]
pub fn order_classes(mut classes: Vec<ChampionshipClass>) -> Vec<ChampionshipClass> {
    classes.sort_by(compare_classes);
    classes
}

const fn level_rank(level: Level) -> u8 {
    match level {
        Level::Pemula => 0,
        Level::Prestasi => 1,
    }
}

fn compare_classes(a: &ChampionshipClass, b: &ChampionshipClass) -> Ordering {
    (level_rank(a.level), Reverse(a.approved_participants))
        .cmp(&(level_rank(b.level), Reverse(b.approved_participants)))
}
