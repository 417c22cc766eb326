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

mod class_order;
mod day;
mod error;
mod numbering;
mod queue;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use class_order::order_classes;
pub use day::{DATE_FORMAT, day_index, format_date, parse_date};
pub use error::DomainError;
pub use numbering::{MatchAssignment, MatchNumberRange, NumberingPlan, plan_numbering};
pub use queue::{QueueState, derive_from_bertanding, derive_initial};
pub use types::{
    Bracket, BracketKind, BracketMatch, Branch, ChampionshipClass, Court, Level, MatchStatus,
};
pub use validation::{validate_court_assignment, validate_day, validate_starting_number};
