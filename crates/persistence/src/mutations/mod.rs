// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations for the persistence layer.
//!
//! ## Module Organization
//!
//! - `seed`: Competitions, days, courts, classes and brackets
//! - `assignment`: Ordered class assignment for a court
//! - `numbering`: Match numbers, day tags and queue state
//!
//! Every multi-row write runs in its own transaction.

pub mod assignment;
pub mod numbering;
pub mod seed;
