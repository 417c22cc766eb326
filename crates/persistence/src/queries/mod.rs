// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries for the persistence layer.
//!
//! ## Module Organization
//!
//! - `courts`: Courts, competition days, class assignment and queue state
//! - `classes`: Championship classes with their brackets

pub mod classes;
pub mod courts;

use num_traits::cast::ToPrimitive;

use crate::error::PersistenceError;

/// Converts a stored integer column to a `u32` domain value.
pub(crate) fn column_u32(value: i64, column: &str) -> Result<u32, PersistenceError> {
    value
        .to_u32()
        .ok_or_else(|| PersistenceError::InvalidRow(format!("{column} out of range: {value}")))
}

/// Converts an optional stored integer column to a `u32` domain value.
pub(crate) fn column_opt_u32(
    value: Option<i64>,
    column: &str,
) -> Result<Option<u32>, PersistenceError> {
    value.map(|v| column_u32(v, column)).transpose()
}
