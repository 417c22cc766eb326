// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

/// Tracks courts with a numbering or reset operation in flight.
///
/// A second operation on a busy court is rejected rather than queued.
/// Cloning shares the same set of busy courts.
#[derive(Debug, Clone, Default)]
pub struct CourtGuard {
    busy: Arc<Mutex<HashSet<i64>>>,
}

impl CourtGuard {
    /// Creates a guard with no busy courts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a court busy for the lifetime of the returned lease.
    ///
    /// # Errors
    ///
    /// Returns `CourtBusy` if the court already has a lease.
    pub fn acquire(&self, court_id: i64) -> Result<CourtLease, CoreError> {
        if !self.lock().insert(court_id) {
            debug!(court_id, "Rejected concurrent court operation");
            return Err(CoreError::CourtBusy { court_id });
        }
        Ok(CourtLease {
            court_id,
            busy: Arc::clone(&self.busy),
        })
    }

    /// Returns whether the court currently has a lease.
    #[must_use]
    pub fn is_busy(&self, court_id: i64) -> bool {
        self.lock().contains(&court_id)
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<i64>> {
        // The set stays consistent even if a holder panicked.
        self.busy
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// Exclusive right to run a numbering operation on one court.
///
/// The court is released when the lease is dropped.
#[derive(Debug)]
pub struct CourtLease {
    court_id: i64,
    busy: Arc<Mutex<HashSet<i64>>>,
}

impl CourtLease {
    /// Returns the leased court.
    #[must_use]
    pub const fn court_id(&self) -> i64 {
        self.court_id
    }
}

impl Drop for CourtLease {
    fn drop(&mut self) {
        self.busy
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .remove(&self.court_id);
    }
}
