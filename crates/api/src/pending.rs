// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::HashMap;
use tanding::{NumberingPipeline, PipelineStage};
use tracing::debug;

/// Numbering pipelines that stopped at a failed step, one per court.
///
/// A court's entry is replaced by the next generation and dropped by a
/// reset, a completed run or a change to the classes it planned for.
#[derive(Debug, Default)]
pub struct PendingPipelines {
    pipelines: HashMap<i64, NumberingPipeline>,
}

impl PendingPipelines {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the pipeline if it failed, otherwise forgets the court.
    pub fn record(&mut self, pipeline: NumberingPipeline) {
        let court_id: i64 = pipeline.court_id();
        if matches!(pipeline.stage(), PipelineStage::Failed { .. }) {
            self.pipelines.insert(court_id, pipeline);
        } else {
            self.pipelines.remove(&court_id);
        }
    }

    /// Takes the failed pipeline of a court, if any.
    pub fn take(&mut self, court_id: i64) -> Option<NumberingPipeline> {
        self.pipelines.remove(&court_id)
    }

    /// Forgets any failed pipeline of a court.
    pub fn discard(&mut self, court_id: i64) {
        self.pipelines.remove(&court_id);
    }

    /// Forgets every failed pipeline that planned numbers for any of the
    /// given classes.
    pub fn discard_classes(&mut self, class_ids: &[i64]) {
        self.pipelines.retain(|court_id, pipeline| {
            let stale: bool = pipeline.class_ids().iter().any(|id| class_ids.contains(id));
            if stale {
                debug!(court_id = *court_id, "Dropped failed numbering run for reassigned classes");
            }
            !stale
        });
    }

    /// Returns the stage of a court's failed pipeline.
    #[must_use]
    pub fn stage(&self, court_id: i64) -> Option<&PipelineStage> {
        self.pipelines.get(&court_id).map(NumberingPipeline::stage)
    }
}
