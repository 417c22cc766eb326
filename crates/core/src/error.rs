// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::pipeline::PipelineStep;
use tanding_domain::DomainError;

/// Errors that can occur while planning or coordinating court numbering.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A domain rule was violated.
    #[error("Domain violation: {0}")]
    DomainViolation(#[from] DomainError),
    /// Another numbering or reset operation holds the court.
    #[error("Court {court_id} already has a numbering operation in progress")]
    CourtBusy {
        /// The contended court.
        court_id: i64,
    },
    /// The pipeline was asked to run from a stage it cannot run from.
    #[error("Pipeline cannot run from stage '{stage}'")]
    InvalidPipelineStage {
        /// The current stage.
        stage: String,
    },
    /// A pipeline step failed after earlier steps were persisted.
    #[error("Numbering failed at step '{step}': {message}")]
    PipelineFailed {
        /// The step that failed.
        step: PipelineStep,
        /// Operator-facing description of the failure.
        message: String,
    },
}
