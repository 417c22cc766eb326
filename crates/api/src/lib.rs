// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for court match numbering.
//!
//! Handlers take the persistence layer explicitly, translate every lower
//! layer error into [`ApiError`] and return serializable response types.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod handlers;
mod pending;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    DEFAULT_STARTING_NUMBER, acquire_court, assign_classes, court_class_ids, generate_numbers,
    get_class_bracket_info, get_numbering_preview, get_queue_state, list_courts, reset_and_rezero,
    reset_numbers, resume_numbering, set_bertanding, set_queue_state,
};
pub use pending::PendingPipelines;
pub use request_response::{
    AssignClassesRequest, AssignClassesResponse, ClassBracketInfo, CourtBracketInfoResponse,
    CourtInfo, GenerateNumbersRequest, GenerateNumbersResponse, ListCourtsRequest,
    ListCourtsResponse, NumberingPreviewResponse, PreviewSummary, QueueStateRequest,
    QueueStateResponse, RangeInfo, ResetRequest, ResetResponse, SetBertandingRequest,
};
