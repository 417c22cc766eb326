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
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod live;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{FromRef, Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use clap::Parser;
use futures::future::join_all;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::collections::BTreeMap;
use std::sync::Arc;
use tanding::{CourtGuard, CourtLease};
use tanding_api::{
    ApiError, AssignClassesRequest, AssignClassesResponse, ClassBracketInfo,
    CourtBracketInfoResponse, GenerateNumbersRequest, GenerateNumbersResponse, ListCourtsRequest,
    ListCourtsResponse, NumberingPreviewResponse, PendingPipelines, QueueStateRequest,
    QueueStateResponse, ResetRequest, ResetResponse, SetBertandingRequest, acquire_court,
    assign_classes, court_class_ids, generate_numbers, get_class_bracket_info,
    get_numbering_preview, get_queue_state, list_courts, reset_and_rezero, reset_numbers,
    resume_numbering, set_bertanding, set_queue_state,
};
use tanding_domain::QueueState;
use tanding_persistence::Persistence;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::live::{LiveEvent, LiveEventBroadcaster, live_events_handler};

/// Tanding Server - match numbering and queue control for competition courts
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The single store connection.
    persistence: Arc<Mutex<Persistence>>,
    /// Rejects overlapping numbering, reset and assignment runs per court.
    ///
    /// Handlers claim the court before waiting on the store, so a request
    /// that overlaps one already queued for the same court gets 409.
    guard: CourtGuard,
    /// Failed numbering runs awaiting resume.
    pending: Arc<Mutex<PendingPipelines>>,
    /// Live event fan-out for venue displays.
    live: Arc<LiveEventBroadcaster>,
}

impl AppState {
    fn new(persistence: Persistence) -> Self {
        Self {
            persistence: Arc::new(Mutex::new(persistence)),
            guard: CourtGuard::new(),
            pending: Arc::new(Mutex::new(PendingPipelines::new())),
            live: Arc::new(LiveEventBroadcaster::new()),
        }
    }
}

impl FromRef<AppState> for Arc<LiveEventBroadcaster> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.live)
    }
}

/// Query parameters for the numbering preview.
#[derive(Debug, Deserialize)]
struct PreviewQuery {
    /// The first match number.
    starting_number: Option<i64>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::PartialPipelineFailure { .. } | ApiError::Internal { .. } => {
                error!(error = %err, "Request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for HttpError {
    fn from(err: serde_json::Error) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: format!("Invalid request body: {err}"),
        }
    }
}

/// Parses a JSON body that may be omitted entirely.
fn parse_optional_body<T: DeserializeOwned + Default>(body: &[u8]) -> Result<T, HttpError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    Ok(serde_json::from_slice(body)?)
}

fn queue_event(response: &QueueStateResponse) -> LiveEvent {
    LiveEvent::QueueStateChanged {
        court_id: response.court_id,
        bertanding: response.bertanding,
        persiapan: response.persiapan,
        pemanasan: response.pemanasan,
    }
}

/// Handler for GET `/courts` endpoint.
async fn handle_list_courts(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListCourtsRequest>,
) -> Result<Json<ListCourtsResponse>, HttpError> {
    info!(
        competition_id = query.competition_id,
        date = ?query.date,
        "Handling list_courts request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: ListCourtsResponse = list_courts(&mut persistence, &query)?;
    Ok(Json(response))
}

/// Handler for GET `/courts/{court_id}/numbering-preview` endpoint.
async fn handle_numbering_preview(
    AxumState(app_state): AxumState<AppState>,
    Path(court_id): Path<i64>,
    Query(query): Query<PreviewQuery>,
) -> Result<Json<NumberingPreviewResponse>, HttpError> {
    info!(
        court_id,
        starting_number = ?query.starting_number,
        "Handling numbering_preview request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: NumberingPreviewResponse =
        get_numbering_preview(&mut persistence, court_id, query.starting_number)?;
    Ok(Json(response))
}

/// Handler for POST `/courts/{court_id}/generate-numbers` endpoint.
///
/// The body is optional; an empty body uses starting number 1 and the
/// court's day.
async fn handle_generate_numbers(
    AxumState(app_state): AxumState<AppState>,
    Path(court_id): Path<i64>,
    body: Bytes,
) -> Result<Json<GenerateNumbersResponse>, HttpError> {
    let request: GenerateNumbersRequest = parse_optional_body(&body)?;
    info!(
        court_id,
        starting_number = ?request.starting_number,
        day = ?request.day,
        "Handling generate_numbers request"
    );

    let lease: CourtLease = acquire_court(&app_state.guard, court_id)?;
    let mut persistence = app_state.persistence.lock().await;
    let mut pending = app_state.pending.lock().await;
    let response: GenerateNumbersResponse =
        generate_numbers(&mut persistence, &lease, &mut pending, &request)?;
    drop(pending);
    drop(persistence);
    drop(lease);

    broadcast_generated(&app_state, court_id, &response);
    Ok(Json(response))
}

/// Handler for POST `/courts/{court_id}/generate-numbers/resume` endpoint.
async fn handle_resume_numbering(
    AxumState(app_state): AxumState<AppState>,
    Path(court_id): Path<i64>,
) -> Result<Json<GenerateNumbersResponse>, HttpError> {
    info!(court_id, "Handling resume_numbering request");

    let lease: CourtLease = acquire_court(&app_state.guard, court_id)?;
    let mut persistence = app_state.persistence.lock().await;
    let mut pending = app_state.pending.lock().await;
    let response: GenerateNumbersResponse =
        resume_numbering(&mut persistence, &lease, &mut pending)?;
    drop(pending);
    drop(persistence);
    drop(lease);

    broadcast_generated(&app_state, court_id, &response);
    Ok(Json(response))
}

fn broadcast_generated(app_state: &AppState, court_id: i64, response: &GenerateNumbersResponse) {
    app_state.live.broadcast(&LiveEvent::NumbersGenerated {
        court_id,
        range: response.range.clone(),
        total_matches: response.total_matches,
        day: response.day,
    });
    if response.warnings.is_empty() {
        let queue: QueueState = QueueState::initial();
        app_state.live.broadcast(&LiveEvent::QueueStateChanged {
            court_id,
            bertanding: queue.bertanding,
            persiapan: queue.persiapan,
            pemanasan: queue.pemanasan,
        });
    } else {
        warn!(court_id, warnings = ?response.warnings, "Numbering finished with warnings");
    }
}

/// Handler for DELETE `/courts/{court_id}/numbers` endpoint.
///
/// Clears numbers only; the queue is untouched.
async fn handle_reset_numbers(
    AxumState(app_state): AxumState<AppState>,
    Path(court_id): Path<i64>,
    body: Bytes,
) -> Result<Json<ResetResponse>, HttpError> {
    let request: ResetRequest = parse_optional_body(&body)?;
    info!(court_id, confirm = request.confirm, "Handling reset_numbers request");

    let lease: CourtLease = acquire_court(&app_state.guard, court_id)?;
    let mut persistence = app_state.persistence.lock().await;
    let mut pending = app_state.pending.lock().await;
    let response: ResetResponse = reset_numbers(&mut persistence, &lease, &mut pending, &request)?;
    drop(pending);
    drop(persistence);
    drop(lease);

    app_state.live.broadcast(&LiveEvent::NumbersReset {
        court_id,
        queue_zeroed: false,
    });
    Ok(Json(response))
}

/// Handler for POST `/courts/{court_id}/reset` endpoint.
///
/// Clears numbers and zeroes the queue.
async fn handle_reset_and_rezero(
    AxumState(app_state): AxumState<AppState>,
    Path(court_id): Path<i64>,
    body: Bytes,
) -> Result<Json<ResetResponse>, HttpError> {
    let request: ResetRequest = parse_optional_body(&body)?;
    info!(court_id, confirm = request.confirm, "Handling reset request");

    let lease: CourtLease = acquire_court(&app_state.guard, court_id)?;
    let mut persistence = app_state.persistence.lock().await;
    let mut pending = app_state.pending.lock().await;
    let response: ResetResponse =
        reset_and_rezero(&mut persistence, &lease, &mut pending, &request)?;
    drop(pending);
    drop(persistence);
    drop(lease);

    app_state.live.broadcast(&LiveEvent::NumbersReset {
        court_id,
        queue_zeroed: true,
    });
    app_state.live.broadcast(&LiveEvent::QueueStateChanged {
        court_id,
        bertanding: 0,
        persiapan: 0,
        pemanasan: 0,
    });
    Ok(Json(response))
}

/// Handler for GET `/courts/{court_id}/queue-state` endpoint.
async fn handle_get_queue_state(
    AxumState(app_state): AxumState<AppState>,
    Path(court_id): Path<i64>,
) -> Result<Json<QueueStateResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: QueueStateResponse = get_queue_state(&mut persistence, court_id)?;
    Ok(Json(response))
}

/// Handler for POST `/courts/{court_id}/queue-state` endpoint.
///
/// Saves all three slots as given.
async fn handle_set_queue_state(
    AxumState(app_state): AxumState<AppState>,
    Path(court_id): Path<i64>,
    Json(req): Json<QueueStateRequest>,
) -> Result<Json<QueueStateResponse>, HttpError> {
    info!(
        court_id,
        bertanding = req.bertanding,
        persiapan = req.persiapan,
        pemanasan = req.pemanasan,
        "Handling set_queue_state request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: QueueStateResponse = set_queue_state(&mut persistence, court_id, &req)?;
    drop(persistence);

    app_state.live.broadcast(&queue_event(&response));
    Ok(Json(response))
}

/// Handler for POST `/courts/{court_id}/queue-state/bertanding` endpoint.
async fn handle_set_bertanding(
    AxumState(app_state): AxumState<AppState>,
    Path(court_id): Path<i64>,
    Json(req): Json<SetBertandingRequest>,
) -> Result<Json<QueueStateResponse>, HttpError> {
    info!(court_id, bertanding = req.bertanding, "Handling set_bertanding request");

    let mut persistence = app_state.persistence.lock().await;
    let response: QueueStateResponse = set_bertanding(&mut persistence, court_id, &req)?;
    drop(persistence);

    app_state.live.broadcast(&queue_event(&response));
    Ok(Json(response))
}

async fn fetch_class_info(app_state: &AppState, class_id: i64) -> Result<ClassBracketInfo, ApiError> {
    let mut persistence = app_state.persistence.lock().await;
    get_class_bracket_info(&mut persistence, class_id)
}

/// Handler for GET `/courts/{court_id}/bracket-info` endpoint.
///
/// Issues one fetch per class. The fetches share the single store
/// connection, so they complete one at a time. A class that fails to load
/// is logged and left out of the map.
async fn handle_bracket_info(
    AxumState(app_state): AxumState<AppState>,
    Path(court_id): Path<i64>,
) -> Result<Json<CourtBracketInfoResponse>, HttpError> {
    info!(court_id, "Handling bracket_info request");

    let class_ids: Vec<i64> = {
        let mut persistence = app_state.persistence.lock().await;
        court_class_ids(&mut persistence, court_id)?
    };

    let results = join_all(
        class_ids
            .iter()
            .map(|&class_id| fetch_class_info(&app_state, class_id)),
    )
    .await;

    let mut classes: BTreeMap<i64, ClassBracketInfo> = BTreeMap::new();
    for (class_id, result) in class_ids.into_iter().zip(results) {
        match result {
            Ok(info) => {
                classes.insert(class_id, info);
            }
            Err(e) => {
                warn!(court_id, class_id, error = %e, "Failed to load class bracket info");
            }
        }
    }

    Ok(Json(CourtBracketInfoResponse { court_id, classes }))
}

/// Handler for PUT `/courts/{court_id}/classes` endpoint.
async fn handle_assign_classes(
    AxumState(app_state): AxumState<AppState>,
    Path(court_id): Path<i64>,
    Json(req): Json<AssignClassesRequest>,
) -> Result<Json<AssignClassesResponse>, HttpError> {
    info!(court_id, class_ids = ?req.class_ids, "Handling assign_classes request");

    let lease: CourtLease = acquire_court(&app_state.guard, court_id)?;
    let mut persistence = app_state.persistence.lock().await;
    let mut pending = app_state.pending.lock().await;
    let response: AssignClassesResponse =
        assign_classes(&mut persistence, &lease, &mut pending, &req)?;
    drop(pending);
    drop(persistence);
    drop(lease);
    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/courts", get(handle_list_courts))
        .route(
            "/courts/{court_id}/numbering-preview",
            get(handle_numbering_preview),
        )
        .route(
            "/courts/{court_id}/generate-numbers",
            post(handle_generate_numbers),
        )
        .route(
            "/courts/{court_id}/generate-numbers/resume",
            post(handle_resume_numbering),
        )
        .route("/courts/{court_id}/numbers", delete(handle_reset_numbers))
        .route("/courts/{court_id}/reset", post(handle_reset_and_rezero))
        .route(
            "/courts/{court_id}/queue-state",
            get(handle_get_queue_state).post(handle_set_queue_state),
        )
        .route(
            "/courts/{court_id}/queue-state/bertanding",
            post(handle_set_bertanding),
        )
        .route("/courts/{court_id}/bracket-info", get(handle_bracket_info))
        .route("/courts/{court_id}/classes", put(handle_assign_classes))
        .route("/live", get(live_events_handler))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Tanding Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app: Router = build_router(AppState::new(persistence));

    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests;
