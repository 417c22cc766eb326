// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode as HttpStatusCode},
};
use tanding_domain::{Bracket, BracketKind, BracketMatch, Branch, ChampionshipClass, Level};
use time::macros::date;
use tower::ServiceExt;

struct TestCourt {
    app_state: AppState,
    competition_id: i64,
    court_id: i64,
    class_ids: Vec<i64>,
}

fn bracket(matches: Vec<BracketMatch>) -> Bracket {
    Bracket::new(BracketKind::Single, matches)
}

/// One court on the second competition day with PEMULA-A (2 matches),
/// PEMULA-B (4 matches, one bye) and PRESTASI-X (7 matches).
fn create_test_court() -> TestCourt {
    let mut persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");

    let competition_id: i64 = persistence.create_competition("Kejurnas 2026").unwrap();
    persistence
        .add_competition_day(competition_id, date!(2026 - 03 - 14))
        .unwrap();
    persistence
        .add_competition_day(competition_id, date!(2026 - 03 - 15))
        .unwrap();
    let court_id: i64 = persistence
        .create_court(competition_id, date!(2026 - 03 - 15), "Lapangan A")
        .unwrap();

    let pemula_a = ChampionshipClass::new(0, "PEMULA-A", Branch::Kyorugi, Level::Pemula, 3)
        .with_bracket(bracket(vec![
            BracketMatch::new(0, 1, 1, Some(1), Some(2)),
            BracketMatch::new(0, 2, 1, None, None),
        ]));
    let pemula_b = ChampionshipClass::new(0, "PEMULA-B", Branch::Kyorugi, Level::Pemula, 5)
        .with_bracket(bracket(vec![
            BracketMatch::new(0, 1, 1, Some(11), Some(12)),
            BracketMatch::new(0, 1, 2, Some(13), Some(14)),
            BracketMatch::new(0, 1, 3, Some(15), None),
            BracketMatch::new(0, 2, 1, None, None),
        ]));
    let mut x_matches: Vec<BracketMatch> = (1..=4_u32)
        .map(|p| BracketMatch::new(0, 1, p, Some(20 + i64::from(p) * 2), Some(21 + i64::from(p) * 2)))
        .collect();
    x_matches.extend([
        BracketMatch::new(0, 2, 1, None, None),
        BracketMatch::new(0, 2, 2, None, None),
        BracketMatch::new(0, 3, 1, None, None),
    ]);
    let prestasi_x = ChampionshipClass::new(0, "PRESTASI-X", Branch::Kyorugi, Level::Prestasi, 8)
        .with_bracket(bracket(x_matches));

    let class_ids: Vec<i64> = [pemula_a, pemula_b, prestasi_x]
        .iter()
        .map(|class| persistence.create_class(competition_id, class).unwrap())
        .collect();
    persistence.assign_classes(court_id, &class_ids).unwrap();

    TestCourt {
        app_state: AppState::new(persistence),
        competition_id,
        court_id,
        class_ids,
    }
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    app.clone()
        .oneshot(
            builder
                .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn read_json<T: DeserializeOwned>(response: Response) -> T {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}

#[tokio::test]
async fn test_preview_then_generate_then_queue() {
    let court: TestCourt = create_test_court();
    let app: Router = build_router(court.app_state.clone());
    let id: i64 = court.court_id;

    let response = send(&app, "GET", &format!("/courts/{id}/numbering-preview"), None).await;
    assert_eq!(response.status(), HttpStatusCode::OK);
    let preview: NumberingPreviewResponse = read_json(response).await;
    assert_eq!(preview.total_matches, 12);
    assert_eq!(preview.total_bye_skipped, 1);
    assert_eq!(preview.range, "1-12");
    assert_eq!(preview.summary.pemula.len(), 2);
    assert_eq!(preview.summary.prestasi.len(), 1);

    let response = send(&app, "POST", &format!("/courts/{id}/generate-numbers"), Some("{}")).await;
    assert_eq!(response.status(), HttpStatusCode::OK);
    let generated: GenerateNumbersResponse = read_json(response).await;
    assert!(generated.success);
    assert_eq!(generated.range, preview.range);
    assert_eq!(generated.total_matches, preview.total_matches);
    assert_eq!(generated.day, 2);

    let response = send(&app, "GET", &format!("/courts/{id}/queue-state"), None).await;
    let queue: QueueStateResponse = read_json(response).await;
    assert_eq!(
        (queue.bertanding, queue.persiapan, queue.pemanasan),
        (1, 2, 3)
    );

    let response = send(
        &app,
        "POST",
        &format!("/courts/{id}/queue-state/bertanding"),
        Some(r#"{"bertanding": 6}"#),
    )
    .await;
    assert_eq!(response.status(), HttpStatusCode::OK);
    let queue: QueueStateResponse = read_json(response).await;
    assert_eq!(
        (queue.bertanding, queue.persiapan, queue.pemanasan),
        (6, 7, 8)
    );
}

#[tokio::test]
async fn test_generate_without_body_uses_defaults() {
    let court: TestCourt = create_test_court();
    let app: Router = build_router(court.app_state.clone());

    let response = send(
        &app,
        "POST",
        &format!("/courts/{}/generate-numbers", court.court_id),
        None,
    )
    .await;

    assert_eq!(response.status(), HttpStatusCode::OK);
    let generated: GenerateNumbersResponse = read_json(response).await;
    assert_eq!(generated.range, "1-12");
}

#[tokio::test]
async fn test_generate_broadcasts_live_events() {
    let court: TestCourt = create_test_court();
    let mut rx = court.app_state.live.subscribe();
    let app: Router = build_router(court.app_state.clone());

    send(
        &app,
        "POST",
        &format!("/courts/{}/generate-numbers", court.court_id),
        Some(r#"{"starting_number": 10}"#),
    )
    .await;

    assert_eq!(
        rx.try_recv().unwrap(),
        LiveEvent::NumbersGenerated {
            court_id: court.court_id,
            range: String::from("10-21"),
            total_matches: 12,
            day: 2,
        }
    );
    assert!(matches!(
        rx.try_recv().unwrap(),
        LiveEvent::QueueStateChanged { bertanding: 1, .. }
    ));
}

#[tokio::test]
async fn test_invalid_starting_number_is_bad_request() {
    let court: TestCourt = create_test_court();
    let app: Router = build_router(court.app_state.clone());

    let response = send(
        &app,
        "GET",
        &format!("/courts/{}/numbering-preview?starting_number=0", court.court_id),
        None,
    )
    .await;

    assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
    let error: ErrorResponse = read_json(response).await;
    assert!(error.error);
    assert!(error.message.contains("starting_number"));
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let court: TestCourt = create_test_court();
    let app: Router = build_router(court.app_state.clone());

    let response = send(
        &app,
        "POST",
        &format!("/courts/{}/reset", court.court_id),
        Some("{confirm"),
    )
    .await;

    assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reset_requires_confirmation() {
    let court: TestCourt = create_test_court();
    let app: Router = build_router(court.app_state.clone());

    let response = send(&app, "POST", &format!("/courts/{}/reset", court.court_id), None).await;

    assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
    let error: ErrorResponse = read_json(response).await;
    assert!(error.message.contains("confirm"));
}

#[tokio::test]
async fn test_reset_endpoints() {
    let court: TestCourt = create_test_court();
    let app: Router = build_router(court.app_state.clone());
    let id: i64 = court.court_id;
    send(&app, "POST", &format!("/courts/{id}/generate-numbers"), None).await;

    let response = send(
        &app,
        "DELETE",
        &format!("/courts/{id}/numbers"),
        Some(r#"{"confirm": true}"#),
    )
    .await;
    assert_eq!(response.status(), HttpStatusCode::OK);
    let reset: ResetResponse = read_json(response).await;
    assert!(reset.success);
    let queue: QueueStateResponse =
        read_json(send(&app, "GET", &format!("/courts/{id}/queue-state"), None).await).await;
    assert_eq!(queue.bertanding, 1);

    let response = send(
        &app,
        "POST",
        &format!("/courts/{id}/reset"),
        Some(r#"{"confirm": true}"#),
    )
    .await;
    assert_eq!(response.status(), HttpStatusCode::OK);
    let queue: QueueStateResponse =
        read_json(send(&app, "GET", &format!("/courts/{id}/queue-state"), None).await).await;
    assert_eq!(
        (queue.bertanding, queue.persiapan, queue.pemanasan),
        (0, 0, 0)
    );
}

#[tokio::test]
async fn test_manual_queue_state() {
    let court: TestCourt = create_test_court();
    let app: Router = build_router(court.app_state.clone());

    let response = send(
        &app,
        "POST",
        &format!("/courts/{}/queue-state", court.court_id),
        Some(r#"{"bertanding": 3, "persiapan": 5, "pemanasan": 4}"#),
    )
    .await;

    assert_eq!(response.status(), HttpStatusCode::OK);
    let queue: QueueStateResponse = read_json(response).await;
    assert!(queue.success);
    assert_eq!(
        (queue.bertanding, queue.persiapan, queue.pemanasan),
        (3, 5, 4)
    );
}

#[tokio::test]
async fn test_unknown_court_is_not_found() {
    let court: TestCourt = create_test_court();
    let app: Router = build_router(court.app_state.clone());

    let response = send(&app, "GET", "/courts/9999/numbering-preview", None).await;

    assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_bracket_blocks_generation() {
    let court: TestCourt = create_test_court();
    let undrawn: i64 = {
        let mut persistence = court.app_state.persistence.lock().await;
        persistence
            .create_class(
                court.competition_id,
                &ChampionshipClass::new(0, "PEMULA-C", Branch::Poomsae, Level::Pemula, 2),
            )
            .unwrap()
    };
    let app: Router = build_router(court.app_state.clone());
    let id: i64 = court.court_id;

    let mut class_ids: Vec<i64> = court.class_ids.clone();
    class_ids.push(undrawn);
    let body: String = serde_json::json!({ "class_ids": class_ids }).to_string();
    let response = send(&app, "PUT", &format!("/courts/{id}/classes"), Some(&body)).await;
    assert_eq!(response.status(), HttpStatusCode::OK);

    let preview: NumberingPreviewResponse =
        read_json(send(&app, "GET", &format!("/courts/{id}/numbering-preview"), None).await)
            .await;
    assert_eq!(preview.missing_brackets, vec![undrawn]);

    let response = send(&app, "POST", &format!("/courts/{id}/generate-numbers"), None).await;
    assert_eq!(response.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_overlapping_court_requests_conflict() {
    let court: TestCourt = create_test_court();
    let app: Router = build_router(court.app_state.clone());
    let id: i64 = court.court_id;
    let generate_uri: String = format!("/courts/{id}/generate-numbers");

    // Hold the store so the first request claims the court and then waits.
    let store = court.app_state.persistence.lock().await;
    let first = tokio::spawn({
        let app: Router = app.clone();
        let uri: String = generate_uri.clone();
        async move { send(&app, "POST", &uri, None).await.status() }
    });
    while !court.app_state.guard.is_busy(id) {
        tokio::task::yield_now().await;
    }

    let second = send(&app, "POST", &generate_uri, None).await;
    assert_eq!(second.status(), HttpStatusCode::CONFLICT);
    let reset = send(
        &app,
        "POST",
        &format!("/courts/{id}/reset"),
        Some(r#"{"confirm": true}"#),
    )
    .await;
    assert_eq!(reset.status(), HttpStatusCode::CONFLICT);
    let body: String = serde_json::json!({ "class_ids": [court.class_ids[0]] }).to_string();
    let assign = send(&app, "PUT", &format!("/courts/{id}/classes"), Some(&body)).await;
    assert_eq!(assign.status(), HttpStatusCode::CONFLICT);

    drop(store);
    assert_eq!(first.await.unwrap(), HttpStatusCode::OK);
    assert!(!court.app_state.guard.is_busy(id));

    let again = send(&app, "POST", &generate_uri, None).await;
    assert_eq!(again.status(), HttpStatusCode::OK);
}

#[tokio::test]
async fn test_resume_without_failed_run_is_not_found() {
    let court: TestCourt = create_test_court();
    let app: Router = build_router(court.app_state.clone());

    let response = send(
        &app,
        "POST",
        &format!("/courts/{}/generate-numbers/resume", court.court_id),
        None,
    )
    .await;

    assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bracket_info_merges_classes() {
    let court: TestCourt = create_test_court();
    let app: Router = build_router(court.app_state.clone());

    let response = send(
        &app,
        "GET",
        &format!("/courts/{}/bracket-info", court.court_id),
        None,
    )
    .await;

    assert_eq!(response.status(), HttpStatusCode::OK);
    let info: CourtBracketInfoResponse = read_json(response).await;
    assert_eq!(info.classes.len(), 3);
    assert_eq!(info.classes[&court.class_ids[1]].bye_count, 1);
    assert_eq!(info.classes[&court.class_ids[2]].match_count, 7);
}

#[tokio::test]
async fn test_list_courts_by_date() {
    let court: TestCourt = create_test_court();
    let app: Router = build_router(court.app_state.clone());

    let response = send(
        &app,
        "GET",
        &format!(
            "/courts?competition_id={}&date=2026-03-15",
            court.competition_id
        ),
        None,
    )
    .await;

    assert_eq!(response.status(), HttpStatusCode::OK);
    let listing: ListCourtsResponse = read_json(response).await;
    assert_eq!(listing.courts.len(), 1);
    assert_eq!(listing.courts[0].class_ids, court.class_ids);
}

#[tokio::test]
async fn test_bertanding_without_room_is_bad_request() {
    let court: TestCourt = create_test_court();
    let app: Router = build_router(court.app_state.clone());
    let body: String = serde_json::json!({ "bertanding": u32::MAX }).to_string();

    let response = send(
        &app,
        "POST",
        &format!("/courts/{}/queue-state/bertanding", court.court_id),
        Some(&body),
    )
    .await;

    assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
}
