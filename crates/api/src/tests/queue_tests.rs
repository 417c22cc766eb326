// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::create_seeded_persistence;
use crate::{
    ApiError, QueueStateRequest, QueueStateResponse, SetBertandingRequest, get_queue_state,
    set_bertanding, set_queue_state,
};

#[test]
fn test_unsaved_queue_reads_as_zero() {
    let (mut persistence, seeded) = create_seeded_persistence();

    let queue: QueueStateResponse = get_queue_state(&mut persistence, seeded.court_id).unwrap();

    assert_eq!(
        (queue.bertanding, queue.persiapan, queue.pemanasan),
        (0, 0, 0)
    );
}

#[test]
fn test_set_bertanding_derives_next_slots() {
    let (mut persistence, seeded) = create_seeded_persistence();

    for (k, expected) in [(0, (0, 1, 2)), (1, (1, 2, 3)), (100, (100, 101, 102))] {
        let response: QueueStateResponse = set_bertanding(
            &mut persistence,
            seeded.court_id,
            &SetBertandingRequest { bertanding: k },
        )
        .unwrap();

        assert!(response.success);
        assert_eq!(
            (response.bertanding, response.persiapan, response.pemanasan),
            expected
        );
    }
}

#[test]
fn test_set_bertanding_without_room_for_next_slots_is_rejected() {
    let (mut persistence, seeded) = create_seeded_persistence();
    set_bertanding(
        &mut persistence,
        seeded.court_id,
        &SetBertandingRequest { bertanding: 7 },
    )
    .unwrap();

    let result = set_bertanding(
        &mut persistence,
        seeded.court_id,
        &SetBertandingRequest {
            bertanding: u32::MAX,
        },
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "bertanding"
    ));
    let queue: QueueStateResponse = get_queue_state(&mut persistence, seeded.court_id).unwrap();
    assert_eq!(
        (queue.bertanding, queue.persiapan, queue.pemanasan),
        (7, 8, 9)
    );
}

#[test]
fn test_manual_queue_state_is_stored_as_given() {
    let (mut persistence, seeded) = create_seeded_persistence();

    set_queue_state(
        &mut persistence,
        seeded.court_id,
        &QueueStateRequest {
            bertanding: 4,
            persiapan: 9,
            pemanasan: 2,
        },
    )
    .unwrap();

    let queue: QueueStateResponse = get_queue_state(&mut persistence, seeded.court_id).unwrap();
    assert_eq!(
        (queue.bertanding, queue.persiapan, queue.pemanasan),
        (4, 9, 2)
    );
}

#[test]
fn test_queue_of_unknown_court_is_not_found() {
    let (mut persistence, _) = create_seeded_persistence();

    let read = get_queue_state(&mut persistence, 77);
    let write = set_bertanding(&mut persistence, 77, &SetBertandingRequest { bertanding: 3 });

    assert!(matches!(read, Err(ApiError::ResourceNotFound { .. })));
    assert!(matches!(write, Err(ApiError::ResourceNotFound { .. })));
}
