// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ApiError;
use crate::operations::{commit_reservation, preview_code};
use crate::request_response::{CommitReservationRequest, CommitReservationResponse};
use crate::state::ApplicationState;
use crate::tests::helpers::{
    NOW, create_commit_request, create_test_persistence, create_test_state,
};
use vg_booking_domain::Season;
use vg_booking_persistence::Persistence;

#[test]
fn test_commit_allocates_lowest_free_code() {
    let mut state: ApplicationState = create_test_state();
    let mut persistence: Persistence = create_test_persistence();

    let response: CommitReservationResponse = commit_reservation(
        &mut state,
        &mut persistence,
        &create_commit_request("vicente", "2026-01-15"),
        NOW,
    )
    .unwrap();

    assert_eq!(response.code, "B1");
    assert_eq!(response.group_number, "1");
    assert_eq!(response.vendor, "Vicente");
    assert_eq!(response.quote.season, Season::High);
    assert!(response.remote.is_persisted());

    // Local cache mirrors the commit.
    assert_eq!(state.cache.passengers.len(), 1);
    assert_eq!(state.cache.payments.len(), 1);
    assert_eq!(state.cache.history.len(), 1);

    // Remote store carries the rows.
    let headers = persistence.fetch_reservations().unwrap();
    assert_eq!(headers.len(), 1);
    assert_eq!(headers[0].code, "B1");
    assert_eq!(headers[0].group_number, Some(1));
}

#[test]
fn test_commit_keeps_free_candidate_code() {
    let mut state: ApplicationState = create_test_state();
    let mut persistence: Persistence = create_test_persistence();

    let mut request: CommitReservationRequest = create_commit_request("vicente", "2026-01-15");
    request.candidate_code = String::from("B5");

    let response: CommitReservationResponse =
        commit_reservation(&mut state, &mut persistence, &request, NOW).unwrap();
    assert_eq!(response.code, "B5");

    // The next preview still reports the lowest free number.
    assert_eq!(preview_code(&state, "vicente").unwrap().code, "B1");
}

#[test]
fn test_validation_failure_changes_nothing() {
    let mut state: ApplicationState = create_test_state();
    let mut persistence: Persistence = create_test_persistence();

    let mut request: CommitReservationRequest = create_commit_request("vicente", "");
    request.passengers.clear();
    request.payments[0].amount = -10;

    let result = commit_reservation(&mut state, &mut persistence, &request, NOW);
    match result {
        Err(ApiError::ValidationFailed { messages }) => {
            assert_eq!(messages.len(), 3);
        }
        other => panic!("Expected ValidationFailed, got {other:?}"),
    }

    // Validation aborts before any local or remote effect.
    assert!(state.cache.passengers.is_empty());
    assert!(state.cache.history.is_empty());
    assert!(persistence.fetch_reservations().unwrap().is_empty());
}

#[test]
fn test_commit_sequences_codes_across_commits() {
    let mut state: ApplicationState = create_test_state();
    let mut persistence: Persistence = create_test_persistence();

    for expected in ["B1", "B2", "B3"] {
        let response: CommitReservationResponse = commit_reservation(
            &mut state,
            &mut persistence,
            &create_commit_request("vicente", "2026-01-15"),
            NOW,
        )
        .unwrap();
        assert_eq!(response.code, expected);
    }

    // Three bookings on the same date take groups 1, 2, 3.
    let groups: Vec<String> = state
        .cache
        .passengers
        .iter()
        .map(|row| row.group_number.clone())
        .collect();
    assert_eq!(groups, vec!["1", "2", "3"]);
}

#[test]
fn test_concurrent_session_collision_surfaces_remote_failure() {
    // Another session committed B1 remotely; this session's cache has not
    // synced yet. The local commit still picks B1 but the unique code
    // column rejects the duplicate, and the partial state is surfaced as
    // "committed locally, failed remotely".
    let mut other_state: ApplicationState = create_test_state();
    let mut persistence: Persistence = create_test_persistence();
    commit_reservation(
        &mut other_state,
        &mut persistence,
        &create_commit_request("vicente", "2026-01-15"),
        NOW,
    )
    .unwrap();

    let mut stale_state: ApplicationState = create_test_state();
    let response: CommitReservationResponse = commit_reservation(
        &mut stale_state,
        &mut persistence,
        &create_commit_request("vicente", "2026-01-16"),
        NOW,
    )
    .unwrap();

    assert_eq!(response.code, "B1");
    assert!(!response.remote.is_persisted());
    // The local rows exist; the next sync reconciles them away.
    assert_eq!(stale_state.cache.passengers.len(), 1);
}

#[test]
fn test_commit_with_addon_prices_included_passengers() {
    let mut state: ApplicationState = create_test_state();
    let mut persistence: Persistence = create_test_persistence();

    let mut request: CommitReservationRequest = create_commit_request("eli", "2026-01-15");
    request.passengers[0].addon_included = true;
    request.addon_service = Some(String::from("FM"));
    request.addon_date = String::from("2026-01-16");
    request.addon_provider = String::from("Mármol Expediciones");

    let response: CommitReservationResponse =
        commit_reservation(&mut state, &mut persistence, &request, NOW).unwrap();

    assert_eq!(response.quote.addon_subtotal, 28_000);
    assert_eq!(state.cache.passengers[0].addon_value, 28_000);
    assert_eq!(
        state.cache.passengers[0].provider,
        "Mármol Expediciones"
    );
}

#[test]
fn test_commit_rejects_unknown_addon_service() {
    let mut state: ApplicationState = create_test_state();
    let mut persistence: Persistence = create_test_persistence();

    let mut request: CommitReservationRequest = create_commit_request("eli", "2026-01-15");
    request.addon_service = Some(String::from("XX"));

    let result = commit_reservation(&mut state, &mut persistence, &request, NOW);
    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_range_exhaustion_is_rejected_before_any_write() {
    let mut state: ApplicationState = create_test_state();
    let mut persistence: Persistence = create_test_persistence();

    // Shrink the vendor to a two-code range and use both.
    state.registry.upsert_override(
        &vg_booking_domain::VendorKey::new("vicente"),
        vg_booking_domain::VendorOverride {
            range_start: Some(1),
            range_end: Some(2),
            ..vg_booking_domain::VendorOverride::default()
        },
    );
    for _ in 0..2 {
        commit_reservation(
            &mut state,
            &mut persistence,
            &create_commit_request("vicente", "2026-01-15"),
            NOW,
        )
        .unwrap();
    }

    let result = commit_reservation(
        &mut state,
        &mut persistence,
        &create_commit_request("vicente", "2026-01-15"),
        NOW,
    );
    match result {
        Err(ApiError::DomainRuleViolation { rule, .. }) => {
            assert_eq!(rule, "code_range_exhausted");
        }
        other => panic!("Expected range exhaustion, got {other:?}"),
    }
    assert_eq!(persistence.fetch_reservations().unwrap().len(), 2);
}

#[test]
fn test_history_snapshot_captures_voucher() {
    let mut state: ApplicationState = create_test_state();
    let mut persistence: Persistence = create_test_persistence();

    let response: CommitReservationResponse = commit_reservation(
        &mut state,
        &mut persistence,
        &create_commit_request("vicente", "2026-01-15"),
        NOW,
    )
    .unwrap();

    let entry = &state.cache.history.entries()[0];
    assert_eq!(entry.code, response.code);
    assert_eq!(entry.vendor_key, "vicente");
    assert_eq!(entry.snapshot.grand_total, response.quote.grand_total);
    assert_eq!(entry.snapshot.passengers.len(), 1);
}
