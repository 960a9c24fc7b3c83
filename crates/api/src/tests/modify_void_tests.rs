// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ApiError;
use crate::operations::{
    commit_reservation, modify_reservation, preview_code, void_reservation,
};
use crate::request_response::{
    ModifyReservationRequest, ModifyReservationResponse, VoidReservationRequest,
    VoidReservationResponse,
};
use crate::state::ApplicationState;
use crate::tests::helpers::{
    NOW, create_commit_request, create_test_passenger, create_test_persistence, create_test_state,
};
use vg_booking_domain::PassengerCategory;
use vg_booking_persistence::Persistence;

const LATER: &str = "2026-01-21T09:00:00Z";

fn committed_fixture() -> (ApplicationState, Persistence) {
    let mut state: ApplicationState = create_test_state();
    let mut persistence: Persistence = create_test_persistence();
    commit_reservation(
        &mut state,
        &mut persistence,
        &create_commit_request("vicente", "2026-01-15"),
        NOW,
    )
    .unwrap();
    (state, persistence)
}

fn modify_request(code: &str, date: &str) -> ModifyReservationRequest {
    ModifyReservationRequest {
        code: String::from(code),
        vendor: String::from("Vicente"),
        service_date: String::from(date),
        passengers: vec![
            create_test_passenger("Ana Silva", PassengerCategory::Adult),
            create_test_passenger("Luis Rojas", PassengerCategory::Child),
        ],
        reason: String::from("cliente agrega un niño"),
        ..ModifyReservationRequest::default()
    }
}

#[test]
fn test_modification_replaces_whole_group() {
    let (mut state, mut persistence) = committed_fixture();

    let response: ModifyReservationResponse = modify_reservation(
        &mut state,
        &mut persistence,
        &modify_request("B1", "2026-01-15"),
        LATER,
    )
    .unwrap();

    assert!(response.remote.is_persisted());
    // Two rows now share the code.
    assert_eq!(state.cache.passengers_for_code("B1").len(), 2);
    // High-season adult plus child at current rates.
    assert_eq!(response.quote.lsr_subtotal, 155_000 + 90_000);

    let headers = persistence.fetch_reservations().unwrap();
    let remote_passengers = persistence.fetch_passengers(&[headers[0].id]).unwrap();
    assert_eq!(remote_passengers.len(), 2);
}

#[test]
fn test_modification_keeps_group_number_when_date_unchanged() {
    let (mut state, mut persistence) = committed_fixture();
    let before: String = state.cache.passengers_for_code("B1")[0].group_number.clone();

    let response: ModifyReservationResponse = modify_reservation(
        &mut state,
        &mut persistence,
        &modify_request("B1", "2026-01-15"),
        LATER,
    )
    .unwrap();

    assert_eq!(response.group_number, before);
}

#[test]
fn test_modification_reassigns_group_number_when_date_changes() {
    let (mut state, mut persistence) = committed_fixture();
    // A second reservation already holds group 1 on the target date.
    commit_reservation(
        &mut state,
        &mut persistence,
        &create_commit_request("eli", "2026-02-10"),
        NOW,
    )
    .unwrap();

    let response: ModifyReservationResponse = modify_reservation(
        &mut state,
        &mut persistence,
        &modify_request("B1", "2026-02-10"),
        LATER,
    )
    .unwrap();

    assert_eq!(response.group_number, "2");
    for row in state.cache.passengers_for_code("B1") {
        assert_eq!(row.service_date, "2026-02-10");
        assert_eq!(row.group_number, "2");
    }
}

#[test]
fn test_modification_reprices_for_new_season() {
    let (mut state, mut persistence) = committed_fixture();

    let response: ModifyReservationResponse = modify_reservation(
        &mut state,
        &mut persistence,
        &modify_request("B1", "2025-11-20"),
        LATER,
    )
    .unwrap();

    // Low-season rates apply after the date change.
    assert_eq!(response.quote.lsr_subtotal, 145_000 + 80_000);
    assert_eq!(
        state.cache.passengers_for_code("B1")[0].lsr_value,
        145_000
    );
}

#[test]
fn test_modification_logs_zero_amount_marker() {
    let (mut state, mut persistence) = committed_fixture();
    modify_reservation(
        &mut state,
        &mut persistence,
        &modify_request("B1", "2026-01-15"),
        LATER,
    )
    .unwrap();

    let log = state
        .cache
        .payments
        .iter()
        .find(|p| p.amount == 0)
        .expect("modification log payment");
    assert_eq!(log.method, "modificacion");
    assert!(log.receipt.starts_with("MOD: cliente agrega un niño"));
    assert!(log.receipt.contains("vend:Vicente"));
}

#[test]
fn test_modification_requires_reason_and_rows() {
    let (mut state, mut persistence) = committed_fixture();

    let mut request: ModifyReservationRequest = modify_request("B1", "2026-01-15");
    request.reason = String::from("  ");
    assert!(matches!(
        modify_reservation(&mut state, &mut persistence, &request, LATER),
        Err(ApiError::ValidationFailed { .. })
    ));

    let request: ModifyReservationRequest = modify_request("Z9", "2026-01-15");
    assert!(matches!(
        modify_reservation(&mut state, &mut persistence, &request, LATER),
        Err(ApiError::ResourceNotFound { .. })
    ));
}

#[test]
fn test_void_removes_passengers_retires_code() {
    let (mut state, mut persistence) = committed_fixture();

    let response: VoidReservationResponse = void_reservation(
        &mut state,
        &mut persistence,
        &VoidReservationRequest {
            code: String::from("B1"),
            vendor: String::from("Vicente"),
            reason: String::from("anulación por cliente"),
        },
        LATER,
    )
    .unwrap();

    assert!(response.remote.is_persisted());
    // The payment trail makes the code an orphan, so it retires at once.
    assert!(response.retired);
    assert!(state.retired.contains("B1"));
    assert!(state.cache.passengers_for_code("B1").is_empty());

    // Non-reuse monotonicity: the next preview skips B1 forever.
    assert_eq!(preview_code(&state, "vicente").unwrap().code, "B2");

    // Remotely: passengers gone, header and payments kept.
    let headers = persistence.fetch_reservations().unwrap();
    assert_eq!(headers.len(), 1);
    assert_eq!(persistence.count_passengers(headers[0].id).unwrap(), 0);
    let payments = persistence.fetch_payments(&[headers[0].id]).unwrap();
    // The original payment plus the zero-amount DEL log.
    assert_eq!(payments.len(), 2);
    assert!(
        payments
            .iter()
            .any(|p| p.amount == 0
                && p.receipt
                    .as_deref()
                    .is_some_and(|r| r.starts_with("DEL: anulación por cliente")))
    );
}

#[test]
fn test_void_requires_reason() {
    let (mut state, mut persistence) = committed_fixture();

    let result = void_reservation(
        &mut state,
        &mut persistence,
        &VoidReservationRequest {
            code: String::from("B1"),
            vendor: String::from("Vicente"),
            reason: String::new(),
        },
        LATER,
    );
    assert!(matches!(result, Err(ApiError::ValidationFailed { .. })));
    assert_eq!(state.cache.passengers_for_code("B1").len(), 1);
}

#[test]
fn test_void_unknown_code_is_not_found() {
    let (mut state, mut persistence) = committed_fixture();

    let result = void_reservation(
        &mut state,
        &mut persistence,
        &VoidReservationRequest {
            code: String::from("Z9"),
            vendor: String::from("Vicente"),
            reason: String::from("duplicado"),
        },
        LATER,
    );
    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}
