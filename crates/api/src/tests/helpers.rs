// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::request_response::{CommitReservationRequest, PassengerInput, PaymentInput};
use crate::state::ApplicationState;
use vg_booking_domain::PassengerCategory;
use vg_booking_persistence::Persistence;

pub const NOW: &str = "2026-01-20T12:00:00Z";

pub fn create_test_state() -> ApplicationState {
    ApplicationState::new()
}

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory database")
}

pub fn create_test_passenger(name: &str, category: PassengerCategory) -> PassengerInput {
    PassengerInput {
        name: String::from(name),
        document: String::from("12.345.678-9"),
        nationality: String::from("Chilena"),
        phone: String::from("+56 9 1234 5678"),
        email: String::from("ana@example.com"),
        category,
        addon_included: false,
    }
}

pub fn create_commit_request(vendor_key: &str, date: &str) -> CommitReservationRequest {
    CommitReservationRequest {
        vendor_key: String::from(vendor_key),
        vendor_uid: String::from("uid-test"),
        service_date: String::from(date),
        passengers: vec![create_test_passenger(
            "Ana Silva",
            PassengerCategory::Adult,
        )],
        payments: vec![PaymentInput {
            method: String::from("transferencia"),
            amount: 50_000,
            receipt: String::from("boleta #1"),
        }],
        ..CommitReservationRequest::default()
    }
}
