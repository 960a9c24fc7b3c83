// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::mutations::payments::PaymentParams;
use crate::mutations::reservations::{PassengerParams, ReservationHeaderParams};
use crate::Persistence;

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory database")
}

pub fn create_test_header(code: &str, date: &str) -> ReservationHeaderParams {
    ReservationHeaderParams {
        code: String::from(code),
        vendor_uid: String::from("uid-test"),
        service_date: Some(String::from(date)),
        lsr_value: 155_000,
        transport_value: 0,
        lsr_discount: 0,
        total_lsr: 155_000,
        total_quote: 155_000,
        balance: 155_000,
        created_at: String::from("2026-01-10T12:00:00Z"),
        ..ReservationHeaderParams::default()
    }
}

pub fn create_test_passenger(name: &str) -> PassengerParams {
    PassengerParams {
        name: Some(String::from(name)),
        document: Some(String::from("12.345.678-9")),
        nationality: Some(String::from("Chilena")),
        category: String::from("adult"),
        ..PassengerParams::default()
    }
}

pub fn create_test_payment(amount: i64) -> PaymentParams {
    PaymentParams {
        method: String::from("transferencia"),
        amount,
        receipt: Some(String::from("boleta #1 · vend:Javier")),
        created_at: String::from("2026-01-10T12:30:00Z"),
    }
}
