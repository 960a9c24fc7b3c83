// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::state::{LocalCache, PassengerRecord, PaymentRecord};
use vg_booking_domain::{PassengerCategory, VendorProfile};

pub fn create_test_profile() -> VendorProfile {
    VendorProfile::new(String::from("Javier"), String::from("A"), 1, 1000)
}

pub fn create_test_passenger(code: &str, date: &str, group: &str) -> PassengerRecord {
    PassengerRecord {
        created_at: String::from("2026-01-10T12:00:00Z"),
        vendor: String::from("Javier"),
        code: String::from(code),
        group_number: String::from(group),
        name: String::from("Ana Silva"),
        category: PassengerCategory::Adult,
        lsr_value: 155_000,
        service_date: String::from(date),
        ..PassengerRecord::default()
    }
}

pub fn create_test_payment(code: &str, amount: i64) -> PaymentRecord {
    PaymentRecord {
        created_at: String::from("2026-01-10T12:30:00Z"),
        vendor: String::from("Javier"),
        code: String::from(code),
        method: String::from("transferencia"),
        amount,
        receipt: String::new(),
    }
}

pub fn cache_with_passengers(codes: &[&str]) -> LocalCache {
    let mut cache: LocalCache = LocalCache::new();
    for code in codes {
        cache
            .passengers
            .push(create_test_passenger(code, "2026-01-15", "1"));
    }
    cache
}
