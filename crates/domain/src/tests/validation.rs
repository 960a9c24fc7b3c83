// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{AddonService, VendorProfile};
use crate::validation::{ReservationInput, validate_reservation, validate_vendor_profile};

fn valid_input() -> ReservationInput {
    ReservationInput {
        service_date: String::from("2026-01-15"),
        passenger_count: 2,
        any_addon_included: false,
        addon_service: None,
        addon_date: String::new(),
        payment_amounts: vec![50_000],
    }
}

#[test]
fn test_valid_input_collects_no_messages() {
    assert!(validate_reservation(&valid_input()).is_empty());
}

#[test]
fn test_messages_are_collected_not_first_only() {
    let input: ReservationInput = ReservationInput {
        service_date: String::new(),
        passenger_count: 0,
        payment_amounts: vec![-1],
        ..valid_input()
    };
    let errors: Vec<String> = validate_reservation(&input);
    assert_eq!(errors.len(), 3);
}

#[test]
fn test_missing_service_date_is_rejected() {
    let input: ReservationInput = ReservationInput {
        service_date: String::new(),
        ..valid_input()
    };
    let errors: Vec<String> = validate_reservation(&input);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("service date"));
}

#[test]
fn test_addon_inclusion_requires_type_and_date() {
    let input: ReservationInput = ReservationInput {
        any_addon_included: true,
        addon_service: None,
        addon_date: String::new(),
        ..valid_input()
    };
    let errors: Vec<String> = validate_reservation(&input);
    assert_eq!(errors.len(), 2);

    let input: ReservationInput = ReservationInput {
        any_addon_included: true,
        addon_service: Some(AddonService::FM),
        addon_date: String::from("2026-01-16"),
        ..valid_input()
    };
    assert!(validate_reservation(&input).is_empty());
}

#[test]
fn test_negative_creation_payment_is_rejected() {
    let input: ReservationInput = ReservationInput {
        payment_amounts: vec![10_000, -5_000],
        ..valid_input()
    };
    let errors: Vec<String> = validate_reservation(&input);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("negative"));
}

#[test]
fn test_vendor_profile_rejects_empty_prefix() {
    let profile: VendorProfile = VendorProfile::new(String::from("X"), String::new(), 1, 10);
    assert_eq!(
        validate_vendor_profile("x", &profile),
        Err(DomainError::EmptyVendorPrefix {
            vendor_key: String::from("x"),
        })
    );
}

#[test]
fn test_vendor_profile_rejects_inverted_range() {
    let profile: VendorProfile = VendorProfile::new(String::from("X"), String::from("X"), 10, 5);
    assert!(matches!(
        validate_vendor_profile("x", &profile),
        Err(DomainError::InvalidVendorRange { .. })
    ));
}
