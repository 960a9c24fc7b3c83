// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ApiError;
use crate::operations::{delete_vendor, list_vendors, refresh_vendor_mirror, upsert_vendor};
use crate::request_response::{UpsertVendorRequest, VendorListing};
use crate::state::ApplicationState;
use crate::tests::helpers::{create_test_persistence, create_test_state};
use vg_booking_domain::VendorKey;
use vg_booking_persistence::Persistence;

fn upsert_request(key: &str, prefix: &str) -> UpsertVendorRequest {
    UpsertVendorRequest {
        vendor_key: String::from(key),
        name: Some(String::from("María")),
        prefix: Some(String::from(prefix)),
        range_start: Some(1),
        range_end: Some(500),
    }
}

#[test]
fn test_upsert_new_vendor_updates_remote_and_mirror() {
    let mut state: ApplicationState = create_test_state();
    let mut persistence: Persistence = create_test_persistence();

    let listing: VendorListing =
        upsert_vendor(&mut state, &mut persistence, &upsert_request("maria", "M")).unwrap();
    assert_eq!(listing.profile.name, "María");
    assert!(!listing.builtin);

    // The registry resolves the new key immediately.
    let profile = state.registry.resolve(&VendorKey::new("maria"));
    assert_eq!(profile.prefix, "M");
    assert_eq!(profile.range_end, 500);

    // The remote table carries the entry for other sessions.
    assert_eq!(persistence.list_vendor_overrides().unwrap().len(), 1);
}

#[test]
fn test_upsert_rejects_empty_key_and_invalid_range() {
    let mut state: ApplicationState = create_test_state();
    let mut persistence: Persistence = create_test_persistence();

    let result = upsert_vendor(&mut state, &mut persistence, &upsert_request("  ", "M"));
    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));

    let mut bad_range: UpsertVendorRequest = upsert_request("maria", "M");
    bad_range.range_start = Some(10);
    bad_range.range_end = Some(2);
    let result = upsert_vendor(&mut state, &mut persistence, &bad_range);
    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
    assert!(persistence.list_vendor_overrides().unwrap().is_empty());
}

#[test]
fn test_delete_builtin_vendor_is_rejected() {
    let mut state: ApplicationState = create_test_state();
    let mut persistence: Persistence = create_test_persistence();

    let result = delete_vendor(&mut state, &mut persistence, "vicente");
    match result {
        Err(ApiError::DomainRuleViolation { rule, .. }) => {
            assert_eq!(rule, "builtin_vendor_immutable");
        }
        other => panic!("Expected builtin rejection, got {other:?}"),
    }
}

#[test]
fn test_delete_added_vendor_removes_everywhere() {
    let mut state: ApplicationState = create_test_state();
    let mut persistence: Persistence = create_test_persistence();
    upsert_vendor(&mut state, &mut persistence, &upsert_request("maria", "M")).unwrap();

    delete_vendor(&mut state, &mut persistence, "maria").unwrap();
    assert!(persistence.list_vendor_overrides().unwrap().is_empty());
    // The key falls back to generic defaults.
    assert_eq!(state.registry.resolve(&VendorKey::new("maria")).name, "maria");
}

#[test]
fn test_refresh_mirror_pulls_remote_changes() {
    // Another session writes an override; this session refreshes.
    let mut other: ApplicationState = create_test_state();
    let mut persistence: Persistence = create_test_persistence();
    upsert_vendor(&mut other, &mut persistence, &upsert_request("maria", "M")).unwrap();

    let mut state: ApplicationState = create_test_state();
    let count: usize = refresh_vendor_mirror(&mut state, &mut persistence).unwrap();
    assert_eq!(count, 1);
    assert_eq!(state.registry.resolve(&VendorKey::new("maria")).name, "María");
}

#[test]
fn test_list_vendors_includes_builtins_and_added() {
    let mut state: ApplicationState = create_test_state();
    let mut persistence: Persistence = create_test_persistence();
    upsert_vendor(&mut state, &mut persistence, &upsert_request("maria", "M")).unwrap();

    let listings: Vec<VendorListing> = list_vendors(&state);
    assert_eq!(listings.len(), 5);
    assert_eq!(listings.iter().filter(|l| l.builtin).count(), 4);
    // The owner key lists under its admin display name.
    let owner = listings.iter().find(|l| l.vendor_key == "javier").unwrap();
    assert_eq!(owner.profile.name, "Admin");
}
