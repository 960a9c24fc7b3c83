// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Persistence;
use crate::tests::helpers::create_test_persistence;
use std::collections::BTreeMap;
use vg_booking_domain::VendorOverride;

fn entry(name: Option<&str>, prefix: Option<&str>, end: Option<u32>) -> VendorOverride {
    VendorOverride {
        name: name.map(String::from),
        prefix: prefix.map(String::from),
        range_start: None,
        range_end: end,
    }
}

#[test]
fn test_upsert_then_list_round_trips() {
    let mut persistence: Persistence = create_test_persistence();
    persistence
        .upsert_vendor_override("maria", &entry(Some("María"), Some("M"), Some(500)))
        .unwrap();

    let overrides: BTreeMap<String, VendorOverride> =
        persistence.list_vendor_overrides().unwrap();
    assert_eq!(overrides.len(), 1);
    let stored: &VendorOverride = overrides.get("maria").unwrap();
    assert_eq!(stored.name.as_deref(), Some("María"));
    assert_eq!(stored.prefix.as_deref(), Some("M"));
    assert_eq!(stored.range_start, None);
    assert_eq!(stored.range_end, Some(500));
}

#[test]
fn test_upsert_replaces_existing_entry() {
    let mut persistence: Persistence = create_test_persistence();
    persistence
        .upsert_vendor_override("eli", &entry(Some("Elisa"), None, None))
        .unwrap();
    persistence
        .upsert_vendor_override("eli", &entry(None, Some("E"), Some(200)))
        .unwrap();

    let overrides: BTreeMap<String, VendorOverride> =
        persistence.list_vendor_overrides().unwrap();
    let stored: &VendorOverride = overrides.get("eli").unwrap();
    // The replacement is field-for-field, not a merge.
    assert_eq!(stored.name, None);
    assert_eq!(stored.prefix.as_deref(), Some("E"));
    assert_eq!(stored.range_end, Some(200));
}

#[test]
fn test_delete_reports_whether_row_existed() {
    let mut persistence: Persistence = create_test_persistence();
    persistence
        .upsert_vendor_override("maria", &entry(Some("María"), None, None))
        .unwrap();

    assert!(persistence.delete_vendor_override("maria").unwrap());
    assert!(!persistence.delete_vendor_override("maria").unwrap());
    assert!(persistence.list_vendor_overrides().unwrap().is_empty());
}
