// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::local::parse_or_default;
use crate::retired::RetiredCodes;
use crate::state::LocalCache;
use std::collections::BTreeMap;
use vg_booking_domain::VendorOverride;

#[test]
fn test_missing_value_yields_default() {
    let retired: RetiredCodes = parse_or_default(None);
    assert!(retired.is_empty());
}

#[test]
fn test_empty_string_yields_default() {
    let cache: LocalCache = parse_or_default(Some(""));
    assert_eq!(cache, LocalCache::new());
}

#[test]
fn test_corrupt_json_degrades_silently() {
    // A corrupted mirror must never take the application down.
    let retired: RetiredCodes = parse_or_default(Some("{not json"));
    assert!(retired.is_empty());

    let overrides: BTreeMap<String, VendorOverride> =
        parse_or_default(Some(r#"["wrong shape"]"#));
    assert!(overrides.is_empty());
}

#[test]
fn test_valid_json_is_decoded() {
    let retired: RetiredCodes = parse_or_default(Some(r#"["A2","B15"]"#));
    assert!(retired.contains("A2"));
    assert!(retired.contains("B15"));
    assert_eq!(retired.len(), 2);
}

#[test]
fn test_override_mirror_decodes_partial_entries() {
    let raw: &str = r#"{"maria":{"prefix":"M","range_end":500}}"#;
    let overrides: BTreeMap<String, VendorOverride> = parse_or_default(Some(raw));
    let entry: &VendorOverride = overrides.get("maria").unwrap();
    assert_eq!(entry.prefix.as_deref(), Some("M"));
    assert_eq!(entry.range_end, Some(500));
    assert_eq!(entry.name, None);
}
