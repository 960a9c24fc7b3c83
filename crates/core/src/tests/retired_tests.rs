// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::allocator::preview_next_code;
use crate::retired::{RetiredCodes, detect_orphans};
use crate::state::LocalCache;
use crate::tests::helpers::{
    cache_with_passengers, create_test_payment, create_test_profile,
};
use std::collections::BTreeSet;
use vg_booking_domain::ReservationCode;

#[test]
fn test_detect_orphans_finds_payment_without_passengers() {
    let mut cache: LocalCache = cache_with_passengers(&["A1"]);
    cache.payments.push(create_test_payment("A1", 50_000));
    cache.payments.push(create_test_payment("A2", 30_000));

    let orphans: BTreeSet<String> = detect_orphans(&cache);
    assert_eq!(orphans.into_iter().collect::<Vec<String>>(), vec!["A2"]);
}

#[test]
fn test_detect_orphans_empty_when_all_codes_have_passengers() {
    let mut cache: LocalCache = cache_with_passengers(&["A1", "A2"]);
    cache.payments.push(create_test_payment("A1", 50_000));

    assert!(detect_orphans(&cache).is_empty());
}

#[test]
fn test_deleting_passengers_poisons_the_code_reactively() {
    // Orphan retirement reactivity: removing all passenger rows for a code
    // with payments must retire the code on the next scan, without any
    // explicit retire action, and the allocator must skip it.
    let profile = create_test_profile();
    let mut cache: LocalCache = cache_with_passengers(&["A1"]);
    cache.payments.push(create_test_payment("A1", 50_000));
    let mut retired: RetiredCodes = RetiredCodes::new();

    // Nothing to retire while the passengers exist.
    assert!(retired.retire_orphans(&cache).is_empty());

    let removed: usize = cache.remove_passengers_for_code("A1");
    assert_eq!(removed, 1);

    let newly: Vec<String> = retired.retire_orphans(&cache);
    assert_eq!(newly, vec![String::from("A1")]);
    assert!(retired.contains("A1"));

    let code: ReservationCode = preview_next_code(&profile, &cache, &retired).unwrap();
    assert_eq!(code.value(), "A2");
}

#[test]
fn test_retire_orphans_reports_only_new_codes() {
    let mut cache: LocalCache = LocalCache::new();
    cache.payments.push(create_test_payment("A3", 10_000));
    let mut retired: RetiredCodes = RetiredCodes::new();

    assert_eq!(retired.retire_orphans(&cache), vec![String::from("A3")]);
    // A second scan finds the same orphan but adds nothing.
    assert!(retired.retire_orphans(&cache).is_empty());
    assert_eq!(retired.len(), 1);
}

#[test]
fn test_explicit_retirement_is_permanent() {
    let mut retired: RetiredCodes = RetiredCodes::new();
    assert!(retired.retire("B9"));
    assert!(!retired.retire("B9"));
    assert!(retired.contains("B9"));
}

#[test]
fn test_retired_set_serializes_as_plain_array() {
    // The local mirror stores the set as a JSON array of code strings.
    let mut retired: RetiredCodes = RetiredCodes::new();
    retired.retire("A2");
    retired.retire("B15");

    let json: String = serde_json::to_string(&retired).unwrap();
    assert_eq!(json, r#"["A2","B15"]"#);

    let decoded: RetiredCodes = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, retired);
}
