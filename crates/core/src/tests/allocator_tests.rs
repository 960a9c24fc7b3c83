// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::allocator::{UsedNumbers, commit_code, preview_next_code, used_numbers};
use crate::error::AllocationError;
use crate::retired::RetiredCodes;
use crate::state::LocalCache;
use crate::tests::helpers::{cache_with_passengers, create_test_payment, create_test_profile};
use vg_booking_domain::{ReservationCode, VendorProfile};
use vg_booking_history::{HistoryEntry, VoucherSnapshot};

fn history_snapshot(code: &str) -> VoucherSnapshot {
    VoucherSnapshot {
        code: String::from(code),
        vendor: String::from("Javier"),
        service_date: String::from("2026-01-15"),
        addon_date: String::new(),
        lsr_subtotal: 0,
        lsr_discount: 0,
        transport: 0,
        lsr_total: 0,
        addon_service: None,
        provider: None,
        addon_subtotal: 0,
        addon_discount: 0,
        addon_total: 0,
        grand_total: 0,
        paid: 0,
        balance: 0,
        passengers: Vec::new(),
        notes: String::new(),
    }
}

#[test]
fn test_preview_returns_lowest_free_number() {
    // Used numbers {1, 2, 4} in range [1, 999] must yield 3.
    let profile: VendorProfile = create_test_profile();
    let cache: LocalCache = cache_with_passengers(&["A1", "A2", "A4"]);
    let retired: RetiredCodes = RetiredCodes::new();

    let code: ReservationCode = preview_next_code(&profile, &cache, &retired).unwrap();
    assert_eq!(code.value(), "A3");
}

#[test]
fn test_preview_on_empty_cache_starts_at_range_start() {
    let profile: VendorProfile = create_test_profile();
    let cache: LocalCache = LocalCache::new();
    let retired: RetiredCodes = RetiredCodes::new();

    let code: ReservationCode = preview_next_code(&profile, &cache, &retired).unwrap();
    assert_eq!(code.value(), "A1");
}

#[test]
fn test_used_numbers_unions_all_four_sources() {
    let profile: VendorProfile = create_test_profile();
    let mut cache: LocalCache = cache_with_passengers(&["A1"]);
    cache.payments.push(create_test_payment("A2", 10_000));
    cache.history.push(HistoryEntry::new(
        String::from("javier"),
        String::from("A3"),
        history_snapshot("A3"),
        String::from("2026-01-09T10:00:00Z"),
    ));
    let mut retired: RetiredCodes = RetiredCodes::new();
    retired.retire("A4");

    let used: UsedNumbers = used_numbers(&profile, &cache, &retired);
    assert_eq!(
        used.numbers.iter().copied().collect::<Vec<u32>>(),
        vec![1, 2, 3, 4]
    );

    let code: ReservationCode = preview_next_code(&profile, &cache, &retired).unwrap();
    assert_eq!(code.value(), "A5");
}

#[test]
fn test_used_numbers_ignores_foreign_prefixes_and_junk_ids() {
    let profile: VendorProfile = create_test_profile();
    let mut cache: LocalCache = cache_with_passengers(&["B1", "A9x", "SIN-CODIGO"]);
    cache.payments.push(create_test_payment("C77", 5_000));

    let used: UsedNumbers = used_numbers(&profile, &cache, &RetiredCodes::new());
    assert!(used.numbers.is_empty());
}

#[test]
fn test_payment_only_code_is_never_reoffered() {
    // Vendor "A" committed A1, all passengers were later deleted but the
    // payment row remains: the next preview must be A2, not A1.
    let profile: VendorProfile = create_test_profile();
    let mut cache: LocalCache = LocalCache::new();
    cache.payments.push(create_test_payment("A1", 80_000));
    let retired: RetiredCodes = RetiredCodes::new();

    let code: ReservationCode = preview_next_code(&profile, &cache, &retired).unwrap();
    assert_eq!(code.value(), "A2");
}

#[test]
fn test_commit_keeps_free_candidate() {
    // The form was opened against A5 and nothing claimed it meanwhile:
    // commit must return exactly A5, not recompute to A1.
    let profile: VendorProfile = create_test_profile();
    let cache: LocalCache = LocalCache::new();
    let retired: RetiredCodes = RetiredCodes::new();

    let code: ReservationCode = commit_code(&profile, &cache, &retired, "A5").unwrap();
    assert_eq!(code.value(), "A5");
}

#[test]
fn test_commit_falls_back_when_candidate_is_taken() {
    let profile: VendorProfile = create_test_profile();
    let cache: LocalCache = cache_with_passengers(&["A1", "A5"]);
    let retired: RetiredCodes = RetiredCodes::new();

    let code: ReservationCode = commit_code(&profile, &cache, &retired, "A5").unwrap();
    assert_eq!(code.value(), "A2");
}

#[test]
fn test_commit_falls_back_on_foreign_or_junk_candidate() {
    let profile: VendorProfile = create_test_profile();
    let cache: LocalCache = cache_with_passengers(&["A1"]);
    let retired: RetiredCodes = RetiredCodes::new();

    let code: ReservationCode = commit_code(&profile, &cache, &retired, "B7").unwrap();
    assert_eq!(code.value(), "A2");

    let code: ReservationCode = commit_code(&profile, &cache, &retired, "").unwrap();
    assert_eq!(code.value(), "A2");
}

#[test]
fn test_commit_never_returns_used_number() {
    // Uniqueness: commit_code never returns a number already in use.
    let profile: VendorProfile = create_test_profile();
    let mut cache: LocalCache = cache_with_passengers(&["A1", "A2", "A3"]);
    cache.payments.push(create_test_payment("A4", 1_000));
    let mut retired: RetiredCodes = RetiredCodes::new();
    retired.retire("A5");

    let code: ReservationCode = commit_code(&profile, &cache, &retired, "A2").unwrap();
    let used: UsedNumbers = used_numbers(&profile, &cache, &retired);
    let suffix: u32 = code.suffix_under("A").unwrap();
    assert!(!used.numbers.contains(&suffix));
    assert_eq!(code.value(), "A6");
}

#[test]
fn test_exhausted_range_is_an_error() {
    let profile: VendorProfile =
        VendorProfile::new(String::from("Javier"), String::from("A"), 1, 3);
    let cache: LocalCache = cache_with_passengers(&["A1", "A2", "A3"]);
    let retired: RetiredCodes = RetiredCodes::new();

    let result: Result<ReservationCode, AllocationError> =
        preview_next_code(&profile, &cache, &retired);
    assert_eq!(
        result,
        Err(AllocationError::RangeExhausted {
            vendor: String::from("Javier"),
            range_end: 3,
        })
    );

    let result: Result<ReservationCode, AllocationError> =
        commit_code(&profile, &cache, &retired, "A2");
    assert!(result.is_err());
}

#[test]
fn test_preview_ignores_stale_candidate_by_design() {
    // The preview is recomputed from the cache alone; there is no candidate
    // input to influence it.
    let profile: VendorProfile = create_test_profile();
    let cache: LocalCache = cache_with_passengers(&["A1"]);
    let retired: RetiredCodes = RetiredCodes::new();

    let first: ReservationCode = preview_next_code(&profile, &cache, &retired).unwrap();
    let second: ReservationCode = preview_next_code(&profile, &cache, &retired).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.value(), "A2");
}
