// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::AllocationError;
use crate::retired::RetiredCodes;
use crate::state::LocalCache;
use std::collections::BTreeSet;
use vg_booking_domain::{ReservationCode, VendorProfile, code_suffix};

/// The numeric suffixes currently unavailable to a vendor, plus the range
/// they were collected for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsedNumbers {
    /// Every suffix in use, from all four sources.
    pub numbers: BTreeSet<u32>,
    /// The vendor's range start.
    pub range_start: u32,
    /// The vendor's range end.
    pub range_end: u32,
    /// The vendor's code prefix.
    pub prefix: String,
}

impl UsedNumbers {
    /// Returns the lowest free number in the range, if any remains.
    #[must_use]
    pub fn lowest_free(&self) -> Option<u32> {
        (self.range_start..=self.range_end).find(|n| !self.numbers.contains(n))
    }
}

/// Collects every numeric suffix in use for a vendor.
///
/// Four sources are unioned: passenger rows, payment rows (a code with
/// payments must never be reused), history entries (if it ever existed, it
/// is never reused), and the explicit retired set. Records whose id does
/// not parse under the vendor prefix are skipped silently: ids are
/// free-form strings in legacy paths, and one malformed row must never
/// block the allocator.
#[must_use]
pub fn used_numbers(
    profile: &VendorProfile,
    cache: &LocalCache,
    retired: &RetiredCodes,
) -> UsedNumbers {
    let prefix: &str = &profile.prefix;
    let mut numbers: BTreeSet<u32> = BTreeSet::new();

    for row in &cache.passengers {
        if let Some(n) = code_suffix(&row.code, prefix) {
            numbers.insert(n);
        }
    }
    for payment in &cache.payments {
        if let Some(n) = code_suffix(&payment.code, prefix) {
            numbers.insert(n);
        }
    }
    for code in cache.history.codes() {
        if let Some(n) = code_suffix(code, prefix) {
            numbers.insert(n);
        }
    }
    for code in retired.iter() {
        if let Some(n) = code_suffix(code, prefix) {
            numbers.insert(n);
        }
    }

    UsedNumbers {
        numbers,
        range_start: profile.range_start,
        range_end: profile.range_end,
        prefix: String::from(prefix),
    }
}

/// Returns the next code to display for a vendor.
///
/// Always the lowest free number in the range, recomputed from the current
/// cache snapshot. Any previously displayed candidate is deliberately
/// ignored: the preview must reflect reality even when the UI held a
/// now-stale candidate.
///
/// # Arguments
///
/// * `profile` - The vendor's resolved profile
/// * `cache` - The current local cache snapshot
/// * `retired` - The retired-code set
///
/// # Errors
///
/// Returns `AllocationError::RangeExhausted` when no number in the
/// vendor's range is free.
pub fn preview_next_code(
    profile: &VendorProfile,
    cache: &LocalCache,
    retired: &RetiredCodes,
) -> Result<ReservationCode, AllocationError> {
    let used: UsedNumbers = used_numbers(profile, cache, retired);
    used.lowest_free()
        .map(|n| ReservationCode::from_parts(&used.prefix, n))
        .ok_or_else(|| AllocationError::RangeExhausted {
            vendor: profile.name.clone(),
            range_end: profile.range_end,
        })
}

/// Picks the code to commit a reservation under.
///
/// If the candidate the salesperson was working against still parses under
/// the vendor's prefix, lies in range, and its number is currently free,
/// that exact candidate is kept: re-deriving from scratch could shift to a
/// different number and desynchronize the voucher already shown. Otherwise
/// the lowest free number is allocated as in [`preview_next_code`].
///
/// # Arguments
///
/// * `profile` - The vendor's resolved profile
/// * `cache` - The current local cache snapshot
/// * `retired` - The retired-code set
/// * `candidate` - The code the form was opened with (may be stale)
///
/// # Errors
///
/// Returns `AllocationError::RangeExhausted` when the candidate is taken
/// and no number in the vendor's range is free.
pub fn commit_code(
    profile: &VendorProfile,
    cache: &LocalCache,
    retired: &RetiredCodes,
    candidate: &str,
) -> Result<ReservationCode, AllocationError> {
    let used: UsedNumbers = used_numbers(profile, cache, retired);

    if let Some(n) = code_suffix(candidate, &used.prefix)
        && !used.numbers.contains(&n)
    {
        return Ok(ReservationCode::from_parts(&used.prefix, n));
    }

    used.lowest_free()
        .map(|n| ReservationCode::from_parts(&used.prefix, n))
        .ok_or_else(|| AllocationError::RangeExhausted {
            vendor: profile.name.clone(),
            range_end: profile.range_end,
        })
}
