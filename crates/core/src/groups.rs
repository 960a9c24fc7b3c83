// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::state::LocalCache;
use std::collections::{BTreeMap, BTreeSet};

/// Sort sentinel for rows whose creation timestamp is missing.
///
/// Rows without a timestamp sort after every dated row during backfill, so
/// a legacy row never steals a lower group number from a dated one.
pub const MISSING_TIMESTAMP_SENTINEL: &str = "9999-12-31T23:59:59Z";

/// Returns the next free group number for a service date, as a string.
///
/// Scans passenger rows whose service date matches, collects their valid
/// positive group numbers, and returns the smallest positive integer not in
/// that set (starting at 1). Rows carrying the placeholder or any
/// non-numeric value simply do not occupy a slot. An empty date yields the
/// empty string.
///
/// # Arguments
///
/// * `date` - The service date to scan
/// * `cache` - The current local cache snapshot
#[must_use]
pub fn next_group_for_date(date: &str, cache: &LocalCache) -> String {
    if date.is_empty() {
        return String::new();
    }
    let used: BTreeSet<u32> = cache
        .passengers
        .iter()
        .filter(|row| row.service_date == date)
        .filter_map(|row| row.group_number.parse::<u32>().ok())
        .filter(|n| *n > 0)
        .collect();
    lowest_free_group(&used).to_string()
}

/// One reservation header feeding the reconciliation group assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSeed {
    /// The reservation code.
    pub code: String,
    /// The lake-tour service date (empty when unset).
    pub service_date: String,
    /// Creation timestamp; empty means unknown.
    pub created_at: String,
    /// The group number persisted on the remote header, if any.
    pub group_number: Option<u32>,
    /// How many passenger rows the reservation has.
    pub passenger_count: usize,
}

/// Assigns group numbers per service date during a cache rebuild.
///
/// Rules, in order:
/// 1. A reservation with zero passengers does not occupy a group slot and
///    receives no number.
/// 2. A persisted positive group number is kept unconditionally.
/// 3. Remaining rows are assigned the lowest free positive integer for
///    their date, visiting rows in (creation timestamp ascending, code
///    lexicographic) order so a first backfill is deterministic.
///
/// Returns the code → group-number map for every reservation that occupies
/// a slot.
#[must_use]
pub fn assign_groups(seeds: &[GroupSeed]) -> BTreeMap<String, u32> {
    let mut by_date: BTreeMap<&str, Vec<&GroupSeed>> = BTreeMap::new();
    for seed in seeds {
        if seed.service_date.is_empty() || seed.passenger_count == 0 {
            continue;
        }
        by_date.entry(&seed.service_date).or_default().push(seed);
    }

    let mut assigned: BTreeMap<String, u32> = BTreeMap::new();
    for rows in by_date.values_mut() {
        rows.sort_by(|a, b| {
            sort_timestamp(&a.created_at)
                .cmp(sort_timestamp(&b.created_at))
                .then_with(|| a.code.cmp(&b.code))
        });

        let mut used: BTreeSet<u32> = rows
            .iter()
            .filter_map(|seed| seed.group_number)
            .filter(|n| *n > 0)
            .collect();

        for seed in rows.iter() {
            let group: u32 = match seed.group_number {
                Some(n) if n > 0 => n,
                _ => {
                    let n: u32 = lowest_free_group(&used);
                    used.insert(n);
                    n
                }
            };
            assigned.insert(seed.code.clone(), group);
        }
    }
    assigned
}

/// Returns the smallest positive integer absent from the set.
fn lowest_free_group(used: &BTreeSet<u32>) -> u32 {
    let mut n: u32 = 1;
    while used.contains(&n) {
        n += 1;
    }
    n
}

/// Substitutes the sentinel for missing creation timestamps.
fn sort_timestamp(created_at: &str) -> &str {
    if created_at.is_empty() {
        MISSING_TIMESTAMP_SENTINEL
    } else {
        created_at
    }
}
