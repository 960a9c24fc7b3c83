// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::state::LocalCache;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The set of reservation codes that must never be allocated again.
///
/// Codes enter the set through orphan-payment detection or explicit
/// administrative retirement; normal operation never removes one. The set
/// is persisted locally as a JSON array of full code strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RetiredCodes {
    codes: BTreeSet<String>,
}

impl RetiredCodes {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            codes: BTreeSet::new(),
        }
    }

    /// Returns whether a code is retired.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    /// Retires a code explicitly. Returns whether the code was newly added.
    pub fn retire(&mut self, code: &str) -> bool {
        self.codes.insert(String::from(code))
    }

    /// Iterates over retired codes.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(String::as_str)
    }

    /// Returns the number of retired codes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Returns whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Retires every orphan code found in the cache.
    ///
    /// Runs reactively after every change to the passenger or payment
    /// collections, not just at allocation time: a reservation can be fully
    /// deleted while its payment history remains as the audit trail, and
    /// such a code must be poisoned immediately.
    ///
    /// Returns the codes newly added by this scan.
    pub fn retire_orphans(&mut self, cache: &LocalCache) -> Vec<String> {
        let mut newly_retired: Vec<String> = Vec::new();
        for code in detect_orphans(cache) {
            if self.codes.insert(code.clone()) {
                newly_retired.push(code);
            }
        }
        newly_retired
    }
}

/// Computes the set of orphan codes in a cache.
///
/// An orphan is a code that has payment rows but no passenger rows, the
/// signature of a voided-but-paid reservation.
#[must_use]
pub fn detect_orphans(cache: &LocalCache) -> BTreeSet<String> {
    let with_passengers: BTreeSet<String> = cache.codes_with_passengers();
    cache
        .codes_with_payments()
        .into_iter()
        .filter(|code| !with_passengers.contains(code))
        .collect()
}
