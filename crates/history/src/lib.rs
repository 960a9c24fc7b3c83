// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use serde::{Deserialize, Serialize};
use vg_booking_domain::{AddonService, PassengerCategory};

/// Maximum number of history entries retained.
///
/// The ledger keeps the most recent voucher computations for audit and
/// reprint; older entries fall off the end.
pub const HISTORY_CAP: usize = 50;

/// A passenger line as it appeared on the voucher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerSummary {
    /// The passenger's name.
    pub name: String,
    /// Identity document (RUT or passport).
    pub document: String,
    /// Nationality.
    pub nationality: String,
    /// Contact phone.
    pub phone: String,
    /// Contact email.
    pub email: String,
    /// Fare category.
    pub category: PassengerCategory,
    /// Whether the passenger includes the add-on service.
    pub addon_included: bool,
    /// The group number printed on the voucher.
    pub group: String,
}

/// A full voucher computation captured at commit time.
///
/// Snapshots are immutable once taken. They are not authoritative for code
/// allocation, but the allocator scans them: a code that ever appeared on a
/// voucher is never reallocated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoucherSnapshot {
    /// The reservation code.
    pub code: String,
    /// The issuing vendor's display name.
    pub vendor: String,
    /// The lake-tour service date.
    pub service_date: String,
    /// The add-on service date, if any.
    pub addon_date: String,
    /// Lake-tour gross amount.
    pub lsr_subtotal: i64,
    /// Lake-tour discount applied.
    pub lsr_discount: i64,
    /// Transport total.
    pub transport: i64,
    /// Lake-tour total including transport.
    pub lsr_total: i64,
    /// Selected add-on service, if any.
    pub addon_service: Option<AddonService>,
    /// Add-on provider, if any.
    pub provider: Option<String>,
    /// Add-on gross amount.
    pub addon_subtotal: i64,
    /// Add-on discount applied.
    pub addon_discount: i64,
    /// Add-on total.
    pub addon_total: i64,
    /// Grand total of the quote.
    pub grand_total: i64,
    /// Amount paid at commit time.
    pub paid: i64,
    /// Outstanding balance.
    pub balance: i64,
    /// Passenger lines.
    pub passengers: Vec<PassengerSummary>,
    /// Free-text notes.
    pub notes: String,
}

/// One entry of the history ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The vendor key that committed the reservation.
    pub vendor_key: String,
    /// The reservation code.
    pub code: String,
    /// The captured voucher.
    pub snapshot: VoucherSnapshot,
    /// Capture timestamp (ISO 8601).
    pub created_at: String,
}

impl HistoryEntry {
    /// Creates a new `HistoryEntry`.
    ///
    /// # Arguments
    ///
    /// * `vendor_key` - The committing vendor's key
    /// * `code` - The reservation code
    /// * `snapshot` - The captured voucher
    /// * `created_at` - Capture timestamp (ISO 8601)
    #[must_use]
    pub const fn new(
        vendor_key: String,
        code: String,
        snapshot: VoucherSnapshot,
        created_at: String,
    ) -> Self {
        Self {
            vendor_key,
            code,
            snapshot,
            created_at,
        }
    }
}

/// The capped, most-recent-first history ledger.
///
/// Append-only from the application's perspective: entries are never edited,
/// and the only removal is the cap dropping the oldest entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryLedger {
    /// The retained entries, most recent first.
    entries: Vec<HistoryEntry>,
}

impl HistoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates a ledger from existing entries (most recent first), applying
    /// the cap.
    #[must_use]
    pub fn from_entries(mut entries: Vec<HistoryEntry>) -> Self {
        entries.truncate(HISTORY_CAP);
        Self { entries }
    }

    /// Pushes a new entry at the front, dropping the oldest past the cap.
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_CAP);
    }

    /// Returns the retained entries, most recent first.
    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Returns the number of retained entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the ledger is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over entry codes (used by the retirement scan).
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.code.as_str())
    }
}
