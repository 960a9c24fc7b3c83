// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use vg_booking_domain::{AddonCategory, PassengerCategory, ReservationStatus};
use vg_booking_history::HistoryLedger;

/// Placeholder shown for rows that have no group number yet.
pub const GROUP_PLACEHOLDER: &str = "—";

/// One row per individual traveler, belonging to exactly one reservation
/// code.
///
/// Monetary cells are derived values: they are recomputed from the live
/// pricing configuration on every cache rebuild and never read back from
/// the remote store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerRecord {
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
    /// Reservation lifecycle status.
    #[serde(default)]
    pub status: ReservationStatus,
    /// Issuing vendor's display name.
    pub vendor: String,
    /// The reservation code this row belongs to.
    pub code: String,
    /// The group number (string; may be the placeholder).
    pub group_number: String,
    /// Passenger name.
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
    /// Whether the per-person transport charge applies.
    pub transport: bool,
    /// Lake-tour value for this passenger at current rates.
    pub lsr_value: i64,
    /// Transport value for this passenger at current rates.
    pub transport_value: i64,
    /// Group-level lake-tour discount, duplicated on every row.
    pub lsr_discount: i64,
    /// Add-on seat class, when the passenger includes the add-on.
    pub addon_category: Option<AddonCategory>,
    /// Add-on provider.
    pub provider: String,
    /// Add-on service date.
    pub addon_date: String,
    /// Add-on value for this passenger at current rates.
    pub addon_value: i64,
    /// Group-level add-on discount, duplicated on every row.
    pub addon_discount: i64,
    /// Free-text notes.
    pub notes: String,
    /// Lake-tour service date.
    pub service_date: String,
}

/// One row per payment or refund movement.
///
/// Append-only: the application never mutates or deletes payment rows.
/// Zero-amount rows carry the administrative `MOD:`/`DEL:` log markers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
    /// The acting salesperson's display name.
    pub vendor: String,
    /// The reservation code this movement applies to.
    pub code: String,
    /// Payment method.
    pub method: String,
    /// Signed amount in CLP; negative means refund.
    pub amount: i64,
    /// Free-text receipt or note (may carry a `vend:` marker).
    pub receipt: String,
}

/// The local cache: a single snapshot of the remote store plus the local
/// history ledger.
///
/// Reconciliation replaces the passenger and payment slices wholesale; the
/// cache is never merged incrementally. All allocator and assigner reads go
/// through this structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalCache {
    /// Passenger rows.
    pub passengers: Vec<PassengerRecord>,
    /// Payment rows.
    pub payments: Vec<PaymentRecord>,
    /// The local history ledger.
    pub history: HistoryLedger,
}

impl LocalCache {
    /// Creates an empty cache.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            passengers: Vec::new(),
            payments: Vec::new(),
            history: HistoryLedger::new(),
        }
    }

    /// Returns the set of codes that have at least one passenger row.
    #[must_use]
    pub fn codes_with_passengers(&self) -> BTreeSet<String> {
        self.passengers
            .iter()
            .filter(|row| !row.code.is_empty())
            .map(|row| row.code.clone())
            .collect()
    }

    /// Returns the set of codes that have at least one payment row.
    #[must_use]
    pub fn codes_with_payments(&self) -> BTreeSet<String> {
        self.payments
            .iter()
            .filter(|row| !row.code.is_empty())
            .map(|row| row.code.clone())
            .collect()
    }

    /// Removes every passenger row belonging to a code.
    ///
    /// Returns the number of rows removed. Payment rows are untouched: they
    /// remain as the audit trail, which is what makes the code an orphan.
    pub fn remove_passengers_for_code(&mut self, code: &str) -> usize {
        let before: usize = self.passengers.len();
        self.passengers.retain(|row| row.code != code);
        before - self.passengers.len()
    }

    /// Returns the passenger rows for a code, ordered by creation time.
    #[must_use]
    pub fn passengers_for_code(&self, code: &str) -> Vec<&PassengerRecord> {
        let mut rows: Vec<&PassengerRecord> = self
            .passengers
            .iter()
            .filter(|row| row.code == code)
            .collect();
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        rows
    }

    /// Computes the financial summary for one reservation code.
    ///
    /// Returns `None` when the code has no passenger rows. Group-level
    /// discounts are read from the first row (they are duplicated across the
    /// group), per-passenger values are summed.
    #[must_use]
    pub fn summary_for_code(&self, code: &str) -> Option<CodeSummary> {
        let rows: Vec<&PassengerRecord> = self.passengers_for_code(code);
        let first: &PassengerRecord = rows.first()?;

        let lsr_gross: i64 = rows.iter().map(|row| row.lsr_value).sum();
        let lsr_discount: i64 = first.lsr_discount;
        let transport: i64 = rows.iter().map(|row| row.transport_value).sum();
        let addon_gross: i64 = rows.iter().map(|row| row.addon_value).sum();
        let addon_discount: i64 = first.addon_discount;

        let lsr_total: i64 = (lsr_gross - lsr_discount).max(0) + transport;
        let addon_total: i64 = (addon_gross - addon_discount).max(0);
        let grand_total: i64 = lsr_total + addon_total;
        let paid: i64 = self
            .payments
            .iter()
            .filter(|payment| payment.code == code)
            .map(|payment| payment.amount)
            .sum();

        let mut adults: u32 = 0;
        let mut children: u32 = 0;
        let mut infants: u32 = 0;
        for row in &rows {
            match row.category {
                PassengerCategory::Adult => adults += 1,
                PassengerCategory::Child => children += 1,
                PassengerCategory::Infant => infants += 1,
            }
        }

        Some(CodeSummary {
            code: String::from(code),
            service_date: first.service_date.clone(),
            vendor: first.vendor.clone(),
            group_number: first.group_number.clone(),
            adults,
            children,
            infants,
            lsr_gross,
            lsr_discount,
            transport,
            lsr_total,
            addon_gross,
            addon_discount,
            addon_total,
            grand_total,
            paid,
            balance: grand_total - paid,
        })
    }
}

/// The financial summary of one reservation, derived from cache rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeSummary {
    /// The reservation code.
    pub code: String,
    /// The lake-tour service date.
    pub service_date: String,
    /// The issuing vendor's display name (from the first row).
    pub vendor: String,
    /// The group number.
    pub group_number: String,
    /// Adult head count.
    pub adults: u32,
    /// Child head count.
    pub children: u32,
    /// Infant head count.
    pub infants: u32,
    /// Lake-tour gross amount.
    pub lsr_gross: i64,
    /// Lake-tour discount.
    pub lsr_discount: i64,
    /// Transport total.
    pub transport: i64,
    /// Lake-tour total including transport.
    pub lsr_total: i64,
    /// Add-on gross amount.
    pub addon_gross: i64,
    /// Add-on discount.
    pub addon_discount: i64,
    /// Add-on total.
    pub addon_total: i64,
    /// Grand total.
    pub grand_total: i64,
    /// Sum of payments for the code.
    pub paid: i64,
    /// Balance (may be negative after refunds).
    pub balance: i64,
}
