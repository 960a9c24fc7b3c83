// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response DTOs for the operation boundary.
//!
//! These are distinct from domain types and represent the API contract;
//! the server layer serializes them directly.

use serde::{Deserialize, Serialize};
use vg_booking_domain::{PassengerCategory, ReservationQuote, VendorProfile};

/// One passenger as entered on the sale form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerInput {
    /// Passenger name.
    #[serde(default)]
    pub name: String,
    /// Identity document (RUT or passport).
    #[serde(default)]
    pub document: String,
    /// Nationality.
    #[serde(default)]
    pub nationality: String,
    /// Contact phone.
    #[serde(default)]
    pub phone: String,
    /// Contact email.
    #[serde(default)]
    pub email: String,
    /// Fare category.
    #[serde(default)]
    pub category: PassengerCategory,
    /// Whether this passenger includes the add-on service.
    #[serde(default)]
    pub addon_included: bool,
}

/// One payment as entered on the sale form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentInput {
    /// Payment method.
    pub method: String,
    /// Signed amount.
    pub amount: i64,
    /// Free-text receipt or note.
    #[serde(default)]
    pub receipt: String,
}

/// Request to commit a reservation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitReservationRequest {
    /// The issuing vendor's key.
    pub vendor_key: String,
    /// The opaque id of the signed-in user (from the auth provider).
    #[serde(default)]
    pub vendor_uid: String,
    /// The code the sale form was opened with (re-validated at commit).
    #[serde(default)]
    pub candidate_code: String,
    /// The lake-tour service date.
    #[serde(default)]
    pub service_date: String,
    /// Requested lake-tour discount.
    #[serde(default)]
    pub lsr_discount: i64,
    /// Whether the per-person transport charge applies.
    #[serde(default)]
    pub include_transport: bool,
    /// Selected add-on service code (`FM`/`CM`), if any.
    #[serde(default)]
    pub addon_service: Option<String>,
    /// Add-on service date.
    #[serde(default)]
    pub addon_date: String,
    /// Add-on provider.
    #[serde(default)]
    pub addon_provider: String,
    /// Requested add-on discount.
    #[serde(default)]
    pub addon_discount: i64,
    /// Free-text notes.
    #[serde(default)]
    pub notes: String,
    /// The passengers of the reservation.
    pub passengers: Vec<PassengerInput>,
    /// Payments entered at creation time.
    #[serde(default)]
    pub payments: Vec<PaymentInput>,
}

/// Whether the remote half of a locally applied operation succeeded.
///
/// "Succeeded locally but failed remotely" is a distinct, surfaced state:
/// the salesperson must know whether a reservation truly committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RemoteWriteStatus {
    /// Every remote write succeeded.
    Persisted {
        /// The remote reservation id.
        reservation_id: i64,
    },
    /// The local cache was updated but a remote write failed.
    Failed {
        /// A human-readable description of the failure.
        message: String,
    },
}

impl RemoteWriteStatus {
    /// Returns whether the remote writes succeeded.
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        matches!(self, Self::Persisted { .. })
    }
}

/// Response for a committed reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitReservationResponse {
    /// The allocated reservation code.
    pub code: String,
    /// The assigned group number.
    pub group_number: String,
    /// The issuing vendor's display name.
    pub vendor: String,
    /// The full quote at commit time.
    pub quote: ReservationQuote,
    /// Remote persistence outcome.
    pub remote: RemoteWriteStatus,
    /// Codes newly retired by the post-commit orphan scan.
    pub retired_orphans: Vec<String>,
}

/// Response for a next-code preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextCodeResponse {
    /// The vendor key the preview is for.
    pub vendor_key: String,
    /// The next free code.
    pub code: String,
}

/// Response for a group-number preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupPreviewResponse {
    /// The service date the preview is for.
    pub date: String,
    /// The group number the next booking on that date would take.
    pub group_number: String,
}

/// Request to record a post-sale payment or refund.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPaymentRequest {
    /// The reservation code the movement applies to.
    pub code: String,
    /// The acting salesperson's display name (stamped into the receipt).
    pub vendor: String,
    /// Payment method.
    pub method: String,
    /// Signed amount; negative means refund.
    pub amount: i64,
    /// Free-text receipt or note.
    #[serde(default)]
    pub receipt: String,
}

/// Response for a recorded payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPaymentResponse {
    /// The reservation code.
    pub code: String,
    /// The receipt text as stored (including the `vend:` marker).
    pub receipt: String,
    /// Remote persistence outcome.
    pub remote: RemoteWriteStatus,
    /// Codes newly retired by the reactive orphan scan.
    pub retired_orphans: Vec<String>,
}

/// Request to modify an existing reservation.
///
/// The flow reloads by code, edits, and resubmits the whole group: every
/// row sharing the code is replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifyReservationRequest {
    /// The reservation code to modify.
    pub code: String,
    /// The acting salesperson's display name.
    pub vendor: String,
    /// The (possibly changed) service date.
    pub service_date: String,
    /// Requested lake-tour discount.
    #[serde(default)]
    pub lsr_discount: i64,
    /// Whether the transport charge applies.
    #[serde(default)]
    pub include_transport: bool,
    /// Selected add-on service code, if any.
    #[serde(default)]
    pub addon_service: Option<String>,
    /// Add-on service date.
    #[serde(default)]
    pub addon_date: String,
    /// Add-on provider.
    #[serde(default)]
    pub addon_provider: String,
    /// Requested add-on discount.
    #[serde(default)]
    pub addon_discount: i64,
    /// Free-text notes.
    #[serde(default)]
    pub notes: String,
    /// The resubmitted passenger list.
    pub passengers: Vec<PassengerInput>,
    /// The reason for the modification (logged).
    pub reason: String,
}

/// Response for a modified reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifyReservationResponse {
    /// The reservation code.
    pub code: String,
    /// The group number after the modification.
    pub group_number: String,
    /// The recomputed quote.
    pub quote: ReservationQuote,
    /// Remote persistence outcome.
    pub remote: RemoteWriteStatus,
}

/// Request to void a reservation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoidReservationRequest {
    /// The reservation code to void.
    pub code: String,
    /// The acting salesperson's display name.
    pub vendor: String,
    /// The reason for the void (required, logged).
    pub reason: String,
}

/// Response for a voided reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoidReservationResponse {
    /// The voided code.
    pub code: String,
    /// Whether the code is now retired (it had payment rows).
    pub retired: bool,
    /// Remote persistence outcome.
    pub remote: RemoteWriteStatus,
}

/// Response for an explicit code retirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetireCodeResponse {
    /// The retired code.
    pub code: String,
    /// Whether the code was newly added to the retired set.
    pub newly_retired: bool,
}

/// Request to create or edit a vendor profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsertVendorRequest {
    /// The vendor key.
    pub vendor_key: String,
    /// Overridden display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Overridden code prefix.
    #[serde(default)]
    pub prefix: Option<String>,
    /// Overridden range start.
    #[serde(default)]
    pub range_start: Option<u32>,
    /// Overridden range end.
    #[serde(default)]
    pub range_end: Option<u32>,
}

/// One vendor as listed for administration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorListing {
    /// The vendor key.
    pub vendor_key: String,
    /// The resolved profile.
    pub profile: VendorProfile,
    /// Whether the key names a built-in vendor.
    pub builtin: bool,
}

/// Response for a completed reconciliation sync.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncResponse {
    /// Reservation headers fetched.
    pub reservations: usize,
    /// Passenger rows rebuilt.
    pub passengers: usize,
    /// Payment rows rebuilt.
    pub payments: usize,
    /// Group numbers newly persisted back to the remote store.
    pub groups_persisted: usize,
    /// Codes newly retired by the post-sync orphan scan.
    pub retired_orphans: Vec<String>,
}
