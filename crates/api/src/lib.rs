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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod config_policy;
mod error;
mod operations;
mod request_response;
mod state;
mod sync;

#[cfg(test)]
mod tests;

pub use config_policy::{ConfigPolicyError, validate_config_policy};
pub use error::{
    ApiError, translate_allocation_error, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use operations::{
    commit_reservation, delete_vendor, group_preview, list_vendors, modify_reservation,
    preview_code, record_payment, refresh_vendor_mirror, retire_code, update_admin_config,
    upsert_vendor, void_reservation,
};
pub use request_response::{
    CommitReservationRequest, CommitReservationResponse, GroupPreviewResponse,
    ModifyReservationRequest, ModifyReservationResponse, NextCodeResponse, PassengerInput,
    PaymentInput, RecordPaymentRequest, RecordPaymentResponse, RemoteWriteStatus,
    RetireCodeResponse, SyncResponse, UpsertVendorRequest, VendorListing, VoidReservationRequest,
    VoidReservationResponse,
};
pub use state::ApplicationState;
pub use sync::{RemoteSource, load_remote_config, sync};
