// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reconciliation Sync orchestration.
//!
//! A sync is a full snapshot rebuild: fetch the reservation headers, then
//! the passenger and payment rows restricted to those reservations, and
//! replace the cache wholesale. Nothing is merged incrementally, which is
//! what makes overlapping sync triggers safe: the last run to finish
//! simply wins.

use crate::error::{ApiError, translate_persistence_error};
use crate::request_response::SyncResponse;
use crate::state::ApplicationState;
use tracing::{info, warn};
use vg_booking::{RebuildOutcome, RemotePassenger, RemotePayment, RemoteReservation, rebuild_cache};
use vg_booking_domain::PricingConfig;
use vg_booking_persistence::{Persistence, PersistenceError};

/// The remote reads and write-backs a sync needs.
///
/// Injected rather than called ambiently so the sync contract (no cache
/// mutation unless every fetch succeeds) is testable against a failing
/// source.
pub trait RemoteSource {
    /// Fetches every reservation header row.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn fetch_reservations(&mut self) -> Result<Vec<RemoteReservation>, PersistenceError>;

    /// Fetches the passenger rows of the given reservations.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn fetch_passengers(
        &mut self,
        reservation_ids: &[i64],
    ) -> Result<Vec<RemotePassenger>, PersistenceError>;

    /// Fetches the payment rows of the given reservations.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn fetch_payments(
        &mut self,
        reservation_ids: &[i64],
    ) -> Result<Vec<RemotePayment>, PersistenceError>;

    /// Persists a backfilled group number onto its header.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn persist_group_number(
        &mut self,
        code: &str,
        group_number: u32,
    ) -> Result<(), PersistenceError>;
}

impl RemoteSource for Persistence {
    fn fetch_reservations(&mut self) -> Result<Vec<RemoteReservation>, PersistenceError> {
        Self::fetch_reservations(self)
    }

    fn fetch_passengers(
        &mut self,
        reservation_ids: &[i64],
    ) -> Result<Vec<RemotePassenger>, PersistenceError> {
        Self::fetch_passengers(self, reservation_ids)
    }

    fn fetch_payments(
        &mut self,
        reservation_ids: &[i64],
    ) -> Result<Vec<RemotePayment>, PersistenceError> {
        Self::fetch_payments(self, reservation_ids)
    }

    fn persist_group_number(
        &mut self,
        code: &str,
        group_number: u32,
    ) -> Result<(), PersistenceError> {
        Self::persist_group_number(self, code, group_number)
    }
}

/// Performs one reconciliation sync against the remote store.
///
/// The rebuild is applied only after all three fetches succeed; a failed
/// fetch leaves the cache byte-identical to its pre-sync state and the
/// error is surfaced. Zero fetched headers is a real empty state, not a
/// failure: the passenger/payment slices are cleared.
///
/// After a successful rebuild, group numbers assigned during backfill are
/// persisted back to their headers (best effort) and the reactive orphan
/// scan runs.
///
/// # Arguments
///
/// * `state` - The application state
/// * `source` - The remote store
/// * `now` - Timestamp substituted for rows without one (ISO 8601)
///
/// # Errors
///
/// Returns an error when any of the three fetches fails. The local cache
/// is untouched in that case and remains authoritative for continued
/// operation until the next successful sync.
pub fn sync<S: RemoteSource>(
    state: &mut ApplicationState,
    source: &mut S,
    now: &str,
) -> Result<SyncResponse, ApiError> {
    let reservations: Vec<RemoteReservation> = source
        .fetch_reservations()
        .map_err(|e| translate_persistence_error("fetch reservations", e))?;

    if reservations.is_empty() {
        state.cache.passengers.clear();
        state.cache.payments.clear();
        info!("Sync found no reservations; cache cleared");
        return Ok(SyncResponse::default());
    }

    let ids: Vec<i64> = reservations.iter().map(|r| r.id).collect();
    let passengers: Vec<RemotePassenger> = source
        .fetch_passengers(&ids)
        .map_err(|e| translate_persistence_error("fetch passengers", e))?;
    let payments: Vec<RemotePayment> = source
        .fetch_payments(&ids)
        .map_err(|e| translate_persistence_error("fetch payments", e))?;

    // All three fetches succeeded; the rebuild may now replace the cache.
    let outcome: RebuildOutcome = rebuild_cache(
        &reservations,
        &passengers,
        &payments,
        &state.registry,
        &state.pricing,
        now,
    );
    state.cache.passengers = outcome.passengers;
    state.cache.payments = outcome.payments;

    // Backfilled group numbers become persistent. A failed write-back is
    // not fatal: the same number is re-derived deterministically until a
    // later sync manages to store it.
    let mut groups_persisted: usize = 0;
    for (code, group_number) in &outcome.newly_assigned_groups {
        match source.persist_group_number(code, *group_number) {
            Ok(()) => groups_persisted += 1,
            Err(e) => {
                warn!(code = %code, error = %e, "Failed to persist backfilled group number");
            }
        }
    }

    let retired_orphans: Vec<String> = state.retired.retire_orphans(&state.cache);

    let response: SyncResponse = SyncResponse {
        reservations: reservations.len(),
        passengers: state.cache.passengers.len(),
        payments: state.cache.payments.len(),
        groups_persisted,
        retired_orphans,
    };
    info!(
        reservations = response.reservations,
        passengers = response.passengers,
        payments = response.payments,
        "Sync completed"
    );
    Ok(response)
}

/// Loads the effective pricing configuration from the remote store.
///
/// Runs at startup and whenever an admin changes the configuration; the
/// loaded configuration feeds every later quote and rebuild.
///
/// # Errors
///
/// Returns an error if the remote read fails; the previous configuration
/// stays live in that case.
pub fn load_remote_config(
    state: &mut ApplicationState,
    persistence: &mut Persistence,
) -> Result<(), ApiError> {
    let config: PricingConfig = persistence
        .load_admin_config()
        .map_err(|e| translate_persistence_error("load admin config", e))?;
    state.pricing = config;
    Ok(())
}
