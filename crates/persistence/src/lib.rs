// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Valle Glaciares booking system.
//!
//! This crate provides the remote relational store the reservation core
//! reconciles against: reservation headers, passenger rows, payment rows,
//! vendor overrides and the append-only admin configuration. It is built
//! on Diesel over `SQLite`.
//!
//! In production the database file lives on shared storage and every
//! salesperson's session converges toward it through Reconciliation Sync;
//! tests run against unique in-memory databases.
//!
//! The crate also owns the locally persisted mirror state (`local`
//! module): the retired-code set, the vendor override mirror and operator
//! UI preferences. Local state is a best-effort cache: corrupt files load
//! as defaults and never stop the application.

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

use diesel::SqliteConnection;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use vg_booking::{RemotePassenger, RemotePayment, RemoteReservation};
use vg_booking_domain::{PricingConfig, VendorOverride};

mod data_models;
mod diesel_schema;
mod error;
mod local;
mod mutations;
mod queries;
mod sqlite;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use local::{LocalState, LocalStateFile};
pub use mutations::payments::PaymentParams;
pub use mutations::reservations::{PassengerParams, ReservationHeaderParams, ReservationUpdate};

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID, so
/// tests are isolated without time-based collisions.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for the remote store.
///
/// Owns one `SQLite` connection; backend selection happens at construction
/// time and is transparent to callers.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a persistence adapter backed by an in-memory database.
    ///
    /// Each call receives a unique shared in-memory database via atomic
    /// counter, ensuring deterministic test isolation.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name: String = format!("memdb_test_{db_id}");
        let shared_memory_url: String = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = sqlite::initialize_database(&shared_memory_url)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a persistence adapter backed by a database file.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = sqlite::initialize_database(path_str)?;
        sqlite::enable_wal_mode(&mut conn)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Reconciliation reads
    // ========================================================================

    /// Fetches every reservation header row.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn fetch_reservations(&mut self) -> Result<Vec<RemoteReservation>, PersistenceError> {
        queries::reservations::fetch_reservations(&mut self.conn)
    }

    /// Fetches the passenger rows of the given reservations.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn fetch_passengers(
        &mut self,
        reservation_ids: &[i64],
    ) -> Result<Vec<RemotePassenger>, PersistenceError> {
        queries::reservations::fetch_passengers(&mut self.conn, reservation_ids)
    }

    /// Fetches the payment rows of the given reservations.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn fetch_payments(
        &mut self,
        reservation_ids: &[i64],
    ) -> Result<Vec<RemotePayment>, PersistenceError> {
        queries::reservations::fetch_payments(&mut self.conn, reservation_ids)
    }

    /// Finds a reservation header by its code.
    ///
    /// # Errors
    ///
    /// Returns `ReservationNotFound` when no header carries the code.
    pub fn find_reservation_by_code(
        &mut self,
        code: &str,
    ) -> Result<RemoteReservation, PersistenceError> {
        queries::reservations::find_reservation_by_code(&mut self.conn, code)
    }

    /// Counts the passenger rows of one reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_passengers(&mut self, reservation_id: i64) -> Result<i64, PersistenceError> {
        queries::reservations::count_passengers(&mut self.conn, reservation_id)
    }

    // ========================================================================
    // Commit writes
    // ========================================================================

    /// Inserts a reservation header row and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (including duplicate codes).
    pub fn insert_reservation(
        &mut self,
        params: &ReservationHeaderParams,
    ) -> Result<i64, PersistenceError> {
        mutations::reservations::insert_reservation(&mut self.conn, params)
    }

    /// Inserts passenger rows for a reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_passengers(
        &mut self,
        reservation_id: i64,
        rows: &[PassengerParams],
    ) -> Result<usize, PersistenceError> {
        mutations::reservations::insert_passengers(&mut self.conn, reservation_id, rows)
    }

    /// Appends a payment row to a reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_payment(
        &mut self,
        reservation_id: i64,
        code: &str,
        params: &PaymentParams,
    ) -> Result<i64, PersistenceError> {
        mutations::payments::insert_payment(&mut self.conn, reservation_id, code, params)
    }

    // ========================================================================
    // Modification and void flows
    // ========================================================================

    /// Replaces every passenger row of a reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if either the delete or the insert fails.
    pub fn replace_passengers(
        &mut self,
        reservation_id: i64,
        rows: &[PassengerParams],
    ) -> Result<usize, PersistenceError> {
        mutations::reservations::replace_passengers(&mut self.conn, reservation_id, rows)
    }

    /// Rewrites the modifiable fields of a reservation header.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_reservation_header(
        &mut self,
        reservation_id: i64,
        update: &ReservationUpdate,
    ) -> Result<(), PersistenceError> {
        mutations::reservations::update_reservation_header(&mut self.conn, reservation_id, update)
    }

    /// Deletes every passenger row of a reservation (void flow).
    ///
    /// The header and payment rows remain as the audit trail.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_passengers(&mut self, reservation_id: i64) -> Result<usize, PersistenceError> {
        mutations::reservations::delete_passengers(&mut self.conn, reservation_id)
    }

    /// Persists a lazily assigned group number onto its header.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn persist_group_number(
        &mut self,
        code: &str,
        group_number: u32,
    ) -> Result<(), PersistenceError> {
        mutations::reservations::persist_group_number(&mut self.conn, code, group_number)
    }

    // ========================================================================
    // Vendor overrides
    // ========================================================================

    /// Lists every vendor override, keyed by vendor key.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_vendor_overrides(
        &mut self,
    ) -> Result<BTreeMap<String, VendorOverride>, PersistenceError> {
        queries::overrides::list_vendor_overrides(&mut self.conn)
    }

    /// Inserts or replaces a vendor override.
    ///
    /// # Errors
    ///
    /// Returns an error if the upsert fails.
    pub fn upsert_vendor_override(
        &mut self,
        vendor_key: &str,
        entry: &VendorOverride,
    ) -> Result<(), PersistenceError> {
        mutations::overrides::upsert_vendor_override(&mut self.conn, vendor_key, entry)
    }

    /// Deletes a vendor override entry. Returns whether a row existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_vendor_override(&mut self, vendor_key: &str) -> Result<bool, PersistenceError> {
        mutations::overrides::delete_vendor_override(&mut self.conn, vendor_key)
    }

    // ========================================================================
    // Admin configuration
    // ========================================================================

    /// Loads the effective admin configuration (most recent row wins).
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn load_admin_config(&mut self) -> Result<PricingConfig, PersistenceError> {
        queries::config::load_admin_config(&mut self.conn)
    }

    /// Appends a new admin configuration row.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the insert fails.
    pub fn store_admin_config(
        &mut self,
        config: &PricingConfig,
        updated_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::config::store_admin_config(&mut self.conn, config, updated_at)
    }
}
