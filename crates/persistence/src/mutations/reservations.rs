// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reservation header and passenger mutations.
//!
//! The commit write order is: header, then passengers, then payments. There
//! is deliberately no multi-step rollback: a failure after the header
//! insert leaves the header row, and the operation boundary surfaces that
//! partial state to the operator instead of silently deleting audit trail.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::{NewPassenger, NewReservation};
use crate::diesel_schema;
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;

/// Parameters for inserting one reservation header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationHeaderParams {
    /// The allocated reservation code.
    pub code: String,
    /// The opaque id of the signed-in user committing the reservation.
    pub vendor_uid: String,
    /// The lake-tour service date.
    pub service_date: Option<String>,
    /// Lake-tour gross amount at commit time.
    pub lsr_value: i64,
    /// Transport total at commit time.
    pub transport_value: i64,
    /// Group-level lake-tour discount.
    pub lsr_discount: i64,
    /// Add-on provider.
    pub provider: Option<String>,
    /// Add-on service code.
    pub addon_service: Option<String>,
    /// Add-on service date.
    pub addon_date: Option<String>,
    /// Add-on gross amount at commit time.
    pub addon_value: i64,
    /// Group-level add-on discount.
    pub addon_discount: i64,
    /// Lake-tour total including transport.
    pub total_lsr: i64,
    /// Add-on total.
    pub total_addon: i64,
    /// Grand total of the quote.
    pub total_quote: i64,
    /// Amount paid at commit time.
    pub paid: i64,
    /// Outstanding balance at commit time.
    pub balance: i64,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
    /// The assigned group number.
    pub group_number: Option<u32>,
}

/// Parameters for inserting one passenger row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassengerParams {
    /// Passenger name.
    pub name: Option<String>,
    /// Identity document.
    pub document: Option<String>,
    /// Nationality.
    pub nationality: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Fare category string.
    pub category: String,
    /// Whether the passenger includes the add-on service.
    pub addon_included: bool,
}

/// Fields the modification flow may rewrite on a header.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = diesel_schema::reservations)]
#[diesel(treat_none_as_null = true)]
pub struct ReservationUpdate {
    pub service_date: Option<String>,
    pub transport_value: i64,
    pub lsr_discount: i64,
    pub provider: Option<String>,
    pub addon_service: Option<String>,
    pub addon_date: Option<String>,
    pub addon_value: i64,
    pub addon_discount: i64,
    pub total_lsr: i64,
    pub total_addon: i64,
    pub total_quote: i64,
    pub notes: Option<String>,
    pub group_number: Option<i32>,
}

/// Inserts a reservation header row.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `params` - The header fields
///
/// # Returns
///
/// The reservation id assigned by the database.
///
/// # Errors
///
/// Returns an error if the insert fails (including a duplicate code, which
/// the unique `code` column rejects).
pub fn insert_reservation(
    conn: &mut SqliteConnection,
    params: &ReservationHeaderParams,
) -> Result<i64, PersistenceError> {
    let row: NewReservation = NewReservation {
        code: params.code.clone(),
        vendor_uid: params.vendor_uid.clone(),
        service_date: params.service_date.clone(),
        lsr_value: params.lsr_value,
        transport_value: params.transport_value,
        lsr_discount: params.lsr_discount,
        provider: params.provider.clone(),
        addon_service: params.addon_service.clone(),
        addon_date: params.addon_date.clone(),
        addon_value: params.addon_value,
        addon_discount: params.addon_discount,
        total_lsr: params.total_lsr,
        total_addon: params.total_addon,
        total_quote: params.total_quote,
        paid: params.paid,
        balance: params.balance,
        notes: params.notes.clone(),
        created_at: params.created_at.clone(),
        group_number: params.group_number.and_then(|n| i32::try_from(n).ok()),
    };

    diesel::insert_into(diesel_schema::reservations::table)
        .values(&row)
        .execute(conn)?;
    let reservation_id: i64 = get_last_insert_rowid(conn)?;
    debug!(code = %params.code, reservation_id, "Inserted reservation header");
    Ok(reservation_id)
}

/// Inserts passenger rows for a reservation.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `reservation_id` - The owning reservation id
/// * `rows` - The passenger fields
///
/// # Returns
///
/// The number of rows inserted.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_passengers(
    conn: &mut SqliteConnection,
    reservation_id: i64,
    rows: &[PassengerParams],
) -> Result<usize, PersistenceError> {
    if rows.is_empty() {
        return Ok(0);
    }
    let new_rows: Vec<NewPassenger> = rows
        .iter()
        .map(|params| NewPassenger {
            reservation_id,
            name: params.name.clone(),
            document: params.document.clone(),
            nationality: params.nationality.clone(),
            phone: params.phone.clone(),
            email: params.email.clone(),
            category: params.category.clone(),
            addon_included: i32::from(params.addon_included),
        })
        .collect();

    let inserted: usize = diesel::insert_into(diesel_schema::passengers::table)
        .values(&new_rows)
        .execute(conn)?;
    debug!(reservation_id, inserted, "Inserted passenger rows");
    Ok(inserted)
}

/// Deletes every passenger row of a reservation.
///
/// Used by the void flow and as the first half of `replace_passengers`.
/// The header and its payment rows remain as the audit trail.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_passengers(
    conn: &mut SqliteConnection,
    reservation_id: i64,
) -> Result<usize, PersistenceError> {
    let deleted: usize = diesel::delete(
        diesel_schema::passengers::table
            .filter(diesel_schema::passengers::reservation_id.eq(reservation_id)),
    )
    .execute(conn)?;
    debug!(reservation_id, deleted, "Deleted passenger rows");
    Ok(deleted)
}

/// Replaces every passenger row of a reservation.
///
/// The modification flow resubmits the whole group: all rows sharing the
/// code are deleted and reinserted.
///
/// # Errors
///
/// Returns an error if either the delete or the insert fails.
pub fn replace_passengers(
    conn: &mut SqliteConnection,
    reservation_id: i64,
    rows: &[PassengerParams],
) -> Result<usize, PersistenceError> {
    delete_passengers(conn, reservation_id)?;
    insert_passengers(conn, reservation_id, rows)
}

/// Rewrites the modifiable fields of a reservation header.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_reservation_header(
    conn: &mut SqliteConnection,
    reservation_id: i64,
    update: &ReservationUpdate,
) -> Result<(), PersistenceError> {
    diesel::update(
        diesel_schema::reservations::table
            .filter(diesel_schema::reservations::reservation_id.eq(reservation_id)),
    )
    .set(update)
    .execute(conn)?;
    Ok(())
}

/// Persists a lazily assigned group number onto its header.
///
/// Once stored, the number is preserved by every later rebuild.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn persist_group_number(
    conn: &mut SqliteConnection,
    code: &str,
    group_number: u32,
) -> Result<(), PersistenceError> {
    diesel::update(
        diesel_schema::reservations::table.filter(diesel_schema::reservations::code.eq(code)),
    )
    .set(
        diesel_schema::reservations::group_number
            .eq(i32::try_from(group_number).unwrap_or(i32::MAX)),
    )
    .execute(conn)?;
    Ok(())
}
