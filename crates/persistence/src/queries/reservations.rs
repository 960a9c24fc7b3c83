// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read queries for the three-step reconciliation fetch.
//!
//! The sync contract fetches reservation headers first, then passenger and
//! payment rows restricted to those reservation ids. Each step surfaces its
//! own error so a failed step leaves the caller's cache untouched.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::{PassengerRow, PaymentRow, ReservationRow};
use crate::diesel_schema;
use crate::error::PersistenceError;
use vg_booking::{RemotePassenger, RemotePayment, RemoteReservation};

/// Fetches every reservation header row.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn fetch_reservations(
    conn: &mut SqliteConnection,
) -> Result<Vec<RemoteReservation>, PersistenceError> {
    let rows: Vec<ReservationRow> = diesel_schema::reservations::table
        .order(diesel_schema::reservations::reservation_id.asc())
        .load::<ReservationRow>(conn)?;
    Ok(rows.into_iter().map(to_remote_reservation).collect())
}

/// Fetches the passenger rows of the given reservations.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `reservation_ids` - The reservation ids returned by the header fetch
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn fetch_passengers(
    conn: &mut SqliteConnection,
    reservation_ids: &[i64],
) -> Result<Vec<RemotePassenger>, PersistenceError> {
    if reservation_ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows: Vec<PassengerRow> = diesel_schema::passengers::table
        .filter(diesel_schema::passengers::reservation_id.eq_any(reservation_ids))
        .order(diesel_schema::passengers::passenger_id.asc())
        .load::<PassengerRow>(conn)?;
    Ok(rows.into_iter().map(to_remote_passenger).collect())
}

/// Fetches the payment rows of the given reservations.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `reservation_ids` - The reservation ids returned by the header fetch
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn fetch_payments(
    conn: &mut SqliteConnection,
    reservation_ids: &[i64],
) -> Result<Vec<RemotePayment>, PersistenceError> {
    if reservation_ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows: Vec<PaymentRow> = diesel_schema::payments::table
        .filter(diesel_schema::payments::reservation_id.eq_any(reservation_ids))
        .order(diesel_schema::payments::payment_id.asc())
        .load::<PaymentRow>(conn)?;
    Ok(rows.into_iter().map(to_remote_payment).collect())
}

/// Finds a reservation header by its code.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `code` - The reservation code
///
/// # Errors
///
/// Returns `ReservationNotFound` when no header carries the code.
pub fn find_reservation_by_code(
    conn: &mut SqliteConnection,
    code: &str,
) -> Result<RemoteReservation, PersistenceError> {
    let row: ReservationRow = diesel_schema::reservations::table
        .filter(diesel_schema::reservations::code.eq(code))
        .first::<ReservationRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::ReservationNotFound(String::from(code)))?;
    Ok(to_remote_reservation(row))
}

/// Counts passenger rows of one reservation.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_passengers(
    conn: &mut SqliteConnection,
    reservation_id: i64,
) -> Result<i64, PersistenceError> {
    Ok(diesel_schema::passengers::table
        .filter(diesel_schema::passengers::reservation_id.eq(reservation_id))
        .count()
        .get_result(conn)?)
}

fn to_remote_reservation(row: ReservationRow) -> RemoteReservation {
    RemoteReservation {
        id: row.reservation_id,
        code: row.code,
        vendor_uid: row.vendor_uid,
        service_date: row.service_date,
        transport_value: row.transport_value,
        lsr_discount: row.lsr_discount,
        provider: row.provider,
        addon_service: row.addon_service,
        addon_date: row.addon_date,
        addon_discount: row.addon_discount,
        notes: row.notes,
        created_at: Some(row.created_at),
        group_number: row.group_number.map(i64::from),
    }
}

fn to_remote_passenger(row: PassengerRow) -> RemotePassenger {
    RemotePassenger {
        id: row.passenger_id,
        reservation_id: row.reservation_id,
        name: row.name,
        document: row.document,
        nationality: row.nationality,
        phone: row.phone,
        email: row.email,
        category: row.category,
        addon_included: row.addon_included != 0,
    }
}

fn to_remote_payment(row: PaymentRow) -> RemotePayment {
    RemotePayment {
        id: row.payment_id,
        reservation_id: row.reservation_id,
        method: Some(row.method),
        amount: row.amount,
        receipt: row.receipt,
        created_at: Some(row.created_at),
    }
}
