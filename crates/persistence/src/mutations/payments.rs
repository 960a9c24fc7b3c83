// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::NewPayment;
use crate::diesel_schema;
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;

/// Parameters for appending one payment movement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentParams {
    /// Payment method (or an administrative marker such as `modificacion`).
    pub method: String,
    /// Signed amount; negative means refund, zero marks a log entry.
    pub amount: i64,
    /// Free-text receipt or note.
    pub receipt: Option<String>,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
}

/// Appends a payment row to a reservation.
///
/// Payments are append-only: the application never updates or deletes
/// them. Zero-amount rows are the administrative log entries written by
/// the modification and void flows.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `reservation_id` - The owning reservation id
/// * `code` - The reservation code the movement applies to
/// * `params` - The payment fields
///
/// # Returns
///
/// The payment id assigned by the database.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_payment(
    conn: &mut SqliteConnection,
    reservation_id: i64,
    code: &str,
    params: &PaymentParams,
) -> Result<i64, PersistenceError> {
    let row: NewPayment = NewPayment {
        reservation_id,
        code: String::from(code),
        method: params.method.clone(),
        amount: params.amount,
        receipt: params.receipt.clone(),
        created_at: params.created_at.clone(),
        reconciled: 0,
    };

    diesel::insert_into(diesel_schema::payments::table)
        .values(&row)
        .execute(conn)?;
    let payment_id: i64 = get_last_insert_rowid(conn)?;
    debug!(code, payment_id, amount = params.amount, "Appended payment row");
    Ok(payment_id)
}
