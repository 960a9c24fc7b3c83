// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::NewVendorOverride;
use crate::diesel_schema;
use crate::error::PersistenceError;
use vg_booking_domain::VendorOverride;

/// Inserts or replaces a vendor override.
///
/// The `vendor_key` column is unique; an existing entry is rewritten
/// field-for-field.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `vendor_key` - The vendor key
/// * `entry` - The override fields
///
/// # Errors
///
/// Returns an error if the upsert fails.
pub fn upsert_vendor_override(
    conn: &mut SqliteConnection,
    vendor_key: &str,
    entry: &VendorOverride,
) -> Result<(), PersistenceError> {
    let row: NewVendorOverride = NewVendorOverride {
        vendor_key: String::from(vendor_key),
        name: entry.name.clone(),
        prefix: entry.prefix.clone(),
        range_start: entry.range_start.and_then(|n| i32::try_from(n).ok()),
        range_end: entry.range_end.and_then(|n| i32::try_from(n).ok()),
    };

    diesel::insert_into(diesel_schema::vendor_overrides::table)
        .values(&row)
        .on_conflict(diesel_schema::vendor_overrides::vendor_key)
        .do_update()
        .set((
            diesel_schema::vendor_overrides::name.eq(row.name.clone()),
            diesel_schema::vendor_overrides::prefix.eq(row.prefix.clone()),
            diesel_schema::vendor_overrides::range_start.eq(row.range_start),
            diesel_schema::vendor_overrides::range_end.eq(row.range_end),
        ))
        .execute(conn)?;
    debug!(vendor_key, "Upserted vendor override");
    Ok(())
}

/// Deletes a vendor override entry.
///
/// Built-in-vendor protection is enforced at the operation boundary; this
/// mutation only removes the row.
///
/// # Returns
///
/// Whether a row was actually deleted.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_vendor_override(
    conn: &mut SqliteConnection,
    vendor_key: &str,
) -> Result<bool, PersistenceError> {
    let deleted: usize = diesel::delete(
        diesel_schema::vendor_overrides::table
            .filter(diesel_schema::vendor_overrides::vendor_key.eq(vendor_key)),
    )
    .execute(conn)?;
    debug!(vendor_key, deleted, "Deleted vendor override");
    Ok(deleted > 0)
}
