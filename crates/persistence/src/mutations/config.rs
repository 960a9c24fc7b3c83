// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::data_models::NewAdminConfig;
use crate::diesel_schema;
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;
use vg_booking_domain::PricingConfig;

/// Appends a new admin configuration row.
///
/// The table is append-only; readers take the most recent row by update
/// timestamp, so storing never destroys configuration history.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `config` - The full pricing configuration to store
/// * `updated_at` - The update timestamp (ISO 8601)
///
/// # Returns
///
/// The config id assigned by the database.
///
/// # Errors
///
/// Returns an error if serialization or the insert fails.
pub fn store_admin_config(
    conn: &mut SqliteConnection,
    config: &PricingConfig,
    updated_at: &str,
) -> Result<i64, PersistenceError> {
    let payload: String = serde_json::to_string(config)?;
    let row: NewAdminConfig = NewAdminConfig {
        payload,
        updated_at: String::from(updated_at),
    };

    diesel::insert_into(diesel_schema::admin_config::table)
        .values(&row)
        .execute(conn)?;
    let config_id: i64 = get_last_insert_rowid(conn)?;
    info!(config_id, "Stored admin configuration");
    Ok(config_id)
}
