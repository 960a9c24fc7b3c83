// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::warn;

use crate::data_models::AdminConfigRow;
use crate::diesel_schema;
use crate::error::PersistenceError;
use vg_booking_domain::PricingConfig;

/// Loads the effective admin configuration.
///
/// The `admin_config` table is append-only and most-recent-wins by update
/// timestamp. When no row exists, or the latest payload does not decode,
/// the built-in defaults apply: configuration is a lookup table, never a
/// reason to stop taking reservations.
///
/// # Errors
///
/// Returns an error if the query itself fails.
pub fn load_admin_config(conn: &mut SqliteConnection) -> Result<PricingConfig, PersistenceError> {
    let latest: Option<AdminConfigRow> = diesel_schema::admin_config::table
        .order(diesel_schema::admin_config::updated_at.desc())
        .then_order_by(diesel_schema::admin_config::config_id.desc())
        .first::<AdminConfigRow>(conn)
        .optional()?;

    Ok(latest.map_or_else(PricingConfig::default, |row| {
        serde_json::from_str(&row.payload).unwrap_or_else(|e| {
            warn!(error = %e, "Stored admin config payload did not decode; using defaults");
            PricingConfig::default()
        })
    }))
}
