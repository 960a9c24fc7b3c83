// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use std::collections::BTreeMap;

use crate::data_models::VendorOverrideRow;
use crate::diesel_schema;
use crate::error::PersistenceError;
use vg_booking_domain::VendorOverride;

/// Lists every vendor override, keyed by vendor key.
///
/// Negative stored range values are legacy damage and are dropped
/// field-wise rather than failing the whole load.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_vendor_overrides(
    conn: &mut SqliteConnection,
) -> Result<BTreeMap<String, VendorOverride>, PersistenceError> {
    let rows: Vec<VendorOverrideRow> = diesel_schema::vendor_overrides::table
        .order(diesel_schema::vendor_overrides::vendor_key.asc())
        .load::<VendorOverrideRow>(conn)?;

    let mut overrides: BTreeMap<String, VendorOverride> = BTreeMap::new();
    for row in rows {
        overrides.insert(
            row.vendor_key,
            VendorOverride {
                name: row.name,
                prefix: row.prefix,
                range_start: row.range_start.and_then(|n| u32::try_from(n).ok()),
                range_end: row.range_end.and_then(|n| u32::try_from(n).ok()),
            },
        );
    }
    Ok(overrides)
}
