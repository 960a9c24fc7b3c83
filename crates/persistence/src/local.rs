// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Locally persisted mirror state.
//!
//! Everything in this file is a best-effort cache, never a source of
//! truth: the retired-code set and override mirror speed up startup, and
//! the rest is operator UI preference. Loads degrade to defaults on any
//! corruption; save failures are logged and swallowed.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use vg_booking::{LocalCache, RetiredCodes, parse_or_default};
use vg_booking_domain::VendorOverride;

/// The locally persisted application state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalState {
    /// Codes permanently excluded from reallocation.
    #[serde(default)]
    pub retired: RetiredCodes,
    /// Mirror of the remote vendor override table.
    #[serde(default)]
    pub vendor_overrides: BTreeMap<String, VendorOverride>,
    /// The last full cache snapshot (fast start before the first sync).
    #[serde(default)]
    pub cache: LocalCache,
    /// The code last opened in the modification screen.
    #[serde(default)]
    pub last_opened_code: Option<String>,
    /// The date last selected in the day viewer.
    #[serde(default)]
    pub day_view_date: Option<String>,
    /// Operator-adjusted column widths, keyed by column id.
    #[serde(default)]
    pub column_widths: BTreeMap<String, u32>,
    /// Free-text comments per service day.
    #[serde(default)]
    pub day_comments: BTreeMap<String, String>,
    /// Months hidden in the month viewer (`YYYY-MM`).
    #[serde(default)]
    pub hidden_months: Vec<String>,
}

/// Reads and writes the local state file.
#[derive(Debug, Clone)]
pub struct LocalStateFile {
    path: PathBuf,
}

impl LocalStateFile {
    /// Creates a handle for the given path. Nothing is read yet.
    #[must_use]
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the backing path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the local state, degrading to defaults on any failure.
    #[must_use]
    pub fn load(&self) -> LocalState {
        let raw: Option<String> = fs::read_to_string(&self.path).ok();
        parse_or_default(raw.as_deref())
    }

    /// Saves the local state, best effort.
    ///
    /// A failed write is logged and swallowed: losing the mirror only
    /// costs the next startup a full sync.
    pub fn save(&self, state: &LocalState) {
        let encoded: String = match serde_json::to_string_pretty(state) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "Failed to encode local state");
                return;
            }
        };
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warn!(error = %e, "Failed to create local state directory");
            return;
        }
        if let Err(e) = fs::write(&self.path, encoded) {
            warn!(error = %e, path = %self.path.display(), "Failed to write local state");
        }
    }
}
