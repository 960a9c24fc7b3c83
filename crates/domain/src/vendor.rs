// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{VendorKey, VendorOverride, VendorProfile};
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// The vendor key reserved for the system owner.
pub const OWNER_KEY: &str = "javier";

/// The display name the owner key resolves to when no override names it.
pub const OWNER_DISPLAY_NAME: &str = "Admin";

/// Placeholder shown when no vendor prefix matches a code.
pub const UNKNOWN_VENDOR: &str = "—";

/// The built-in vendor seed table.
const BUILTIN_VENDORS: [(&str, &str, &str, u32, u32); 4] = [
    ("javier", "Javier", "A", 1, 1000),
    ("vicente", "Vicente", "B", 1, 1000),
    ("eli", "Eli", "C", 1, 1000),
    ("otro", "Otro", "D", 1, 1000),
];

/// Resolves vendor keys to allocation profiles.
///
/// A fixed built-in table is merged with a runtime override map; overrides
/// win per-field, and keys absent from the built-in table resolve through
/// generic defaults. The override map mirrors the remote `vendor_overrides`
/// table (remote is the source of truth, the mirror is a fast-start copy).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VendorRegistry {
    /// The current override map, keyed by vendor key.
    overrides: BTreeMap<String, VendorOverride>,
}

impl VendorRegistry {
    /// Creates a registry with no overrides.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            overrides: BTreeMap::new(),
        }
    }

    /// Creates a registry from an override map.
    #[must_use]
    pub const fn with_overrides(overrides: BTreeMap<String, VendorOverride>) -> Self {
        Self { overrides }
    }

    /// Replaces the whole override map (mirror refresh from the remote).
    pub fn replace_overrides(&mut self, overrides: BTreeMap<String, VendorOverride>) {
        self.overrides = overrides;
    }

    /// Returns the current override map.
    #[must_use]
    pub const fn overrides(&self) -> &BTreeMap<String, VendorOverride> {
        &self.overrides
    }

    /// Returns the built-in profile for a key, if one exists.
    #[must_use]
    pub fn builtin(key: &str) -> Option<VendorProfile> {
        BUILTIN_VENDORS
            .iter()
            .find(|(k, ..)| *k == key)
            .map(|(_, name, prefix, start, end)| {
                VendorProfile::new(
                    String::from(*name),
                    String::from(*prefix),
                    *start,
                    *end,
                )
            })
    }

    /// Returns whether a key names a built-in vendor.
    #[must_use]
    pub fn is_builtin(key: &str) -> bool {
        BUILTIN_VENDORS.iter().any(|(k, ..)| *k == key)
    }

    /// Resolves a vendor key to its effective profile.
    ///
    /// Resolution order:
    /// 1. The owner key resolves its display name to "Admin" when the
    ///    override map carries no entry for it at all.
    /// 2. Built-in fields, overridden per-field where an override is set.
    /// 3. Keys without a built-in entry resolve through generic defaults:
    ///    the key itself as name, its first character uppercased as prefix,
    ///    and the range 1..=999.
    #[must_use]
    pub fn resolve(&self, key: &VendorKey) -> VendorProfile {
        let stored: Option<&VendorOverride> = self.overrides.get(key.value());

        // Owner rename applies only when no override entry exists for the key.
        let owner_rename: Option<VendorOverride> =
            (key.value() == OWNER_KEY && stored.is_none()).then(|| VendorOverride {
                name: Some(String::from(OWNER_DISPLAY_NAME)),
                ..VendorOverride::default()
            });
        let override_entry: Option<&VendorOverride> = owner_rename.as_ref().or(stored);

        let base: VendorProfile =
            Self::builtin(key.value()).unwrap_or_else(|| generic_profile(key.value()));

        apply_override(base, override_entry)
    }

    /// Returns every known vendor key: built-ins plus override-only keys.
    #[must_use]
    pub fn all_keys(&self) -> Vec<VendorKey> {
        let mut keys: BTreeSet<String> = BUILTIN_VENDORS
            .iter()
            .map(|(k, ..)| String::from(*k))
            .collect();
        keys.extend(self.overrides.keys().cloned());
        keys.into_iter().map(|k| VendorKey::new(&k)).collect()
    }

    /// Resolves the display vendor name for a reservation code.
    ///
    /// Matches the code against every known vendor prefix and picks the
    /// longest match, so a vendor prefixed "AB" wins over one prefixed "A".
    /// Returns [`UNKNOWN_VENDOR`] when nothing matches.
    #[must_use]
    pub fn vendor_name_from_code(&self, code: &str) -> String {
        if code.is_empty() {
            return String::from(UNKNOWN_VENDOR);
        }
        let mut best_name: Option<String> = None;
        let mut best_len: usize = 0;
        for key in self.all_keys() {
            let profile: VendorProfile = self.resolve(&key);
            if profile.prefix.is_empty() {
                continue;
            }
            if code.starts_with(&profile.prefix) && profile.prefix.len() > best_len {
                best_len = profile.prefix.len();
                best_name = Some(profile.name);
            }
        }
        best_name.unwrap_or_else(|| String::from(UNKNOWN_VENDOR))
    }

    /// Inserts or replaces an override entry.
    pub fn upsert_override(&mut self, key: &VendorKey, entry: VendorOverride) {
        self.overrides.insert(key.value().to_string(), entry);
    }

    /// Removes an added vendor's override entry.
    ///
    /// # Errors
    ///
    /// Returns an error when the key names a built-in vendor: built-in
    /// profiles are never hard-deleted.
    pub fn remove_override(&mut self, key: &VendorKey) -> Result<(), DomainError> {
        if Self::is_builtin(key.value()) {
            return Err(DomainError::BuiltinVendorDelete {
                vendor_key: key.value().to_string(),
            });
        }
        self.overrides.remove(key.value());
        Ok(())
    }
}

/// Builds the generic fallback profile for a key with no built-in entry.
fn generic_profile(key: &str) -> VendorProfile {
    let default_prefix: String = key
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_default();
    VendorProfile::new(String::from(key), default_prefix, 1, 999)
}

/// Applies override fields over a base profile; set fields win.
fn apply_override(base: VendorProfile, entry: Option<&VendorOverride>) -> VendorProfile {
    let Some(ov) = entry else {
        return base;
    };
    VendorProfile {
        name: ov.name.clone().unwrap_or(base.name),
        prefix: ov.prefix.clone().unwrap_or(base.prefix),
        range_start: ov.range_start.unwrap_or(base.range_start),
        range_end: ov.range_end.unwrap_or(base.range_end),
    }
}

/// Extracts the acting salesperson from a payment receipt note.
///
/// Payment receipts written by the post-sale and modification flows carry a
/// `vend:<name>` marker (case-insensitive, optionally spaced before the
/// colon, terminated by a newline or a `·` separator). Returns `None` when
/// no marker is present.
///
/// # Arguments
///
/// * `receipt` - The free-text receipt/note value
#[must_use]
pub fn vendor_from_receipt(receipt: &str) -> Option<String> {
    let bytes: &[u8] = receipt.as_bytes();
    let mut i: usize = 0;
    while i + 4 <= bytes.len() {
        // "vend" is ASCII, so a byte match always lands on a char boundary.
        if bytes[i..i + 4].eq_ignore_ascii_case(b"vend") {
            let rest: &str = receipt[i + 4..].trim_start_matches([' ', '\t']);
            if let Some(after_colon) = rest.strip_prefix(':') {
                let value: &str = after_colon
                    .split(['\n', '\r', '·'])
                    .next()
                    .unwrap_or_default()
                    .trim();
                if value.is_empty() {
                    return None;
                }
                return Some(String::from(value));
            }
        }
        i += 1;
    }
    None
}
