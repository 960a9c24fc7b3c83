// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Identifies a salesperson.
///
/// Vendor keys are free-form strings: the built-in profiles use a fixed set
/// of keys, but administrators may introduce entirely new keys at runtime.
/// Keys are normalized to lowercase so lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VendorKey {
    /// The normalized key value.
    value: String,
}

impl VendorKey {
    /// Creates a new `VendorKey`, normalized to lowercase.
    ///
    /// # Arguments
    ///
    /// * `value` - The key value (will be trimmed and lowercased)
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.trim().to_lowercase(),
        }
    }

    /// Returns the key value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for VendorKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A salesperson's resolved allocation profile.
///
/// Every vendor owns a code prefix and an inclusive numeric range; the
/// reservation codes the vendor may issue are `prefix` + `n` for
/// `range_start <= n <= range_end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorProfile {
    /// The display name shown on vouchers and listings.
    pub name: String,
    /// The code prefix (e.g., "A").
    pub prefix: String,
    /// The first allocatable numeric suffix (inclusive).
    pub range_start: u32,
    /// The last allocatable numeric suffix (inclusive).
    pub range_end: u32,
}

impl VendorProfile {
    /// Creates a new `VendorProfile`.
    ///
    /// # Arguments
    ///
    /// * `name` - The display name
    /// * `prefix` - The code prefix
    /// * `range_start` - The first allocatable suffix
    /// * `range_end` - The last allocatable suffix
    #[must_use]
    pub const fn new(name: String, prefix: String, range_start: u32, range_end: u32) -> Self {
        Self {
            name,
            prefix,
            range_start,
            range_end,
        }
    }
}

/// A partial, per-field override of a vendor profile.
///
/// Unset fields fall through to the built-in profile (or to the generic
/// defaults when the key has no built-in entry). Overrides are stored in
/// the remote `vendor_overrides` table and mirrored locally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorOverride {
    /// Overridden display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Overridden code prefix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Overridden range start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_start: Option<u32>,
    /// Overridden range end.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_end: Option<u32>,
}

impl VendorOverride {
    /// Returns whether every field of this override is unset.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.prefix.is_none()
            && self.range_start.is_none()
            && self.range_end.is_none()
    }
}

/// A reservation code: vendor prefix followed by a decimal integer.
///
/// Codes carry no leading zeros ("A7", never "A007"). They are not a stored
/// entity of their own; they are derived from and validated against the
/// union of all code-bearing records.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReservationCode {
    /// The full code string.
    value: String,
}

impl ReservationCode {
    /// Creates a `ReservationCode` from a raw string.
    ///
    /// The value is trimmed and uppercased; legacy records carry free-form
    /// ids, so no further shape validation happens here.
    ///
    /// # Arguments
    ///
    /// * `value` - The raw code string
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.trim().to_uppercase(),
        }
    }

    /// Builds a code from a vendor prefix and a numeric suffix.
    #[must_use]
    pub fn from_parts(prefix: &str, number: u32) -> Self {
        Self {
            value: format!("{prefix}{number}"),
        }
    }

    /// Returns the full code string.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the numeric suffix of this code under the given prefix.
    ///
    /// Returns `None` when the code does not start with the prefix or the
    /// remainder is not a decimal integer (legacy ids are free-form).
    #[must_use]
    pub fn suffix_under(&self, prefix: &str) -> Option<u32> {
        code_suffix(&self.value, prefix)
    }
}

impl std::fmt::Display for ReservationCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Extracts the numeric suffix of a raw id string under a vendor prefix.
///
/// Shared by every scan over code-bearing records: a non-matching prefix or
/// a non-numeric remainder yields `None` and the record is skipped.
#[must_use]
pub fn code_suffix(id: &str, prefix: &str) -> Option<u32> {
    if prefix.is_empty() {
        return None;
    }
    let rest: &str = id.strip_prefix(prefix)?;
    if rest.is_empty() {
        return None;
    }
    rest.parse::<u32>().ok()
}

/// The lifecycle status of a reservation's passenger rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ReservationStatus {
    /// A lightweight hold: counts and date only, no committed rows.
    PreReservation,
    /// A fully committed reservation.
    #[default]
    Confirmed,
}

impl ReservationStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PreReservation => "pre-reservation",
            Self::Confirmed => "confirmed",
        }
    }
}

impl FromStr for ReservationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pre-reservation" => Ok(Self::PreReservation),
            "confirmed" => Ok(Self::Confirmed),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The fare category of an individual traveler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PassengerCategory {
    /// Adult fare.
    #[default]
    Adult,
    /// Child fare.
    Child,
    /// Infant fare (at most one infant per reservation travels free).
    Infant,
}

impl PassengerCategory {
    /// Parses a category from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not match a valid category.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "adult" => Ok(Self::Adult),
            "child" => Ok(Self::Child),
            "infant" => Ok(Self::Infant),
            _ => Err(DomainError::InvalidCategory(format!(
                "Unknown category: {s}"
            ))),
        }
    }

    /// Parses a category, falling back to `Infant` for unknown strings.
    ///
    /// Remote rows are legacy data; a single malformed category must never
    /// abort a full cache rebuild.
    #[must_use]
    pub fn parse_lossy(s: &str) -> Self {
        Self::parse(s).unwrap_or(Self::Infant)
    }

    /// Returns the string representation of this category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Adult => "adult",
            Self::Child => "child",
            Self::Infant => "infant",
        }
    }
}

impl std::fmt::Display for PassengerCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The add-on excursion service type (Capillas de Mármol).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddonService {
    /// Full Mármol circuit.
    FM,
    /// Capillas de Mármol circuit.
    CM,
}

impl AddonService {
    /// Parses an add-on service code from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not match a valid service code.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "FM" => Ok(Self::FM),
            "CM" => Ok(Self::CM),
            _ => Err(DomainError::InvalidAddonService(format!(
                "Unknown service code: {s}"
            ))),
        }
    }

    /// Returns the service code string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FM => "FM",
            Self::CM => "CM",
        }
    }
}

impl std::fmt::Display for AddonService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The billing category a passenger falls into for the add-on service.
///
/// The add-on distinguishes only adult and infant seats: children ride at
/// the infant seat class while being billed at their own rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddonCategory {
    /// Adult add-on seat.
    Adult,
    /// Infant add-on seat (children and infants).
    Infant,
}

impl AddonCategory {
    /// Maps a passenger fare category onto the add-on seat class.
    #[must_use]
    pub const fn from_passenger(category: PassengerCategory) -> Self {
        match category {
            PassengerCategory::Adult => Self::Adult,
            PassengerCategory::Child | PassengerCategory::Infant => Self::Infant,
        }
    }

    /// Returns the string representation of this add-on category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Adult => "adult",
            Self::Infant => "infant",
        }
    }
}
