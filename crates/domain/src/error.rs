// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Passenger category string is not recognized.
    InvalidCategory(String),
    /// Add-on service string is not recognized.
    InvalidAddonService(String),
    /// Reservation status string is not recognized.
    InvalidStatus(String),
    /// Vendor key is empty or invalid.
    InvalidVendorKey(String),
    /// A built-in vendor profile cannot be deleted.
    BuiltinVendorDelete {
        /// The vendor key that was targeted.
        vendor_key: String,
    },
    /// Vendor range bounds are inverted or zero.
    InvalidVendorRange {
        /// The vendor key being validated.
        vendor_key: String,
        /// The configured range start.
        range_start: u32,
        /// The configured range end.
        range_end: u32,
    },
    /// Vendor prefix is empty.
    EmptyVendorPrefix {
        /// The vendor key being validated.
        vendor_key: String,
    },
    /// A reservation code does not belong to the expected vendor prefix.
    CodeOutsideVendorPrefix {
        /// The offending code.
        code: String,
        /// The expected prefix.
        prefix: String,
    },
    /// A month value outside 1..=12 was supplied in season configuration.
    InvalidMonth(u8),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCategory(msg) => write!(f, "Invalid passenger category: {msg}"),
            Self::InvalidAddonService(msg) => write!(f, "Invalid add-on service: {msg}"),
            Self::InvalidStatus(msg) => write!(f, "Invalid reservation status: {msg}"),
            Self::InvalidVendorKey(msg) => write!(f, "Invalid vendor key: {msg}"),
            Self::BuiltinVendorDelete { vendor_key } => {
                write!(
                    f,
                    "Vendor '{vendor_key}' is a built-in profile and cannot be deleted"
                )
            }
            Self::InvalidVendorRange {
                vendor_key,
                range_start,
                range_end,
            } => {
                write!(
                    f,
                    "Vendor '{vendor_key}' has an invalid code range {range_start}..={range_end}"
                )
            }
            Self::EmptyVendorPrefix { vendor_key } => {
                write!(f, "Vendor '{vendor_key}' has an empty code prefix")
            }
            Self::CodeOutsideVendorPrefix { code, prefix } => {
                write!(
                    f,
                    "Reservation code '{code}' does not start with vendor prefix '{prefix}'"
                )
            }
            Self::InvalidMonth(month) => {
                write!(f, "Invalid month: {month}. Must be between 1 and 12")
            }
        }
    }
}

impl std::error::Error for DomainError {}
