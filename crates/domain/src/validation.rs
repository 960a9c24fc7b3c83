// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{AddonService, VendorProfile};

/// The fields of a reservation draft that validation inspects.
///
/// Validation runs before any remote call is attempted and collects every
/// corrective message instead of stopping at the first failure, so the
/// salesperson can fix the whole form in one pass.
#[derive(Debug, Clone, Default)]
pub struct ReservationInput {
    /// The lake-tour service date.
    pub service_date: String,
    /// Total passenger head count.
    pub passenger_count: u32,
    /// Whether any passenger includes the add-on service.
    pub any_addon_included: bool,
    /// The selected add-on service type, if any.
    pub addon_service: Option<AddonService>,
    /// The add-on service date.
    pub addon_date: String,
    /// Payment amounts entered at creation time.
    pub payment_amounts: Vec<i64>,
}

/// Validates a reservation draft, collecting corrective messages.
///
/// An empty result means the draft is valid.
///
/// # Arguments
///
/// * `input` - The draft fields to validate
#[must_use]
pub fn validate_reservation(input: &ReservationInput) -> Vec<String> {
    let mut errors: Vec<String> = Vec::new();

    if input.any_addon_included {
        if input.addon_service.is_none() {
            errors.push(String::from(
                "An add-on service type (FM/CM) must be selected.",
            ));
        }
        if input.addon_date.is_empty() {
            errors.push(String::from("An add-on service date must be provided."));
        }
    }

    if input.passenger_count == 0 {
        errors.push(String::from("At least one passenger must be entered."));
    }

    if input.service_date.is_empty() {
        errors.push(String::from(
            "A service date is required to assign a group number.",
        ));
    }

    // Rule: refunds are a post-sale operation, never part of creation.
    if input.payment_amounts.iter().any(|amount| *amount < 0) {
        errors.push(String::from(
            "Payment amounts cannot be negative at creation time.",
        ));
    }

    errors
}

/// Validates a resolved vendor profile's allocation fields.
///
/// # Arguments
///
/// * `vendor_key` - The key the profile resolves for (used in messages)
/// * `profile` - The resolved profile
///
/// # Errors
///
/// Returns an error if the prefix is empty or the range is inverted.
pub fn validate_vendor_profile(
    vendor_key: &str,
    profile: &VendorProfile,
) -> Result<(), DomainError> {
    if profile.prefix.is_empty() {
        return Err(DomainError::EmptyVendorPrefix {
            vendor_key: vendor_key.to_string(),
        });
    }
    if profile.range_start == 0 || profile.range_start > profile.range_end {
        return Err(DomainError::InvalidVendorRange {
            vendor_key: vendor_key.to_string(),
            range_start: profile.range_start,
            range_end: profile.range_end,
        });
    }
    Ok(())
}
