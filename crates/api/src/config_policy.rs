// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Admin configuration policy.
//!
//! Enforced when an administrator stores a new configuration, before any
//! remote write. Classification only consults the high-month set, but a
//! configuration that prices services negatively or leaves the operator
//! without payment methods is rejected outright.

use thiserror::Error;
use vg_booking_domain::{PricingConfig, RateTable};

/// Admin configuration policy errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigPolicyError {
    /// A configured month is outside the calendar.
    #[error("Month {month} is invalid: months run 1 through 12")]
    InvalidMonth {
        /// The offending month value.
        month: u8,
    },

    /// A rate is negative.
    #[error("Rate '{field}' cannot be negative")]
    NegativeRate {
        /// The offending rate field.
        field: String,
    },

    /// No payment method is configured.
    #[error("At least one payment method must be configured")]
    NoPaymentMethods,

    /// No add-on provider is configured.
    #[error("At least one provider must be configured")]
    NoProviders,
}

/// Validates an admin configuration against the storage policy.
///
/// # Arguments
///
/// * `config` - The configuration to validate
///
/// # Errors
///
/// Returns the first policy violation found.
pub fn validate_config_policy(config: &PricingConfig) -> Result<(), ConfigPolicyError> {
    for month in config.high_months.iter().chain(config.low_months.iter()) {
        if !(1..=12).contains(month) {
            return Err(ConfigPolicyError::InvalidMonth { month: *month });
        }
    }

    check_rates("lsr_rates.high", config.lsr_rates.high)?;
    check_rates("lsr_rates.low", config.lsr_rates.low)?;
    check_rates("addon_fm", config.addon_fm)?;
    check_rates("addon_cm", config.addon_cm)?;
    if config.transport.high < 0 || config.transport.low < 0 {
        return Err(ConfigPolicyError::NegativeRate {
            field: String::from("transport"),
        });
    }

    if config.payment_methods.is_empty() {
        return Err(ConfigPolicyError::NoPaymentMethods);
    }
    if config.providers.is_empty() {
        return Err(ConfigPolicyError::NoProviders);
    }

    Ok(())
}

fn check_rates(field: &str, rates: RateTable) -> Result<(), ConfigPolicyError> {
    if rates.adult < 0 || rates.child < 0 || rates.infant < 0 {
        return Err(ConfigPolicyError::NegativeRate {
            field: String::from(field),
        });
    }
    Ok(())
}
