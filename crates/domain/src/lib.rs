// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod pricing;
mod quote;
mod types;
mod validation;
mod vendor;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use pricing::{PricingConfig, RateTable, Season, SeasonAmounts, SeasonRates, classify_season};
pub use quote::{PassengerCounts, ReservationQuote};
pub use types::{
    AddonCategory, AddonService, PassengerCategory, ReservationCode, ReservationStatus, VendorKey,
    VendorOverride, VendorProfile, code_suffix,
};
pub use validation::{ReservationInput, validate_reservation, validate_vendor_profile};
pub use vendor::{
    OWNER_DISPLAY_NAME, OWNER_KEY, UNKNOWN_VENDOR, VendorRegistry, vendor_from_receipt,
};
