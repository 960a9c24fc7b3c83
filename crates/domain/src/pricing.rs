// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{AddonService, PassengerCategory};
use serde::{Deserialize, Serialize};

/// The pricing tier derived from a service month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    /// High season (summer months).
    High,
    /// Low season. Any month not configured as high classifies low.
    #[default]
    Low,
}

impl Season {
    /// Returns the string representation of this season.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Low => "low",
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-category rates in CLP. CLP carries no decimals, so amounts are `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    /// Adult rate.
    pub adult: i64,
    /// Child rate.
    pub child: i64,
    /// Infant rate.
    pub infant: i64,
}

impl RateTable {
    /// Returns the rate for a passenger category.
    #[must_use]
    pub const fn rate_for(&self, category: PassengerCategory) -> i64 {
        match category {
            PassengerCategory::Adult => self.adult,
            PassengerCategory::Child => self.child,
            PassengerCategory::Infant => self.infant,
        }
    }
}

/// Lake-tour rates per season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonRates {
    /// High-season rate table.
    pub high: RateTable,
    /// Low-season rate table.
    pub low: RateTable,
}

impl SeasonRates {
    /// Returns the rate table for a season.
    #[must_use]
    pub const fn for_season(&self, season: Season) -> RateTable {
        match season {
            Season::High => self.high,
            Season::Low => self.low,
        }
    }
}

/// A per-season flat amount (used for the per-person transport charge).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonAmounts {
    /// High-season amount.
    pub high: i64,
    /// Low-season amount.
    pub low: i64,
}

impl SeasonAmounts {
    /// Returns the amount for a season.
    #[must_use]
    pub const fn for_season(&self, season: Season) -> i64 {
        match season {
            Season::High => self.high,
            Season::Low => self.low,
        }
    }
}

/// The complete admin-configurable pricing configuration.
///
/// The remote `admin_config` table stores this whole structure as a JSON
/// payload, most-recent row wins; the defaults below match the operator's
/// built-in rate card and are used until an admin stores a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Calendar months (1..=12) classified as high season.
    pub high_months: Vec<u8>,
    /// Calendar months (1..=12) classified as low season. Informational:
    /// classification only consults `high_months`.
    pub low_months: Vec<u8>,
    /// Lake-tour rates per season.
    pub lsr_rates: SeasonRates,
    /// Per-person transport charge per season.
    pub transport: SeasonAmounts,
    /// Full Mármol add-on rates.
    pub addon_fm: RateTable,
    /// Capillas de Mármol add-on rates.
    pub addon_cm: RateTable,
    /// Add-on providers offered to the operator.
    pub providers: Vec<String>,
    /// Accepted payment methods.
    pub payment_methods: Vec<String>,
}

impl PricingConfig {
    /// Returns the add-on rate table for a service type.
    #[must_use]
    pub const fn addon_rates(&self, service: AddonService) -> RateTable {
        match service {
            AddonService::FM => self.addon_fm,
            AddonService::CM => self.addon_cm,
        }
    }

    /// Validates month lists and rate signs.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured month falls outside 1..=12.
    pub fn validate(&self) -> Result<(), DomainError> {
        for month in self.high_months.iter().chain(self.low_months.iter()) {
            if !(1..=12).contains(month) {
                return Err(DomainError::InvalidMonth(*month));
            }
        }
        Ok(())
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            high_months: vec![1, 2],
            low_months: vec![10, 11, 12, 3, 4],
            lsr_rates: SeasonRates {
                high: RateTable {
                    adult: 155_000,
                    child: 90_000,
                    infant: 0,
                },
                low: RateTable {
                    adult: 145_000,
                    child: 80_000,
                    infant: 0,
                },
            },
            transport: SeasonAmounts {
                high: 25_000,
                low: 25_000,
            },
            addon_fm: RateTable {
                adult: 28_000,
                child: 28_000,
                infant: 28_000,
            },
            addon_cm: RateTable {
                adult: 15_000,
                child: 15_000,
                infant: 15_000,
            },
            providers: vec![
                String::from("Mármol Expediciones"),
                String::from("Mármol Patagonia"),
            ],
            payment_methods: vec![
                String::from("tarjeta"),
                String::from("efectivo"),
                String::from("efx"),
                String::from("transferencia"),
            ],
        }
    }
}

/// Classifies a service date into a season.
///
/// The calendar month is extracted from the leading `YYYY-MM-DD` of the
/// string. Parsing through a date constructor would interpret bare dates as
/// UTC midnight and can shift the calendar month by one near month
/// boundaries in western timezones, so the month digits are read directly.
/// A trailing time-of-day or timezone suffix is ignored.
///
/// Empty or unrecognizable dates classify low.
///
/// # Arguments
///
/// * `date` - The service date string
/// * `config` - The pricing configuration holding the high-season months
#[must_use]
pub fn classify_season(date: &str, config: &PricingConfig) -> Season {
    match extract_month(date) {
        Some(month) if config.high_months.contains(&month) => Season::High,
        _ => Season::Low,
    }
}

/// Extracts the calendar month (1..=12) from a leading `YYYY-MM-DD`.
fn extract_month(date: &str) -> Option<u8> {
    let bytes: &[u8] = date.as_bytes();
    if bytes.len() < 10 {
        return None;
    }
    let shape_ok: bool = bytes[0..4].iter().all(u8::is_ascii_digit)
        && bytes[4] == b'-'
        && bytes[5..7].iter().all(u8::is_ascii_digit)
        && bytes[7] == b'-'
        && bytes[8..10].iter().all(u8::is_ascii_digit);
    if !shape_ok {
        return None;
    }
    let month: u8 = date.get(5..7)?.parse().ok()?;
    (1..=12).contains(&month).then_some(month)
}
