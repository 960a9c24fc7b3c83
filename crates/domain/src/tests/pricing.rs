// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::pricing::{PricingConfig, Season, classify_season};
use crate::types::{AddonService, PassengerCategory};

#[test]
fn test_high_month_classifies_high() {
    let config: PricingConfig = PricingConfig::default();
    assert_eq!(classify_season("2026-01-15", &config), Season::High);
    assert_eq!(classify_season("2026-02-28", &config), Season::High);
}

#[test]
fn test_month_outside_high_set_classifies_low() {
    let config: PricingConfig = PricingConfig::default();
    assert_eq!(classify_season("2025-12-31", &config), Season::Low);
    assert_eq!(classify_season("2026-03-01", &config), Season::Low);
    // Months in neither configured list still classify low.
    assert_eq!(classify_season("2026-07-10", &config), Season::Low);
}

#[test]
fn test_classification_ignores_time_and_zone_suffix() {
    // A UTC-shifting parse would move 2026-01-31T23:30:00-03:00 into
    // February; reading the month from the string must not.
    let config: PricingConfig = PricingConfig::default();
    assert_eq!(
        classify_season("2026-01-31T23:30:00-03:00", &config),
        Season::High
    );
    assert_eq!(
        classify_season("2025-12-31T23:59:59Z", &config),
        Season::Low
    );
}

#[test]
fn test_empty_or_malformed_date_classifies_low() {
    let config: PricingConfig = PricingConfig::default();
    assert_eq!(classify_season("", &config), Season::Low);
    assert_eq!(classify_season("enero", &config), Season::Low);
    assert_eq!(classify_season("2026/01/15", &config), Season::Low);
    assert_eq!(classify_season("2026-1-5", &config), Season::Low);
}

#[test]
fn test_month_must_be_calendar_month() {
    let config: PricingConfig = PricingConfig::default();
    assert_eq!(classify_season("2026-00-10", &config), Season::Low);
    assert_eq!(classify_season("2026-13-10", &config), Season::Low);
}

#[test]
fn test_default_rate_card() {
    let config: PricingConfig = PricingConfig::default();
    assert_eq!(
        config
            .lsr_rates
            .for_season(Season::High)
            .rate_for(PassengerCategory::Adult),
        155_000
    );
    assert_eq!(
        config
            .lsr_rates
            .for_season(Season::Low)
            .rate_for(PassengerCategory::Child),
        80_000
    );
    assert_eq!(
        config
            .lsr_rates
            .for_season(Season::High)
            .rate_for(PassengerCategory::Infant),
        0
    );
    assert_eq!(config.transport.for_season(Season::High), 25_000);
    assert_eq!(config.addon_rates(AddonService::FM).adult, 28_000);
    assert_eq!(config.addon_rates(AddonService::CM).infant, 15_000);
}

#[test]
fn test_config_validate_rejects_bad_month() {
    let config: PricingConfig = PricingConfig {
        high_months: vec![1, 13],
        ..PricingConfig::default()
    };
    assert_eq!(config.validate(), Err(DomainError::InvalidMonth(13)));
    assert!(PricingConfig::default().validate().is_ok());
}
