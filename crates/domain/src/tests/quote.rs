// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::pricing::{PricingConfig, Season};
use crate::quote::{PassengerCounts, ReservationQuote};
use crate::types::AddonService;

const HIGH_DATE: &str = "2026-01-15";
const LOW_DATE: &str = "2025-11-20";

fn quote_simple(counts: PassengerCounts, date: &str) -> ReservationQuote {
    ReservationQuote::compute(
        &PricingConfig::default(),
        date,
        counts,
        0,
        false,
        None,
        PassengerCounts::default(),
        0,
        0,
    )
}

#[test]
fn test_two_adults_high_season() {
    let quote: ReservationQuote = quote_simple(PassengerCounts::new(2, 0, 0), HIGH_DATE);
    assert_eq!(quote.season, Season::High);
    assert_eq!(quote.lsr_subtotal, 310_000);
    assert_eq!(quote.grand_total, 310_000);
}

#[test]
fn test_one_infant_travels_free() {
    let quote: ReservationQuote = quote_simple(PassengerCounts::new(1, 0, 1), HIGH_DATE);
    // One adult plus one freed infant (infant rate is zero).
    assert_eq!(quote.lsr_subtotal, 155_000);
}

#[test]
fn test_additional_infants_billed_as_children() {
    // Three infants: exactly one at the infant rate, two at the child rate,
    // regardless of input ordering (counts carry no order at all).
    let quote: ReservationQuote = quote_simple(PassengerCounts::new(0, 0, 3), HIGH_DATE);
    assert_eq!(quote.lsr_subtotal, 2 * 90_000);

    let quote: ReservationQuote = quote_simple(PassengerCounts::new(0, 0, 3), LOW_DATE);
    assert_eq!(quote.lsr_subtotal, 2 * 80_000);
}

#[test]
fn test_transport_charges_per_person() {
    let quote: ReservationQuote = ReservationQuote::compute(
        &PricingConfig::default(),
        HIGH_DATE,
        PassengerCounts::new(2, 1, 1),
        0,
        true,
        None,
        PassengerCounts::default(),
        0,
        0,
    );
    assert_eq!(quote.transport_total, 4 * 25_000);
    assert_eq!(quote.lsr_total, quote.lsr_subtotal + quote.transport_total);
}

#[test]
fn test_discount_clamps_to_subtotal() {
    let quote: ReservationQuote = ReservationQuote::compute(
        &PricingConfig::default(),
        LOW_DATE,
        PassengerCounts::new(1, 0, 0),
        1_000_000,
        false,
        None,
        PassengerCounts::default(),
        0,
        0,
    );
    assert_eq!(quote.lsr_discount, 145_000);
    assert_eq!(quote.lsr_total, 0);
}

#[test]
fn test_addon_priced_from_included_counts() {
    let quote: ReservationQuote = ReservationQuote::compute(
        &PricingConfig::default(),
        HIGH_DATE,
        PassengerCounts::new(2, 1, 0),
        0,
        false,
        Some(AddonService::CM),
        PassengerCounts::new(2, 0, 0),
        5_000,
        0,
    );
    assert_eq!(quote.addon_subtotal, 2 * 15_000);
    assert_eq!(quote.addon_discount, 5_000);
    assert_eq!(quote.addon_total, 25_000);
    assert_eq!(quote.grand_total, quote.lsr_total + 25_000);
}

#[test]
fn test_no_addon_means_zero_addon_totals() {
    let quote: ReservationQuote = ReservationQuote::compute(
        &PricingConfig::default(),
        HIGH_DATE,
        PassengerCounts::new(1, 0, 0),
        0,
        false,
        None,
        PassengerCounts::new(1, 0, 0),
        10_000,
        0,
    );
    assert_eq!(quote.addon_subtotal, 0);
    assert_eq!(quote.addon_total, 0);
}

#[test]
fn test_balance_floors_at_zero() {
    let quote: ReservationQuote = ReservationQuote::compute(
        &PricingConfig::default(),
        LOW_DATE,
        PassengerCounts::new(1, 0, 0),
        0,
        false,
        None,
        PassengerCounts::default(),
        0,
        200_000,
    );
    assert_eq!(quote.paid, 200_000);
    assert_eq!(quote.balance, 0);
}

#[test]
fn test_refunds_reduce_paid() {
    let quote: ReservationQuote = ReservationQuote::compute(
        &PricingConfig::default(),
        LOW_DATE,
        PassengerCounts::new(1, 0, 0),
        0,
        false,
        None,
        PassengerCounts::default(),
        0,
        100_000 - 30_000,
    );
    assert_eq!(quote.balance, 145_000 - 70_000);
}
