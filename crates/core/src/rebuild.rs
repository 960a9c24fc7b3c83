// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::groups::{GroupSeed, assign_groups};
use crate::state::{GROUP_PLACEHOLDER, PassengerRecord, PaymentRecord};
use std::collections::BTreeMap;
use vg_booking_domain::{
    AddonCategory, AddonService, PassengerCategory, PricingConfig, RateTable, ReservationStatus,
    Season, VendorRegistry, classify_season, vendor_from_receipt,
};

/// A reservation header row as fetched from the remote store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteReservation {
    /// The remote primary key.
    pub id: i64,
    /// The reservation code.
    pub code: String,
    /// The opaque id of the signed-in user that committed the reservation.
    pub vendor_uid: String,
    /// The lake-tour service date.
    pub service_date: Option<String>,
    /// The stored transport total (only its sign is trusted).
    pub transport_value: i64,
    /// The group-level lake-tour discount.
    pub lsr_discount: i64,
    /// The add-on provider.
    pub provider: Option<String>,
    /// The add-on service code (`FM`/`CM`).
    pub addon_service: Option<String>,
    /// The add-on service date.
    pub addon_date: Option<String>,
    /// The group-level add-on discount.
    pub addon_discount: i64,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Creation timestamp.
    pub created_at: Option<String>,
    /// The persisted group number, if one was ever assigned.
    pub group_number: Option<i64>,
}

/// A passenger row as fetched from the remote store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemotePassenger {
    /// The remote primary key.
    pub id: i64,
    /// The owning reservation's primary key.
    pub reservation_id: i64,
    /// Passenger name.
    pub name: Option<String>,
    /// Identity document.
    pub document: Option<String>,
    /// Nationality.
    pub nationality: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Fare category string.
    pub category: String,
    /// Whether this passenger includes the add-on service.
    pub addon_included: bool,
}

/// A payment row as fetched from the remote store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemotePayment {
    /// The remote primary key.
    pub id: i64,
    /// The owning reservation's primary key.
    pub reservation_id: i64,
    /// Payment method.
    pub method: Option<String>,
    /// Signed amount.
    pub amount: i64,
    /// Free-text receipt or note.
    pub receipt: Option<String>,
    /// Creation timestamp.
    pub created_at: Option<String>,
}

/// The product of a cache rebuild.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RebuildOutcome {
    /// The rebuilt passenger slice.
    pub passengers: Vec<PassengerRecord>,
    /// The rebuilt payment slice.
    pub payments: Vec<PaymentRecord>,
    /// Group numbers assigned during this rebuild that the remote store
    /// does not carry yet, for write-back.
    pub newly_assigned_groups: Vec<(String, u32)>,
}

/// Rebuilds the local passenger/payment cache from remote rows.
///
/// This is the computational half of Reconciliation Sync: a full snapshot
/// rebuild, never an incremental merge. The remote store is authoritative
/// for quantities, categories and dates only; every monetary cell is
/// recomputed from the current pricing configuration, and group numbers
/// are re-derived for rows that lack one while persisted values are kept.
///
/// # Arguments
///
/// * `reservations` - All reservation header rows
/// * `passengers` - All passenger rows of those reservations
/// * `payments` - All payment rows of those reservations
/// * `registry` - The vendor registry (for display-name derivation)
/// * `pricing` - The live pricing configuration
/// * `now` - Timestamp substituted for rows with no creation timestamp
#[must_use]
pub fn rebuild_cache(
    reservations: &[RemoteReservation],
    passengers: &[RemotePassenger],
    payments: &[RemotePayment],
    registry: &VendorRegistry,
    pricing: &PricingConfig,
    now: &str,
) -> RebuildOutcome {
    let mut passengers_by_reservation: BTreeMap<i64, Vec<&RemotePassenger>> = BTreeMap::new();
    for passenger in passengers {
        passengers_by_reservation
            .entry(passenger.reservation_id)
            .or_default()
            .push(passenger);
    }
    let mut payments_by_reservation: BTreeMap<i64, Vec<&RemotePayment>> = BTreeMap::new();
    for payment in payments {
        payments_by_reservation
            .entry(payment.reservation_id)
            .or_default()
            .push(payment);
    }

    // Group assignment consults persisted numbers first; only reservations
    // with passengers occupy a slot.
    let seeds: Vec<GroupSeed> = reservations
        .iter()
        .map(|header| GroupSeed {
            code: header.code.clone(),
            service_date: header.service_date.clone().unwrap_or_default(),
            created_at: header.created_at.clone().unwrap_or_default(),
            group_number: header
                .group_number
                .and_then(|n| u32::try_from(n).ok())
                .filter(|n| *n > 0),
            passenger_count: passengers_by_reservation
                .get(&header.id)
                .map_or(0, Vec::len),
        })
        .collect();
    let groups: BTreeMap<String, u32> = assign_groups(&seeds);

    let newly_assigned_groups: Vec<(String, u32)> = seeds
        .iter()
        .filter(|seed| seed.group_number.is_none())
        .filter_map(|seed| groups.get(&seed.code).map(|n| (seed.code.clone(), *n)))
        .collect();

    let mut rebuilt_passengers: Vec<PassengerRecord> = Vec::new();
    let mut rebuilt_payments: Vec<PaymentRecord> = Vec::new();

    for header in reservations {
        let service_date: String = header.service_date.clone().unwrap_or_default();
        let season: Season = classify_season(&service_date, pricing);
        let rates: RateTable = pricing.lsr_rates.for_season(season);
        let per_person_transport: i64 = pricing.transport.for_season(season);
        let includes_transport: bool = header.transport_value > 0;
        let vendor_name: String = registry.vendor_name_from_code(&header.code);
        let created_at: String = header
            .created_at
            .clone()
            .unwrap_or_else(|| String::from(now));
        let addon_service: Option<AddonService> = header
            .addon_service
            .as_deref()
            .and_then(|s| AddonService::parse(s).ok());
        let group_number: String = groups
            .get(&header.code)
            .map_or_else(|| String::from(GROUP_PLACEHOLDER), u32::to_string);

        for passenger in passengers_by_reservation
            .get(&header.id)
            .into_iter()
            .flatten()
        {
            let category: PassengerCategory = PassengerCategory::parse_lossy(&passenger.category);
            let (addon_category, addon_value) = match addon_service {
                Some(service) if passenger.addon_included => {
                    let addon_rates: RateTable = pricing.addon_rates(service);
                    (
                        Some(AddonCategory::from_passenger(category)),
                        addon_rates.rate_for(category),
                    )
                }
                _ => (None, 0),
            };

            rebuilt_passengers.push(PassengerRecord {
                created_at: created_at.clone(),
                status: ReservationStatus::Confirmed,
                vendor: vendor_name.clone(),
                code: header.code.clone(),
                group_number: group_number.clone(),
                name: passenger.name.clone().unwrap_or_default(),
                document: passenger.document.clone().unwrap_or_default(),
                nationality: passenger.nationality.clone().unwrap_or_default(),
                phone: passenger.phone.clone().unwrap_or_default(),
                email: passenger.email.clone().unwrap_or_default(),
                category,
                transport: includes_transport,
                lsr_value: rates.rate_for(category),
                transport_value: if includes_transport {
                    per_person_transport
                } else {
                    0
                },
                lsr_discount: header.lsr_discount,
                addon_category,
                provider: header.provider.clone().unwrap_or_default(),
                addon_date: header.addon_date.clone().unwrap_or_default(),
                addon_value,
                addon_discount: header.addon_discount,
                notes: header.notes.clone().unwrap_or_default(),
                service_date: service_date.clone(),
            });
        }

        for payment in payments_by_reservation
            .get(&header.id)
            .into_iter()
            .flatten()
        {
            let receipt: String = payment.receipt.clone().unwrap_or_default();
            // The acting salesperson may differ from the issuing vendor:
            // prefer the receipt marker, fall back to the code prefix.
            let vendor: String =
                vendor_from_receipt(&receipt).unwrap_or_else(|| vendor_name.clone());
            rebuilt_payments.push(PaymentRecord {
                created_at: payment
                    .created_at
                    .clone()
                    .unwrap_or_else(|| String::from(now)),
                vendor,
                code: header.code.clone(),
                method: payment.method.clone().unwrap_or_default(),
                amount: payment.amount,
                receipt,
            });
        }
    }

    RebuildOutcome {
        passengers: rebuilt_passengers,
        payments: rebuilt_payments,
        newly_assigned_groups,
    }
}
