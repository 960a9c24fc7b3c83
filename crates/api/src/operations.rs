// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operation functions of the boundary layer.
//!
//! Every operation validates first, applies local effects second, and
//! performs remote writes last. Remote failures after local success are
//! surfaced through [`RemoteWriteStatus::Failed`]; nothing is rolled back
//! silently.

use crate::config_policy::validate_config_policy;
use crate::error::{
    ApiError, translate_allocation_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    CommitReservationRequest, CommitReservationResponse, GroupPreviewResponse,
    ModifyReservationRequest, ModifyReservationResponse, NextCodeResponse, PassengerInput,
    RecordPaymentRequest, RecordPaymentResponse, RemoteWriteStatus, RetireCodeResponse,
    UpsertVendorRequest, VendorListing, VoidReservationRequest, VoidReservationResponse,
};
use crate::state::ApplicationState;
use tracing::{info, warn};
use vg_booking::{PassengerRecord, PaymentRecord, commit_code, next_group_for_date, preview_next_code};
use vg_booking_domain::{
    AddonCategory, AddonService, PassengerCategory, PassengerCounts, PricingConfig, RateTable,
    ReservationCode, ReservationInput, ReservationQuote, ReservationStatus, Season, VendorKey,
    VendorOverride, VendorProfile, VendorRegistry, classify_season, validate_reservation,
    validate_vendor_profile,
};
use vg_booking_history::{HistoryEntry, PassengerSummary, VoucherSnapshot};
use vg_booking_persistence::{
    PassengerParams, PaymentParams, Persistence, ReservationHeaderParams, ReservationUpdate,
};

/// Returns the next-code preview for a vendor.
///
/// # Errors
///
/// Returns an error when the vendor's range is exhausted.
pub fn preview_code(
    state: &ApplicationState,
    vendor_key: &str,
) -> Result<NextCodeResponse, ApiError> {
    let key: VendorKey = VendorKey::new(vendor_key);
    let profile: VendorProfile = state.registry.resolve(&key);
    let code: ReservationCode = preview_next_code(&profile, &state.cache, &state.retired)
        .map_err(translate_allocation_error)?;
    Ok(NextCodeResponse {
        vendor_key: key.value().to_string(),
        code: code.value().to_string(),
    })
}

/// Returns the group number the next booking on a date would take.
#[must_use]
pub fn group_preview(state: &ApplicationState, date: &str) -> GroupPreviewResponse {
    GroupPreviewResponse {
        date: String::from(date),
        group_number: next_group_for_date(date, &state.cache),
    }
}

/// Commits a reservation.
///
/// Step order: validate, allocate/re-validate the code, assign the group
/// number, apply local rows and the history snapshot, then write the
/// remote header, passengers and payments in that order. A remote failure
/// after the local apply is reported in the response, not rolled back.
///
/// # Arguments
///
/// * `state` - The application state
/// * `persistence` - The remote store adapter
/// * `request` - The commit request
/// * `now` - The commit timestamp (ISO 8601)
///
/// # Errors
///
/// Returns an error when validation fails, the add-on service code is
/// unknown, or the vendor's code range is exhausted. No local or remote
/// state changes in any of those cases.
pub fn commit_reservation(
    state: &mut ApplicationState,
    persistence: &mut Persistence,
    request: &CommitReservationRequest,
    now: &str,
) -> Result<CommitReservationResponse, ApiError> {
    let addon_service: Option<AddonService> = parse_addon_service(request.addon_service.as_deref())?;

    let input: ReservationInput = ReservationInput {
        service_date: request.service_date.clone(),
        passenger_count: u32::try_from(request.passengers.len()).unwrap_or(u32::MAX),
        any_addon_included: request.passengers.iter().any(|p| p.addon_included),
        addon_service,
        addon_date: request.addon_date.clone(),
        payment_amounts: request.payments.iter().map(|p| p.amount).collect(),
    };
    let messages: Vec<String> = validate_reservation(&input);
    if !messages.is_empty() {
        return Err(ApiError::ValidationFailed { messages });
    }

    let key: VendorKey = VendorKey::new(&request.vendor_key);
    let profile: VendorProfile = state.registry.resolve(&key);
    validate_vendor_profile(key.value(), &profile).map_err(translate_domain_error)?;

    let code: ReservationCode = commit_code(
        &profile,
        &state.cache,
        &state.retired,
        &request.candidate_code,
    )
    .map_err(translate_allocation_error)?;

    let paid: i64 = request.payments.iter().map(|p| p.amount).sum();
    let quote: ReservationQuote = ReservationQuote::compute(
        &state.pricing,
        &request.service_date,
        passenger_counts(&request.passengers),
        request.lsr_discount,
        request.include_transport,
        addon_service,
        addon_counts(&request.passengers),
        request.addon_discount,
        paid,
    );

    let group_number: String = next_group_for_date(&request.service_date, &state.cache);

    // Local apply: passenger rows, payment rows, history snapshot.
    let rows: Vec<PassengerRecord> = build_passenger_records(
        &request.passengers,
        &state.pricing,
        quote.season,
        code.value(),
        &group_number,
        &profile.name,
        addon_service,
        request,
        now,
    );
    state.cache.passengers.extend(rows);
    for payment in request.payments.iter().filter(|p| p.amount != 0) {
        state.cache.payments.push(PaymentRecord {
            created_at: String::from(now),
            vendor: profile.name.clone(),
            code: code.value().to_string(),
            method: payment.method.clone(),
            amount: payment.amount,
            receipt: payment.receipt.clone(),
        });
    }
    let snapshot: VoucherSnapshot = build_snapshot(request, &quote, code.value(), &profile.name, &group_number, addon_service);
    state.cache.history.push(HistoryEntry::new(
        key.value().to_string(),
        code.value().to_string(),
        snapshot,
        String::from(now),
    ));

    let retired_orphans: Vec<String> = state.retired.retire_orphans(&state.cache);

    // Remote apply: header, passengers, payments, in that order.
    let remote: RemoteWriteStatus = persist_commit(persistence, request, &quote, &code, &group_number, now);
    if let RemoteWriteStatus::Failed { message } = &remote {
        warn!(code = %code, %message, "Reservation applied locally but failed remotely");
    } else {
        info!(code = %code, group = %group_number, "Reservation committed");
    }

    Ok(CommitReservationResponse {
        code: code.value().to_string(),
        group_number,
        vendor: profile.name,
        quote,
        remote,
        retired_orphans,
    })
}

/// Records a post-sale payment or refund.
///
/// The stored receipt carries a `vend:` marker naming the acting
/// salesperson, so reconciliation can attribute the movement even when the
/// code belongs to another vendor's prefix.
///
/// # Errors
///
/// Returns an error when the amount is zero.
pub fn record_payment(
    state: &mut ApplicationState,
    persistence: &mut Persistence,
    request: &RecordPaymentRequest,
    now: &str,
) -> Result<RecordPaymentResponse, ApiError> {
    if request.amount == 0 {
        return Err(ApiError::ValidationFailed {
            messages: vec![String::from(
                "Enter an amount other than zero. Use a negative amount for refunds.",
            )],
        });
    }

    let code: ReservationCode = ReservationCode::new(&request.code);
    let receipt: String = receipt_with_marker(&request.receipt, &request.vendor);

    state.cache.payments.push(PaymentRecord {
        created_at: String::from(now),
        vendor: request.vendor.clone(),
        code: code.value().to_string(),
        method: request.method.clone(),
        amount: request.amount,
        receipt: receipt.clone(),
    });
    let retired_orphans: Vec<String> = state.retired.retire_orphans(&state.cache);

    let remote: RemoteWriteStatus = match persistence.find_reservation_by_code(code.value()) {
        Ok(header) => {
            let params: PaymentParams = PaymentParams {
                method: request.method.clone(),
                amount: request.amount,
                receipt: Some(receipt.clone()),
                created_at: String::from(now),
            };
            match persistence.insert_payment(header.id, code.value(), &params) {
                Ok(_) => RemoteWriteStatus::Persisted {
                    reservation_id: header.id,
                },
                Err(e) => RemoteWriteStatus::Failed {
                    message: e.to_string(),
                },
            }
        }
        Err(e) => RemoteWriteStatus::Failed {
            message: e.to_string(),
        },
    };
    if let RemoteWriteStatus::Failed { message } = &remote {
        warn!(code = %code, %message, "Payment recorded locally but failed remotely");
    }

    Ok(RecordPaymentResponse {
        code: code.value().to_string(),
        receipt,
        remote,
        retired_orphans,
    })
}

/// Modifies an existing reservation.
///
/// The whole group is resubmitted: every passenger row sharing the code is
/// replaced, money is recomputed for the (possibly new) service date, and
/// a zero-amount `MOD:` log payment is appended. The group number is kept
/// unless the service date itself changed.
///
/// # Errors
///
/// Returns an error when validation fails or the code has no rows in the
/// local cache.
pub fn modify_reservation(
    state: &mut ApplicationState,
    persistence: &mut Persistence,
    request: &ModifyReservationRequest,
    now: &str,
) -> Result<ModifyReservationResponse, ApiError> {
    let addon_service: Option<AddonService> = parse_addon_service(request.addon_service.as_deref())?;

    let mut messages: Vec<String> = validate_reservation(&ReservationInput {
        service_date: request.service_date.clone(),
        passenger_count: u32::try_from(request.passengers.len()).unwrap_or(u32::MAX),
        any_addon_included: request.passengers.iter().any(|p| p.addon_included),
        addon_service,
        addon_date: request.addon_date.clone(),
        payment_amounts: Vec::new(),
    });
    if request.reason.trim().is_empty() {
        messages.push(String::from("A modification reason must be provided."));
    }
    if !messages.is_empty() {
        return Err(ApiError::ValidationFailed { messages });
    }

    let code: ReservationCode = ReservationCode::new(&request.code);
    let existing: Vec<PassengerRecord> = state
        .cache
        .passengers_for_code(code.value())
        .into_iter()
        .cloned()
        .collect();
    let Some(first) = existing.first() else {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Reservation"),
            message: format!("No passenger rows found for code '{}'", code.value()),
        });
    };
    let original_created_at: String = first.created_at.clone();
    let previous_date: String = first.service_date.clone();
    let previous_group: String = first.group_number.clone();
    let vendor_name: String = first.vendor.clone();

    // The group number is stable under modification unless the service
    // date itself changes.
    let group_number: String = if request.service_date == previous_date {
        previous_group
    } else {
        next_group_for_date(&request.service_date, &state.cache)
    };

    let quote: ReservationQuote = ReservationQuote::compute(
        &state.pricing,
        &request.service_date,
        passenger_counts(&request.passengers),
        request.lsr_discount,
        request.include_transport,
        addon_service,
        addon_counts(&request.passengers),
        request.addon_discount,
        0,
    );

    state.cache.remove_passengers_for_code(code.value());
    let season: Season = classify_season(&request.service_date, &state.pricing);
    let rates: RateTable = state.pricing.lsr_rates.for_season(season);
    let per_person_transport: i64 = state.pricing.transport.for_season(season);
    for passenger in &request.passengers {
        let (addon_category, addon_value) =
            addon_fields(addon_service, passenger, &state.pricing);
        state.cache.passengers.push(PassengerRecord {
            created_at: original_created_at.clone(),
            status: ReservationStatus::Confirmed,
            vendor: vendor_name.clone(),
            code: code.value().to_string(),
            group_number: group_number.clone(),
            name: passenger.name.clone(),
            document: passenger.document.clone(),
            nationality: passenger.nationality.clone(),
            phone: passenger.phone.clone(),
            email: passenger.email.clone(),
            category: passenger.category,
            transport: request.include_transport,
            lsr_value: rates.rate_for(passenger.category),
            transport_value: if request.include_transport {
                per_person_transport
            } else {
                0
            },
            lsr_discount: quote.lsr_discount,
            addon_category,
            provider: request.addon_provider.clone(),
            addon_date: request.addon_date.clone(),
            addon_value,
            addon_discount: quote.addon_discount,
            notes: request.notes.clone(),
            service_date: request.service_date.clone(),
        });
    }

    let log_receipt: String = format!("MOD: {} · vend:{}", request.reason.trim(), request.vendor);
    state.cache.payments.push(PaymentRecord {
        created_at: String::from(now),
        vendor: request.vendor.clone(),
        code: code.value().to_string(),
        method: String::from("modificacion"),
        amount: 0,
        receipt: log_receipt.clone(),
    });

    let remote: RemoteWriteStatus =
        persist_modification(persistence, request, &quote, &code, &group_number, &log_receipt, now);
    if let RemoteWriteStatus::Failed { message } = &remote {
        warn!(code = %code, %message, "Modification applied locally but failed remotely");
    } else {
        info!(code = %code, "Reservation modified");
    }

    Ok(ModifyReservationResponse {
        code: code.value().to_string(),
        group_number,
        quote,
        remote,
    })
}

/// Voids a reservation.
///
/// Every passenger row sharing the code is removed, locally and remotely;
/// the header and payment rows remain as the audit trail, and a
/// zero-amount `DEL:` log payment is appended. The reactive orphan scan
/// then retires the code if any payment exists.
///
/// # Errors
///
/// Returns an error when the reason is empty or the code has no rows in
/// the local cache.
pub fn void_reservation(
    state: &mut ApplicationState,
    persistence: &mut Persistence,
    request: &VoidReservationRequest,
    now: &str,
) -> Result<VoidReservationResponse, ApiError> {
    if request.reason.trim().is_empty() {
        return Err(ApiError::ValidationFailed {
            messages: vec![String::from("A deletion reason must be provided.")],
        });
    }

    let code: ReservationCode = ReservationCode::new(&request.code);
    let removed: usize = state.cache.remove_passengers_for_code(code.value());
    if removed == 0 {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Reservation"),
            message: format!("No passenger rows found for code '{}'", code.value()),
        });
    }

    let log_receipt: String = format!("DEL: {} · vend:{}", request.reason.trim(), request.vendor);
    state.cache.payments.push(PaymentRecord {
        created_at: String::from(now),
        vendor: request.vendor.clone(),
        code: code.value().to_string(),
        method: String::from("modificacion"),
        amount: 0,
        receipt: log_receipt.clone(),
    });
    let retired_now: Vec<String> = state.retired.retire_orphans(&state.cache);

    let remote: RemoteWriteStatus = match persistence.find_reservation_by_code(code.value()) {
        Ok(header) => {
            let log: PaymentParams = PaymentParams {
                method: String::from("modificacion"),
                amount: 0,
                receipt: Some(log_receipt),
                created_at: String::from(now),
            };
            let result = persistence
                .delete_passengers(header.id)
                .and_then(|_| persistence.insert_payment(header.id, code.value(), &log));
            match result {
                Ok(_) => RemoteWriteStatus::Persisted {
                    reservation_id: header.id,
                },
                Err(e) => RemoteWriteStatus::Failed {
                    message: e.to_string(),
                },
            }
        }
        Err(e) => RemoteWriteStatus::Failed {
            message: e.to_string(),
        },
    };
    if let RemoteWriteStatus::Failed { message } = &remote {
        warn!(code = %code, %message, "Void applied locally but failed remotely");
    } else {
        info!(code = %code, "Reservation voided");
    }

    Ok(VoidReservationResponse {
        code: code.value().to_string(),
        retired: retired_now.iter().any(|c| c == code.value()),
        remote,
    })
}

/// Retires a code explicitly.
#[must_use]
pub fn retire_code(state: &mut ApplicationState, code: &str) -> RetireCodeResponse {
    let code: ReservationCode = ReservationCode::new(code);
    let newly_retired: bool = state.retired.retire(code.value());
    if newly_retired {
        info!(code = %code, "Code retired by administrative action");
    }
    RetireCodeResponse {
        code: code.value().to_string(),
        newly_retired,
    }
}

/// Lists every known vendor with its resolved profile.
#[must_use]
pub fn list_vendors(state: &ApplicationState) -> Vec<VendorListing> {
    state
        .registry
        .all_keys()
        .into_iter()
        .map(|key| VendorListing {
            profile: state.registry.resolve(&key),
            builtin: VendorRegistry::is_builtin(key.value()),
            vendor_key: key.value().to_string(),
        })
        .collect()
}

/// Creates or edits a vendor profile.
///
/// The remote override table is written first (it is the source of truth),
/// then the local mirror follows.
///
/// # Errors
///
/// Returns an error when the key is empty, the prospective profile is
/// invalid, or the remote write fails.
pub fn upsert_vendor(
    state: &mut ApplicationState,
    persistence: &mut Persistence,
    request: &UpsertVendorRequest,
) -> Result<VendorListing, ApiError> {
    let key: VendorKey = VendorKey::new(&request.vendor_key);
    if key.value().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("vendor_key"),
            message: String::from("Vendor key cannot be empty"),
        });
    }

    let entry: VendorOverride = VendorOverride {
        name: request.name.clone().filter(|s| !s.is_empty()),
        prefix: request.prefix.clone().filter(|s| !s.is_empty()),
        range_start: request.range_start,
        range_end: request.range_end,
    };

    // Validate the profile this override would resolve to.
    let mut prospective: VendorRegistry = state.registry.clone();
    prospective.upsert_override(&key, entry.clone());
    let profile: VendorProfile = prospective.resolve(&key);
    validate_vendor_profile(key.value(), &profile).map_err(translate_domain_error)?;

    persistence
        .upsert_vendor_override(key.value(), &entry)
        .map_err(|e| translate_persistence_error("upsert vendor override", e))?;
    state.registry.upsert_override(&key, entry);
    info!(vendor_key = %key, "Vendor override stored");

    Ok(VendorListing {
        profile,
        builtin: VendorRegistry::is_builtin(key.value()),
        vendor_key: key.value().to_string(),
    })
}

/// Deletes an added vendor.
///
/// Built-in vendors are rejected; added vendors lose their override entry
/// remotely and in the mirror.
///
/// # Errors
///
/// Returns an error for built-in vendors or a failed remote delete.
pub fn delete_vendor(
    state: &mut ApplicationState,
    persistence: &mut Persistence,
    vendor_key: &str,
) -> Result<(), ApiError> {
    let key: VendorKey = VendorKey::new(vendor_key);
    if VendorRegistry::is_builtin(key.value()) {
        return Err(translate_domain_error(
            vg_booking_domain::DomainError::BuiltinVendorDelete {
                vendor_key: key.value().to_string(),
            },
        ));
    }

    persistence
        .delete_vendor_override(key.value())
        .map_err(|e| translate_persistence_error("delete vendor override", e))?;
    state
        .registry
        .remove_override(&key)
        .map_err(translate_domain_error)?;
    info!(vendor_key = %key, "Vendor override deleted");
    Ok(())
}

/// Refreshes the local override mirror from the remote table.
///
/// # Errors
///
/// Returns an error if the remote read fails; the existing mirror is kept
/// in that case.
pub fn refresh_vendor_mirror(
    state: &mut ApplicationState,
    persistence: &mut Persistence,
) -> Result<usize, ApiError> {
    let overrides = persistence
        .list_vendor_overrides()
        .map_err(|e| translate_persistence_error("list vendor overrides", e))?;
    let count: usize = overrides.len();
    state.registry.replace_overrides(overrides);
    Ok(count)
}

/// Stores a new admin configuration and makes it live.
///
/// # Errors
///
/// Returns an error when the configuration violates policy or the remote
/// write fails (the previous configuration stays live then).
pub fn update_admin_config(
    state: &mut ApplicationState,
    persistence: &mut Persistence,
    config: &PricingConfig,
    now: &str,
) -> Result<i64, ApiError> {
    validate_config_policy(config)?;
    let config_id: i64 = persistence
        .store_admin_config(config, now)
        .map_err(|e| translate_persistence_error("store admin config", e))?;
    state.pricing = config.clone();
    info!(config_id, "Admin configuration updated");
    Ok(config_id)
}

// ============================================================================
// Helpers
// ============================================================================

fn parse_addon_service(raw: Option<&str>) -> Result<Option<AddonService>, ApiError> {
    raw.filter(|s| !s.is_empty())
        .map(|s| AddonService::parse(s).map_err(translate_domain_error))
        .transpose()
}

fn passenger_counts(passengers: &[PassengerInput]) -> PassengerCounts {
    let mut counts: PassengerCounts = PassengerCounts::default();
    for passenger in passengers {
        match passenger.category {
            PassengerCategory::Adult => counts.adults += 1,
            PassengerCategory::Child => counts.children += 1,
            PassengerCategory::Infant => counts.infants += 1,
        }
    }
    counts
}

fn addon_counts(passengers: &[PassengerInput]) -> PassengerCounts {
    let mut counts: PassengerCounts = PassengerCounts::default();
    for passenger in passengers.iter().filter(|p| p.addon_included) {
        match passenger.category {
            PassengerCategory::Adult => counts.adults += 1,
            PassengerCategory::Child => counts.children += 1,
            PassengerCategory::Infant => counts.infants += 1,
        }
    }
    counts
}

fn addon_fields(
    service: Option<AddonService>,
    passenger: &PassengerInput,
    pricing: &PricingConfig,
) -> (Option<AddonCategory>, i64) {
    match service {
        Some(service) if passenger.addon_included => (
            Some(AddonCategory::from_passenger(passenger.category)),
            pricing.addon_rates(service).rate_for(passenger.category),
        ),
        _ => (None, 0),
    }
}

#[allow(clippy::too_many_arguments)]
fn build_passenger_records(
    passengers: &[PassengerInput],
    pricing: &PricingConfig,
    season: Season,
    code: &str,
    group_number: &str,
    vendor_name: &str,
    addon_service: Option<AddonService>,
    request: &CommitReservationRequest,
    now: &str,
) -> Vec<PassengerRecord> {
    let rates: RateTable = pricing.lsr_rates.for_season(season);
    let per_person_transport: i64 = pricing.transport.for_season(season);
    passengers
        .iter()
        .map(|passenger| {
            let (addon_category, addon_value) = addon_fields(addon_service, passenger, pricing);
            PassengerRecord {
                created_at: String::from(now),
                status: ReservationStatus::Confirmed,
                vendor: String::from(vendor_name),
                code: String::from(code),
                group_number: String::from(group_number),
                name: passenger.name.clone(),
                document: passenger.document.clone(),
                nationality: passenger.nationality.clone(),
                phone: passenger.phone.clone(),
                email: passenger.email.clone(),
                category: passenger.category,
                transport: request.include_transport,
                lsr_value: rates.rate_for(passenger.category),
                transport_value: if request.include_transport {
                    per_person_transport
                } else {
                    0
                },
                lsr_discount: request.lsr_discount.max(0),
                addon_category,
                provider: request.addon_provider.clone(),
                addon_date: request.addon_date.clone(),
                addon_value,
                addon_discount: request.addon_discount.max(0),
                notes: request.notes.clone(),
                service_date: request.service_date.clone(),
            }
        })
        .collect()
}

fn build_snapshot(
    request: &CommitReservationRequest,
    quote: &ReservationQuote,
    code: &str,
    vendor_name: &str,
    group_number: &str,
    addon_service: Option<AddonService>,
) -> VoucherSnapshot {
    VoucherSnapshot {
        code: String::from(code),
        vendor: String::from(vendor_name),
        service_date: request.service_date.clone(),
        addon_date: request.addon_date.clone(),
        lsr_subtotal: quote.lsr_subtotal,
        lsr_discount: quote.lsr_discount,
        transport: quote.transport_total,
        lsr_total: quote.lsr_total,
        addon_service,
        provider: (!request.addon_provider.is_empty()).then(|| request.addon_provider.clone()),
        addon_subtotal: quote.addon_subtotal,
        addon_discount: quote.addon_discount,
        addon_total: quote.addon_total,
        grand_total: quote.grand_total,
        paid: quote.paid,
        balance: quote.balance,
        passengers: request
            .passengers
            .iter()
            .map(|p| PassengerSummary {
                name: p.name.clone(),
                document: p.document.clone(),
                nationality: p.nationality.clone(),
                phone: p.phone.clone(),
                email: p.email.clone(),
                category: p.category,
                addon_included: p.addon_included,
                group: String::from(group_number),
            })
            .collect(),
        notes: request.notes.clone(),
    }
}

fn receipt_with_marker(receipt: &str, vendor: &str) -> String {
    let trimmed: &str = receipt.trim();
    if trimmed.is_empty() {
        format!("vend:{vendor}")
    } else {
        format!("{trimmed} · vend:{vendor}")
    }
}

fn persist_commit(
    persistence: &mut Persistence,
    request: &CommitReservationRequest,
    quote: &ReservationQuote,
    code: &ReservationCode,
    group_number: &str,
    now: &str,
) -> RemoteWriteStatus {
    let header: ReservationHeaderParams = ReservationHeaderParams {
        code: code.value().to_string(),
        vendor_uid: request.vendor_uid.clone(),
        service_date: (!request.service_date.is_empty()).then(|| request.service_date.clone()),
        lsr_value: quote.lsr_subtotal,
        transport_value: quote.transport_total,
        lsr_discount: quote.lsr_discount,
        provider: (!request.addon_provider.is_empty()).then(|| request.addon_provider.clone()),
        addon_service: request.addon_service.clone().filter(|s| !s.is_empty()),
        addon_date: (!request.addon_date.is_empty()).then(|| request.addon_date.clone()),
        addon_value: quote.addon_subtotal,
        addon_discount: quote.addon_discount,
        total_lsr: quote.lsr_total,
        total_addon: quote.addon_total,
        total_quote: quote.grand_total,
        paid: quote.paid,
        balance: quote.balance,
        notes: (!request.notes.is_empty()).then(|| request.notes.clone()),
        created_at: String::from(now),
        group_number: group_number.parse::<u32>().ok(),
    };

    let reservation_id: i64 = match persistence.insert_reservation(&header) {
        Ok(id) => id,
        Err(e) => {
            return RemoteWriteStatus::Failed {
                message: e.to_string(),
            };
        }
    };

    let passenger_rows: Vec<PassengerParams> = request
        .passengers
        .iter()
        .map(|p| PassengerParams {
            name: (!p.name.is_empty()).then(|| p.name.clone()),
            document: (!p.document.is_empty()).then(|| p.document.clone()),
            nationality: (!p.nationality.is_empty()).then(|| p.nationality.clone()),
            phone: (!p.phone.is_empty()).then(|| p.phone.clone()),
            email: (!p.email.is_empty()).then(|| p.email.clone()),
            category: p.category.as_str().to_string(),
            addon_included: p.addon_included,
        })
        .collect();
    if let Err(e) = persistence.insert_passengers(reservation_id, &passenger_rows) {
        return RemoteWriteStatus::Failed {
            message: e.to_string(),
        };
    }

    for payment in request.payments.iter().filter(|p| p.amount != 0) {
        let params: PaymentParams = PaymentParams {
            method: payment.method.clone(),
            amount: payment.amount,
            receipt: (!payment.receipt.is_empty()).then(|| payment.receipt.clone()),
            created_at: String::from(now),
        };
        if let Err(e) = persistence.insert_payment(reservation_id, code.value(), &params) {
            return RemoteWriteStatus::Failed {
                message: e.to_string(),
            };
        }
    }

    RemoteWriteStatus::Persisted { reservation_id }
}

fn persist_modification(
    persistence: &mut Persistence,
    request: &ModifyReservationRequest,
    quote: &ReservationQuote,
    code: &ReservationCode,
    group_number: &str,
    log_receipt: &str,
    now: &str,
) -> RemoteWriteStatus {
    let header = match persistence.find_reservation_by_code(code.value()) {
        Ok(header) => header,
        Err(e) => {
            return RemoteWriteStatus::Failed {
                message: e.to_string(),
            };
        }
    };

    let passenger_rows: Vec<PassengerParams> = request
        .passengers
        .iter()
        .map(|p| PassengerParams {
            name: (!p.name.is_empty()).then(|| p.name.clone()),
            document: (!p.document.is_empty()).then(|| p.document.clone()),
            nationality: (!p.nationality.is_empty()).then(|| p.nationality.clone()),
            phone: (!p.phone.is_empty()).then(|| p.phone.clone()),
            email: (!p.email.is_empty()).then(|| p.email.clone()),
            category: p.category.as_str().to_string(),
            addon_included: p.addon_included,
        })
        .collect();

    let update: ReservationUpdate = ReservationUpdate {
        service_date: (!request.service_date.is_empty()).then(|| request.service_date.clone()),
        transport_value: quote.transport_total,
        lsr_discount: quote.lsr_discount,
        provider: (!request.addon_provider.is_empty()).then(|| request.addon_provider.clone()),
        addon_service: request.addon_service.clone().filter(|s| !s.is_empty()),
        addon_date: (!request.addon_date.is_empty()).then(|| request.addon_date.clone()),
        addon_value: quote.addon_subtotal,
        addon_discount: quote.addon_discount,
        total_lsr: quote.lsr_total,
        total_addon: quote.addon_total,
        total_quote: quote.grand_total,
        notes: (!request.notes.is_empty()).then(|| request.notes.clone()),
        group_number: group_number.parse::<i32>().ok(),
    };

    let log: PaymentParams = PaymentParams {
        method: String::from("modificacion"),
        amount: 0,
        receipt: Some(String::from(log_receipt)),
        created_at: String::from(now),
    };

    let result = persistence
        .replace_passengers(header.id, &passenger_rows)
        .and_then(|_| persistence.update_reservation_header(header.id, &update))
        .and_then(|()| persistence.insert_payment(header.id, code.value(), &log));
    match result {
        Ok(_) => RemoteWriteStatus::Persisted {
            reservation_id: header.id,
        },
        Err(e) => RemoteWriteStatus::Failed {
            message: e.to_string(),
        },
    }
}
