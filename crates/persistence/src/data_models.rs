// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::diesel_schema::{admin_config, passengers, payments, reservations, vendor_overrides};
use diesel::prelude::*;

/// A reservation header row as stored.
#[derive(Debug, Clone, Queryable)]
#[diesel(table_name = reservations)]
pub struct ReservationRow {
    pub reservation_id: i64,
    pub code: String,
    pub vendor_uid: String,
    pub service_date: Option<String>,
    pub lsr_value: i64,
    pub transport_value: i64,
    pub lsr_discount: i64,
    pub provider: Option<String>,
    pub addon_service: Option<String>,
    pub addon_date: Option<String>,
    pub addon_value: i64,
    pub addon_discount: i64,
    pub total_lsr: i64,
    pub total_addon: i64,
    pub total_quote: i64,
    pub paid: i64,
    pub balance: i64,
    pub notes: Option<String>,
    pub created_at: String,
    pub group_number: Option<i32>,
}

/// An insertable reservation header.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = reservations)]
pub struct NewReservation {
    pub code: String,
    pub vendor_uid: String,
    pub service_date: Option<String>,
    pub lsr_value: i64,
    pub transport_value: i64,
    pub lsr_discount: i64,
    pub provider: Option<String>,
    pub addon_service: Option<String>,
    pub addon_date: Option<String>,
    pub addon_value: i64,
    pub addon_discount: i64,
    pub total_lsr: i64,
    pub total_addon: i64,
    pub total_quote: i64,
    pub paid: i64,
    pub balance: i64,
    pub notes: Option<String>,
    pub created_at: String,
    pub group_number: Option<i32>,
}

/// A passenger row as stored.
#[derive(Debug, Clone, Queryable)]
#[diesel(table_name = passengers)]
pub struct PassengerRow {
    pub passenger_id: i64,
    pub reservation_id: i64,
    pub name: Option<String>,
    pub document: Option<String>,
    pub nationality: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub category: String,
    pub addon_included: i32,
}

/// An insertable passenger row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = passengers)]
pub struct NewPassenger {
    pub reservation_id: i64,
    pub name: Option<String>,
    pub document: Option<String>,
    pub nationality: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub category: String,
    pub addon_included: i32,
}

/// A payment row as stored.
#[derive(Debug, Clone, Queryable)]
#[diesel(table_name = payments)]
pub struct PaymentRow {
    pub payment_id: i64,
    pub reservation_id: i64,
    pub code: String,
    pub method: String,
    pub amount: i64,
    pub receipt: Option<String>,
    pub created_at: String,
    pub reconciled: i32,
}

/// An insertable payment row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = payments)]
pub struct NewPayment {
    pub reservation_id: i64,
    pub code: String,
    pub method: String,
    pub amount: i64,
    pub receipt: Option<String>,
    pub created_at: String,
    pub reconciled: i32,
}

/// A vendor override row as stored.
#[derive(Debug, Clone, Queryable)]
#[diesel(table_name = vendor_overrides)]
pub struct VendorOverrideRow {
    pub override_id: i64,
    pub vendor_key: String,
    pub name: Option<String>,
    pub prefix: Option<String>,
    pub range_start: Option<i32>,
    pub range_end: Option<i32>,
}

/// An insertable vendor override row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = vendor_overrides)]
pub struct NewVendorOverride {
    pub vendor_key: String,
    pub name: Option<String>,
    pub prefix: Option<String>,
    pub range_start: Option<i32>,
    pub range_end: Option<i32>,
}

/// An admin configuration row as stored.
#[derive(Debug, Clone, Queryable)]
#[diesel(table_name = admin_config)]
pub struct AdminConfigRow {
    pub config_id: i64,
    pub payload: String,
    pub updated_at: String,
}

/// An insertable admin configuration row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = admin_config)]
pub struct NewAdminConfig {
    pub payload: String,
    pub updated_at: String,
}
