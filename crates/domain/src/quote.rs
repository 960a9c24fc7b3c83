// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::pricing::{PricingConfig, RateTable, Season, classify_season};
use crate::types::AddonService;
use serde::{Deserialize, Serialize};

/// Passenger counts per fare category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerCounts {
    /// Number of adults.
    pub adults: u32,
    /// Number of children.
    pub children: u32,
    /// Number of infants.
    pub infants: u32,
}

impl PassengerCounts {
    /// Creates new `PassengerCounts`.
    #[must_use]
    pub const fn new(adults: u32, children: u32, infants: u32) -> Self {
        Self {
            adults,
            children,
            infants,
        }
    }

    /// Returns the total head count.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.adults + self.children + self.infants
    }
}

/// The monetary breakdown of one reservation at current rates.
///
/// Quotes are always recomputed from the live pricing configuration; the
/// remote store is authoritative for quantities, categories and dates, but
/// never for money amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationQuote {
    /// The season the service date classified into.
    pub season: Season,
    /// Lake-tour gross amount before discount.
    pub lsr_subtotal: i64,
    /// Lake-tour discount actually applied (clamped to the subtotal).
    pub lsr_discount: i64,
    /// Transport total (per-person charge times head count, or zero).
    pub transport_total: i64,
    /// Lake-tour total including transport.
    pub lsr_total: i64,
    /// Add-on gross amount before discount.
    pub addon_subtotal: i64,
    /// Add-on discount actually applied (clamped to the subtotal).
    pub addon_discount: i64,
    /// Add-on total.
    pub addon_total: i64,
    /// Grand total of the quote.
    pub grand_total: i64,
    /// Sum of recorded payment amounts (refunds are negative).
    pub paid: i64,
    /// Outstanding balance, floored at zero.
    pub balance: i64,
}

impl ReservationQuote {
    /// Computes the full quote for a reservation composition.
    ///
    /// The infant rule lives here rather than in the rate lookup because it
    /// depends on counts within one reservation: at most one infant travels
    /// at the infant rate; every additional infant is billed at the child
    /// rate, regardless of input ordering.
    ///
    /// # Arguments
    ///
    /// * `config` - The live pricing configuration
    /// * `service_date` - The lake-tour service date (decides the season)
    /// * `counts` - Passenger counts per category
    /// * `lsr_discount` - Requested lake-tour discount
    /// * `include_transport` - Whether the per-person transport charge applies
    /// * `addon` - The selected add-on service, if any
    /// * `addon_counts` - Counts of passengers that include the add-on
    /// * `addon_discount` - Requested add-on discount
    /// * `paid` - Sum of payment amounts recorded so far
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn compute(
        config: &PricingConfig,
        service_date: &str,
        counts: PassengerCounts,
        lsr_discount: i64,
        include_transport: bool,
        addon: Option<AddonService>,
        addon_counts: PassengerCounts,
        addon_discount: i64,
        paid: i64,
    ) -> Self {
        let season: Season = classify_season(service_date, config);
        let rates: RateTable = config.lsr_rates.for_season(season);

        // Infant rule: one infant rides at the infant rate, the rest as children.
        let freed_infants: i64 = i64::from(counts.infants.min(1));
        let billed_as_child: i64 = i64::from(counts.infants.saturating_sub(1));

        let lsr_subtotal: i64 = i64::from(counts.adults) * rates.adult
            + (i64::from(counts.children) + billed_as_child) * rates.child
            + freed_infants * rates.infant;
        let lsr_discount_applied: i64 = lsr_discount.min(lsr_subtotal);
        let lsr_net: i64 = (lsr_subtotal - lsr_discount_applied).max(0);

        let per_person_transport: i64 = config.transport.for_season(season);
        let transport_total: i64 = if include_transport {
            i64::from(counts.total()) * per_person_transport
        } else {
            0
        };

        let addon_subtotal: i64 = addon.map_or(0, |service| {
            let addon_rates: RateTable = config.addon_rates(service);
            i64::from(addon_counts.adults) * addon_rates.adult
                + i64::from(addon_counts.children) * addon_rates.child
                + i64::from(addon_counts.infants) * addon_rates.infant
        });
        let addon_discount_applied: i64 = addon_discount.min(addon_subtotal);
        let addon_total: i64 = (addon_subtotal - addon_discount_applied).max(0);

        let lsr_total: i64 = lsr_net + transport_total;
        let grand_total: i64 = lsr_total + addon_total;
        let balance: i64 = (grand_total - paid).max(0);

        Self {
            season,
            lsr_subtotal,
            lsr_discount: lsr_discount_applied,
            transport_total,
            lsr_total,
            addon_subtotal,
            addon_discount: addon_discount_applied,
            addon_total,
            grand_total,
            paid,
            balance,
        }
    }
}
