// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use vg_booking::{LocalCache, RetiredCodes};
use vg_booking_domain::{PricingConfig, VendorRegistry};
use vg_booking_persistence::LocalState;

/// The application state one session operates on.
///
/// Owned by a single coordinator and passed explicitly into every
/// operation; nothing here is ambient or global. The cache is a
/// single-writer structure; concurrent salespeople each hold their own
/// and converge through Reconciliation Sync against the shared remote
/// store.
#[derive(Debug, Clone, Default)]
pub struct ApplicationState {
    /// The local cache snapshot.
    pub cache: LocalCache,
    /// Codes permanently excluded from reallocation.
    pub retired: RetiredCodes,
    /// The vendor registry (built-ins plus the override mirror).
    pub registry: VendorRegistry,
    /// The live pricing configuration.
    pub pricing: PricingConfig,
}

impl ApplicationState {
    /// Creates an empty state with built-in vendors and default pricing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the state from the locally persisted mirror.
    ///
    /// Gives the session a fast start before the first sync; the remote
    /// store remains the source of truth and the next sync replaces the
    /// cache wholesale.
    #[must_use]
    pub fn from_local(local: &LocalState) -> Self {
        Self {
            cache: local.cache.clone(),
            retired: local.retired.clone(),
            registry: VendorRegistry::with_overrides(local.vendor_overrides.clone()),
            pricing: PricingConfig::default(),
        }
    }

    /// Writes this state back into a local mirror structure.
    ///
    /// UI preference fields of the existing mirror are preserved.
    pub fn write_local(&self, local: &mut LocalState) {
        local.cache = self.cache.clone();
        local.retired = self.retired.clone();
        local.vendor_overrides = self.registry.overrides().clone();
    }
}
