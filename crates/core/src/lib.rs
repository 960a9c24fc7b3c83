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

mod allocator;
mod error;
mod groups;
mod local;
mod rebuild;
mod retired;
mod state;

#[cfg(test)]
mod tests;

pub use allocator::{UsedNumbers, commit_code, preview_next_code, used_numbers};
pub use error::{AllocationError, CoreError};
pub use groups::{GroupSeed, MISSING_TIMESTAMP_SENTINEL, assign_groups, next_group_for_date};
pub use local::parse_or_default;
pub use rebuild::{
    RebuildOutcome, RemotePassenger, RemotePayment, RemoteReservation, rebuild_cache,
};
pub use retired::{RetiredCodes, detect_orphans};
pub use state::{CodeSummary, GROUP_PLACEHOLDER, LocalCache, PassengerRecord, PaymentRecord};
