// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use vg_booking_domain::DomainError;

/// Errors raised by the code allocator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocationError {
    /// Every numeric suffix in the vendor's range is already in use.
    ///
    /// The original system silently returned the range's upper bound here,
    /// which would hand the same code to every subsequent reservation. The
    /// exhausted range is surfaced instead.
    RangeExhausted {
        /// The display name of the vendor whose range is exhausted.
        vendor: String,
        /// The upper bound of the exhausted range.
        range_end: u32,
    },
}

impl std::fmt::Display for AllocationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RangeExhausted { vendor, range_end } => {
                write!(
                    f,
                    "Code range for vendor '{vendor}' is exhausted (last number: {range_end})"
                )
            }
        }
    }
}

impl std::error::Error for AllocationError {}

/// Errors that can occur in the reservation core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// Code allocation failed.
    Allocation(AllocationError),
    /// An internal invariant was violated.
    Internal(String),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::Allocation(err) => write!(f, "Allocation failed: {err}"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

impl From<AllocationError> for CoreError {
    fn from(err: AllocationError) -> Self {
        Self::Allocation(err)
    }
}
