// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the operation boundary.

use crate::config_policy::ConfigPolicyError;
use vg_booking::{AllocationError, CoreError};
use vg_booking_domain::DomainError;
use vg_booking_persistence::PersistenceError;

/// Operation-boundary errors.
///
/// These are distinct from domain/core/persistence errors and represent
/// the contract surfaced to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The draft failed validation; every corrective message is collected.
    ValidationFailed {
        /// The corrective messages, one per failed rule.
        messages: Vec<String>,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A remote-store operation failed.
    ///
    /// Transient by nature: the local cache is never corrupted by one of
    /// these, and retrying is a manual action.
    RemoteFailure {
        /// The operation that failed.
        operation: String,
        /// A human-readable description of the failure.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ValidationFailed { messages } => {
                write!(f, "Validation failed: {}", messages.join("; "))
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::RemoteFailure { operation, message } => {
                write!(f, "Remote store failure during {operation}: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<ConfigPolicyError> for ApiError {
    fn from(err: ConfigPolicyError) -> Self {
        Self::InvalidInput {
            field: String::from("config"),
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidCategory(msg) => ApiError::InvalidInput {
            field: String::from("category"),
            message: msg,
        },
        DomainError::InvalidAddonService(msg) => ApiError::InvalidInput {
            field: String::from("addon_service"),
            message: msg,
        },
        DomainError::InvalidStatus(msg) => ApiError::InvalidInput {
            field: String::from("status"),
            message: msg,
        },
        DomainError::InvalidVendorKey(msg) => ApiError::InvalidInput {
            field: String::from("vendor_key"),
            message: msg,
        },
        DomainError::BuiltinVendorDelete { vendor_key } => ApiError::DomainRuleViolation {
            rule: String::from("builtin_vendor_immutable"),
            message: format!("Vendor '{vendor_key}' is a built-in profile and cannot be deleted"),
        },
        DomainError::InvalidVendorRange {
            vendor_key,
            range_start,
            range_end,
        } => ApiError::InvalidInput {
            field: String::from("range"),
            message: format!(
                "Vendor '{vendor_key}' has an invalid code range {range_start}..={range_end}"
            ),
        },
        DomainError::EmptyVendorPrefix { vendor_key } => ApiError::InvalidInput {
            field: String::from("prefix"),
            message: format!("Vendor '{vendor_key}' has an empty code prefix"),
        },
        DomainError::CodeOutsideVendorPrefix { code, prefix } => ApiError::InvalidInput {
            field: String::from("code"),
            message: format!("Code '{code}' does not start with vendor prefix '{prefix}'"),
        },
        DomainError::InvalidMonth(month) => ApiError::InvalidInput {
            field: String::from("months"),
            message: format!("Invalid month: {month}. Must be between 1 and 12"),
        },
    }
}

/// Translates an allocation error into an API error.
#[must_use]
pub fn translate_allocation_error(err: AllocationError) -> ApiError {
    match err {
        AllocationError::RangeExhausted { vendor, range_end } => ApiError::DomainRuleViolation {
            rule: String::from("code_range_exhausted"),
            message: format!(
                "Code range for vendor '{vendor}' is exhausted (last number: {range_end})"
            ),
        },
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Allocation(allocation_err) => translate_allocation_error(allocation_err),
        CoreError::Internal(msg) => ApiError::Internal {
            message: format!("Internal error: {msg}"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// # Arguments
///
/// * `operation` - The remote operation that failed (for the message)
/// * `err` - The persistence error
#[must_use]
pub fn translate_persistence_error(operation: &str, err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::ReservationNotFound(code) => ApiError::ResourceNotFound {
            resource_type: String::from("Reservation"),
            message: format!("No reservation found for code '{code}'"),
        },
        other => ApiError::RemoteFailure {
            operation: String::from(operation),
            message: other.to_string(),
        },
    }
}
