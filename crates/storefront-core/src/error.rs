//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - Unknown sort keys, statuses, storage kinds     │
//! │  └── ValidationError  - Input checks performed by views                │
//! │                                                                         │
//! │  storefront-client errors (separate crate)                             │
//! │  ├── RequestError     - The only error a slice operation produces      │
//! │  └── ClientError      - Configuration and setup failures               │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → View notification                 │
//! │        RequestError → slice `error` field → View notification          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every message here is shown to the shopper as-is, so variants carry the
//! offending field or keyword and the accepted values.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
///
/// These errors come from parsing user-facing keywords into typed values.
/// They should be caught by the view and shown as notifications.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Sort key does not name a known ordering.
    ///
    /// ## When This Occurs
    /// - `--sort cheapest` on the command line
    /// - A stale config file naming a removed ordering
    #[error("Unknown sort order '{0}'. Valid options: newest, oldest, price-asc, price-desc, popularity")]
    UnknownSortOrder(String),

    /// Order status is not one the backend accepts.
    #[error("Unknown order status '{0}'. Valid options: processing, shipped, delivered, cancelled")]
    UnknownOrderStatus(String),

    /// Payment status is not one the backend accepts.
    #[error("Unknown payment status '{0}'. Valid options: pending, paid, failed, refunded")]
    UnknownPaymentStatus(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before an operation is dispatched.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., e-mail without '@').
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Lower bound of a range is above its upper bound.
    #[error("{field}: minimum {min} is greater than maximum {max}")]
    InvertedRange { field: String, min: String, max: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
