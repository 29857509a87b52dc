//! # Wire Normalization
//!
//! One DTO per backend payload, converted into exactly one canonical
//! `storefront-core` shape.
//!
//! ## Boundary
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   JSON body ──serde──► *Dto / *Response ──TryFrom──► core type          │
//! │                             │                           │               │
//! │                        snake_case                  Money in cents       │
//! │                        f64 prices                  Discount in bps      │
//! │                        null lists                  empty Vec            │
//! │                        "shipped"                   OrderStatus          │
//! │                                                                         │
//! │   Anything that does not fit becomes a WireError, which the API        │
//! │   client logs and reports as RequestError::Malformed.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Request bodies live here too, so every snake_case field name the backend
//! knows about sits in this module tree.

use chrono::{DateTime, Datelike, Utc};
use serde::Deserialize;
use thiserror::Error;

use storefront_core::money::Money;
use storefront_core::types::Discount;

pub mod account;
pub mod cart;
pub mod catalog;
pub mod orders;

/// A payload that parsed as JSON but does not describe a valid entity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct WireError(pub String);

pub type WireResult<T> = Result<T, WireError>;

// =============================================================================
// Shared Envelopes
// =============================================================================

/// Error body: `{"error": "..."}` or `{"message": "..."}`.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Extracts the server's reason from a failed response body.
pub fn server_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed
        .message
        .filter(|m| !m.trim().is_empty())
        .or_else(|| parsed.error.filter(|e| !e.trim().is_empty()))
}

/// Mutation acknowledgement: `{message, id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub id: Option<u64>,
}

impl Ack {
    /// The id of the created row.
    pub fn created_id(&self) -> WireResult<u64> {
        self.id
            .ok_or_else(|| WireError("acknowledgement is missing the created id".into()))
    }
}

/// Page metadata on list responses.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MetaDto {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
}

// =============================================================================
// Field Conversions
// =============================================================================

pub(crate) fn money(value: f64, field: &str) -> WireResult<Money> {
    match Money::from_decimal(value) {
        Some(m) if !m.is_negative() => Ok(m),
        _ => Err(WireError(format!("{field} is not a valid amount: {value}"))),
    }
}

pub(crate) fn discount(percentage: Option<f64>) -> Discount {
    percentage.map(Discount::from_percentage).unwrap_or_default()
}

pub(crate) fn quantity(value: i64, field: &str) -> WireResult<u32> {
    u32::try_from(value).map_err(|_| WireError(format!("{field} is out of range: {value}")))
}

/// Empty strings become `None`.
pub(crate) fn text(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Zero ids are the backend's "none".
pub(crate) fn id(value: Option<u64>) -> Option<u64> {
    value.filter(|v| *v != 0)
}

/// Go's zero `time.Time` (year 1) means "unset".
pub(crate) fn timestamp(value: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
    value.filter(|t| t.year() > 1)
}

/// Null lists become empty.
pub(crate) fn list<T>(value: Option<Vec<T>>) -> Vec<T> {
    value.unwrap_or_default()
}

/// Converts every element, failing on the first bad one.
pub(crate) fn convert_all<D, T>(items: Option<Vec<D>>) -> WireResult<Vec<T>>
where
    T: TryFrom<D, Error = WireError>,
{
    list(items).into_iter().map(T::try_from).collect()
}
