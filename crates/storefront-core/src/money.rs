//! # Money Module
//!
//! Provides the `Money` type for prices, line totals and subtotals.
//!
//! ## Where Decimals Stop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  REST backend (decimal dollars)        Storefront client (cents)        │
//! │                                                                         │
//! │  "base_price": 49.99     ──► wire layer rounds ONCE ──►  Money(4999)    │
//! │  "discount_percentage": 10 ──────────────────────────►  Discount(1000)  │
//! │                                                                         │
//! │  Every total, filter bound and display value after this point is       │
//! │  integer arithmetic. 0.1 + 0.2 never happens here.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Money;
//!
//! let price = Money::from_cents(4999); // $49.99
//! let line = price * 2u32;             // $99.98
//! assert_eq!(line.to_string(), "$99.98");
//!
//! // 10% off, rounded half-up to the cent
//! assert_eq!(price.apply_percentage_discount(1000).cents(), 4499);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: discounts and promo reductions are plain subtraction
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Serialized as cents**: state snapshots never carry floats
///
/// ## User Workflow Context
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                    Where Money is Used                                  │
/// │                                                                         │
/// │  Product.price ──┬──► CartItem.price ──► CartItem.line_total            │
/// │                  │                              │                       │
/// │                  │                              ▼                       │
/// │                  │                     CartTotals.subtotal ──► Checkout │
/// │                  │                                                      │
/// │                  └──► ProductFilters.min_price / max_price              │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let price = Money::from_cents(2499); // $24.99
    /// assert_eq!(price.cents(), 2499);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from dollars and cents.
    ///
    /// For negative amounts only the dollar part carries the sign:
    /// `from_major_minor(-5, 50)` is -$5.50. Saturates at the i64 bounds.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        let dollars = major.saturating_mul(100);
        if major < 0 {
            Money(dollars.saturating_sub(minor))
        } else {
            Money(dollars.saturating_add(minor))
        }
    }

    /// Converts a decimal dollar amount received from the backend.
    ///
    /// This is the single place a floating point value becomes Money.
    /// The amount is rounded to the nearest cent; non-finite input
    /// yields `None`.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(24.99).unwrap().cents(), 2499);
    /// assert_eq!(Money::from_decimal(0.1 + 0.2).unwrap().cents(), 30);
    /// assert!(Money::from_decimal(f64::NAN).is_none());
    /// ```
    pub fn from_decimal(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }
        Some(Money((amount * 100.0).round() as i64))
    }

    /// Parses a user-entered dollar amount such as `"24.99"`, `"$5"` or `"0.5"`.
    ///
    /// At most two fractional digits are accepted. Amounts too large to hold
    /// in cents yield `None`.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::parse("$24.99"), Some(Money::from_cents(2499)));
    /// assert_eq!(Money::parse("0.5"), Some(Money::from_cents(50)));
    /// assert_eq!(Money::parse("1.234"), None);
    /// ```
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        let unsigned = trimmed.strip_prefix('$').unwrap_or(trimmed);
        if unsigned.is_empty() {
            return None;
        }

        let (major, minor) = match unsigned.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (unsigned, ""),
        };
        if minor.len() > 2 || !major.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        if !minor.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }

        let dollars: i64 = if major.is_empty() { 0 } else { major.parse().ok()? };
        let cents: i64 = match minor.len() {
            0 => 0,
            1 => minor.parse::<i64>().ok()? * 10,
            _ => minor.parse().ok()?,
        };
        dollars.checked_mul(100)?.checked_add(cents).map(Money)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the dollar portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cent portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is greater than zero.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## User Workflow
    /// ```text
    /// Product: Summer Floral Dress $49.99
    /// Quantity: 3
    ///      │
    ///      ▼
    /// multiply_quantity(3) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Line Total (before discount): $149.97
    /// ```
    ///
    /// Saturates at the i64 bounds.
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }

    /// Returns the amount that `discount_bps` takes off, rounded half-up.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`.
    /// The +5000 provides rounding (5000/10000 = 0.5).
    pub fn percentage_of(&self, bps: u32) -> Money {
        // i128 keeps large subtotals from overflowing before the division
        let part = (self.0 as i128 * bps as i128 + 5000) / 10000;
        Money(part as i64)
    }

    /// Applies a percentage discount and returns the discounted amount.
    ///
    /// ## Arguments
    /// * `discount_bps` - Discount in basis points (1000 = 10%)
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let line = Money::from_cents(5000); // $50.00
    /// assert_eq!(line.apply_percentage_discount(1000).cents(), 4500);
    ///
    /// // $0.05 at 10% off: the 0.5 cent reduction rounds up to 1 cent
    /// assert_eq!(Money::from_cents(5).apply_percentage_discount(1000).cents(), 4);
    /// ```
    pub fn apply_percentage_discount(&self, discount_bps: u32) -> Money {
        *self - self.percentage_of(discount_bps)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders as `$12.34` / `-$5.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a cart quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
