//! # Views
//!
//! Terminal renderings of the state tree.
//!
//! ## What a View Owns
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         View Responsibilities                           │
//! │                                                                         │
//! │  Reads from AppState            Owns locally                           │
//! │  ───────────────────            ────────────                           │
//! │  products, categories           selected colour / size, quantity       │
//! │  cart items + totals            promo code                             │
//! │  wishlist entries               sample catalog substitution            │
//! │  orders, addresses              session gate decision                  │
//! │                                                                         │
//! │  Views never copy slice entities into their own state. Everything     │
//! │  rendered from a slice is read fresh from the state at render time.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Render functions are pure: they take state and return a `String`, so the
//! commands decide where output goes.

use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};

use storefront_client::TokenStore;
use storefront_core::money::Money;
use storefront_core::types::Discount;

pub mod cart;
pub mod catalog;
pub mod header;
pub mod notify;
pub mod orders;
pub mod product;
pub mod wishlist;

// =============================================================================
// Session Gate
// =============================================================================

/// Outcome of the session check a protected view runs at mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Open,
    RedirectToLogin,
}

/// Checks the token store once. Cart, wishlist and order views call this
/// before issuing any request.
pub fn session_gate(tokens: &TokenStore) -> Gate {
    if tokens.is_valid() {
        Gate::Open
    } else {
        Gate::RedirectToLogin
    }
}

// =============================================================================
// Table Helpers
// =============================================================================

/// Renders rows under `header`, right-aligning columns from `numeric_from`.
pub(crate) fn table<const N: usize>(
    header: [&str; N],
    rows: impl IntoIterator<Item = [String; N]>,
    numeric_from: usize,
) -> String {
    let mut builder = Builder::default();
    builder.push_record(header);
    for row in rows {
        builder.push_record(row);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    if numeric_from < N {
        table.modify(Columns::new(numeric_from..N), Alignment::right());
    }
    table.to_string()
}

pub(crate) fn discount_label(discount: Discount) -> String {
    if discount.is_zero() {
        "-".to_string()
    } else {
        discount.to_string()
    }
}

pub(crate) fn stock_label(in_stock: bool) -> &'static str {
    if in_stock {
        "in stock"
    } else {
        "out of stock"
    }
}

pub(crate) fn money_or_free(amount: Money) -> String {
    if amount.is_zero() {
        "Free".to_string()
    } else {
        amount.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_without_credential_redirects() {
        assert_eq!(session_gate(&TokenStore::headless()), Gate::RedirectToLogin);
    }

    #[test]
    fn test_gate_with_opaque_credential_opens() {
        let tokens = TokenStore::in_memory();
        tokens.set("opaque");
        assert_eq!(session_gate(&tokens), Gate::Open);
    }

    #[test]
    fn test_table_contains_cells() {
        let rendered = table(
            ["Name", "Price"],
            [["Tee".to_string(), "$19.99".to_string()]],
            1,
        );
        assert!(rendered.contains("Name"));
        assert!(rendered.contains("$19.99"));
    }

    #[test]
    fn test_labels() {
        assert_eq!(discount_label(Discount::zero()), "-");
        assert_eq!(money_or_free(Money::zero()), "Free");
        assert_eq!(money_or_free(Money::from_cents(1_000)), "$10.00");
    }
}
