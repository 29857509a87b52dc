//! # Cart Slice
//!
//! Mirrors the server-side cart.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Slice Transitions                               │
//! │                                                                         │
//! │  Store Operation          Server                 Cart Action            │
//! │  ───────────────          ──────                 ───────────            │
//! │                                                                         │
//! │  fetch_cart ─────────────► GET /cart ──────────► Loaded(items)          │
//! │                                                                         │
//! │  add_to_cart ────────────► POST /cart                                   │
//! │                            GET /cart ──────────► Loaded(items)          │
//! │                                                                         │
//! │  update_cart_item ───────► PUT /cart/:id                                │
//! │                            GET /cart ──────────► Loaded(items)          │
//! │                                                                         │
//! │  remove_cart_item ───────► DELETE /cart/:id ───► Removed(id)            │
//! │                                                                         │
//! │  clear_cart ─────────────► DELETE /cart ───────► Cleared                │
//! │                                                                         │
//! │  NOTE: Totals are never stored. `totals()` derives them from `items`.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use super::RequestStatus;
use crate::money::Money;
use crate::types::CartItem;

/// Cart slice state.
///
/// ## Invariants
/// - Every item has `quantity >= 1`
/// - Item order is the server's order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    pub items: Vec<CartItem>,
    #[serde(flatten)]
    pub status: RequestStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    Pending,
    /// Authoritative item set from the server.
    Loaded(Vec<CartItem>),
    /// One line deleted on the server.
    Removed(u64),
    /// Every line deleted on the server.
    Cleared,
    Rejected(String),
    /// Replaces the items without touching the phase fields.
    Set(Vec<CartItem>),
    ClearError,
}

/// Derived cart figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Sum of quantities.
    pub total_items: u32,
    /// Sum of discounted line totals.
    pub subtotal: Money,
}

impl CartState {
    pub fn reduce(mut self, action: CartAction) -> Self {
        match action {
            CartAction::Pending => self.status.begin(),
            CartAction::Loaded(items) => {
                self.items = retain_positive(items);
                self.status.succeed();
            }
            CartAction::Removed(id) => {
                self.items.retain(|item| item.id != id);
                self.status.succeed();
            }
            CartAction::Cleared => {
                self.items.clear();
                self.status.succeed();
            }
            CartAction::Rejected(message) => self.status.fail(message),
            CartAction::Set(items) => self.items = retain_positive(items),
            CartAction::ClearError => self.status.clear_error(),
        }
        self
    }

    /// Totals derived from the current items.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::state::cart::CartState;
    ///
    /// let totals = CartState::default().totals();
    /// assert_eq!(totals.total_items, 0);
    /// assert!(totals.subtotal.is_zero());
    /// ```
    pub fn totals(&self) -> CartTotals {
        CartTotals {
            total_items: self.items.iter().map(|item| item.quantity).sum(),
            subtotal: self.items.iter().map(CartItem::line_total).sum(),
        }
    }

    pub fn find(&self, id: u64) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn retain_positive(mut items: Vec<CartItem>) -> Vec<CartItem> {
    items.retain(|item| item.quantity >= 1);
    items
}
