//! # Wishlist Slice
//!
//! Saved products, unique by product id.
//!
//! Toggling is not an action of its own: the store reads [`WishlistState::contains`]
//! and issues exactly one of add or remove.

use serde::{Deserialize, Serialize};

use super::RequestStatus;
use crate::types::WishlistItem;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistState {
    pub items: Vec<WishlistItem>,
    #[serde(flatten)]
    pub status: RequestStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WishlistAction {
    Pending,
    /// Authoritative set from the server.
    Loaded(Vec<WishlistItem>),
    /// Entry for this product id deleted on the server.
    Removed(u64),
    Cleared,
    Rejected(String),
    /// Replaces the items without touching the phase fields.
    Set(Vec<WishlistItem>),
    ClearError,
}

impl WishlistState {
    pub fn reduce(mut self, action: WishlistAction) -> Self {
        match action {
            WishlistAction::Pending => self.status.begin(),
            WishlistAction::Loaded(items) => {
                self.items = unique_by_product(items);
                self.status.succeed();
            }
            WishlistAction::Removed(product_id) => {
                self.items.retain(|item| item.product_id != product_id);
                self.status.succeed();
            }
            WishlistAction::Cleared => {
                self.items.clear();
                self.status.succeed();
            }
            WishlistAction::Rejected(message) => self.status.fail(message),
            WishlistAction::Set(items) => self.items = unique_by_product(items),
            WishlistAction::ClearError => self.status.clear_error(),
        }
        self
    }

    /// Membership check used by toggles and product cards.
    pub fn contains(&self, product_id: u64) -> bool {
        self.items.iter().any(|item| item.product_id == product_id)
    }

    pub fn entry(&self, product_id: u64) -> Option<&WishlistItem> {
        self.items.iter().find(|item| item.product_id == product_id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// First occurrence wins.
fn unique_by_product(items: Vec<WishlistItem>) -> Vec<WishlistItem> {
    let mut unique: Vec<WishlistItem> = Vec::with_capacity(items.len());
    for item in items {
        if !unique.iter().any(|kept| kept.product_id == item.product_id) {
            unique.push(item);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::Discount;

    fn entry(entry_id: u64, product_id: u64) -> WishlistItem {
        WishlistItem {
            product_id,
            entry_id: Some(entry_id),
            name: format!("Product {product_id}"),
            description: String::new(),
            price: Money::from_cents(1000),
            discount: Discount::zero(),
            image: None,
            in_stock: true,
            added_at: None,
        }
    }

    #[test]
    fn test_loaded_dedups_by_product() {
        let wishlist =
            WishlistState::default().reduce(WishlistAction::Loaded(vec![entry(1, 5), entry(2, 5), entry(3, 6)]));
        assert_eq!(wishlist.len(), 2);
        assert_eq!(wishlist.entry(5).and_then(|e| e.entry_id), Some(1));
    }

    #[test]
    fn test_contains_and_remove() {
        let wishlist = WishlistState::default().reduce(WishlistAction::Loaded(vec![entry(1, 5)]));
        assert!(wishlist.contains(5));
        assert!(!wishlist.contains(6));

        let wishlist = wishlist.reduce(WishlistAction::Removed(5));
        assert!(!wishlist.contains(5));
        assert!(wishlist.is_empty());
    }

    #[test]
    fn test_rejected_keeps_items() {
        let wishlist = WishlistState::default()
            .reduce(WishlistAction::Loaded(vec![entry(1, 5)]))
            .reduce(WishlistAction::Pending)
            .reduce(WishlistAction::Rejected("Failed to remove from wishlist".to_string()));
        assert!(wishlist.contains(5));
        assert!(!wishlist.status.loading);
        assert!(wishlist.status.error.is_some());
    }

    #[test]
    fn test_cleared() {
        let wishlist = WishlistState::default()
            .reduce(WishlistAction::Loaded(vec![entry(1, 5), entry(2, 6)]))
            .reduce(WishlistAction::Cleared);
        assert!(wishlist.is_empty());
    }
}
