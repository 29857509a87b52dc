//! Wishlist operations.
//!
//! Entries are keyed by product id locally, but the delete endpoint wants
//! the wishlist row id (`entry_id`).

use tracing::debug;

use storefront_core::generation::Operation;
use storefront_core::state::WishlistAction;
use storefront_core::types::WishlistItem;

use super::Store;
use crate::error::RequestError;

impl Store {
    pub async fn fetch_wishlist(&self) -> Result<(), RequestError> {
        let api = &self.api;
        self.perform(Operation::FetchWishlist, api.get_wishlist(), WishlistAction::Loaded)
            .await
    }

    pub async fn add_to_wishlist(&self, product_id: u64) -> Result<(), RequestError> {
        let api = &self.api;
        self.perform(
            Operation::AddToWishlist,
            async move {
                api.add_wishlist_item(product_id).await?;
                api.get_wishlist().await
            },
            WishlistAction::Loaded,
        )
        .await
    }

    /// Removes the entry for `product_id`.
    ///
    /// When the row id is not known locally, the wishlist is read first to
    /// find it. A product that is not on the server's wishlist is only
    /// dropped locally.
    pub async fn remove_from_wishlist(&self, product_id: u64) -> Result<(), RequestError> {
        let known = self
            .state()
            .wishlist
            .entry(product_id)
            .and_then(|item| item.entry_id);
        let api = &self.api;
        let span = &self.span;

        self.perform(
            Operation::RemoveFromWishlist,
            async move {
                let entry_id = match known {
                    Some(id) => Some(id),
                    None => api
                        .get_wishlist()
                        .await?
                        .into_iter()
                        .find(|item| item.product_id == product_id)
                        .and_then(|item| item.entry_id),
                };
                match entry_id {
                    Some(entry_id) => api.remove_wishlist_item(entry_id).await,
                    None => {
                        span.in_scope(|| debug!(product_id, "Product not on server wishlist"));
                        Ok(())
                    }
                }
            },
            |()| WishlistAction::Removed(product_id),
        )
        .await
    }

    pub async fn clear_wishlist(&self) -> Result<(), RequestError> {
        let api = &self.api;
        self.perform(Operation::ClearWishlist, api.clear_wishlist(), |()| {
            WishlistAction::Cleared
        })
        .await
    }

    /// Adds the product if absent, removes it if present.
    ///
    /// Membership is read once, before anything is sent, so exactly one of
    /// add or remove is issued.
    pub async fn toggle_wishlist(&self, product_id: u64) -> Result<(), RequestError> {
        let present = self.state().wishlist.contains(product_id);
        if present {
            self.remove_from_wishlist(product_id).await
        } else {
            self.add_to_wishlist(product_id).await
        }
    }

    /// Replaces the entries locally without a request.
    pub fn set_wishlist(&self, items: Vec<WishlistItem>) {
        self.dispatch(WishlistAction::Set(items));
    }
}
