//! `/wishlist` endpoints.

use storefront_core::generation::Operation;
use storefront_core::types::WishlistItem;

use super::{malformed, normalize, ApiClient};
use crate::error::RequestError;
use crate::wire::cart::{WishlistAddBody, WishlistResponse};
use crate::wire::Ack;

impl ApiClient {
    pub async fn get_wishlist(&self) -> Result<Vec<WishlistItem>, RequestError> {
        let op = Operation::FetchWishlist;
        let response: WishlistResponse = self.get(op, "/wishlist").await?;
        normalize(op, response)
    }

    /// Returns the new wishlist row id.
    pub async fn add_wishlist_item(&self, product_id: u64) -> Result<u64, RequestError> {
        let op = Operation::AddToWishlist;
        let ack: Ack = self.post(op, "/wishlist", &WishlistAddBody { product_id }).await?;
        ack.created_id().map_err(|e| malformed(op, e))
    }

    /// Deletes a wishlist row by its row id (not the product id).
    pub async fn remove_wishlist_item(&self, entry_id: u64) -> Result<(), RequestError> {
        let _: Ack = self
            .delete(Operation::RemoveFromWishlist, &format!("/wishlist/{entry_id}"))
            .await?;
        Ok(())
    }

    pub async fn clear_wishlist(&self) -> Result<(), RequestError> {
        let _: Ack = self.delete(Operation::ClearWishlist, "/wishlist").await?;
        Ok(())
    }
}
