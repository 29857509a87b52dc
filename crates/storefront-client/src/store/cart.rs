//! Cart operations.
//!
//! Every successful mutation re-reads the whole cart, except remove and
//! clear, which patch locally.

use storefront_core::generation::Operation;
use storefront_core::state::CartAction;
use storefront_core::types::{CartItem, CartLine};

use super::Store;
use crate::error::RequestError;

impl Store {
    pub async fn fetch_cart(&self) -> Result<(), RequestError> {
        let api = &self.api;
        self.perform(Operation::FetchCart, api.get_cart(), CartAction::Loaded)
            .await
    }

    pub async fn add_to_cart(&self, line: CartLine) -> Result<(), RequestError> {
        let api = &self.api;
        self.perform(
            Operation::AddToCart,
            async move {
                api.add_cart_item(&line).await?;
                api.get_cart().await
            },
            CartAction::Loaded,
        )
        .await
    }

    /// Sets the quantity of a cart row. Zero removes the row.
    pub async fn update_cart_item(&self, id: u64, quantity: u32) -> Result<(), RequestError> {
        if quantity == 0 {
            return self.remove_cart_item(id).await;
        }
        let api = &self.api;
        self.perform(
            Operation::UpdateCartItem,
            async move {
                api.update_cart_item(id, quantity).await?;
                api.get_cart().await
            },
            CartAction::Loaded,
        )
        .await
    }

    pub async fn remove_cart_item(&self, id: u64) -> Result<(), RequestError> {
        let api = &self.api;
        self.perform(
            Operation::RemoveCartItem,
            api.remove_cart_item(id),
            |()| CartAction::Removed(id),
        )
        .await
    }

    pub async fn clear_cart(&self) -> Result<(), RequestError> {
        let api = &self.api;
        self.perform(Operation::ClearCart, api.clear_cart(), |()| CartAction::Cleared)
            .await
    }

    /// Replaces the items locally without a request.
    pub fn set_cart(&self, items: Vec<CartItem>) {
        self.dispatch(CartAction::Set(items));
    }
}
