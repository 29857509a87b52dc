//! `/cart` endpoints. Cart rows are addressed by their own id.

use storefront_core::generation::Operation;
use storefront_core::types::{CartItem, CartLine};

use super::{malformed, normalize, ApiClient};
use crate::error::RequestError;
use crate::wire::cart::{CartAddBody, CartResponse, CartUpdateBody};
use crate::wire::Ack;

impl ApiClient {
    pub async fn get_cart(&self) -> Result<Vec<CartItem>, RequestError> {
        let op = Operation::FetchCart;
        let response: CartResponse = self.get(op, "/cart").await?;
        normalize(op, response)
    }

    /// Returns the id of the cart row that now holds the line.
    pub async fn add_cart_item(&self, line: &CartLine) -> Result<u64, RequestError> {
        let op = Operation::AddToCart;
        let ack: Ack = self.post(op, "/cart", &CartAddBody::from(line)).await?;
        ack.created_id().map_err(|e| malformed(op, e))
    }

    pub async fn update_cart_item(&self, id: u64, quantity: u32) -> Result<(), RequestError> {
        let _: Ack = self
            .put(Operation::UpdateCartItem, &format!("/cart/{id}"), &CartUpdateBody { quantity })
            .await?;
        Ok(())
    }

    pub async fn remove_cart_item(&self, id: u64) -> Result<(), RequestError> {
        let _: Ack = self.delete(Operation::RemoveCartItem, &format!("/cart/{id}")).await?;
        Ok(())
    }

    pub async fn clear_cart(&self) -> Result<(), RequestError> {
        let _: Ack = self.delete(Operation::ClearCart, "/cart").await?;
        Ok(())
    }
}
