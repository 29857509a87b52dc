//! `/orders` endpoints.

use storefront_core::generation::Operation;
use storefront_core::types::{Order, PlaceOrder, StatusUpdate};

use super::{normalize, ApiClient};
use crate::error::RequestError;
use crate::wire::orders::{
    OrderEnvelope, OrderListResponse, PlaceOrderBody, PlaceOrderResponse, StatusBody,
};
use crate::wire::Ack;

impl ApiClient {
    /// `POST /orders`. Turns the server-side cart into an order and returns
    /// its id.
    pub async fn place_order(&self, request: &PlaceOrder) -> Result<u64, RequestError> {
        let response: PlaceOrderResponse = self
            .post(Operation::PlaceOrder, "/orders", &PlaceOrderBody::from(request))
            .await?;
        Ok(response.order_id)
    }

    pub async fn list_orders(&self) -> Result<Vec<Order>, RequestError> {
        let op = Operation::FetchOrders;
        let response: OrderListResponse = self.get(op, "/orders").await?;
        normalize(op, response)
    }

    pub async fn get_order(&self, id: u64) -> Result<Order, RequestError> {
        let op = Operation::FetchOrder;
        let envelope: OrderEnvelope = self.get(op, &format!("/orders/{id}")).await?;
        normalize(op, envelope.order)
    }

    /// `PUT /orders/:id/status` (admin).
    pub async fn update_order_status(&self, id: u64, update: &StatusUpdate) -> Result<(), RequestError> {
        let _: Ack = self
            .put(Operation::UpdateOrderStatus, &format!("/orders/{id}/status"), &StatusBody::from(update))
            .await?;
        Ok(())
    }
}
