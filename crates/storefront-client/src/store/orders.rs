//! Order and address operations.

use storefront_core::generation::Operation;
use storefront_core::state::OrderAction;
use storefront_core::types::{AddressInput, PlaceOrder, StatusUpdate};

use super::Store;
use crate::error::RequestError;

impl Store {
    // =========================================================================
    // Orders
    // =========================================================================

    pub async fn fetch_orders(&self) -> Result<(), RequestError> {
        let api = &self.api;
        self.perform(Operation::FetchOrders, api.list_orders(), OrderAction::OrdersLoaded)
            .await
    }

    pub async fn fetch_order(&self, id: u64) -> Result<(), RequestError> {
        let api = &self.api;
        self.perform(Operation::FetchOrder, api.get_order(id), OrderAction::OrderLoaded)
            .await
    }

    /// Places an order from the server-side cart.
    ///
    /// The placed order becomes `current_order`. The backend empties the
    /// cart; callers re-fetch it to see that.
    pub async fn place_order(&self, request: PlaceOrder) -> Result<(), RequestError> {
        let api = &self.api;
        self.perform(
            Operation::PlaceOrder,
            async move {
                let id = api.place_order(&request).await?;
                api.get_order(id).await
            },
            OrderAction::OrderPlaced,
        )
        .await
    }

    pub async fn update_order_status(
        &self,
        id: u64,
        update: StatusUpdate,
    ) -> Result<(), RequestError> {
        let api = &self.api;
        self.perform(
            Operation::UpdateOrderStatus,
            async move {
                api.update_order_status(id, &update).await?;
                api.get_order(id).await
            },
            OrderAction::OrderUpdated,
        )
        .await
    }

    pub fn clear_current_order(&self) {
        self.dispatch(OrderAction::ClearCurrentOrder);
    }

    // =========================================================================
    // Addresses
    // =========================================================================

    pub async fn fetch_addresses(&self) -> Result<(), RequestError> {
        let api = &self.api;
        self.perform(
            Operation::FetchAddresses,
            api.list_addresses(),
            OrderAction::AddressesLoaded,
        )
        .await
    }

    pub async fn fetch_address(&self, id: u64) -> Result<(), RequestError> {
        let api = &self.api;
        self.perform(Operation::FetchAddress, api.get_address(id), OrderAction::AddressLoaded)
            .await
    }

    pub async fn create_address(&self, input: AddressInput) -> Result<(), RequestError> {
        let api = &self.api;
        self.perform(
            Operation::CreateAddress,
            async move {
                let id = api.create_address(&input).await?;
                api.get_address(id).await
            },
            OrderAction::AddressCreated,
        )
        .await
    }

    pub async fn update_address(&self, id: u64, input: AddressInput) -> Result<(), RequestError> {
        let api = &self.api;
        self.perform(
            Operation::UpdateAddress,
            async move {
                api.update_address(id, &input).await?;
                api.get_address(id).await
            },
            OrderAction::AddressUpdated,
        )
        .await
    }

    pub async fn delete_address(&self, id: u64) -> Result<(), RequestError> {
        let api = &self.api;
        self.perform(Operation::DeleteAddress, api.delete_address(id), |()| {
            OrderAction::AddressDeleted(id)
        })
        .await
    }
}
