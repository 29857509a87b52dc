//! # Orders Slice
//!
//! Order history, the order being viewed, and saved shipping addresses.
//!
//! ## Default Address
//! The backend keeps at most one default address per user. When a created or
//! updated address arrives flagged as default, every other address loses the
//! flag locally so the list matches what the next fetch would return.

use serde::{Deserialize, Serialize};

use super::RequestStatus;
use crate::types::{Address, Order};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderState {
    pub orders: Vec<Order>,
    pub current_order: Option<Order>,
    pub addresses: Vec<Address>,
    #[serde(flatten)]
    pub status: RequestStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OrderAction {
    Pending,
    Rejected(String),
    ClearError,

    OrdersLoaded(Vec<Order>),
    /// Detail view of one order.
    OrderLoaded(Order),
    /// A just-placed order: becomes current and is prepended.
    OrderPlaced(Order),
    /// Fresh copy after a status change.
    OrderUpdated(Order),
    ClearCurrentOrder,

    AddressesLoaded(Vec<Address>),
    AddressLoaded(Address),
    AddressCreated(Address),
    AddressUpdated(Address),
    AddressDeleted(u64),
}

impl OrderState {
    pub fn reduce(mut self, action: OrderAction) -> Self {
        match action {
            OrderAction::Pending => self.status.begin(),
            OrderAction::Rejected(message) => self.status.fail(message),
            OrderAction::ClearError => self.status.clear_error(),

            OrderAction::OrdersLoaded(orders) => {
                self.orders = orders;
                self.status.succeed();
            }
            OrderAction::OrderLoaded(order) => {
                self.current_order = Some(order);
                self.status.succeed();
            }
            OrderAction::OrderPlaced(order) => {
                self.orders.retain(|o| o.id != order.id);
                self.orders.insert(0, order.clone());
                self.current_order = Some(order);
                self.status.succeed();
            }
            OrderAction::OrderUpdated(order) => {
                if let Some(slot) = self.orders.iter_mut().find(|o| o.id == order.id) {
                    *slot = order.clone();
                }
                if self.current_order.as_ref().is_some_and(|o| o.id == order.id) {
                    self.current_order = Some(order);
                }
                self.status.succeed();
            }
            OrderAction::ClearCurrentOrder => self.current_order = None,

            OrderAction::AddressesLoaded(addresses) => {
                self.addresses = addresses;
                self.status.succeed();
            }
            OrderAction::AddressLoaded(address) | OrderAction::AddressUpdated(address) => {
                self.upsert_address(address);
                self.status.succeed();
            }
            OrderAction::AddressCreated(address) => {
                self.addresses.retain(|a| a.id != address.id);
                self.demote_defaults(&address);
                self.addresses.push(address);
                self.status.succeed();
            }
            OrderAction::AddressDeleted(id) => {
                self.addresses.retain(|a| a.id != id);
                self.status.succeed();
            }
        }
        self
    }

    fn upsert_address(&mut self, address: Address) {
        self.demote_defaults(&address);
        match self.addresses.iter_mut().find(|a| a.id == address.id) {
            Some(slot) => *slot = address,
            None => self.addresses.push(address),
        }
    }

    fn demote_defaults(&mut self, incoming: &Address) {
        if incoming.is_default {
            for address in self.addresses.iter_mut().filter(|a| a.id != incoming.id) {
                address.is_default = false;
            }
        }
    }

    /// The default address, or the first one if none is flagged.
    pub fn default_address(&self) -> Option<&Address> {
        self.addresses
            .iter()
            .find(|a| a.is_default)
            .or_else(|| self.addresses.first())
    }

    pub fn find_order(&self, id: u64) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }
}
