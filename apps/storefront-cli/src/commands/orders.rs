//! # Order Commands
//!
//! History, detail and checkout.
//!
//! ## Checkout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  storefront orders place [--address 2] [--payment card]                 │
//! │                                                                         │
//! │  fetch_addresses ──► chosen / default / first address                   │
//! │  fetch_cart      ──► refuse an empty cart                               │
//! │  place_order     ──► POST /orders, GET /orders/:id                      │
//! │  fetch_cart      ──► the backend empties the cart on success            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::{anyhow, bail};
use clap::Subcommand;

use storefront_client::Store;
use storefront_core::types::PlaceOrder;
use storefront_core::validation::validate_required;

use super::{failed, invalid, settle, signed_in};
use crate::views::notify::Notice;
use crate::views::orders;

#[derive(Debug, Subcommand)]
pub enum OrdersCommand {
    List,
    Show {
        id: u64,
    },
    /// Place an order for the current cart.
    Place {
        /// Shipping address id; defaults to the default address.
        #[arg(long)]
        address: Option<u64>,

        #[arg(long, default_value = "cod")]
        payment: String,
    },
}

pub async fn run(store: &Store, command: OrdersCommand) -> anyhow::Result<()> {
    if !signed_in(store) {
        return Ok(());
    }

    match command {
        OrdersCommand::List => {
            settle(store.fetch_orders().await);
            print!("{}", orders::render_orders(&store.state().orders));
        }
        OrdersCommand::Show { id } => {
            store.fetch_order(id).await.map_err(failed)?;
            if let Some(order) = &store.state().orders.current_order {
                print!("{}", orders::render_order(order));
            }
        }
        OrdersCommand::Place { address, payment } => {
            validate_required("payment method", &payment).map_err(invalid)?;
            let address_id = shipping_address(store, address).await?;

            settle(store.fetch_cart().await);
            if store.state().cart.is_empty() {
                bail!("Your cart is empty");
            }

            store
                .place_order(PlaceOrder {
                    address_id,
                    payment_method: payment.trim().to_string(),
                })
                .await
                .map_err(failed)?;
            settle(store.fetch_cart().await);

            let state = store.state();
            if let Some(order) = &state.orders.current_order {
                Notice::success(format!("Order #{} placed", order.id)).emit();
                print!("{}", orders::render_order(order));
            }
        }
    }
    Ok(())
}

async fn shipping_address(store: &Store, chosen: Option<u64>) -> anyhow::Result<u64> {
    store.fetch_addresses().await.map_err(failed)?;
    let state = store.state();
    let book = &state.orders;

    match chosen {
        Some(id) if book.addresses.iter().any(|a| a.id == id) => Ok(id),
        Some(id) => Err(anyhow!("Address {id} is not in your address book")),
        None => book
            .default_address()
            .map(|a| a.id)
            .ok_or_else(|| anyhow!("Add a shipping address first: storefront addresses add")),
    }
}
