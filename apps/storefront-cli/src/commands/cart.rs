//! Cart view and line edits.

use clap::Subcommand;

use storefront_client::Store;
use storefront_core::types::CartLine;
use storefront_core::validation::validate_quantity;

use super::{failed, invalid, settle, signed_in};
use crate::views::cart::{self, Checkout};
use crate::views::notify::Notice;

#[derive(Debug, Subcommand)]
pub enum CartCommand {
    /// Show the cart with its checkout summary.
    Show {
        /// Promo code to apply to the summary.
        #[arg(long)]
        promo: Option<String>,
    },
    /// Add a product variant.
    Add {
        product_id: u64,
        #[arg(long)]
        color_id: u64,
        #[arg(long)]
        size_id: u64,
        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },
    /// Change a line's quantity; 0 removes the line.
    Update { line_id: u64, quantity: u32 },
    Remove { line_id: u64 },
    Clear,
}

pub async fn run(store: &Store, command: CartCommand) -> anyhow::Result<()> {
    if !signed_in(store) {
        return Ok(());
    }

    let mut checkout = Checkout::default();
    match command {
        CartCommand::Show { promo } => {
            settle(store.fetch_cart().await);
            if let Some(code) = promo {
                if checkout.apply_promo(&code) {
                    Notice::success("Promo code applied").emit();
                } else {
                    Notice::error(format!("Invalid promo code '{}'", code.trim())).emit();
                }
            }
        }
        CartCommand::Add {
            product_id,
            color_id,
            size_id,
            quantity,
        } => {
            validate_quantity(quantity).map_err(invalid)?;
            store
                .add_to_cart(CartLine {
                    product_id,
                    color_id,
                    size_id,
                    quantity,
                })
                .await
                .map_err(failed)?;
            Notice::success("Added to cart").emit();
        }
        CartCommand::Update { line_id, quantity } => {
            if quantity > 0 {
                validate_quantity(quantity).map_err(invalid)?;
            }
            store.update_cart_item(line_id, quantity).await.map_err(failed)?;
            Notice::success("Cart updated").emit();
        }
        CartCommand::Remove { line_id } => {
            store.remove_cart_item(line_id).await.map_err(failed)?;
            Notice::success("Item removed from cart").emit();
        }
        CartCommand::Clear => {
            store.clear_cart().await.map_err(failed)?;
            Notice::success("Cart cleared").emit();
        }
    }

    print!("{}", cart::render(&store.state().cart, checkout));
    Ok(())
}
