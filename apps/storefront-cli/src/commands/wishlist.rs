//! Wishlist view and edits.

use clap::Subcommand;

use storefront_client::Store;

use super::{failed, settle, signed_in};
use crate::views::notify::Notice;
use crate::views::wishlist;

#[derive(Debug, Subcommand)]
pub enum WishlistCommand {
    Show,
    /// Add the product if absent, remove it if present.
    Toggle { product_id: u64 },
    Remove { product_id: u64 },
    Clear,
}

pub async fn run(store: &Store, command: WishlistCommand) -> anyhow::Result<()> {
    if !signed_in(store) {
        return Ok(());
    }

    match command {
        WishlistCommand::Show => {
            settle(store.fetch_wishlist().await);
        }
        WishlistCommand::Toggle { product_id } => {
            let was_saved = store.state().wishlist.contains(product_id);
            store.toggle_wishlist(product_id).await.map_err(failed)?;
            Notice::success(if was_saved {
                "Removed from wishlist"
            } else {
                "Added to wishlist"
            })
            .emit();
        }
        WishlistCommand::Remove { product_id } => {
            store.remove_from_wishlist(product_id).await.map_err(failed)?;
            Notice::success("Removed from wishlist").emit();
        }
        WishlistCommand::Clear => {
            store.clear_wishlist().await.map_err(failed)?;
            Notice::success("Wishlist cleared").emit();
        }
    }

    print!("{}", wishlist::render(&store.state().wishlist));
    Ok(())
}
