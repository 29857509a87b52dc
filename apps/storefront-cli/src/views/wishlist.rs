//! Wishlist table.

use storefront_core::state::WishlistState;

use super::{discount_label, stock_label, table};

pub fn render(wishlist: &WishlistState) -> String {
    if wishlist.is_empty() {
        return "Your wishlist is empty.\n".to_string();
    }

    let rows = wishlist.items.iter().map(|item| {
        [
            item.product_id.to_string(),
            item.name.clone(),
            stock_label(item.in_stock).to_string(),
            item.price.to_string(),
            discount_label(item.discount),
            item.final_price().to_string(),
        ]
    });
    let mut out = table(["ID", "Product", "Stock", "Price", "Off", "Now"], rows, 3);
    out.push_str(&format!("\n{} saved\n", wishlist.len()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::money::Money;
    use storefront_core::state::WishlistAction;
    use storefront_core::types::{Discount, WishlistItem};

    fn saved(product_id: u64, name: &str, cents: i64, pct: f64) -> WishlistItem {
        WishlistItem {
            product_id,
            entry_id: Some(product_id + 100),
            name: name.to_string(),
            description: String::new(),
            price: Money::from_cents(cents),
            discount: Discount::from_percentage(pct),
            image: None,
            in_stock: true,
            added_at: None,
        }
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render(&WishlistState::default()), "Your wishlist is empty.\n");
    }

    #[test]
    fn test_render_shows_discounted_price() {
        let wishlist = WishlistState::default().reduce(WishlistAction::Loaded(vec![
            saved(2, "Summer Floral Dress", 4_999, 10.0),
            saved(3, "Casual Denim Jacket", 7_999, 0.0),
        ]));
        let rendered = render(&wishlist);
        assert!(rendered.contains("Summer Floral Dress"));
        assert!(rendered.contains("$44.99"));
        assert!(rendered.contains("2 saved"));
    }
}
