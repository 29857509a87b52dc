//! # Cart and Checkout Summary
//!
//! ## Summary Arithmetic
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  subtotal  = Σ line totals (discounted)          from CartState         │
//! │  shipping  = 0 if subtotal > $100.00 else $10.00 (on the subtotal)      │
//! │  promo     = 10% of subtotal when DISCOUNT10 is applied                 │
//! │  total     = subtotal + shipping - promo                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The promo code is local to the view. Nothing about it reaches the
//! backend or the cart slice.

use storefront_core::money::Money;
use storefront_core::state::{CartState, CartTotals};

use super::{discount_label, money_or_free, table};

/// Subtotals strictly above this ship for free.
pub const FREE_SHIPPING_THRESHOLD: Money = Money::from_cents(10_000);

pub const FLAT_SHIPPING: Money = Money::from_cents(1_000);

/// The one promo code the storefront accepts, compared case-insensitively.
pub const PROMO_CODE: &str = "DISCOUNT10";

/// 10% in basis points.
pub const PROMO_BPS: u32 = 1_000;

/// View-local checkout choices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Checkout {
    pub promo_applied: bool,
}

impl Checkout {
    /// Applies `code` if it matches. An unknown code leaves the previous
    /// choice in place and returns false.
    pub fn apply_promo(&mut self, code: &str) -> bool {
        if code.trim().eq_ignore_ascii_case(PROMO_CODE) {
            self.promo_applied = true;
            true
        } else {
            false
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutSummary {
    pub total_items: u32,
    pub subtotal: Money,
    pub shipping: Money,
    pub promo: Money,
    pub total: Money,
}

pub fn summary(totals: CartTotals, checkout: Checkout) -> CheckoutSummary {
    let shipping = if totals.subtotal > FREE_SHIPPING_THRESHOLD {
        Money::zero()
    } else {
        FLAT_SHIPPING
    };
    let promo = if checkout.promo_applied {
        totals.subtotal.percentage_of(PROMO_BPS)
    } else {
        Money::zero()
    };

    CheckoutSummary {
        total_items: totals.total_items,
        subtotal: totals.subtotal,
        shipping,
        promo,
        total: totals.subtotal + shipping - promo,
    }
}

pub fn render(cart: &CartState, checkout: Checkout) -> String {
    if cart.is_empty() {
        return "Your cart is empty.\n".to_string();
    }

    let rows = cart.items.iter().map(|item| {
        let variant = match (&item.color, &item.size) {
            (Some(color), Some(size)) => format!("{color} / {size}"),
            (Some(color), None) => color.clone(),
            (None, Some(size)) => size.clone(),
            (None, None) => "-".to_string(),
        };
        [
            item.id.to_string(),
            item.name.clone(),
            variant,
            item.price.to_string(),
            discount_label(item.discount),
            item.quantity.to_string(),
            item.line_total().to_string(),
        ]
    });
    let mut out = table(["Line", "Product", "Variant", "Price", "Off", "Qty", "Total"], rows, 3);
    out.push('\n');

    let s = summary(cart.totals(), checkout);
    out.push_str(&format!("Items:     {}\n", s.total_items));
    out.push_str(&format!("Subtotal:  {}\n", s.subtotal));
    out.push_str(&format!("Shipping:  {}\n", money_or_free(s.shipping)));
    if checkout.promo_applied {
        out.push_str(&format!("Promo:     -{} ({PROMO_CODE})\n", s.promo));
    }
    out.push_str(&format!("Total:     {}\n", s.total));
    if s.shipping.is_zero() {
        out.push_str("You qualify for free shipping.\n");
    } else {
        let remaining = FREE_SHIPPING_THRESHOLD - s.subtotal;
        out.push_str(&format!("Spend more than {remaining} extra for free shipping.\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::state::CartAction;
    use storefront_core::types::{CartItem, Discount};

    fn cart(items: Vec<CartItem>) -> CartState {
        CartState::default().reduce(CartAction::Loaded(items))
    }

    fn totals(cents: i64) -> CartTotals {
        CartTotals {
            total_items: 1,
            subtotal: Money::from_cents(cents),
        }
    }

    #[test]
    fn test_free_shipping_above_threshold() {
        let cart = cart(vec![
            CartItem::new(1, 10, Money::from_cents(10_000), Discount::zero(), 2),
            CartItem::new(2, 20, Money::from_cents(5_000), Discount::from_percentage(10.0), 1),
        ]);
        let s = summary(cart.totals(), Checkout::default());
        assert_eq!(s.total_items, 3);
        assert_eq!(s.subtotal.cents(), 24_500);
        assert!(s.shipping.is_zero());
        assert_eq!(s.total.cents(), 24_500);
    }

    #[test]
    fn test_exactly_threshold_pays_shipping() {
        let s = summary(totals(10_000), Checkout::default());
        assert_eq!(s.shipping, FLAT_SHIPPING);
        assert_eq!(s.total.cents(), 11_000);
    }

    #[test]
    fn test_promo_applies_to_subtotal() {
        let mut checkout = Checkout::default();
        assert!(checkout.apply_promo("discount10"));
        let s = summary(totals(5_000), checkout);
        assert_eq!(s.promo.cents(), 500);
        assert_eq!(s.total.cents(), 5_000 + 1_000 - 500);
    }

    #[test]
    fn test_promo_does_not_change_shipping_decision() {
        let mut checkout = Checkout::default();
        checkout.apply_promo("DISCOUNT10");
        let s = summary(totals(10_500), checkout);
        assert!(s.shipping.is_zero());
        assert_eq!(s.total.cents(), 10_500 - 1_050);
    }

    #[test]
    fn test_unknown_promo_is_ignored() {
        let mut checkout = Checkout::default();
        assert!(!checkout.apply_promo("FREESTUFF"));
        assert!(!checkout.promo_applied);
    }

    #[test]
    fn test_render_empty_cart() {
        assert_eq!(render(&CartState::default(), Checkout::default()), "Your cart is empty.\n");
    }

    #[test]
    fn test_render_lists_lines_and_totals() {
        let mut item = CartItem::new(7, 1, Money::from_cents(2_499), Discount::zero(), 2);
        item.name = "Classic White T-Shirt".to_string();
        item.color = Some("White".to_string());
        item.size = Some("M".to_string());

        let rendered = render(&cart(vec![item]), Checkout::default());
        assert!(rendered.contains("White / M"));
        assert!(rendered.contains("Subtotal:  $49.98"));
        assert!(rendered.contains("Shipping:  $10.00"));
        assert!(rendered.contains("Total:     $59.98"));
    }
}
