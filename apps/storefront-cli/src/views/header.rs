//! Header line shown above every command's output.

use storefront_core::state::AppState;

/// Login state, cart item count and wishlist size.
pub fn render(state: &AppState) -> String {
    let who = match (&state.auth.user, state.auth.is_authenticated) {
        (Some(user), true) if user.is_admin() => format!("Signed in as {} (admin)", user.name),
        (Some(user), true) => format!("Signed in as {}", user.name),
        (None, true) => "Signed in".to_string(),
        (_, false) => "Not signed in".to_string(),
    };
    format!(
        "{who} | Cart ({}) | Wishlist ({})",
        state.cart.totals().total_items,
        state.wishlist.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::money::Money;
    use storefront_core::state::{Action, AuthAction, CartAction};
    use storefront_core::types::{CartItem, Discount, Session, User};

    #[test]
    fn test_signed_out_header() {
        assert_eq!(
            render(&AppState::default()),
            "Not signed in | Cart (0) | Wishlist (0)"
        );
    }

    #[test]
    fn test_signed_in_header_counts_quantities() {
        let session = Session {
            user: User {
                id: 1,
                name: "Jane".to_string(),
                email: "jane@example.com".to_string(),
                role: "customer".to_string(),
                created_at: None,
            },
            token: "opaque".to_string(),
        };
        let state = AppState::default()
            .reduce(Action::from(AuthAction::LoggedIn(session)))
            .reduce(Action::from(CartAction::Loaded(vec![
                CartItem::new(1, 10, Money::from_cents(1_000), Discount::zero(), 2),
                CartItem::new(2, 11, Money::from_cents(1_000), Discount::zero(), 1),
            ])));
        assert_eq!(render(&state), "Signed in as Jane | Cart (3) | Wishlist (0)");
    }
}
