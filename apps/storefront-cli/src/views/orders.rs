//! # Orders and Addresses
//!
//! Order history, a single order with its lines, and the address book.

use storefront_core::state::OrderState;
use storefront_core::types::{Address, Order};

use super::table;

pub fn render_orders(orders: &OrderState) -> String {
    if orders.orders.is_empty() {
        return "You have not placed any orders yet.\n".to_string();
    }

    let rows = orders.orders.iter().map(|order| {
        [
            order.id.to_string(),
            placed_on(order),
            order.order_status.to_string(),
            order.payment_status.to_string(),
            order.payment_method.clone(),
            order.total.to_string(),
        ]
    });
    let mut out = table(["Order", "Placed", "Status", "Payment", "Method", "Total"], rows, 5);
    out.push('\n');
    out
}

pub fn render_order(order: &Order) -> String {
    let mut out = format!(
        "Order #{}  {}  placed {}\nPayment: {} ({})\n",
        order.id,
        order.order_status,
        placed_on(order),
        order.payment_method,
        order.payment_status
    );
    if let Some(address) = &order.address {
        out.push_str(&format!("Ship to: {}\n", address.one_line()));
    }

    if !order.lines.is_empty() {
        let rows = order.lines.iter().map(|line| {
            let variant = [line.color.as_deref(), line.size.as_deref()]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(" / ");
            [
                line.name.clone(),
                if variant.is_empty() { "-".to_string() } else { variant },
                line.unit_price.to_string(),
                line.quantity.to_string(),
                line.subtotal().to_string(),
            ]
        });
        out.push('\n');
        out.push_str(&table(["Product", "Variant", "Price", "Qty", "Subtotal"], rows, 2));
        out.push('\n');
    }
    out.push_str(&format!("Total: {}\n", order.total));
    out
}

pub fn render_addresses(addresses: &[Address]) -> String {
    if addresses.is_empty() {
        return "No saved addresses.\n".to_string();
    }

    let rows = addresses.iter().map(|address| {
        [
            address.id.to_string(),
            address.name.clone(),
            address.one_line(),
            address.phone.clone(),
            if address.is_default { "yes" } else { "" }.to_string(),
        ]
    });
    let mut out = table(["ID", "Label", "Address", "Phone", "Default"], rows, 5);
    out.push('\n');
    out
}

fn placed_on(order: &Order) -> String {
    order
        .created_at
        .map(|at| at.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use storefront_core::money::Money;
    use storefront_core::state::OrderAction;
    use storefront_core::types::{OrderLine, OrderStatus, PaymentStatus};

    fn address() -> Address {
        Address {
            id: 2,
            name: "Home".to_string(),
            street: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            postal_code: "62701".to_string(),
            country: "US".to_string(),
            phone: "555-0100".to_string(),
            is_default: true,
        }
    }

    fn order() -> Order {
        Order {
            id: 5,
            address: Some(address()),
            total: Money::from_cents(9_998),
            payment_method: "cod".to_string(),
            payment_status: PaymentStatus::Pending,
            order_status: OrderStatus::Processing,
            lines: vec![OrderLine {
                product_id: 2,
                name: "Summer Floral Dress".to_string(),
                quantity: 2,
                unit_price: Money::from_cents(4_499),
                color: Some("Blue".to_string()),
                size: None,
                image: None,
            }],
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).single(),
        }
    }

    #[test]
    fn test_render_orders_empty() {
        assert!(render_orders(&OrderState::default()).contains("not placed any orders"));
    }

    #[test]
    fn test_render_orders_lists_status() {
        let state = OrderState::default().reduce(OrderAction::OrdersLoaded(vec![order()]));
        let rendered = render_orders(&state);
        assert!(rendered.contains("2024-06-01"));
        assert!(rendered.contains("processing"));
        assert!(rendered.contains("$99.98"));
    }

    #[test]
    fn test_render_order_detail() {
        let rendered = render_order(&order());
        assert!(rendered.contains("Order #5"));
        assert!(rendered.contains("Ship to: Home, 1 Main St"));
        assert!(rendered.contains("Blue"));
        assert!(rendered.contains("$89.98"));
    }

    #[test]
    fn test_render_addresses_marks_default() {
        let rendered = render_addresses(&[address()]);
        assert!(rendered.contains("Springfield"));
        assert!(rendered.contains("yes"));
    }
}
