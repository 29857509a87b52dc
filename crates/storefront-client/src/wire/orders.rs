//! Orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::types::{
    Address, Order, OrderLine, OrderStatus, PaymentStatus, PlaceOrder, StatusUpdate,
};

use super::account::AddressDto;
use super::{convert_all, money, quantity, text, timestamp, MetaDto, WireError};

/// `GET /orders` → `{orders, meta}`.
#[derive(Debug, Deserialize)]
pub struct OrderListResponse {
    #[serde(default)]
    pub orders: Option<Vec<OrderDto>>,
    #[serde(default)]
    pub meta: Option<MetaDto>,
}

impl TryFrom<OrderListResponse> for Vec<Order> {
    type Error = WireError;

    fn try_from(response: OrderListResponse) -> Result<Self, Self::Error> {
        convert_all(response.orders)
    }
}

/// `GET /orders/:id` → `{order}`.
#[derive(Debug, Deserialize)]
pub struct OrderEnvelope {
    pub order: OrderDto,
}

/// An order. The list endpoint sends neither `address` nor `items`.
#[derive(Debug, Deserialize)]
pub struct OrderDto {
    pub id: u64,
    #[serde(default)]
    pub address: Option<AddressDto>,
    pub total_amount: f64,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub order_status: Option<String>,
    #[serde(default)]
    pub items: Option<Vec<OrderItemDto>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl TryFrom<OrderDto> for Order {
    type Error = WireError;

    fn try_from(dto: OrderDto) -> Result<Self, Self::Error> {
        let order_status = match text(dto.order_status) {
            Some(s) => s.parse::<OrderStatus>().map_err(|e| WireError(e.to_string()))?,
            None => OrderStatus::default(),
        };
        let payment_status = match text(dto.payment_status) {
            Some(s) => s.parse::<PaymentStatus>().map_err(|e| WireError(e.to_string()))?,
            None => PaymentStatus::default(),
        };
        // The detail endpoint embeds a zero-valued address when the row is gone.
        let address = match dto.address {
            Some(address) if address.id != 0 => Some(Address::try_from(address)?),
            _ => None,
        };

        Ok(Order {
            id: dto.id,
            address,
            total: money(dto.total_amount, "total_amount")?,
            payment_method: dto.payment_method,
            payment_status,
            order_status,
            lines: convert_all(dto.items)?,
            created_at: timestamp(dto.created_at),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct OrderItemDto {
    pub product_id: u64,
    #[serde(default)]
    pub product_name: String,
    pub quantity: i64,
    pub price_per_unit: f64,
    #[serde(default)]
    pub color_name: Option<String>,
    #[serde(default)]
    pub size_name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl TryFrom<OrderItemDto> for OrderLine {
    type Error = WireError;

    fn try_from(dto: OrderItemDto) -> Result<Self, Self::Error> {
        Ok(OrderLine {
            product_id: dto.product_id,
            name: dto.product_name,
            quantity: quantity(dto.quantity, "quantity")?,
            unit_price: money(dto.price_per_unit, "price_per_unit")?,
            color: text(dto.color_name),
            size: text(dto.size_name),
            image: text(dto.image_url),
        })
    }
}

/// `POST /orders` → `{message, order_id, total_amount}`.
#[derive(Debug, Deserialize)]
pub struct PlaceOrderResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub order_id: u64,
    #[serde(default)]
    pub total_amount: Option<f64>,
}

/// `POST /orders`.
#[derive(Debug, Serialize)]
pub struct PlaceOrderBody<'a> {
    pub address_id: u64,
    pub payment_method: &'a str,
}

impl<'a> From<&'a PlaceOrder> for PlaceOrderBody<'a> {
    fn from(request: &'a PlaceOrder) -> Self {
        PlaceOrderBody {
            address_id: request.address_id,
            payment_method: &request.payment_method,
        }
    }
}

/// `PUT /orders/:id/status`.
#[derive(Debug, Serialize)]
pub struct StatusBody {
    pub order_status: &'static str,
    pub payment_status: &'static str,
}

impl From<&StatusUpdate> for StatusBody {
    fn from(update: &StatusUpdate) -> Self {
        StatusBody {
            order_status: update.order_status.as_str(),
            payment_status: update.payment_status.as_str(),
        }
    }
}
