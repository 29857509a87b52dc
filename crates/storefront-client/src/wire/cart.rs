//! Cart and wishlist.
//!
//! The cart response also carries a server-side `summary`. It is ignored:
//! totals are derived locally from the items by the cart selectors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::types::{CartItem, CartLine, WishlistItem};

use super::{convert_all, discount, id, money, quantity, text, timestamp, WireError};

// =============================================================================
// Cart
// =============================================================================

/// `GET /cart` → `{items, summary}`.
#[derive(Debug, Deserialize)]
pub struct CartResponse {
    #[serde(default)]
    pub items: Option<Vec<CartItemDto>>,
}

impl TryFrom<CartResponse> for Vec<CartItem> {
    type Error = WireError;

    fn try_from(response: CartResponse) -> Result<Self, Self::Error> {
        convert_all(response.items)
    }
}

#[derive(Debug, Deserialize)]
pub struct CartItemDto {
    pub id: u64,
    pub product_id: u64,
    #[serde(default)]
    pub product_name: String,
    pub base_price: f64,
    #[serde(default)]
    pub discount_percentage: Option<f64>,
    pub quantity: i64,
    #[serde(default)]
    pub color_id: Option<u64>,
    #[serde(default)]
    pub color_name: Option<String>,
    #[serde(default)]
    pub color_hex: Option<String>,
    #[serde(default)]
    pub size_id: Option<u64>,
    #[serde(default)]
    pub size_name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Units in stock for the selected variant.
    #[serde(default)]
    pub in_stock: Option<i64>,
}

impl TryFrom<CartItemDto> for CartItem {
    type Error = WireError;

    fn try_from(dto: CartItemDto) -> Result<Self, Self::Error> {
        Ok(CartItem {
            id: dto.id,
            product_id: dto.product_id,
            name: dto.product_name,
            price: money(dto.base_price, "base_price")?,
            discount: discount(dto.discount_percentage),
            quantity: quantity(dto.quantity, "quantity")?,
            color_id: id(dto.color_id),
            color: text(dto.color_name),
            color_hex: text(dto.color_hex),
            size_id: id(dto.size_id),
            size: text(dto.size_name),
            image: text(dto.image_url),
            in_stock: dto.in_stock.map_or(true, |units| units > 0),
        })
    }
}

/// `POST /cart`.
#[derive(Debug, Serialize)]
pub struct CartAddBody {
    pub product_id: u64,
    pub color_id: u64,
    pub size_id: u64,
    pub quantity: u32,
}

impl From<&CartLine> for CartAddBody {
    fn from(line: &CartLine) -> Self {
        CartAddBody {
            product_id: line.product_id,
            color_id: line.color_id,
            size_id: line.size_id,
            quantity: line.quantity,
        }
    }
}

/// `PUT /cart/:id`.
#[derive(Debug, Serialize)]
pub struct CartUpdateBody {
    pub quantity: u32,
}

// =============================================================================
// Wishlist
// =============================================================================

/// `GET /wishlist` → `{items}`.
#[derive(Debug, Deserialize)]
pub struct WishlistResponse {
    #[serde(default)]
    pub items: Option<Vec<WishlistItemDto>>,
}

impl TryFrom<WishlistResponse> for Vec<WishlistItem> {
    type Error = WireError;

    fn try_from(response: WishlistResponse) -> Result<Self, Self::Error> {
        convert_all(response.items)
    }
}

#[derive(Debug, Deserialize)]
pub struct WishlistItemDto {
    /// Wishlist row id.
    pub id: u64,
    pub product_id: u64,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub product_description: String,
    pub base_price: f64,
    #[serde(default)]
    pub discount_percentage: Option<f64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_in_stock() -> bool {
    true
}

impl TryFrom<WishlistItemDto> for WishlistItem {
    type Error = WireError;

    fn try_from(dto: WishlistItemDto) -> Result<Self, Self::Error> {
        Ok(WishlistItem {
            product_id: dto.product_id,
            entry_id: Some(dto.id),
            name: dto.product_name,
            description: dto.product_description,
            price: money(dto.base_price, "base_price")?,
            discount: discount(dto.discount_percentage),
            image: text(dto.image_url),
            in_stock: dto.in_stock,
            added_at: timestamp(dto.created_at),
        })
    }
}

/// `POST /wishlist`.
#[derive(Debug, Serialize)]
pub struct WishlistAddBody {
    pub product_id: u64,
}
