//! # Domain Types
//!
//! Canonical shapes of everything the storefront mirrors from the backend.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    CartItem     │   │      Order      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id (cart row)  │   │  id             │       │
//! │  │  price: Money   │   │  product_id     │   │  address        │       │
//! │  │  discount       │   │  quantity ≥ 1   │   │  order_status   │       │
//! │  │  colors, sizes  │   │  color, size    │   │  lines          │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Discount     │   │  WishlistItem   │   │   OrderStatus   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  product_id     │   │  Processing     │       │
//! │  │  1000 = 10%     │   │  entry_id       │   │  Shipped        │       │
//! │  └─────────────────┘   └─────────────────┘   │  Delivered      │       │
//! │                                              │  Cancelled      │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Ids are the backend's integer primary keys. The types here never carry
//! wire field names: the client's normalization layer maps snake_case
//! payloads onto them, and snapshots serialize as camelCase.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::money::Money;

// =============================================================================
// Discount
// =============================================================================

/// A percentage discount represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000, so 1000 bps = 10%.
/// The value is always within 0..=10000.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Discount(u32);

impl Discount {
    /// Upper bound: 100%.
    pub const MAX_BPS: u32 = 10_000;

    /// Creates a discount from basis points, clamping to 100%.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        if bps > Self::MAX_BPS {
            Discount(Self::MAX_BPS)
        } else {
            Discount(bps)
        }
    }

    /// Creates a discount from a percentage such as `10.0` or `12.5`.
    ///
    /// Out-of-range and non-finite values are clamped into 0-100%.
    pub fn from_percentage(pct: f64) -> Self {
        if !pct.is_finite() || pct <= 0.0 {
            return Discount(0);
        }
        let bps = (pct * 100.0).round().min(Self::MAX_BPS as f64);
        Discount(bps as u32)
    }

    /// Returns the discount in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the discount as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// No discount.
    #[inline]
    pub const fn zero() -> Self {
        Discount(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Applies this discount to an amount.
    #[inline]
    pub fn apply(&self, amount: Money) -> Money {
        amount.apply_percentage_discount(self.0)
    }
}

impl Default for Discount {
    fn default() -> Self {
        Discount::zero()
    }
}

impl fmt::Display for Discount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 100 == 0 {
            write!(f, "{}%", self.0 / 100)
        } else {
            write!(f, "{}.{:02}%", self.0 / 100, self.0 % 100)
        }
    }
}

// =============================================================================
// Catalog
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    pub id: u64,
    pub url: String,
    pub is_primary: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductColor {
    pub id: u64,
    pub name: String,
    /// CSS hex code, e.g. `#FFFFFF`.
    pub hex: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSize {
    pub id: u64,
    pub name: String,
}

/// Stock of one colour/size variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryLevel {
    pub color_id: u64,
    pub size_id: u64,
    pub quantity: i64,
}

/// A product in the catalog.
///
/// List endpoints return a summary (no colours, sizes or inventory, only the
/// primary image). The detail endpoint fills everything in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub category_id: Option<u64>,
    /// Category display name.
    pub category: Option<String>,
    /// Base price before discount.
    pub price: Money,
    pub discount: Discount,
    pub images: Vec<ProductImage>,
    pub colors: Vec<ProductColor>,
    pub sizes: Vec<ProductSize>,
    pub inventory: Vec<InventoryLevel>,
    pub featured: bool,
    /// Ranking used by the popularity sort. The backend does not report one
    /// yet, so live products rank equally.
    #[serde(default)]
    pub popularity: u32,
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Price after the product discount.
    pub fn final_price(&self) -> Money {
        self.discount.apply(self.price)
    }

    /// URL of the primary image, or the first image if none is flagged.
    pub fn primary_image(&self) -> Option<&str> {
        self.images
            .iter()
            .find(|image| image.is_primary)
            .or_else(|| self.images.first())
            .map(|image| image.url.as_str())
    }

    /// Stock for one variant. Untracked variants report `None`.
    pub fn stock_for(&self, color_id: u64, size_id: u64) -> Option<i64> {
        self.inventory
            .iter()
            .find(|level| level.color_id == color_id && level.size_id == size_id)
            .map(|level| level.quantity)
    }

    /// True when inventory is untracked or any variant has stock.
    pub fn in_stock(&self) -> bool {
        self.inventory.is_empty() || self.inventory.iter().any(|level| level.quantity > 0)
    }
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: u64,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub image: Option<String>,
}

impl Category {
    /// Derives a URL slug from a display name: `"Men's Clothing"` → `"mens-clothing"`.
    pub fn slugify(name: &str) -> String {
        let mut slug = String::with_capacity(name.len());
        for c in name.chars() {
            if c.is_ascii_alphanumeric() {
                slug.push(c.to_ascii_lowercase());
            } else if (c.is_whitespace() || c == '-' || c == '_') && !slug.ends_with('-') {
                slug.push('-');
            }
        }
        slug.trim_matches('-').to_string()
    }
}

/// One page of the catalog as reported by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub pagination: Option<Pagination>,
}

/// Catalog pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    /// Total number of products on the server.
    pub total: u64,
}

impl Pagination {
    pub fn total_pages(&self) -> u64 {
        if self.limit == 0 {
            return 0;
        }
        self.total.div_ceil(self.limit as u64)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination {
            page: 1,
            limit: crate::DEFAULT_PAGE_LIMIT,
            total: 0,
        }
    }
}

/// Query parameters for listing products.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub category_id: Option<u64>,
    pub featured: Option<bool>,
}

// =============================================================================
// Catalog Drafts (admin mutations)
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub category_id: u64,
    pub price: Money,
    pub discount: Discount,
    pub featured: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDraft {
    pub name: String,
    pub description: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorDraft {
    pub name: String,
    pub hex: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeDraft {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDraft {
    pub url: String,
    pub is_primary: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventoryUpdate {
    pub color_id: u64,
    pub size_id: u64,
    pub quantity: i64,
}

// =============================================================================
// Cart
// =============================================================================

/// A line in the shopping cart.
///
/// ## Invariant
/// `quantity >= 1`. Updating a line to zero removes it instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Cart row id; the update and remove endpoints address this.
    pub id: u64,
    pub product_id: u64,
    pub name: String,
    /// Unit price before discount.
    pub price: Money,
    pub discount: Discount,
    pub quantity: u32,
    pub color_id: Option<u64>,
    pub color: Option<String>,
    pub color_hex: Option<String>,
    pub size_id: Option<u64>,
    pub size: Option<String>,
    pub image: Option<String>,
    pub in_stock: bool,
}

impl CartItem {
    /// Creates a bare line with no variant or display data.
    pub fn new(id: u64, product_id: u64, price: Money, discount: Discount, quantity: u32) -> Self {
        CartItem {
            id,
            product_id,
            name: String::new(),
            price,
            discount,
            quantity,
            color_id: None,
            color: None,
            color_hex: None,
            size_id: None,
            size: None,
            image: None,
            in_stock: true,
        }
    }

    /// Unit price after discount.
    pub fn unit_price(&self) -> Money {
        self.discount.apply(self.price)
    }

    /// `price × quantity × (1 − discount)`, rounded half-up to the cent.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    /// use storefront_core::types::{CartItem, Discount};
    ///
    /// let line = CartItem::new(1, 7, Money::from_cents(5000), Discount::from_percentage(10.0), 1);
    /// assert_eq!(line.line_total().cents(), 4500);
    /// ```
    pub fn line_total(&self) -> Money {
        self.discount.apply(self.price * self.quantity)
    }
}

/// A line to add to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLine {
    pub product_id: u64,
    pub color_id: u64,
    pub size_id: u64,
    pub quantity: u32,
}

// =============================================================================
// Wishlist
// =============================================================================

/// A saved product. Unique by `product_id` within the wishlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub product_id: u64,
    /// Server row id; the delete endpoint addresses this. `None` for
    /// entries that were never persisted.
    pub entry_id: Option<u64>,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub discount: Discount,
    pub image: Option<String>,
    pub in_stock: bool,
    pub added_at: Option<DateTime<Utc>>,
}

impl WishlistItem {
    pub fn final_price(&self) -> Money {
        self.discount.apply(self.price)
    }
}

// =============================================================================
// Account
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.eq_ignore_ascii_case("admin")
    }
}

/// Partial profile changes applied locally.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Login request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Registration request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: User,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: u64,
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub phone: String,
    pub is_default: bool,
}

impl Address {
    /// Single-line rendering for tables and order summaries.
    pub fn one_line(&self) -> String {
        format!(
            "{}, {}, {}, {} {}, {}",
            self.name, self.street, self.city, self.state, self.postal_code, self.country
        )
    }
}

/// Address fields for create and update.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AddressInput {
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub phone: String,
    pub is_default: bool,
}

// =============================================================================
// Orders
// =============================================================================

/// Fulfilment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Placed and awaiting shipment.
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Processing
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "processing" => Ok(OrderStatus::Processing),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" | "canceled" => Ok(OrderStatus::Cancelled),
            _ => Err(CoreError::UnknownOrderStatus(s.to_string())),
        }
    }
}

/// Payment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
        }
    }
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Pending
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(PaymentStatus::Pending),
            "paid" => Ok(PaymentStatus::Paid),
            "failed" => Ok(PaymentStatus::Failed),
            "refunded" => Ok(PaymentStatus::Refunded),
            _ => Err(CoreError::UnknownPaymentStatus(s.to_string())),
        }
    }
}

/// A placed order.
///
/// The list endpoint omits `address` and `lines`; the detail endpoint
/// includes both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: u64,
    pub address: Option<Address>,
    pub total: Money,
    pub payment_method: String,
    pub payment_status: PaymentStatus,
    pub order_status: OrderStatus,
    pub lines: Vec<OrderLine>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Order {
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }
}

/// One product line of an order, priced at the time of purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: u64,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub color: Option<String>,
    pub size: Option<String>,
    pub image: Option<String>,
}

impl OrderLine {
    pub fn subtotal(&self) -> Money {
        self.unit_price * self.quantity
    }
}

/// Order placement request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceOrder {
    pub address_id: u64,
    pub payment_method: String,
}

/// Admin status change for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusUpdate {
    pub order_status: OrderStatus,
    pub payment_status: PaymentStatus,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price_cents: i64, discount_pct: f64) -> Product {
        Product {
            id: 1,
            name: "Classic White T-Shirt".to_string(),
            description: String::new(),
            category_id: Some(1),
            category: Some("Men's Clothing".to_string()),
            price: Money::from_cents(price_cents),
            discount: Discount::from_percentage(discount_pct),
            images: vec![],
            colors: vec![],
            sizes: vec![],
            inventory: vec![],
            featured: false,
            popularity: 0,
            created_at: None,
        }
    }

    #[test]
    fn test_discount_from_percentage() {
        assert_eq!(Discount::from_percentage(10.0).bps(), 1000);
        assert_eq!(Discount::from_percentage(12.5).bps(), 1250);
        assert_eq!(Discount::from_percentage(150.0).bps(), 10_000);
        assert_eq!(Discount::from_percentage(-5.0).bps(), 0);
        assert_eq!(Discount::from_percentage(f64::NAN).bps(), 0);
        assert_eq!(Discount::from_bps(20_000).bps(), 10_000);
    }

    #[test]
    fn test_discount_display() {
        assert_eq!(Discount::from_percentage(15.0).to_string(), "15%");
        assert_eq!(Discount::from_percentage(12.5).to_string(), "12.50%");
    }

    #[test]
    fn test_product_final_price() {
        assert_eq!(product(4999, 10.0).final_price().cents(), 4499);
        assert_eq!(product(2499, 0.0).final_price().cents(), 2499);
    }

    #[test]
    fn test_product_primary_image_prefers_flagged() {
        let mut p = product(1000, 0.0);
        assert_eq!(p.primary_image(), None);

        p.images = vec![
            ProductImage { id: 1, url: "/a.jpg".to_string(), is_primary: false },
            ProductImage { id: 2, url: "/b.jpg".to_string(), is_primary: true },
        ];
        assert_eq!(p.primary_image(), Some("/b.jpg"));

        p.images[1].is_primary = false;
        assert_eq!(p.primary_image(), Some("/a.jpg"));
    }

    #[test]
    fn test_product_stock() {
        let mut p = product(1000, 0.0);
        assert!(p.in_stock());

        p.inventory = vec![
            InventoryLevel { color_id: 1, size_id: 1, quantity: 0 },
            InventoryLevel { color_id: 1, size_id: 2, quantity: 3 },
        ];
        assert!(p.in_stock());
        assert_eq!(p.stock_for(1, 2), Some(3));
        assert_eq!(p.stock_for(2, 2), None);

        p.inventory[1].quantity = 0;
        assert!(!p.in_stock());
    }

    #[test]
    fn test_cart_item_line_total() {
        let line = CartItem::new(1, 10, Money::from_cents(10_000), Discount::zero(), 2);
        assert_eq!(line.line_total().cents(), 20_000);

        let line = CartItem::new(2, 11, Money::from_cents(5_000), Discount::from_percentage(10.0), 1);
        assert_eq!(line.line_total().cents(), 4_500);
        assert_eq!(line.unit_price().cents(), 4_500);
    }

    #[test]
    fn test_category_slugify() {
        assert_eq!(Category::slugify("Men's Clothing"), "mens-clothing");
        assert_eq!(Category::slugify("  Foot  wear "), "foot-wear");
        assert_eq!(Category::slugify("Accessories"), "accessories");
    }

    #[test]
    fn test_order_status_parse() {
        assert_eq!("Shipped".parse::<OrderStatus>().ok(), Some(OrderStatus::Shipped));
        assert_eq!("canceled".parse::<OrderStatus>().ok(), Some(OrderStatus::Cancelled));
        assert!(matches!(
            "lost".parse::<OrderStatus>(),
            Err(CoreError::UnknownOrderStatus(_))
        ));
        assert_eq!("paid".parse::<PaymentStatus>().ok(), Some(PaymentStatus::Paid));
        assert_eq!(OrderStatus::default(), OrderStatus::Processing);
    }

    #[test]
    fn test_pagination_total_pages() {
        let page = Pagination { page: 1, limit: 12, total: 25 };
        assert_eq!(page.total_pages(), 3);
        assert_eq!(Pagination::default().total_pages(), 0);
    }

    #[test]
    fn test_snapshot_field_names_are_camel_case() {
        let line = CartItem::new(1, 10, Money::from_cents(100), Discount::zero(), 1);
        let json = serde_json::to_value(&line).unwrap();
        assert!(json.get("productId").is_some());
        assert!(json.get("inStock").is_some());
    }
}
