//! # Product Detail
//!
//! One product with its variant pickers and related products.
//!
//! ## Local State
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  mount(product)                                                         │
//! │     color    = first colour (if any)                                    │
//! │     size     = first size (if any)                                      │
//! │     quantity = 1                                                        │
//! │                                                                         │
//! │  select_color / select_size by id or name (case-insensitive)            │
//! │  set_quantity: 1..=MAX_ITEM_QUANTITY                                    │
//! │  cart_line: needs a colour and a size                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use storefront_core::error::ValidationError;
use storefront_core::fallback;
use storefront_core::types::{CartLine, Category, Product};
use storefront_core::validation::validate_quantity;

use super::{discount_label, table};

/// Display-local selections for the product being viewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductDetail {
    pub color_id: Option<u64>,
    pub size_id: Option<u64>,
    pub quantity: u32,
}

impl ProductDetail {
    pub fn mount(product: &Product) -> Self {
        ProductDetail {
            color_id: product.colors.first().map(|c| c.id),
            size_id: product.sizes.first().map(|s| s.id),
            quantity: 1,
        }
    }

    pub fn select_color(&mut self, product: &Product, key: &str) -> Result<(), ValidationError> {
        let key = key.trim();
        let color = product
            .colors
            .iter()
            .find(|c| c.id.to_string() == key || c.name.eq_ignore_ascii_case(key))
            .ok_or_else(|| not_offered("color", product.colors.iter().map(|c| c.name.clone())))?;
        self.color_id = Some(color.id);
        Ok(())
    }

    pub fn select_size(&mut self, product: &Product, key: &str) -> Result<(), ValidationError> {
        let key = key.trim();
        let size = product
            .sizes
            .iter()
            .find(|s| s.id.to_string() == key || s.name.eq_ignore_ascii_case(key))
            .ok_or_else(|| not_offered("size", product.sizes.iter().map(|s| s.name.clone())))?;
        self.size_id = Some(size.id);
        Ok(())
    }

    pub fn set_quantity(&mut self, quantity: u32) -> Result<(), ValidationError> {
        validate_quantity(quantity)?;
        self.quantity = quantity;
        Ok(())
    }

    /// Line to send to the cart for the current selection.
    pub fn cart_line(&self, product: &Product) -> Result<CartLine, ValidationError> {
        let color_id = self.color_id.ok_or_else(|| required("color"))?;
        let size_id = self.size_id.ok_or_else(|| required("size"))?;
        Ok(CartLine {
            product_id: product.id,
            color_id,
            size_id,
            quantity: self.quantity,
        })
    }

    pub fn render(&self, product: &Product, related: &[&Product], wishlisted: bool) -> String {
        let mut out = String::new();
        out.push_str(&format!("{}{}\n", product.name, if wishlisted { "  ♥" } else { "" }));
        if let Some(category) = &product.category {
            out.push_str(&format!("Category: {category}\n"));
        }
        if product.discount.is_zero() {
            out.push_str(&format!("Price: {}\n", product.price));
        } else {
            out.push_str(&format!(
                "Price: {} (was {}, {} off)\n",
                product.final_price(),
                product.price,
                discount_label(product.discount)
            ));
        }
        if !product.description.is_empty() {
            out.push_str(&format!("\n{}\n", product.description));
        }

        if !product.colors.is_empty() {
            let colors: Vec<String> = product
                .colors
                .iter()
                .map(|c| marked(&c.name, self.color_id == Some(c.id)))
                .collect();
            out.push_str(&format!("\nColors: {}", colors.join("  ")));
        }
        if !product.sizes.is_empty() {
            let sizes: Vec<String> = product
                .sizes
                .iter()
                .map(|s| marked(&s.name, self.size_id == Some(s.id)))
                .collect();
            out.push_str(&format!("\nSizes:  {}", sizes.join("  ")));
        }
        out.push_str(&format!("\nQuantity: {}\n", self.quantity));

        if let (Some(color_id), Some(size_id)) = (self.color_id, self.size_id) {
            if let Some(stock) = product.stock_for(color_id, size_id) {
                out.push_str(&format!("Stock for selection: {stock}\n"));
            }
        }

        if !related.is_empty() {
            let rows = related.iter().map(|p| {
                [p.id.to_string(), p.name.clone(), p.final_price().to_string()]
            });
            out.push_str("\nYou may also like\n");
            out.push_str(&table(["ID", "Name", "Price"], rows, 2));
            out.push('\n');
        }
        out
    }
}

/// Finds a product by id or by its name slug.
pub fn find_product<'a>(products: &'a [Product], key: &str) -> Option<&'a Product> {
    let key = key.trim();
    products
        .iter()
        .find(|p| p.id.to_string() == key || Category::slugify(&p.name) == key.to_ascii_lowercase())
}

/// Looks a product up among the samples, for when the backend has nothing.
pub fn find_sample(key: &str) -> Option<Product> {
    find_product(&fallback::sample_products(), key).cloned()
}

fn marked(name: &str, selected: bool) -> String {
    if selected {
        format!("[{name}]")
    } else {
        name.to_string()
    }
}

fn required(field: &str) -> ValidationError {
    ValidationError::Required {
        field: field.to_string(),
    }
}

fn not_offered(field: &str, allowed: impl Iterator<Item = String>) -> ValidationError {
    ValidationError::NotAllowed {
        field: field.to_string(),
        allowed: allowed.collect(),
    }
}
