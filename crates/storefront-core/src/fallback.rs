//! # Fallback Catalog
//!
//! A small built-in catalog the views show when the backend yields no
//! products or categories and nothing is loading. The slices never hold
//! this data; views substitute it at render time and still run the active
//! filters over it.

use crate::money::Money;
use crate::types::{Category, Discount, Product, ProductColor, ProductImage, ProductSize};

const CATEGORY_IMAGE: &str = "/images/placeholder-category.jpg";

/// The four sample categories.
pub fn sample_categories() -> Vec<Category> {
    [
        (1, "Men's Clothing", "men"),
        (2, "Women's Clothing", "women"),
        (3, "Accessories", "accessories"),
        (4, "Footwear", "footwear"),
    ]
    .into_iter()
    .map(|(id, name, slug)| Category {
        id,
        name: name.to_string(),
        slug: slug.to_string(),
        description: String::new(),
        image: Some(CATEGORY_IMAGE.to_string()),
    })
    .collect()
}

/// The four sample products.
pub fn sample_products() -> Vec<Product> {
    vec![
        sample(
            1,
            "Classic White T-Shirt",
            2499,
            0,
            1,
            &[("White", "#FFFFFF"), ("Black", "#000000"), ("Gray", "#808080")],
            &["S", "M", "L", "XL"],
        ),
        sample(
            2,
            "Summer Floral Dress",
            4999,
            10,
            2,
            &[("Blue", "#1E90FF"), ("Red", "#DC143C")],
            &["S", "M", "L"],
        ),
        sample(
            3,
            "Casual Denim Jacket",
            7999,
            0,
            1,
            &[("Blue", "#1E90FF")],
            &["S", "M", "L", "XL"],
        ),
        sample(
            4,
            "Leather Crossbody Bag",
            8999,
            15,
            3,
            &[("Brown", "#8B4513"), ("Black", "#000000")],
            &[],
        ),
    ]
}

/// True when a view should render the sample data instead of `live`.
pub fn should_substitute<T>(live: &[T], loading: bool) -> bool {
    live.is_empty() && !loading
}

fn sample(
    id: u64,
    name: &str,
    price_cents: i64,
    discount_pct: u32,
    category_id: u64,
    colors: &[(&str, &str)],
    sizes: &[&str],
) -> Product {
    let category = sample_categories()
        .into_iter()
        .find(|c| c.id == category_id)
        .map(|c| c.name);

    Product {
        id,
        name: name.to_string(),
        description: String::new(),
        category_id: Some(category_id),
        category,
        price: Money::from_cents(price_cents),
        discount: Discount::from_bps(discount_pct * 100),
        images: vec![ProductImage {
            id,
            url: format!("/images/product-{id}.jpg"),
            is_primary: true,
        }],
        colors: colors
            .iter()
            .zip(1..)
            .map(|((name, hex), color_id)| ProductColor {
                id: color_id,
                name: name.to_string(),
                hex: hex.to_string(),
            })
            .collect(),
        sizes: sizes
            .iter()
            .zip(1..)
            .map(|(name, size_id)| ProductSize {
                id: size_id,
                name: name.to_string(),
            })
            .collect(),
        inventory: vec![],
        featured: true,
        popularity: 0,
        created_at: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::products::{apply_filters, resolve_category, ProductFilters};

    #[test]
    fn test_sample_catalog_shape() {
        let products = sample_products();
        assert_eq!(products.len(), 4);
        assert!(products.iter().all(|p| p.featured));
        assert_eq!(products[1].final_price().cents(), 4499);
        assert!(products[3].sizes.is_empty());
        assert_eq!(products[0].primary_image(), Some("/images/product-1.jpg"));

        let categories = sample_categories();
        assert_eq!(categories.len(), 4);
        assert_eq!(categories[0].slug, "men");
    }

    #[test]
    fn test_filters_apply_to_samples() {
        let products = sample_products();
        let categories = sample_categories();
        let men = resolve_category(&categories, "men").map(|c| c.id.to_string());
        let filters = ProductFilters {
            category: men,
            ..ProductFilters::default()
        };
        let names: Vec<&str> = apply_filters(&products, &filters)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, ["Casual Denim Jacket", "Classic White T-Shirt"]);
    }

    #[test]
    fn test_should_substitute() {
        let empty: Vec<Product> = vec![];
        assert!(should_substitute(&empty, false));
        assert!(!should_substitute(&empty, true));
        assert!(!should_substitute(&sample_products(), false));
    }
}
