//! Products and categories.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::types::{
    Category, CategoryDraft, ColorDraft, ImageDraft, InventoryLevel, InventoryUpdate, Pagination,
    Product, ProductColor, ProductDraft, ProductImage, ProductPage, ProductQuery, ProductSize,
    SizeDraft,
};

use super::{convert_all, discount, id, list, money, text, timestamp, MetaDto, WireError};

// =============================================================================
// Products
// =============================================================================

/// `GET /products` → `{products, meta}`.
#[derive(Debug, Deserialize)]
pub struct ProductListResponse {
    #[serde(default)]
    pub products: Option<Vec<ProductDto>>,
    #[serde(default)]
    pub meta: Option<MetaDto>,
}

impl TryFrom<ProductListResponse> for ProductPage {
    type Error = WireError;

    fn try_from(response: ProductListResponse) -> Result<Self, Self::Error> {
        Ok(ProductPage {
            products: convert_all(response.products)?,
            pagination: response.meta.map(|meta| Pagination {
                page: meta.page.max(1),
                limit: meta.limit.max(1),
                total: meta.total,
            }),
        })
    }
}

/// `GET /products/:id` → `{product}`.
#[derive(Debug, Deserialize)]
pub struct ProductEnvelope {
    pub product: ProductDto,
}

/// A product as the backend reports it.
///
/// The list endpoint sends `primary_image` and no attribute lists; the
/// detail endpoint sends `images`, `colors`, `sizes` and `inventory`.
#[derive(Debug, Deserialize)]
pub struct ProductDto {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category_id: Option<u64>,
    #[serde(default)]
    pub category_name: Option<String>,
    pub base_price: f64,
    #[serde(default)]
    pub discount_percentage: Option<f64>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub primary_image: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<ImageDto>>,
    #[serde(default)]
    pub colors: Option<Vec<ColorDto>>,
    #[serde(default)]
    pub sizes: Option<Vec<SizeDto>>,
    #[serde(default)]
    pub inventory: Option<Vec<InventoryDto>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct ImageDto {
    pub id: u64,
    pub image_url: String,
    #[serde(default)]
    pub is_primary: bool,
}

#[derive(Debug, Deserialize)]
pub struct ColorDto {
    pub id: u64,
    pub color_name: String,
    #[serde(default)]
    pub color_hex: String,
}

#[derive(Debug, Deserialize)]
pub struct SizeDto {
    pub id: u64,
    pub size_name: String,
}

#[derive(Debug, Deserialize)]
pub struct InventoryDto {
    pub color_id: u64,
    pub size_id: u64,
    pub quantity: i64,
}

impl TryFrom<ProductDto> for Product {
    type Error = WireError;

    fn try_from(dto: ProductDto) -> Result<Self, Self::Error> {
        let mut images: Vec<ProductImage> = list(dto.images)
            .into_iter()
            .map(|image| ProductImage {
                id: image.id,
                url: image.image_url,
                is_primary: image.is_primary,
            })
            .collect();
        if images.is_empty() {
            if let Some(url) = text(dto.primary_image) {
                images.push(ProductImage {
                    id: 0,
                    url,
                    is_primary: true,
                });
            }
        }

        Ok(Product {
            id: dto.id,
            price: money(dto.base_price, "base_price")?,
            discount: discount(dto.discount_percentage),
            name: dto.name,
            description: dto.description,
            category_id: id(dto.category_id),
            category: text(dto.category_name),
            images,
            colors: list(dto.colors)
                .into_iter()
                .map(|color| ProductColor {
                    id: color.id,
                    name: color.color_name,
                    hex: color.color_hex,
                })
                .collect(),
            sizes: list(dto.sizes)
                .into_iter()
                .map(|size| ProductSize {
                    id: size.id,
                    name: size.size_name,
                })
                .collect(),
            inventory: list(dto.inventory)
                .into_iter()
                .map(|level| InventoryLevel {
                    color_id: level.color_id,
                    size_id: level.size_id,
                    quantity: level.quantity,
                })
                .collect(),
            featured: dto.featured,
            popularity: 0,
            created_at: timestamp(dto.created_at),
        })
    }
}

/// Query string for `GET /products`.
pub fn product_query(query: &ProductQuery) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();
    if let Some(page) = query.page {
        pairs.push(("page", page.to_string()));
    }
    if let Some(limit) = query.limit {
        pairs.push(("limit", limit.to_string()));
    }
    if let Some(category_id) = query.category_id {
        pairs.push(("category_id", category_id.to_string()));
    }
    if let Some(featured) = query.featured {
        pairs.push(("featured", featured.to_string()));
    }
    pairs
}

/// `POST /products`, `PUT /products/:id`.
#[derive(Debug, Serialize)]
pub struct ProductBody<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub category_id: u64,
    pub base_price: f64,
    pub discount_percentage: f64,
    pub featured: bool,
}

impl<'a> From<&'a ProductDraft> for ProductBody<'a> {
    fn from(draft: &'a ProductDraft) -> Self {
        ProductBody {
            name: &draft.name,
            description: &draft.description,
            category_id: draft.category_id,
            base_price: draft.price.cents() as f64 / 100.0,
            discount_percentage: draft.discount.percentage(),
            featured: draft.featured,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ColorBody<'a> {
    pub color_name: &'a str,
    pub color_hex: &'a str,
}

impl<'a> From<&'a ColorDraft> for ColorBody<'a> {
    fn from(draft: &'a ColorDraft) -> Self {
        ColorBody {
            color_name: &draft.name,
            color_hex: &draft.hex,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SizeBody<'a> {
    pub size_name: &'a str,
}

impl<'a> From<&'a SizeDraft> for SizeBody<'a> {
    fn from(draft: &'a SizeDraft) -> Self {
        SizeBody {
            size_name: &draft.name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ImageBody<'a> {
    pub image_url: &'a str,
    pub is_primary: bool,
}

impl<'a> From<&'a ImageDraft> for ImageBody<'a> {
    fn from(draft: &'a ImageDraft) -> Self {
        ImageBody {
            image_url: &draft.url,
            is_primary: draft.is_primary,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct InventoryBody {
    pub color_id: u64,
    pub size_id: u64,
    pub quantity: i64,
}

impl From<&InventoryUpdate> for InventoryBody {
    fn from(update: &InventoryUpdate) -> Self {
        InventoryBody {
            color_id: update.color_id,
            size_id: update.size_id,
            quantity: update.quantity,
        }
    }
}

// =============================================================================
// Categories
// =============================================================================

/// `GET /categories` → `{categories}`.
#[derive(Debug, Deserialize)]
pub struct CategoryListResponse {
    #[serde(default)]
    pub categories: Option<Vec<CategoryDto>>,
}

/// `GET /categories/:id` → `{category, product_count}`.
#[derive(Debug, Deserialize)]
pub struct CategoryEnvelope {
    pub category: CategoryDto,
    #[serde(default)]
    pub product_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryDto {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl TryFrom<CategoryDto> for Category {
    type Error = WireError;

    fn try_from(dto: CategoryDto) -> Result<Self, Self::Error> {
        if dto.name.trim().is_empty() {
            return Err(WireError(format!("category {} has no name", dto.id)));
        }
        Ok(Category {
            id: dto.id,
            slug: Category::slugify(&dto.name),
            name: dto.name,
            description: dto.description.unwrap_or_default(),
            image: text(dto.image_url),
        })
    }
}

/// `POST /categories`, `PUT /categories/:id`.
#[derive(Debug, Serialize)]
pub struct CategoryBody<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub image_url: &'a str,
}

impl<'a> From<&'a CategoryDraft> for CategoryBody<'a> {
    fn from(draft: &'a CategoryDraft) -> Self {
        CategoryBody {
            name: &draft.name,
            description: &draft.description,
            image_url: draft.image.as_deref().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use storefront_core::money::Money;
    use storefront_core::types::Discount;

    #[test]
    fn test_list_item_uses_primary_image() {
        let dto: ProductDto = serde_json::from_value(json!({
            "id": 3,
            "name": "Casual Denim Jacket",
            "description": "",
            "category_id": 1,
            "category_name": "Men's Clothing",
            "base_price": 79.99,
            "discount_percentage": 0,
            "final_price": 79.99,
            "featured": true,
            "primary_image": "/images/product-3.jpg",
            "created_at": "2024-02-01T09:30:00Z",
            "updated_at": "2024-02-01T09:30:00Z"
        }))
        .unwrap();

        let product = Product::try_from(dto).unwrap();
        assert_eq!(product.price.cents(), 7999);
        assert_eq!(product.primary_image(), Some("/images/product-3.jpg"));
        assert!(product.colors.is_empty());
        assert_eq!(product.category.as_deref(), Some("Men's Clothing"));
        assert!(product.created_at.is_some());
    }

    #[test]
    fn test_detail_with_attributes_and_null_lists() {
        let dto: ProductDto = serde_json::from_value(json!({
            "id": 2,
            "name": "Summer Floral Dress",
            "category_id": 2,
            "base_price": 49.99,
            "discount_percentage": 10,
            "images": [{"id": 9, "product_id": 2, "image_url": "/d.jpg", "is_primary": true}],
            "colors": [{"id": 4, "product_id": 2, "color_name": "Blue", "color_hex": "#1E90FF"}],
            "sizes": null,
            "inventory": [{"color_id": 4, "size_id": 7, "quantity": 3}]
        }))
        .unwrap();

        let product = Product::try_from(dto).unwrap();
        assert_eq!(product.discount.bps(), 1000);
        assert_eq!(product.final_price().cents(), 4499);
        assert_eq!(product.colors[0].hex, "#1E90FF");
        assert!(product.sizes.is_empty());
        assert_eq!(product.stock_for(4, 7), Some(3));
    }

    #[test]
    fn test_negative_price_is_malformed() {
        let dto: ProductDto = serde_json::from_value(json!({"id": 1, "base_price": -5.0})).unwrap();
        assert!(Product::try_from(dto).is_err());
    }

    #[test]
    fn test_page_with_null_products() {
        let response: ProductListResponse = serde_json::from_value(json!({
            "products": null,
            "meta": {"page": 2, "limit": 12, "total": 30, "total_pages": 3}
        }))
        .unwrap();
        let page = ProductPage::try_from(response).unwrap();
        assert!(page.products.is_empty());
        assert_eq!(page.pagination.map(|p| p.page), Some(2));
    }

    #[test]
    fn test_product_query_pairs() {
        let pairs = product_query(&ProductQuery {
            page: Some(2),
            limit: None,
            category_id: Some(3),
            featured: Some(true),
        });
        assert_eq!(
            pairs,
            vec![
                ("page", "2".to_string()),
                ("category_id", "3".to_string()),
                ("featured", "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_product_body_uses_decimal_prices() {
        let draft = ProductDraft {
            name: "Bag".into(),
            description: String::new(),
            category_id: 3,
            price: Money::from_cents(8999),
            discount: Discount::from_percentage(15.0),
            featured: false,
        };
        let body = serde_json::to_value(ProductBody::from(&draft)).unwrap();
        assert_eq!(body["base_price"], json!(89.99));
        assert_eq!(body["discount_percentage"], json!(15.0));
    }

    #[test]
    fn test_category_slug_and_image() {
        let dto: CategoryDto = serde_json::from_value(json!({
            "id": 1, "name": "Men's Clothing", "description": "Tops", "image_url": ""
        }))
        .unwrap();
        let category = Category::try_from(dto).unwrap();
        assert_eq!(category.slug, "mens-clothing");
        assert_eq!(category.image, None);
    }
}
