//! # Catalog Commands
//!
//! Product listing, product detail and categories.
//!
//! ## Listing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  storefront products --category men --max-price 50 --sort price-asc     │
//! │                                                                         │
//! │  1. fetch_categories          (sample categories if none come back)     │
//! │  2. resolve "men" ──► Category { id: 1, .. }                            │
//! │  3. parse + validate prices, sort order                                 │
//! │  4. set_filters / set_pagination                                        │
//! │  5. fetch_products(page, limit, category_id)                            │
//! │  6. render filtered products (sample products if none came back)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use clap::Args;

use storefront_client::Store;
use storefront_core::error::ValidationError;
use storefront_core::money::Money;
use storefront_core::state::products::{related_products, resolve_category};
use storefront_core::state::{FilterPatch, SortBy};
use storefront_core::types::{Product, ProductQuery};
use storefront_core::validation::validate_price_range;
use storefront_core::fallback;

use super::{failed, invalid, settle, signed_in};
use crate::views::catalog;
use crate::views::notify::Notice;
use crate::views::product::{find_product, find_sample, ProductDetail};

#[derive(Debug, Default, Args)]
pub struct CatalogArgs {
    /// Category id, slug or name.
    #[arg(long)]
    pub category: Option<String>,

    /// Lowest base price, e.g. 19.99.
    #[arg(long)]
    pub min_price: Option<String>,

    #[arg(long)]
    pub max_price: Option<String>,

    /// newest, oldest, price-asc, price-desc or popularity.
    #[arg(long)]
    pub sort: Option<String>,

    /// Colour name; repeat for several.
    #[arg(long = "color")]
    pub colors: Vec<String>,

    /// Size name; repeat for several.
    #[arg(long = "size")]
    pub sizes: Vec<String>,

    #[arg(long)]
    pub page: Option<u32>,

    #[arg(long)]
    pub limit: Option<u32>,

    #[arg(long)]
    pub featured: bool,
}

#[derive(Debug, Args)]
pub struct ProductArgs {
    /// Product id or name slug.
    pub key: String,

    #[arg(long)]
    pub color: Option<String>,

    #[arg(long)]
    pub size: Option<String>,

    #[arg(long, default_value_t = 1)]
    pub quantity: u32,

    /// Add the selection to the cart.
    #[arg(long)]
    pub add: bool,

    /// Toggle the product on the wishlist.
    #[arg(long)]
    pub wishlist: bool,
}

// =============================================================================
// Product Listing
// =============================================================================

pub async fn products(store: &Store, args: CatalogArgs, page_limit: u32) -> anyhow::Result<()> {
    settle(store.fetch_categories().await);

    let category = match args.category.as_deref() {
        Some(key) => Some(category_id(store, key)?),
        None => None,
    };
    let min_price = args.min_price.as_deref().map(parse_price).transpose().map_err(invalid)?;
    let max_price = args.max_price.as_deref().map(parse_price).transpose().map_err(invalid)?;
    validate_price_range(min_price, max_price).map_err(invalid)?;
    let sort_by = args.sort.as_deref().map(str::parse::<SortBy>).transpose()?;

    store.set_filters(FilterPatch {
        category: Some(category.map(|id| id.to_string())),
        min_price: Some(min_price),
        max_price: Some(max_price),
        sort_by,
        colors: Some(args.colors),
        sizes: Some(args.sizes),
    });
    store.set_pagination(args.page, Some(args.limit.unwrap_or(page_limit)));

    let query = {
        let state = store.state();
        ProductQuery {
            page: Some(state.products.pagination.page),
            limit: Some(state.products.pagination.limit),
            category_id: category,
            featured: args.featured.then_some(true),
        }
    };
    settle(store.fetch_products(query).await);

    let state = store.state();
    print!("{}", catalog::render(&state.products, &state.wishlist));
    Ok(())
}

pub async fn categories(store: &Store) -> anyhow::Result<()> {
    settle(store.fetch_categories().await);
    print!("{}", catalog::render_categories(&store.state().products));
    Ok(())
}

fn category_id(store: &Store, key: &str) -> anyhow::Result<u64> {
    let (known, _) = catalog::categories(&store.state().products);
    match resolve_category(&known, key) {
        Some(category) => Ok(category.id),
        None => Err(invalid(ValidationError::NotAllowed {
            field: "category".to_string(),
            allowed: known.iter().map(|c| c.slug.clone()).collect(),
        })),
    }
}

fn parse_price(input: &str) -> Result<Money, ValidationError> {
    Money::parse(input).ok_or_else(|| ValidationError::InvalidFormat {
        field: "price".to_string(),
        reason: format!("'{input}' is not an amount"),
    })
}

// =============================================================================
// Product Detail
// =============================================================================

pub async fn product(store: &Store, args: ProductArgs) -> anyhow::Result<()> {
    let (product, related) = load_product(store, &args.key).await?;

    let mut detail = ProductDetail::mount(&product);
    if let Some(color) = &args.color {
        detail.select_color(&product, color).map_err(invalid)?;
    }
    if let Some(size) = &args.size {
        detail.select_size(&product, size).map_err(invalid)?;
    }
    detail.set_quantity(args.quantity).map_err(invalid)?;

    if args.add && signed_in(store) {
        let line = detail.cart_line(&product).map_err(invalid)?;
        store.add_to_cart(line).await.map_err(failed)?;
        Notice::success(format!("Added {} to cart", product.name)).emit();
    }

    if args.wishlist && signed_in(store) {
        settle(store.fetch_wishlist().await);
        let was_saved = store.state().wishlist.contains(product.id);
        store.toggle_wishlist(product.id).await.map_err(failed)?;
        let message = if was_saved {
            format!("Removed {} from wishlist", product.name)
        } else {
            format!("Added {} to wishlist", product.name)
        };
        Notice::success(message).emit();
    }

    let wishlisted = store.state().wishlist.contains(product.id);
    let related: Vec<&Product> = related.iter().collect();
    print!("{}", detail.render(&product, &related, wishlisted));
    Ok(())
}

/// Loads the product by id, or by slug through the listing. Falls back to
/// the sample catalog when the backend has nothing. Returns the product and
/// its related products.
async fn load_product(store: &Store, key: &str) -> anyhow::Result<(Product, Vec<Product>)> {
    let by_id = match key.trim().parse::<u64>() {
        Ok(id) => {
            settle(store.fetch_product(id).await);
            store.state().products.product.clone().filter(|p| p.id == id)
        }
        Err(_) => None,
    };

    let listing_ok = settle(
        store
            .fetch_products(ProductQuery {
                category_id: by_id.as_ref().and_then(|p| p.category_id),
                ..ProductQuery::default()
            })
            .await,
    );

    let state = store.state();
    let live = &state.products.products;
    let found = by_id.or_else(|| find_product(live, key).cloned());

    match found {
        Some(product) => {
            let related = related_products(live, &product).into_iter().cloned().collect();
            Ok((product, related))
        }
        None if listing_ok && !live.is_empty() => {
            Err(anyhow::anyhow!("Product '{key}' not found"))
        }
        None => {
            let product = find_sample(key).ok_or_else(|| anyhow::anyhow!("Product '{key}' not found"))?;
            let samples = fallback::sample_products();
            let related = related_products(&samples, &product).into_iter().cloned().collect();
            Ok((product, related))
        }
    }
}
