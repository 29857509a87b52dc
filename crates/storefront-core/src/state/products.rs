//! # Products Slice
//!
//! Catalog, categories, filters and pagination.
//!
//! ## Filtered View
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   products ──┐                                                         │
//! │              ├──► apply_filters ──► filtered_products()                │
//! │   filters ───┘    (pure, stable, idempotent)                           │
//! │                                                                         │
//! │   1. category   id, name or slug of name (case-insensitive)            │
//! │   2. price      min_price <= base price <= max_price                   │
//! │   3. colours    any selected colour present                            │
//! │   4. sizes      any selected size present                              │
//! │   5. sort       newest | oldest | price-asc | price-desc | popularity  │
//! │                                                                         │
//! │   The filtered list is never stored; it is recomputed on every read.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::RequestStatus;
use crate::error::CoreError;
use crate::money::Money;
use crate::types::{Category, Pagination, Product, ProductPage};
use crate::MAX_RELATED_PRODUCTS;

// =============================================================================
// Sorting
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortBy {
    /// Most recently created first.
    #[default]
    Newest,
    Oldest,
    PriceAsc,
    PriceDesc,
    /// Highest popularity first.
    Popularity,
}

impl SortBy {
    pub const ALL: [SortBy; 5] = [
        SortBy::Newest,
        SortBy::Oldest,
        SortBy::PriceAsc,
        SortBy::PriceDesc,
        SortBy::Popularity,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            SortBy::Newest => "newest",
            SortBy::Oldest => "oldest",
            SortBy::PriceAsc => "price-asc",
            SortBy::PriceDesc => "price-desc",
            SortBy::Popularity => "popularity",
        }
    }

    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortBy::Newest => match (a.created_at, b.created_at) {
                (Some(x), Some(y)) => y.cmp(&x).then_with(|| b.id.cmp(&a.id)),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => b.id.cmp(&a.id),
            },
            SortBy::Oldest => match (a.created_at, b.created_at) {
                (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.id.cmp(&b.id)),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => a.id.cmp(&b.id),
            },
            SortBy::PriceAsc => a.price.cmp(&b.price),
            SortBy::PriceDesc => b.price.cmp(&a.price),
            SortBy::Popularity => b.popularity.cmp(&a.popularity),
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = CoreError;

    /// Accepts the canonical keys plus the `price-low` / `price-high` aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "newest" => Ok(SortBy::Newest),
            "oldest" => Ok(SortBy::Oldest),
            "price-asc" | "price-low" => Ok(SortBy::PriceAsc),
            "price-desc" | "price-high" => Ok(SortBy::PriceDesc),
            "popularity" | "popular" => Ok(SortBy::Popularity),
            _ => Err(CoreError::UnknownSortOrder(s.to_string())),
        }
    }
}

// =============================================================================
// Filters
// =============================================================================

/// Active catalog filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilters {
    /// Category id, name or slug. `None` shows every category.
    pub category: Option<String>,
    pub min_price: Option<Money>,
    pub max_price: Option<Money>,
    pub sort_by: SortBy,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
}

impl ProductFilters {
    /// Merges a patch; fields the patch leaves out keep their value.
    pub fn merge(mut self, patch: FilterPatch) -> Self {
        if let Some(category) = patch.category {
            self.category = category.filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case("all"));
        }
        if let Some(min_price) = patch.min_price {
            self.min_price = min_price;
        }
        if let Some(max_price) = patch.max_price {
            self.max_price = max_price;
        }
        if let Some(sort_by) = patch.sort_by {
            self.sort_by = sort_by;
        }
        if let Some(colors) = patch.colors {
            self.colors = colors;
        }
        if let Some(sizes) = patch.sizes {
            self.sizes = sizes;
        }
        self
    }

    pub fn is_default(&self) -> bool {
        *self == ProductFilters::default()
    }

    fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category {
            if !category_matches(product, category) {
                return false;
            }
        }
        if self.min_price.is_some_and(|min| product.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| product.price > max) {
            return false;
        }
        if !self.colors.is_empty()
            && !product
                .colors
                .iter()
                .any(|c| self.colors.iter().any(|want| want.eq_ignore_ascii_case(&c.name)))
        {
            return false;
        }
        if !self.sizes.is_empty()
            && !product
                .sizes
                .iter()
                .any(|s| self.sizes.iter().any(|want| want.eq_ignore_ascii_case(&s.name)))
        {
            return false;
        }
        true
    }
}

/// Partial filter update. `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    pub category: Option<Option<String>>,
    pub min_price: Option<Option<Money>>,
    pub max_price: Option<Option<Money>>,
    pub sort_by: Option<SortBy>,
    pub colors: Option<Vec<String>>,
    pub sizes: Option<Vec<String>>,
}

fn category_matches(product: &Product, wanted: &str) -> bool {
    let wanted = wanted.trim();
    if product.category_id.is_some_and(|id| id.to_string() == wanted) {
        return true;
    }
    product.category.as_deref().is_some_and(|name| {
        name.eq_ignore_ascii_case(wanted) || Category::slugify(name) == wanted.to_ascii_lowercase()
    })
}

/// Filters and sorts `products`.
///
/// The sort is stable, so equal keys keep their incoming order and applying
/// the same filters twice gives the same result.
///
/// ## Example
/// ```rust
/// use storefront_core::fallback::sample_products;
/// use storefront_core::money::Money;
/// use storefront_core::state::products::{apply_filters, ProductFilters, SortBy};
///
/// let products = sample_products();
/// let filters = ProductFilters {
///     max_price: Some(Money::from_cents(5_000)),
///     sort_by: SortBy::PriceAsc,
///     ..ProductFilters::default()
/// };
/// let names: Vec<&str> = apply_filters(&products, &filters)
///     .iter()
///     .map(|p| p.name.as_str())
///     .collect();
/// assert_eq!(names, ["Classic White T-Shirt", "Summer Floral Dress"]);
/// ```
pub fn apply_filters<'a>(products: &'a [Product], filters: &ProductFilters) -> Vec<&'a Product> {
    let mut filtered: Vec<&Product> = products.iter().filter(|p| filters.matches(p)).collect();
    filtered.sort_by(|a, b| filters.sort_by.compare(a, b));
    filtered
}

/// Products in the same category as `product`, excluding it, at most four.
pub fn related_products<'a>(products: &'a [Product], product: &Product) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|candidate| candidate.id != product.id)
        .filter(|candidate| match (candidate.category_id, product.category_id) {
            (Some(a), Some(b)) => a == b,
            _ => candidate.category.is_some() && candidate.category == product.category,
        })
        .take(MAX_RELATED_PRODUCTS)
        .collect()
}

/// Finds a category by id, slug or name (case-insensitive).
pub fn resolve_category<'a>(categories: &'a [Category], key: &str) -> Option<&'a Category> {
    let key = key.trim();
    categories.iter().find(|c| {
        c.id.to_string() == key || c.slug.eq_ignore_ascii_case(key) || c.name.eq_ignore_ascii_case(key)
    })
}

// =============================================================================
// Slice
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductState {
    pub products: Vec<Product>,
    /// The product currently being viewed.
    pub product: Option<Product>,
    pub categories: Vec<Category>,
    /// The category currently being viewed.
    pub category: Option<Category>,
    pub filters: ProductFilters,
    pub pagination: Pagination,
    #[serde(flatten)]
    pub status: RequestStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProductAction {
    Pending,
    Rejected(String),
    ClearError,

    PageLoaded(ProductPage),
    ProductLoaded(Product),
    /// Newly created product, prepended.
    ProductCreated(Product),
    /// Fresh copy of an existing product (edit or attribute change).
    ProductUpdated(Product),
    ProductDeleted(u64),

    CategoriesLoaded(Vec<Category>),
    CategoryLoaded(Category),
    /// Newly created category, appended.
    CategoryCreated(Category),
    CategoryUpdated(Category),
    CategoryDeleted(u64),

    SetFilters(FilterPatch),
    ResetFilters,
    SetPagination { page: Option<u32>, limit: Option<u32> },
    ClearProduct,
}

impl ProductState {
    pub fn reduce(mut self, action: ProductAction) -> Self {
        match action {
            ProductAction::Pending => self.status.begin(),
            ProductAction::Rejected(message) => self.status.fail(message),
            ProductAction::ClearError => self.status.clear_error(),

            ProductAction::PageLoaded(page) => {
                let count = page.products.len() as u64;
                self.products = page.products;
                self.pagination = match page.pagination {
                    Some(pagination) => pagination,
                    None => Pagination {
                        total: count,
                        ..self.pagination
                    },
                };
                self.status.succeed();
            }
            ProductAction::ProductLoaded(product) => {
                self.product = Some(product);
                self.status.succeed();
            }
            ProductAction::ProductCreated(product) => {
                self.products.retain(|p| p.id != product.id);
                self.products.insert(0, product);
                self.status.succeed();
            }
            ProductAction::ProductUpdated(product) => {
                if let Some(slot) = self.products.iter_mut().find(|p| p.id == product.id) {
                    *slot = product.clone();
                }
                if self.product.as_ref().is_some_and(|p| p.id == product.id) {
                    self.product = Some(product);
                }
                self.status.succeed();
            }
            ProductAction::ProductDeleted(id) => {
                self.products.retain(|p| p.id != id);
                if self.product.as_ref().is_some_and(|p| p.id == id) {
                    self.product = None;
                }
                self.status.succeed();
            }

            ProductAction::CategoriesLoaded(categories) => {
                self.categories = categories;
                self.status.succeed();
            }
            ProductAction::CategoryLoaded(category) => {
                self.category = Some(category);
                self.status.succeed();
            }
            ProductAction::CategoryCreated(category) => {
                self.categories.retain(|c| c.id != category.id);
                self.categories.push(category);
                self.status.succeed();
            }
            ProductAction::CategoryUpdated(category) => {
                if let Some(slot) = self.categories.iter_mut().find(|c| c.id == category.id) {
                    *slot = category.clone();
                }
                if self.category.as_ref().is_some_and(|c| c.id == category.id) {
                    self.category = Some(category);
                }
                self.status.succeed();
            }
            ProductAction::CategoryDeleted(id) => {
                self.categories.retain(|c| c.id != id);
                if self.category.as_ref().is_some_and(|c| c.id == id) {
                    self.category = None;
                }
                self.status.succeed();
            }

            ProductAction::SetFilters(patch) => {
                self.filters = std::mem::take(&mut self.filters).merge(patch);
            }
            ProductAction::ResetFilters => self.filters = ProductFilters::default(),
            ProductAction::SetPagination { page, limit } => {
                if let Some(page) = page {
                    self.pagination.page = page.max(1);
                }
                if let Some(limit) = limit {
                    self.pagination.limit = limit.max(1);
                }
            }
            ProductAction::ClearProduct => self.product = None,
        }
        self
    }

    /// `products` with the active filters applied.
    pub fn filtered_products(&self) -> Vec<&Product> {
        apply_filters(&self.products, &self.filters)
    }

    /// Related products for the product being viewed.
    pub fn related_products(&self) -> Vec<&Product> {
        match &self.product {
            Some(product) => related_products(&self.products, product),
            None => Vec::new(),
        }
    }

    pub fn find(&self, id: u64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
