//! Catalog listing and category grid.
//!
//! Both substitute the sample catalog when the live set is empty and no
//! request is in flight. Active filters still run over the samples.

use std::fmt;

use storefront_core::fallback;
use storefront_core::state::{apply_filters, ProductState, WishlistState};
use storefront_core::types::{Category, Product};

use super::{discount_label, stock_label, table};

/// Where a listing's rows came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Live,
    Sample,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Live => f.write_str("live"),
            Source::Sample => f.write_str("sample"),
        }
    }
}

/// Products to show, already filtered and sorted.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub products: Vec<Product>,
    pub source: Source,
}

pub fn listing(state: &ProductState) -> Listing {
    if fallback::should_substitute(&state.products, state.status.loading) {
        let samples = fallback::sample_products();
        Listing {
            products: apply_filters(&samples, &state.filters).into_iter().cloned().collect(),
            source: Source::Sample,
        }
    } else {
        Listing {
            products: state.filtered_products().into_iter().cloned().collect(),
            source: Source::Live,
        }
    }
}

/// Categories to show: live, or the samples.
pub fn categories(state: &ProductState) -> (Vec<Category>, Source) {
    if fallback::should_substitute(&state.categories, state.status.loading) {
        (fallback::sample_categories(), Source::Sample)
    } else {
        (state.categories.clone(), Source::Live)
    }
}

pub fn render(state: &ProductState, wishlist: &WishlistState) -> String {
    let listing = listing(state);
    if listing.products.is_empty() {
        return "No products match the current filters.\n".to_string();
    }

    let rows = listing.products.iter().map(|p| {
        [
            p.id.to_string(),
            p.name.clone(),
            p.category.clone().unwrap_or_default(),
            p.price.to_string(),
            discount_label(p.discount),
            p.final_price().to_string(),
            stock_label(p.in_stock()).to_string(),
            if wishlist.contains(p.id) { "♥" } else { "" }.to_string(),
        ]
    });
    let mut out = table(
        ["ID", "Name", "Category", "Price", "Off", "Now", "Stock", "♥"],
        rows,
        3,
    );

    match listing.source {
        Source::Live => {
            let p = &state.pagination;
            out.push_str(&format!(
                "\nPage {} of {} ({} products, sorted by {})\n",
                p.page,
                p.total_pages().max(1),
                p.total,
                state.filters.sort_by
            ));
        }
        Source::Sample => out.push_str("\nShowing sample products.\n"),
    }
    out
}

pub fn render_categories(state: &ProductState) -> String {
    let (categories, source) = categories(state);
    let rows = categories.iter().map(|c| {
        [
            c.id.to_string(),
            c.name.clone(),
            c.slug.clone(),
            c.description.clone(),
        ]
    });
    let mut out = table(["ID", "Name", "Key", "Description"], rows, 4);
    out.push('\n');
    if source == Source::Sample {
        out.push_str("Showing sample categories.\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::money::Money;
    use storefront_core::state::{FilterPatch, ProductAction};
    use storefront_core::types::ProductPage;

    #[test]
    fn test_empty_idle_slice_uses_samples() {
        let listing = listing(&ProductState::default());
        assert_eq!(listing.source, Source::Sample);
        assert_eq!(listing.products.len(), 4);
    }

    #[test]
    fn test_loading_slice_does_not_substitute() {
        let state = ProductState::default().reduce(ProductAction::Pending);
        let listing = listing(&state);
        assert_eq!(listing.source, Source::Live);
        assert!(listing.products.is_empty());
    }

    #[test]
    fn test_filters_apply_to_samples() {
        let state = ProductState::default().reduce(ProductAction::SetFilters(FilterPatch {
            max_price: Some(Some(Money::from_cents(5_000))),
            ..FilterPatch::default()
        }));
        let listing = listing(&state);
        assert_eq!(listing.source, Source::Sample);
        assert!(listing.products.iter().all(|p| p.price.cents() <= 5_000));
        assert_eq!(listing.products.len(), 2);
    }

    #[test]
    fn test_live_products_win() {
        let mut product = fallback::sample_products().remove(0);
        product.id = 42;
        let state = ProductState::default().reduce(ProductAction::PageLoaded(ProductPage {
            products: vec![product],
            pagination: None,
        }));
        let listing = listing(&state);
        assert_eq!(listing.source, Source::Live);
        assert_eq!(listing.products[0].id, 42);
        assert!(render(&state, &WishlistState::default()).contains("Page 1 of 1"));
    }

    #[test]
    fn test_sample_categories() {
        let rendered = render_categories(&ProductState::default());
        assert!(rendered.contains("Footwear"));
        assert!(rendered.contains("sample categories"));
    }
}
