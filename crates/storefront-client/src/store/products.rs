//! Catalog operations: products, their attributes, and categories.
//!
//! Mutations answer with an id only, so each one is followed by a read of
//! the affected entity, which is then patched into the local set by id.

use storefront_core::generation::Operation;
use storefront_core::state::{FilterPatch, ProductAction};
use storefront_core::types::{
    CategoryDraft, ColorDraft, ImageDraft, InventoryUpdate, ProductDraft, ProductQuery, SizeDraft,
};

use super::Store;
use crate::error::RequestError;

impl Store {
    // =========================================================================
    // Products
    // =========================================================================

    pub async fn fetch_products(&self, query: ProductQuery) -> Result<(), RequestError> {
        let api = &self.api;
        self.perform(
            Operation::FetchProducts,
            async move { api.list_products(&query).await },
            ProductAction::PageLoaded,
        )
        .await
    }

    pub async fn fetch_product(&self, id: u64) -> Result<(), RequestError> {
        let api = &self.api;
        self.perform(Operation::FetchProduct, api.get_product(id), ProductAction::ProductLoaded)
            .await
    }

    pub async fn create_product(&self, draft: ProductDraft) -> Result<(), RequestError> {
        let api = &self.api;
        self.perform(
            Operation::CreateProduct,
            async move {
                let id = api.create_product(&draft).await?;
                api.get_product(id).await
            },
            ProductAction::ProductCreated,
        )
        .await
    }

    pub async fn update_product(&self, id: u64, draft: ProductDraft) -> Result<(), RequestError> {
        let api = &self.api;
        self.perform(
            Operation::UpdateProduct,
            async move {
                api.update_product(id, &draft).await?;
                api.get_product(id).await
            },
            ProductAction::ProductUpdated,
        )
        .await
    }

    pub async fn delete_product(&self, id: u64) -> Result<(), RequestError> {
        let api = &self.api;
        self.perform(Operation::DeleteProduct, api.delete_product(id), |()| {
            ProductAction::ProductDeleted(id)
        })
        .await
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    pub async fn add_color(&self, product_id: u64, color: ColorDraft) -> Result<(), RequestError> {
        let api = &self.api;
        self.perform(
            Operation::AddColor,
            async move {
                api.add_color(product_id, &color).await?;
                api.get_product(product_id).await
            },
            ProductAction::ProductUpdated,
        )
        .await
    }

    pub async fn delete_color(&self, product_id: u64, color_id: u64) -> Result<(), RequestError> {
        let api = &self.api;
        self.perform(
            Operation::DeleteColor,
            async move {
                api.delete_color(product_id, color_id).await?;
                api.get_product(product_id).await
            },
            ProductAction::ProductUpdated,
        )
        .await
    }

    pub async fn add_size(&self, product_id: u64, size: SizeDraft) -> Result<(), RequestError> {
        let api = &self.api;
        self.perform(
            Operation::AddSize,
            async move {
                api.add_size(product_id, &size).await?;
                api.get_product(product_id).await
            },
            ProductAction::ProductUpdated,
        )
        .await
    }

    pub async fn delete_size(&self, product_id: u64, size_id: u64) -> Result<(), RequestError> {
        let api = &self.api;
        self.perform(
            Operation::DeleteSize,
            async move {
                api.delete_size(product_id, size_id).await?;
                api.get_product(product_id).await
            },
            ProductAction::ProductUpdated,
        )
        .await
    }

    pub async fn add_image(&self, product_id: u64, image: ImageDraft) -> Result<(), RequestError> {
        let api = &self.api;
        self.perform(
            Operation::AddImage,
            async move {
                api.add_image(product_id, &image).await?;
                api.get_product(product_id).await
            },
            ProductAction::ProductUpdated,
        )
        .await
    }

    pub async fn delete_image(&self, product_id: u64, image_id: u64) -> Result<(), RequestError> {
        let api = &self.api;
        self.perform(
            Operation::DeleteImage,
            async move {
                api.delete_image(product_id, image_id).await?;
                api.get_product(product_id).await
            },
            ProductAction::ProductUpdated,
        )
        .await
    }

    pub async fn update_inventory(
        &self,
        product_id: u64,
        update: InventoryUpdate,
    ) -> Result<(), RequestError> {
        let api = &self.api;
        self.perform(
            Operation::UpdateInventory,
            async move {
                api.update_inventory(product_id, &update).await?;
                api.get_product(product_id).await
            },
            ProductAction::ProductUpdated,
        )
        .await
    }

    // =========================================================================
    // Categories
    // =========================================================================

    pub async fn fetch_categories(&self) -> Result<(), RequestError> {
        let api = &self.api;
        self.perform(
            Operation::FetchCategories,
            api.list_categories(),
            ProductAction::CategoriesLoaded,
        )
        .await
    }

    pub async fn fetch_category(&self, id: u64) -> Result<(), RequestError> {
        let api = &self.api;
        self.perform(Operation::FetchCategory, api.get_category(id), ProductAction::CategoryLoaded)
            .await
    }

    pub async fn create_category(&self, draft: CategoryDraft) -> Result<(), RequestError> {
        let api = &self.api;
        self.perform(
            Operation::CreateCategory,
            async move {
                let id = api.create_category(&draft).await?;
                api.get_category(id).await
            },
            ProductAction::CategoryCreated,
        )
        .await
    }

    pub async fn update_category(&self, id: u64, draft: CategoryDraft) -> Result<(), RequestError> {
        let api = &self.api;
        self.perform(
            Operation::UpdateCategory,
            async move {
                api.update_category(id, &draft).await?;
                api.get_category(id).await
            },
            ProductAction::CategoryUpdated,
        )
        .await
    }

    pub async fn delete_category(&self, id: u64) -> Result<(), RequestError> {
        let api = &self.api;
        self.perform(Operation::DeleteCategory, api.delete_category(id), |()| {
            ProductAction::CategoryDeleted(id)
        })
        .await
    }

    // =========================================================================
    // Local Actions
    // =========================================================================

    pub fn set_filters(&self, patch: FilterPatch) {
        self.dispatch(ProductAction::SetFilters(patch));
    }

    pub fn reset_filters(&self) {
        self.dispatch(ProductAction::ResetFilters);
    }

    /// Updates page and/or limit. Values below 1 are raised to 1.
    pub fn set_pagination(&self, page: Option<u32>, limit: Option<u32>) {
        self.dispatch(ProductAction::SetPagination { page, limit });
    }

    pub fn clear_product(&self) {
        self.dispatch(ProductAction::ClearProduct);
    }
}

#[cfg(test)]
mod tests {
    use storefront_core::money::Money;
    use storefront_core::state::{FilterPatch, SortBy};

    use crate::api::ApiClient;
    use crate::store::Store;
    use crate::token::TokenStore;

    fn store() -> Store {
        let url = url::Url::parse("http://127.0.0.1:9/api").unwrap();
        Store::new(ApiClient::new(&url, TokenStore::headless()).unwrap())
    }

    #[test]
    fn test_filter_actions() {
        let store = store();
        store.set_filters(FilterPatch {
            category: Some(Some("women".to_string())),
            max_price: Some(Some(Money::from_cents(5_000))),
            sort_by: Some(SortBy::PriceAsc),
            ..FilterPatch::default()
        });
        {
            let state = store.state();
            assert_eq!(state.products.filters.category.as_deref(), Some("women"));
            assert_eq!(state.products.filters.sort_by, SortBy::PriceAsc);
        }

        store.reset_filters();
        assert!(store.state().products.filters.is_default());
    }

    #[test]
    fn test_set_pagination_raises_zero() {
        let store = store();
        store.set_pagination(Some(0), Some(24));
        let state = store.state();
        assert_eq!(state.products.pagination.page, 1);
        assert_eq!(state.products.pagination.limit, 24);
    }
}
