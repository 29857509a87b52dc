//! `/categories` endpoints.

use storefront_core::generation::Operation;
use storefront_core::types::{Category, CategoryDraft};

use super::{malformed, normalize, ApiClient};
use crate::error::RequestError;
use crate::wire::catalog::{CategoryBody, CategoryEnvelope, CategoryListResponse};
use crate::wire::{convert_all, Ack};

impl ApiClient {
    pub async fn list_categories(&self) -> Result<Vec<Category>, RequestError> {
        let op = Operation::FetchCategories;
        let response: CategoryListResponse = self.get(op, "/categories").await?;
        convert_all(response.categories).map_err(|e| malformed(op, e))
    }

    pub async fn get_category(&self, id: u64) -> Result<Category, RequestError> {
        let op = Operation::FetchCategory;
        let envelope: CategoryEnvelope = self.get(op, &format!("/categories/{id}")).await?;
        normalize(op, envelope.category)
    }

    /// Returns the new category id.
    pub async fn create_category(&self, draft: &CategoryDraft) -> Result<u64, RequestError> {
        let op = Operation::CreateCategory;
        let ack: Ack = self.post(op, "/categories", &CategoryBody::from(draft)).await?;
        ack.created_id().map_err(|e| malformed(op, e))
    }

    pub async fn update_category(&self, id: u64, draft: &CategoryDraft) -> Result<(), RequestError> {
        let _: Ack = self
            .put(Operation::UpdateCategory, &format!("/categories/{id}"), &CategoryBody::from(draft))
            .await?;
        Ok(())
    }

    pub async fn delete_category(&self, id: u64) -> Result<(), RequestError> {
        let _: Ack = self.delete(Operation::DeleteCategory, &format!("/categories/{id}")).await?;
        Ok(())
    }
}
