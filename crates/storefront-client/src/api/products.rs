//! `/products` endpoints, including the admin attribute routes.

use storefront_core::generation::Operation;
use storefront_core::types::{
    ColorDraft, ImageDraft, InventoryUpdate, Product, ProductDraft, ProductPage, ProductQuery,
    SizeDraft,
};

use super::{malformed, normalize, ApiClient};
use crate::error::RequestError;
use crate::wire::catalog::{
    product_query, ColorBody, ImageBody, InventoryBody, ProductBody, ProductEnvelope,
    ProductListResponse, SizeBody,
};
use crate::wire::Ack;

impl ApiClient {
    /// `GET /products?page&limit&category_id&featured`.
    pub async fn list_products(&self, query: &ProductQuery) -> Result<ProductPage, RequestError> {
        let op = Operation::FetchProducts;
        let response: ProductListResponse =
            self.get_query(op, "/products", &product_query(query)).await?;
        normalize(op, response)
    }

    /// `GET /products/:id`.
    pub async fn get_product(&self, id: u64) -> Result<Product, RequestError> {
        let op = Operation::FetchProduct;
        let envelope: ProductEnvelope = self.get(op, &format!("/products/{id}")).await?;
        normalize(op, envelope.product)
    }

    /// `POST /products`. Returns the new product id.
    pub async fn create_product(&self, draft: &ProductDraft) -> Result<u64, RequestError> {
        let op = Operation::CreateProduct;
        let ack: Ack = self.post(op, "/products", &ProductBody::from(draft)).await?;
        ack.created_id().map_err(|e| malformed(op, e))
    }

    /// `PUT /products/:id`.
    pub async fn update_product(&self, id: u64, draft: &ProductDraft) -> Result<(), RequestError> {
        let _: Ack = self
            .put(Operation::UpdateProduct, &format!("/products/{id}"), &ProductBody::from(draft))
            .await?;
        Ok(())
    }

    /// `DELETE /products/:id`.
    pub async fn delete_product(&self, id: u64) -> Result<(), RequestError> {
        let _: Ack = self.delete(Operation::DeleteProduct, &format!("/products/{id}")).await?;
        Ok(())
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    /// `POST /products/:id/colors`.
    pub async fn add_color(&self, product_id: u64, color: &ColorDraft) -> Result<u64, RequestError> {
        let op = Operation::AddColor;
        let ack: Ack = self
            .post(op, &format!("/products/{product_id}/colors"), &ColorBody::from(color))
            .await?;
        ack.created_id().map_err(|e| malformed(op, e))
    }

    /// `DELETE /products/:id/colors/:colorId`.
    pub async fn delete_color(&self, product_id: u64, color_id: u64) -> Result<(), RequestError> {
        let _: Ack = self
            .delete(Operation::DeleteColor, &format!("/products/{product_id}/colors/{color_id}"))
            .await?;
        Ok(())
    }

    /// `POST /products/:id/sizes`.
    pub async fn add_size(&self, product_id: u64, size: &SizeDraft) -> Result<u64, RequestError> {
        let op = Operation::AddSize;
        let ack: Ack = self
            .post(op, &format!("/products/{product_id}/sizes"), &SizeBody::from(size))
            .await?;
        ack.created_id().map_err(|e| malformed(op, e))
    }

    /// `DELETE /products/:id/sizes/:sizeId`.
    pub async fn delete_size(&self, product_id: u64, size_id: u64) -> Result<(), RequestError> {
        let _: Ack = self
            .delete(Operation::DeleteSize, &format!("/products/{product_id}/sizes/{size_id}"))
            .await?;
        Ok(())
    }

    /// `POST /products/:id/images`.
    pub async fn add_image(&self, product_id: u64, image: &ImageDraft) -> Result<u64, RequestError> {
        let op = Operation::AddImage;
        let ack: Ack = self
            .post(op, &format!("/products/{product_id}/images"), &ImageBody::from(image))
            .await?;
        ack.created_id().map_err(|e| malformed(op, e))
    }

    /// `DELETE /products/:id/images/:imageId`.
    pub async fn delete_image(&self, product_id: u64, image_id: u64) -> Result<(), RequestError> {
        let _: Ack = self
            .delete(Operation::DeleteImage, &format!("/products/{product_id}/images/{image_id}"))
            .await?;
        Ok(())
    }

    /// `POST /products/:id/inventory`. Sets the stock of one variant.
    pub async fn update_inventory(
        &self,
        product_id: u64,
        update: &InventoryUpdate,
    ) -> Result<(), RequestError> {
        let _: Ack = self
            .post(
                Operation::UpdateInventory,
                &format!("/products/{product_id}/inventory"),
                &InventoryBody::from(update),
            )
            .await?;
        Ok(())
    }
}
