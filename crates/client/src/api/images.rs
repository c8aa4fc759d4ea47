//! Image endpoints.

use nexus_shop_core::{ImageId, ProductId};
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::instrument;

use super::{ApiClient, ApiError};

impl ApiClient {
    /// URL of an image by id, built against the configured base.
    #[must_use]
    pub fn image_url(&self, id: ImageId) -> String {
        self.url(&format!("/images/{id}"))
    }

    /// Fetch the image records attached to a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or response decoding fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn images_by_product(&self, product_id: ProductId) -> Result<Value, ApiError> {
        self.get_json(&format!("/images/{product_id}"), &[]).await
    }

    /// Upload an image for a product (multipart).
    ///
    /// `replace_id` overwrites an existing image record; `original_url`
    /// preserves the source the image was imported from.
    ///
    /// # Errors
    ///
    /// Returns an error if the upload fails or the backend rejects it.
    #[instrument(skip(self, bytes), fields(product_id = %product_id, file_name = %file_name))]
    pub async fn upload_image(
        &self,
        product_id: ProductId,
        file_name: &str,
        bytes: Vec<u8>,
        replace_id: Option<ImageId>,
        original_url: Option<&str>,
    ) -> Result<Value, ApiError> {
        let mut form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name.to_string()))
            .text("idProducto", product_id.to_string());
        if let Some(id) = replace_id {
            form = form.text("idImagen", id.to_string());
        }
        if let Some(url) = original_url {
            form = form.text("originalUrl", url.to_string());
        }
        self.post_multipart("/images", form).await
    }

    /// Delete an image.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_image(&self, id: ImageId) -> Result<(), ApiError> {
        self.delete_json(&format!("/images/{id}")).await?;
        Ok(())
    }
}
