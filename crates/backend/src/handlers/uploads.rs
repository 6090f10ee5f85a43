use axum::{
    extract::{Multipart, Path},
    http::StatusCode,
    Json,
};
use serde_json::json;

use crate::domain::products;
use crate::shared::storage::{self, get_storage, BUCKET_PRODUCT_IMAGES};

/// POST /api/admin/products/:id/image
///
/// Multipart upload of a product image. Type and size are checked before
/// the file is written; on success the product's image_url is updated and
/// the public URL is returned.
pub async fn upload_product_image(
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let product = products::service::get_by_id(&id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::NOT_FOUND)?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("image.bin").to_string();
        let content_type = field.content_type().map(|ct| ct.to_string());
        let bytes = field.bytes().await.map_err(|_| StatusCode::BAD_REQUEST)?;

        if let Err(e) = storage::check_image_upload(content_type.as_deref(), bytes.len()) {
            tracing::warn!("Image upload for product {} rejected: {}", id, e);
            return Err(StatusCode::BAD_REQUEST);
        }

        let key = storage::object_key("products", &product.id, &file_name);
        let image_url = get_storage()
            .save(BUCKET_PRODUCT_IMAGES, &key, &bytes)
            .await
            .map_err(|e| {
                tracing::error!("Failed to store image for product {}: {}", id, e);
                StatusCode::INTERNAL_SERVER_ERROR
            })?;

        products::service::set_image_url(&id, &image_url)
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

        return Ok(Json(json!({ "image_url": image_url })));
    }

    // No "file" field in the form
    Err(StatusCode::BAD_REQUEST)
}
