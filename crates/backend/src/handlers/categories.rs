use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::category::{CategoryDto, ProductCategory};

use crate::domain::categories;

/// GET /api/categories
pub async fn list_all() -> Result<Json<Vec<ProductCategory>>, StatusCode> {
    match categories::service::list_all().await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to list categories: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/admin/categories
pub async fn create(Json(dto): Json<CategoryDto>) -> Result<Json<ProductCategory>, StatusCode> {
    match categories::service::create(dto).await {
        Ok(category) => Ok(Json(category)),
        Err(e) => {
            tracing::warn!("Category creation rejected: {}", e);
            Err(StatusCode::BAD_REQUEST)
        }
    }
}

/// DELETE /api/admin/categories/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), StatusCode> {
    match categories::service::delete(&id).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to delete category {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
