use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use contracts::domain::product::{Product, ProductDto, ProductQuery};
use serde::Deserialize;

use crate::domain::products;

/// GET /api/products
///
/// Public storefront listing: active products only, optionally narrowed by
/// search text and category.
pub async fn list_active(
    Query(query): Query<ProductQuery>,
) -> Result<Json<Vec<Product>>, StatusCode> {
    match products::service::list_active(query.search.as_deref(), query.category.as_deref()).await
    {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to list products: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/products/categories
///
/// Distinct category names of active products, for the storefront filter.
pub async fn list_categories() -> Result<Json<Vec<String>>, StatusCode> {
    match products::repository::distinct_categories().await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to list product categories: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/products/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Product>, StatusCode> {
    match products::service::get_by_id(&id).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to load product {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/admin/products
///
/// Back-office listing: includes inactive products.
pub async fn list_all() -> Result<Json<Vec<Product>>, StatusCode> {
    match products::service::list_all().await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to list products: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/admin/products
///
/// An update against an unknown id is 404, like the sibling routes;
/// validation failures are 400.
pub async fn upsert(Json(dto): Json<ProductDto>) -> Result<Json<Product>, StatusCode> {
    if let Some(id) = dto.id.as_deref() {
        match products::service::get_by_id(id).await {
            Ok(Some(_)) => {}
            Ok(None) => return Err(StatusCode::NOT_FOUND),
            Err(e) => {
                tracing::error!("Failed to load product {}: {}", id, e);
                return Err(StatusCode::INTERNAL_SERVER_ERROR);
            }
        }
    }

    let result = if dto.id.is_some() {
        products::service::update(dto).await
    } else {
        products::service::create(dto).await
    };

    match result {
        Ok(product) => Ok(Json(product)),
        Err(e) => {
            tracing::warn!("Product save rejected: {}", e);
            Err(StatusCode::BAD_REQUEST)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SetActiveRequest {
    pub is_active: bool,
}

/// PUT /api/admin/products/:id/active
pub async fn set_active(
    Path(id): Path<String>,
    Json(body): Json<SetActiveRequest>,
) -> Result<(), StatusCode> {
    match products::service::set_active(&id, body.is_active).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to toggle product {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// DELETE /api/admin/products/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), StatusCode> {
    match products::service::delete(&id).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to delete product {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(id: Option<String>) -> ProductDto {
        ProductDto {
            id,
            name: "Brake Pad".to_string(),
            category: "Brakes".to_string(),
            price: 1500.0,
            description: None,
            features: None,
            image_url: None,
            is_active: None,
        }
    }

    #[tokio::test]
    async fn update_with_unknown_id_is_not_found_rather_than_bad_request() {
        crate::shared::data::db::init_test_db().await;

        let missing = uuid::Uuid::new_v4().to_string();
        let result = upsert(Json(dto(Some(missing)))).await;
        assert!(matches!(result, Err(StatusCode::NOT_FOUND)));
    }

    #[tokio::test]
    async fn update_of_existing_product_still_succeeds() {
        crate::shared::data::db::init_test_db().await;

        let created = crate::domain::products::service::create(dto(None))
            .await
            .unwrap();

        let mut changed = dto(Some(created.id.clone()));
        changed.price = 1750.0;
        let updated = upsert(Json(changed)).await.unwrap();
        assert_eq!(updated.0.id, created.id);
        assert_eq!(updated.0.price, 1750.0);
    }
}
