use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::inquiry::{InquiryDto, InquiryStatus, ProductInquiry};
use serde::Deserialize;

use crate::domain::inquiries;

/// POST /api/inquiries
///
/// Public contact form; no session required.
pub async fn create(Json(dto): Json<InquiryDto>) -> Result<Json<ProductInquiry>, StatusCode> {
    match inquiries::service::create(dto).await {
        Ok(inquiry) => Ok(Json(inquiry)),
        Err(e) => {
            tracing::warn!("Inquiry rejected: {}", e);
            Err(StatusCode::BAD_REQUEST)
        }
    }
}

/// GET /api/admin/inquiries
pub async fn list_all() -> Result<Json<Vec<ProductInquiry>>, StatusCode> {
    match inquiries::service::list_all().await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to list inquiries: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: InquiryStatus,
}

/// PUT /api/admin/inquiries/:id/status
pub async fn set_status(
    Path(id): Path<String>,
    Json(body): Json<SetStatusRequest>,
) -> Result<(), StatusCode> {
    match inquiries::service::set_status(&id, body.status).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to update inquiry {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
