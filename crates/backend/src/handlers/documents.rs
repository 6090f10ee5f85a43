use axum::{
    extract::{Multipart, Path},
    http::StatusCode,
    Json,
};
use contracts::domain::document::{Document, DocumentUploadMeta};
use serde::Deserialize;

use crate::domain::documents;
use crate::system::auth::extractor::CurrentUser;

/// GET /api/documents
///
/// Public download catalog: active documents only.
pub async fn list_active() -> Result<Json<Vec<Document>>, StatusCode> {
    match documents::service::list_active().await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to list documents: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/admin/documents
pub async fn list_all() -> Result<Json<Vec<Document>>, StatusCode> {
    match documents::service::list_all().await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to list documents: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/admin/documents
///
/// Multipart form: text fields `title`, `description`, `category` plus the
/// `file` part. The uploader is recorded from the session.
pub async fn upload(
    CurrentUser(claims): CurrentUser,
    mut multipart: Multipart,
) -> Result<Json<Document>, StatusCode> {
    let mut meta = DocumentUploadMeta {
        title: String::new(),
        description: None,
        category: String::new(),
    };
    let mut file: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?
    {
        match field.name() {
            Some("title") => {
                meta.title = field.text().await.map_err(|_| StatusCode::BAD_REQUEST)?;
            }
            Some("description") => {
                meta.description = Some(field.text().await.map_err(|_| StatusCode::BAD_REQUEST)?);
            }
            Some("category") => {
                meta.category = field.text().await.map_err(|_| StatusCode::BAD_REQUEST)?;
            }
            Some("file") => {
                let file_name = field.file_name().unwrap_or("document.bin").to_string();
                let file_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(|_| StatusCode::BAD_REQUEST)?;
                file = Some((file_name, file_type, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let (file_name, file_type, bytes) = file.ok_or(StatusCode::BAD_REQUEST)?;

    match documents::service::upload(meta, file_name, file_type, bytes, Some(claims.sub)).await {
        Ok(document) => Ok(Json(document)),
        Err(e) => {
            tracing::warn!("Document upload rejected: {}", e);
            Err(StatusCode::BAD_REQUEST)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SetActiveRequest {
    pub is_active: bool,
}

/// PUT /api/admin/documents/:id/active
pub async fn set_active(
    Path(id): Path<String>,
    Json(body): Json<SetActiveRequest>,
) -> Result<(), StatusCode> {
    match documents::service::set_active(&id, body.is_active).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to toggle document {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// DELETE /api/admin/documents/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), StatusCode> {
    match documents::service::delete(&id).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to delete document {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
