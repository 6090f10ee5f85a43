use chrono::Utc;
use contracts::domain::document::{Document, DocumentUploadMeta};

use super::repository;
use crate::shared::changes::{self, ChangeOp, ChangedTable};
use crate::shared::storage::{self, get_storage, BUCKET_DOCUMENTS};

/// Store an uploaded document: size check, bucket write, then the metadata
/// row. The size check runs before any byte reaches disk.
pub async fn upload(
    meta: DocumentUploadMeta,
    file_name: String,
    file_type: String,
    bytes: Vec<u8>,
    uploaded_by: Option<String>,
) -> anyhow::Result<Document> {
    if meta.title.trim().is_empty() {
        anyhow::bail!("Document title is required");
    }
    if file_name.trim().is_empty() {
        anyhow::bail!("No file selected");
    }
    storage::check_document_upload(bytes.len())?;

    let id = uuid::Uuid::new_v4().to_string();
    let key = storage::object_key("uploads", &id, &file_name);
    let file_url = get_storage().save(BUCKET_DOCUMENTS, &key, &bytes).await?;

    let now = Utc::now().to_rfc3339();
    let document = Document {
        id,
        title: meta.title.trim().to_string(),
        description: meta.description.filter(|d| !d.trim().is_empty()),
        file_name,
        file_url,
        file_size: bytes.len() as i64,
        file_type,
        category: if meta.category.trim().is_empty() {
            "manual".to_string()
        } else {
            meta.category.trim().to_string()
        },
        is_active: true,
        uploaded_by,
        created_at: now.clone(),
        updated_at: now,
    };

    repository::insert(&document).await?;
    changes::publish(ChangedTable::Documents, ChangeOp::Insert);
    Ok(document)
}

pub async fn set_active(id: &str, is_active: bool) -> anyhow::Result<bool> {
    let changed = repository::set_active(id, is_active).await?;
    if changed {
        changes::publish(ChangedTable::Documents, ChangeOp::Update);
    }
    Ok(changed)
}

/// Delete the metadata row and the stored file. A missing file is logged
/// and ignored so a half-cleaned document can still be removed.
pub async fn delete(id: &str) -> anyhow::Result<bool> {
    let Some(document) = repository::get_by_id(id).await? else {
        return Ok(false);
    };

    if let Some(key) = get_storage().key_from_url(BUCKET_DOCUMENTS, &document.file_url) {
        if let Err(e) = get_storage().remove(BUCKET_DOCUMENTS, &key).await {
            tracing::warn!("Could not remove stored file for document {}: {}", id, e);
        }
    }

    let deleted = repository::delete(id).await?;
    if deleted {
        changes::publish(ChangedTable::Documents, ChangeOp::Delete);
    }
    Ok(deleted)
}

pub async fn list_active() -> anyhow::Result<Vec<Document>> {
    repository::list_active().await
}

pub async fn list_all() -> anyhow::Result<Vec<Document>> {
    repository::list_all().await
}
