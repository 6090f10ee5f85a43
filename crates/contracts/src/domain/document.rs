use serde::{Deserialize, Serialize};

/// Metadata of an uploaded manual or catalog file.
///
/// The binary itself lives in the `documents` storage bucket; `file_url`
/// is the public retrieval URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub file_name: String,
    pub file_url: String,
    pub file_size: i64,
    pub file_type: String,
    pub category: String,
    pub is_active: bool,
    pub uploaded_by: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Form fields that accompany a document upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentUploadMeta {
    pub title: String,
    pub description: Option<String>,
    pub category: String,
}
