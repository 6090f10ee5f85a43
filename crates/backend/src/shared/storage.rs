use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

use super::config::StorageConfig;

pub const BUCKET_PRODUCT_IMAGES: &str = "product-images";
pub const BUCKET_DOCUMENTS: &str = "documents";

/// Product images above this limit are rejected before any disk write.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;
/// Manuals/catalogs tend to be larger than images.
pub const MAX_DOCUMENT_BYTES: usize = 10 * 1024 * 1024;

static STORAGE: OnceCell<FileStorage> = OnceCell::new();

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("file exceeds the {limit_mb} MB size limit")]
    TooLarge { limit_mb: usize },
    #[error("unsupported file type: {0}")]
    UnsupportedType(String),
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// Disk-backed bucket store. Buckets are directories under `root`; a saved
/// object is retrievable at `<public_base>/<bucket>/<key>` (served by the
/// router's static-file service).
pub struct FileStorage {
    root: PathBuf,
    public_base: String,
}

impl FileStorage {
    pub fn new(root: PathBuf, public_base: String) -> Self {
        let public_base = public_base.trim_end_matches('/').to_string();
        Self { root, public_base }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn public_url(&self, bucket: &str, key: &str) -> String {
        format!("{}/{}/{}", self.public_base, bucket, key)
    }

    /// Write `bytes` under `bucket/key` and return the public URL.
    /// The caller chooses the key; size/type checks happen before this call.
    pub async fn save(&self, bucket: &str, key: &str, bytes: &[u8]) -> anyhow::Result<String> {
        validate_key(key)?;
        let path = self.root.join(bucket).join(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;
        tracing::debug!("Stored {} bytes at {}/{}", bytes.len(), bucket, key);
        Ok(self.public_url(bucket, key))
    }

    pub async fn remove(&self, bucket: &str, key: &str) -> anyhow::Result<()> {
        validate_key(key)?;
        let path = self.root.join(bucket).join(key);
        tokio::fs::remove_file(&path).await?;
        Ok(())
    }

    /// Recover the storage key from a public URL previously returned by
    /// `save`. Returns None for URLs outside this bucket.
    pub fn key_from_url(&self, bucket: &str, url: &str) -> Option<String> {
        let prefix = format!("{}/{}/", self.public_base, bucket);
        url.strip_prefix(&prefix)
            .filter(|k| !k.is_empty())
            .map(|k| k.to_string())
    }
}

fn validate_key(key: &str) -> Result<(), UploadError> {
    if key.is_empty()
        || key.starts_with('/')
        || key.split('/').any(|part| part.is_empty() || part == "..")
    {
        return Err(UploadError::InvalidKey(key.to_string()));
    }
    Ok(())
}

/// Reject an image before it touches the network/disk path.
pub fn check_image_upload(content_type: Option<&str>, size: usize) -> Result<(), UploadError> {
    match content_type {
        Some(ct) if ct.starts_with("image/") => {}
        other => {
            return Err(UploadError::UnsupportedType(
                other.unwrap_or("unknown").to_string(),
            ))
        }
    }
    if size > MAX_IMAGE_BYTES {
        return Err(UploadError::TooLarge {
            limit_mb: MAX_IMAGE_BYTES / (1024 * 1024),
        });
    }
    Ok(())
}

pub fn check_document_upload(size: usize) -> Result<(), UploadError> {
    if size > MAX_DOCUMENT_BYTES {
        return Err(UploadError::TooLarge {
            limit_mb: MAX_DOCUMENT_BYTES / (1024 * 1024),
        });
    }
    Ok(())
}

/// Build a unique object key in the style `<prefix>/<id>-<millis>.<ext>`.
pub fn object_key(prefix: &str, id: &str, file_name: &str) -> String {
    let ext = file_name.rsplit('.').next().unwrap_or("bin");
    let millis = chrono::Utc::now().timestamp_millis();
    format!("{}/{}-{}.{}", prefix, id, millis, ext)
}

pub fn initialize_storage(config: &StorageConfig) -> anyhow::Result<()> {
    let root = crate::shared::config::resolve_path(&config.root);
    std::fs::create_dir_all(root.join(BUCKET_PRODUCT_IMAGES))?;
    std::fs::create_dir_all(root.join(BUCKET_DOCUMENTS))?;

    let storage = FileStorage::new(root, config.public_base.clone());
    STORAGE
        .set(storage)
        .map_err(|_| anyhow::anyhow!("Storage already initialized"))?;
    Ok(())
}

pub fn get_storage() -> &'static FileStorage {
    STORAGE
        .get()
        .expect("Storage not initialized. Call initialize_storage() first.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_image_rejected_before_write() {
        let err = check_image_upload(Some("image/jpeg"), 6 * 1024 * 1024).unwrap_err();
        assert!(matches!(err, UploadError::TooLarge { limit_mb: 5 }));
    }

    #[test]
    fn image_at_limit_accepted() {
        assert!(check_image_upload(Some("image/png"), MAX_IMAGE_BYTES).is_ok());
    }

    #[test]
    fn non_image_content_type_rejected() {
        let err = check_image_upload(Some("application/pdf"), 100).unwrap_err();
        assert!(matches!(err, UploadError::UnsupportedType(_)));
    }

    #[test]
    fn key_traversal_rejected() {
        assert!(validate_key("products/../secret").is_err());
        assert!(validate_key("/absolute").is_err());
        assert!(validate_key("products/ok.png").is_ok());
    }

    #[test]
    fn public_url_round_trip() {
        let storage = FileStorage::new(PathBuf::from("/tmp/store"), "/files".to_string());
        let url = storage.public_url(BUCKET_DOCUMENTS, "manual.pdf");
        assert_eq!(url, "/files/documents/manual.pdf");
        assert_eq!(
            storage.key_from_url(BUCKET_DOCUMENTS, &url).as_deref(),
            Some("manual.pdf")
        );
        assert!(storage.key_from_url(BUCKET_PRODUCT_IMAGES, &url).is_none());
    }
}
