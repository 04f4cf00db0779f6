//! Storage for uploaded profile images.
//!
//! Uploads are buffered in memory by the request extractor and only written
//! to disk once the owning operation has passed validation, so rejected
//! requests never leave files behind.

use crate::errors::{ServiceError, ServiceResult};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// An image received in a multipart request, not yet persisted.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Rejects uploads that are not images or carry no data.
    pub fn ensure_image(&self) -> ServiceResult<()> {
        if !self.content_type.starts_with("image/") {
            return Err(ServiceError::validation("Only image files are allowed"));
        }
        if self.bytes.is_empty() {
            return Err(ServiceError::validation("Uploaded image is empty"));
        }
        Ok(())
    }

    /// File extension taken from the client file name, falling back to the MIME subtype.
    fn extension(&self) -> String {
        let from_name = self
            .file_name
            .as_deref()
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()));

        match from_name {
            Some(ext) => ext.to_ascii_lowercase(),
            None => self
                .content_type
                .trim_start_matches("image/")
                .split(['+', ';'])
                .next()
                .filter(|ext| !ext.is_empty())
                .unwrap_or("img")
                .to_ascii_lowercase(),
        }
    }
}

/// Writes profile images under a configured directory.
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Persists `upload` under a generated name and returns the stored path.
    pub async fn save(&self, upload: &ImageUpload) -> ServiceResult<String> {
        upload.ensure_image()?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| ServiceError::internal_error(format!("Cannot create upload dir: {}", e)))?;

        let file_name = format!("{}.{}", Uuid::now_v7(), upload.extension());
        let path = self.dir.join(&file_name);

        tokio::fs::write(&path, &upload.bytes)
            .await
            .map_err(|e| ServiceError::internal_error(format!("Cannot write upload: {}", e)))?;

        tracing::debug!("Stored profile image at {}", path.display());
        Ok(path.to_string_lossy().into_owned())
    }

    /// Best-effort removal of an image written by `save`.
    pub async fn remove(&self, stored_path: &str) {
        if let Err(e) = tokio::fs::remove_file(stored_path).await {
            tracing::warn!("Failed to remove orphaned upload {}: {}", stored_path, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(file_name: Option<&str>) -> ImageUpload {
        ImageUpload {
            file_name: file_name.map(str::to_string),
            content_type: "image/png".to_string(),
            bytes: vec![0x89, b'P', b'N', b'G'],
        }
    }

    #[tokio::test]
    async fn test_save_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path());

        let stored = store.save(&png(Some("avatar.PNG"))).await.unwrap();

        assert!(stored.ends_with(".png"));
        let written = tokio::fs::read(&stored).await.unwrap();
        assert_eq!(written, vec![0x89, b'P', b'N', b'G']);
    }

    #[tokio::test]
    async fn test_remove_deletes_saved_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path());
        let stored = store.save(&png(None)).await.unwrap();

        store.remove(&stored).await;

        assert!(tokio::fs::metadata(&stored).await.is_err());
    }

    #[tokio::test]
    async fn test_save_rejects_non_images() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path());
        let upload = ImageUpload {
            file_name: Some("notes.txt".to_string()),
            content_type: "text/plain".to_string(),
            bytes: b"hello".to_vec(),
        };

        let err = store.save(&upload).await.unwrap_err();
        assert_eq!(err.to_string(), "Only image files are allowed");
    }

    #[test]
    fn test_extension_falls_back_to_mime_subtype() {
        assert_eq!(png(None).extension(), "png");

        let svg = ImageUpload {
            file_name: Some("no-extension".to_string()),
            content_type: "image/svg+xml".to_string(),
            bytes: vec![1],
        };
        assert_eq!(svg.extension(), "svg");
    }
}
