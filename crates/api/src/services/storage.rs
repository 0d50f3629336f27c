//! Audio file storage.
//!
//! Uploaded audio lands on disk under the configured directory, named by the
//! asset id; metadata lives in the audio_assets table. Serving streams the
//! file back without buffering it in memory.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use uuid::Uuid;

/// Errors from audio storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("File exceeds the maximum upload size of {0} bytes")]
    TooLarge(usize),

    #[error("Unsupported content type: {0}")]
    UnsupportedType(String),

    #[error("Asset not found")]
    NotFound,

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Disk-backed audio storage.
#[derive(Debug, Clone)]
pub struct AudioStorage {
    root: PathBuf,
    max_size_bytes: usize,
}

impl AudioStorage {
    pub fn new(root: impl Into<PathBuf>, max_size_bytes: usize) -> Self {
        Self {
            root: root.into(),
            max_size_bytes,
        }
    }

    /// Validates and writes an uploaded file, returning its new asset id.
    pub async fn save(
        &self,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<Uuid, StorageError> {
        if !content_type.starts_with("audio/") {
            return Err(StorageError::UnsupportedType(content_type.to_string()));
        }
        if bytes.len() > self.max_size_bytes {
            return Err(StorageError::TooLarge(self.max_size_bytes));
        }

        let id = Uuid::new_v4();
        fs::create_dir_all(&self.root).await?;
        fs::write(self.path(id), bytes).await?;

        Ok(id)
    }

    /// Opens an asset for streaming.
    pub async fn open(&self, id: Uuid) -> Result<fs::File, StorageError> {
        match fs::File::open(self.path(id)).await {
            Ok(file) => Ok(file),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(StorageError::NotFound),
            Err(e) => Err(e.into()),
        }
    }

    /// Removes an asset file; missing files are not an error.
    pub async fn remove(&self, id: Uuid) -> Result<(), StorageError> {
        match fs::remove_file(self.path(id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn path(&self, id: Uuid) -> PathBuf {
        self.root.join(id.to_string())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> AudioStorage {
        let dir = std::env::temp_dir().join(format!("lingora-audio-test-{}", Uuid::new_v4()));
        AudioStorage::new(dir, 1024)
    }

    #[tokio::test]
    async fn test_save_and_open_roundtrip() {
        let storage = storage();
        let id = storage.save(b"RIFFdata", "audio/mpeg").await.unwrap();

        let mut file = storage.open(id).await.unwrap();
        let mut contents = Vec::new();
        tokio::io::AsyncReadExt::read_to_end(&mut file, &mut contents)
            .await
            .unwrap();
        assert_eq!(contents, b"RIFFdata");

        storage.remove(id).await.unwrap();
    }

    #[tokio::test]
    async fn test_rejects_non_audio_content_type() {
        let storage = storage();
        let result = storage.save(b"PK..", "application/zip").await;
        assert!(matches!(result, Err(StorageError::UnsupportedType(_))));
    }

    #[tokio::test]
    async fn test_rejects_oversized_files() {
        let storage = storage();
        let big = vec![0u8; 2048];
        let result = storage.save(&big, "audio/mpeg").await;
        assert!(matches!(result, Err(StorageError::TooLarge(_))));
    }

    #[tokio::test]
    async fn test_open_missing_asset() {
        let storage = storage();
        let result = storage.open(Uuid::new_v4()).await;
        assert!(matches!(result, Err(StorageError::NotFound)));
    }

    #[tokio::test]
    async fn test_remove_missing_asset_is_ok() {
        let storage = storage();
        assert!(storage.remove(Uuid::new_v4()).await.is_ok());
    }
}
