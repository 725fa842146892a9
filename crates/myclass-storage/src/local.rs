use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::keys::validate_public_id;
use crate::progress::{ProgressObserver, ProgressReport, PROGRESS_CHUNK_BYTES};
use crate::traits::{MediaStore, StorageError, StorageResult, UploadReceipt, UploadRequest};

/// Local filesystem media backend, for development and tests.
#[derive(Clone)]
pub struct LocalMediaStore {
    base_path: PathBuf,
    base_url: String,
}

impl LocalMediaStore {
    /// Create a new LocalMediaStore instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for stored artifacts
    /// * `base_url` - Base URL for serving artifacts (e.g. "http://localhost:3000/media")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create media directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalMediaStore {
            base_path,
            base_url,
        })
    }

    /// Resolve a public id to a filesystem path, rejecting traversal.
    fn id_to_path(&self, public_id: &str) -> StorageResult<PathBuf> {
        validate_public_id(public_id)?;
        Ok(self.base_path.join(public_id))
    }

    fn public_url(&self, public_id: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), public_id)
    }

    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn upload(
        &self,
        request: UploadRequest,
        progress: Option<Arc<dyn ProgressObserver>>,
    ) -> StorageResult<UploadReceipt> {
        let path = self.id_to_path(&request.public_id)?;
        let total = request.data.len() as u64;

        self.ensure_parent_dir(&path).await?;

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        let mut written = 0u64;
        for chunk in request.data.chunks(PROGRESS_CHUNK_BYTES) {
            file.write_all(chunk).await.map_err(|e| {
                StorageError::UploadFailed(format!(
                    "Failed to write file {}: {}",
                    path.display(),
                    e
                ))
            })?;
            written += chunk.len() as u64;
            if let Some(observer) = &progress {
                observer.on_progress(ProgressReport {
                    bytes_sent: written,
                    bytes_total: total,
                });
            }
        }

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        let url = self.public_url(&request.public_id);

        tracing::info!(
            path = %path.display(),
            public_id = %request.public_id,
            size_bytes = total,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local media upload successful"
        );

        Ok(UploadReceipt {
            public_url: url,
            public_id: request.public_id,
            size_bytes: total,
        })
    }

    async fn download(&self, public_id: &str) -> StorageResult<Vec<u8>> {
        let path = self.id_to_path(public_id)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::NotFound(public_id.to_string()));
        }

        let data = fs::read(&path).await.map_err(|e| {
            StorageError::DownloadFailed(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        Ok(data)
    }
}
