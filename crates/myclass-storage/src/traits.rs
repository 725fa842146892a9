//! Media-store abstraction trait
//!
//! This module defines the MediaStore trait that all media backends must implement.

use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;
use thiserror::Error;

use crate::progress::ProgressObserver;

/// Media-store operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid public id: {0}")]
    InvalidPublicId(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for media-store operations
pub type StorageResult<T> = Result<T, StorageError>;

/// One artifact to upload under a caller-chosen public id.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub data: Bytes,
    pub content_type: String,
    /// Original display name, forwarded to the store for bookkeeping.
    pub file_name: String,
    pub public_id: String,
    pub tags: Vec<String>,
}

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    /// Durable, publicly resolvable URL.
    pub public_url: String,
    /// Public id the store filed the bytes under (echoes the request).
    pub public_id: String,
    pub size_bytes: u64,
}

/// Media-store abstraction trait
///
/// Backends upload raw bytes and hand back a durable public URL. Progress is
/// reported through the optional observer as cumulative byte counts; it is
/// advisory only and never affects the outcome of the call.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Upload one artifact. Uploads within a publish are strictly sequential;
    /// the store is never asked to run two transfers concurrently.
    async fn upload(
        &self,
        request: UploadRequest,
        progress: Option<Arc<dyn ProgressObserver>>,
    ) -> StorageResult<UploadReceipt>;

    /// Fetch an artifact's bytes by its public id.
    async fn download(&self, public_id: &str) -> StorageResult<Vec<u8>>;
}
