#![allow(dead_code)]

pub mod fixtures;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use myclass_core::config::{DocStoreBackend, MediaBackend};
use myclass_core::Config;
use myclass_db::{CatalogRepository, DbError, DbResult, DocumentStore, MemoryDocumentStore, StoredDocument};
use myclass_services::UploadPublisher;
use myclass_storage::{
    MediaStore, ProgressObserver, ProgressReport, StorageError, StorageResult, UploadReceipt,
    UploadRequest,
};
use serde_json::Value;

/// Initialize test logging once; honors RUST_LOG.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

/// Config wired for in-process backends and generous limits.
pub fn test_config() -> Config {
    Config {
        environment: "test".to_string(),
        media_backend: MediaBackend::Local,
        media_api_base_url: None,
        media_cloud_name: None,
        media_upload_preset: None,
        local_media_path: Some("/tmp/myclass-test-media".to_string()),
        local_media_base_url: Some("http://localhost:3000/media".to_string()),
        docstore_backend: DocStoreBackend::Memory,
        docstore_api_url: None,
        docstore_api_key: None,
        max_document_size_bytes: 50 * 1024 * 1024,
        max_video_size_bytes: 500 * 1024 * 1024,
        document_allowed_extensions: vec!["pdf".to_string()],
        document_allowed_content_types: vec!["application/pdf".to_string()],
        video_allowed_extensions: vec!["mp4".to_string()],
        video_allowed_content_types: vec!["video/mp4".to_string()],
    }
}

/// Media store double that records every upload and emits two progress
/// reports per transfer.
pub struct RecordingMediaStore {
    pub uploads: Mutex<Vec<UploadRequest>>,
    /// Uploads allowed to succeed before every further one fails.
    pub fail_after: Option<usize>,
}

impl RecordingMediaStore {
    pub fn new() -> Arc<Self> {
        Arc::new(RecordingMediaStore {
            uploads: Mutex::new(Vec::new()),
            fail_after: None,
        })
    }

    pub fn failing_after(fail_after: usize) -> Arc<Self> {
        Arc::new(RecordingMediaStore {
            uploads: Mutex::new(Vec::new()),
            fail_after: Some(fail_after),
        })
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }

    pub fn uploaded_public_ids(&self) -> Vec<String> {
        self.uploads
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.public_id.clone())
            .collect()
    }
}

#[async_trait]
impl MediaStore for RecordingMediaStore {
    async fn upload(
        &self,
        request: UploadRequest,
        progress: Option<Arc<dyn ProgressObserver>>,
    ) -> StorageResult<UploadReceipt> {
        let attempted_so_far = {
            let mut uploads = self.uploads.lock().unwrap();
            uploads.push(request.clone());
            uploads.len() - 1
        };

        if let Some(fail_after) = self.fail_after {
            if attempted_so_far >= fail_after {
                return Err(StorageError::UploadFailed(
                    "media store rejected the transfer".to_string(),
                ));
            }
        }

        let total = request.data.len() as u64;
        if let Some(observer) = &progress {
            observer.on_progress(ProgressReport {
                bytes_sent: total / 2,
                bytes_total: total,
            });
            observer.on_progress(ProgressReport {
                bytes_sent: total,
                bytes_total: total,
            });
        }

        Ok(UploadReceipt {
            public_url: format!("https://media.example.com/{}", request.public_id),
            public_id: request.public_id,
            size_bytes: total,
        })
    }

    async fn download(&self, public_id: &str) -> StorageResult<Vec<u8>> {
        self.uploads
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.public_id == public_id)
            .map(|r| r.data.to_vec())
            .ok_or_else(|| StorageError::NotFound(public_id.to_string()))
    }
}

/// Document store double whose inserts always fail.
pub struct FailingDocumentStore;

#[async_trait]
impl DocumentStore for FailingDocumentStore {
    async fn insert(&self, _collection: &str, _document: Value) -> DbResult<String> {
        Err(DbError::InsertFailed("connection reset".to_string()))
    }

    async fn get(&self, _collection: &str, _id: &str) -> DbResult<Option<StoredDocument>> {
        Ok(None)
    }

    async fn list(&self, _collection: &str) -> DbResult<Vec<StoredDocument>> {
        Ok(Vec::new())
    }

    async fn find_eq(
        &self,
        _collection: &str,
        _field: &str,
        _value: &Value,
    ) -> DbResult<Vec<StoredDocument>> {
        Ok(Vec::new())
    }
}

/// Observer that records every report.
pub struct RecordingObserver {
    pub reports: Mutex<Vec<ProgressReport>>,
}

impl RecordingObserver {
    pub fn new() -> Arc<Self> {
        Arc::new(RecordingObserver {
            reports: Mutex::new(Vec::new()),
        })
    }

    pub fn percentages(&self) -> Vec<u8> {
        self.reports.lock().unwrap().iter().map(|r| r.percent()).collect()
    }
}

impl ProgressObserver for RecordingObserver {
    fn on_progress(&self, report: ProgressReport) {
        self.reports.lock().unwrap().push(report);
    }
}

/// Publisher wired to the given media store and a fresh in-memory document
/// store. Returns the store handle so tests can inspect persisted documents.
pub fn publisher_with(media: Arc<dyn MediaStore>) -> (UploadPublisher, Arc<MemoryDocumentStore>) {
    let store = Arc::new(MemoryDocumentStore::new());
    let catalog = CatalogRepository::new(store.clone());
    let publisher = UploadPublisher::new(media, catalog, test_config());
    (publisher, store)
}
