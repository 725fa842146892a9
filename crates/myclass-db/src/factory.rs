use std::sync::Arc;

use myclass_core::{Config, DocStoreBackend};

use crate::{DbError, DbResult, DocumentStore, MemoryDocumentStore, RestDocumentStore};

/// Create a document-store backend based on configuration
pub fn create_document_store(config: &Config) -> DbResult<Arc<dyn DocumentStore>> {
    match config.docstore_backend {
        DocStoreBackend::Rest => {
            let base_url = config.docstore_api_url.clone().ok_or_else(|| {
                DbError::ConfigError("DOCSTORE_API_URL not configured".to_string())
            })?;
            let store = RestDocumentStore::new(base_url, config.docstore_api_key.clone())?;
            Ok(Arc::new(store))
        }

        DocStoreBackend::Memory => Ok(Arc::new(MemoryDocumentStore::new())),
    }
}
