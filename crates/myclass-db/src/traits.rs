//! Document-store abstraction trait

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Document-store operation errors
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Insert failed: {0}")]
    InsertFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for document-store operations
pub type DbResult<T> = Result<T, DbError>;

/// A document as read back from the store: generated id plus the JSON payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDocument {
    pub id: String,
    pub data: Value,
}

/// Document-store abstraction trait
///
/// The store is schema-less; each collection is an append-only bag of JSON
/// documents with store-generated string ids. Filtering is limited to
/// top-level field equality — anything richer happens client-side.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Append one document. Atomic from the caller's perspective.
    async fn insert(&self, collection: &str, document: Value) -> DbResult<String>;

    /// Fetch one document by id.
    async fn get(&self, collection: &str, id: &str) -> DbResult<Option<StoredDocument>>;

    /// Fetch every document in a collection.
    async fn list(&self, collection: &str) -> DbResult<Vec<StoredDocument>>;

    /// Fetch documents whose top-level `field` equals `value`.
    async fn find_eq(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> DbResult<Vec<StoredDocument>>;
}
