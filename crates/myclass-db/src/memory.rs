use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::traits::{DbResult, DocumentStore, StoredDocument};

/// In-process document store, for development and tests.
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<StoredDocument>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert(&self, collection: &str, document: Value) -> DbResult<String> {
        let id = Uuid::new_v4().to_string();
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(StoredDocument {
                id: id.clone(),
                data: document,
            });
        Ok(id)
    }

    async fn get(&self, collection: &str, id: &str) -> DbResult<Option<StoredDocument>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .cloned())
    }

    async fn list(&self, collection: &str) -> DbResult<Vec<StoredDocument>> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    async fn find_eq(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> DbResult<Vec<StoredDocument>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|d| d.data.get(field) == Some(value))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}
