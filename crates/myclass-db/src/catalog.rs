//! Bundle catalog repository.

use std::sync::Arc;

use chrono::Utc;
use myclass_core::constants::UPLOADS_COLLECTION;
use myclass_core::models::{BundleRecord, Category, NewBundle, PublishedBundle};
use myclass_core::AppError;

use crate::traits::{DocumentStore, StoredDocument};

/// Domain-typed access to the `uploads` collection.
#[derive(Clone)]
pub struct CatalogRepository {
    store: Arc<dyn DocumentStore>,
}

impl CatalogRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        CatalogRepository { store }
    }

    /// Persist one bundle as a single write, stamping creation and
    /// modification time. The record is never mutated afterwards.
    pub async fn insert_bundle(&self, bundle: NewBundle) -> Result<PublishedBundle, AppError> {
        if bundle.title.trim().is_empty() {
            return Err(AppError::Validation("missing title".to_string()));
        }
        if bundle.files.is_empty() {
            return Err(AppError::Validation("missing files".to_string()));
        }

        let record = bundle.into_record(Utc::now());
        let document = serde_json::to_value(&record)?;

        let id = self
            .store
            .insert(UPLOADS_COLLECTION, document)
            .await
            .map_err(|e| AppError::persist("Failed to save the upload record", e))?;

        tracing::info!(
            bundle_id = %id,
            title = %record.title,
            category = %record.category,
            file_count = record.files.len(),
            "Bundle persisted"
        );

        Ok(PublishedBundle::from_record(id, record))
    }

    /// Fetch every catalogued bundle. Documents that do not decode as bundles
    /// are skipped with a warning; the store is schema-less.
    pub async fn list_all(&self) -> Result<Vec<PublishedBundle>, AppError> {
        let documents = self
            .store
            .list(UPLOADS_COLLECTION)
            .await
            .map_err(|e| AppError::InternalWithSource {
                message: "Failed to fetch the upload catalog".to_string(),
                source: anyhow::Error::new(e),
            })?;

        Ok(documents.into_iter().filter_map(decode_bundle).collect())
    }

    pub async fn list_by_category(
        &self,
        category: Category,
    ) -> Result<Vec<PublishedBundle>, AppError> {
        let bundles = self.list_all().await?;
        Ok(bundles
            .into_iter()
            .filter(|b| b.category == category)
            .collect())
    }

    /// Bundles in one category whose title contains the query,
    /// case-insensitively. An empty query matches everything; the store has no
    /// text index, so filtering happens here.
    pub async fn search(
        &self,
        category: Category,
        title_query: &str,
    ) -> Result<Vec<PublishedBundle>, AppError> {
        let needle = title_query.to_lowercase();
        let bundles = self.list_by_category(category).await?;
        Ok(bundles
            .into_iter()
            .filter(|b| needle.is_empty() || b.title.to_lowercase().contains(&needle))
            .collect())
    }
}

fn decode_bundle(doc: StoredDocument) -> Option<PublishedBundle> {
    match serde_json::from_value::<BundleRecord>(doc.data) {
        Ok(record) => Some(PublishedBundle::from_record(doc.id, record)),
        Err(e) => {
            tracing::warn!(document_id = %doc.id, error = %e, "Skipping malformed bundle document");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryDocumentStore;
    use myclass_core::models::{ArtifactKind, UploadedReference};
    use serde_json::json;

    fn repo() -> CatalogRepository {
        CatalogRepository::new(Arc::new(MemoryDocumentStore::new()))
    }

    fn new_bundle(title: &str, category: Category) -> NewBundle {
        NewBundle {
            title: title.to_string(),
            category,
            files: vec![UploadedReference {
                url: format!("https://media.example.com/{}_pdf", title),
                kind: ArtifactKind::Document,
                public_id: format!("{}_pdf", title),
            }],
        }
    }

    #[tokio::test]
    async fn test_insert_and_list_round_trip() {
        let repo = repo();
        let published = repo
            .insert_bundle(new_bundle("Intro", Category::WebDevelopment))
            .await
            .unwrap();
        assert!(!published.id.is_empty());
        assert_eq!(published.created_at, published.updated_at);

        let all = repo.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title, "Intro");
        assert_eq!(all[0].files[0].public_id, "Intro_pdf");
    }

    #[tokio::test]
    async fn test_insert_rejects_empty_bundles() {
        let repo = repo();

        let mut no_files = new_bundle("Intro", Category::Networking);
        no_files.files.clear();
        assert!(repo.insert_bundle(no_files).await.is_err());

        let blank_title = new_bundle("   ", Category::Networking);
        assert!(repo.insert_bundle(blank_title).await.is_err());
    }

    #[tokio::test]
    async fn test_category_partition_and_title_search() {
        let repo = repo();
        repo.insert_bundle(new_bundle("Intro to HTTP", Category::Networking))
            .await
            .unwrap();
        repo.insert_bundle(new_bundle("Advanced HTTP", Category::Networking))
            .await
            .unwrap();
        repo.insert_bundle(new_bundle("Intro to CSS", Category::WebDevelopment))
            .await
            .unwrap();

        let networking = repo.list_by_category(Category::Networking).await.unwrap();
        assert_eq!(networking.len(), 2);

        let hits = repo.search(Category::Networking, "intro").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Intro to HTTP");

        let all_in_category = repo.search(Category::Networking, "").await.unwrap();
        assert_eq!(all_in_category.len(), 2);
    }

    #[tokio::test]
    async fn test_malformed_documents_are_skipped() {
        let store = Arc::new(MemoryDocumentStore::new());
        store
            .insert(UPLOADS_COLLECTION, json!({"unrelated": true}))
            .await
            .unwrap();
        let repo = CatalogRepository::new(store);

        repo.insert_bundle(new_bundle("Intro", Category::CloudComputing))
            .await
            .unwrap();

        let all = repo.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
    }
}
