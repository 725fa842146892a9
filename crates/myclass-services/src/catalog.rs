//! Catalog browsing service.

use std::sync::Arc;

use myclass_core::models::{Category, PublishedBundle, UploadedReference};
use myclass_core::AppError;
use myclass_db::CatalogRepository;
use myclass_storage::{MediaStore, StorageError};

/// Read-only view over the published catalog.
///
/// Fetches the whole catalog and filters client-side; the document store
/// offers no text index. Holds the last fetched snapshot so category and
/// search filters don't refetch.
pub struct CatalogBrowser {
    catalog: CatalogRepository,
    media: Arc<dyn MediaStore>,
    bundles: Vec<PublishedBundle>,
}

impl CatalogBrowser {
    pub fn new(catalog: CatalogRepository, media: Arc<dyn MediaStore>) -> Self {
        CatalogBrowser {
            catalog,
            media,
            bundles: Vec::new(),
        }
    }

    /// Refetch the catalog snapshot.
    pub async fn refresh(&mut self) -> Result<&[PublishedBundle], AppError> {
        self.bundles = self.catalog.list_all().await?;
        tracing::debug!(bundle_count = self.bundles.len(), "Catalog refreshed");
        Ok(&self.bundles)
    }

    /// Bundles in one category, optionally narrowed by a case-insensitive
    /// title substring.
    pub fn filtered(&self, category: Category, title_query: &str) -> Vec<&PublishedBundle> {
        let needle = title_query.to_lowercase();
        self.bundles
            .iter()
            .filter(|b| b.category == category)
            .filter(|b| needle.is_empty() || b.title.to_lowercase().contains(&needle))
            .collect()
    }

    /// Fetch an artifact's bytes for offline viewing.
    pub async fn fetch_artifact(&self, reference: &UploadedReference) -> Result<Vec<u8>, AppError> {
        self.media
            .download(&reference.public_id)
            .await
            .map_err(|e| match e {
                StorageError::NotFound(id) => AppError::NotFound(format!("Artifact {}", id)),
                other => AppError::InternalWithSource {
                    message: format!("Failed to download {}", reference.public_id),
                    source: anyhow::Error::new(other),
                },
            })
    }
}
