use std::sync::Arc;

use bytes::Bytes;
use myclass_core::models::{ArtifactKind, NewBundle, SelectedFile, UploadedReference};
use myclass_core::validation::{validate_publish_input, validate_selected_file};
use myclass_core::{AppError, Config};
use myclass_db::CatalogRepository;
use myclass_storage::{keys, MediaStore, ProgressObserver, UploadRequest};
use tokio::fs;

use crate::picker::PickedFile;

/// The upload-and-publish workflow.
///
/// Holds the current selection (at most one file per artifact kind) and the
/// references produced by the last successful publish. Everything runs on one
/// logical thread; `&mut self` on the mutating operations is the only
/// synchronization needed.
///
/// Known limitation: when an upload or the catalog write fails partway, files
/// already uploaded stay in the media store with no bundle record referencing
/// them. Nothing compensates for those orphans.
pub struct UploadPublisher {
    media: Arc<dyn MediaStore>,
    catalog: CatalogRepository,
    config: Config,
    document: Option<SelectedFile>,
    video: Option<SelectedFile>,
    uploaded: Vec<UploadedReference>,
}

impl UploadPublisher {
    pub fn new(media: Arc<dyn MediaStore>, catalog: CatalogRepository, config: Config) -> Self {
        UploadPublisher {
            media,
            catalog,
            config,
            document: None,
            video: None,
            uploaded: Vec::new(),
        }
    }

    pub fn selection(&self, kind: ArtifactKind) -> Option<&SelectedFile> {
        match kind {
            ArtifactKind::Document => self.document.as_ref(),
            ArtifactKind::Video => self.video.as_ref(),
        }
    }

    /// References produced by the last successful publish. Cleared whenever a
    /// new file is selected.
    pub fn uploaded(&self) -> &[UploadedReference] {
        &self.uploaded
    }

    fn selection_count(&self) -> usize {
        self.document.iter().count() + self.video.iter().count()
    }

    /// Accept a picked file as the current selection of its kind.
    ///
    /// Replaces any previous same-kind selection and invalidates the results
    /// of earlier publishes. On failure the prior selection state is left
    /// unchanged.
    pub async fn select_file(
        &mut self,
        kind: ArtifactKind,
        picked: PickedFile,
    ) -> Result<(), AppError> {
        let metadata = fs::metadata(&picked.path).await.map_err(|e| {
            AppError::FileAccess(format!(
                "Selected file cannot be accessed: {}: {}",
                picked.path.display(),
                e
            ))
        })?;

        let file = SelectedFile {
            name: picked.name,
            size_bytes: metadata.len(),
            content_type: picked.content_type,
            path: picked.path,
            kind,
        };
        validate_selected_file(&file, &self.config)?;

        tracing::debug!(
            kind = %kind,
            name = %file.name,
            size_bytes = file.size_bytes,
            "File selected"
        );

        match kind {
            ArtifactKind::Document => self.document = Some(file),
            ArtifactKind::Video => self.video = Some(file),
        }
        self.uploaded.clear();

        Ok(())
    }

    /// Drop the current selection of the given kind.
    pub fn clear_selection(&mut self, kind: ArtifactKind) {
        match kind {
            ArtifactKind::Document => self.document = None,
            ArtifactKind::Video => self.video = None,
        }
        self.uploaded.clear();
    }

    /// Upload every selected file and persist one bundle record.
    ///
    /// Preconditions are checked in order (category, title, files) and the
    /// first failure wins, before any network call. Uploads are strictly
    /// sequential, document before video. The first failure aborts the rest:
    /// no partial bundle is ever persisted.
    pub async fn publish(
        &mut self,
        title: &str,
        category: &str,
        progress: Option<Arc<dyn ProgressObserver>>,
    ) -> Result<Vec<UploadedReference>, AppError> {
        let category = validate_publish_input(category, title, self.selection_count())?;

        let mut uploaded = Vec::with_capacity(self.selection_count());
        for kind in ArtifactKind::ORDERED {
            let Some(file) = self.selection(kind) else {
                continue;
            };

            let public_id = keys::public_id(title, kind);
            let data = fs::read(&file.path).await.map_err(|e| {
                AppError::FileAccess(format!("Cannot read {}: {}", file.name, e))
            })?;

            let request = UploadRequest {
                data: Bytes::from(data),
                content_type: file.content_type.clone(),
                file_name: file.name.clone(),
                public_id: public_id.clone(),
                tags: vec![keys::category_tag(category)],
            };

            let receipt = self
                .media
                .upload(request, progress.clone())
                .await
                .map_err(|e| AppError::upload(format!("Failed to upload {}", file.name), e))?;

            tracing::info!(
                kind = %kind,
                public_id = %receipt.public_id,
                url = %receipt.public_url,
                "Artifact uploaded"
            );

            uploaded.push(UploadedReference {
                url: receipt.public_url,
                kind,
                public_id: receipt.public_id,
            });
        }

        self.uploaded = uploaded.clone();

        let published = self
            .catalog
            .insert_bundle(NewBundle {
                title: title.to_string(),
                category,
                files: uploaded,
            })
            .await?;

        tracing::info!(
            bundle_id = %published.id,
            title = %published.title,
            file_count = published.files.len(),
            "Publish complete"
        );

        // The selection's upload attempt is over; a new publish starts from a
        // fresh pick.
        self.document = None;
        self.video = None;

        Ok(published.files)
    }
}
