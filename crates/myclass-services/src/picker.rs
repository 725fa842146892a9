//! File-picking collaborator.
//!
//! A picker resolves the user's choice to a readable local file. Cancellation
//! is `Ok(None)`, not an error.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use myclass_core::models::ArtifactKind;
use myclass_core::AppError;
use tokio::fs;

/// A file handle resolved by the picker.
#[derive(Debug, Clone)]
pub struct PickedFile {
    pub name: String,
    pub content_type: String,
    pub path: PathBuf,
}

/// External collaborator that lets the user choose a local file per kind.
#[async_trait]
pub trait FilePicker: Send + Sync {
    /// Resolve the user's choice. `None` means the user cancelled.
    async fn pick(&self, kind: ArtifactKind) -> Result<Option<PickedFile>, AppError>;
}

/// Picker backed by preconfigured paths, for development and tests.
#[derive(Default)]
pub struct PathPicker {
    paths: HashMap<ArtifactKind, PathBuf>,
}

impl PathPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, kind: ArtifactKind, path: impl Into<PathBuf>) -> Self {
        self.paths.insert(kind, path.into());
        self
    }
}

#[async_trait]
impl FilePicker for PathPicker {
    async fn pick(&self, kind: ArtifactKind) -> Result<Option<PickedFile>, AppError> {
        let Some(path) = self.paths.get(&kind) else {
            return Ok(None);
        };

        if !fs::try_exists(path).await.unwrap_or(false) {
            return Err(AppError::FileAccess(format!(
                "Selected file cannot be accessed: {}",
                path.display()
            )));
        }

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("file")
            .to_string();

        Ok(Some(PickedFile {
            content_type: content_type_for(&name),
            name,
            path: path.clone(),
        }))
    }
}

/// Content type from the file extension. Pickers on real platforms report the
/// MIME type themselves; this fallback covers the kinds we route.
fn content_type_for(name: &str) -> String {
    let extension = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "pdf" => "application/pdf",
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        "mkv" => "video/x-matroska",
        _ => "application/octet-stream",
    }
    .to_string()
}
