use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ArtifactKind, Category};

/// Result of one successful media-store upload. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedReference {
    /// Publicly resolvable URL returned by the media store.
    pub url: String,
    #[serde(rename = "type")]
    pub kind: ArtifactKind,
    /// Identifier the file was uploaded under (whitespace already normalized).
    #[serde(rename = "publicId")]
    pub public_id: String,
}

/// Insert shape for a bundle. Timestamps are stamped at persist time.
#[derive(Debug, Clone)]
pub struct NewBundle {
    pub title: String,
    pub category: Category,
    /// Ordered: document reference before video reference.
    pub files: Vec<UploadedReference>,
}

impl NewBundle {
    /// Stamp creation and modification time, producing the persisted shape.
    pub fn into_record(self, now: DateTime<Utc>) -> BundleRecord {
        BundleRecord {
            title: self.title,
            category: self.category,
            files: self.files,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Persisted bundle document. The document store supplies the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleRecord {
    pub title: String,
    pub category: Category,
    pub files: Vec<UploadedReference>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A catalogued bundle as read back from the document store.
#[derive(Debug, Clone)]
pub struct PublishedBundle {
    pub id: String,
    pub title: String,
    pub category: Category,
    pub files: Vec<UploadedReference>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PublishedBundle {
    pub fn from_record(id: String, record: BundleRecord) -> Self {
        PublishedBundle {
            id,
            title: record.title,
            category: record.category,
            files: record.files,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    /// Reference of the given kind, if the bundle carries one.
    pub fn reference(&self, kind: ArtifactKind) -> Option<&UploadedReference> {
        self.files.iter().find(|f| f.kind == kind)
    }
}
