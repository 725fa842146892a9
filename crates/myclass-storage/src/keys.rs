//! Shared public-id and tag derivation.
//!
//! Public id format: `{title}_{kind}` with every whitespace run replaced by a
//! single underscore. Category tags: `category_{category}` lowercased with the
//! same whitespace normalization. The normalization applies only here — the
//! persisted bundle keeps the exact user-entered title and category.

use myclass_core::models::{ArtifactKind, Category};

use crate::traits::{StorageError, StorageResult};

/// Derive the public id an artifact is uploaded under.
pub fn public_id(title: &str, kind: ArtifactKind) -> String {
    normalize_whitespace(&format!("{}_{}", title, kind.as_str()))
}

/// Derive the category tag attached to an upload.
pub fn category_tag(category: Category) -> String {
    format!(
        "category_{}",
        normalize_whitespace(&category.as_str().to_lowercase())
    )
}

/// Reject ids that are empty or could escape a keyed namespace.
pub fn validate_public_id(id: &str) -> StorageResult<()> {
    if id.is_empty() {
        return Err(StorageError::InvalidPublicId(
            "public id must not be empty".to_string(),
        ));
    }
    if id.contains("..") || id.starts_with('/') {
        return Err(StorageError::InvalidPublicId(
            "public id contains invalid characters".to_string(),
        ));
    }
    Ok(())
}

/// Replace each whitespace run with a single underscore.
fn normalize_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_whitespace = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                out.push('_');
            }
            in_whitespace = true;
        } else {
            out.push(ch);
            in_whitespace = false;
        }
    }
    out
}
