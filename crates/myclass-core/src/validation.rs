//! Input validation helpers.
//!
//! Publish preconditions are checked in a fixed order (category, then title,
//! then files) and the first failure wins; callers rely on the exact messages.

use std::str::FromStr;

use crate::config::Config;
use crate::error::AppError;
use crate::models::{Category, SelectedFile};

/// Validate the publish inputs and parse the category.
///
/// Order matters: category, then title, then selection presence. An unknown
/// category string is reported the same way as an absent one.
pub fn validate_publish_input(
    category: &str,
    title: &str,
    selection_count: usize,
) -> Result<Category, AppError> {
    let category = Category::from_str(category)
        .map_err(|_| AppError::Validation("missing category".to_string()))?;

    if title.trim().is_empty() {
        return Err(AppError::Validation("missing title".to_string()));
    }

    if selection_count == 0 {
        return Err(AppError::Validation("missing files".to_string()));
    }

    Ok(category)
}

/// Check a picked file against the per-kind limits before accepting it as the
/// current selection.
pub fn validate_selected_file(file: &SelectedFile, config: &Config) -> Result<(), AppError> {
    let max = config.max_size_bytes(file.kind);
    if file.size_bytes as usize > max {
        return Err(AppError::Validation(format!(
            "{} file exceeds the {} MB limit",
            file.kind,
            max / (1024 * 1024)
        )));
    }

    let allowed_extensions = config.allowed_extensions(file.kind);
    match file.extension() {
        Some(ext) if allowed_extensions.iter().any(|a| *a == ext) => {}
        Some(ext) => {
            return Err(AppError::Validation(format!(
                "extension .{} is not allowed for {} files",
                ext, file.kind
            )));
        }
        None => {
            return Err(AppError::Validation(format!(
                "{} file has no extension",
                file.kind
            )));
        }
    }

    let content_type = file.content_type.to_lowercase();
    if !config
        .allowed_content_types(file.kind)
        .iter()
        .any(|a| *a == content_type)
    {
        return Err(AppError::Validation(format!(
            "content type {} is not allowed for {} files",
            file.content_type, file.kind
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DocStoreBackend, MediaBackend};
    use crate::models::ArtifactKind;
    use std::path::PathBuf;

    fn test_config() -> Config {
        Config {
            environment: "test".to_string(),
            media_backend: MediaBackend::Local,
            media_api_base_url: None,
            media_cloud_name: None,
            media_upload_preset: None,
            local_media_path: Some("/tmp".to_string()),
            local_media_base_url: Some("http://localhost:3000/media".to_string()),
            docstore_backend: DocStoreBackend::Memory,
            docstore_api_url: None,
            docstore_api_key: None,
            max_document_size_bytes: 1024,
            max_video_size_bytes: 2048,
            document_allowed_extensions: vec!["pdf".to_string()],
            document_allowed_content_types: vec!["application/pdf".to_string()],
            video_allowed_extensions: vec!["mp4".to_string()],
            video_allowed_content_types: vec!["video/mp4".to_string()],
        }
    }

    fn pdf_file(name: &str, size: u64, content_type: &str) -> SelectedFile {
        SelectedFile {
            name: name.to_string(),
            size_bytes: size,
            content_type: content_type.to_string(),
            path: PathBuf::from("/tmp/f"),
            kind: ArtifactKind::Document,
        }
    }

    #[test]
    fn test_category_checked_before_title() {
        let err = validate_publish_input("", "", 0).unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: missing category");

        let err = validate_publish_input("Gardening", "Intro", 1).unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: missing category");
    }

    #[test]
    fn test_title_checked_before_files() {
        let err = validate_publish_input("Networking", "  ", 0).unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: missing title");
    }

    #[test]
    fn test_missing_files_last() {
        let err = validate_publish_input("Networking", "Intro", 0).unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: missing files");
    }

    #[test]
    fn test_valid_input_parses_category() {
        let category = validate_publish_input("Cloud Computing", "Intro", 1).unwrap();
        assert_eq!(category, Category::CloudComputing);
    }

    #[test]
    fn test_selected_file_size_limit() {
        let config = test_config();
        let ok = pdf_file("a.pdf", 1024, "application/pdf");
        assert!(validate_selected_file(&ok, &config).is_ok());

        let too_big = pdf_file("a.pdf", 1025, "application/pdf");
        assert!(validate_selected_file(&too_big, &config).is_err());
    }

    #[test]
    fn test_selected_file_extension_and_content_type() {
        let config = test_config();

        let wrong_ext = pdf_file("a.docx", 100, "application/pdf");
        assert!(validate_selected_file(&wrong_ext, &config).is_err());

        let no_ext = pdf_file("a", 100, "application/pdf");
        assert!(validate_selected_file(&no_ext, &config).is_err());

        let wrong_type = pdf_file("a.pdf", 100, "text/plain");
        assert!(validate_selected_file(&wrong_type, &config).is_err());

        // Content-type comparison is case-insensitive.
        let upper = pdf_file("a.pdf", 100, "Application/PDF");
        assert!(validate_selected_file(&upper, &config).is_ok());
    }
}
