//! Configuration module
//!
//! Environment-driven configuration for the media store, the document store,
//! and per-kind file limits.

use std::env;
use std::str::FromStr;

use crate::constants::{DEFAULT_MAX_DOCUMENT_SIZE_MB, DEFAULT_MAX_VIDEO_SIZE_MB};
use crate::models::ArtifactKind;

/// Media-store backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaBackend {
    /// Hosted media API reached over HTTP.
    Cloud,
    /// Local filesystem, for development and tests.
    Local,
}

impl FromStr for MediaBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cloud" => Ok(MediaBackend::Cloud),
            "local" => Ok(MediaBackend::Local),
            other => Err(format!("unknown media backend: {}", other)),
        }
    }
}

/// Document-store backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocStoreBackend {
    /// Hosted document API reached over HTTP.
    Rest,
    /// In-process store, for development and tests.
    Memory,
}

impl FromStr for DocStoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rest" => Ok(DocStoreBackend::Rest),
            "memory" => Ok(DocStoreBackend::Memory),
            other => Err(format!("unknown document-store backend: {}", other)),
        }
    }
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: String,

    // Media store
    pub media_backend: MediaBackend,
    pub media_api_base_url: Option<String>,
    pub media_cloud_name: Option<String>,
    pub media_upload_preset: Option<String>,
    pub local_media_path: Option<String>,
    pub local_media_base_url: Option<String>,

    // Document store
    pub docstore_backend: DocStoreBackend,
    pub docstore_api_url: Option<String>,
    pub docstore_api_key: Option<String>,

    // Per-kind file limits
    pub max_document_size_bytes: usize,
    pub max_video_size_bytes: usize,
    pub document_allowed_extensions: Vec<String>,
    pub document_allowed_content_types: Vec<String>,
    pub video_allowed_extensions: Vec<String>,
    pub video_allowed_content_types: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let media_backend = env::var("MEDIA_BACKEND")
            .unwrap_or_else(|_| "cloud".to_string())
            .parse::<MediaBackend>()
            .map_err(|e| anyhow::anyhow!(e))?;

        let docstore_backend = env::var("DOCSTORE_BACKEND")
            .unwrap_or_else(|_| "rest".to_string())
            .parse::<DocStoreBackend>()
            .map_err(|e| anyhow::anyhow!(e))?;

        let max_document_size_bytes = env::var("MAX_DOCUMENT_SIZE_MB")
            .unwrap_or_else(|_| DEFAULT_MAX_DOCUMENT_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(DEFAULT_MAX_DOCUMENT_SIZE_MB)
            * 1024
            * 1024;

        let max_video_size_bytes = env::var("MAX_VIDEO_SIZE_MB")
            .unwrap_or_else(|_| DEFAULT_MAX_VIDEO_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(DEFAULT_MAX_VIDEO_SIZE_MB)
            * 1024
            * 1024;

        let document_allowed_extensions = parse_list(
            env::var("DOCUMENT_ALLOWED_EXTENSIONS").unwrap_or_else(|_| "pdf".to_string()),
        );
        let document_allowed_content_types = parse_list(
            env::var("DOCUMENT_ALLOWED_CONTENT_TYPES")
                .unwrap_or_else(|_| "application/pdf".to_string()),
        );
        let video_allowed_extensions = parse_list(
            env::var("VIDEO_ALLOWED_EXTENSIONS").unwrap_or_else(|_| "mp4,mov,webm,mkv".to_string()),
        );
        let video_allowed_content_types = parse_list(
            env::var("VIDEO_ALLOWED_CONTENT_TYPES")
                .unwrap_or_else(|_| "video/mp4,video/quicktime,video/webm,video/x-matroska".to_string()),
        );

        Ok(Config {
            environment,
            media_backend,
            media_api_base_url: env::var("MEDIA_API_BASE_URL").ok(),
            media_cloud_name: env::var("MEDIA_CLOUD_NAME").ok(),
            media_upload_preset: env::var("MEDIA_UPLOAD_PRESET").ok(),
            local_media_path: env::var("LOCAL_MEDIA_PATH").ok(),
            local_media_base_url: env::var("LOCAL_MEDIA_BASE_URL").ok(),
            docstore_backend,
            docstore_api_url: env::var("DOCSTORE_API_URL").ok(),
            docstore_api_key: env::var("DOCSTORE_API_KEY").ok(),
            max_document_size_bytes,
            max_video_size_bytes,
            document_allowed_extensions,
            document_allowed_content_types,
            video_allowed_extensions,
            video_allowed_content_types,
        })
    }

    /// Check that the selected backends have the settings they need.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        match self.media_backend {
            MediaBackend::Cloud => {
                if self.media_cloud_name.is_none() {
                    anyhow::bail!("MEDIA_CLOUD_NAME is required for the cloud media backend");
                }
                if self.media_upload_preset.is_none() {
                    anyhow::bail!("MEDIA_UPLOAD_PRESET is required for the cloud media backend");
                }
            }
            MediaBackend::Local => {
                if self.local_media_path.is_none() {
                    anyhow::bail!("LOCAL_MEDIA_PATH is required for the local media backend");
                }
                if self.local_media_base_url.is_none() {
                    anyhow::bail!("LOCAL_MEDIA_BASE_URL is required for the local media backend");
                }
            }
        }

        if self.docstore_backend == DocStoreBackend::Rest && self.docstore_api_url.is_none() {
            anyhow::bail!("DOCSTORE_API_URL is required for the rest document-store backend");
        }

        Ok(())
    }

    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn max_size_bytes(&self, kind: ArtifactKind) -> usize {
        match kind {
            ArtifactKind::Document => self.max_document_size_bytes,
            ArtifactKind::Video => self.max_video_size_bytes,
        }
    }

    pub fn allowed_extensions(&self, kind: ArtifactKind) -> &[String] {
        match kind {
            ArtifactKind::Document => &self.document_allowed_extensions,
            ArtifactKind::Video => &self.video_allowed_extensions,
        }
    }

    pub fn allowed_content_types(&self, kind: ArtifactKind) -> &[String] {
        match kind {
            ArtifactKind::Document => &self.document_allowed_content_types,
            ArtifactKind::Video => &self.video_allowed_content_types,
        }
    }
}

fn parse_list(raw: String) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
