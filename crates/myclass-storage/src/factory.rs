use std::sync::Arc;

use myclass_core::{Config, MediaBackend};

use crate::{CloudMediaStore, LocalMediaStore, MediaStore, StorageError, StorageResult};

/// Default endpoint of the hosted media API.
const DEFAULT_MEDIA_API_BASE_URL: &str = "https://api.cloudinary.com/v1_1";

/// Create a media-store backend based on configuration
pub async fn create_media_store(config: &Config) -> StorageResult<Arc<dyn MediaStore>> {
    match config.media_backend {
        MediaBackend::Cloud => {
            let cloud_name = config.media_cloud_name.clone().ok_or_else(|| {
                StorageError::ConfigError("MEDIA_CLOUD_NAME not configured".to_string())
            })?;
            let upload_preset = config.media_upload_preset.clone().ok_or_else(|| {
                StorageError::ConfigError("MEDIA_UPLOAD_PRESET not configured".to_string())
            })?;
            let base_url = config
                .media_api_base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_MEDIA_API_BASE_URL.to_string());

            let store = CloudMediaStore::new(base_url, cloud_name, upload_preset)?;
            Ok(Arc::new(store))
        }

        MediaBackend::Local => {
            let base_path = config.local_media_path.clone().ok_or_else(|| {
                StorageError::ConfigError("LOCAL_MEDIA_PATH not configured".to_string())
            })?;
            let base_url = config.local_media_base_url.clone().ok_or_else(|| {
                StorageError::ConfigError("LOCAL_MEDIA_BASE_URL not configured".to_string())
            })?;

            let store = LocalMediaStore::new(base_path, base_url).await?;
            Ok(Arc::new(store))
        }
    }
}
