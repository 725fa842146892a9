use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use crate::keys::validate_public_id;
use crate::progress::{ProgressObserver, ProgressReport, PROGRESS_CHUNK_BYTES};
use crate::traits::{MediaStore, StorageError, StorageResult, UploadReceipt, UploadRequest};

/// Hosted media API backend.
///
/// Uploads go to `{base_url}/{cloud_name}/upload` as a multipart form carrying
/// the file part, the unsigned upload preset, the public id, and tags. The
/// response is a JSON receipt with the durable public URL.
#[derive(Clone)]
pub struct CloudMediaStore {
    client: reqwest::Client,
    base_url: String,
    cloud_name: String,
    upload_preset: String,
}

/// Receipt shape returned by the media API.
#[derive(Debug, serde::Deserialize)]
struct CloudUploadResponse {
    secure_url: String,
    public_id: String,
    #[serde(default)]
    bytes: u64,
}

impl CloudMediaStore {
    pub fn new(
        base_url: impl Into<String>,
        cloud_name: impl Into<String>,
        upload_preset: impl Into<String>,
    ) -> StorageResult<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| StorageError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(CloudMediaStore {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cloud_name: cloud_name.into(),
            upload_preset: upload_preset.into(),
        })
    }

    fn upload_url(&self) -> String {
        format!("{}/{}/upload", self.base_url, self.cloud_name)
    }

    fn file_url(&self, public_id: &str) -> String {
        format!("{}/{}/files/{}", self.base_url, self.cloud_name, public_id)
    }

    /// Request body that yields the data in fixed chunks, reporting cumulative
    /// byte counts to the observer as each chunk is handed to the transport.
    fn progress_body(data: Bytes, observer: Option<Arc<dyn ProgressObserver>>) -> reqwest::Body {
        reqwest::Body::wrap_stream(chunked_with_progress(data, observer))
    }
}

/// Split the data into fixed chunks, invoking the observer with cumulative
/// counts as each chunk is yielded.
fn chunked_with_progress(
    data: Bytes,
    observer: Option<Arc<dyn ProgressObserver>>,
) -> impl futures::Stream<Item = Result<Bytes, std::io::Error>> + Send + 'static {
    let total = data.len() as u64;
    let mut offset = 0usize;
    let mut chunks = Vec::with_capacity(data.len() / PROGRESS_CHUNK_BYTES + 1);
    while offset < data.len() {
        let end = usize::min(offset + PROGRESS_CHUNK_BYTES, data.len());
        chunks.push(data.slice(offset..end));
        offset = end;
    }

    let mut sent = 0u64;
    futures::stream::iter(chunks.into_iter().map(move |chunk| {
        sent += chunk.len() as u64;
        if let Some(observer) = &observer {
            observer.on_progress(ProgressReport {
                bytes_sent: sent,
                bytes_total: total,
            });
        }
        Ok(chunk)
    }))
}

#[async_trait]
impl MediaStore for CloudMediaStore {
    async fn upload(
        &self,
        request: UploadRequest,
        progress: Option<Arc<dyn ProgressObserver>>,
    ) -> StorageResult<UploadReceipt> {
        validate_public_id(&request.public_id)?;

        let size = request.data.len() as u64;
        let start = std::time::Instant::now();

        let body = Self::progress_body(request.data, progress);
        let part = reqwest::multipart::Part::stream_with_length(body, size)
            .file_name(request.file_name.clone())
            .mime_str(&request.content_type)
            .map_err(|e| {
                StorageError::UploadFailed(format!(
                    "Invalid content type {}: {}",
                    request.content_type, e
                ))
            })?;

        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("upload_preset", self.upload_preset.clone())
            .text("public_id", request.public_id.clone())
            .text("tags", request.tags.join(","));

        let response = self
            .client
            .post(self.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| StorageError::UploadFailed(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(StorageError::UploadFailed(format!(
                "Media store returned {}: {}",
                status, error_text
            )));
        }

        let receipt: CloudUploadResponse = response
            .json()
            .await
            .map_err(|e| StorageError::UploadFailed(format!("Invalid upload receipt: {}", e)))?;

        tracing::info!(
            public_id = %receipt.public_id,
            url = %receipt.secure_url,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Cloud media upload successful"
        );

        Ok(UploadReceipt {
            public_url: receipt.secure_url,
            public_id: receipt.public_id,
            size_bytes: if receipt.bytes > 0 { receipt.bytes } else { size },
        })
    }

    async fn download(&self, public_id: &str) -> StorageResult<Vec<u8>> {
        validate_public_id(public_id)?;

        let response = self
            .client
            .get(self.file_url(public_id))
            .send()
            .await
            .map_err(|e| StorageError::DownloadFailed(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(StorageError::NotFound(public_id.to_string()));
        }
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(StorageError::DownloadFailed(format!(
                "Media store returned {}: {}",
                status, error_text
            )));
        }

        let data = response
            .bytes()
            .await
            .map_err(|e| StorageError::DownloadFailed(format!("Failed to read body: {}", e)))?;

        Ok(data.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct RecordingObserver {
        reports: Mutex<Vec<ProgressReport>>,
    }

    impl ProgressObserver for RecordingObserver {
        fn on_progress(&self, report: ProgressReport) {
            self.reports.lock().unwrap().push(report);
        }
    }

    #[test]
    fn test_upload_and_file_urls() {
        let store =
            CloudMediaStore::new("https://api.media.example.com/v1/", "myclass", "courseware")
                .unwrap();
        assert_eq!(
            store.upload_url(),
            "https://api.media.example.com/v1/myclass/upload"
        );
        assert_eq!(
            store.file_url("Intro_pdf"),
            "https://api.media.example.com/v1/myclass/files/Intro_pdf"
        );
    }

    #[tokio::test]
    async fn test_chunked_stream_reports_cumulative_progress() {
        use futures::StreamExt;

        let observer = Arc::new(RecordingObserver {
            reports: Mutex::new(Vec::new()),
        });
        let data = Bytes::from(vec![0u8; PROGRESS_CHUNK_BYTES * 2 + 10]);
        let total = data.len() as u64;

        let mut stream = Box::pin(chunked_with_progress(data, Some(observer.clone())));
        let mut reassembled = Vec::new();
        while let Some(chunk) = stream.next().await {
            reassembled.extend_from_slice(&chunk.unwrap());
        }
        assert_eq!(reassembled.len() as u64, total);

        let reports = observer.reports.lock().unwrap();
        assert_eq!(reports.len(), 3);
        assert!(reports.windows(2).all(|w| w[0].bytes_sent < w[1].bytes_sent));
        let last = reports.last().unwrap();
        assert_eq!(last.bytes_sent, total);
        assert_eq!(last.percent(), 100);
    }

    #[tokio::test]
    async fn test_upload_rejects_invalid_public_id() {
        let store =
            CloudMediaStore::new("https://api.media.example.com/v1", "myclass", "courseware")
                .unwrap();
        let request = UploadRequest {
            data: Bytes::from_static(b"x"),
            content_type: "application/pdf".to_string(),
            file_name: "a.pdf".to_string(),
            public_id: "../escape".to_string(),
            tags: vec![],
        };
        let err = store.upload(request, None).await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidPublicId(_)));
    }
}
