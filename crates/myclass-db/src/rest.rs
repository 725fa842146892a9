use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::traits::{DbError, DbResult, DocumentStore, StoredDocument};

/// Hosted document API backend.
///
/// Collections live under `{base_url}/v1/collections/{collection}/documents`;
/// an insert POSTs the JSON payload and returns the generated id, reads GET
/// the same path, optionally narrowed by a `field`/`value` equality pair.
#[derive(Clone)]
pub struct RestDocumentStore {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct InsertResponse {
    id: String,
}

impl RestDocumentStore {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> DbResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| DbError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(RestDocumentStore {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn documents_url(&self, collection: &str) -> String {
        format!("{}/v1/collections/{}/documents", self.base_url, collection)
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("X-API-Key", key.as_str()),
            None => request,
        }
    }

    async fn read_documents(&self, request: reqwest::RequestBuilder) -> DbResult<Vec<StoredDocument>> {
        let response = self
            .apply_auth(request)
            .send()
            .await
            .map_err(|e| DbError::QueryFailed(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(DbError::QueryFailed(format!(
                "Document store returned {}: {}",
                status, error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| DbError::InvalidDocument(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl DocumentStore for RestDocumentStore {
    async fn insert(&self, collection: &str, document: Value) -> DbResult<String> {
        let request = self.client.post(self.documents_url(collection)).json(&document);

        let response = self
            .apply_auth(request)
            .send()
            .await
            .map_err(|e| DbError::InsertFailed(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(DbError::InsertFailed(format!(
                "Document store returned {}: {}",
                status, error_text
            )));
        }

        let body: InsertResponse = response
            .json()
            .await
            .map_err(|e| DbError::InvalidDocument(format!("Failed to parse response: {}", e)))?;

        Ok(body.id)
    }

    async fn get(&self, collection: &str, id: &str) -> DbResult<Option<StoredDocument>> {
        let url = format!("{}/{}", self.documents_url(collection), id);
        let response = self
            .apply_auth(self.client.get(url))
            .send()
            .await
            .map_err(|e| DbError::QueryFailed(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(DbError::QueryFailed(format!(
                "Document store returned {}: {}",
                status, error_text
            )));
        }

        let document: StoredDocument = response
            .json()
            .await
            .map_err(|e| DbError::InvalidDocument(format!("Failed to parse response: {}", e)))?;

        Ok(Some(document))
    }

    async fn list(&self, collection: &str) -> DbResult<Vec<StoredDocument>> {
        self.read_documents(self.client.get(self.documents_url(collection)))
            .await
    }

    async fn find_eq(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> DbResult<Vec<StoredDocument>> {
        // Scalar filter values travel as their plain string form.
        let value_param = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let request = self
            .client
            .get(self.documents_url(collection))
            .query(&[("field", field), ("value", value_param.as_str())]);
        self.read_documents(request).await
    }
}
