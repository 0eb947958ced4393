use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::model::TaskStore;

/// Request timeout. Bounds the startup gate when the remote is unreachable.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Error type for remote store calls
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("server returned {0}")]
    Status(StatusCode),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Server acknowledgement for a document push
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushReceipt {
    pub success: bool,
    pub last_sync: DateTime<Utc>,
}

/// HTTP client for the JSON document store (`/api/data`)
#[derive(Debug, Clone)]
pub struct RemoteStore {
    client: Client,
    base_url: String,
}

impl RemoteStore {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Ok(RemoteStore { client, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetch the full document
    pub async fn fetch(&self) -> Result<TaskStore, ApiError> {
        let resp = self.client.get(self.url("/api/data")).send().await?;
        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status()));
        }
        Ok(resp.json().await?)
    }

    /// Push a full document snapshot (serialized at dispatch time, so a
    /// late completion still carries a complete state — last write wins)
    pub async fn push(&self, snapshot: serde_json::Value) -> Result<PushReceipt, ApiError> {
        let resp = self
            .client
            .post(self.url("/api/data"))
            .json(&snapshot)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status()));
        }
        Ok(resp.json().await?)
    }
}
