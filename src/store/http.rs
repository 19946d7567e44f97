//! HTTP client for a remote `drawings` collection.
//!
//! Thin wrapper over the service's `/api/drawings` endpoints. The remote side
//! only filters by latitude; callers apply the longitude filter.

use std::time::Duration;

use serde::Deserialize;

use super::{DrawingDocument, DrawingId, DrawingStore, PersistenceError, SavedDrawing};
use crate::config::ClientConfig;

pub struct HttpDrawingStore {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct CreatedResponse {
    id: DrawingId,
}

impl HttpDrawingStore {
    /// # Errors
    ///
    /// Returns `Request` if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, PersistenceError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| PersistenceError::Request(e.to_string()))?;
        Ok(Self { http, base_url: config.base_url.trim_end_matches('/').to_string() })
    }

    fn collection_url(&self) -> String {
        format!("{}/api/drawings", self.base_url)
    }
}

#[async_trait::async_trait]
impl DrawingStore for HttpDrawingStore {
    async fn insert(&self, drawing: DrawingDocument) -> Result<DrawingId, PersistenceError> {
        let response = self
            .http
            .post(self.collection_url())
            .json(&drawing)
            .send()
            .await
            .map_err(|e| PersistenceError::Request(e.to_string()))?;

        let text = read_success_body(response).await?;
        let created: CreatedResponse = serde_json::from_str(&text)
            .map_err(|e| PersistenceError::Malformed { id: "<create response>".into(), reason: e.to_string() })?;
        Ok(created.id)
    }

    async fn query_lat_range(&self, lat_min: f64, lat_max: f64) -> Result<Vec<SavedDrawing>, PersistenceError> {
        let response = self
            .http
            .get(self.collection_url())
            .query(&[("lat_min", lat_min), ("lat_max", lat_max)])
            .send()
            .await
            .map_err(|e| PersistenceError::Request(e.to_string()))?;

        let text = read_success_body(response).await?;
        parse_drawings(&text)
    }
}

async fn read_success_body(response: reqwest::Response) -> Result<String, PersistenceError> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| PersistenceError::Request(e.to_string()))?;
    if !status.is_success() {
        return Err(PersistenceError::Status { status: status.as_u16(), body: text });
    }
    Ok(text)
}

fn parse_drawings(json: &str) -> Result<Vec<SavedDrawing>, PersistenceError> {
    serde_json::from_str(json)
        .map_err(|e| PersistenceError::Malformed { id: "<query response>".into(), reason: e.to_string() })
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
