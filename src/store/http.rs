use crate::model::StoreError;
use crate::store::traits::SeriesStore;

use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Reads objects from an S3-compatible bucket at `{base_url}/{key}`.
pub struct HttpSeriesStore {
    client: Client,
    base_url: String,
}

impl HttpSeriesStore {
    pub fn new(base_url: &str) -> Result<Self, StoreError> {
        let client = Client::builder()
            .user_agent("livetrader-agent/0.1")
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| StoreError::Http(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn build_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key.trim_start_matches('/'))
    }
}

#[async_trait::async_trait]
impl SeriesStore for HttpSeriesStore {
    async fn fetch(&self, key: &str) -> Result<Option<String>, StoreError> {
        let url = self.build_url(key);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| StoreError::Http(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if !status.is_success() => Err(StoreError::Status(status.as_u16())),
            _ => response
                .text()
                .await
                .map(Some)
                .map_err(|e| StoreError::Http(e.to_string())),
        }
    }
}
