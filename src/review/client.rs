use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::error::WatchError;

#[derive(Clone)]
pub struct ReviewClient {
    http: Client,
    token: String,
    base_url: String,
}

impl ReviewClient {
    pub fn new(token: String, base_url: String) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            token,
            base_url,
        })
    }

    /// Fetch homework statuses changed since `from_date` (epoch seconds).
    /// Returns the raw payload; shape validation happens in
    /// [`StatusResponse::from_payload`](crate::review::types::StatusResponse).
    pub async fn homework_statuses(&self, from_date: i64) -> Result<Value, WatchError> {
        let url = format!("{}/homework_statuses/", self.base_url);

        let resp = self
            .http
            .get(&url)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(WatchError::Connect)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(WatchError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await.map_err(WatchError::Connect)?;
        let payload = serde_json::from_str(&body).map_err(WatchError::BadJson)?;
        debug!(from_date, "Fetched homework statuses");
        Ok(payload)
    }
}
