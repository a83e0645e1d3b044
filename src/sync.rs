use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::SyncConfig;

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("upstream returned status {0}")]
    Status(u16),
    #[error("invalid upstream payload: {0}")]
    Payload(String),
}

/// Remote job that pulls third-party reviews into their own store.
#[async_trait]
pub trait SyncTrigger: Send + Sync {
    /// Fires the job and returns the raw response body.
    async fn trigger(&self) -> Result<String, UpstreamError>;
}

pub fn http_client(timeout_secs: u64) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
}

#[derive(Clone)]
pub struct HttpSyncTrigger {
    client: reqwest::Client,
    endpoint: String,
    bearer_token: Option<String>,
}

impl HttpSyncTrigger {
    pub fn new(client: reqwest::Client, endpoint: &str, bearer_token: Option<&str>) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
            bearer_token: bearer_token.map(str::to_string),
        }
    }

    /// `None` when no endpoint is configured.
    pub fn from_config(client: reqwest::Client, config: &SyncConfig) -> Option<Self> {
        config
            .endpoint
            .as_deref()
            .map(|endpoint| Self::new(client, endpoint, config.bearer_token.as_deref()))
    }
}

#[async_trait]
impl SyncTrigger for HttpSyncTrigger {
    async fn trigger(&self) -> Result<String, UpstreamError> {
        let mut req = self.client.post(&self.endpoint);
        if let Some(token) = &self.bearer_token {
            req = req.bearer_auth(token);
        }

        let res = req.send().await?;
        let status = res.status();
        let body = res.text().await?;
        if !status.is_success() {
            warn!(status = status.as_u16(), "sync trigger returned non-success");
            return Err(UpstreamError::Status(status.as_u16()));
        }

        debug!(bytes = body.len(), "sync trigger responded");
        Ok(body)
    }
}
