//! reqwest-backed upstream client
//!
//! Joins an [`UpstreamRequest`] onto the configured base URL, enforces the
//! per-call timeout, and normalizes every failure into an [`UpstreamError`].

use async_trait::async_trait;
use faction_common::UpstreamConfig;
use faction_core::{UpstreamClient, UpstreamError, UpstreamRequest, UpstreamResult};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, instrument, warn};

/// Upstream client over HTTP
#[derive(Debug, Clone)]
pub struct HttpUpstreamClient {
    client: Client,
    base_url: String,
}

impl HttpUpstreamClient {
    /// Create a client from upstream configuration
    ///
    /// # Errors
    /// Returns `UpstreamError::Transport` if the HTTP client cannot be built
    pub fn new(config: &UpstreamConfig) -> UpstreamResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| UpstreamError::Transport(e.without_url().to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, request: &UpstreamRequest) -> String {
        format!("{}{}", self.base_url, request.path())
    }
}

#[async_trait]
impl UpstreamClient for HttpUpstreamClient {
    #[instrument(skip(self), err(Display))]
    async fn fetch(&self, request: &UpstreamRequest) -> UpstreamResult<Value> {
        let response = self
            .client
            .get(self.url(request))
            .query(request.query())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        debug!(status = %status, bytes = body.len(), "Upstream responded");

        if !status.is_success() {
            let payload = serde_json::from_slice::<Value>(&body).ok();
            warn!(status = %status, has_payload = payload.is_some(), "Upstream returned error status");
            return Err(status_error(status, payload));
        }

        serde_json::from_slice(&body).map_err(|e| UpstreamError::Decode(e.to_string()))
    }
}

/// Build the error for a non-2xx response, preferring the upstream's own message
fn status_error(status: StatusCode, payload: Option<Value>) -> UpstreamError {
    let message = payload
        .as_ref()
        .and_then(UpstreamError::from_error_body)
        .and_then(|err| match err {
            UpstreamError::Api { message, .. } => Some(message),
            _ => None,
        })
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown").to_string());

    UpstreamError::Status {
        status: status.as_u16(),
        message,
        payload,
    }
}

/// reqwest errors embed the request URL, which carries the API key
fn map_reqwest_error(err: reqwest::Error) -> UpstreamError {
    if err.is_timeout() {
        UpstreamError::Timeout
    } else {
        UpstreamError::Transport(err.without_url().to_string())
    }
}
