use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::OutboundPayload;
use tracing::{debug, info};
use url::Url;

use crate::error::TransportError;

/// Delivers a built payload to a webhook endpoint. One attempt per call.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, endpoint_url: &str, payload: &OutboundPayload) -> Result<(), TransportError>;
}

#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(http: Client) -> Self {
        Self { http }
    }
}

pub fn parse_endpoint(endpoint_url: &str) -> Result<Url, TransportError> {
    let url = Url::parse(endpoint_url.trim()).map_err(|source| TransportError::InvalidUrl {
        url: endpoint_url.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(TransportError::UnsupportedScheme(other.to_string())),
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, endpoint_url: &str, payload: &OutboundPayload) -> Result<(), TransportError> {
        let url = parse_endpoint(endpoint_url)?;
        debug!(host = url.host_str().unwrap_or_default(), "posting webhook payload");

        let response = self.http.post(url).json(payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Rejected(status));
        }
        info!(status = %status, "webhook accepted message");
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
