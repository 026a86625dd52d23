//! HTTP transport backed by reqwest.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;

use crate::ports::{SourceError, SourceRequest, SourceTransport};

/// Source transport performing real HTTP GETs.
///
/// The per-request timeout comes from [`SourceRequest::timeout`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl ReqwestTransport {
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Uses an existing client (shared connection pool).
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    fn map_send_error(err: reqwest::Error) -> SourceError {
        if err.is_timeout() {
            SourceError::Timeout
        } else if err.is_connect() {
            SourceError::Network(format!("Connection failed: {}", err))
        } else {
            SourceError::Network(err.to_string())
        }
    }

    async fn check_status(response: Response) -> Result<Response, SourceError> {
        let status = response.status().as_u16();
        if response.status().is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();

        match SourceError::from_status(status, &body) {
            Some(err) => Err(err),
            None => Err(SourceError::Network(format!("Unexpected status {}", status))),
        }
    }
}

#[async_trait]
impl SourceTransport for ReqwestTransport {
    async fn get_json(&self, request: &SourceRequest) -> Result<Value, SourceError> {
        let response = self
            .client
            .get(&request.url)
            .query(&request.query)
            .timeout(request.timeout)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        let response = Self::check_status(response).await?;

        response
            .json::<Value>()
            .await
            .map_err(|e| SourceError::Parse(format!("Failed to parse response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::provenance::SourceKind;
    use std::time::Duration;

    #[tokio::test]
    async fn unreachable_host_is_a_retryable_error() {
        let transport = ReqwestTransport::new();
        let request = SourceRequest {
            kind: SourceKind::Weather,
            // Reserved port on loopback; nothing listens there.
            url: "http://127.0.0.1:9/weather".to_string(),
            query: Vec::new(),
            timeout: Duration::from_millis(500),
        };

        let err = transport.get_json(&request).await.unwrap_err();
        assert!(err.is_retryable(), "unexpected error: {}", err);
    }
}
