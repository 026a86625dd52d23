//! Resilient fetch: cache, retry with exponential backoff, then fallback.
//!
//! Every concrete source is a [`SourceStrategy`] describing only what is
//! specific to it (request shape, response parsing, fallback value). The
//! protocol around it lives here once:
//!
//! 1. Build a cache key from the source name and sorted parameters.
//! 2. On a miss, call the source, retrying retryable failures up to
//!    `retry_attempts` more times with `retry_delay * 2^attempt` between.
//! 3. On terminal failure return the strategy's fallback, labelled as such.
//!
//! Fallback values are never cached.

use std::sync::Arc;
use std::time::Instant;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::time;

use super::settings::SourceSettings;
use crate::domain::provenance::SourceKind;
use crate::ports::{
    cache_key, with_cache, Cache, FailureCategory, SourceError, SourceRequest, SourceTransport,
    Sourced,
};

/// What is specific to one external source.
pub trait SourceStrategy: Send + Sync {
    type Params: Send + Sync;
    type Output: Serialize + DeserializeOwned + Send;

    fn kind(&self) -> SourceKind;

    /// Parameters identifying a distinct response, for the cache key.
    fn cache_params(&self, params: &Self::Params) -> Vec<(&'static str, String)>;

    /// Path appended to the base URL.
    fn path(&self, params: &Self::Params) -> String;

    fn query(&self, params: &Self::Params) -> Vec<(String, String)>;

    fn parse(&self, body: Value, params: &Self::Params) -> Result<Self::Output, SourceError>;

    fn fallback(&self, params: &Self::Params) -> Self::Output;
}

/// Runs source strategies against a transport and a shared cache.
#[derive(Clone)]
pub struct ResilientFetcher {
    transport: Arc<dyn SourceTransport>,
    cache: Arc<dyn Cache>,
}

impl ResilientFetcher {
    pub fn new(transport: Arc<dyn SourceTransport>, cache: Arc<dyn Cache>) -> Self {
        Self { transport, cache }
    }

    /// Returns live data when possible, otherwise the strategy's fallback.
    pub async fn fetch<S: SourceStrategy>(
        &self,
        strategy: &S,
        settings: &SourceSettings,
        params: &S::Params,
    ) -> Sourced<S::Output> {
        let kind = strategy.kind();
        let key = cache_key(kind.as_str(), &strategy.cache_params(params));
        let started = Instant::now();

        let result = with_cache(self.cache.as_ref(), &key, settings.cache_ttl, || {
            self.fetch_live(strategy, settings, params)
        })
        .await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(value) => {
                tracing::debug!(source = %kind, elapsed_ms, "Source fetch succeeded");
                Sourced::live(kind, value)
            }
            Err(err) => {
                match (&err, err.category()) {
                    (SourceError::NotConfigured, _) => {
                        tracing::debug!(source = %kind, "Source not configured, using fallback");
                    }
                    (_, FailureCategory::SourceUnavailable) => {
                        tracing::warn!(source = %kind, elapsed_ms, error = %err, "Source unavailable, using fallback");
                    }
                    (_, FailureCategory::SourceRejected) => {
                        tracing::error!(source = %kind, elapsed_ms, error = %err, "Source rejected request, using fallback");
                    }
                }
                Sourced::fallback(kind, strategy.fallback(params))
            }
        }
    }

    async fn fetch_live<S: SourceStrategy>(
        &self,
        strategy: &S,
        settings: &SourceSettings,
        params: &S::Params,
    ) -> Result<S::Output, SourceError> {
        let request = Self::build_request(strategy, settings, params)?;
        let mut attempt = 0;

        loop {
            let outcome = match time::timeout(request.timeout, self.transport.get_json(&request)).await
            {
                Err(_) => Err(SourceError::Timeout),
                Ok(Err(err)) => Err(err),
                Ok(Ok(body)) => strategy.parse(body, params),
            };

            match outcome {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && attempt < settings.retry_attempts => {
                    let delay = settings.backoff(attempt);
                    tracing::debug!(
                        source = %request.kind,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Retrying source request"
                    );
                    time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn build_request<S: SourceStrategy>(
        strategy: &S,
        settings: &SourceSettings,
        params: &S::Params,
    ) -> Result<SourceRequest, SourceError> {
        let base_url = settings
            .base_url
            .as_deref()
            .ok_or(SourceError::NotConfigured)?;

        let mut query = strategy.query(params);
        match settings.api_key() {
            Some(key) => query.push((settings.api_key_param.clone(), key.to_string())),
            None if settings.requires_auth_key => return Err(SourceError::MissingApiKey),
            None => {}
        }

        Ok(SourceRequest {
            kind: strategy.kind(),
            url: format!("{}{}", base_url, strategy.path(params)),
            query,
            timeout: settings.timeout,
        })
    }
}
