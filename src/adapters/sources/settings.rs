//! Per-source connection and retry settings.

use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

use crate::domain::provenance::SourceKind;

/// Connection, retry and caching settings for one external source.
///
/// A source without a base URL is never called; its fallback is used directly.
#[derive(Debug, Clone)]
pub struct SourceSettings {
    pub kind: SourceKind,
    pub base_url: Option<String>,
    pub timeout: Duration,
    /// Additional attempts after the first.
    pub retry_attempts: u32,
    /// Attempt `n` is preceded by `retry_delay * 2^n`.
    pub retry_delay: Duration,
    pub requires_auth_key: bool,
    api_key: Option<Secret<String>>,
    pub api_key_param: String,
    pub cache_ttl: Duration,
}

impl SourceSettings {
    /// Creates unconfigured settings for a source.
    pub fn new(kind: SourceKind) -> Self {
        Self {
            kind,
            base_url: None,
            timeout: Duration::from_secs(5),
            retry_attempts: 2,
            retry_delay: Duration::from_millis(500),
            requires_auth_key: false,
            api_key: None,
            api_key_param: "api_key".to_string(),
            cache_ttl: Duration::from_secs(30 * 60),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retries(mut self, attempts: u32, delay: Duration) -> Self {
        self.retry_attempts = attempts;
        self.retry_delay = delay;
        self
    }

    /// Marks the source as unusable without a key.
    pub fn requiring_auth_key(mut self, required: bool) -> Self {
        self.requires_auth_key = required;
        self
    }

    pub fn with_api_key(mut self, param: impl Into<String>, key: impl Into<String>) -> Self {
        self.api_key_param = param.into();
        self.api_key = Some(Secret::new(key.into()));
        self
    }

    pub fn with_api_key_param(mut self, param: impl Into<String>) -> Self {
        self.api_key_param = param.into();
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Exposes the API key (for making requests).
    pub(crate) fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(|k| k.expose_secret().as_str())
    }

    /// Delay before retry number `attempt` (0-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.retry_delay
            .saturating_mul(2u32.saturating_pow(attempt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_each_attempt() {
        let settings = SourceSettings::new(SourceKind::Weather)
            .with_retries(3, Duration::from_millis(100));
        assert_eq!(settings.backoff(0), Duration::from_millis(100));
        assert_eq!(settings.backoff(1), Duration::from_millis(200));
        assert_eq!(settings.backoff(2), Duration::from_millis(400));
    }

    #[test]
    fn api_key_is_not_debug_printed() {
        let settings =
            SourceSettings::new(SourceKind::Weather).with_api_key("appid", "super-secret");
        assert!(!format!("{:?}", settings).contains("super-secret"));
        assert_eq!(settings.api_key(), Some("super-secret"));
    }
}
