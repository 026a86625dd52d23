//! External data source configuration
//!
//! Every field is optional so a single environment variable (for example
//! `HEALTH_RISK__SOURCES__WEATHER__API_KEY`) can be set without restating
//! the rest. Unset fields resolve to the per-source defaults below.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::provenance::SourceKind;

const MAX_RETRY_ATTEMPTS: u32 = 5;

/// Overrides for one source, as read from the environment
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceConfig {
    /// Base URL; an empty string disables the source
    pub base_url: Option<String>,
    pub timeout_ms: Option<u64>,
    /// Additional attempts after the first
    pub retry_attempts: Option<u32>,
    /// Backoff base; attempt `n` waits `retry_delay_ms * 2^n`
    pub retry_delay_ms: Option<u64>,
    pub requires_auth_key: Option<bool>,
    pub api_key: Option<String>,
    /// Query parameter name the key is sent as
    pub api_key_param: Option<String>,
    pub cache_ttl_secs: Option<u64>,
}

/// Fully resolved settings for one source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSourceConfig {
    pub kind: SourceKind,
    pub base_url: Option<String>,
    pub timeout: Duration,
    pub retry_attempts: u32,
    pub retry_delay: Duration,
    pub requires_auth_key: bool,
    pub api_key: Option<String>,
    pub api_key_param: String,
    pub cache_ttl: Duration,
}

/// Configuration for every outbound source
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourcesConfig {
    #[serde(default)]
    pub weather: SourceConfig,
    #[serde(default)]
    pub air_quality: SourceConfig,
    #[serde(default)]
    pub death_rate: SourceConfig,
    #[serde(default)]
    pub occupation: SourceConfig,
    #[serde(default)]
    pub crime: SourceConfig,
    #[serde(default)]
    pub health_alerts: SourceConfig,
}

struct SourceDefaults {
    base_url: Option<&'static str>,
    requires_auth_key: bool,
    api_key_param: &'static str,
    cache_ttl_secs: u64,
}

fn defaults_for(kind: SourceKind) -> SourceDefaults {
    match kind {
        SourceKind::Weather => SourceDefaults {
            base_url: Some("https://api.openweathermap.org/data/2.5"),
            requires_auth_key: true,
            api_key_param: "appid",
            cache_ttl_secs: 30 * 60,
        },
        SourceKind::AirQuality => SourceDefaults {
            base_url: Some("https://api.waqi.info"),
            requires_auth_key: true,
            api_key_param: "token",
            cache_ttl_secs: 30 * 60,
        },
        SourceKind::DeathRate => SourceDefaults {
            base_url: Some("https://api.data.gov.in"),
            requires_auth_key: true,
            api_key_param: "api-key",
            cache_ttl_secs: 24 * 60 * 60,
        },
        SourceKind::Occupation => SourceDefaults {
            base_url: None,
            requires_auth_key: false,
            api_key_param: "api_key",
            cache_ttl_secs: 24 * 60 * 60,
        },
        SourceKind::Crime => SourceDefaults {
            base_url: None,
            requires_auth_key: false,
            api_key_param: "api_key",
            cache_ttl_secs: 24 * 60 * 60,
        },
        SourceKind::HealthAlerts => SourceDefaults {
            base_url: Some("https://newsapi.org/v2"),
            requires_auth_key: true,
            api_key_param: "apiKey",
            cache_ttl_secs: 60 * 60,
        },
    }
}

fn default_timeout_ms() -> u64 {
    5_000
}

fn default_retry_attempts() -> u32 {
    2
}

fn default_retry_delay_ms() -> u64 {
    500
}

impl SourcesConfig {
    fn get(&self, kind: SourceKind) -> &SourceConfig {
        match kind {
            SourceKind::Weather => &self.weather,
            SourceKind::AirQuality => &self.air_quality,
            SourceKind::DeathRate => &self.death_rate,
            SourceKind::Occupation => &self.occupation,
            SourceKind::Crime => &self.crime,
            SourceKind::HealthAlerts => &self.health_alerts,
        }
    }

    /// Merges overrides for `kind` with its defaults.
    pub fn resolve(&self, kind: SourceKind) -> ResolvedSourceConfig {
        let overrides = self.get(kind);
        let defaults = defaults_for(kind);

        let base_url = match &overrides.base_url {
            Some(url) if url.trim().is_empty() => None,
            Some(url) => Some(url.trim().trim_end_matches('/').to_string()),
            None => defaults.base_url.map(str::to_string),
        };
        let api_key = overrides
            .api_key
            .as_ref()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        ResolvedSourceConfig {
            kind,
            base_url,
            timeout: Duration::from_millis(overrides.timeout_ms.unwrap_or_else(default_timeout_ms)),
            retry_attempts: overrides
                .retry_attempts
                .unwrap_or_else(default_retry_attempts),
            retry_delay: Duration::from_millis(
                overrides
                    .retry_delay_ms
                    .unwrap_or_else(default_retry_delay_ms),
            ),
            requires_auth_key: overrides
                .requires_auth_key
                .unwrap_or(defaults.requires_auth_key),
            api_key,
            api_key_param: overrides
                .api_key_param
                .clone()
                .unwrap_or_else(|| defaults.api_key_param.to_string()),
            cache_ttl: Duration::from_secs(
                overrides.cache_ttl_secs.unwrap_or(defaults.cache_ttl_secs),
            ),
        }
    }

    /// Validate every source
    pub fn validate(&self) -> Result<(), ValidationError> {
        for kind in SourceKind::all() {
            let resolved = self.resolve(*kind);
            let name = kind.as_str();
            if let Some(url) = &resolved.base_url {
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    return Err(ValidationError::InvalidSourceUrl(name));
                }
            }
            if resolved.timeout.is_zero() || resolved.timeout > Duration::from_secs(60) {
                return Err(ValidationError::InvalidSourceTimeout(name));
            }
            if resolved.retry_attempts > MAX_RETRY_ATTEMPTS {
                return Err(ValidationError::TooManyRetries(name));
            }
        }
        Ok(())
    }
}
