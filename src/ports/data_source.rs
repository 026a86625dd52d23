//! Data source ports - outbound calls to external health data providers.
//!
//! Two layers:
//!
//! - [`SourceTransport`] performs one raw HTTP GET and classifies failures.
//! - [`HealthDataSources`] returns typed readings and never fails: every
//!   method resolves to live data or a labelled fallback.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::domain::environment::{AirQualityReading, WeatherReading};
use crate::domain::profile::{City, Occupation};
use crate::domain::provenance::{Provenance, SourceKind};
use crate::domain::statistics::{
    CrimeReading, DeathRateReading, HealthAlert, OccupationRateReading,
};

/// One outbound GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRequest {
    pub kind: SourceKind,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub timeout: Duration,
}

impl SourceRequest {
    /// Looks up a query parameter by name.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Performs raw requests against an external source.
#[async_trait]
pub trait SourceTransport: Send + Sync {
    async fn get_json(&self, request: &SourceRequest) -> Result<Value, SourceError>;
}

/// How a source failure is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    /// Network, timeout, 5xx or exhausted rate limit.
    SourceUnavailable,
    /// 4xx other than 429, bad configuration or unusable response.
    SourceRejected,
}

/// Errors from a single source call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("server error: HTTP {status}")]
    ServerError { status: u16 },

    #[error("rate limited")]
    RateLimited,

    #[error("request rejected: HTTP {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("source has no base URL configured")]
    NotConfigured,

    #[error("source requires an API key but none is configured")]
    MissingApiKey,

    #[error("unusable response: {0}")]
    Parse(String),
}

impl SourceError {
    /// Whether another attempt could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SourceError::Timeout
                | SourceError::Network(_)
                | SourceError::ServerError { .. }
                | SourceError::RateLimited
        )
    }

    pub fn category(&self) -> FailureCategory {
        if self.is_retryable() {
            FailureCategory::SourceUnavailable
        } else {
            FailureCategory::SourceRejected
        }
    }

    /// Classifies an HTTP status; `None` for success codes.
    pub fn from_status(status: u16, body: &str) -> Option<Self> {
        match status {
            200..=299 => None,
            429 => Some(SourceError::RateLimited),
            400..=499 => Some(SourceError::Rejected {
                status,
                message: body.chars().take(200).collect(),
            }),
            _ => Some(SourceError::ServerError { status }),
        }
    }
}

/// A reading together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Sourced<T> {
    pub value: T,
    pub provenance: Provenance,
}

impl<T> Sourced<T> {
    pub fn live(kind: SourceKind, value: T) -> Self {
        Self {
            value,
            provenance: Provenance::Live(kind),
        }
    }

    pub fn fallback(kind: SourceKind, value: T) -> Self {
        Self {
            value,
            provenance: Provenance::Fallback(kind),
        }
    }
}

/// Typed access to every external health data source.
///
/// Implementations recover from every source failure with a fallback value,
/// so none of these methods can fail.
#[async_trait]
pub trait HealthDataSources: Send + Sync {
    async fn weather(&self, city: City) -> Sourced<WeatherReading>;

    async fn air_quality(&self, city: City) -> Sourced<AirQualityReading>;

    async fn death_rate(&self, city: City, age: u32) -> Sourced<DeathRateReading>;

    async fn occupation_rate(&self, occupation: Occupation) -> Sourced<OccupationRateReading>;

    async fn crime(&self, city: City) -> Sourced<CrimeReading>;

    async fn health_alerts(&self, city: City) -> Sourced<Vec<HealthAlert>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_errors_are_unavailable() {
        for err in [
            SourceError::Timeout,
            SourceError::Network("reset".into()),
            SourceError::ServerError { status: 503 },
            SourceError::RateLimited,
        ] {
            assert!(err.is_retryable(), "{}", err);
            assert_eq!(err.category(), FailureCategory::SourceUnavailable);
        }
    }

    #[test]
    fn terminal_errors_are_rejected() {
        for err in [
            SourceError::Rejected {
                status: 401,
                message: "bad key".into(),
            },
            SourceError::NotConfigured,
            SourceError::MissingApiKey,
            SourceError::Parse("missing field".into()),
        ] {
            assert!(!err.is_retryable(), "{}", err);
            assert_eq!(err.category(), FailureCategory::SourceRejected);
        }
    }

    #[test]
    fn status_classification() {
        assert_eq!(SourceError::from_status(200, ""), None);
        assert!(matches!(
            SourceError::from_status(429, ""),
            Some(SourceError::RateLimited)
        ));
        assert!(matches!(
            SourceError::from_status(404, "not found"),
            Some(SourceError::Rejected { status: 404, .. })
        ));
        assert_eq!(
            SourceError::from_status(502, ""),
            Some(SourceError::ServerError { status: 502 })
        );
    }

    #[test]
    fn request_param_lookup() {
        let request = SourceRequest {
            kind: SourceKind::Weather,
            url: "http://localhost/weather".into(),
            query: vec![("q".into(), "Delhi,IN".into())],
            timeout: Duration::from_secs(1),
        };
        assert_eq!(request.param("q"), Some("Delhi,IN"));
        assert_eq!(request.param("appid"), None);
    }
}
