//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid base URL for source '{0}': must start with http:// or https://")]
    InvalidSourceUrl(&'static str),

    #[error("Invalid timeout for source '{0}'")]
    InvalidSourceTimeout(&'static str),

    #[error("Retry attempts for source '{0}' exceed the maximum of 5")]
    TooManyRetries(&'static str),

    #[error("Cache sweep interval must be at least one second")]
    InvalidSweepInterval,

    #[error("Analysis timeouts must be between 1ms and 120000ms")]
    InvalidAnalysisTimeout,

    #[error("Invalid AI base URL")]
    InvalidAiBaseUrl,

    #[error("Invalid AI request timeout")]
    InvalidAiTimeout,
}
