//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `HEALTH_RISK` prefix and nested values use double underscores as separators.
//!
//! Every section has defaults, so an empty environment yields a service that
//! answers every request from fallback and static data.
//!
//! # Example
//!
//! ```no_run
//! use health_risk_advisor::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.bind_addr());
//! ```

mod ai;
mod analysis;
mod error;
mod server;
mod sources;

pub use ai::AiConfig;
pub use analysis::{AnalysisConfig, CacheConfig, ProfilesConfig};
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use sources::{ResolvedSourceConfig, SourceConfig, SourcesConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// External data sources (weather, air quality, statistics, news)
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Source response cache
    #[serde(default)]
    pub cache: CacheConfig,

    /// Aggregation and narrative timeouts
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Narrative text provider
    #[serde(default)]
    pub ai: AiConfig,

    /// User profile store
    #[serde(default)]
    pub profiles: ProfilesConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `HEALTH_RISK` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `HEALTH_RISK__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `HEALTH_RISK__SOURCES__WEATHER__API_KEY=...` -> `sources.weather.api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("HEALTH_RISK")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.sources.validate()?;
        self.cache.validate()?;
        self.analysis.validate()?;
        self.ai.validate()?;
        Ok(())
    }
}
