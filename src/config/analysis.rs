//! Cache, analysis pipeline and profile store configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ValidationError;

/// Cache configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Interval between background sweeps of expired entries
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

impl CacheConfig {
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.sweep_interval_secs == 0 {
            return Err(ValidationError::InvalidSweepInterval);
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}

/// Analysis pipeline configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Upper bound for one full collection pass before degrading to basic mode
    #[serde(default = "default_aggregation_timeout")]
    pub aggregation_timeout_ms: u64,

    /// Upper bound for narrative generation before using the static text
    #[serde(default = "default_narrative_timeout")]
    pub narrative_timeout_ms: u64,
}

impl AnalysisConfig {
    pub fn aggregation_timeout(&self) -> Duration {
        Duration::from_millis(self.aggregation_timeout_ms)
    }

    pub fn narrative_timeout(&self) -> Duration {
        Duration::from_millis(self.narrative_timeout_ms)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let valid = 1..=120_000;
        if !valid.contains(&self.aggregation_timeout_ms)
            || !valid.contains(&self.narrative_timeout_ms)
        {
            return Err(ValidationError::InvalidAnalysisTimeout);
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            aggregation_timeout_ms: default_aggregation_timeout(),
            narrative_timeout_ms: default_narrative_timeout(),
        }
    }
}

/// Profile store configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfilesConfig {
    /// Directory of `<user_id>.json` profiles; in-memory store when unset
    pub dir: Option<PathBuf>,
}

fn default_sweep_interval() -> u64 {
    300
}

fn default_aggregation_timeout() -> u64 {
    15_000
}

fn default_narrative_timeout() -> u64 {
    10_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(CacheConfig::default().sweep_interval(), Duration::from_secs(300));
        let analysis = AnalysisConfig::default();
        assert_eq!(analysis.aggregation_timeout(), Duration::from_secs(15));
        assert_eq!(analysis.narrative_timeout(), Duration::from_secs(10));
        assert!(ProfilesConfig::default().dir.is_none());
    }

    #[test]
    fn test_zero_sweep_interval_is_invalid() {
        let config = CacheConfig {
            sweep_interval_secs: 0,
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidSweepInterval));
    }

    #[test]
    fn test_analysis_timeout_bounds() {
        let config = AnalysisConfig {
            aggregation_timeout_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = AnalysisConfig {
            narrative_timeout_ms: 500_000,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
