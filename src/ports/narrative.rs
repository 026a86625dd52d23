//! Narrative port - optional free-text explanation of an assessment.
//!
//! Narrative text decorates a result; nothing in the structured result
//! depends on it.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::profile::UserProfile;
use crate::domain::risk::RiskAssessment;
use crate::domain::statistics::QualityGrade;

/// Input for narrative generation.
#[derive(Debug, Clone)]
pub struct NarrativeRequest {
    pub profile: UserProfile,
    pub assessment: RiskAssessment,
    pub data_quality: QualityGrade,
}

/// Generates explanation and prevention copy for an assessment.
#[async_trait]
pub trait NarrativeProvider: Send + Sync {
    async fn generate(&self, request: &NarrativeRequest) -> Result<String, NarrativeError>;

    /// Short provider name for logs.
    fn name(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NarrativeError {
    #[error("provider unavailable: {message}")]
    Unavailable { message: String },

    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("network error: {0}")]
    Network(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("narrative generation timed out")]
    Timeout,

    #[error("no narrative provider configured")]
    NotConfigured,
}

impl NarrativeError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        NarrativeError::Unavailable {
            message: message.into(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            NarrativeError::Unavailable { .. }
                | NarrativeError::RateLimited { .. }
                | NarrativeError::Network(_)
        )
    }
}
