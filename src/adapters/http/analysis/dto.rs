//! HTTP DTOs for analysis endpoints.
//!
//! Requests are `RawProfile` and responses are `AnalysisResult`, both already
//! camelCase on the wire; only errors need their own shape.

use serde::{Deserialize, Serialize};

use crate::application::AnalysisError;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Standard error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self {
            code: ErrorCode::ProfileNotFound.to_string(),
            message: format!("{} not found: {}", resource_type, id),
            details: None,
        }
    }
}

impl From<DomainError> for ErrorResponse {
    fn from(err: DomainError) -> Self {
        let details = (!err.details.is_empty())
            .then(|| serde_json::to_value(&err.details).ok())
            .flatten();
        Self {
            code: err.code.to_string(),
            message: err.message,
            details,
        }
    }
}

impl From<&AnalysisError> for ErrorResponse {
    fn from(err: &AnalysisError) -> Self {
        match err {
            AnalysisError::InvalidInput(e) => DomainError::from(e.clone()).into(),
            AnalysisError::ProfileNotFound(id) => Self::not_found("Profile", id.as_str()),
            AnalysisError::ProfileStore(e) => Self {
                code: e.code.to_string(),
                message: "Profile store unavailable".to_string(),
                details: None,
            },
        }
    }
}
