//! HTTP handlers for analysis endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::{AnalysisError, AnalyzeProfileHandler};
use crate::domain::foundation::{DomainError, UserId, ValidationError};
use crate::domain::profile::RawProfile;

use super::dto::ErrorResponse;

#[derive(Clone)]
pub struct AnalysisAppState {
    pub handler: Arc<AnalyzeProfileHandler>,
}

impl AnalysisAppState {
    pub fn new(handler: Arc<AnalyzeProfileHandler>) -> Self {
        Self { handler }
    }
}

/// POST /api/analysis - Analyze a submitted profile
pub async fn analyze_profile(
    State(state): State<AnalysisAppState>,
    payload: Result<Json<RawProfile>, JsonRejection>,
) -> Response {
    let Json(profile) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            let error = ValidationError::invalid_format("body", rejection.body_text());
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::from(DomainError::from(error))),
            )
                .into_response();
        }
    };

    match state.handler.handle(profile).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => handle_analysis_error(e),
    }
}

/// GET /api/analysis/users/:user_id - Analyze a stored profile
pub async fn analyze_user(
    State(state): State<AnalysisAppState>,
    Path(user_id): Path<String>,
) -> Response {
    let user_id = match UserId::new(user_id) {
        Ok(id) => id,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::from(DomainError::from(e))),
            )
                .into_response()
        }
    };

    match state.handler.handle_user(&user_id).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => handle_analysis_error(e),
    }
}

fn handle_analysis_error(error: AnalysisError) -> Response {
    let status = match &error {
        AnalysisError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        AnalysisError::ProfileNotFound(_) => StatusCode::NOT_FOUND,
        AnalysisError::ProfileStore(e) => {
            tracing::error!(error = %e, "Profile store failure");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(ErrorResponse::from(&error))).into_response()
}
