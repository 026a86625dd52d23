//! HTTP routes for analysis endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{analyze_profile, analyze_user, AnalysisAppState};

/// Routes mounted under `/api/analysis`.
pub fn analysis_routes(state: AnalysisAppState) -> Router {
    Router::new()
        .route("/", post(analyze_profile))
        .route("/users/:user_id", get(analyze_user))
        .with_state(state)
}
