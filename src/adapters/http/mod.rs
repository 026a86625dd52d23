//! HTTP adapters - REST API implementations.
//!
//! - `analysis` - `POST /api/analysis`, `GET /api/analysis/users/:user_id`
//! - `reference` - supported cities and occupations
//!
//! [`app_router`] assembles them with the health check and middleware.

pub mod analysis;
pub mod reference;

use axum::{http::HeaderValue, routing::get, Json, Router};
use serde_json::{json, Value};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use analysis::{analysis_routes, AnalysisAppState, ErrorResponse};
pub use reference::reference_routes;

/// Middleware settings for the router.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    /// Allowed origins; empty allows any origin.
    pub cors_origins: Vec<String>,
    pub request_timeout: Duration,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            cors_origins: Vec::new(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Builds the full application router.
pub fn app_router(state: AnalysisAppState, settings: &HttpSettings) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/analysis", analysis_routes(state))
        .nest("/api/reference", reference_routes())
        .layer(TimeoutLayer::new(settings.request_timeout))
        .layer(cors_layer(&settings.cors_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(allowed)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::cache::InMemoryCache;
    use crate::adapters::profile::InMemoryProfileStore;
    use crate::adapters::sources::{LiveHealthDataSources, MockTransport, ResilientFetcher};
    use crate::application::{AnalyzeProfileHandler, DataAggregator};
    use crate::domain::foundation::UserId;
    use crate::domain::profile::RawProfile;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn app(store: InMemoryProfileStore) -> Router {
        let fetcher = ResilientFetcher::new(
            Arc::new(MockTransport::new()),
            Arc::new(InMemoryCache::new()),
        );
        let aggregator = DataAggregator::new(Arc::new(LiveHealthDataSources::new(fetcher)));
        let handler = AnalyzeProfileHandler::new(aggregator, Arc::new(store));
        app_router(
            AnalysisAppState::new(Arc::new(handler)),
            &HttpSettings::default(),
        )
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_check_is_ok() {
        let response = app(InMemoryProfileStore::new())
            .await
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn analysis_returns_camel_case_result() {
        let response = app(InMemoryProfileStore::new())
            .await
            .oneshot(post_json(
                "/api/analysis",
                json!({"occupation": "Miner", "city": "Kolkata", "age": 45, "monthlyIncome": 30000}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body["assessment"]["score"].is_u64());
        assert!(body["financialPlan"]["insurancePlan"]["name"].is_string());
        assert_eq!(body["collected"]["dataQuality"]["overall"], "poor");
        assert_eq!(body["narrative"]["generated"], false);
    }

    #[tokio::test]
    async fn invalid_profile_is_bad_request() {
        let response = app(InMemoryProfileStore::new())
            .await
            .oneshot(post_json(
                "/api/analysis",
                json!({"occupation": "Miner", "city": "Kolkata", "age": 0}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["code"], "OUT_OF_RANGE");
        assert_eq!(body["details"]["field"], "age");
    }

    #[tokio::test]
    async fn stored_profile_lookup() {
        let store = InMemoryProfileStore::new();
        let raw: RawProfile = serde_json::from_value(
            json!({"occupation": "Teacher", "city": "Jaipur", "age": 38}),
        )
        .unwrap();
        store.insert(UserId::new("meera").unwrap(), raw).await;
        let app = app(store).await;

        let found = app
            .clone()
            .oneshot(
                Request::get("/api/analysis/users/meera")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(found.status(), StatusCode::OK);

        let missing = app
            .oneshot(
                Request::get("/api/analysis/users/nobody")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(missing).await["code"], "PROFILE_NOT_FOUND");
    }

    #[tokio::test]
    async fn reference_lists_supported_inputs() {
        let router = app(InMemoryProfileStore::new()).await;
        let cities = router
            .clone()
            .oneshot(
                Request::get("/api/reference/cities")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let cities = body_json(cities).await;
        assert_eq!(cities.as_array().unwrap().len(), 10);
        assert_eq!(cities[0]["slug"], "delhi");

        let occupations = router
            .oneshot(
                Request::get("/api/reference/occupations")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(body_json(occupations).await.as_array().unwrap().len(), 14);
    }
}
