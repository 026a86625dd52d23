//! HTTP adapter for analysis endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::ErrorResponse;
pub use handlers::AnalysisAppState;
pub use routes::analysis_routes;
