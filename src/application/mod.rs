//! Application layer - orchestration over the domain and the ports.
//!
//! - `aggregation` - concurrent collection of source readings
//! - `handlers` - the `analyze` entry points used by the HTTP surface

pub mod aggregation;
pub mod handlers;

pub use aggregation::DataAggregator;
pub use handlers::{AnalysisError, AnalysisResult, AnalyzeProfileHandler, Narrative};
