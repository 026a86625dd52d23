//! Application handlers.

pub mod analysis;

pub use analysis::{AnalysisError, AnalysisResult, AnalyzeProfileHandler, Narrative};
