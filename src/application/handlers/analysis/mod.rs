//! Analysis handlers.

mod analyze_profile;

pub use analyze_profile::{
    static_narrative, AnalysisError, AnalysisResult, AnalyzeProfileHandler, Narrative,
    DEFAULT_NARRATIVE_TIMEOUT,
};
