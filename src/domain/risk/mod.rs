//! Risk module - the weighted scoring model and the factor list that
//! explains it.

mod factors;
mod level;
mod scorer;

pub use factors::{FactorCategory, RiskFactor, RiskFactorAnalyzer};
pub use level::RiskLevel;
pub use scorer::{RiskAssessment, RiskScorer};
