//! Per-occupation hazard metadata.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::profile::Occupation;

/// Name of this table in provenance labels.
pub const OCCUPATION_TABLE_NAME: &str = "occupation_stats";

/// Coarse hazard class of an occupation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HazardLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl HazardLevel {
    /// High and critical hazards are reported as risk factors.
    pub fn is_elevated(&self) -> bool {
        matches!(self, HazardLevel::High | HazardLevel::Critical)
    }
}

impl fmt::Display for HazardLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HazardLevel::Low => "low",
            HazardLevel::Medium => "medium",
            HazardLevel::High => "high",
            HazardLevel::Critical => "critical",
        };
        write!(f, "{}", s)
    }
}

/// Hazard reference figures for one occupation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccupationStats {
    pub hazard_level: HazardLevel,
    pub category: String,
    /// 0-100 scale; the scorer weights it by 0.2.
    pub risk_score: u8,
    pub death_rate_per_100k: f64,
    pub hazards: Vec<String>,
}

impl OccupationStats {
    pub fn for_occupation(occupation: Occupation) -> &'static OccupationStats {
        &OCCUPATION_TABLE[&occupation]
    }
}

static OCCUPATION_TABLE: Lazy<HashMap<Occupation, OccupationStats>> = Lazy::new(|| {
    let table: HashMap<Occupation, OccupationStats> =
        serde_yaml::from_str(include_str!("data/occupations.yaml"))
            .unwrap_or_else(|e| panic!("Failed to parse embedded occupation table: {}", e));
    for occupation in Occupation::all() {
        if !table.contains_key(occupation) {
            panic!("Embedded occupation table is missing {}", occupation);
        }
    }
    table
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_occupation_has_stats() {
        for occupation in Occupation::all() {
            let stats = OccupationStats::for_occupation(*occupation);
            assert!(stats.risk_score <= 100, "{} risk score", occupation);
            assert!(!stats.hazards.is_empty(), "{} hazards", occupation);
            assert!(!stats.category.is_empty(), "{} category", occupation);
        }
    }

    #[test]
    fn hazard_level_tracks_risk_score() {
        let factory = OccupationStats::for_occupation(Occupation::FactoryWorker);
        let student = OccupationStats::for_occupation(Occupation::Student);
        assert_eq!(factory.hazard_level, HazardLevel::High);
        assert_eq!(student.hazard_level, HazardLevel::Low);
        assert!(factory.risk_score > student.risk_score);
    }

    #[test]
    fn hazard_level_ordering_and_elevation() {
        assert!(HazardLevel::Critical > HazardLevel::High);
        assert!(HazardLevel::High.is_elevated());
        assert!(!HazardLevel::Medium.is_elevated());
    }
}
