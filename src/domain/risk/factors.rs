//! Human-readable risk factors.
//!
//! Each triggered condition contributes one factor. Thresholds here are
//! independent of the scorer's weights.

use serde::{Deserialize, Serialize};

use super::level::RiskLevel;
use crate::domain::profile::{UserProfile, WorkShift};
use crate::domain::reference::{HazardLevel, OccupationStats};
use crate::domain::statistics::CollectedData;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorCategory {
    AirQuality,
    Seasonal,
    Occupational,
    Age,
    Medical,
    Lifestyle,
    WorkPattern,
    Crime,
    Safety,
    CityHealth,
}

/// One explanation entry for an assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub category: FactorCategory,
    pub level: RiskLevel,
    pub description: String,
    pub impact: u32,
}

impl RiskFactor {
    fn new(
        category: FactorCategory,
        level: RiskLevel,
        description: impl Into<String>,
        impact: u32,
    ) -> Self {
        Self {
            category,
            level,
            description: description.into(),
            impact,
        }
    }
}

/// Derives the ranked factor list.
pub struct RiskFactorAnalyzer;

impl RiskFactorAnalyzer {
    /// Returns factors sorted by descending impact; equal impacts keep
    /// the order in which they were detected.
    pub fn analyze(profile: &UserProfile, collected: &CollectedData) -> Vec<RiskFactor> {
        let env = &collected.environment;
        let stats = &collected.statistics;
        let mut factors = Vec::new();

        if env.aqi > 100 {
            let (level, impact) = match env.aqi {
                a if a > 200 => (RiskLevel::Critical, 25),
                a if a > 150 => (RiskLevel::High, 20),
                _ => (RiskLevel::Medium, 15),
            };
            factors.push(RiskFactor::new(
                FactorCategory::AirQuality,
                level,
                format!("Air quality index of {} in {}", env.aqi, env.city),
                impact,
            ));
        }

        if !env.seasonal_risks.is_empty() {
            let count = env.seasonal_risks.len() as u32;
            let level = if count > 1 {
                RiskLevel::High
            } else {
                RiskLevel::Medium
            };
            factors.push(RiskFactor::new(
                FactorCategory::Seasonal,
                level,
                format!("Seasonal risks: {}", env.seasonal_risks.join(", ")),
                (count * 3).min(10),
            ));
        }

        if stats.occupation_hazard_level.is_elevated() {
            let (level, impact) = match stats.occupation_hazard_level {
                HazardLevel::Critical => (RiskLevel::Critical, 20),
                _ => (RiskLevel::High, 15),
            };
            let hazards = &OccupationStats::for_occupation(profile.occupation).hazards;
            factors.push(RiskFactor::new(
                FactorCategory::Occupational,
                level,
                format!(
                    "{} work carries {} hazards: {}",
                    profile.occupation,
                    stats.occupation_hazard_level,
                    hazards.join(", ")
                ),
                impact,
            ));
        }

        if profile.age > 50 {
            let (level, impact) = if profile.age > 60 {
                (RiskLevel::High, 20)
            } else {
                (RiskLevel::Medium, 15)
            };
            factors.push(RiskFactor::new(
                FactorCategory::Age,
                level,
                format!("Age {} increases baseline health risk", profile.age),
                impact,
            ));
        }

        if let Some(condition) = profile.health_condition.as_deref() {
            factors.push(RiskFactor::new(
                FactorCategory::Medical,
                RiskLevel::High,
                format!("Pre-existing condition: {}", condition),
                15,
            ));
        }

        if let Some(addictions) = profile.addictions.as_deref() {
            factors.push(RiskFactor::new(
                FactorCategory::Lifestyle,
                RiskLevel::High,
                format!("Reported addictions: {}", addictions),
                10,
            ));
        }

        if profile.work_shift == WorkShift::Night {
            factors.push(RiskFactor::new(
                FactorCategory::WorkPattern,
                RiskLevel::Medium,
                "Night shift work disrupts sleep and circadian rhythm",
                5,
            ));
        }

        if stats.crime_rate > 500.0 {
            let (level, impact) = if stats.crime_rate > 1000.0 {
                (RiskLevel::High, 10)
            } else {
                (RiskLevel::Medium, 7)
            };
            factors.push(RiskFactor::new(
                FactorCategory::Crime,
                level,
                format!(
                    "Crime rate of {:.0} per 100k residents in {}",
                    stats.crime_rate, env.city
                ),
                impact,
            ));
        }

        if stats.safety_index < 60 {
            factors.push(RiskFactor::new(
                FactorCategory::Safety,
                RiskLevel::Medium,
                format!("Low safety index of {}", stats.safety_index),
                5,
            ));
        }

        if stats.city_health_index < 50 {
            let (level, impact) = if stats.city_health_index < 30 {
                (RiskLevel::High, 10)
            } else {
                (RiskLevel::Medium, 6)
            };
            factors.push(RiskFactor::new(
                FactorCategory::CityHealth,
                level,
                format!("City health index of {}", stats.city_health_index),
                impact,
            ));
        }

        factors.sort_by(|a, b| b.impact.cmp(&a.impact));
        factors
    }
}
