//! Additive weighted risk model.

use serde::{Deserialize, Serialize};

use super::factors::{RiskFactor, RiskFactorAnalyzer};
use super::level::RiskLevel;
use crate::domain::profile::{UserProfile, WorkShift};
use crate::domain::statistics::CollectedData;

/// Score, band and explanatory factors for one profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub score: u8,
    pub level: RiskLevel,
    /// Sorted by descending impact.
    pub factors: Vec<RiskFactor>,
}

impl RiskAssessment {
    pub fn top_factors(&self, n: usize) -> &[RiskFactor] {
        &self.factors[..n.min(self.factors.len())]
    }
}

/// Maps a profile and its collected data to a 0-100 risk score.
pub struct RiskScorer;

impl RiskScorer {
    const BASE: f64 = 10.0;
    const OCCUPATION_WEIGHT: f64 = 0.2;

    /// Scores a profile and derives its factor list.
    ///
    /// The factor list is computed independently from the same inputs and
    /// is not required to sum to the score.
    pub fn score(profile: &UserProfile, collected: &CollectedData) -> RiskAssessment {
        let score = Self::points(profile, collected).round().clamp(0.0, 100.0) as u8;
        RiskAssessment {
            score,
            level: RiskLevel::from_score(score),
            factors: RiskFactorAnalyzer::analyze(profile, collected),
        }
    }

    /// Unrounded, unclamped point total.
    pub fn points(profile: &UserProfile, collected: &CollectedData) -> f64 {
        let env = &collected.environment;
        let stats = &collected.statistics;

        Self::BASE
            + Self::age_points(profile.age)
            + Self::death_rate_bonus(stats.age_adjusted_death_rate)
            + Self::aqi_points(env.aqi)
            + Self::seasonal_points(env.seasonal_risks.len())
            + f64::from(stats.occupation_risk_score) * Self::OCCUPATION_WEIGHT
            + Self::lifestyle_points(profile)
            + Self::crime_stress_points(stats.crime_rate)
            + Self::violent_crime_bonus(stats.violent_crime_rate)
            + Self::safety_points(stats.safety_index)
    }

    fn age_points(age: u32) -> f64 {
        match age {
            a if a > 60 => 20.0,
            a if a > 50 => 15.0,
            a if a > 40 => 10.0,
            a if a > 30 => 5.0,
            _ => 0.0,
        }
    }

    fn death_rate_bonus(age_adjusted: Option<f64>) -> f64 {
        age_adjusted
            .map(|rate| (rate / 20.0 * 5.0).clamp(0.0, 5.0))
            .unwrap_or(0.0)
    }

    fn aqi_points(aqi: u32) -> f64 {
        match aqi {
            a if a > 200 => 25.0,
            a if a > 150 => 20.0,
            a if a > 100 => 15.0,
            a if a > 50 => 10.0,
            _ => 5.0,
        }
    }

    fn seasonal_points(count: usize) -> f64 {
        ((count * 2) as f64).min(5.0)
    }

    fn lifestyle_points(profile: &UserProfile) -> f64 {
        let mut points = 0.0;
        if profile.health_condition.is_present() {
            points += 15.0;
        }
        if profile.addictions.is_present() {
            points += 10.0;
        }
        if profile.past_surgery.is_present() {
            points += 5.0;
        }
        points += match profile.work_shift {
            WorkShift::Night => 5.0,
            WorkShift::Rotating => 3.0,
            WorkShift::Day => 0.0,
        };
        points
    }

    /// Monotonic crime-rate lookup, capped at 10.
    pub fn crime_stress_points(crime_rate: f64) -> f64 {
        if crime_rate > 1500.0 {
            10.0
        } else if crime_rate > 1000.0 {
            8.0
        } else if crime_rate > 500.0 {
            6.0
        } else if crime_rate > 300.0 {
            4.0
        } else if crime_rate > 150.0 {
            2.0
        } else {
            0.0
        }
    }

    fn violent_crime_bonus(rate: f64) -> f64 {
        if rate > 30.0 {
            (rate / 10.0).min(5.0)
        } else {
            0.0
        }
    }

    fn safety_points(safety_index: u8) -> f64 {
        match safety_index {
            s if s < 60 => 5.0,
            s if s < 70 => 3.0,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::risk::test_support::{collected, profile};
    use proptest::prelude::*;

    #[test]
    fn delhi_factory_worker_is_critical() {
        let profile = profile(65, "Factory Worker", "Delhi", "Diabetes", "Night");
        let collected = collected(&profile, 220, 30.0, 1586.1);
        let assessment = RiskScorer::score(&profile, &collected);
        assert!(assessment.score >= 80, "score was {}", assessment.score);
        assert_eq!(assessment.level, RiskLevel::Critical);
    }

    #[test]
    fn bangalore_student_is_low() {
        let profile = profile(22, "Student", "Bangalore", "None", "Day");
        let collected = collected(&profile, 95, 24.0, 456.0);
        let assessment = RiskScorer::score(&profile, &collected);
        assert!(assessment.score < 40, "score was {}", assessment.score);
        assert_eq!(assessment.level, RiskLevel::Low);
    }

    #[test]
    fn bangalore_student_point_breakdown() {
        let profile = profile(22, "Student", "Bangalore", "None", "Day");
        let collected = collected(&profile, 95, 24.0, 456.0);
        // base 10, aqi 10, occupation 10*0.2, crime 4, safety 68 -> 3,
        // plus the age-adjusted death-rate bonus.
        let bonus = collected
            .statistics
            .age_adjusted_death_rate
            .map(|r| (r / 20.0 * 5.0).min(5.0))
            .unwrap_or(0.0);
        let expected = 10.0 + 10.0 + 2.0 + 4.0 + 3.0 + bonus;
        assert!((RiskScorer::points(&profile, &collected) - expected).abs() < 1e-9);
    }

    #[test]
    fn shifts_add_points() {
        let day = profile(35, "Teacher", "Pune", "None", "Day");
        let night = profile(35, "Teacher", "Pune", "None", "Night");
        let rotating = profile(35, "Teacher", "Pune", "None", "Rotating");
        let data = collected(&day, 80, 25.0, 400.0);
        let base = RiskScorer::points(&day, &data);
        assert!((RiskScorer::points(&night, &data) - base - 5.0).abs() < 1e-9);
        assert!((RiskScorer::points(&rotating, &data) - base - 3.0).abs() < 1e-9);
    }

    #[test]
    fn crime_stress_lookup_is_monotonic_and_capped() {
        let rates = [0.0, 151.0, 301.0, 501.0, 1001.0, 1501.0, 5000.0];
        let points: Vec<f64> = rates.iter().map(|r| RiskScorer::crime_stress_points(*r)).collect();
        assert_eq!(points, vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0, 10.0]);
    }

    #[test]
    fn violent_crime_bonus_only_above_thirty() {
        assert_eq!(RiskScorer::violent_crime_bonus(30.0), 0.0);
        assert!((RiskScorer::violent_crime_bonus(45.0) - 4.5).abs() < 1e-9);
        assert_eq!(RiskScorer::violent_crime_bonus(90.0), 5.0);
    }

    #[test]
    fn seasonal_points_are_capped() {
        assert_eq!(RiskScorer::seasonal_points(0), 0.0);
        assert_eq!(RiskScorer::seasonal_points(2), 4.0);
        assert_eq!(RiskScorer::seasonal_points(3), 5.0);
    }

    proptest! {
        #[test]
        fn score_is_bounded_and_level_matches(
            age in 1u32..=120,
            aqi in 0u32..600,
            temperature in -5.0f64..50.0,
            crime in 0.0f64..3000.0,
            occupation_idx in 0usize..14,
            condition in prop::bool::ANY,
            shift_idx in 0usize..3,
        ) {
            let occupation = crate::domain::profile::Occupation::all()[occupation_idx];
            let shift = ["Day", "Night", "Rotating"][shift_idx];
            let profile = profile(
                age,
                occupation.display_name(),
                "Delhi",
                if condition { "Asthma" } else { "None" },
                shift,
            );
            let data = collected(&profile, aqi, temperature, crime);
            let assessment = RiskScorer::score(&profile, &data);
            prop_assert!(assessment.score <= 100);
            prop_assert_eq!(assessment.level, RiskLevel::from_score(assessment.score));
            for pair in assessment.factors.windows(2) {
                prop_assert!(pair[0].impact >= pair[1].impact);
            }
        }
    }
}
