//! Statistical snapshot and the complete collected-data record.

use serde::{Deserialize, Serialize};

use super::data_quality::DataQuality;
use super::health_index::city_health_index;
use super::readings::{CrimeReading, DeathRateReading, HealthAlert, OccupationRateReading};
use crate::domain::environment::EnvironmentalSnapshot;
use crate::domain::foundation::Timestamp;
use crate::domain::profile::Occupation;
use crate::domain::reference::{HazardLevel, OccupationStats};

/// Mortality, crime and occupational figures for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticalSnapshot {
    pub death_rate: f64,
    pub age_adjusted_death_rate: Option<f64>,
    pub crime_rate: f64,
    pub violent_crime_rate: f64,
    pub safety_index: u8,
    pub occupation_hazard_level: HazardLevel,
    pub occupation_category: String,
    /// 0-100, from the occupation table.
    pub occupation_risk_score: u8,
    pub occupation_death_rate: f64,
    pub city_health_index: u8,
}

impl StatisticalSnapshot {
    /// Blends source readings with the occupation table.
    ///
    /// Hazard level, category and risk score always come from the table;
    /// the death-rate figures come from whatever the sources returned.
    pub fn compose(
        occupation: Occupation,
        death: &DeathRateReading,
        occupation_rate: &OccupationRateReading,
        crime: &CrimeReading,
        environment: &EnvironmentalSnapshot,
    ) -> Self {
        let table = OccupationStats::for_occupation(occupation);
        Self {
            death_rate: death.death_rate,
            age_adjusted_death_rate: death.age_adjusted_death_rate,
            crime_rate: crime.crime_rate,
            violent_crime_rate: crime.violent_crime_rate,
            safety_index: crime.safety_index,
            occupation_hazard_level: table.hazard_level,
            occupation_category: table.category.clone(),
            occupation_risk_score: table.risk_score,
            occupation_death_rate: occupation_rate.death_rate_per_100k,
            city_health_index: city_health_index(
                environment.aqi,
                crime.crime_rate,
                environment.temperature,
            ),
        }
    }
}

/// How the collected data was assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionMode {
    /// Every source was consulted.
    Full,
    /// Degraded path built from static tables only.
    Basic,
}

/// Everything the scorer needs, plus how trustworthy it is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectedData {
    pub environment: EnvironmentalSnapshot,
    pub statistics: StatisticalSnapshot,
    pub health_alerts: Vec<HealthAlert>,
    pub data_quality: DataQuality,
    pub mode: CollectionMode,
    pub collected_at: Timestamp,
}
