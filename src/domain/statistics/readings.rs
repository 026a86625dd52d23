//! Raw statistical readings returned by the outbound sources.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;
use crate::domain::profile::{City, Occupation};
use crate::domain::reference::{CityStats, OccupationStats};

/// Mortality figures for a city, per 1000 residents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeathRateReading {
    pub death_rate: f64,
    pub age_adjusted_death_rate: Option<f64>,
}

impl DeathRateReading {
    /// City crude rate plus the age-band adjusted rate from the reference table.
    pub fn fallback(city: City, age: u32) -> Self {
        let stats = CityStats::for_city(city);
        Self {
            death_rate: stats.death_rate,
            age_adjusted_death_rate: Some(stats.age_adjusted_death_rate(age)),
        }
    }
}

/// Fatal-injury rate of an occupation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OccupationRateReading {
    pub death_rate_per_100k: f64,
}

impl OccupationRateReading {
    pub fn fallback(occupation: Occupation) -> Self {
        Self {
            death_rate_per_100k: OccupationStats::for_occupation(occupation).death_rate_per_100k,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrimeReading {
    pub crime_rate: f64,
    pub violent_crime_rate: f64,
    pub safety_index: u8,
}

impl CrimeReading {
    pub fn fallback(city: City) -> Self {
        let stats = CityStats::for_city(city);
        Self {
            crime_rate: stats.crime_rate,
            violent_crime_rate: stats.violent_crime_rate,
            safety_index: stats.safety_index,
        }
    }
}

/// A news item about health conditions in the user's city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthAlert {
    pub title: String,
    pub source: String,
    pub published_at: Option<Timestamp>,
    pub url: Option<String>,
}
