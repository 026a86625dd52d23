//! Per-city crime, safety and climate baselines.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::profile::City;

/// Name of this table in provenance labels.
pub const CITY_TABLE_NAME: &str = "city_stats";

/// Reference figures for one city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityStats {
    pub state: String,
    /// Millions of residents.
    pub population: f64,
    /// Cognisable crimes per 100k residents.
    pub crime_rate: f64,
    pub violent_crime_rate: f64,
    /// 0-100, higher is safer.
    pub safety_index: u8,
    /// Crude deaths per 1000 residents.
    pub death_rate: f64,
    pub baseline_aqi: u32,
    pub avg_temperature: f64,
    pub avg_humidity: f64,
}

impl CityStats {
    /// Reference figures for a supported city.
    pub fn for_city(city: City) -> &'static CityStats {
        &CITY_TABLE[&city]
    }

    /// Death rate per 1000 adjusted to the age band of the person.
    ///
    /// The crude city rate is scaled by a multiplier that grows with age.
    pub fn age_adjusted_death_rate(&self, age: u32) -> f64 {
        let multiplier = match age {
            0..=30 => 0.3,
            31..=45 => 0.6,
            46..=60 => 1.5,
            61..=75 => 3.5,
            _ => 8.0,
        };
        ((self.death_rate * multiplier) * 100.0).round() / 100.0
    }
}

static CITY_TABLE: Lazy<HashMap<City, CityStats>> = Lazy::new(|| {
    let table: HashMap<City, CityStats> =
        serde_yaml::from_str(include_str!("data/cities.yaml"))
            .unwrap_or_else(|e| panic!("Failed to parse embedded city table: {}", e));
    for city in City::all() {
        if !table.contains_key(city) {
            panic!("Embedded city table is missing {}", city);
        }
    }
    table
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_city_has_stats() {
        for city in City::all() {
            let stats = CityStats::for_city(*city);
            assert!(stats.crime_rate > 0.0, "{} crime rate", city);
            assert!(stats.safety_index <= 100, "{} safety index", city);
            assert!(stats.population > 0.0, "{} population", city);
        }
    }

    #[test]
    fn reference_crime_rates_match_published_figures() {
        assert!((CityStats::for_city(City::Delhi).crime_rate - 1586.1).abs() < 0.5);
        assert!((CityStats::for_city(City::Bangalore).crime_rate - 456.0).abs() < 0.5);
    }

    #[test]
    fn age_adjustment_increases_with_age() {
        let stats = CityStats::for_city(City::Mumbai);
        let young = stats.age_adjusted_death_rate(25);
        let middle = stats.age_adjusted_death_rate(50);
        let old = stats.age_adjusted_death_rate(70);
        let oldest = stats.age_adjusted_death_rate(90);
        assert!(young < middle && middle < old && old < oldest);
    }
}
