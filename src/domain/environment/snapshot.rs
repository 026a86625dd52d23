//! Environmental snapshot for one analysis run.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::climate::{seasonal_risks, AirQualityReading, ClimateRisk, WeatherReading};
use crate::domain::foundation::Timestamp;
use crate::domain::profile::City;
use crate::domain::provenance::Provenance;

/// Conditions in the user's city at collection time.
///
/// `provenance` maps each field name to where its value came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentalSnapshot {
    pub city: City,
    pub aqi: u32,
    pub temperature: f64,
    pub humidity: f64,
    pub climate_risk: ClimateRisk,
    pub weather_condition: String,
    pub seasonal_risks: Vec<String>,
    pub timestamp: Timestamp,
    pub provenance: BTreeMap<String, Provenance>,
}

impl EnvironmentalSnapshot {
    /// Combines weather and air-quality readings and derives the climate classification.
    pub fn compose(
        city: City,
        weather: &WeatherReading,
        weather_provenance: Provenance,
        air: &AirQualityReading,
        air_provenance: Provenance,
        timestamp: Timestamp,
    ) -> Self {
        let mut provenance = BTreeMap::new();
        for field in ["temperature", "humidity", "weatherCondition"] {
            provenance.insert(field.to_string(), weather_provenance.clone());
        }
        provenance.insert("aqi".to_string(), air_provenance);

        Self {
            city,
            aqi: air.aqi,
            temperature: weather.temperature,
            humidity: weather.humidity,
            climate_risk: ClimateRisk::from_aqi(air.aqi),
            weather_condition: weather.condition.clone(),
            seasonal_risks: seasonal_risks(weather.temperature, weather.humidity, air.aqi),
            timestamp,
            provenance,
        }
    }
}
