//! Climate classification derived from weather and air-quality readings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Weather reading used for climate classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    /// Degrees Celsius.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    pub condition: String,
}

impl WeatherReading {
    /// Reading substituted when the weather source is unavailable.
    pub fn fallback() -> Self {
        Self {
            temperature: 30.0,
            humidity: 65.0,
            condition: "Moderate".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirQualityReading {
    pub aqi: u32,
}

impl AirQualityReading {
    pub fn fallback() -> Self {
        Self { aqi: 150 }
    }
}

/// Climate risk band, driven by AQI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ClimateRisk {
    Low,
    Moderate,
    High,
    Critical,
}

impl ClimateRisk {
    pub fn from_aqi(aqi: u32) -> Self {
        if aqi > 200 {
            ClimateRisk::Critical
        } else if aqi > 150 {
            ClimateRisk::High
        } else if aqi > 100 {
            ClimateRisk::Moderate
        } else {
            ClimateRisk::Low
        }
    }
}

impl fmt::Display for ClimateRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ClimateRisk::Low => "Low",
            ClimateRisk::Moderate => "Moderate",
            ClimateRisk::High => "High",
            ClimateRisk::Critical => "Critical",
        };
        write!(f, "{}", s)
    }
}

pub const EXTREME_HEAT: &str = "extreme heat";
pub const HEAT_STRESS: &str = "heat stress";
pub const POOR_AIR_QUALITY: &str = "poor air quality";
pub const HIGH_HUMIDITY: &str = "high humidity / heat exhaustion risk";

/// Seasonal risk flags raised by the current conditions, in a fixed order.
pub fn seasonal_risks(temperature: f64, humidity: f64, aqi: u32) -> Vec<String> {
    let mut risks = Vec::new();
    if temperature > 40.0 {
        risks.push(EXTREME_HEAT.to_string());
    } else if temperature > 35.0 {
        risks.push(HEAT_STRESS.to_string());
    }
    if aqi > 150 {
        risks.push(POOR_AIR_QUALITY.to_string());
    }
    if humidity > 80.0 {
        risks.push(HIGH_HUMIDITY.to_string());
    }
    risks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn climate_risk_thresholds() {
        assert_eq!(ClimateRisk::from_aqi(201), ClimateRisk::Critical);
        assert_eq!(ClimateRisk::from_aqi(200), ClimateRisk::High);
        assert_eq!(ClimateRisk::from_aqi(151), ClimateRisk::High);
        assert_eq!(ClimateRisk::from_aqi(150), ClimateRisk::Moderate);
        assert_eq!(ClimateRisk::from_aqi(101), ClimateRisk::Moderate);
        assert_eq!(ClimateRisk::from_aqi(100), ClimateRisk::Low);
        assert_eq!(ClimateRisk::from_aqi(0), ClimateRisk::Low);
    }

    #[test]
    fn extreme_heat_supersedes_heat_stress() {
        assert_eq!(seasonal_risks(42.0, 50.0, 50), vec![EXTREME_HEAT]);
        assert_eq!(seasonal_risks(36.0, 50.0, 50), vec![HEAT_STRESS]);
        assert!(seasonal_risks(35.0, 50.0, 50).is_empty());
    }

    #[test]
    fn all_flags_can_fire_together() {
        assert_eq!(
            seasonal_risks(41.0, 85.0, 180),
            vec![EXTREME_HEAT, POOR_AIR_QUALITY, HIGH_HUMIDITY]
        );
    }

    #[test]
    fn fallback_readings_are_fixed() {
        let weather = WeatherReading::fallback();
        assert_eq!(weather.temperature, 30.0);
        assert_eq!(weather.humidity, 65.0);
        assert_eq!(weather.condition, "Moderate");
        assert_eq!(AirQualityReading::fallback().aqi, 150);
    }
}
