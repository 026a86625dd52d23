//! Environment module - climate readings and their classification.

mod climate;
mod snapshot;

pub use climate::{
    seasonal_risks, AirQualityReading, ClimateRisk, WeatherReading, EXTREME_HEAT,
    HEAT_STRESS, HIGH_HUMIDITY, POOR_AIR_QUALITY,
};
pub use snapshot::EnvironmentalSnapshot;
