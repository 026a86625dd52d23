//! Weather and air-quality sources (OpenWeatherMap and WAQI wire formats).

use serde::Deserialize;
use serde_json::Value;

use super::resilient::SourceStrategy;
use crate::domain::environment::{AirQualityReading, WeatherReading};
use crate::domain::profile::City;
use crate::domain::provenance::SourceKind;
use crate::ports::SourceError;

#[derive(Debug, Deserialize)]
struct OwmResponse {
    main: OwmMain,
    #[serde(default)]
    weather: Vec<OwmCondition>,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwmCondition {
    main: String,
}

/// Current weather: `GET /weather?q={city},IN&units=metric`.
pub struct WeatherSource;

impl SourceStrategy for WeatherSource {
    type Params = City;
    type Output = WeatherReading;

    fn kind(&self) -> SourceKind {
        SourceKind::Weather
    }

    fn cache_params(&self, city: &City) -> Vec<(&'static str, String)> {
        vec![("city", city.slug().to_string())]
    }

    fn path(&self, _city: &City) -> String {
        "/weather".to_string()
    }

    fn query(&self, city: &City) -> Vec<(String, String)> {
        vec![
            ("q".to_string(), format!("{},IN", city.display_name())),
            ("units".to_string(), "metric".to_string()),
        ]
    }

    fn parse(&self, body: Value, _city: &City) -> Result<WeatherReading, SourceError> {
        let response: OwmResponse = serde_json::from_value(body)
            .map_err(|e| SourceError::Parse(format!("weather: {}", e)))?;
        Ok(WeatherReading {
            temperature: response.main.temp,
            humidity: response.main.humidity,
            condition: response
                .weather
                .into_iter()
                .next()
                .map(|w| w.main)
                .unwrap_or_else(|| "Unknown".to_string()),
        })
    }

    fn fallback(&self, _city: &City) -> WeatherReading {
        WeatherReading::fallback()
    }
}

/// Air quality index: `GET /feed/{city}/`.
///
/// WAQI answers HTTP 200 with `status != "ok"` for unknown stations and bad
/// tokens; both are treated as rejections.
pub struct AirQualitySource;

impl SourceStrategy for AirQualitySource {
    type Params = City;
    type Output = AirQualityReading;

    fn kind(&self) -> SourceKind {
        SourceKind::AirQuality
    }

    fn cache_params(&self, city: &City) -> Vec<(&'static str, String)> {
        vec![("city", city.slug().to_string())]
    }

    fn path(&self, city: &City) -> String {
        format!("/feed/{}/", city.slug())
    }

    fn query(&self, _city: &City) -> Vec<(String, String)> {
        Vec::new()
    }

    fn parse(&self, body: Value, _city: &City) -> Result<AirQualityReading, SourceError> {
        let status = body.get("status").and_then(Value::as_str).unwrap_or("");
        if status != "ok" {
            let message = body
                .get("data")
                .and_then(Value::as_str)
                .unwrap_or("no data")
                .to_string();
            return Err(SourceError::Rejected {
                status: 200,
                message,
            });
        }
        // Stations without a current reading report "-" instead of a number.
        body.pointer("/data/aqi")
            .and_then(Value::as_u64)
            .and_then(|aqi| u32::try_from(aqi).ok())
            .map(|aqi| AirQualityReading { aqi })
            .ok_or_else(|| SourceError::Parse("air_quality: data.aqi is not a number".to_string()))
    }

    fn fallback(&self, _city: &City) -> AirQualityReading {
        AirQualityReading::fallback()
    }
}
