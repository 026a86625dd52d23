//! Mortality, occupational-safety and crime statistics sources.

use serde::Deserialize;
use serde_json::Value;

use super::resilient::SourceStrategy;
use crate::domain::profile::{City, Occupation};
use crate::domain::provenance::SourceKind;
use crate::domain::reference::CityStats;
use crate::domain::statistics::{CrimeReading, DeathRateReading, OccupationRateReading};
use crate::ports::SourceError;

fn parse_body<T: serde::de::DeserializeOwned>(
    kind: SourceKind,
    body: Value,
) -> Result<T, SourceError> {
    serde_json::from_value(body).map_err(|e| SourceError::Parse(format!("{}: {}", kind, e)))
}

/// Death rates: `GET /death-rates?city=&age=`.
pub struct DeathRateSource;

impl SourceStrategy for DeathRateSource {
    type Params = (City, u32);
    type Output = DeathRateReading;

    fn kind(&self) -> SourceKind {
        SourceKind::DeathRate
    }

    fn cache_params(&self, (city, age): &(City, u32)) -> Vec<(&'static str, String)> {
        vec![("city", city.slug().to_string()), ("age", age.to_string())]
    }

    fn path(&self, _params: &(City, u32)) -> String {
        "/death-rates".to_string()
    }

    fn query(&self, (city, age): &(City, u32)) -> Vec<(String, String)> {
        vec![
            ("city".to_string(), city.slug().to_string()),
            ("age".to_string(), age.to_string()),
        ]
    }

    fn parse(&self, body: Value, _params: &(City, u32)) -> Result<DeathRateReading, SourceError> {
        let reading: DeathRateReading = parse_body(self.kind(), body)?;
        if reading.death_rate < 0.0 {
            return Err(SourceError::Parse("death_rate: negative rate".to_string()));
        }
        Ok(reading)
    }

    fn fallback(&self, (city, age): &(City, u32)) -> DeathRateReading {
        DeathRateReading::fallback(*city, *age)
    }
}

/// Occupational fatality rates: `GET /occupations?occupation=`.
pub struct OccupationSource;

impl SourceStrategy for OccupationSource {
    type Params = Occupation;
    type Output = OccupationRateReading;

    fn kind(&self) -> SourceKind {
        SourceKind::Occupation
    }

    fn cache_params(&self, occupation: &Occupation) -> Vec<(&'static str, String)> {
        vec![("occupation", occupation.slug().to_string())]
    }

    fn path(&self, _occupation: &Occupation) -> String {
        "/occupations".to_string()
    }

    fn query(&self, occupation: &Occupation) -> Vec<(String, String)> {
        vec![("occupation".to_string(), occupation.slug().to_string())]
    }

    fn parse(&self, body: Value, _occupation: &Occupation) -> Result<OccupationRateReading, SourceError> {
        parse_body(self.kind(), body)
    }

    fn fallback(&self, occupation: &Occupation) -> OccupationRateReading {
        OccupationRateReading::fallback(*occupation)
    }
}

#[derive(Debug, Deserialize)]
struct CrimeBody {
    crime_rate: f64,
    violent_crime_rate: Option<f64>,
    safety_index: Option<u8>,
}

/// Crime statistics: `GET /crime?city=`.
///
/// Fields the source omits are filled from the city table.
pub struct CrimeSource;

impl SourceStrategy for CrimeSource {
    type Params = City;
    type Output = CrimeReading;

    fn kind(&self) -> SourceKind {
        SourceKind::Crime
    }

    fn cache_params(&self, city: &City) -> Vec<(&'static str, String)> {
        vec![("city", city.slug().to_string())]
    }

    fn path(&self, _city: &City) -> String {
        "/crime".to_string()
    }

    fn query(&self, city: &City) -> Vec<(String, String)> {
        vec![("city".to_string(), city.slug().to_string())]
    }

    fn parse(&self, body: Value, city: &City) -> Result<CrimeReading, SourceError> {
        let body: CrimeBody = parse_body(self.kind(), body)?;
        let table = CityStats::for_city(*city);
        Ok(CrimeReading {
            crime_rate: body.crime_rate,
            violent_crime_rate: body.violent_crime_rate.unwrap_or(table.violent_crime_rate),
            safety_index: body.safety_index.unwrap_or(table.safety_index).min(100),
        })
    }

    fn fallback(&self, city: &City) -> CrimeReading {
        CrimeReading::fallback(*city)
    }
}
