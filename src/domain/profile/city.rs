//! Supported cities.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// A city the advisor has reference data for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum City {
    Delhi,
    Mumbai,
    Bangalore,
    Chennai,
    Kolkata,
    Hyderabad,
    Pune,
    Ahmedabad,
    Jaipur,
    Lucknow,
}

impl City {
    /// Returns all supported cities in display order.
    pub fn all() -> &'static [City] {
        &[
            City::Delhi,
            City::Mumbai,
            City::Bangalore,
            City::Chennai,
            City::Kolkata,
            City::Hyderabad,
            City::Pune,
            City::Ahmedabad,
            City::Jaipur,
            City::Lucknow,
        ]
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            City::Delhi => "Delhi",
            City::Mumbai => "Mumbai",
            City::Bangalore => "Bangalore",
            City::Chennai => "Chennai",
            City::Kolkata => "Kolkata",
            City::Hyderabad => "Hyderabad",
            City::Pune => "Pune",
            City::Ahmedabad => "Ahmedabad",
            City::Jaipur => "Jaipur",
            City::Lucknow => "Lucknow",
        }
    }

    /// Lowercase key used by reference tables, cache keys and source queries.
    pub fn slug(&self) -> &'static str {
        match self {
            City::Delhi => "delhi",
            City::Mumbai => "mumbai",
            City::Bangalore => "bangalore",
            City::Chennai => "chennai",
            City::Kolkata => "kolkata",
            City::Hyderabad => "hyderabad",
            City::Pune => "pune",
            City::Ahmedabad => "ahmedabad",
            City::Jaipur => "jaipur",
            City::Lucknow => "lucknow",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for City {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let city = match normalized.as_str() {
            "" => return Err(ValidationError::empty_field("city")),
            "delhi" | "new delhi" | "ncr" => City::Delhi,
            "mumbai" | "bombay" => City::Mumbai,
            "bangalore" | "bengaluru" => City::Bangalore,
            "chennai" | "madras" => City::Chennai,
            "kolkata" | "calcutta" => City::Kolkata,
            "hyderabad" => City::Hyderabad,
            "pune" => City::Pune,
            "ahmedabad" => City::Ahmedabad,
            "jaipur" => City::Jaipur,
            "lucknow" => City::Lucknow,
            _ => return Err(ValidationError::unsupported("city", s.trim())),
        };
        Ok(city)
    }
}

impl TryFrom<String> for City {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<City> for String {
    fn from(city: City) -> Self {
        city.display_name().to_string()
    }
}
