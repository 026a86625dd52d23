//! Supported occupations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// An occupation the advisor has hazard reference data for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Occupation {
    SoftwareEngineer,
    Doctor,
    Nurse,
    Teacher,
    FactoryWorker,
    ConstructionWorker,
    Driver,
    PoliceOfficer,
    Farmer,
    Miner,
    Student,
    BusinessOwner,
    OfficeWorker,
    Retired,
}

impl Occupation {
    /// Returns all supported occupations in display order.
    pub fn all() -> &'static [Occupation] {
        &[
            Occupation::SoftwareEngineer,
            Occupation::Doctor,
            Occupation::Nurse,
            Occupation::Teacher,
            Occupation::FactoryWorker,
            Occupation::ConstructionWorker,
            Occupation::Driver,
            Occupation::PoliceOfficer,
            Occupation::Farmer,
            Occupation::Miner,
            Occupation::Student,
            Occupation::BusinessOwner,
            Occupation::OfficeWorker,
            Occupation::Retired,
        ]
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Occupation::SoftwareEngineer => "Software Engineer",
            Occupation::Doctor => "Doctor",
            Occupation::Nurse => "Nurse",
            Occupation::Teacher => "Teacher",
            Occupation::FactoryWorker => "Factory Worker",
            Occupation::ConstructionWorker => "Construction Worker",
            Occupation::Driver => "Driver",
            Occupation::PoliceOfficer => "Police Officer",
            Occupation::Farmer => "Farmer",
            Occupation::Miner => "Miner",
            Occupation::Student => "Student",
            Occupation::BusinessOwner => "Business Owner",
            Occupation::OfficeWorker => "Office Worker",
            Occupation::Retired => "Retired",
        }
    }

    /// Snake-case key used by reference tables, cache keys and source queries.
    pub fn slug(&self) -> &'static str {
        match self {
            Occupation::SoftwareEngineer => "software_engineer",
            Occupation::Doctor => "doctor",
            Occupation::Nurse => "nurse",
            Occupation::Teacher => "teacher",
            Occupation::FactoryWorker => "factory_worker",
            Occupation::ConstructionWorker => "construction_worker",
            Occupation::Driver => "driver",
            Occupation::PoliceOfficer => "police_officer",
            Occupation::Farmer => "farmer",
            Occupation::Miner => "miner",
            Occupation::Student => "student",
            Occupation::BusinessOwner => "business_owner",
            Occupation::OfficeWorker => "office_worker",
            Occupation::Retired => "retired",
        }
    }
}

impl fmt::Display for Occupation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Occupation {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("occupation"));
        }
        let key = trimmed.to_ascii_lowercase().replace(['-', ' '], "_");
        Occupation::all()
            .iter()
            .copied()
            .find(|occupation| occupation.slug() == key)
            .ok_or_else(|| ValidationError::unsupported("occupation", trimmed))
    }
}

impl TryFrom<String> for Occupation {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Occupation> for String {
    fn from(occupation: Occupation) -> Self {
        occupation.display_name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_display_names() {
        assert_eq!(
            "Factory Worker".parse::<Occupation>().unwrap(),
            Occupation::FactoryWorker
        );
        assert_eq!("student".parse::<Occupation>().unwrap(), Occupation::Student);
    }

    #[test]
    fn parses_slugs_and_dashes() {
        assert_eq!(
            "software-engineer".parse::<Occupation>().unwrap(),
            Occupation::SoftwareEngineer
        );
        assert_eq!(
            "police_officer".parse::<Occupation>().unwrap(),
            Occupation::PoliceOfficer
        );
    }

    #[test]
    fn rejects_unknown_occupation() {
        assert!(matches!(
            "Astronaut".parse::<Occupation>(),
            Err(ValidationError::Unsupported { .. })
        ));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for occupation in Occupation::all() {
            assert_eq!(
                occupation.to_string().parse::<Occupation>().unwrap(),
                *occupation
            );
        }
    }
}
