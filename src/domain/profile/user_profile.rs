//! User profile: the immutable input to an analysis run.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{City, Occupation};
use crate::domain::foundation::ValidationError;

/// Youngest and oldest ages the scoring model accepts.
pub const MIN_AGE: u32 = 1;
pub const MAX_AGE: u32 = 120;
/// Upper bound on declared monthly income, in whole currency units.
pub const MAX_MONTHLY_INCOME: u64 = 1_000_000_000_000;

/// Working pattern of the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkShift {
    #[default]
    Day,
    Night,
    Rotating,
}

impl WorkShift {
    pub fn display_name(&self) -> &'static str {
        match self {
            WorkShift::Day => "Day",
            WorkShift::Night => "Night",
            WorkShift::Rotating => "Rotating",
        }
    }
}

impl fmt::Display for WorkShift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for WorkShift {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "day" | "day shift" | "general" => Ok(WorkShift::Day),
            "night" | "night shift" => Ok(WorkShift::Night),
            "rotating" | "rotational" | "rotating shift" | "shift" => Ok(WorkShift::Rotating),
            _ => Err(ValidationError::unsupported("workShift", s.trim())),
        }
    }
}

/// Free-text medical or lifestyle answer where "None" means absent.
///
/// Stored as `None` when the user reported nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Disclosure(Option<String>);

impl Disclosure {
    /// Normalizes a raw answer; blank and negative answers become absent.
    pub fn from_answer(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None => Self(None),
            Some(answer) => {
                let lowered = answer.to_ascii_lowercase();
                if matches!(lowered.as_str(), "" | "none" | "no" | "nil" | "n/a" | "na") {
                    Self(None)
                } else {
                    Self(Some(answer.to_string()))
                }
            }
        }
    }

    pub fn none() -> Self {
        Self(None)
    }

    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }

    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

/// Validated user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub occupation: Occupation,
    pub city: City,
    pub area: Option<String>,
    pub work_shift: WorkShift,
    pub health_condition: Disclosure,
    pub addictions: Disclosure,
    pub past_surgery: Disclosure,
    pub age: u32,
    pub monthly_income: u64,
}

/// Age as it arrives on the wire: forms send strings, APIs send numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

impl NumericInput {
    fn parse(&self, field: &str) -> Result<f64, ValidationError> {
        let value = match self {
            NumericInput::Number(n) => *n,
            NumericInput::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| ValidationError::invalid_format(field, "expected a number"))?,
        };
        if !value.is_finite() {
            return Err(ValidationError::invalid_format(field, "expected a finite number"));
        }
        Ok(value)
    }
}

/// Unvalidated profile as submitted by the presentation layer or profile store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProfile {
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default, alias = "work_shift")]
    pub work_shift: Option<String>,
    #[serde(default, alias = "health_condition")]
    pub health_condition: Option<String>,
    #[serde(default)]
    pub addictions: Option<String>,
    #[serde(default, alias = "past_surgery")]
    pub past_surgery: Option<String>,
    #[serde(default)]
    pub age: Option<NumericInput>,
    #[serde(default, alias = "monthly_income")]
    pub monthly_income: Option<NumericInput>,
}

impl TryFrom<RawProfile> for UserProfile {
    type Error = ValidationError;

    fn try_from(raw: RawProfile) -> Result<Self, Self::Error> {
        let occupation: Occupation = raw
            .occupation
            .as_deref()
            .ok_or_else(|| ValidationError::empty_field("occupation"))?
            .parse()?;
        let city: City = raw
            .city
            .as_deref()
            .ok_or_else(|| ValidationError::empty_field("city"))?
            .parse()?;

        let age = raw
            .age
            .as_ref()
            .ok_or_else(|| ValidationError::empty_field("age"))?
            .parse("age")?;
        if age.fract() != 0.0 || age < f64::from(MIN_AGE) || age > f64::from(MAX_AGE) {
            return Err(ValidationError::out_of_range(
                "age",
                i64::from(MIN_AGE),
                i64::from(MAX_AGE),
                age as i64,
            ));
        }

        let monthly_income = match raw.monthly_income.as_ref() {
            None => 0,
            Some(input) => {
                let income = input.parse("monthlyIncome")?;
                if income < 0.0 || income > MAX_MONTHLY_INCOME as f64 {
                    return Err(ValidationError::out_of_range(
                        "monthlyIncome",
                        0,
                        MAX_MONTHLY_INCOME as i64,
                        income as i64,
                    ));
                }
                income.round() as u64
            }
        };

        let work_shift = match raw.work_shift.as_deref() {
            Some(shift) => shift.parse()?,
            None => WorkShift::Day,
        };

        let area = raw
            .area
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());

        Ok(UserProfile {
            occupation,
            city,
            area,
            work_shift,
            health_condition: Disclosure::from_answer(raw.health_condition.as_deref()),
            addictions: Disclosure::from_answer(raw.addictions.as_deref()),
            past_surgery: Disclosure::from_answer(raw.past_surgery.as_deref()),
            age: age as u32,
            monthly_income,
        })
    }
}

impl From<&UserProfile> for RawProfile {
    fn from(profile: &UserProfile) -> Self {
        RawProfile {
            occupation: Some(profile.occupation.to_string()),
            city: Some(profile.city.to_string()),
            area: profile.area.clone(),
            work_shift: Some(profile.work_shift.to_string()),
            health_condition: profile.health_condition.as_deref().map(str::to_string),
            addictions: profile.addictions.as_deref().map(str::to_string),
            past_surgery: profile.past_surgery.as_deref().map(str::to_string),
            age: Some(NumericInput::Number(f64::from(profile.age))),
            monthly_income: Some(NumericInput::Number(profile.monthly_income as f64)),
        }
    }
}
