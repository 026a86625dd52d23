//! Where a value came from: a live source, a source fallback or a static table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Outbound data sources consulted during collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Weather,
    AirQuality,
    DeathRate,
    Occupation,
    Crime,
    HealthAlerts,
}

impl SourceKind {
    pub fn all() -> &'static [SourceKind] {
        &[
            SourceKind::Weather,
            SourceKind::AirQuality,
            SourceKind::DeathRate,
            SourceKind::Occupation,
            SourceKind::Crime,
            SourceKind::HealthAlerts,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Weather => "weather",
            SourceKind::AirQuality => "air_quality",
            SourceKind::DeathRate => "death_rate",
            SourceKind::Occupation => "occupation",
            SourceKind::Crime => "crime",
            SourceKind::HealthAlerts => "health_alerts",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SourceKind::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown source kind '{}'", s))
    }
}

/// Origin of a collected value.
///
/// Serialized as its label, e.g. `live:weather` or `static:city_stats`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Provenance {
    Live(SourceKind),
    Fallback(SourceKind),
    Static(String),
}

impl Provenance {
    pub fn static_table(table: impl Into<String>) -> Self {
        Provenance::Static(table.into())
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Provenance::Live(_))
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Provenance::Fallback(_))
    }

    /// Outbound source behind this value, if any.
    pub fn source(&self) -> Option<SourceKind> {
        match self {
            Provenance::Live(kind) | Provenance::Fallback(kind) => Some(*kind),
            Provenance::Static(_) => None,
        }
    }

    pub fn label(&self) -> String {
        match self {
            Provenance::Live(kind) => format!("live:{}", kind),
            Provenance::Fallback(kind) => format!("fallback:{}", kind),
            Provenance::Static(table) => format!("static:{}", table),
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl TryFrom<String> for Provenance {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let (tag, name) = value
            .split_once(':')
            .ok_or_else(|| format!("provenance label '{}' has no tag", value))?;
        match tag {
            "live" => Ok(Provenance::Live(name.parse()?)),
            "fallback" => Ok(Provenance::Fallback(name.parse()?)),
            "static" if !name.is_empty() => Ok(Provenance::Static(name.to_string())),
            _ => Err(format!("invalid provenance label '{}'", value)),
        }
    }
}

impl From<Provenance> for String {
    fn from(provenance: Provenance) -> Self {
        provenance.label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_distinguish_live_from_fallback() {
        assert_eq!(Provenance::Live(SourceKind::Weather).label(), "live:weather");
        assert_eq!(
            Provenance::Fallback(SourceKind::AirQuality).label(),
            "fallback:air_quality"
        );
        assert_eq!(
            Provenance::static_table("city_stats").label(),
            "static:city_stats"
        );
    }

    #[test]
    fn parses_labels_back() {
        for label in ["live:death_rate", "fallback:health_alerts", "static:occupation_stats"] {
            let parsed = Provenance::try_from(label.to_string()).unwrap();
            assert_eq!(parsed.label(), label);
        }
        assert!(Provenance::try_from("live:horoscope".to_string()).is_err());
        assert!(Provenance::try_from("weather".to_string()).is_err());
    }

    #[test]
    fn static_tables_have_no_source() {
        assert_eq!(Provenance::static_table("city_stats").source(), None);
        assert_eq!(
            Provenance::Fallback(SourceKind::Crime).source(),
            Some(SourceKind::Crime)
        );
    }

    #[test]
    fn serializes_as_label() {
        let json = serde_json::to_string(&Provenance::Live(SourceKind::Crime)).unwrap();
        assert_eq!(json, "\"live:crime\"");
    }
}
