//! `HealthDataSources` backed by the resilient fetcher.

use async_trait::async_trait;
use std::collections::HashMap;

use super::news::HealthAlertSource;
use super::resilient::ResilientFetcher;
use super::settings::SourceSettings;
use super::statistics::{CrimeSource, DeathRateSource, OccupationSource};
use super::weather::{AirQualitySource, WeatherSource};
use crate::domain::environment::{AirQualityReading, WeatherReading};
use crate::domain::profile::{City, Occupation};
use crate::domain::provenance::SourceKind;
use crate::domain::statistics::{
    CrimeReading, DeathRateReading, HealthAlert, OccupationRateReading,
};
use crate::ports::{HealthDataSources, Sourced};

/// All six outbound sources sharing one transport and one cache.
///
/// A kind without settings behaves as unconfigured and always falls back.
#[derive(Clone)]
pub struct LiveHealthDataSources {
    fetcher: ResilientFetcher,
    settings: HashMap<SourceKind, SourceSettings>,
}

impl LiveHealthDataSources {
    pub fn new(fetcher: ResilientFetcher) -> Self {
        Self {
            fetcher,
            settings: HashMap::new(),
        }
    }

    /// Registers settings for the source they name.
    pub fn with_source(mut self, settings: SourceSettings) -> Self {
        self.settings.insert(settings.kind, settings);
        self
    }

    fn settings_for(&self, kind: SourceKind) -> SourceSettings {
        self.settings
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| SourceSettings::new(kind))
    }
}

#[async_trait]
impl HealthDataSources for LiveHealthDataSources {
    async fn weather(&self, city: City) -> Sourced<WeatherReading> {
        let settings = self.settings_for(SourceKind::Weather);
        self.fetcher.fetch(&WeatherSource, &settings, &city).await
    }

    async fn air_quality(&self, city: City) -> Sourced<AirQualityReading> {
        let settings = self.settings_for(SourceKind::AirQuality);
        self.fetcher.fetch(&AirQualitySource, &settings, &city).await
    }

    async fn death_rate(&self, city: City, age: u32) -> Sourced<DeathRateReading> {
        let settings = self.settings_for(SourceKind::DeathRate);
        self.fetcher
            .fetch(&DeathRateSource, &settings, &(city, age))
            .await
    }

    async fn occupation_rate(&self, occupation: Occupation) -> Sourced<OccupationRateReading> {
        let settings = self.settings_for(SourceKind::Occupation);
        self.fetcher
            .fetch(&OccupationSource, &settings, &occupation)
            .await
    }

    async fn crime(&self, city: City) -> Sourced<CrimeReading> {
        let settings = self.settings_for(SourceKind::Crime);
        self.fetcher.fetch(&CrimeSource, &settings, &city).await
    }

    async fn health_alerts(&self, city: City) -> Sourced<Vec<HealthAlert>> {
        let settings = self.settings_for(SourceKind::HealthAlerts);
        self.fetcher
            .fetch(&HealthAlertSource, &settings, &city)
            .await
    }
}
