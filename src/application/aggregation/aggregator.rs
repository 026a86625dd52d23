//! DataAggregator - collects every reading a risk assessment needs.
//!
//! All six source calls are independent, so they run as separate tasks and
//! are joined before composing the result. Each source already degrades to
//! its own fallback. The aggregation deadline bounds every task: a source
//! still running at the deadline is reported with its fallback value while
//! the finished sources keep their results. Only a pass that fails as a
//! whole (a panicked task) degrades to basic mode, built from the reference
//! tables alone.

use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;
use tokio::task::{JoinError, JoinHandle};

use crate::domain::environment::{AirQualityReading, EnvironmentalSnapshot, WeatherReading};
use crate::domain::foundation::Timestamp;
use crate::domain::profile::{City, Occupation};
use crate::domain::provenance::{Provenance, SourceKind};
use crate::domain::reference::{CityStats, CITY_TABLE_NAME, OCCUPATION_TABLE_NAME};
use crate::domain::statistics::{
    CollectedData, CollectionMode, CrimeReading, DataQuality, DeathRateReading,
    OccupationRateReading, StatisticalSnapshot,
};
use crate::ports::{HealthDataSources, Sourced};

/// Default deadline for one collection pass.
pub const DEFAULT_AGGREGATION_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Error)]
enum AggregationFailure {
    #[error("source task failed: {0}")]
    Task(#[from] JoinError),
}

/// Fans out to every source and merges the results with the reference tables.
#[derive(Clone)]
pub struct DataAggregator {
    sources: Arc<dyn HealthDataSources>,
    timeout: Duration,
}

impl DataAggregator {
    pub fn new(sources: Arc<dyn HealthDataSources>) -> Self {
        Self {
            sources,
            timeout: DEFAULT_AGGREGATION_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Never fails: a failed pass returns basic-mode data.
    pub async fn collect(&self, city: City, occupation: Occupation, age: u32) -> CollectedData {
        let started = Instant::now();

        match self.collect_full(city, occupation, age).await {
            Ok(collected) => {
                tracing::info!(
                    city = %city,
                    mode = "full",
                    quality = ?collected.data_quality.overall,
                    real_time_pct = collected.data_quality.real_time_data_percentage.value(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Data collected"
                );
                collected
            }
            Err(failure) => self.degrade(city, occupation, age, failure),
        }
    }

    async fn collect_full(
        &self,
        city: City,
        occupation: Occupation,
        age: u32,
    ) -> Result<CollectedData, AggregationFailure> {
        let deadline = tokio::time::Instant::now() + self.timeout;

        let weather = {
            let sources = Arc::clone(&self.sources);
            tokio::spawn(async move { sources.weather(city).await })
        };
        let air = {
            let sources = Arc::clone(&self.sources);
            tokio::spawn(async move { sources.air_quality(city).await })
        };
        let death = {
            let sources = Arc::clone(&self.sources);
            tokio::spawn(async move { sources.death_rate(city, age).await })
        };
        let occupation_rate = {
            let sources = Arc::clone(&self.sources);
            tokio::spawn(async move { sources.occupation_rate(occupation).await })
        };
        let crime = {
            let sources = Arc::clone(&self.sources);
            tokio::spawn(async move { sources.crime(city).await })
        };
        let alerts = {
            let sources = Arc::clone(&self.sources);
            tokio::spawn(async move { sources.health_alerts(city).await })
        };

        let (weather, air, death, occupation_rate, crime, alerts) = tokio::join!(
            settle(weather, deadline, SourceKind::Weather, WeatherReading::fallback),
            settle(air, deadline, SourceKind::AirQuality, AirQualityReading::fallback),
            settle(death, deadline, SourceKind::DeathRate, || {
                DeathRateReading::fallback(city, age)
            }),
            settle(occupation_rate, deadline, SourceKind::Occupation, || {
                OccupationRateReading::fallback(occupation)
            }),
            settle(crime, deadline, SourceKind::Crime, || CrimeReading::fallback(city)),
            settle(alerts, deadline, SourceKind::HealthAlerts, Vec::new),
        );
        let (weather, air, death, occupation_rate, crime, alerts) =
            (weather?, air?, death?, occupation_rate?, crime?, alerts?);

        let outbound = [
            weather.provenance.clone(),
            air.provenance.clone(),
            death.provenance.clone(),
            occupation_rate.provenance.clone(),
            crime.provenance.clone(),
            alerts.provenance.clone(),
        ];
        let collected_at = Timestamp::now();
        let environment = EnvironmentalSnapshot::compose(
            city,
            &weather.value,
            weather.provenance,
            &air.value,
            air.provenance,
            collected_at,
        );
        let statistics = StatisticalSnapshot::compose(
            occupation,
            &death.value,
            &occupation_rate.value,
            &crime.value,
            &environment,
        );

        Ok(CollectedData {
            environment,
            statistics,
            health_alerts: alerts.value,
            data_quality: DataQuality::assess(&outbound, &static_tables()),
            mode: CollectionMode::Full,
            collected_at,
        })
    }

    fn degrade(
        &self,
        city: City,
        occupation: Occupation,
        age: u32,
        failure: AggregationFailure,
    ) -> CollectedData {
        tracing::warn!(city = %city, error = %failure, "Aggregation failed, using basic mode");
        basic_collection(city, occupation, age)
    }
}

/// Waits for a source task until the pass deadline.
///
/// A task still running at the deadline is left detached so its result can
/// still land in the cache; the pass reports the source's fallback instead.
async fn settle<T>(
    mut task: JoinHandle<Sourced<T>>,
    deadline: tokio::time::Instant,
    kind: SourceKind,
    fallback: impl FnOnce() -> T,
) -> Result<Sourced<T>, JoinError> {
    match tokio::time::timeout_at(deadline, &mut task).await {
        Ok(joined) => joined,
        Err(_) => {
            tracing::warn!(source = %kind, "Source missed the aggregation deadline, using fallback");
            Ok(Sourced::fallback(kind, fallback()))
        }
    }
}

fn static_tables() -> [Provenance; 2] {
    [
        Provenance::static_table(CITY_TABLE_NAME),
        Provenance::static_table(OCCUPATION_TABLE_NAME),
    ]
}

/// Collected data built from the reference tables only.
///
/// Climate uses the city's baseline AQI and average weather. Every value is
/// labelled with its table, so data quality grades as poor.
pub fn basic_collection(city: City, occupation: Occupation, age: u32) -> CollectedData {
    let stats = CityStats::for_city(city);
    let table = Provenance::static_table(CITY_TABLE_NAME);
    let weather = WeatherReading {
        temperature: stats.avg_temperature,
        humidity: stats.avg_humidity,
        condition: WeatherReading::fallback().condition,
    };
    let air = AirQualityReading {
        aqi: stats.baseline_aqi,
    };

    let collected_at = Timestamp::now();
    let environment = EnvironmentalSnapshot::compose(
        city,
        &weather,
        table.clone(),
        &air,
        table,
        collected_at,
    );
    let statistics = StatisticalSnapshot::compose(
        occupation,
        &DeathRateReading::fallback(city, age),
        &OccupationRateReading::fallback(occupation),
        &CrimeReading::fallback(city),
        &environment,
    );

    CollectedData {
        environment,
        statistics,
        health_alerts: Vec::new(),
        data_quality: DataQuality::assess(&[], &static_tables()),
        mode: CollectionMode::Basic,
        collected_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::statistics::{HealthAlert, QualityGrade};
    use async_trait::async_trait;

    /// Every source answers live with its fallback value.
    struct StubSources {
        panic_on_crime: bool,
        delay: Duration,
    }

    impl StubSources {
        fn live() -> Self {
            Self {
                panic_on_crime: false,
                delay: Duration::ZERO,
            }
        }
    }

    #[async_trait]
    impl HealthDataSources for StubSources {
        async fn weather(&self, _city: City) -> Sourced<WeatherReading> {
            tokio::time::sleep(self.delay).await;
            Sourced::live(SourceKind::Weather, WeatherReading {
                temperature: 42.0,
                humidity: 20.0,
                condition: "Clear".to_string(),
            })
        }

        async fn air_quality(&self, _city: City) -> Sourced<AirQualityReading> {
            Sourced::live(SourceKind::AirQuality, AirQualityReading { aqi: 220 })
        }

        async fn death_rate(&self, city: City, age: u32) -> Sourced<DeathRateReading> {
            Sourced::fallback(SourceKind::DeathRate, DeathRateReading::fallback(city, age))
        }

        async fn occupation_rate(&self, occupation: Occupation) -> Sourced<OccupationRateReading> {
            Sourced::fallback(
                SourceKind::Occupation,
                OccupationRateReading::fallback(occupation),
            )
        }

        async fn crime(&self, city: City) -> Sourced<CrimeReading> {
            if self.panic_on_crime {
                panic!("crime source blew up");
            }
            Sourced::live(SourceKind::Crime, CrimeReading::fallback(city))
        }

        async fn health_alerts(&self, _city: City) -> Sourced<Vec<HealthAlert>> {
            Sourced::live(SourceKind::HealthAlerts, Vec::new())
        }
    }

    #[tokio::test]
    async fn full_pass_merges_sources_and_grades_quality() {
        let aggregator = DataAggregator::new(Arc::new(StubSources::live()));
        let collected = aggregator
            .collect(City::Delhi, Occupation::FactoryWorker, 65)
            .await;

        assert_eq!(collected.mode, CollectionMode::Full);
        assert_eq!(collected.environment.aqi, 220);
        assert_eq!(collected.environment.temperature, 42.0);
        // 4 of 6 live
        assert_eq!(collected.data_quality.real_time_data_percentage.value(), 67);
        assert_eq!(collected.data_quality.overall, QualityGrade::Good);
        // six outbound labels plus two tables
        assert_eq!(collected.data_quality.source_count, 8);
    }

    #[tokio::test]
    async fn panicking_source_degrades_to_basic_mode() {
        let sources = StubSources {
            panic_on_crime: true,
            delay: Duration::ZERO,
        };
        let collected = DataAggregator::new(Arc::new(sources))
            .collect(City::Mumbai, Occupation::Doctor, 40)
            .await;

        assert_eq!(collected.mode, CollectionMode::Basic);
        assert_eq!(collected.data_quality.overall, QualityGrade::Poor);
    }

    #[tokio::test]
    async fn hung_source_falls_back_while_others_stay_live() {
        let sources = StubSources {
            panic_on_crime: false,
            delay: Duration::from_secs(30),
        };
        let started = Instant::now();
        let collected = DataAggregator::new(Arc::new(sources))
            .with_timeout(Duration::from_millis(50))
            .collect(City::Delhi, Occupation::FactoryWorker, 65)
            .await;

        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(collected.mode, CollectionMode::Full);
        // weather missed the deadline, the live AQI survives
        assert_eq!(collected.environment.aqi, 220);
        assert_eq!(
            collected.environment.temperature,
            WeatherReading::fallback().temperature
        );
        assert_eq!(
            collected.environment.provenance["temperature"],
            Provenance::Fallback(SourceKind::Weather)
        );
        assert_eq!(
            collected.environment.provenance["aqi"],
            Provenance::Live(SourceKind::AirQuality)
        );
        // 3 of 6 live
        assert_eq!(collected.data_quality.real_time_data_percentage.value(), 50);
        assert_eq!(collected.data_quality.overall, QualityGrade::Good);
    }

    #[test]
    fn basic_collection_uses_city_baselines() {
        let collected = basic_collection(City::Kolkata, Occupation::Driver, 50);
        let stats = CityStats::for_city(City::Kolkata);

        assert_eq!(collected.environment.aqi, stats.baseline_aqi);
        assert_eq!(collected.statistics.crime_rate, stats.crime_rate);
        assert!(collected.health_alerts.is_empty());
        assert_eq!(collected.data_quality.real_time_data_percentage.value(), 0);
        assert_eq!(collected.data_quality.source_count, 2);
    }
}
