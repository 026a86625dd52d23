//! Statistics module - mortality, crime and occupational figures,
//! the derived city health index and data-quality grading.

mod data_quality;
mod health_index;
mod readings;
mod snapshot;

pub use data_quality::{DataQuality, QualityGrade};
pub use health_index::city_health_index;
pub use readings::{CrimeReading, DeathRateReading, HealthAlert, OccupationRateReading};
pub use snapshot::{CollectedData, CollectionMode, StatisticalSnapshot};
