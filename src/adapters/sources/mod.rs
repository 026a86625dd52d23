//! Outbound data source adapters.
//!
//! - `ReqwestTransport` - HTTP transport for production
//! - `MockTransport` - Scripted replies for tests
//! - `ResilientFetcher` - Cache, retry and fallback around any `SourceStrategy`
//! - `LiveHealthDataSources` - The six sources behind `HealthDataSources`

mod http_transport;
mod live;
mod mock_transport;
mod news;
mod resilient;
mod settings;
mod statistics;
mod weather;

pub use http_transport::ReqwestTransport;
pub use live::LiveHealthDataSources;
pub use mock_transport::{MockReply, MockTransport};
pub use news::HealthAlertSource;
pub use resilient::{ResilientFetcher, SourceStrategy};
pub use settings::SourceSettings;
pub use statistics::{CrimeSource, DeathRateSource, OccupationSource};
pub use weather::{AirQualitySource, WeatherSource};
