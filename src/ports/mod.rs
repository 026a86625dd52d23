//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `Cache` - TTL key/value store, plus the `with_cache` read-through helper
//! - `SourceTransport` - Raw HTTP access to an external data source
//! - `HealthDataSources` - Typed, never-failing readings for every source
//! - `NarrativeProvider` - Optional free-text enrichment
//! - `ProfileReader` - Stored user profiles

mod cache;
mod data_source;
mod narrative;
mod profile_reader;

pub use cache::{cache_key, with_cache, Cache};
pub use data_source::{
    FailureCategory, HealthDataSources, SourceError, SourceRequest, SourceTransport, Sourced,
};
pub use narrative::{NarrativeError, NarrativeProvider, NarrativeRequest};
pub use profile_reader::ProfileReader;
