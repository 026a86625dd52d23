//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `cache` - In-memory TTL cache with a background sweeper
//! - `sources` - External data sources (HTTP and mock transports)
//! - `narrative` - Narrative text providers (OpenAI-compatible, mock)
//! - `profile` - Profile stores (in-memory, JSON files)
//! - `http` - REST API

pub mod cache;
pub mod http;
pub mod narrative;
pub mod profile;
pub mod sources;

pub use cache::InMemoryCache;
pub use narrative::{MockNarrativeProvider, OpenAINarrativeConfig, OpenAINarrativeProvider};
pub use profile::{FsProfileStore, InMemoryProfileStore};
pub use sources::{LiveHealthDataSources, MockTransport, ReqwestTransport, ResilientFetcher};
