//! Aggregation of live sources and reference tables into `CollectedData`.

mod aggregator;

pub use aggregator::{basic_collection, DataAggregator, DEFAULT_AGGREGATION_TIMEOUT};
