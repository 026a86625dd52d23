//! Domain layer containing the risk model and its value types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, percentages, timestamps, errors)
//! - `profile` - User profile and the supported cities and occupations
//! - `reference` - Embedded per-city and per-occupation tables
//! - `provenance` - Source kinds and live/fallback/static labels
//! - `environment` - Climate readings and classification
//! - `statistics` - Mortality, crime, city health index, data quality
//! - `risk` - Weighted scoring and ranked risk factors
//! - `planning` - Insurance selection, affordability and savings

pub mod environment;
pub mod foundation;
pub mod planning;
pub mod profile;
pub mod provenance;
pub mod reference;
pub mod risk;
pub mod statistics;
