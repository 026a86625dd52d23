//! Health Risk Advisor - personal health risk scoring and insurance planning.
//!
//! A profile is combined with live environmental, mortality, occupational and
//! crime data (falling back to embedded reference tables whenever a source is
//! unavailable), scored on a 0-100 scale, and turned into an insurance and
//! savings recommendation.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
