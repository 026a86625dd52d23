//! Static reference tables, embedded in the binary and parsed once.
//!
//! These are always blended into collected data; they are not the fallback
//! path for a failed source.

mod city_stats;
mod occupation_stats;

pub use city_stats::{CityStats, CITY_TABLE_NAME};
pub use occupation_stats::{HazardLevel, OccupationStats, OCCUPATION_TABLE_NAME};
