//! Data-quality grading of a collection pass.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Percentage;
use crate::domain::provenance::Provenance;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityGrade {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl QualityGrade {
    fn from_live_share(share: Percentage) -> Self {
        match share.value() {
            75..=100 => QualityGrade::Excellent,
            50..=74 => QualityGrade::Good,
            25..=49 => QualityGrade::Fair,
            _ => QualityGrade::Poor,
        }
    }

    /// Fair and poor results should carry an "estimated data" disclaimer.
    pub fn needs_disclaimer(&self) -> bool {
        matches!(self, QualityGrade::Fair | QualityGrade::Poor)
    }
}

/// How much of the collected data came from live sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataQuality {
    pub overall: QualityGrade,
    pub source_count: usize,
    pub real_time_data_percentage: Percentage,
}

impl DataQuality {
    /// Grades a pass from the outcome of each outbound source call.
    ///
    /// `static_tables` only contribute to `source_count`.
    pub fn assess(outbound: &[Provenance], static_tables: &[Provenance]) -> Self {
        let live = outbound.iter().filter(|p| p.is_live()).count();
        let share = Percentage::from_ratio(live, outbound.len());
        let labels: BTreeSet<String> = outbound
            .iter()
            .chain(static_tables)
            .map(Provenance::label)
            .collect();

        Self {
            overall: QualityGrade::from_live_share(share),
            source_count: labels.len(),
            real_time_data_percentage: share,
        }
    }
}
