//! Insurance plan tiers on offer.

use serde::{Deserialize, Serialize};

/// Plan tier, selected by risk-score band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanTier {
    Essential,
    Comprehensive,
    Premium,
}

impl PlanTier {
    /// Tiers in the order they are listed to the user.
    pub fn all() -> [PlanTier; 3] {
        [PlanTier::Premium, PlanTier::Comprehensive, PlanTier::Essential]
    }

    /// Above 70 is premium, above 50 comprehensive, otherwise essential.
    pub fn for_score(score: u8) -> Self {
        if score > 70 {
            PlanTier::Premium
        } else if score > 50 {
            PlanTier::Comprehensive
        } else {
            PlanTier::Essential
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PlanTier::Premium => "Premium Health Shield",
            PlanTier::Comprehensive => "Comprehensive Care Plus",
            PlanTier::Essential => "Essential Health Cover",
        }
    }

    pub fn plan_type(&self) -> &'static str {
        match self {
            PlanTier::Premium => "Comprehensive Family Floater",
            PlanTier::Comprehensive => "Individual Comprehensive",
            PlanTier::Essential => "Individual Basic",
        }
    }

    /// Sum insured.
    pub fn coverage(&self) -> u64 {
        match self {
            PlanTier::Premium => 1_000_000,
            PlanTier::Comprehensive => 500_000,
            PlanTier::Essential => 300_000,
        }
    }

    /// Monthly premium.
    pub fn premium(&self) -> u64 {
        match self {
            PlanTier::Premium => 8_500,
            PlanTier::Comprehensive => 5_500,
            PlanTier::Essential => 3_500,
        }
    }

    pub fn features(&self) -> &'static [&'static str] {
        match self {
            PlanTier::Premium => &[
                "Cashless hospitalisation at 10,000+ network hospitals",
                "Critical illness cover for 30+ conditions",
                "Pre and post hospitalisation for 90/180 days",
                "Annual comprehensive health check-up",
                "Air ambulance cover",
            ],
            PlanTier::Comprehensive => &[
                "Cashless hospitalisation at 7,000+ network hospitals",
                "Pre and post hospitalisation for 60/90 days",
                "Day-care procedures covered",
                "Annual health check-up",
            ],
            PlanTier::Essential => &[
                "Cashless hospitalisation at 5,000+ network hospitals",
                "Pre and post hospitalisation for 30/60 days",
                "Day-care procedures covered",
            ],
        }
    }

    pub fn advantages(&self) -> &'static [&'static str] {
        match self {
            PlanTier::Premium => &[
                "Highest coverage for chronic and critical conditions",
                "No room rent capping",
                "Shortest waiting period for pre-existing diseases",
            ],
            PlanTier::Comprehensive => &[
                "Balanced coverage and premium",
                "Covers most common hospitalisation needs",
            ],
            PlanTier::Essential => &[
                "Lowest premium",
                "Sufficient for routine hospitalisation",
            ],
        }
    }

    pub fn disadvantages(&self) -> &'static [&'static str] {
        match self {
            PlanTier::Premium => &["Highest premium", "May exceed needs of low-risk profiles"],
            PlanTier::Comprehensive => &[
                "Room rent capped at 1% of sum insured",
                "Limited critical illness cover",
            ],
            PlanTier::Essential => &[
                "No critical illness cover",
                "Longer waiting period for pre-existing diseases",
                "Co-payment above age 60",
            ],
        }
    }
}
