//! Financial planner: plan selection, savings and emergency-fund targets.

use serde::{Deserialize, Serialize};

use super::affordability::Affordability;
use super::catalogue::PlanTier;
use crate::domain::risk::RiskLevel;

/// An insurance plan evaluated against the user's income.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsurancePlan {
    pub name: String,
    #[serde(rename = "type")]
    pub plan_type: String,
    pub tier: PlanTier,
    pub coverage: u64,
    pub premium: u64,
    pub features: Vec<String>,
    pub advantages: Vec<String>,
    pub disadvantages: Vec<String>,
    pub affordability: Affordability,
}

impl InsurancePlan {
    pub fn evaluate(tier: PlanTier, monthly_income: u64) -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        Self {
            name: tier.name().to_string(),
            plan_type: tier.plan_type().to_string(),
            tier,
            coverage: tier.coverage(),
            premium: tier.premium(),
            features: owned(tier.features()),
            advantages: owned(tier.advantages()),
            disadvantages: owned(tier.disadvantages()),
            affordability: Affordability::evaluate(tier.premium(), monthly_income),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialPlan {
    pub insurance_plan: InsurancePlan,
    /// The other tiers, evaluated against the same income.
    pub alternative_plans: Vec<InsurancePlan>,
    pub monthly_savings: u64,
    pub emergency_fund_target: u64,
}

pub struct FinancialPlanner;

impl FinancialPlanner {
    const BASELINE_SAVINGS: u64 = 2_000;
    const MIDPOINT_SCORE: u64 = 50;

    pub fn plan(risk_score: u8, monthly_income: u64) -> FinancialPlan {
        let recommended = PlanTier::for_score(risk_score);
        let alternative_plans = PlanTier::all()
            .into_iter()
            .filter(|tier| *tier != recommended)
            .map(|tier| InsurancePlan::evaluate(tier, monthly_income))
            .collect();
        let monthly_savings = Self::monthly_savings(risk_score);

        FinancialPlan {
            insurance_plan: InsurancePlan::evaluate(recommended, monthly_income),
            alternative_plans,
            monthly_savings,
            emergency_fund_target: Self::emergency_fund_target(
                risk_score,
                monthly_income,
                monthly_savings,
            ),
        }
    }

    /// 2000 scaled linearly by the score relative to 50.
    pub fn monthly_savings(risk_score: u8) -> u64 {
        let score = u64::from(risk_score);
        (Self::BASELINE_SAVINGS * score + Self::MIDPOINT_SCORE / 2) / Self::MIDPOINT_SCORE
    }

    /// Months of income to hold in reserve, growing with risk level.
    ///
    /// Without an income figure the savings target stands in for it.
    pub fn emergency_fund_target(risk_score: u8, monthly_income: u64, monthly_savings: u64) -> u64 {
        let months: u64 = match RiskLevel::from_score(risk_score) {
            RiskLevel::Low => 3,
            RiskLevel::Medium => 6,
            RiskLevel::High => 9,
            RiskLevel::Critical => 12,
        };
        let base = if monthly_income == 0 {
            monthly_savings
        } else {
            monthly_income
        };
        months.saturating_mul(base)
    }
}
