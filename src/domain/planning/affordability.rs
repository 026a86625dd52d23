//! Affordability of a premium against monthly income.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinancialStrain {
    Low,
    Moderate,
    High,
    Critical,
}

impl FinancialStrain {
    fn from_income_percentage(pct: f64) -> Self {
        if pct <= 5.0 {
            FinancialStrain::Low
        } else if pct <= 10.0 {
            FinancialStrain::Moderate
        } else if pct <= 20.0 {
            FinancialStrain::High
        } else {
            FinancialStrain::Critical
        }
    }

    fn recommendation(&self) -> &'static str {
        match self {
            FinancialStrain::Low => "Comfortably affordable within your monthly budget.",
            FinancialStrain::Moderate => {
                "Affordable with some budgeting; consider an annual payment discount."
            }
            FinancialStrain::High => {
                "A significant share of income; consider a higher deductible or a lower tier."
            }
            FinancialStrain::Critical => {
                "Not affordable at current income; consider government schemes or employer cover."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Affordability {
    /// 0-100, higher is more affordable.
    pub score: u8,
    /// Premium as a share of monthly income, rounded to one decimal.
    pub income_percentage: f64,
    pub strain: FinancialStrain,
    pub recommendation: String,
}

impl Affordability {
    /// Evaluates a monthly premium against monthly income.
    ///
    /// Zero income is treated as the premium consuming all of it.
    pub fn evaluate(premium: u64, monthly_income: u64) -> Self {
        let pct = if monthly_income == 0 {
            100.0
        } else {
            premium as f64 / monthly_income as f64 * 100.0
        };
        let strain = FinancialStrain::from_income_percentage(pct);
        Self {
            score: (100.0 - 4.0 * pct).round().clamp(0.0, 100.0) as u8,
            income_percentage: (pct * 10.0).round() / 10.0,
            strain,
            recommendation: strain.recommendation().to_string(),
        }
    }
}
