//! Planning module - insurance plan selection and savings targets.

mod affordability;
mod catalogue;
mod planner;

pub use affordability::{Affordability, FinancialStrain};
pub use catalogue::PlanTier;
pub use planner::{FinancialPlan, FinancialPlanner, InsurancePlan};
