//! AnalyzeProfileHandler - the inbound `analyze` operation.
//!
//! profile → aggregation → scoring → planning → optional narrative.
//! Only input validation and profile lookup can fail; every data-source
//! or narrative failure degrades inside the pipeline.

use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::application::aggregation::DataAggregator;
use crate::domain::foundation::{DomainError, Timestamp, UserId, ValidationError};
use crate::domain::planning::{FinancialPlan, FinancialPlanner};
use crate::domain::profile::{RawProfile, UserProfile};
use crate::domain::risk::{RiskAssessment, RiskLevel, RiskScorer};
use crate::domain::statistics::CollectedData;
use crate::ports::{NarrativeError, NarrativeProvider, NarrativeRequest, ProfileReader};

/// Default bound on narrative generation.
pub const DEFAULT_NARRATIVE_TIMEOUT: Duration = Duration::from_secs(10);

/// Free-text explanation attached to a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Narrative {
    pub text: String,
    /// False when `text` is the static copy.
    pub generated: bool,
}

/// Everything the presentation layer renders for one analysis.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub profile: UserProfile,
    pub collected: CollectedData,
    pub assessment: RiskAssessment,
    pub financial_plan: FinancialPlan,
    pub narrative: Narrative,
    pub analyzed_at: Timestamp,
}

/// Copy used when no provider is configured or generation fails.
pub fn static_narrative(level: RiskLevel) -> String {
    let summary = match level {
        RiskLevel::Low => "Your overall health risk is low.",
        RiskLevel::Medium => "Your overall health risk is moderate.",
        RiskLevel::High => "Your overall health risk is high.",
        RiskLevel::Critical => "Your overall health risk is critical.",
    };
    format!(
        "{} Review the risk factors listed in this report, schedule regular health check-ups, \
         and keep an emergency fund in line with the recommended target.",
        summary
    )
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("invalid profile: {0}")]
    InvalidInput(#[from] ValidationError),

    #[error("no profile stored for user {0}")]
    ProfileNotFound(UserId),

    #[error("profile store error: {0}")]
    ProfileStore(DomainError),
}

/// Handler for profile analysis.
pub struct AnalyzeProfileHandler {
    aggregator: DataAggregator,
    profiles: Arc<dyn ProfileReader>,
    narrator: Option<Arc<dyn NarrativeProvider>>,
    narrative_timeout: Duration,
}

impl AnalyzeProfileHandler {
    pub fn new(aggregator: DataAggregator, profiles: Arc<dyn ProfileReader>) -> Self {
        Self {
            aggregator,
            profiles,
            narrator: None,
            narrative_timeout: DEFAULT_NARRATIVE_TIMEOUT,
        }
    }

    pub fn with_narrator(mut self, narrator: Arc<dyn NarrativeProvider>) -> Self {
        self.narrator = Some(narrator);
        self
    }

    pub fn with_narrative_timeout(mut self, timeout: Duration) -> Self {
        self.narrative_timeout = timeout;
        self
    }

    /// Validates a raw profile and analyzes it.
    pub async fn handle(&self, raw: RawProfile) -> Result<AnalysisResult, AnalysisError> {
        let profile = UserProfile::try_from(raw)?;
        Ok(self.analyze(profile).await)
    }

    /// Loads a stored profile and analyzes it.
    pub async fn handle_user(&self, user_id: &UserId) -> Result<AnalysisResult, AnalysisError> {
        let raw = self
            .profiles
            .find(user_id)
            .await
            .map_err(AnalysisError::ProfileStore)?
            .ok_or_else(|| AnalysisError::ProfileNotFound(user_id.clone()))?;
        self.handle(raw).await
    }

    async fn analyze(&self, profile: UserProfile) -> AnalysisResult {
        let collected = self
            .aggregator
            .collect(profile.city, profile.occupation, profile.age)
            .await;
        let assessment = RiskScorer::score(&profile, &collected);
        let financial_plan = FinancialPlanner::plan(assessment.score, profile.monthly_income);

        tracing::info!(
            city = %profile.city,
            occupation = %profile.occupation,
            score = assessment.score,
            level = %assessment.level,
            plan = %financial_plan.insurance_plan.name,
            "Profile analyzed"
        );

        let narrative = self.narrate(&profile, &assessment, &collected).await;

        AnalysisResult {
            profile,
            collected,
            assessment,
            financial_plan,
            narrative,
            analyzed_at: Timestamp::now(),
        }
    }

    async fn narrate(
        &self,
        profile: &UserProfile,
        assessment: &RiskAssessment,
        collected: &CollectedData,
    ) -> Narrative {
        let fallback = Narrative {
            text: static_narrative(assessment.level),
            generated: false,
        };
        let Some(narrator) = &self.narrator else {
            return fallback;
        };

        let request = NarrativeRequest {
            profile: profile.clone(),
            assessment: assessment.clone(),
            data_quality: collected.data_quality.overall,
        };
        let result = tokio::time::timeout(self.narrative_timeout, narrator.generate(&request))
            .await
            .unwrap_or(Err(NarrativeError::Timeout));

        match result {
            Ok(text) => Narrative {
                text,
                generated: true,
            },
            Err(err) => {
                tracing::warn!(provider = narrator.name(), error = %err, "Narrative unavailable, using static text");
                fallback
            }
        }
    }
}
