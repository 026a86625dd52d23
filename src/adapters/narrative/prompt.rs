//! Prompt construction and static copy for narrative enrichment.

use std::fmt::Write;

use crate::ports::NarrativeRequest;

/// Factors listed in the prompt, highest impact first.
const PROMPT_FACTORS: usize = 5;

pub const SYSTEM_PROMPT: &str = "You are a health risk advisor for residents of Indian cities. \
Explain the assessment in plain language in two short paragraphs, then give three concrete \
prevention steps. Do not invent numbers that are not in the assessment.";

/// Renders the user message sent to the model.
pub fn user_prompt(request: &NarrativeRequest) -> String {
    let profile = &request.profile;
    let assessment = &request.assessment;

    let mut prompt = format!(
        "Profile: {} year old {} in {}, {} shift.\n",
        profile.age, profile.occupation, profile.city, profile.work_shift
    );
    if let Some(condition) = profile.health_condition.as_deref() {
        let _ = writeln!(prompt, "Health condition: {}", condition);
    }
    if let Some(addictions) = profile.addictions.as_deref() {
        let _ = writeln!(prompt, "Addictions: {}", addictions);
    }
    let _ = writeln!(
        prompt,
        "Risk score: {}/100 ({} risk).",
        assessment.score, assessment.level
    );
    prompt.push_str("Main factors:\n");
    for factor in assessment.top_factors(PROMPT_FACTORS) {
        let _ = writeln!(prompt, "- {} (impact {})", factor.description, factor.impact);
    }
    if request.data_quality.needs_disclaimer() {
        prompt.push_str("Some live data was unavailable; mention that figures are estimates.\n");
    }
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::risk::test_support::{collected, profile};
    use crate::domain::risk::RiskScorer;
    use crate::domain::statistics::QualityGrade;

    fn request(grade: QualityGrade) -> NarrativeRequest {
        let profile = profile(65, "Factory Worker", "Delhi", "Diabetes", "Night");
        let data = collected(&profile, 220, 41.0, 1586.1);
        NarrativeRequest {
            assessment: RiskScorer::score(&profile, &data),
            profile,
            data_quality: grade,
        }
    }

    #[test]
    fn prompt_mentions_profile_and_score() {
        let prompt = user_prompt(&request(QualityGrade::Excellent));
        assert!(prompt.contains("65 year old Factory Worker in Delhi"));
        assert!(prompt.contains("Health condition: Diabetes"));
        assert!(prompt.contains("/100"));
        assert!(!prompt.contains("estimates"));
    }

    #[test]
    fn prompt_adds_disclaimer_for_poor_data() {
        let prompt = user_prompt(&request(QualityGrade::Poor));
        assert!(prompt.contains("estimates"));
    }
}
