use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{
    DiscardedCandidate, QualificationResult, ReasonerOutput, ScoreBreakdown,
};
use super::enforcement::RuleId;

/// Immutable audit record for one analysis run. Preserves the reasoner's
/// original draft next to the enforced output so a reviewer can always see
/// what the automated audit changed and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub company_name: String,
    pub qualification: QualificationResult,
    pub breakdown: ScoreBreakdown,
    pub discards: Vec<DiscardedCandidate>,
    pub reasoner_output: ReasonerOutput,
    pub enforced_output: ReasonerOutput,
    pub overrides_applied: Vec<RuleId>,
    pub generated_at: DateTime<Utc>,
}

impl DecisionRecord {
    pub fn build(
        company_name: String,
        qualification: QualificationResult,
        breakdown: ScoreBreakdown,
        discards: Vec<DiscardedCandidate>,
        reasoner_output: ReasonerOutput,
        enforced_output: ReasonerOutput,
        overrides_applied: Vec<RuleId>,
    ) -> Self {
        Self {
            company_name,
            qualification,
            breakdown,
            discards,
            reasoner_output,
            enforced_output,
            overrides_applied,
            generated_at: Utc::now(),
        }
    }

    /// True when the enforcement chain changed anything in the draft.
    pub fn was_overridden(&self) -> bool {
        !self.overrides_applied.is_empty()
    }

    /// Compact view for API responses and operator tooling.
    pub fn summary(&self) -> DecisionSummary {
        DecisionSummary {
            company_name: self.company_name.clone(),
            score: self.qualification.score,
            status: self.qualification.status.label().to_string(),
            temperature: self.qualification.temperature.label().to_string(),
            decision: self.enforced_output.decision.label().to_string(),
            priority: self.enforced_output.priority.label().to_string(),
            confidence: self.enforced_output.confidence.label().to_string(),
            overrides_applied: self
                .overrides_applied
                .iter()
                .map(|rule| rule.label().to_string())
                .collect(),
            generated_at: self.generated_at,
        }
    }
}

/// Flattened single-line view of a decision record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionSummary {
    pub company_name: String,
    pub score: u8,
    pub status: String,
    pub temperature: String,
    pub decision: String,
    pub priority: String,
    pub confidence: String,
    pub overrides_applied: Vec<String>,
    pub generated_at: DateTime<Utc>,
}
