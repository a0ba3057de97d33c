use serde::{Deserialize, Serialize};
use tracing::warn;

use super::domain::{
    Confidence, Decision, EvidenceCounts, NarrativeSections, Priority, QualificationResult,
    QualificationStatus, RawReasonerOutput, ReasonerOutput, ValidatedEvidence,
};

/// Snapshot of the scored evidence handed to the qualitative reasoner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceSummary {
    pub company_name: String,
    pub evidence: Vec<ValidatedEvidence>,
    pub counts: EvidenceCounts,
    pub intent_score: u8,
}

/// Failure raised by a reasoner implementation. Never fatal to an analysis
/// run; the service falls back to a conservative output.
#[derive(Debug, thiserror::Error)]
pub enum ReasonerError {
    #[error("reasoner unavailable: {0}")]
    Unavailable(String),
    #[error("reasoner returned an unparseable payload: {0}")]
    Malformed(String),
}

/// Boundary to the natural-language reasoning step. Implementations are
/// non-deterministic: identical inputs may yield different drafts, and fields
/// may be internally inconsistent. Everything returned here is audited by the
/// enforcement chain before it can reach a human.
pub trait QualitativeReasoner: Send + Sync {
    fn reason(
        &self,
        summary: &EvidenceSummary,
        classification: &QualificationResult,
    ) -> Result<RawReasonerOutput, ReasonerError>;
}

/// Contract violation: a raw field fell outside the enumerated value sets.
#[derive(Debug, thiserror::Error)]
pub enum ContractViolation {
    #[error("unknown decision '{0}'")]
    Decision(String),
    #[error("unknown confidence '{0}'")]
    Confidence(String),
    #[error("unknown priority '{0}'")]
    Priority(String),
    #[error("unknown data quality '{0}'")]
    DataQuality(String),
}

impl ReasonerOutput {
    /// Schema-validates a raw reasoner response. Any out-of-enum field is a
    /// contract violation; callers must substitute [`ReasonerOutput::conservative_fallback`]
    /// rather than propagate malformed data.
    pub fn from_raw(raw: RawReasonerOutput) -> Result<Self, ContractViolation> {
        let decision = Decision::parse(&raw.decision)
            .ok_or_else(|| ContractViolation::Decision(raw.decision.clone()))?;
        let confidence = Confidence::parse(&raw.confidence)
            .ok_or_else(|| ContractViolation::Confidence(raw.confidence.clone()))?;
        let priority = Priority::parse(&raw.priority)
            .ok_or_else(|| ContractViolation::Priority(raw.priority.clone()))?;
        let data_quality = Confidence::parse(&raw.data_quality)
            .ok_or_else(|| ContractViolation::DataQuality(raw.data_quality.clone()))?;

        Ok(Self {
            decision,
            confidence,
            priority,
            summary: raw.summary,
            sections: raw.sections,
            data_quality,
        })
    }

    /// Conservative stand-in used whenever the reasoner fails or violates its
    /// contract. The failure bias is always toward monitoring, never toward an
    /// unearned qualification.
    pub fn conservative_fallback(classification: &QualificationResult) -> Self {
        let (decision, priority) = match classification.status {
            QualificationStatus::Disqualified => (Decision::NoGo, Priority::Disqualified),
            QualificationStatus::Qualified => (Decision::Monitor, Priority::Cold),
        };
        Self {
            decision,
            confidence: Confidence::Low,
            priority,
            summary: format!(
                "Automatic recommendation derived from numeric scores only (evidence score {}/100).",
                classification.score
            ),
            sections: NarrativeSections {
                evidence_review: format!("Evidence score: {}/100.", classification.score),
                intent_review: "Qualitative reasoning unavailable for this run.".to_string(),
                opportunity: "Insufficient narrative data; manual review advised.".to_string(),
                risk: "Recommendation produced without qualitative reasoning.".to_string(),
            },
            data_quality: Confidence::Low,
        }
    }
}

/// Deterministic reasoner deriving a draft purely from the numeric inputs.
/// Used by the demo CLI and as the default wiring when no language-model
/// backend is configured; also a convenient scripted stand-in for tests.
pub struct ScoreDrivenReasoner;

impl QualitativeReasoner for ScoreDrivenReasoner {
    fn reason(
        &self,
        summary: &EvidenceSummary,
        classification: &QualificationResult,
    ) -> Result<RawReasonerOutput, ReasonerError> {
        let (decision, priority, confidence) = if classification.score > 0 {
            ("NO-GO", "disqualified", "high")
        } else if summary.intent_score >= 70 {
            ("GO", "hot", "medium")
        } else if summary.intent_score >= 40 {
            ("GO", "warm", "medium")
        } else {
            ("MONITOR", "cold", "low")
        };

        let data_quality = if summary.counts.validated_sources + summary.counts.intent_signals >= 3
        {
            "medium"
        } else {
            "low"
        };

        Ok(RawReasonerOutput {
            decision: decision.to_string(),
            confidence: confidence.to_string(),
            priority: priority.to_string(),
            summary: format!(
                "{}: evidence score {}/100 across {} source(s), intent score {}/100.",
                summary.company_name,
                classification.score,
                summary.counts.validated_sources,
                summary.intent_score,
            ),
            sections: NarrativeSections {
                evidence_review: summary
                    .evidence
                    .iter()
                    .map(|item| item.narrative.clone())
                    .collect::<Vec<_>>()
                    .join("; "),
                intent_review: format!(
                    "{} intent signal(s), intent score {}/100.",
                    summary.counts.intent_signals, summary.intent_score
                ),
                opportunity: "Score-derived draft; no qualitative market context.".to_string(),
                risk: match classification.status {
                    QualificationStatus::Disqualified => {
                        "Confirmed competitor adoption; pursuit is against policy.".to_string()
                    }
                    QualificationStatus::Qualified => {
                        "No competitor evidence found in consulted sources.".to_string()
                    }
                },
            },
            data_quality: data_quality.to_string(),
        })
    }
}

/// Validates a raw draft, logging and substituting the fallback on violation.
pub(crate) fn audit_raw_output(
    raw: Result<RawReasonerOutput, ReasonerError>,
    classification: &QualificationResult,
) -> ReasonerOutput {
    match raw {
        Ok(raw) => match ReasonerOutput::from_raw(raw) {
            Ok(output) => output,
            Err(violation) => {
                warn!(%violation, "reasoner contract violation; using conservative fallback");
                ReasonerOutput::conservative_fallback(classification)
            }
        },
        Err(error) => {
            warn!(%error, "reasoner call failed; using conservative fallback");
            ReasonerOutput::conservative_fallback(classification)
        }
    }
}
