use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::classifier;
use super::domain::{EvidenceCandidate, EvidenceCounts, SourceId};
use super::enforcement;
use super::policy::{PolicyError, QualificationPolicy};
use super::reasoner::{self, EvidenceSummary, QualitativeReasoner};
use super::record::DecisionRecord;
use super::scoring;

/// One analysis request: the target company, the caller-computed buying-intent
/// inputs, and the raw candidates grouped by the source that produced them.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisRequest {
    pub company_name: String,
    /// Buying-intent score 0..=100, computed upstream from intent signals.
    pub intent_score: u8,
    /// Independent intent signals backing `intent_score`.
    #[serde(default)]
    pub intent_signal_count: usize,
    /// Missing keys mean the source failed upstream retrieval; an empty vec
    /// means the source was consulted and returned nothing.
    #[serde(default)]
    pub candidates_per_source: BTreeMap<SourceId, Vec<EvidenceCandidate>>,
}

/// Errors surfaced by the qualification workflow.
#[derive(Debug, thiserror::Error)]
pub enum QualificationError {
    #[error(transparent)]
    Policy(#[from] PolicyError),
    #[error("intent score {0} outside 0..=100")]
    IntentScoreOutOfRange(u8),
}

/// Orchestrates the full pipeline: score, classify, reason, enforce, record.
/// The policy is validated at construction and immutable afterwards.
pub struct QualificationService<R> {
    policy: QualificationPolicy,
    reasoner: Arc<R>,
}

impl<R> QualificationService<R>
where
    R: QualitativeReasoner,
{
    pub fn new(policy: QualificationPolicy, reasoner: Arc<R>) -> Result<Self, QualificationError> {
        policy.validate()?;
        Ok(Self { policy, reasoner })
    }

    pub fn policy(&self) -> &QualificationPolicy {
        &self.policy
    }

    /// Runs one analysis end to end and returns the immutable decision record.
    ///
    /// The quantitative stages are pure functions of the request and the
    /// policy. The reasoner is the only non-deterministic step, and its draft
    /// never reaches the record unaudited.
    pub fn analyze(&self, request: &AnalysisRequest) -> Result<DecisionRecord, QualificationError> {
        if request.intent_score > 100 {
            return Err(QualificationError::IntentScoreOutOfRange(
                request.intent_score,
            ));
        }

        let outcome = scoring::score_candidates(
            &self.policy,
            &request.company_name,
            &request.candidates_per_source,
        );
        let classification = classifier::classify(&outcome.breakdown, &self.policy.thresholds);

        let counts = EvidenceCounts {
            validated_sources: outcome.evidence.len(),
            intent_signals: request.intent_signal_count,
        };
        let summary = EvidenceSummary {
            company_name: request.company_name.clone(),
            evidence: outcome.evidence.clone(),
            counts,
            intent_score: request.intent_score,
        };

        let raw = self.reasoner.reason(&summary, &classification);
        let draft = reasoner::audit_raw_output(raw, &classification);

        let (enforced, overrides) = enforcement::enforce(
            &classification,
            &draft,
            &counts,
            request.intent_score,
            &self.policy,
        );

        let record = DecisionRecord::build(
            request.company_name.clone(),
            classification,
            outcome.breakdown,
            outcome.discards,
            draft,
            enforced,
            overrides,
        );

        info!(
            company = %record.company_name,
            score = record.qualification.score,
            status = record.qualification.status.label(),
            decision = record.enforced_output.decision.label(),
            overridden = record.was_overridden(),
            "analysis complete"
        );

        Ok(record)
    }
}
