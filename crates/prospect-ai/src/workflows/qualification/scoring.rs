use std::collections::BTreeMap;

use tracing::debug;

use super::domain::{
    BreakdownRow, DiscardedCandidate, EvidenceCandidate, ScoreBreakdown, SourceId,
    ValidatedEvidence,
};
use super::policy::QualificationPolicy;
use super::validator;

/// Hard cap on the aggregate score; points beyond it are clamped, not summed.
pub const SCORE_CAP: u8 = 100;

pub(crate) const REASON_SOURCE_UNAVAILABLE: &str = "source unavailable";
pub(crate) const REASON_NO_VALID_EVIDENCE: &str = "candidates present but none validated";
pub(crate) const REASON_NO_CANDIDATES: &str = "no candidates returned";

/// Everything the scorer produced for one analysis run.
#[derive(Debug, Clone)]
pub struct ScoringOutcome {
    pub breakdown: ScoreBreakdown,
    pub evidence: Vec<ValidatedEvidence>,
    pub discards: Vec<DiscardedCandidate>,
}

/// Aggregates candidates across all registered sources into a bounded score.
///
/// Sources are visited in registry order. Within one source, candidates are
/// validated in arrival order and only the first success counts: diversity of
/// sources matters more than depth within one, and a single chatty source must
/// not dominate the score. A breakdown row is recorded for every registry
/// source, so zero-point outcomes stay explainable. A source missing from
/// `candidates_per_source` failed upstream retrieval; it is recorded as
/// unavailable, which is a different audit fact than "no evidence found".
pub fn score_candidates(
    policy: &QualificationPolicy,
    company_name: &str,
    candidates_per_source: &BTreeMap<SourceId, Vec<EvidenceCandidate>>,
) -> ScoringOutcome {
    let mut rows = Vec::with_capacity(policy.sources.len());
    let mut evidence = Vec::new();
    let mut discards = Vec::new();

    for source in &policy.sources {
        let Some(candidates) = candidates_per_source.get(&source.id) else {
            rows.push(BreakdownRow {
                source_id: source.id.clone(),
                points_awarded: 0,
                max_points: source.max_weight,
                reason: REASON_SOURCE_UNAVAILABLE.to_string(),
            });
            continue;
        };

        let mut accepted: Option<ValidatedEvidence> = None;
        for candidate in candidates {
            if accepted.is_some() {
                // First valid hit per source wins; later candidates are ignored.
                break;
            }
            match validator::validate(candidate, company_name, source, policy) {
                Ok(validated) => {
                    debug!(source = %source.id.0, "candidate validated");
                    accepted = Some(validated);
                }
                Err(rejection) => {
                    discards.push(DiscardedCandidate {
                        source_id: source.id.clone(),
                        url: candidate.url.clone(),
                        reason: rejection.reason().to_string(),
                        rejection,
                    });
                }
            }
        }

        match accepted {
            Some(validated) => {
                rows.push(BreakdownRow {
                    source_id: source.id.clone(),
                    points_awarded: source.max_weight,
                    max_points: source.max_weight,
                    reason: validated.narrative.clone(),
                });
                evidence.push(validated);
            }
            None => {
                let reason = if candidates.is_empty() {
                    REASON_NO_CANDIDATES
                } else {
                    REASON_NO_VALID_EVIDENCE
                };
                rows.push(BreakdownRow {
                    source_id: source.id.clone(),
                    points_awarded: 0,
                    max_points: source.max_weight,
                    reason: reason.to_string(),
                });
            }
        }
    }

    let raw_total: u32 = rows.iter().map(|row| u32::from(row.points_awarded)).sum();
    // Clamp once, at the end: rows keep true per-source points.
    let final_score = raw_total.min(u32::from(SCORE_CAP)) as u8;

    debug!(raw_total, final_score, sources = rows.len(), "scoring complete");

    ScoringOutcome {
        breakdown: ScoreBreakdown { rows, final_score },
        evidence,
        discards,
    }
}
