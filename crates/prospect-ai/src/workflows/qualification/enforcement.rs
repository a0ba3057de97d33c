//! Deterministic audit of the reasoner's draft against absolute business
//! invariants. The chain is the only component allowed to derive a corrected
//! recommendation; the draft itself is never mutated.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::{
    Confidence, Decision, EvidenceCounts, Priority, QualificationResult, ReasonerOutput,
};
use super::policy::QualificationPolicy;

/// Identifies one enforcement rule in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    /// Any validated competitor evidence is a hard stop, whatever the draft said.
    CompetitorEvidenceVeto,
    /// Clean lead but weak buying intent: active pursuit becomes monitoring.
    LowIntentDowngrade,
    /// Clean lead with strong buying intent: monitoring becomes active pursuit.
    HighIntentUpgrade,
    /// Low confidence + cold priority can never justify an active GO.
    IncoherenceGuard,
    /// Too little corroborating data to justify an active GO.
    SparseDataGuard,
}

impl RuleId {
    pub const fn label(self) -> &'static str {
        match self {
            RuleId::CompetitorEvidenceVeto => "competitor_evidence_veto",
            RuleId::LowIntentDowngrade => "low_intent_downgrade",
            RuleId::HighIntentUpgrade => "high_intent_upgrade",
            RuleId::IncoherenceGuard => "incoherence_guard",
            RuleId::SparseDataGuard => "sparse_data_guard",
        }
    }
}

/// Runs the ordered rule chain over an immutable draft and returns the
/// corrected output plus the trail of rules that changed it.
///
/// The order is a designed priority, not incidental: the veto outranks the
/// intent rules, and the coherence guards run last over whatever the earlier
/// rules produced. A rule is recorded only when it actually changes the
/// output, which makes the whole chain idempotent: enforcing an
/// already-enforced output changes nothing and records nothing.
pub fn enforce(
    classification: &QualificationResult,
    draft: &ReasonerOutput,
    counts: &EvidenceCounts,
    intent_score: u8,
    policy: &QualificationPolicy,
) -> (ReasonerOutput, Vec<RuleId>) {
    let mut output = draft.clone();
    let mut trail = Vec::new();
    let score = classification.score;

    // Absolute veto: any validated evidence of competitor use, not just a
    // score above the disqualify threshold, blocks pursuit outright.
    let vetoed = score > 0;
    if vetoed {
        apply(RuleId::CompetitorEvidenceVeto, &mut output, &mut trail, |out| {
            out.decision = Decision::NoGo;
            out.priority = Priority::Disqualified;
            out.confidence = Confidence::High;
            out.summary = veto_summary(score);
            out.sections.risk = veto_risk_note();
        });
    } else if intent_score < policy.intent.monitor_below {
        if output.decision == Decision::Go {
            apply(RuleId::LowIntentDowngrade, &mut output, &mut trail, |out| {
                out.decision = Decision::Monitor;
                out.priority = Priority::Cold;
                out.confidence = Confidence::Low;
            });
        }
    } else if intent_score >= policy.intent.pursue_at && output.decision == Decision::Monitor {
        let confidence = if intent_score >= policy.intent.high_confidence_at {
            Confidence::High
        } else {
            Confidence::Medium
        };
        apply(RuleId::HighIntentUpgrade, &mut output, &mut trail, |out| {
            out.decision = Decision::Go;
            out.priority = Priority::Hot;
            out.confidence = confidence;
        });
    }

    // Coherence guards run on the possibly-adjusted output. They can never
    // contradict the veto: after it fires the decision is NO-GO, so neither
    // guard's GO precondition can hold.
    if !vetoed
        && output.confidence == Confidence::Low
        && output.priority == Priority::Cold
        && output.decision == Decision::Go
    {
        apply(RuleId::IncoherenceGuard, &mut output, &mut trail, |out| {
            out.decision = Decision::Monitor;
        });
    }

    if !vetoed
        && output.decision == Decision::Go
        && output.data_quality == Confidence::Low
        && counts.validated_sources < policy.sparse_data.min_validated_sources
        && counts.intent_signals < policy.sparse_data.min_intent_signals
    {
        apply(RuleId::SparseDataGuard, &mut output, &mut trail, |out| {
            out.decision = Decision::Monitor;
            out.priority = Priority::Cold;
        });
    }

    if !trail.is_empty() {
        info!(
            overrides = ?trail.iter().map(|rule| rule.label()).collect::<Vec<_>>(),
            decision = output.decision.label(),
            "enforcement overrides applied"
        );
    }

    (output, trail)
}

/// Applies a mutation and records the rule only if the output changed.
fn apply(
    rule: RuleId,
    output: &mut ReasonerOutput,
    trail: &mut Vec<RuleId>,
    mutate: impl FnOnce(&mut ReasonerOutput),
) {
    let before = output.clone();
    mutate(output);
    if *output != before {
        trail.push(rule);
    }
}

fn veto_summary(score: u8) -> String {
    format!(
        "Lead blocked by commercial policy: validated evidence of competitor product adoption \
         (evidence score {score}/100). Companies already running the competing product are not \
         prospected, regardless of surrounding context."
    )
}

fn veto_risk_note() -> String {
    "Critical: target already uses the competing product. Any outreach violates commercial \
     policy; remove from the active pipeline."
        .to_string()
}
