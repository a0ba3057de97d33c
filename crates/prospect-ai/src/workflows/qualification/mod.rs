//! Lead qualification decision engine.
//!
//! The pipeline runs in fixed stages: raw candidates from the registered
//! evidence sources are validated and scored, the bounded score is classified,
//! a qualitative reasoner drafts a recommendation, the enforcement chain
//! audits that draft against business invariants, and everything lands in an
//! immutable decision record.

pub mod domain;
pub(crate) mod normalizer;
pub mod policy;
pub mod router;
pub mod service;

mod classifier;
mod enforcement;
mod reasoner;
mod record;
mod scoring;
mod validator;

#[cfg(test)]
mod tests;

pub use domain::{
    BreakdownRow, Confidence, Decision, DiscardedCandidate, EvidenceCandidate, EvidenceCounts,
    NarrativeSections, Priority, QualificationResult, QualificationStatus, RawReasonerOutput,
    ReasonerOutput, ReliabilityTier, ScoreBreakdown, Source, SourceId, Temperature,
    ValidatedEvidence, ValidationRejection,
};
pub use enforcement::{enforce, RuleId};
pub use policy::{
    ClassifierThresholds, IntentBands, PolicyError, QualificationPolicy, SparseDataFloor,
};
pub use reasoner::{
    ContractViolation, EvidenceSummary, QualitativeReasoner, ReasonerError, ScoreDrivenReasoner,
};
pub use record::{DecisionRecord, DecisionSummary};
pub use router::qualification_router;
pub use scoring::{score_candidates, ScoringOutcome, SCORE_CAP};
pub use service::{AnalysisRequest, QualificationError, QualificationService};
