use std::collections::BTreeMap;

use chrono::{TimeZone, Utc};

use crate::workflows::qualification::domain::{
    EvidenceCandidate, NarrativeSections, QualificationResult, RawReasonerOutput, SourceId,
};
use crate::workflows::qualification::policy::QualificationPolicy;
use crate::workflows::qualification::reasoner::{
    EvidenceSummary, QualitativeReasoner, ReasonerError,
};
use crate::workflows::qualification::service::AnalysisRequest;

pub(super) fn policy() -> QualificationPolicy {
    QualificationPolicy::default()
}

pub(super) fn candidate(source: &str, text: &str) -> EvidenceCandidate {
    EvidenceCandidate {
        source_id: SourceId::new(source),
        raw_text: text.to_string(),
        url: Some(format!("https://example.test/{source}")),
        retrieved_at: Utc
            .with_ymd_and_hms(2026, 3, 14, 9, 30, 0)
            .single()
            .expect("valid timestamp"),
    }
}

pub(super) fn candidates(
    entries: &[(&str, &[&str])],
) -> BTreeMap<SourceId, Vec<EvidenceCandidate>> {
    entries
        .iter()
        .map(|(source, texts)| {
            (
                SourceId::new(*source),
                texts.iter().map(|text| candidate(source, text)).collect(),
            )
        })
        .collect()
}

pub(super) fn request(
    company_name: &str,
    intent_score: u8,
    intent_signal_count: usize,
    candidates_per_source: BTreeMap<SourceId, Vec<EvidenceCandidate>>,
) -> AnalysisRequest {
    AnalysisRequest {
        company_name: company_name.to_string(),
        intent_score,
        intent_signal_count,
        candidates_per_source,
    }
}

pub(super) fn raw_output(
    decision: &str,
    confidence: &str,
    priority: &str,
    data_quality: &str,
) -> RawReasonerOutput {
    RawReasonerOutput {
        decision: decision.to_string(),
        confidence: confidence.to_string(),
        priority: priority.to_string(),
        summary: "scripted draft".to_string(),
        sections: NarrativeSections::default(),
        data_quality: data_quality.to_string(),
    }
}

/// Reasoner returning a fixed draft, whatever the inputs.
pub(super) struct ScriptedReasoner {
    pub raw: RawReasonerOutput,
}

impl QualitativeReasoner for ScriptedReasoner {
    fn reason(
        &self,
        _summary: &EvidenceSummary,
        _classification: &QualificationResult,
    ) -> Result<RawReasonerOutput, ReasonerError> {
        Ok(self.raw.clone())
    }
}

/// Reasoner simulating a backend outage.
pub(super) struct FailingReasoner;

impl QualitativeReasoner for FailingReasoner {
    fn reason(
        &self,
        _summary: &EvidenceSummary,
        _classification: &QualificationResult,
    ) -> Result<RawReasonerOutput, ReasonerError> {
        Err(ReasonerError::Unavailable("scripted outage".to_string()))
    }
}
