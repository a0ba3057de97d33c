use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for registered evidence sources.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SourceId(pub String);

impl SourceId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

/// Trust band assigned to a source in the registry. Tiers carry no weight of
/// their own; they label the breakdown for reviewers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReliabilityTier {
    Official,
    Premium,
    Standard,
    Community,
}

/// Static registry entry defining the scoring ceiling for one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub id: SourceId,
    pub display_name: String,
    /// Points awarded when this source yields validated evidence, 1..=30.
    pub max_weight: u8,
    pub reliability_tier: ReliabilityTier,
}

/// A single unvalidated observation retrieved from one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceCandidate {
    pub source_id: SourceId,
    pub raw_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub retrieved_at: DateTime<Utc>,
}

/// Three-level confidence scale shared by evidence and reasoner output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

/// Evidence accepted by the validator: the candidate mentioned the target
/// company and carried at least one qualifying signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedEvidence {
    pub source_id: SourceId,
    pub matched_company_tokens: Vec<String>,
    pub detected_signals: Vec<String>,
    pub weight: u8,
    pub confidence: Confidence,
    pub narrative: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Reason a candidate was turned away. Rejections are recorded, never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationRejection {
    CompanyNameMissing,
    NoCompanyMention,
    NoQualifyingSignal,
    CompetitorSelfReference,
}

impl ValidationRejection {
    pub const fn reason(self) -> &'static str {
        match self {
            ValidationRejection::CompanyNameMissing => {
                "target company name is empty; validation fails closed"
            }
            ValidationRejection::NoCompanyMention => "does not mention company",
            ValidationRejection::NoQualifyingSignal => {
                "mentions company but no qualifying signal"
            }
            ValidationRejection::CompetitorSelfReference => {
                "text is published by the competitor itself, not the target company"
            }
        }
    }
}

/// Discard-log entry explaining one rejected candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscardedCandidate {
    pub source_id: SourceId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub rejection: ValidationRejection,
    pub reason: String,
}

/// One breakdown row per consulted source, zero-point rows included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownRow {
    pub source_id: SourceId,
    pub points_awarded: u8,
    pub max_points: u8,
    pub reason: String,
}

/// Ordered per-source breakdown plus the clamped total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub rows: Vec<BreakdownRow>,
    /// Clamped to 0..=100. Rows always carry true per-source points; only the
    /// total is capped.
    pub final_score: u8,
}

impl ScoreBreakdown {
    /// Row sum before clamping, for audit and invariant checks.
    pub fn raw_total(&self) -> u32 {
        self.rows
            .iter()
            .map(|row| u32::from(row.points_awarded))
            .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualificationStatus {
    Qualified,
    Disqualified,
}

impl QualificationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            QualificationStatus::Qualified => "qualified",
            QualificationStatus::Disqualified => "disqualified",
        }
    }
}

/// Prospect temperature. Inverse of the evidence score: less competitor
/// evidence means a hotter prospect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Temperature {
    Hot,
    Warm,
    Cold,
}

impl Temperature {
    pub const fn label(self) -> &'static str {
        match self {
            Temperature::Hot => "hot",
            Temperature::Warm => "warm",
            Temperature::Cold => "cold",
        }
    }
}

/// Deterministic classification of the final score. Recomputed every run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualificationResult {
    pub score: u8,
    pub status: QualificationStatus,
    pub temperature: Temperature,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disqualification_reason: Option<String>,
}

/// Draft recommendation from the qualitative reasoner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    #[serde(rename = "GO")]
    Go,
    #[serde(rename = "NO-GO")]
    NoGo,
    #[serde(rename = "MONITOR")]
    Monitor,
}

impl Decision {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "GO" => Some(Self::Go),
            "NO-GO" | "NO_GO" | "NOGO" => Some(Self::NoGo),
            "MONITOR" => Some(Self::Monitor),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Decision::Go => "GO",
            Decision::NoGo => "NO-GO",
            Decision::Monitor => "MONITOR",
        }
    }
}

/// Pursuit priority attached to a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Hot,
    Warm,
    Cold,
    Disqualified,
}

impl Priority {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "hot" => Some(Self::Hot),
            "warm" => Some(Self::Warm),
            "cold" => Some(Self::Cold),
            "disqualified" => Some(Self::Disqualified),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Priority::Hot => "hot",
            Priority::Warm => "warm",
            Priority::Cold => "cold",
            Priority::Disqualified => "disqualified",
        }
    }
}

/// Free-text narrative blocks produced by the reasoner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeSections {
    pub evidence_review: String,
    pub intent_review: String,
    pub opportunity: String,
    pub risk: String,
}

/// Schema-validated reasoner recommendation. Treated as untrusted input by
/// everything downstream; the enforcer is the only component allowed to derive
/// a corrected copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasonerOutput {
    pub decision: Decision,
    pub confidence: Confidence,
    pub priority: Priority,
    pub summary: String,
    pub sections: NarrativeSections,
    pub data_quality: Confidence,
}

/// Wire form of a reasoner response before schema validation. All enumerated
/// fields arrive as free strings because the producer is non-deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReasonerOutput {
    pub decision: String,
    pub confidence: String,
    pub priority: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub sections: NarrativeSections,
    pub data_quality: String,
}

/// Counts of independent corroborating inputs, used by the sparse-data guard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceCounts {
    pub validated_sources: usize,
    pub intent_signals: usize,
}
