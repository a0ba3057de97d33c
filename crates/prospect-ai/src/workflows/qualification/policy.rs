use std::path::Path;

use serde::{Deserialize, Serialize};

use super::domain::{ReliabilityTier, Source, SourceId};

/// Score bands for the deterministic classifier.
///
/// The default cutoffs (disqualify at 70, warm floor at 40) are inherited
/// business policy with no stated derivation; they are kept configurable so a
/// product owner can revise them without a release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierThresholds {
    /// Scores at or above this disqualify the lead (already compromised).
    pub disqualify_at: u8,
    /// Scores in `warm_floor..disqualify_at` are warm; below is hot.
    pub warm_floor: u8,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self {
            disqualify_at: 70,
            warm_floor: 40,
        }
    }
}

/// Bands for the externally supplied buying-intent score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentBands {
    /// Below this, absence of competitor evidence alone never justifies pursuit.
    pub monitor_below: u8,
    /// At or above this, a clean lead with a monitor draft is upgraded to active pursuit.
    pub pursue_at: u8,
    /// At or above this, an upgraded recommendation carries high confidence.
    pub high_confidence_at: u8,
}

impl Default for IntentBands {
    fn default() -> Self {
        Self {
            monitor_below: 40,
            pursue_at: 70,
            high_confidence_at: 80,
        }
    }
}

/// Floors below which the enforcement chain refuses an active-pursuit decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparseDataFloor {
    pub min_validated_sources: usize,
    pub min_intent_signals: usize,
}

impl Default for SparseDataFloor {
    fn default() -> Self {
        Self {
            min_validated_sources: 2,
            min_intent_signals: 2,
        }
    }
}

/// Injected business policy: thresholds, the source registry, and the signal
/// vocabulary. Loaded once per process, immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualificationPolicy {
    pub thresholds: ClassifierThresholds,
    pub intent: IntentBands,
    pub sparse_data: SparseDataFloor,
    pub sources: Vec<Source>,
    /// Terms whose presence in validated text constitutes disqualifying
    /// evidence (competing product names and close variants).
    pub signal_vocabulary: Vec<String>,
    /// Markers of a structurally authoritative context, e.g. a creditor or
    /// supplier designation in a filing. Their presence raises confidence.
    pub authority_markers: Vec<String>,
    /// Phrases indicating the text was published by the competitor itself
    /// (job ads, recruiting posts) rather than by the target company.
    pub self_reference_markers: Vec<String>,
}

impl Default for QualificationPolicy {
    fn default() -> Self {
        Self {
            thresholds: ClassifierThresholds::default(),
            intent: IntentBands::default(),
            sparse_data: SparseDataFloor::default(),
            sources: default_registry(),
            signal_vocabulary: vec![
                "vetra erp".to_string(),
                "vetra cloud".to_string(),
                "vetra analytics".to_string(),
                "vetra payroll".to_string(),
                "vetra wms".to_string(),
                "vetra fiscal".to_string(),
            ],
            authority_markers: vec![
                "creditor".to_string(),
                "supplier".to_string(),
                "vendor contract".to_string(),
                "service agreement".to_string(),
                "fornecedor".to_string(),
            ],
            self_reference_markers: vec![
                "careers at".to_string(),
                "join our team".to_string(),
                "we are hiring".to_string(),
                "work with us".to_string(),
            ],
        }
    }
}

fn default_registry() -> Vec<Source> {
    fn source(id: &str, name: &str, max_weight: u8, tier: ReliabilityTier) -> Source {
        Source {
            id: SourceId::new(id),
            display_name: name.to_string(),
            max_weight,
            reliability_tier: tier,
        }
    }

    vec![
        source(
            "official_filings",
            "Regulatory filings",
            30,
            ReliabilityTier::Official,
        ),
        source(
            "judicial_records",
            "Judicial records",
            28,
            ReliabilityTier::Official,
        ),
        source(
            "premium_news",
            "Premium business press",
            25,
            ReliabilityTier::Premium,
        ),
        source(
            "vendor_case_studies",
            "Vendor case studies",
            24,
            ReliabilityTier::Premium,
        ),
        source(
            "job_postings",
            "Job postings",
            22,
            ReliabilityTier::Standard,
        ),
        source("tech_press", "Technology press", 18, ReliabilityTier::Standard),
        source(
            "social_media",
            "Corporate social media",
            12,
            ReliabilityTier::Community,
        ),
        source("web_search", "General web search", 8, ReliabilityTier::Community),
    ]
}

impl QualificationPolicy {
    /// Checks the policy before the engine accepts it. An invalid policy is
    /// fatal: scoring under unknown thresholds must not produce a record.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.sources.is_empty() {
            return Err(PolicyError::EmptyRegistry);
        }
        let mut seen = std::collections::BTreeSet::new();
        for entry in &self.sources {
            if !seen.insert(entry.id.clone()) {
                return Err(PolicyError::DuplicateSource(entry.id.0.clone()));
            }
            if entry.max_weight == 0 || entry.max_weight > 30 {
                return Err(PolicyError::WeightOutOfRange {
                    source_id: entry.id.0.clone(),
                    weight: entry.max_weight,
                });
            }
        }
        if self.signal_vocabulary.is_empty() {
            return Err(PolicyError::EmptyVocabulary);
        }
        if self.thresholds.disqualify_at > 100
            || self.thresholds.warm_floor >= self.thresholds.disqualify_at
        {
            return Err(PolicyError::InvalidThresholds {
                warm_floor: self.thresholds.warm_floor,
                disqualify_at: self.thresholds.disqualify_at,
            });
        }
        if self.intent.monitor_below > self.intent.pursue_at
            || self.intent.pursue_at > self.intent.high_confidence_at
            || self.intent.high_confidence_at > 100
        {
            return Err(PolicyError::InvalidIntentBands);
        }
        Ok(())
    }

    /// Loads a policy from a JSON file, e.g. the `APP_POLICY_PATH` override.
    pub fn from_json_file(path: &Path) -> Result<Self, PolicyError> {
        let raw = std::fs::read_to_string(path).map_err(|source| PolicyError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let policy: Self = serde_json::from_str(&raw).map_err(|source| PolicyError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn source(&self, id: &SourceId) -> Option<&Source> {
        self.sources.iter().find(|entry| &entry.id == id)
    }
}

/// Fatal policy problems. The run aborts before producing a record.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("source registry is empty")]
    EmptyRegistry,
    #[error("source '{0}' appears twice in the registry")]
    DuplicateSource(String),
    #[error("source '{source_id}' weight {weight} outside 1..=30")]
    WeightOutOfRange { source_id: String, weight: u8 },
    #[error("signal vocabulary is empty")]
    EmptyVocabulary,
    #[error("classifier thresholds invalid: warm_floor {warm_floor} must be below disqualify_at {disqualify_at} (max 100)")]
    InvalidThresholds { warm_floor: u8, disqualify_at: u8 },
    #[error("intent bands must satisfy monitor_below <= pursue_at <= high_confidence_at <= 100")]
    InvalidIntentBands,
    #[error("failed to read policy file '{path}'")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse policy file '{path}'")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}
