use super::domain::{
    Confidence, EvidenceCandidate, Source, ValidatedEvidence, ValidationRejection,
};
use super::normalizer::{name_variants, normalize};
use super::policy::QualificationPolicy;

/// Decides whether a candidate is a valid mention of the target company that
/// carries qualifying signal, and builds the evidence entry when it is.
///
/// Multiple signal matches within one candidate are all recorded, but weight
/// stays per-source: the aggregator awards `source.max_weight` once, never per
/// signal.
pub fn validate(
    candidate: &EvidenceCandidate,
    company_name: &str,
    source: &Source,
    policy: &QualificationPolicy,
) -> Result<ValidatedEvidence, ValidationRejection> {
    let variants = name_variants(company_name);
    if variants.is_empty() {
        // Fail closed: with no usable company name nothing may pass.
        return Err(ValidationRejection::CompanyNameMissing);
    }

    let text = normalize(&candidate.raw_text);

    if policy
        .self_reference_markers
        .iter()
        .any(|marker| text.contains(&normalize(marker)))
    {
        return Err(ValidationRejection::CompetitorSelfReference);
    }

    let matched_company_tokens: Vec<String> = variants
        .into_iter()
        .filter(|variant| text.contains(variant.as_str()))
        .collect();
    if matched_company_tokens.is_empty() {
        return Err(ValidationRejection::NoCompanyMention);
    }

    let detected_signals: Vec<String> = policy
        .signal_vocabulary
        .iter()
        .filter(|term| text.contains(&normalize(term)))
        .cloned()
        .collect();
    if detected_signals.is_empty() {
        return Err(ValidationRejection::NoQualifyingSignal);
    }

    let authoritative = policy
        .authority_markers
        .iter()
        .any(|marker| text.contains(&normalize(marker)));
    let confidence = if authoritative {
        Confidence::High
    } else {
        Confidence::Medium
    };

    let narrative = format!(
        "{}: matched '{}' with signal(s) [{}]",
        source.display_name,
        matched_company_tokens
            .last()
            .map(String::as_str)
            .unwrap_or_default(),
        detected_signals.join(", "),
    );

    Ok(ValidatedEvidence {
        source_id: source.id.clone(),
        matched_company_tokens,
        detected_signals,
        weight: source.max_weight,
        confidence,
        narrative,
        url: candidate.url.clone(),
    })
}
