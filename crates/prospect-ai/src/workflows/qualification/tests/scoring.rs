use super::common::*;
use crate::workflows::qualification::domain::{SourceId, ValidationRejection};
use crate::workflows::qualification::scoring::{self, SCORE_CAP};

const COMPANY: &str = "Golden Cargo Transportes Ltda";
const STRONG_HIT: &str = "Golden Cargo confirmed as creditor, running Vetra ERP in production.";

#[test]
fn every_registry_source_gets_a_breakdown_row() {
    let policy = policy();
    let outcome = scoring::score_candidates(&policy, COMPANY, &candidates(&[]));

    assert_eq!(outcome.breakdown.rows.len(), policy.sources.len());
    for (row, source) in outcome.breakdown.rows.iter().zip(&policy.sources) {
        assert_eq!(row.source_id, source.id);
        assert_eq!(row.points_awarded, 0);
        assert_eq!(row.max_points, source.max_weight);
        assert_eq!(row.reason, "source unavailable");
    }
    assert_eq!(outcome.breakdown.final_score, 0);
}

#[test]
fn distinguishes_empty_results_from_missing_sources() {
    let policy = policy();
    let per_source = candidates(&[
        ("premium_news", &[] as &[&str]),
        ("web_search", &["Unrelated ERP market news."]),
    ]);

    let outcome = scoring::score_candidates(&policy, COMPANY, &per_source);

    let row = |id: &str| {
        outcome
            .breakdown
            .rows
            .iter()
            .find(|row| row.source_id == SourceId::new(id))
            .expect("row present")
    };
    assert_eq!(row("premium_news").reason, "no candidates returned");
    assert_eq!(
        row("web_search").reason,
        "candidates present but none validated"
    );
    assert_eq!(row("official_filings").reason, "source unavailable");
}

#[test]
fn awards_source_weight_once_per_source() {
    let policy = policy();
    let per_source = candidates(&[(
        "job_postings",
        &[
            "Golden Cargo job ad: wanted, analyst with Vetra ERP experience.",
            "Golden Cargo job ad: wanted, consultant with Vetra WMS experience.",
        ],
    )]);

    let outcome = scoring::score_candidates(&policy, COMPANY, &per_source);

    assert_eq!(outcome.breakdown.final_score, 22);
    assert_eq!(outcome.evidence.len(), 1);
    // The second candidate is never examined once the first is accepted.
    assert!(outcome.discards.is_empty());
}

#[test]
fn rejections_before_the_first_hit_are_logged() {
    let policy = policy();
    let per_source = candidates(&[(
        "tech_press",
        &[
            "Market overview of logistics software.",
            STRONG_HIT,
        ],
    )]);

    let outcome = scoring::score_candidates(&policy, COMPANY, &per_source);

    assert_eq!(outcome.breakdown.final_score, 18);
    assert_eq!(outcome.discards.len(), 1);
    assert_eq!(
        outcome.discards[0].rejection,
        ValidationRejection::NoCompanyMention
    );
    assert_eq!(outcome.discards[0].source_id, SourceId::new("tech_press"));
}

#[test]
fn total_is_clamped_but_rows_keep_true_points() {
    let policy = policy();
    let per_source = candidates(&[
        ("official_filings", &[STRONG_HIT] as &[&str]),
        ("judicial_records", &[STRONG_HIT]),
        ("premium_news", &[STRONG_HIT]),
        ("vendor_case_studies", &[STRONG_HIT]),
    ]);

    let outcome = scoring::score_candidates(&policy, COMPANY, &per_source);

    // 30 + 28 + 25 + 24 sums past the cap.
    assert_eq!(outcome.breakdown.raw_total(), 107);
    assert_eq!(outcome.breakdown.final_score, SCORE_CAP);
    let awarded: Vec<u8> = outcome
        .breakdown
        .rows
        .iter()
        .filter(|row| row.points_awarded > 0)
        .map(|row| row.points_awarded)
        .collect();
    assert_eq!(awarded, vec![30, 28, 25, 24]);
}

#[test]
fn rows_follow_registry_order_not_input_order() {
    let policy = policy();
    // BTreeMap orders keys alphabetically; rows must still follow the registry.
    let per_source = candidates(&[
        ("web_search", &[STRONG_HIT] as &[&str]),
        ("official_filings", &[STRONG_HIT]),
    ]);

    let outcome = scoring::score_candidates(&policy, COMPANY, &per_source);

    let ids: Vec<&str> = outcome
        .breakdown
        .rows
        .iter()
        .map(|row| row.source_id.0.as_str())
        .collect();
    let registry: Vec<&str> = policy.sources.iter().map(|s| s.id.0.as_str()).collect();
    assert_eq!(ids, registry);
}
