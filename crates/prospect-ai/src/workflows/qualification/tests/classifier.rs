use crate::workflows::qualification::classifier;
use crate::workflows::qualification::domain::{
    BreakdownRow, QualificationStatus, ScoreBreakdown, SourceId, Temperature,
};
use crate::workflows::qualification::policy::ClassifierThresholds;

fn row(id: &str, points: u8, reason: &str) -> BreakdownRow {
    BreakdownRow {
        source_id: SourceId::new(id),
        points_awarded: points,
        max_points: 30,
        reason: reason.to_string(),
    }
}

fn breakdown(final_score: u8, rows: Vec<BreakdownRow>) -> ScoreBreakdown {
    ScoreBreakdown { rows, final_score }
}

#[test]
fn bands_map_to_status_and_temperature() {
    let thresholds = ClassifierThresholds::default();
    let cases = [
        (0, QualificationStatus::Qualified, Temperature::Hot),
        (39, QualificationStatus::Qualified, Temperature::Hot),
        (40, QualificationStatus::Qualified, Temperature::Warm),
        (69, QualificationStatus::Qualified, Temperature::Warm),
        (70, QualificationStatus::Disqualified, Temperature::Cold),
        (100, QualificationStatus::Disqualified, Temperature::Cold),
    ];

    for (score, status, temperature) in cases {
        let result = classifier::classify(&breakdown(score, Vec::new()), &thresholds);
        assert_eq!(result.score, score, "score {score}");
        assert_eq!(result.status, status, "score {score}");
        assert_eq!(result.temperature, temperature, "score {score}");
    }
}

#[test]
fn qualified_results_carry_no_disqualification_reason() {
    let thresholds = ClassifierThresholds::default();
    let result = classifier::classify(
        &breakdown(30, vec![row("tech_press", 30, "matched")]),
        &thresholds,
    );

    assert!(result.disqualification_reason.is_none());
}

#[test]
fn disqualification_reason_names_the_strongest_source() {
    let thresholds = ClassifierThresholds::default();
    let result = classifier::classify(
        &breakdown(
            83,
            vec![
                row("official_filings", 30, "filing evidence"),
                row("judicial_records", 28, "court record"),
                row("premium_news", 25, "press coverage"),
            ],
        ),
        &thresholds,
    );

    let reason = result.disqualification_reason.expect("reason present");
    assert!(reason.contains("official_filings"));
    assert!(reason.contains("filing evidence"));
}

#[test]
fn tied_rows_resolve_to_the_first_in_registry_order() {
    let thresholds = ClassifierThresholds::default();
    let result = classifier::classify(
        &breakdown(
            90,
            vec![
                row("judicial_records", 28, "court record"),
                row("vendor_case_studies", 28, "case study"),
                row("job_postings", 28, "job ad"),
            ],
        ),
        &thresholds,
    );

    let reason = result.disqualification_reason.expect("reason present");
    assert!(reason.contains("judicial_records"));
}

#[test]
fn custom_thresholds_shift_the_bands() {
    let thresholds = ClassifierThresholds {
        disqualify_at: 50,
        warm_floor: 20,
    };

    let result = classifier::classify(&breakdown(50, Vec::new()), &thresholds);
    assert_eq!(result.status, QualificationStatus::Disqualified);

    let result = classifier::classify(&breakdown(19, Vec::new()), &thresholds);
    assert_eq!(result.temperature, Temperature::Hot);
}
