use super::domain::{QualificationResult, QualificationStatus, ScoreBreakdown, Temperature};
use super::policy::ClassifierThresholds;

/// Maps the clamped score to status and temperature. Pure function of the
/// breakdown and the configured thresholds; recomputed every run.
pub fn classify(breakdown: &ScoreBreakdown, thresholds: &ClassifierThresholds) -> QualificationResult {
    let score = breakdown.final_score;

    let (status, temperature) = if score >= thresholds.disqualify_at {
        (QualificationStatus::Disqualified, Temperature::Cold)
    } else if score >= thresholds.warm_floor {
        (QualificationStatus::Qualified, Temperature::Warm)
    } else {
        (QualificationStatus::Qualified, Temperature::Hot)
    };

    let disqualification_reason = match status {
        QualificationStatus::Disqualified => strongest_row_reason(breakdown),
        QualificationStatus::Qualified => None,
    };

    QualificationResult {
        score,
        status,
        temperature,
        disqualification_reason,
    }
}

/// Reason of the highest-scoring row; ties resolve to the first such row in
/// registry order so the result is deterministic.
fn strongest_row_reason(breakdown: &ScoreBreakdown) -> Option<String> {
    let mut best: Option<&super::domain::BreakdownRow> = None;
    for row in &breakdown.rows {
        if row.points_awarded == 0 {
            continue;
        }
        let replace = match best {
            // Strict comparison keeps the first row on ties.
            Some(current) => row.points_awarded > current.points_awarded,
            None => true,
        };
        if replace {
            best = Some(row);
        }
    }
    best.map(|row| format!("strongest evidence from {}: {}", row.source_id.0, row.reason))
}
