use clap::Args;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use prospect_ai::error::AppError;
use prospect_ai::workflows::qualification::{
    AnalysisRequest, DecisionRecord, EvidenceCandidate, QualificationService, ScoreDrivenReasoner,
    SourceId,
};

use crate::infra::load_policy;

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Path to a JSON analysis request (company name, intent inputs, candidates)
    #[arg(long)]
    pub(crate) request: PathBuf,
    /// Optional JSON policy file overriding the built-in defaults
    #[arg(long)]
    pub(crate) policy: Option<PathBuf>,
    /// Print only the flattened summary instead of the full decision record
    #[arg(long)]
    pub(crate) summary: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Optional JSON policy file overriding the built-in defaults
    #[arg(long)]
    pub(crate) policy: Option<PathBuf>,
}

pub(crate) fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let AnalyzeArgs {
        request,
        policy,
        summary,
    } = args;

    let raw = std::fs::read_to_string(&request)?;
    let request: AnalysisRequest = serde_json::from_str(&raw)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))?;

    let policy = load_policy(policy.as_deref())?;
    let service = QualificationService::new(policy, Arc::new(ScoreDrivenReasoner))?;
    let record = service.analyze(&request)?;

    if summary {
        print_json(&record.summary())?;
    } else {
        print_json(&record)?;
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let policy = load_policy(args.policy.as_deref())?;
    let service = QualificationService::new(policy, Arc::new(ScoreDrivenReasoner))?;

    println!("Lead qualification demo\n");
    for request in demo_requests() {
        let record = service.analyze(&request)?;
        render_record(&record);
    }
    Ok(())
}

fn demo_requests() -> Vec<AnalysisRequest> {
    let compromised_hit =
        "Regulatory filing lists Horizonte Distribuidora as creditor under a Vetra ERP contract.";
    let press_hit =
        "Horizonte Distribuidora completes its migration to Vetra ERP, executives confirm.";

    vec![
        AnalysisRequest {
            company_name: "Aurora Alimentos Ltda".to_string(),
            intent_score: 84,
            intent_signal_count: 5,
            candidates_per_source: candidates(&[
                ("premium_news", &["Aurora Alimentos expands cold-chain operations."]),
                ("web_search", &[]),
            ]),
        },
        AnalysisRequest {
            company_name: "Horizonte Distribuidora SA".to_string(),
            intent_score: 91,
            intent_signal_count: 6,
            candidates_per_source: candidates(&[
                ("official_filings", &[compromised_hit]),
                ("premium_news", &[press_hit]),
                ("tech_press", &[press_hit]),
            ]),
        },
        AnalysisRequest {
            company_name: "Mirante Logistica".to_string(),
            intent_score: 52,
            intent_signal_count: 1,
            candidates_per_source: BTreeMap::new(),
        },
    ]
}

fn candidates(
    entries: &[(&str, &[&str])],
) -> BTreeMap<SourceId, Vec<EvidenceCandidate>> {
    entries
        .iter()
        .map(|(source, texts)| {
            (
                SourceId::new(*source),
                texts
                    .iter()
                    .map(|text| EvidenceCandidate {
                        source_id: SourceId::new(*source),
                        raw_text: text.to_string(),
                        url: None,
                        retrieved_at: Utc::now(),
                    })
                    .collect(),
            )
        })
        .collect()
}

fn render_record(record: &DecisionRecord) {
    println!("== {} ==", record.company_name);
    println!(
        "  evidence score {} ({} / {})",
        record.qualification.score,
        record.qualification.status.label(),
        record.qualification.temperature.label(),
    );
    println!(
        "  recommendation {} ({}, priority {})",
        record.enforced_output.decision.label(),
        record.enforced_output.confidence.label(),
        record.enforced_output.priority.label(),
    );
    if record.was_overridden() {
        let rules: Vec<&str> = record
            .overrides_applied
            .iter()
            .map(|rule| rule.label())
            .collect();
        println!("  overrides: {}", rules.join(", "));
    }
    for row in &record.breakdown.rows {
        if row.points_awarded > 0 {
            println!(
                "    +{:>2} {} ({})",
                row.points_awarded, row.source_id.0, row.reason
            );
        }
    }
    println!();
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))?;
    println!("{rendered}");
    Ok(())
}
