//! CLI command tests

use super::*;
use crate::config::*;
use crate::pipeline::IssueLog;
use crate::record::{BenchmarkRecord, Location, RecordOrigin, SourcedRecord};
use std::path::PathBuf;
use tempfile::TempDir;

fn update_args(dir: &TempDir, notes: Vec<PathBuf>) -> UpdateArgs {
    UpdateArgs {
        table: Some(dir.path().join("bench.csv")),
        inputs: InputArgs {
            notes,
            json: Vec::new(),
            ordered: Vec::new(),
        },
        markdown: Some(dir.path().join("bench.md")),
        workbook: Some(dir.path().join("bench.xlsx")),
        rank: false,
        config: None,
        format: OutputFormat::Text,
    }
}

#[test]
fn test_update_command_success() {
    let dir = TempDir::new().unwrap();
    let notes = dir.path().join("notes.txt");
    std::fs::write(&notes, "Paper: CheXNet (2017)\nBackbone: DenseNet-121\nAUC: 0.841\n").unwrap();

    let result = update::run_update(update_args(&dir, vec![notes]), LogLevel::Quiet);
    assert!(result.is_ok());
    assert!(dir.path().join("bench.csv").exists());
    assert!(dir.path().join("bench.md").exists());
    assert!(dir.path().join("bench.xlsx").exists());
}

#[test]
fn test_update_command_reports_issues() {
    let dir = TempDir::new().unwrap();
    let notes = dir.path().join("notes.txt");
    std::fs::write(&notes, "AUC: 0.9\nOptimizer: Adam\n").unwrap();

    let err = update::run_update(update_args(&dir, vec![notes]), LogLevel::Quiet).unwrap_err();
    assert!(err.contains("1 issue(s)"));
    // The table is still written
    assert!(dir.path().join("bench.csv").exists());
}

#[test]
fn test_update_command_without_inputs() {
    let dir = TempDir::new().unwrap();
    let err = update::run_update(update_args(&dir, Vec::new()), LogLevel::Quiet).unwrap_err();
    assert!(err.starts_with("[E041]"));
}

#[test]
fn test_render_command_without_outputs() {
    let args = RenderArgs {
        table: Some("bench.csv".into()),
        markdown: None,
        workbook: None,
        rank: false,
        config: None,
    };
    let err = render::run_render(args, LogLevel::Quiet).unwrap_err();
    assert!(err.contains("--markdown"));
}

#[test]
fn test_check_command_json() {
    let dir = TempDir::new().unwrap();
    let json = dir.path().join("s.json");
    std::fs::write(&json, r#"{"paper": "A (2020)", "model": "M", "auc": "0.9"}"#).unwrap();

    let args = CheckArgs {
        inputs: InputArgs {
            notes: Vec::new(),
            json: vec![json],
            ordered: Vec::new(),
        },
        table: None,
        config: None,
        format: OutputFormat::Json,
    };
    assert!(check::run_check(args, LogLevel::Quiet).is_ok());
}

#[test]
fn test_format_record() {
    let mut record = BenchmarkRecord::new("CheXNet (2017)", "DenseNet-121").with_epochs(30);
    record.set_extra("dataset split", "official");
    record.annotations.push("Reported AUC: 0.84 (avg)".into());
    let sourced = SourcedRecord::new(RecordOrigin::new("n.txt", Location::Line(3)), record);

    let text = check::format_record(&sourced);
    assert_eq!(
        text,
        "n.txt:3:\n  Paper & Year: CheXNet (2017)\n  Model Backbone: DenseNet-121\n  Epochs: 30\n  dataset split (extra): official\n  + notes: Reported AUC: 0.84 (avg)"
    );
}

#[test]
fn test_format_summary_lines() {
    let summary = RunSummary {
        table: Some("bench.csv".into()),
        sources: 2,
        failed_sources: 0,
        records_read: 3,
        inserted: 1,
        updated: 1,
        unchanged: 1,
        rejected: 0,
        rows: 4,
        written: Vec::new(),
        warnings: Vec::new(),
        issues: IssueLog::default(),
    };
    assert_eq!(
        format_summary(&summary),
        vec![
            "Read 3 record(s) from 2 source(s)".to_string(),
            "  inserted: 1, updated: 1, unchanged: 1, rejected: 0".to_string(),
            "Table bench.csv: 4 row(s)".to_string(),
        ]
    );
}

#[test]
fn test_describe_includes_code() {
    let err = crate::error::BenchError::malformed("x.json", "bad");
    assert!(describe(&err).starts_with("[E010] Malformed input in x.json"));
    assert!(!describe(&err).contains("bug"));

    let internal = crate::error::BenchError::Internal {
        message: "index out of range".into(),
    };
    assert!(describe(&internal).ends_with("not in the inputs"));
}

#[test]
fn test_format_summary_separates_failed_sources_from_rejections() {
    let mut issues = IssueLog::default();
    issues.push(&crate::error::BenchError::malformed("a.json", "bad"));
    issues.push(&crate::error::BenchError::malformed("b.txt", "bad"));
    issues.push(&crate::error::BenchError::MissingIdentity {
        origin: "c.txt:1".into(),
        missing: "paper_and_year is empty".into(),
    });
    let summary = RunSummary {
        sources: 3,
        failed_sources: 2,
        records_read: 1,
        rejected: 1,
        issues,
        ..RunSummary::default()
    };
    let lines = format_summary(&summary);
    assert_eq!(lines[1], "  inserted: 0, updated: 0, unchanged: 0, rejected: 1");
    assert_eq!(lines[2], "  skipped 2 malformed source(s)");
}
