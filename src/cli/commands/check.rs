//! Check command implementation

use super::{describe, finish};
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{CheckArgs, OutputFormat, Settings};
use crate::pipeline::{self, CheckOutcome};
use crate::record::SourcedRecord;

/// Format one normalized record as indented `Display Name: value` lines.
pub fn format_record(sourced: &SourcedRecord) -> String {
    let mut lines = vec![format!("{}:", sourced.origin)];
    for field in sourced.record.present_fields() {
        if let Some(value) = sourced.record.get(field) {
            lines.push(format!("  {}: {value}", field.display_name()));
        }
    }
    for (key, value) in &sourced.record.extra {
        lines.push(format!("  {key} (extra): {value}"));
    }
    for annotation in &sourced.record.annotations {
        lines.push(format!("  + notes: {annotation}"));
    }
    lines.join("\n")
}

fn records_json(outcome: &CheckOutcome) -> Result<String, String> {
    let records: Vec<serde_json::Value> = outcome
        .records
        .iter()
        .map(|sourced| {
            serde_json::json!({
                "origin": sourced.origin.to_string(),
                "record": sourced.record,
                "annotations": sourced.record.annotations,
            })
        })
        .collect();
    serde_json::to_string_pretty(&serde_json::json!({
        "records": records,
        "summary": outcome.summary,
    }))
    .map_err(|e| format!("JSON serialization failed: {e}"))
}

pub fn run_check(args: CheckArgs, level: LogLevel) -> Result<(), String> {
    let settings = Settings::from_check(&args).map_err(|e| describe(&e))?;
    let outcome =
        pipeline::run_check(&settings, &args.inputs.sources()).map_err(|e| describe(&e))?;

    match args.format {
        OutputFormat::Json => {
            println!("{}", records_json(&outcome)?);
            // Warnings and the summary are already in the document
            finish(&outcome.summary, OutputFormat::Text, LogLevel::Quiet)
        }
        OutputFormat::Text => {
            for sourced in &outcome.records {
                log(level, LogLevel::Normal, &format_record(sourced));
            }
            finish(&outcome.summary, OutputFormat::Text, level)
        }
    }
}
