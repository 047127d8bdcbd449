//! CLI command implementations

mod check;
mod render;
mod update;

use crate::cli::logging::{log, warn};
use crate::cli::LogLevel;
use crate::config::{Cli, Command, OutputFormat};
use crate::error::BenchError;
use crate::pipeline::RunSummary;

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<(), String> {
    // Configure output based on verbose/quiet flags
    let log_level = LogLevel::from_flags(cli.quiet, cli.verbose);

    match cli.command {
        Command::Update(args) => update::run_update(args, log_level),
        Command::Render(args) => render::run_render(args, log_level),
        Command::Check(args) => check::run_check(args, log_level),
    }
}

/// Format an error with its code, as shown on the command line.
fn describe(error: &BenchError) -> String {
    if error.is_user_error() {
        format!("[{}] {error}", error.code())
    } else {
        format!("[{}] {error}\n  → This is a bug in chestx-bench, not in the inputs", error.code())
    }
}

/// Print warnings, issues and the summary, then turn issues into a failure.
fn finish(summary: &RunSummary, format: OutputFormat, level: LogLevel) -> Result<(), String> {
    for warning in &summary.warnings {
        warn(level, warning);
    }
    // Issues are errors, shown even in quiet mode
    for issue in summary.issues.iter() {
        eprintln!("[{}] {}", issue.code, issue.message);
    }

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(summary)
                .map_err(|e| format!("JSON serialization failed: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Text => {
            for line in format_summary(summary) {
                log(level, LogLevel::Normal, &line);
            }
            for path in &summary.written {
                log(level, LogLevel::Verbose, &format!("  wrote {}", path.display()));
            }
        }
    }

    if summary.is_clean() {
        Ok(())
    } else {
        Err(format!(
            "{} issue(s) found; affected inputs were skipped",
            summary.issues.len()
        ))
    }
}

/// Human-readable summary lines.
fn format_summary(summary: &RunSummary) -> Vec<String> {
    let mut lines = Vec::new();
    if summary.sources > 0 {
        lines.push(format!(
            "Read {} record(s) from {} source(s)",
            summary.records_read, summary.sources
        ));
        lines.push(format!(
            "  inserted: {}, updated: {}, unchanged: {}, rejected: {}",
            summary.inserted, summary.updated, summary.unchanged, summary.rejected
        ));
        if summary.failed_sources > 0 {
            lines.push(format!(
                "  skipped {} malformed source(s)",
                summary.failed_sources
            ));
        }
    }
    match &summary.table {
        Some(table) => lines.push(format!("Table {}: {} row(s)", table.display(), summary.rows)),
        None => lines.push(format!("Table: {} row(s)", summary.rows)),
    }
    lines
}

#[cfg(test)]
mod tests;
