//! End-to-end runs: load → read → merge → render → persist.
//!
//! Every output is produced in memory first. Destination directories are
//! checked before anything is written, and each file is staged next to its
//! destination and renamed into place, so a failing run leaves the previous
//! outputs intact.

use crate::config::Settings;
use crate::error::{BenchError, Result};
use crate::readers::{read_all, InputSource};
use crate::record::SourcedRecord;
use crate::report::{render_markdown, render_workbook, SheetGrid};
use crate::table::{load_table, merge_records, to_csv_bytes, BenchmarkTable, LoadedTable, MergeReport};
use serde::Serialize;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// A recoverable problem found during a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    pub code: &'static str,
    pub message: String,
}

impl From<&BenchError> for Issue {
    fn from(error: &BenchError) -> Self {
        Self {
            code: error.code(),
            message: error.to_string(),
        }
    }
}

/// Per-file and per-record errors collected over a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct IssueLog {
    issues: Vec<Issue>,
}

impl IssueLog {
    pub fn push(&mut self, error: &BenchError) {
        self.issues.push(Issue::from(error));
    }

    pub fn extend<'a>(&mut self, errors: impl IntoIterator<Item = &'a BenchError>) {
        for error in errors {
            self.push(error);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter()
    }
}

/// What a run did, for the command-line summary.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub table: Option<PathBuf>,
    pub sources: usize,
    /// Sources skipped as malformed or unreadable
    pub failed_sources: usize,
    pub records_read: usize,
    pub inserted: usize,
    pub updated: usize,
    pub unchanged: usize,
    /// Records rejected by the merge
    pub rejected: usize,
    pub rows: usize,
    pub written: Vec<PathBuf>,
    pub warnings: Vec<String>,
    pub issues: IssueLog,
}

impl RunSummary {
    /// True when no input failed and no record was rejected.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    fn record_merge(&mut self, report: &MergeReport) {
        self.inserted = report.inserted;
        self.updated = report.updated;
        self.unchanged = report.unchanged;
        self.rejected = report.rejected.len();
        self.issues.extend(&report.rejected);
    }
}

/// Result of `check`: the normalized records plus a dry-run summary.
#[derive(Debug, Clone, Default)]
pub struct CheckOutcome {
    pub records: Vec<SourcedRecord>,
    pub summary: RunSummary,
}

/// An output rendered in memory, not yet on disk.
#[derive(Debug, Clone)]
struct PendingWrite {
    path: PathBuf,
    bytes: Vec<u8>,
}

impl PendingWrite {
    fn new(path: &Path, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.to_path_buf(),
            bytes: bytes.into(),
        }
    }
}

fn no_inputs() -> BenchError {
    BenchError::Usage {
        field: "inputs".into(),
        message: "no input sources given".into(),
        suggestion: "Pass at least one --notes <FILE> or --json <FILE>".into(),
    }
}

fn no_reports() -> BenchError {
    BenchError::Usage {
        field: "outputs".into(),
        message: "no report output given".into(),
        suggestion: "Pass --markdown <MD> and/or --workbook <XLSX>, or set them in the configuration file"
            .into(),
    }
}

/// Read every source, merge into the table, write the table and reports.
///
/// Input and record errors are collected in the summary; persistence errors
/// abort before any output is replaced.
pub fn run_update(settings: &Settings, sources: &[InputSource]) -> Result<RunSummary> {
    if sources.is_empty() {
        return Err(no_inputs());
    }
    let table_path = settings.table_path()?;
    let LoadedTable {
        mut table,
        warnings,
    } = load_table(table_path, &settings.aliases)?;

    let read = read_all(sources, &settings.aliases);
    let mut summary = RunSummary {
        table: Some(table_path.to_path_buf()),
        sources: sources.len(),
        records_read: read.records.len(),
        warnings,
        ..RunSummary::default()
    };
    summary.failed_sources = read.failures.len();
    summary.issues.extend(&read.failures);
    let report = merge_records(&mut table, &read.records);
    summary.record_merge(&report);
    summary.rows = table.len();

    let mut writes = vec![PendingWrite::new(table_path, to_csv_bytes(&table)?)];
    writes.extend(render_outputs(&table, settings)?);
    summary.written = commit(&writes)?;
    Ok(summary)
}

/// Regenerate the reports from the persisted table alone.
pub fn run_render(settings: &Settings) -> Result<RunSummary> {
    let table_path = settings.table_path()?;
    if !settings.has_reports() {
        return Err(no_reports());
    }
    let LoadedTable { table, mut warnings } = load_table(table_path, &settings.aliases)?;
    if !table_path.exists() {
        warnings.push(format!(
            "{} does not exist; rendering an empty table",
            table_path.display()
        ));
    }

    let writes = render_outputs(&table, settings)?;
    Ok(RunSummary {
        table: Some(table_path.to_path_buf()),
        rows: table.len(),
        written: commit(&writes)?,
        warnings,
        ..RunSummary::default()
    })
}

/// Parse the sources and merge them into an in-memory copy of the table
/// (or an empty table). Nothing is written.
pub fn run_check(settings: &Settings, sources: &[InputSource]) -> Result<CheckOutcome> {
    if sources.is_empty() {
        return Err(no_inputs());
    }
    let LoadedTable {
        mut table,
        warnings,
    } = match settings.table.as_deref() {
        Some(path) => load_table(path, &settings.aliases)?,
        None => LoadedTable::default(),
    };

    let read = read_all(sources, &settings.aliases);
    let mut summary = RunSummary {
        table: settings.table.clone(),
        sources: sources.len(),
        records_read: read.records.len(),
        warnings,
        ..RunSummary::default()
    };
    summary.failed_sources = read.failures.len();
    summary.issues.extend(&read.failures);
    let report = merge_records(&mut table, &read.records);
    summary.record_merge(&report);
    summary.rows = table.len();

    Ok(CheckOutcome {
        records: read.records,
        summary,
    })
}

/// Render the configured reports from one shared grid.
fn render_outputs(table: &BenchmarkTable, settings: &Settings) -> Result<Vec<PendingWrite>> {
    let grid = SheetGrid::from_table(table, settings.order);
    let mut writes = Vec::new();
    if let Some(path) = &settings.markdown {
        writes.push(PendingWrite::new(path, render_markdown(&grid)));
    }
    if let Some(path) = &settings.workbook {
        writes.push(PendingWrite::new(path, render_workbook(&grid)?));
    }
    Ok(writes)
}

fn staging_path(path: &Path) -> Result<PathBuf> {
    let name = path
        .file_name()
        .ok_or_else(|| BenchError::persistence(path, "not a file path"))?;
    let mut staged = OsString::from(".");
    staged.push(name);
    staged.push(".tmp");
    Ok(path.with_file_name(staged))
}

/// Every destination must sit in an existing directory and must not itself
/// be a directory.
fn preflight(writes: &[PendingWrite]) -> Result<()> {
    for write in writes {
        let parent = match write.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        if !parent.is_dir() {
            return Err(BenchError::persistence(
                &write.path,
                format!("directory {} does not exist", parent.display()),
            ));
        }
        if write.path.is_dir() {
            return Err(BenchError::persistence(&write.path, "is a directory"));
        }
    }
    Ok(())
}

/// Stage every output, then move them all into place.
fn commit(writes: &[PendingWrite]) -> Result<Vec<PathBuf>> {
    preflight(writes)?;

    let mut staged = Vec::with_capacity(writes.len());
    for write in writes {
        let temp = staging_path(&write.path)?;
        if let Err(e) = fs::write(&temp, &write.bytes) {
            let _ = fs::remove_file(&temp);
            discard(&staged);
            return Err(BenchError::persistence(&write.path, format!("cannot write: {e}")));
        }
        staged.push((temp, write.path.clone()));
    }

    for (index, (temp, path)) in staged.iter().enumerate() {
        if let Err(e) = fs::rename(temp, path) {
            discard(&staged[index..]);
            return Err(BenchError::persistence(path, format!("cannot replace: {e}")));
        }
    }
    Ok(staged.into_iter().map(|(_, path)| path).collect())
}

fn discard(staged: &[(PathBuf, PathBuf)]) {
    for (temp, _) in staged {
        let _ = fs::remove_file(temp);
    }
}
