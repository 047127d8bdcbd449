//! Source readers: free-text notes and JSON summaries → benchmark records.

pub mod json;
pub mod notes;

pub use json::parse_json;
pub use notes::parse_notes;

use crate::error::{BenchError, Result};
use crate::record::{normalize_key, AliasTable, BenchmarkRecord, Field, SourcedRecord};
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

/// Input format of a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Notes,
    Json,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Notes => write!(f, "notes"),
            SourceKind::Json => write!(f, "json"),
        }
    }
}

/// One input file and how to read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSource {
    pub kind: SourceKind,
    pub path: PathBuf,
}

impl InputSource {
    pub fn notes(path: impl Into<PathBuf>) -> Self {
        Self {
            kind: SourceKind::Notes,
            path: path.into(),
        }
    }

    pub fn json(path: impl Into<PathBuf>) -> Self {
        Self {
            kind: SourceKind::Json,
            path: path.into(),
        }
    }
}

/// Read and parse one source file.
///
/// Unreadable files (missing, not UTF-8) are malformed input, not persistence
/// failures: only that source is skipped.
pub fn read_source(source: &InputSource, aliases: &AliasTable) -> Result<Vec<SourcedRecord>> {
    let text = std::fs::read_to_string(&source.path)
        .map_err(|e| BenchError::malformed(&source.path, format!("cannot read file: {e}")))?;
    match source.kind {
        SourceKind::Notes => parse_notes(&text, &source.path, aliases),
        SourceKind::Json => parse_json(&text, &source.path, aliases),
    }
}

/// Records from every readable source, in source order, plus one error per
/// source that failed.
#[derive(Debug, Default)]
pub struct ReadOutcome {
    pub records: Vec<SourcedRecord>,
    pub failures: Vec<BenchError>,
}

/// Read all sources in order. A failing source never stops the others.
pub fn read_all(sources: &[InputSource], aliases: &AliasTable) -> ReadOutcome {
    let mut outcome = ReadOutcome::default();
    for source in sources {
        match read_source(source, aliases) {
            Ok(records) => outcome.records.extend(records),
            Err(e) => outcome.failures.push(e),
        }
    }
    outcome
}

/// Where a raw key lands in a record under construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Slot {
    Field(Field),
    /// A bare `Year` key, folded into `paper_and_year`
    Year,
    Extra(String),
}

/// Accumulates raw `key → value` pairs into one record.
///
/// Shared by both readers so the same key spellings mean the same thing in
/// notes and JSON.
struct RecordBuilder<'a> {
    aliases: &'a AliasTable,
    record: BenchmarkRecord,
    seen: HashSet<Slot>,
    year: Option<String>,
}

impl<'a> RecordBuilder<'a> {
    fn new(aliases: &'a AliasTable) -> Self {
        Self {
            aliases,
            record: BenchmarkRecord::default(),
            seen: HashSet::new(),
            year: None,
        }
    }

    fn slot(&self, key: &str) -> Slot {
        match self.aliases.resolve(key) {
            Some(Field::PaperAndYear) if normalize_key(key) == "year" => Slot::Year,
            Some(field) => Slot::Field(field),
            None => Slot::Extra(normalize_key(key)),
        }
    }

    /// Whether `key` (after synonym resolution) was already given.
    fn has_seen(&self, key: &str) -> bool {
        self.seen.contains(&self.slot(key))
    }

    fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    fn push(&mut self, key: &str, value: &str) {
        let slot = self.slot(key);
        match &slot {
            Slot::Field(field) => {
                if let Some(raw) = self.record.assign(*field, value) {
                    self.record
                        .annotations
                        .push(format!("{}: {raw}", field.display_name()));
                }
            }
            Slot::Year => {
                let year = value.trim();
                self.year = (!year.is_empty()).then(|| year.to_string());
            }
            Slot::Extra(_) => self.record.set_extra(key, value),
        }
        self.seen.insert(slot);
    }

    /// A year with no paper is not an identity; it is kept under `extra`.
    fn finish(self) -> BenchmarkRecord {
        let mut record = self.record;
        if let Some(year) = self.year {
            match record.paper_and_year.take() {
                Some(paper) if paper.contains(&year) => record.paper_and_year = Some(paper),
                Some(paper) => record.paper_and_year = Some(format!("{paper} ({year})")),
                None => record.set_extra("year", &year),
            }
        }
        record
    }
}
