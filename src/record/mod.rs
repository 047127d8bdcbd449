//! Benchmark record schema shared by readers, merger, store and reports.

pub mod aliases;
pub mod field;
pub mod numeric;

pub use aliases::{normalize_key, AliasTable};
pub use field::{Field, FieldKind};

use numeric::{parse_decimal, parse_integer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// One row of the benchmark table.
///
/// Every attribute is optional; an empty value is the same as a missing one.
/// `extra` keeps keys that no synonym resolved, so nothing typed into a note
/// is ever dropped. `annotations` holds raw numeric text a reader could not
/// store losslessly; it is folded into `notes` when the record reaches the
/// table and is never persisted on its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    pub paper_and_year: Option<String>,
    pub model_backbone: Option<String>,
    pub input_resolution: Option<String>,
    pub loss_function: Option<String>,
    pub optimizer: Option<String>,
    pub epochs: Option<u32>,
    pub reported_auc: Option<f64>,
    pub reported_f1: Option<f64>,
    pub interpretability: Option<String>,
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
    #[serde(skip)]
    pub annotations: Vec<String>,
}

impl BenchmarkRecord {
    /// Create a record with both identity fields set.
    pub fn new(paper_and_year: impl Into<String>, model_backbone: impl Into<String>) -> Self {
        Self {
            paper_and_year: non_empty(paper_and_year.into()),
            model_backbone: non_empty(model_backbone.into()),
            ..Self::default()
        }
    }

    /// Set the reported AUC
    pub fn with_auc(mut self, auc: f64) -> Self {
        self.reported_auc = Some(auc);
        self
    }

    /// Set the reported F1
    pub fn with_f1(mut self, f1: f64) -> Self {
        self.reported_f1 = Some(f1);
        self
    }

    /// Set the number of epochs
    pub fn with_epochs(mut self, epochs: u32) -> Self {
        self.epochs = Some(epochs);
        self
    }

    /// Set any field from raw text
    pub fn with(mut self, field: Field, raw: &str) -> Self {
        self.assign(field, raw);
        self
    }

    fn text_slot(&self, field: Field) -> Option<&Option<String>> {
        match field {
            Field::PaperAndYear => Some(&self.paper_and_year),
            Field::ModelBackbone => Some(&self.model_backbone),
            Field::InputResolution => Some(&self.input_resolution),
            Field::LossFunction => Some(&self.loss_function),
            Field::Optimizer => Some(&self.optimizer),
            Field::Interpretability => Some(&self.interpretability),
            Field::Notes => Some(&self.notes),
            Field::Epochs | Field::ReportedAuc | Field::ReportedF1 => None,
        }
    }

    fn text_slot_mut(&mut self, field: Field) -> Option<&mut Option<String>> {
        match field {
            Field::PaperAndYear => Some(&mut self.paper_and_year),
            Field::ModelBackbone => Some(&mut self.model_backbone),
            Field::InputResolution => Some(&mut self.input_resolution),
            Field::LossFunction => Some(&mut self.loss_function),
            Field::Optimizer => Some(&mut self.optimizer),
            Field::Interpretability => Some(&mut self.interpretability),
            Field::Notes => Some(&mut self.notes),
            Field::Epochs | Field::ReportedAuc | Field::ReportedF1 => None,
        }
    }

    /// Store `raw` into `field`, parsing numeric fields permissively.
    ///
    /// Returns the trimmed raw text when it carried more than the stored value
    /// (an annotation such as `(avg)`, or text with no number at all) so the
    /// caller can keep it in `notes`.
    pub fn assign(&mut self, field: Field, raw: &str) -> Option<String> {
        let text = raw.trim();
        match field.kind() {
            FieldKind::Text => {
                let value = if field == Field::InputResolution {
                    text.replace(['×', 'X'], "x")
                } else {
                    text.to_string()
                };
                if let Some(slot) = self.text_slot_mut(field) {
                    *slot = non_empty(value);
                }
                None
            }
            FieldKind::Integer => {
                let parsed = parse_integer(text);
                self.epochs = parsed.value;
                (!text.is_empty() && parsed.has_annotation()).then(|| text.to_string())
            }
            FieldKind::Decimal => {
                let parsed = parse_decimal(text);
                match field {
                    Field::ReportedAuc => self.reported_auc = parsed.value,
                    _ => self.reported_f1 = parsed.value,
                }
                (!text.is_empty() && parsed.has_annotation()).then(|| text.to_string())
            }
        }
    }

    /// Canonical textual value of a field, `None` when empty.
    ///
    /// Decimals use the shortest representation that parses back to the same
    /// value, so the persisted table round-trips exactly.
    pub fn get(&self, field: Field) -> Option<String> {
        match field {
            Field::Epochs => self.epochs.map(|e| e.to_string()),
            Field::ReportedAuc => self.reported_auc.map(|v| v.to_string()),
            Field::ReportedF1 => self.reported_f1.map(|v| v.to_string()),
            _ => self.text_slot(field).and_then(Clone::clone),
        }
    }

    /// Whether a field holds a value.
    pub fn is_present(&self, field: Field) -> bool {
        match field {
            Field::Epochs => self.epochs.is_some(),
            Field::ReportedAuc => self.reported_auc.is_some(),
            Field::ReportedF1 => self.reported_f1.is_some(),
            _ => self.text_slot(field).is_some_and(Option::is_some),
        }
    }

    /// Fields that hold a value, in column order.
    pub fn present_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|f| self.is_present(*f))
            .collect()
    }

    /// Append a fragment to `notes`, separated by `; `.
    pub fn append_note(&mut self, fragment: &str) {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            return;
        }
        self.notes = Some(match self.notes.take() {
            Some(existing) => format!("{existing}; {fragment}"),
            None => fragment.to_string(),
        });
    }

    /// Append `fragment` to `notes` unless it is already one of its entries.
    ///
    /// Returns whether `notes` changed.
    pub fn append_note_once(&mut self, fragment: &str) -> bool {
        let fragment = fragment.trim();
        let present = self
            .notes
            .as_deref()
            .is_some_and(|notes| notes.split("; ").any(|part| part == fragment));
        if fragment.is_empty() || present {
            return false;
        }
        self.append_note(fragment);
        true
    }

    /// Move pending annotations into `notes`.
    pub fn settle_annotations(&mut self) {
        for fragment in std::mem::take(&mut self.annotations) {
            self.append_note_once(&fragment);
        }
    }

    /// Store an unrecognized key under its normalized form.
    pub fn set_extra(&mut self, key: &str, value: &str) {
        let key = normalize_key(key);
        let value = value.trim();
        if key.is_empty() || value.is_empty() {
            return;
        }
        self.extra.insert(key, value.to_string());
    }

    /// Overwrite this record's fields with every field present in `incoming`.
    ///
    /// Absent incoming fields never clear existing values, and incoming
    /// annotations are appended to `notes` rather than replacing it. Returns
    /// the number of values that actually changed.
    pub fn merge_from(&mut self, incoming: &BenchmarkRecord) -> usize {
        let mut changed = 0;
        let mut notes_counted = false;
        for field in Field::ALL {
            if !incoming.is_present(field) {
                continue;
            }
            let before = self.get(field);
            match field {
                Field::Epochs => self.epochs = incoming.epochs,
                Field::ReportedAuc => self.reported_auc = incoming.reported_auc,
                Field::ReportedF1 => self.reported_f1 = incoming.reported_f1,
                _ => {
                    if let (Some(slot), Some(value)) =
                        (self.text_slot_mut(field), incoming.text_slot(field))
                    {
                        slot.clone_from(value);
                    }
                }
            }
            if self.get(field) != before {
                changed += 1;
                notes_counted |= field == Field::Notes;
            }
        }
        for (key, value) in &incoming.extra {
            if self.extra.get(key) != Some(value) {
                self.extra.insert(key.clone(), value.clone());
                changed += 1;
            }
        }
        let notes_before = self.notes.clone();
        for fragment in &incoming.annotations {
            self.append_note_once(fragment);
        }
        if self.notes != notes_before && !notes_counted {
            changed += 1;
        }
        changed
    }

    /// Normalized identity key, or the first identity field that is missing.
    pub fn identity_key(&self) -> Result<IdentityKey, Field> {
        let paper = self.paper_and_year.as_deref().ok_or(Field::PaperAndYear)?;
        let model = self.model_backbone.as_deref().ok_or(Field::ModelBackbone)?;
        Ok(IdentityKey::new(paper, model))
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == value.len() {
        Some(value)
    } else {
        Some(trimmed.to_string())
    }
}

/// Normalized `(paper_and_year, model_backbone)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdentityKey {
    pub paper: String,
    pub model: String,
}

impl IdentityKey {
    pub fn new(paper: &str, model: &str) -> Self {
        Self {
            paper: normalize_identity(paper),
            model: normalize_identity(model),
        }
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.paper, self.model)
    }
}

/// Trim, collapse whitespace runs, lower-case.
pub fn normalize_identity(component: &str) -> String {
    component
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Where in an input a record came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// 1-based line in a notes file
    Line(usize),
    /// 0-based position in a JSON array (0 for a single object)
    Index(usize),
    /// 1-based data row in the persisted table
    Row(usize),
}

/// File and position of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOrigin {
    pub path: PathBuf,
    pub location: Location,
}

impl RecordOrigin {
    pub fn new(path: impl Into<PathBuf>, location: Location) -> Self {
        Self {
            path: path.into(),
            location,
        }
    }
}

impl fmt::Display for RecordOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path.display();
        match self.location {
            Location::Line(line) => write!(f, "{path}:{line}"),
            Location::Index(index) => write!(f, "{path}[{index}]"),
            Location::Row(row) => write!(f, "{path} row {row}"),
        }
    }
}

/// A record together with its origin.
#[derive(Debug, Clone, PartialEq)]
pub struct SourcedRecord {
    pub origin: RecordOrigin,
    pub record: BenchmarkRecord,
}

impl SourcedRecord {
    pub fn new(origin: RecordOrigin, record: BenchmarkRecord) -> Self {
        Self { origin, record }
    }
}
