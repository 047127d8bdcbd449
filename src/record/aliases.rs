//! Synonym table mapping the many spellings found in notes, JSON summaries and
//! old CSV headers onto canonical fields.
//!
//! Keys are compared after [`normalize_key`]: trimmed, lower-cased, `_`
//! treated as a space and whitespace runs collapsed. So `Reported_AUC`,
//! `reported auc` and `  REPORTED   AUC ` all hit the same entry.

use super::field::Field;
use crate::error::{BenchError, Result};
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

/// Built-in synonyms, already in normalized form.
const BUILTIN_ALIASES: &[(&str, Field)] = &[
    // paper
    ("paper and year", Field::PaperAndYear),
    ("paper & year", Field::PaperAndYear),
    ("paper year", Field::PaperAndYear),
    ("paper", Field::PaperAndYear),
    ("year", Field::PaperAndYear),
    // model
    ("model backbone", Field::ModelBackbone),
    ("model", Field::ModelBackbone),
    ("backbone", Field::ModelBackbone),
    ("architecture", Field::ModelBackbone),
    // resolution
    ("input resolution", Field::InputResolution),
    ("input", Field::InputResolution),
    ("resolution", Field::InputResolution),
    ("input size", Field::InputResolution),
    ("image size", Field::InputResolution),
    // training setup
    ("loss function", Field::LossFunction),
    ("loss", Field::LossFunction),
    ("optimizer", Field::Optimizer),
    ("optimiser", Field::Optimizer),
    ("epochs", Field::Epochs),
    ("epoch", Field::Epochs),
    // scores
    ("reported auc", Field::ReportedAuc),
    ("auc", Field::ReportedAuc),
    ("mean auc", Field::ReportedAuc),
    ("avg auc", Field::ReportedAuc),
    ("reported f1", Field::ReportedF1),
    ("f1", Field::ReportedF1),
    ("f1 score", Field::ReportedF1),
    // free text
    ("interpretability", Field::Interpretability),
    ("interpretability (grad-cam, attention, etc.)", Field::Interpretability),
    ("explainability", Field::Interpretability),
    ("notes", Field::Notes),
    ("note", Field::Notes),
    ("comments", Field::Notes),
];

static BUILTIN: LazyLock<HashMap<&'static str, Field>> =
    LazyLock::new(|| BUILTIN_ALIASES.iter().copied().collect());

/// Normalize a raw key for lookup.
pub fn normalize_key(raw: &str) -> String {
    raw.replace('_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Resolve a raw key through the built-in table only.
pub fn resolve_builtin(raw: &str) -> Option<Field> {
    BUILTIN.get(normalize_key(raw).as_str()).copied()
}

/// Built-in synonyms plus user-configured extras.
///
/// Extras take precedence, so a configuration can repoint a built-in alias.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    extra: HashMap<String, Field>,
}

impl AliasTable {
    /// Table with only the built-in synonyms.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Add a synonym. `field` must resolve to a canonical field (by column name
    /// or any existing synonym).
    pub fn with_alias(mut self, key: &str, field: &str) -> std::result::Result<Self, String> {
        let target = self
            .resolve(field)
            .ok_or_else(|| format!("alias '{key}' points at unknown field '{field}'"))?;
        self.extra.insert(normalize_key(key), target);
        Ok(self)
    }

    /// Build from configured `key → field` pairs; errors name the config file.
    pub fn from_config<'a>(
        path: &Path,
        pairs: impl IntoIterator<Item = (&'a String, &'a String)>,
    ) -> Result<Self> {
        pairs
            .into_iter()
            .try_fold(Self::builtin(), |table, (key, field)| table.with_alias(key, field))
            .map_err(|message| BenchError::ConfigParsing {
                path: path.to_path_buf(),
                message,
            })
    }

    /// Resolve a raw key to a canonical field.
    pub fn resolve(&self, raw: &str) -> Option<Field> {
        let key = normalize_key(raw);
        self.extra
            .get(&key)
            .copied()
            .or_else(|| BUILTIN.get(key.as_str()).copied())
    }

    /// Number of user-configured synonyms.
    pub fn extra_len(&self) -> usize {
        self.extra.len()
    }
}
