//! YAML configuration file
//!
//! ```yaml
//! table: chestx_benchmarks.csv
//! markdown: chestx_benchmarks.md
//! workbook: chestx_benchmarks.xlsx
//! rank: false
//! aliases:
//!   backbone arch: model_backbone
//!   val auc: reported_auc
//! ```
//!
//! Relative paths are resolved against the directory holding the file.

use crate::error::{BenchError, Result};
use crate::record::AliasTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Defaults for the command line plus extra key synonyms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchConfig {
    pub table: Option<PathBuf>,
    pub markdown: Option<PathBuf>,
    pub workbook: Option<PathBuf>,
    pub rank: bool,
    /// Raw key → canonical field (column name or any known synonym)
    pub aliases: BTreeMap<String, String>,
}

impl BenchConfig {
    /// Load and parse a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| BenchError::ConfigParsing {
            path: path.to_path_buf(),
            message: format!("Failed to read config file: {e}"),
        })?;
        let config = Self::from_yaml_str(&content, path)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(config.relative_to(base))
    }

    /// Parse YAML text. `path` is only used in messages.
    pub fn from_yaml_str(content: &str, path: &Path) -> Result<Self> {
        // An empty file is a valid, empty configuration
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| BenchError::ConfigParsing {
            path: path.to_path_buf(),
            message: format!("Failed to parse YAML config: {e}"),
        })
    }

    /// Synonym table with the configured aliases on top of the built-ins.
    pub fn alias_table(&self, path: &Path) -> Result<AliasTable> {
        AliasTable::from_config(path, &self.aliases)
    }

    fn relative_to(mut self, base: &Path) -> Self {
        let resolve = |p: Option<PathBuf>| p.map(|p| if p.is_relative() { base.join(p) } else { p });
        self.table = resolve(self.table);
        self.markdown = resolve(self.markdown);
        self.workbook = resolve(self.workbook);
        self
    }
}
