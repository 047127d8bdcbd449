//! Configuration: command-line arguments and the optional YAML file.
//!
//! Command-line values win over the file; the file wins over built-in
//! defaults.

pub mod cli;
pub mod file;

pub use cli::{
    parse_args, CheckArgs, Cli, Command, InputArgs, OutputFormat, RenderArgs, UpdateArgs,
};
pub use file::BenchConfig;

use crate::error::{BenchError, Result};
use crate::record::AliasTable;
use crate::report::RowOrder;
use std::path::{Path, PathBuf};

/// Effective settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub table: Option<PathBuf>,
    pub markdown: Option<PathBuf>,
    pub workbook: Option<PathBuf>,
    pub order: RowOrder,
    pub aliases: AliasTable,
}

impl Settings {
    /// Merge command-line values over the configuration file at `config`.
    pub fn resolve(
        config: Option<&Path>,
        table: Option<PathBuf>,
        markdown: Option<PathBuf>,
        workbook: Option<PathBuf>,
        rank: bool,
    ) -> Result<Self> {
        let (file, aliases) = match config {
            Some(path) => {
                let file = BenchConfig::load(path)?;
                let aliases = file.alias_table(path)?;
                (file, aliases)
            }
            None => (BenchConfig::default(), AliasTable::builtin()),
        };
        Ok(Self {
            table: table.or(file.table),
            markdown: markdown.or(file.markdown),
            workbook: workbook.or(file.workbook),
            order: if rank || file.rank {
                RowOrder::Ranked
            } else {
                RowOrder::Table
            },
            aliases,
        })
    }

    pub fn from_update(args: &UpdateArgs) -> Result<Self> {
        Self::resolve(
            args.config.as_deref(),
            args.table.clone(),
            args.markdown.clone(),
            args.workbook.clone(),
            args.rank,
        )
    }

    pub fn from_render(args: &RenderArgs) -> Result<Self> {
        Self::resolve(
            args.config.as_deref(),
            args.table.clone(),
            args.markdown.clone(),
            args.workbook.clone(),
            args.rank,
        )
    }

    pub fn from_check(args: &CheckArgs) -> Result<Self> {
        Self::resolve(args.config.as_deref(), args.table.clone(), None, None, false)
    }

    /// The table path, required by `update` and `render`.
    pub fn table_path(&self) -> Result<&Path> {
        self.table.as_deref().ok_or_else(|| BenchError::Usage {
            field: "table".into(),
            message: "no table path given".into(),
            suggestion: "Pass --table <CSV> or set 'table' in the configuration file".into(),
        })
    }

    /// Whether any report output is configured.
    pub fn has_reports(&self) -> bool {
        self.markdown.is_some() || self.workbook.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Field;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_config() {
        let settings = Settings::resolve(None, Some("t.csv".into()), None, None, false).unwrap();
        assert_eq!(settings.table_path().unwrap(), Path::new("t.csv"));
        assert_eq!(settings.order, RowOrder::Table);
        assert!(!settings.has_reports());
        assert_eq!(settings.aliases.extra_len(), 0);
    }

    #[test]
    fn test_missing_table_is_usage_error() {
        let settings = Settings::resolve(None, None, None, None, false).unwrap();
        assert_eq!(settings.table_path().unwrap_err().code(), "E041");
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bench.yaml");
        fs::write(
            &path,
            "table: from_file.csv\nmarkdown: from_file.md\nrank: true\naliases:\n  arch: model_backbone\n",
        )
        .unwrap();

        let settings =
            Settings::resolve(Some(path.as_path()), Some("cli.csv".into()), None, None, false).unwrap();
        assert_eq!(settings.table, Some(PathBuf::from("cli.csv")));
        assert_eq!(settings.markdown, Some(dir.path().join("from_file.md")));
        assert_eq!(settings.order, RowOrder::Ranked);
        assert_eq!(settings.aliases.resolve("Arch"), Some(Field::ModelBackbone));
    }
}
