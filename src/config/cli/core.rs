//! Core CLI types - Cli, Command, and per-command argument structs

use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use std::path::PathBuf;

use super::types::OutputFormat;
use crate::readers::{InputSource, SourceKind};

/// chestx-bench: ChestX-ray14 benchmark tracker
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "chestx-bench")]
#[command(version)]
#[command(
    about = "Merge ChestX-ray14 benchmark notes and JSON summaries into a CSV table and regenerate Markdown/Excel reports"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Read inputs, merge them into the table, write the table and reports
    Update(UpdateArgs),

    /// Regenerate reports from the table without reading inputs
    Render(RenderArgs),

    /// Parse inputs and show the normalized records without writing anything
    Check(CheckArgs),
}

/// Input files. Their order on the command line is the merge order.
#[derive(Parser, Debug, Clone, PartialEq, Default)]
pub struct InputArgs {
    /// Plain-text notes with `Key: Value` blocks (repeatable)
    #[arg(long, value_name = "FILE", alias = "from-notes")]
    pub notes: Vec<PathBuf>,

    /// JSON object or array of objects (repeatable)
    #[arg(long, value_name = "FILE", alias = "from-json")]
    pub json: Vec<PathBuf>,

    /// `--notes`/`--json` interleaved as typed; filled in by [`parse_args`]
    #[arg(skip)]
    pub ordered: Vec<InputSource>,
}

impl InputArgs {
    /// Sources in merge order.
    ///
    /// Falls back to all notes files then all JSON files when the struct was
    /// built without going through [`parse_args`].
    pub fn sources(&self) -> Vec<InputSource> {
        if !self.ordered.is_empty() {
            return self.ordered.clone();
        }
        self.notes
            .iter()
            .map(InputSource::notes)
            .chain(self.json.iter().map(InputSource::json))
            .collect()
    }
}

/// Arguments for the update command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct UpdateArgs {
    /// Persisted benchmark table (CSV); created if missing
    #[arg(long, value_name = "CSV", alias = "csv")]
    pub table: Option<PathBuf>,

    #[command(flatten)]
    pub inputs: InputArgs,

    /// Write the Markdown report here
    #[arg(long, value_name = "MD", alias = "md")]
    pub markdown: Option<PathBuf>,

    /// Write the Excel report here
    #[arg(long, value_name = "XLSX", alias = "xlsx")]
    pub workbook: Option<PathBuf>,

    /// List report rows by AUC then F1, best first (the table keeps its order)
    #[arg(long)]
    pub rank: bool,

    /// YAML configuration with default paths and extra key synonyms
    #[arg(short, long, value_name = "YAML")]
    pub config: Option<PathBuf>,

    /// Summary format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the render command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct RenderArgs {
    /// Persisted benchmark table (CSV)
    #[arg(long, value_name = "CSV", alias = "csv")]
    pub table: Option<PathBuf>,

    /// Write the Markdown report here
    #[arg(long, value_name = "MD", alias = "md")]
    pub markdown: Option<PathBuf>,

    /// Write the Excel report here
    #[arg(long, value_name = "XLSX", alias = "xlsx")]
    pub workbook: Option<PathBuf>,

    /// List report rows by AUC then F1, best first
    #[arg(long)]
    pub rank: bool,

    /// YAML configuration with default paths
    #[arg(short, long, value_name = "YAML")]
    pub config: Option<PathBuf>,
}

/// Arguments for the check command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct CheckArgs {
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Merge against this table in memory to preview the outcome
    #[arg(long, value_name = "CSV", alias = "csv")]
    pub table: Option<PathBuf>,

    /// YAML configuration with extra key synonyms
    #[arg(short, long, value_name = "YAML")]
    pub config: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Recover the typed order of `--notes` and `--json` values.
///
/// Only call on matches of a command that defines both arguments.
fn ordered_sources(matches: &ArgMatches) -> Vec<InputSource> {
    let mut indexed: Vec<(usize, InputSource)> = Vec::new();
    for (id, kind) in [("notes", SourceKind::Notes), ("json", SourceKind::Json)] {
        let values = matches.try_get_many::<PathBuf>(id).ok().flatten();
        if let (Some(indices), Some(values)) = (matches.indices_of(id), values) {
            indexed.extend(indices.zip(values).map(|(index, path)| {
                (
                    index,
                    InputSource {
                        kind,
                        path: path.clone(),
                    },
                )
            }));
        }
    }
    indexed.sort_by_key(|(index, _)| *index);
    indexed.into_iter().map(|(_, source)| source).collect()
}

/// Parse CLI arguments (also used by tests)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let matches = Cli::command().try_get_matches_from(args)?;
    let mut cli = Cli::from_arg_matches(&matches)?;
    if let Some((_, sub)) = matches.subcommand() {
        match &mut cli.command {
            Command::Update(args) => args.inputs.ordered = ordered_sources(sub),
            Command::Check(args) => args.inputs.ordered = ordered_sources(sub),
            Command::Render(_) => {}
        }
    }
    Ok(cli)
}
