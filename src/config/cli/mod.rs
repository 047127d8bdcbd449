//! CLI argument parsing
//!
//! # Usage
//!
//! ```bash
//! chestx-bench update --table chestx_benchmarks.csv \
//!     --notes notes1.txt --notes notes2.txt --json summaries.json \
//!     --markdown chestx_benchmarks.md --workbook chestx_benchmarks.xlsx
//! chestx-bench render --table chestx_benchmarks.csv --markdown chestx_benchmarks.md --rank
//! chestx-bench check --notes notes1.txt --format json
//! ```

mod core;
mod types;

pub use core::{
    parse_args, CheckArgs, Cli, Command, InputArgs, RenderArgs, UpdateArgs,
};
pub use types::OutputFormat;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readers::InputSource;
    use std::path::PathBuf;

    #[test]
    fn test_parse_update_command() {
        let cli = parse_args([
            "chestx-bench",
            "update",
            "--table",
            "bench.csv",
            "--notes",
            "notes.txt",
            "--markdown",
            "bench.md",
            "--workbook",
            "bench.xlsx",
        ])
        .unwrap();
        match cli.command {
            Command::Update(args) => {
                assert_eq!(args.table, Some(PathBuf::from("bench.csv")));
                assert_eq!(args.inputs.notes, vec![PathBuf::from("notes.txt")]);
                assert_eq!(args.markdown, Some(PathBuf::from("bench.md")));
                assert_eq!(args.workbook, Some(PathBuf::from("bench.xlsx")));
                assert!(!args.rank);
                assert_eq!(args.format, OutputFormat::Text);
            }
            _ => panic!("Expected Update command"),
        }
    }

    #[test]
    fn test_sources_keep_typed_order() {
        let cli = parse_args([
            "chestx-bench",
            "update",
            "--json",
            "a.json",
            "--notes",
            "b.txt",
            "--json",
            "c.json",
            "--table",
            "t.csv",
        ])
        .unwrap();
        match cli.command {
            Command::Update(args) => assert_eq!(
                args.inputs.sources(),
                vec![
                    InputSource::json("a.json"),
                    InputSource::notes("b.txt"),
                    InputSource::json("c.json"),
                ]
            ),
            _ => panic!("Expected Update command"),
        }
    }

    #[test]
    fn test_legacy_flag_aliases() {
        let cli = parse_args([
            "chestx-bench",
            "update",
            "--csv",
            "t.csv",
            "--from-notes",
            "n.txt",
            "--from-json",
            "s.json",
            "--md",
            "t.md",
            "--xlsx",
            "t.xlsx",
        ])
        .unwrap();
        match cli.command {
            Command::Update(args) => {
                assert_eq!(args.table, Some(PathBuf::from("t.csv")));
                assert_eq!(args.inputs.sources().len(), 2);
                assert_eq!(args.markdown, Some(PathBuf::from("t.md")));
            }
            _ => panic!("Expected Update command"),
        }
    }

    #[test]
    fn test_sources_fallback_without_parse() {
        let inputs = InputArgs {
            notes: vec!["n.txt".into()],
            json: vec!["j.json".into()],
            ordered: Vec::new(),
        };
        assert_eq!(
            inputs.sources(),
            vec![InputSource::notes("n.txt"), InputSource::json("j.json")]
        );
    }

    #[test]
    fn test_parse_render_with_global_flags() {
        let cli = parse_args(["chestx-bench", "-q", "render", "--table", "t.csv", "--rank"]).unwrap();
        assert!(cli.quiet);
        match cli.command {
            Command::Render(args) => assert!(args.rank),
            _ => panic!("Expected Render command"),
        }
    }

    #[test]
    fn test_parse_check_json_format() {
        let cli = parse_args(["chestx-bench", "check", "--notes", "n.txt", "--format", "json"]).unwrap();
        match cli.command {
            Command::Check(args) => {
                assert_eq!(args.format, OutputFormat::Json);
                assert_eq!(args.inputs.sources(), vec![InputSource::notes("n.txt")]);
            }
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_invalid_format_is_rejected() {
        assert!(parse_args(["chestx-bench", "check", "--format", "yaml"]).is_err());
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
