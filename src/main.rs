//! chestx-bench CLI
//!
//! # Usage
//!
//! ```bash
//! # Merge notes and summaries, regenerate both reports
//! chestx-bench update --table chestx_benchmarks.csv \
//!     --notes notes1.txt --json summaries.json \
//!     --markdown chestx_benchmarks.md --workbook chestx_benchmarks.xlsx
//!
//! # Regenerate reports only, best AUC first
//! chestx-bench render --table chestx_benchmarks.csv --markdown chestx_benchmarks.md --rank
//!
//! # Show how inputs parse, without writing anything
//! chestx-bench check --notes notes1.txt
//! ```

use chestx_bench::cli::run_command;
use chestx_bench::config::parse_args;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = match parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
