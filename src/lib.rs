//! chestx-bench: ChestX-ray14 benchmark tracker
//!
//! Turns hand-written experiment notes (`Key: Value` blocks) and JSON run
//! summaries into one deduplicated benchmark table, persisted as CSV and
//! rendered as a Markdown table and an Excel workbook.
//!
//! # Pipeline
//!
//! 1. [`readers`] parse each input into [`record::BenchmarkRecord`]s,
//!    resolving key spellings through the synonym table.
//! 2. [`table`] loads the persisted table and merges records field by field,
//!    keyed by paper and model backbone.
//! 3. [`report`] renders the table; [`pipeline`] writes everything only once
//!    every output is ready.
//!
//! # Example
//!
//! ```
//! use chestx_bench::record::{BenchmarkRecord, Location, RecordOrigin, SourcedRecord};
//! use chestx_bench::table::{merge_records, BenchmarkTable};
//!
//! let mut table = BenchmarkTable::from_rows(vec![
//!     BenchmarkRecord::new("CheXNet (2017)", "DenseNet-121").with_auc(0.841),
//! ]);
//! let mut update = BenchmarkRecord::default().with_f1(0.55);
//! update.paper_and_year = Some("CheXNet (2017)".into());
//! let incoming = SourcedRecord::new(RecordOrigin::new("notes.txt", Location::Line(1)), update);
//!
//! let report = merge_records(&mut table, [&incoming]);
//! assert_eq!(report.updated, 1);
//! assert_eq!(table.rows()[0].reported_f1, Some(0.55));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod readers;
pub mod record;
pub mod report;
pub mod table;

pub use error::{BenchError, Result};
pub use record::{BenchmarkRecord, Field};
pub use table::BenchmarkTable;
