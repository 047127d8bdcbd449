//! Report rendering: Markdown table and Excel workbook.
//!
//! Both formats are produced from one [`SheetGrid`], so they always carry the
//! same rows and columns. Rendering is a pure function of the table.

pub mod markdown;
pub mod workbook;

pub use markdown::render_markdown;
pub use workbook::render_workbook;

use crate::record::{BenchmarkRecord, Field};
use crate::table::BenchmarkTable;
use std::cmp::Ordering;

/// One typed cell of a report.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Integer(u32),
    Score(f64),
}

impl Cell {
    fn of(record: &BenchmarkRecord, field: Field) -> Self {
        match field {
            Field::Epochs => record.epochs.map_or(Cell::Empty, Cell::Integer),
            Field::ReportedAuc => record.reported_auc.map_or(Cell::Empty, Cell::Score),
            Field::ReportedF1 => record.reported_f1.map_or(Cell::Empty, Cell::Score),
            _ => record.get(field).map_or(Cell::Empty, Cell::Text),
        }
    }
}

/// Row order of the rendered reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowOrder {
    /// Same order as the persisted table
    #[default]
    Table,
    /// AUC descending, then F1 descending; empty scores last, ties in table order
    Ranked,
}

/// Header plus typed rows, shared by every renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetGrid {
    pub header: Vec<&'static str>,
    pub rows: Vec<Vec<Cell>>,
}

impl SheetGrid {
    pub fn from_table(table: &BenchmarkTable, order: RowOrder) -> Self {
        let mut records: Vec<&BenchmarkRecord> = table.iter().collect();
        if order == RowOrder::Ranked {
            records.sort_by(|a, b| {
                descending(a.reported_auc, b.reported_auc)
                    .then_with(|| descending(a.reported_f1, b.reported_f1))
            });
        }
        Self {
            header: Field::ALL.iter().map(|f| f.display_name()).collect(),
            rows: records
                .into_iter()
                .map(|r| Field::ALL.iter().map(|f| Cell::of(r, *f)).collect())
                .collect(),
        }
    }
}

/// Higher scores first, missing scores after all present ones.
fn descending(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
