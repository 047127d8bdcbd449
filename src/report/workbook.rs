//! Excel workbook export.
//!
//! One sheet, same columns as the Markdown report. Scores and epochs are
//! numeric cells so the sheet can be sorted and filtered; empty fields are
//! blank cells.

use super::{Cell, SheetGrid};
use crate::error::{BenchError, Result};
use rust_xlsxwriter::{Format, Workbook, XlsxError};

/// Name of the single worksheet.
pub const SHEET_NAME: &str = "Benchmarks";

const MIN_WIDTH: usize = 10;
const MAX_WIDTH: usize = 60;

fn xlsx_error(e: XlsxError) -> BenchError {
    BenchError::Internal {
        message: format!("workbook encoding failed: {e}"),
    }
}

fn cell_width(cell: &Cell) -> usize {
    match cell {
        Cell::Empty => 0,
        Cell::Text(text) => text.chars().count(),
        Cell::Integer(n) => n.to_string().len(),
        Cell::Score(_) => 5,
    }
}

/// Column widths in characters, clamped to a readable range.
fn column_widths(grid: &SheetGrid) -> Vec<usize> {
    grid.header
        .iter()
        .enumerate()
        .map(|(col, title)| {
            grid.rows
                .iter()
                .filter_map(|row| row.get(col))
                .map(cell_width)
                .chain(std::iter::once(title.chars().count()))
                .max()
                .unwrap_or(MIN_WIDTH)
                .clamp(MIN_WIDTH, MAX_WIDTH)
        })
        .collect()
}

/// Render the grid as `.xlsx` bytes.
pub fn render_workbook(grid: &SheetGrid) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let score_format = Format::new().set_num_format("0.000");

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME).map_err(xlsx_error)?;

    for (col, (title, width)) in grid.header.iter().zip(column_widths(grid)).enumerate() {
        let col = u16::try_from(col).map_err(|_| BenchError::Internal {
            message: format!("too many columns: {col}"),
        })?;
        worksheet
            .write_string_with_format(0, col, *title, &header_format)
            .map_err(xlsx_error)?;
        worksheet
            .set_column_width(col, width as f64)
            .map_err(xlsx_error)?;
    }

    for (index, cells) in grid.rows.iter().enumerate() {
        let row = u32::try_from(index + 1).map_err(|_| BenchError::Internal {
            message: format!("too many rows: {index}"),
        })?;
        for (col, cell) in (0u16..).zip(cells) {
            match cell {
                Cell::Empty => {}
                Cell::Text(text) => {
                    worksheet.write_string(row, col, text).map_err(xlsx_error)?;
                }
                Cell::Integer(n) => {
                    worksheet
                        .write_number(row, col, f64::from(*n))
                        .map_err(xlsx_error)?;
                }
                Cell::Score(score) => {
                    worksheet
                        .write_number_with_format(row, col, *score, &score_format)
                        .map_err(xlsx_error)?;
                }
            }
        }
    }

    worksheet.set_freeze_panes(1, 0).map_err(xlsx_error)?;

    workbook.save_to_buffer().map_err(xlsx_error)
}
