//! Markdown table export

use super::{Cell, SheetGrid};

/// Placeholder for empty cells.
pub const EMPTY_CELL: &str = "—";

fn escape(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace('|', "\\|")
}

fn format_cell(cell: &Cell) -> String {
    match cell {
        Cell::Empty => EMPTY_CELL.to_string(),
        Cell::Text(text) => escape(text),
        Cell::Integer(n) => n.to_string(),
        Cell::Score(score) => format!("{score:.3}"),
    }
}

/// Export the grid as a Markdown table.
pub fn render_markdown(grid: &SheetGrid) -> String {
    let mut md = String::new();

    // Header
    md.push('|');
    for title in &grid.header {
        md.push_str(&format!(" {title} |"));
    }
    md.push('\n');

    // Separator
    md.push('|');
    for title in &grid.header {
        md.push_str(&"-".repeat(title.chars().count() + 2));
        md.push('|');
    }
    md.push('\n');

    // Rows
    for row in &grid.rows {
        md.push('|');
        for cell in row {
            md.push_str(&format!(" {} |", format_cell(cell)));
        }
        md.push('\n');
    }

    md
}
