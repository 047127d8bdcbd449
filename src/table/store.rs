//! CSV persistence for the benchmark table.
//!
//! The header is the ten canonical column names plus `extra`, which holds the
//! extension map as a compact JSON object. Loading is lenient about headers:
//! any spelling the synonym table knows is accepted (tables written by older
//! tooling use `paper_year`, `model`, `loss`), unknown columns become
//! extension keys, and missing columns are simply empty.

use super::BenchmarkTable;
use crate::error::{BenchError, Result};
use crate::record::{AliasTable, BenchmarkRecord, Field, IdentityKey};
use std::collections::{BTreeMap, HashMap};
use std::io::Read;
use std::path::Path;

/// Header of the extension column.
pub const EXTRA_COLUMN: &str = "extra";

/// How a CSV column maps onto a record.
enum Column {
    Field(Field),
    Extra,
    Unknown(String),
}

/// A loaded table plus anything worth telling the user about the file.
#[derive(Debug, Default)]
pub struct LoadedTable {
    pub table: BenchmarkTable,
    pub warnings: Vec<String>,
}

/// Load the table at `path`. A missing file is an empty table.
pub fn load_table(path: &Path, aliases: &AliasTable) -> Result<LoadedTable> {
    match std::fs::File::open(path) {
        Ok(file) => from_csv_reader(file, path, aliases),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(LoadedTable::default()),
        Err(e) => Err(BenchError::persistence(path, format!("cannot open table: {e}"))),
    }
}

/// Parse CSV from any reader. `path` is only used in messages.
pub fn from_csv_reader<R: Read>(reader: R, path: &Path, aliases: &AliasTable) -> Result<LoadedTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| BenchError::persistence(path, format!("cannot read header: {e}")))?
        .clone();
    let columns: Vec<Column> = headers
        .iter()
        .map(|header| {
            if header.trim() == EXTRA_COLUMN {
                Column::Extra
            } else {
                // Canonical headers are fixed; configured synonyms cannot repoint them
                Field::from_column(header.trim())
                    .or_else(|| aliases.resolve(header))
                    .map_or_else(|| Column::Unknown(header.to_string()), Column::Field)
            }
        })
        .collect();

    let mut rows = Vec::new();
    for (index, row) in csv_reader.records().enumerate() {
        let row_number = index + 1;
        let row = row.map_err(|e| BenchError::persistence(path, format!("row {row_number}: {e}")))?;
        let mut record = BenchmarkRecord::default();
        let mut kept_raw = Vec::new();
        for (column, value) in columns.iter().zip(row.iter()) {
            match column {
                Column::Field(field) => {
                    if let Some(raw) = record.assign(*field, value) {
                        kept_raw.push(format!("{}: {raw}", field.display_name()));
                    }
                }
                Column::Extra if !value.trim().is_empty() => {
                    let extra: BTreeMap<String, String> = serde_json::from_str(value).map_err(|e| {
                        BenchError::persistence(
                            path,
                            format!("row {row_number}: invalid '{EXTRA_COLUMN}' column: {e}"),
                        )
                    })?;
                    record.extra.extend(extra);
                }
                Column::Extra => {}
                Column::Unknown(header) => record.set_extra(header, value),
            }
        }
        for raw in &kept_raw {
            record.append_note(raw);
        }
        if record != BenchmarkRecord::default() {
            rows.push((row_number, record));
        }
    }

    Ok(fold_duplicates(rows))
}

/// Collapse rows that share an identity into the first one, in file order.
fn fold_duplicates(rows: Vec<(usize, BenchmarkRecord)>) -> LoadedTable {
    let mut loaded = LoadedTable::default();
    let mut kept: Vec<BenchmarkRecord> = Vec::with_capacity(rows.len());
    let mut positions: HashMap<IdentityKey, usize> = HashMap::new();

    for (row_number, record) in rows {
        match record.identity_key() {
            Ok(key) => {
                if let Some(&position) = positions.get(&key) {
                    kept[position].merge_from(&record);
                    loaded.warnings.push(format!(
                        "row {row_number} repeats identity '{key}'; merged into the earlier row"
                    ));
                } else {
                    positions.insert(key, kept.len());
                    kept.push(record);
                }
            }
            Err(field) => {
                loaded.warnings.push(format!(
                    "row {row_number} has no {field}; kept as-is but it cannot be updated"
                ));
                kept.push(record);
            }
        }
    }

    loaded.table = BenchmarkTable::from_rows(kept);
    loaded
}

/// Serialize the table to CSV bytes.
pub fn to_csv_bytes(table: &BenchmarkTable) -> Result<Vec<u8>> {
    let internal = |e: &dyn std::fmt::Display| BenchError::Internal {
        message: format!("CSV encoding failed: {e}"),
    };

    let mut writer = csv::Writer::from_writer(Vec::new());
    let header: Vec<&str> = Field::ALL
        .iter()
        .map(|f| f.column())
        .chain(std::iter::once(EXTRA_COLUMN))
        .collect();
    writer.write_record(&header).map_err(|e| internal(&e))?;

    for record in table {
        let mut cells: Vec<String> = Field::ALL
            .iter()
            .map(|f| record.get(*f).unwrap_or_default())
            .collect();
        let extra = if record.extra.is_empty() {
            String::new()
        } else {
            serde_json::to_string(&record.extra).map_err(|e| internal(&e))?
        };
        cells.push(extra);
        writer.write_record(&cells).map_err(|e| internal(&e))?;
    }

    writer.into_inner().map_err(|e| internal(&e))
}
