//! The benchmark table: ordered rows, merged by identity, persisted as CSV.

pub mod merge;
pub mod store;

pub use merge::{merge_records, MergeOutcome, MergeReport, Merger};
pub use store::{from_csv_reader, load_table, to_csv_bytes, LoadedTable};

use crate::record::{BenchmarkRecord, IdentityKey};
use std::collections::HashSet;

/// Ordered collection of benchmark records.
///
/// Row order is insertion order; merges update rows in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BenchmarkTable {
    rows: Vec<BenchmarkRecord>,
}

impl BenchmarkTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap rows as-is, without merging duplicates.
    pub fn from_rows(rows: Vec<BenchmarkRecord>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[BenchmarkRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BenchmarkRecord> {
        self.rows.iter()
    }

    /// Position of the row with this identity.
    pub fn position(&self, key: &IdentityKey) -> Option<usize> {
        self.rows
            .iter()
            .position(|r| r.identity_key().ok().as_ref() == Some(key))
    }

    /// Identities that occur on more than one row.
    pub fn duplicate_identities(&self) -> Vec<IdentityKey> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for key in self.rows.iter().filter_map(|r| r.identity_key().ok()) {
            if !seen.insert(key.clone()) && !duplicates.contains(&key) {
                duplicates.push(key);
            }
        }
        duplicates
    }

    pub(crate) fn push(&mut self, record: BenchmarkRecord) -> usize {
        self.rows.push(record);
        self.rows.len() - 1
    }

    pub(crate) fn row_mut(&mut self, index: usize) -> Option<&mut BenchmarkRecord> {
        self.rows.get_mut(index)
    }
}

impl<'a> IntoIterator for &'a BenchmarkTable {
    type Item = &'a BenchmarkRecord;
    type IntoIter = std::slice::Iter<'a, BenchmarkRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_uses_normalized_identity() {
        let table = BenchmarkTable::from_rows(vec![
            BenchmarkRecord::new("A (2019)", "ResNet-50"),
            BenchmarkRecord::new("CheXNet (2017)", "DenseNet-121"),
        ]);
        let key = IdentityKey::new(" chexnet (2017) ", "DENSENET-121");
        assert_eq!(table.position(&key), Some(1));
        assert_eq!(table.position(&IdentityKey::new("x", "y")), None);
    }

    #[test]
    fn test_duplicate_identities() {
        let table = BenchmarkTable::from_rows(vec![
            BenchmarkRecord::new("A", "M"),
            BenchmarkRecord::new("a ", "m"),
            BenchmarkRecord::new("A", "m"),
            BenchmarkRecord::new("B", "M"),
        ]);
        assert_eq!(table.duplicate_identities(), vec![IdentityKey::new("a", "m")]);
    }
}
