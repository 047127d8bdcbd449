//! Field-level merge of incoming records into the table.
//!
//! Incoming records are applied strictly in order. A record whose identity
//! already exists overwrites only the fields it carries; a new identity is
//! appended. Records without identity are rejected one by one and leave the
//! table untouched.

use super::BenchmarkTable;
use crate::error::BenchError;
use crate::record::{normalize_identity, Field, IdentityKey, SourcedRecord};
use std::collections::HashMap;

/// What happened to one incoming record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Appended as a new row at this index
    Inserted(usize),
    /// Merged into an existing row; `changed` counts modified values
    Updated { row: usize, changed: usize },
}

/// Summary of a merge run.
#[derive(Debug, Default)]
pub struct MergeReport {
    pub inserted: usize,
    pub updated: usize,
    /// Matched an existing row but changed nothing
    pub unchanged: usize,
    pub rejected: Vec<BenchError>,
}

impl MergeReport {
    pub fn accepted(&self) -> usize {
        self.inserted + self.updated + self.unchanged
    }
}

/// Applies records to a table while keeping identity lookups current.
pub struct Merger<'t> {
    table: &'t mut BenchmarkTable,
    by_identity: HashMap<IdentityKey, usize>,
    by_paper: HashMap<String, Vec<usize>>,
}

impl<'t> Merger<'t> {
    pub fn new(table: &'t mut BenchmarkTable) -> Self {
        let mut merger = Self {
            table,
            by_identity: HashMap::new(),
            by_paper: HashMap::new(),
        };
        let keys: Vec<_> = merger
            .table
            .iter()
            .enumerate()
            .filter_map(|(row, record)| record.identity_key().ok().map(|key| (row, key)))
            .collect();
        for (row, key) in keys {
            // First occurrence wins if the loaded table already had duplicates.
            if !merger.by_identity.contains_key(&key) {
                merger.index(row, key);
            }
        }
        merger
    }

    fn index(&mut self, row: usize, key: IdentityKey) {
        self.by_paper.entry(key.paper.clone()).or_default().push(row);
        self.by_identity.insert(key, row);
    }

    /// Find the target row for an incoming record.
    ///
    /// `Ok(None)` means a new identity. A record with a paper but no backbone
    /// resolves only when exactly one row carries that paper.
    fn locate(&self, incoming: &SourcedRecord) -> Result<Option<usize>, BenchError> {
        let origin = incoming.origin.to_string();
        match incoming.record.identity_key() {
            Ok(key) => Ok(self.by_identity.get(&key).copied()),
            Err(Field::ModelBackbone) => {
                let paper = incoming
                    .record
                    .paper_and_year
                    .as_deref()
                    .map(normalize_identity)
                    .unwrap_or_default();
                match self.by_paper.get(&paper).map(Vec::as_slice) {
                    Some([row]) => Ok(Some(*row)),
                    Some(rows) if rows.len() > 1 => Err(BenchError::MissingIdentity {
                        origin,
                        missing: format!(
                            "model_backbone is empty and {} rows share this paper",
                            rows.len()
                        ),
                    }),
                    _ => Err(BenchError::MissingIdentity {
                        origin,
                        missing: "model_backbone is empty and no existing row has this paper"
                            .to_string(),
                    }),
                }
            }
            Err(field) => Err(BenchError::MissingIdentity {
                origin,
                missing: format!("{field} is empty"),
            }),
        }
    }

    /// Apply one record.
    pub fn apply(&mut self, incoming: &SourcedRecord) -> Result<MergeOutcome, BenchError> {
        match self.locate(incoming)? {
            Some(row) => {
                let target = self.table.row_mut(row).ok_or_else(|| BenchError::Internal {
                    message: format!("identity index points past the table (row {row})"),
                })?;
                let changed = target.merge_from(&incoming.record);
                Ok(MergeOutcome::Updated { row, changed })
            }
            None => {
                let key = incoming
                    .record
                    .identity_key()
                    .map_err(|field| BenchError::Internal {
                        message: format!("new row without {field}"),
                    })?;
                let mut record = incoming.record.clone();
                record.settle_annotations();
                let row = self.table.push(record);
                self.index(row, key);
                Ok(MergeOutcome::Inserted(row))
            }
        }
    }
}

/// Merge records into `table` in order, collecting per-record rejections.
pub fn merge_records<'a>(
    table: &mut BenchmarkTable,
    incoming: impl IntoIterator<Item = &'a SourcedRecord>,
) -> MergeReport {
    let mut merger = Merger::new(table);
    let mut report = MergeReport::default();
    for record in incoming {
        match merger.apply(record) {
            Ok(MergeOutcome::Inserted(_)) => report.inserted += 1,
            Ok(MergeOutcome::Updated { changed: 0, .. }) => report.unchanged += 1,
            Ok(MergeOutcome::Updated { .. }) => report.updated += 1,
            Err(e) => report.rejected.push(e),
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{BenchmarkRecord, Location, RecordOrigin};

    fn sourced(index: usize, record: BenchmarkRecord) -> SourcedRecord {
        SourcedRecord::new(RecordOrigin::new("in.json", Location::Index(index)), record)
    }

    fn chexnet_table() -> BenchmarkTable {
        BenchmarkTable::from_rows(vec![
            BenchmarkRecord::new("CheXNet (2017)", "DenseNet-121").with_auc(0.841)
        ])
    }

    #[test]
    fn test_partial_record_merges_into_unique_paper() {
        let mut table = chexnet_table();
        let mut incoming = BenchmarkRecord::default().with_f1(0.55);
        incoming.paper_and_year = Some("CheXNet (2017)".into());

        let report = merge_records(&mut table, &[sourced(0, incoming)]);

        assert_eq!(report.updated, 1);
        assert_eq!(table.len(), 1);
        let row = &table.rows()[0];
        assert_eq!(row.reported_auc, Some(0.841));
        assert_eq!(row.reported_f1, Some(0.55));
        assert_eq!(row.model_backbone.as_deref(), Some("DenseNet-121"));
    }

    #[test]
    fn test_partial_record_with_ambiguous_paper_is_rejected() {
        let mut table = chexnet_table();
        merge_records(
            &mut table,
            &[sourced(0, BenchmarkRecord::new("CheXNet (2017)", "ResNet-50"))],
        );
        let mut incoming = BenchmarkRecord::default().with_f1(0.5);
        incoming.paper_and_year = Some("chexnet (2017)".into());

        let report = merge_records(&mut table, &[sourced(1, incoming)]);

        assert_eq!(report.rejected.len(), 1);
        assert!(report.rejected[0].to_string().contains("2 rows"));
        assert!(table.iter().all(|r| r.reported_f1.is_none()));
    }

    #[test]
    fn test_missing_paper_is_rejected_and_reported() {
        let mut table = chexnet_table();
        let before = table.clone();
        let incoming = BenchmarkRecord::default()
            .with(Field::ModelBackbone, "DenseNet-121")
            .with_auc(0.9);

        let report = merge_records(&mut table, &[sourced(4, incoming)]);

        assert_eq!(report.accepted(), 0);
        assert_eq!(report.rejected[0].code(), "E020");
        assert!(report.rejected[0].to_string().contains("in.json[4]"));
        assert_eq!(table, before);
    }

    #[test]
    fn test_new_identity_is_appended() {
        let mut table = chexnet_table();
        let report = merge_records(
            &mut table,
            &[sourced(0, BenchmarkRecord::new("Wang et al. (2017)", "ResNet-50"))],
        );
        assert_eq!(report.inserted, 1);
        assert_eq!(
            table.rows()[1].paper_and_year.as_deref(),
            Some("Wang et al. (2017)")
        );
    }

    #[test]
    fn test_update_keeps_row_position() {
        let mut table = BenchmarkTable::from_rows(vec![
            BenchmarkRecord::new("A", "M1"),
            BenchmarkRecord::new("B", "M2"),
            BenchmarkRecord::new("C", "M3"),
        ]);
        let report = merge_records(
            &mut table,
            &[sourced(0, BenchmarkRecord::new(" b", "m2 ").with_auc(0.7))],
        );
        assert_eq!(report.updated, 1);
        assert_eq!(table.len(), 3);
        assert_eq!(table.rows()[1].reported_auc, Some(0.7));
    }

    #[test]
    fn test_same_identity_applies_in_order() {
        let mut table = BenchmarkTable::new();
        let first = BenchmarkRecord::new("X (2021)", "EfficientNet-B4")
            .with_auc(0.80)
            .with(Field::Optimizer, "SGD");
        let second = BenchmarkRecord::new("x (2021)", "efficientnet-b4")
            .with_auc(0.82)
            .with_f1(0.4);

        let report = merge_records(&mut table, &[sourced(0, first), sourced(1, second)]);

        assert_eq!((report.inserted, report.updated), (1, 1));
        assert_eq!(table.len(), 1);
        let row = &table.rows()[0];
        assert_eq!(row.reported_auc, Some(0.82));
        assert_eq!(row.reported_f1, Some(0.4));
        assert_eq!(row.optimizer.as_deref(), Some("SGD"));
    }

    #[test]
    fn test_annotated_update_keeps_hand_written_notes() {
        let mut table = BenchmarkTable::from_rows(vec![BenchmarkRecord::new("CheXNet (2017)", "DenseNet-121")
            .with_auc(0.841)
            .with(Field::Notes, "baseline from the paper")]);
        let mut incoming = BenchmarkRecord::new("CheXNet (2017)", "DenseNet-121").with_f1(0.55);
        incoming.annotations.push("Reported F1: 0.55 (macro)".into());
        let incoming = sourced(0, incoming);

        let report = merge_records(&mut table, [&incoming]);
        assert_eq!(report.updated, 1);
        assert_eq!(
            table.rows()[0].notes.as_deref(),
            Some("baseline from the paper; Reported F1: 0.55 (macro)")
        );

        let again = merge_records(&mut table, [&incoming]);
        assert_eq!(again.unchanged, 1);
    }

    #[test]
    fn test_inserted_row_carries_annotations_in_notes() {
        let mut table = BenchmarkTable::new();
        let mut incoming = BenchmarkRecord::new("A (2020)", "M");
        incoming.annotations.push("Epochs: many".into());

        merge_records(&mut table, &[sourced(0, incoming)]);
        let row = &table.rows()[0];
        assert_eq!(row.notes.as_deref(), Some("Epochs: many"));
        assert!(row.annotations.is_empty());
    }

    #[test]
    fn test_identical_record_counts_as_unchanged() {
        let mut table = chexnet_table();
        let same = table.rows()[0].clone();
        let report = merge_records(&mut table, &[sourced(0, same)]);
        assert_eq!(report.unchanged, 1);
        assert_eq!(report.accepted(), 1);
    }

    #[test]
    fn test_rejection_does_not_stop_later_records() {
        let mut table = BenchmarkTable::new();
        let report = merge_records(
            &mut table,
            &[
                sourced(0, BenchmarkRecord::default().with_auc(0.9)),
                sourced(1, BenchmarkRecord::new("A", "M")),
            ],
        );
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.inserted, 1);
    }
}
