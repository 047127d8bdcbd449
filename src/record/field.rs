//! Canonical benchmark attributes

use std::fmt;

/// How a field's raw text is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, stored verbatim after trimming
    Text,
    /// Whole number (epochs)
    Integer,
    /// Decimal score (AUC, F1)
    Decimal,
}

/// One of the ten canonical columns of the benchmark table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    PaperAndYear,
    ModelBackbone,
    InputResolution,
    LossFunction,
    Optimizer,
    Epochs,
    ReportedAuc,
    ReportedF1,
    Interpretability,
    Notes,
}

impl Field {
    /// All fields in column order.
    pub const ALL: [Field; 10] = [
        Field::PaperAndYear,
        Field::ModelBackbone,
        Field::InputResolution,
        Field::LossFunction,
        Field::Optimizer,
        Field::Epochs,
        Field::ReportedAuc,
        Field::ReportedF1,
        Field::Interpretability,
        Field::Notes,
    ];

    /// Column name used in the persisted CSV header.
    pub fn column(self) -> &'static str {
        match self {
            Field::PaperAndYear => "paper_and_year",
            Field::ModelBackbone => "model_backbone",
            Field::InputResolution => "input_resolution",
            Field::LossFunction => "loss_function",
            Field::Optimizer => "optimizer",
            Field::Epochs => "epochs",
            Field::ReportedAuc => "reported_auc",
            Field::ReportedF1 => "reported_f1",
            Field::Interpretability => "interpretability",
            Field::Notes => "notes",
        }
    }

    /// Header used in the Markdown and workbook reports.
    pub fn display_name(self) -> &'static str {
        match self {
            Field::PaperAndYear => "Paper & Year",
            Field::ModelBackbone => "Model Backbone",
            Field::InputResolution => "Input Resolution",
            Field::LossFunction => "Loss Function",
            Field::Optimizer => "Optimizer",
            Field::Epochs => "Epochs",
            Field::ReportedAuc => "Reported AUC",
            Field::ReportedF1 => "Reported F1",
            Field::Interpretability => "Interpretability",
            Field::Notes => "Notes",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::Epochs => FieldKind::Integer,
            Field::ReportedAuc | Field::ReportedF1 => FieldKind::Decimal,
            _ => FieldKind::Text,
        }
    }

    /// Look up a field by its exact canonical column name.
    pub fn from_column(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.column() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_column(field.column()), Some(field));
        }
        assert_eq!(Field::from_column("Paper & Year"), None);
    }

    #[test]
    fn test_numeric_kinds() {
        assert_eq!(Field::Epochs.kind(), FieldKind::Integer);
        assert_eq!(Field::ReportedAuc.kind(), FieldKind::Decimal);
        assert_eq!(Field::ReportedF1.kind(), FieldKind::Decimal);
        assert_eq!(Field::Notes.kind(), FieldKind::Text);
    }
}
