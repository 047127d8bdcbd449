//! Reader for JSON summaries: one object, or an array of objects.

use super::RecordBuilder;
use crate::error::{BenchError, Result};
use crate::record::{AliasTable, Location, RecordOrigin, SourcedRecord};
use serde_json::{Map, Value};
use std::path::Path;

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Textual form of a JSON value; `None` for null.
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn object_to_record(object: &Map<String, Value>, aliases: &AliasTable) -> crate::record::BenchmarkRecord {
    let mut builder = RecordBuilder::new(aliases);
    for (key, value) in object {
        if let Some(text) = value_text(value) {
            builder.push(key, &text);
        }
    }
    builder.finish()
}

/// Parse a JSON document into records.
///
/// The whole file is rejected if any array element is not an object, so a
/// half-valid file never contributes a partial set of rows.
pub fn parse_json(text: &str, path: &Path, aliases: &AliasTable) -> Result<Vec<SourcedRecord>> {
    let document: Value = serde_json::from_str(text)
        .map_err(|e| BenchError::malformed(path, format!("invalid JSON: {e}")))?;

    let objects: Vec<&Map<String, Value>> = match &document {
        Value::Object(object) => vec![object],
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                item.as_object().ok_or_else(|| {
                    BenchError::malformed(
                        path,
                        format!("element {index} is a {}, expected an object", kind_of(item)),
                    )
                })
            })
            .collect::<Result<_>>()?,
        other => {
            return Err(BenchError::malformed(
                path,
                format!(
                    "expected an object or an array of objects, found a {}",
                    kind_of(other)
                ),
            ))
        }
    };

    Ok(objects
        .into_iter()
        .enumerate()
        .map(|(index, object)| {
            SourcedRecord::new(
                RecordOrigin::new(path, Location::Index(index)),
                object_to_record(object, aliases),
            )
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Vec<SourcedRecord>> {
        parse_json(text, Path::new("summaries.json"), &AliasTable::builtin())
    }

    #[test]
    fn test_single_object() {
        let records = parse(
            r#"{"paper_year": "CheXNet (2017)", "model": "DenseNet-121", "reported_auc": 0.841, "epochs": "30"}"#,
        )
        .unwrap();
        assert_eq!(records.len(), 1);
        let r = &records[0].record;
        assert_eq!(r.paper_and_year.as_deref(), Some("CheXNet (2017)"));
        assert_eq!(r.model_backbone.as_deref(), Some("DenseNet-121"));
        assert_eq!(r.reported_auc, Some(0.841));
        assert_eq!(r.epochs, Some(30));
        assert_eq!(records[0].origin.to_string(), "summaries.json[0]");
    }

    #[test]
    fn test_array_of_objects_with_synonyms() {
        let records = parse(
            r#"[
                {"Paper & Year": "A (2019)", "Backbone": "ResNet-50", "AUC": "Avg AUC 0.80"},
                {"paper": "B", "year": 2020, "architecture": "ViT-B/16", "F1": null}
            ]"#,
        )
        .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].record.reported_auc, Some(0.80));
        assert_eq!(records[0].record.annotations, vec!["Reported AUC: Avg AUC 0.80"]);
        assert_eq!(records[1].record.paper_and_year.as_deref(), Some("B (2020)"));
        assert_eq!(records[1].record.reported_f1, None);
        assert_eq!(records[1].origin.location, Location::Index(1));
    }

    #[test]
    fn test_unknown_keys_go_to_extra() {
        let records = parse(r#"{"paper": "A (2019)", "model": "M", "batch_size": 16, "tags": ["a", "b"]}"#)
            .unwrap();
        let extra = &records[0].record.extra;
        assert_eq!(extra.get("batch size").map(String::as_str), Some("16"));
        assert_eq!(extra.get("tags").map(String::as_str), Some(r#"["a","b"]"#));
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let err = parse("{not json").unwrap_err();
        assert_eq!(err.code(), "E010");
        assert!(err.to_string().contains("summaries.json"));
    }

    #[test]
    fn test_scalar_document_is_malformed() {
        let err = parse("42").unwrap_err();
        assert!(err.to_string().contains("found a number"));
    }

    #[test]
    fn test_array_with_non_object_is_malformed() {
        let err = parse(r#"[{"paper": "A"}, "oops"]"#).unwrap_err();
        assert!(err.to_string().contains("element 1 is a string"));
    }

    #[test]
    fn test_empty_array_yields_no_records() {
        assert!(parse("[]").unwrap().is_empty());
    }
}
