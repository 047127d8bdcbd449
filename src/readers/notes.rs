//! Reader for hand-written `Key: Value` notes.
//!
//! ```text
//! Paper & Year: CheXNet (2017)
//! Model Backbone: DenseNet-121
//! AUC: 0.841 (avg)
//!
//! Paper & Year: ...
//! ```
//!
//! Block boundaries are a heuristic: a blank line ends a block, and so does a
//! key that was already given in the current block (two entries pasted back to
//! back without a gap). Lines without a colon and `#` comments are ignored.
//! Nothing is attempted for adversarial input.

use super::RecordBuilder;
use crate::error::{BenchError, Result};
use crate::record::{AliasTable, Location, RecordOrigin, SourcedRecord};
use std::path::Path;

/// Split a line into key and value at the first colon.
fn split_pair(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim();
    (!key.is_empty()).then_some((key, value.trim()))
}

/// Parse notes text into records, tagging each with the line its block starts on.
pub fn parse_notes(text: &str, path: &Path, aliases: &AliasTable) -> Result<Vec<SourcedRecord>> {
    let mut records = Vec::new();
    let mut current: Option<(usize, RecordBuilder<'_>)> = None;
    let mut pairs = 0usize;

    let mut flush = |current: &mut Option<(usize, RecordBuilder<'_>)>| {
        if let Some((line, builder)) = current.take() {
            if !builder.is_empty() {
                records.push(SourcedRecord::new(
                    RecordOrigin::new(path, Location::Line(line)),
                    builder.finish(),
                ));
            }
        }
    };

    for (index, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            flush(&mut current);
            continue;
        }
        if trimmed.starts_with('#') {
            continue;
        }
        let Some((key, value)) = split_pair(trimmed) else {
            continue;
        };
        pairs += 1;

        if current
            .as_ref()
            .is_some_and(|(_, builder)| builder.has_seen(key))
        {
            flush(&mut current);
        }
        let (_, builder) = current.get_or_insert_with(|| (index + 1, RecordBuilder::new(aliases)));
        builder.push(key, value);
    }
    flush(&mut current);

    if pairs == 0 {
        return Err(BenchError::malformed(
            path,
            "no 'Key: Value' lines found",
        ));
    }
    Ok(records)
}
