//! Error types with actionable diagnostics.
//!
//! Every variant carries enough context (file path, record origin, field) for
//! the user to fix the input without re-running under a debugger.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for chestx-bench operations.
pub type Result<T> = std::result::Result<T, BenchError>;

/// Errors that can occur while reading, merging, persisting, or rendering.
#[derive(Error, Debug)]
pub enum BenchError {
    /// An input file could not be parsed in its expected format.
    #[error("Malformed input in {path}: {message}\n  → Fix the file; its records were skipped, other sources were still processed")]
    MalformedInput { path: PathBuf, message: String },

    /// A record lacks one of the identity fields.
    #[error("Missing identity in {origin}: {missing}\n  → Add 'Paper & Year' and 'Model Backbone' to the record")]
    MissingIdentity { origin: String, missing: String },

    /// The table could not be read or an output could not be written.
    #[error("Persistence error for {path}: {message}\n  → Check that the directory exists and is writable; no output was overwritten")]
    Persistence { path: PathBuf, message: String },

    /// Configuration file has invalid syntax or values.
    #[error("Invalid configuration in {path}:\n  {message}\n  → Check YAML syntax and field names")]
    ConfigParsing { path: PathBuf, message: String },

    /// Command-line usage problem.
    #[error("Invalid value for '{field}': {message}\n  → {suggestion}")]
    Usage {
        field: String,
        message: String,
        suggestion: String,
    },

    /// Generic error for unexpected conditions.
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl BenchError {
    /// Create a malformed-input error for `path`.
    pub fn malformed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::MalformedInput {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a persistence error for `path` from any displayable cause.
    pub fn persistence(path: impl Into<PathBuf>, cause: impl std::fmt::Display) -> Self {
        Self::Persistence {
            path: path.into(),
            message: cause.to_string(),
        }
    }

    /// Check if this error is caused by user input rather than a bug.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, Self::Internal { .. })
    }

    /// Get the error code for structured output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedInput { .. } => "E010",
            Self::MissingIdentity { .. } => "E020",
            Self::Persistence { .. } => "E030",
            Self::ConfigParsing { .. } => "E040",
            Self::Usage { .. } => "E041",
            Self::Internal { .. } => "E999",
        }
    }
}
