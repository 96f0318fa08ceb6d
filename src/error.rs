//! Error types for the qurro-tables library.

use thiserror::Error;

/// Main error type for the library.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// A table violates a structural invariant.
    #[error("{0}")]
    Validation(String),

    /// A value does not have the shape of a composite numeric identifier.
    #[error("Format error: {0}")]
    Format(String),

    #[error("Missing column '{0}' in table")]
    MissingColumn(String),

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Expected {expected} fields on line {line}, found {found}")]
    RaggedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TableError {
    /// True for the structural-invariant family of errors.
    pub fn is_validation(&self) -> bool {
        matches!(self, TableError::Validation(_))
    }

    /// True for malformed composite identifiers.
    pub fn is_format(&self) -> bool {
        matches!(self, TableError::Format(_))
    }
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, TableError>;
