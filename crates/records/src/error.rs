//! Error types for the ats-records crate.
//!
//! Only dataset loading can fail. Everything downstream of a loaded
//! `RecordIndex` (access scoping, filtering, aggregation) is total.

use thiserror::Error;

/// Errors that can occur while loading and validating a dataset directory.
#[derive(Error, Debug)]
pub enum RecordLoadError {
    /// A required dataset file could not be found
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading a file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A file was read but its JSON did not match any accepted record shape
    #[error("Invalid JSON in {file}: {source}")]
    Json {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    /// Two records of the same kind share an identifier
    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: String, id: String },

    /// A field carried a value that cannot be normalised
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, RecordLoadError>;
