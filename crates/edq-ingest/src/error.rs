//! Error types for ED visit ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a record set.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Parsing Errors ===
    /// Malformed CSV content.
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// CSV file is empty or has no header row.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    // === Schema Errors ===
    /// Required columns are absent from the header. Fatal; no stage runs.
    #[error("required columns missing from {path}: {}", .columns.join(", "))]
    MissingColumns { path: PathBuf, columns: Vec<String> },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/path/to/file.csv"),
        };
        assert_eq!(err.to_string(), "CSV file not found: /path/to/file.csv");
    }

    #[test]
    fn test_missing_columns_lists_every_column() {
        let err = IngestError::MissingColumns {
            path: PathBuf::from("raw.csv"),
            columns: vec!["Age".to_string(), "Gender".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "required columns missing from raw.csv: Age, Gender"
        );
    }
}
