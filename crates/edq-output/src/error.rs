//! Error types for writing cleaned extracts and run reports.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while persisting results.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Both the requested destination and the timestamped fallback failed.
    #[error("failed to write {primary} and fallback {fallback}: {source}")]
    FallbackFailed {
        primary: PathBuf,
        fallback: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Writing the JSON run report failed.
    #[error("failed to write report {path}: {source}")]
    Report {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode run report: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result type alias for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_message_names_both_paths() {
        let err = OutputError::FallbackFailed {
            primary: PathBuf::from("out/CN_CLEAN_DATA.csv"),
            fallback: PathBuf::from("out/CN_CLEAN_DATA_20240101_120000.csv"),
            source: csv::Error::from(std::io::Error::other("read-only")),
        };
        let message = err.to_string();
        assert!(message.contains("out/CN_CLEAN_DATA.csv"));
        assert!(message.contains("CN_CLEAN_DATA_20240101_120000.csv"));
    }
}
