//! Error types for noor-rs

use thiserror::Error;

/// Result type alias for noor operations
pub type Result<T> = std::result::Result<T, NoorError>;

/// Noor error types
#[derive(Error, Debug)]
pub enum NoorError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A corpus document could not be loaded or parsed
    #[error("Failed to load corpus {source_name}: {reason}")]
    CorpusLoad { source_name: String, reason: String },

    /// Caller supplied an invalid value
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),
}

impl NoorError {
    pub(crate) fn corpus(source_name: impl Into<String>, reason: impl ToString) -> Self {
        NoorError::CorpusLoad {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }
}
