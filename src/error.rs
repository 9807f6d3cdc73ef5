//! Error types for semdist.

use thiserror::Error;

/// Result type for semdist operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for semdist operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Unknown or unsupported embedding family requested.
    #[error("Unsupported embedding model: {0}")]
    UnsupportedModel(String),

    /// Malformed embedding file content. Loading aborts on the first bad
    /// line: a silently skipped line corrupts vocabulary coverage.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Random baseline asked for more distinct corpus sentences than exist.
    #[error("Insufficient corpus: requested {requested} distinct sentences, corpus has {available}")]
    InsufficientCorpus {
        /// Number of distinct sentences requested.
        requested: usize,
        /// Number of distinct sentences available.
        available: usize,
    },

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON corpus error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an unsupported model error.
    pub fn unsupported_model(msg: impl Into<String>) -> Self {
        Error::UnsupportedModel(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Create an insufficient corpus error.
    pub fn insufficient_corpus(requested: usize, available: usize) -> Self {
        Error::InsufficientCorpus {
            requested,
            available,
        }
    }
}
