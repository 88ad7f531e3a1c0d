//! Core error types
//!
//! Degradable conditions (missing dictionary file, collaborator failure) are
//! encoded in result shapes rather than errors; these variants cover the
//! conditions that genuinely cannot be represented as a degraded result.

use thiserror::Error;

/// Errors raised by the analysis core
#[derive(Error, Debug)]
pub enum CoreError {
    /// Dictionary file exists but cannot be parsed
    #[error("malformed suffix dictionary {path}: {source}")]
    DictionaryFormat {
        /// Path of the offending file
        path: String,
        /// Underlying parser error
        #[source]
        source: serde_json::Error,
    },

    /// Dictionary file could not be read (anything other than absence)
    #[error("I/O error reading {path}: {source}")]
    Io {
        /// Path that failed to read
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The aggregator received a segmentation violating its contract
    #[error("malformed segmentation input: {0}")]
    MalformedSegmentation(String),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
