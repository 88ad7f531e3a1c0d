//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Output file could not be created or written
    OutputError(String),
    /// Field filter named no usable fields
    InvalidFields(String),
    /// Analysis error from core
    AnalysisError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::OutputError(msg) => write!(f, "Output error: {msg}"),
            CliError::InvalidFields(fields) => write!(f, "Invalid field filter: {fields}"),
            CliError::AnalysisError(msg) => write!(f, "Analysis error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;
