//! Output formatting module

use anyhow::Result;
use serde_json::Value;

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Buffer or write a single analysis record
    fn format_record(&mut self, record: &Value) -> Result<()>;

    /// Finalize output (e.g. emit the JSON document or the CSV table)
    fn finish(&mut self) -> Result<()>;
}

/// Names of the POS sources in their canonical display order
pub(crate) const POS_SOURCES: [&str; 3] = ["suffix", "tagger", "wordnet"];

/// True when a JSON object is a POS disagreement record
pub(crate) fn is_disagreement(value: &Value) -> bool {
    value
        .as_object()
        .and_then(|map| map.get("consensus"))
        .and_then(Value::as_bool)
        == Some(false)
}

pub mod csv;
pub mod json;
pub mod text;

pub use csv::CsvFormatter;
pub use json::JsonFormatter;
pub use text::TextFormatter;
