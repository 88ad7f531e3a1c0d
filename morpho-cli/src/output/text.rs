//! Plain text output formatter

use super::{is_disagreement, OutputFormatter, POS_SOURCES};
use anyhow::Result;
use serde_json::Value;
use std::io::Write;

/// Plain text formatter - one labeled line per populated field
pub struct TextFormatter<W: Write> {
    writer: W,
    records_written: usize,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            records_written: 0,
        }
    }

    fn write_line(&mut self, label: &str, value: &str) -> Result<()> {
        writeln!(self.writer, "{label}: {value}")?;
        Ok(())
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_record(&mut self, record: &Value) -> Result<()> {
        if self.records_written > 0 {
            writeln!(self.writer, "{}", "-".repeat(40))?;
        }
        self.records_written += 1;

        if let Some(word) = non_empty_str(record, "word") {
            self.write_line("Word", &word)?;
        }
        if let Some(lemma) = non_empty_str(record, "lemma") {
            self.write_line("Lemma", &lemma)?;
        }
        if let Some(pos) = record.get("pos").filter(|pos| !pos.is_null()) {
            let rendered = format_pos(pos);
            self.write_line("POS", &rendered)?;
        }
        if let Some(stem) = non_empty_str(record, "stem") {
            self.write_line("Stem", &stem)?;
        }
        if let Some(suffix) = non_empty_str(record, "suffix") {
            self.write_line("Suffix", &suffix)?;
        }
        if let Some(source_pos) = record.get("source_pos").and_then(Value::as_array) {
            if !source_pos.is_empty() {
                let joined = source_pos
                    .iter()
                    .map(scalar_to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                self.write_line("Base POS", &joined)?;
            }
        }
        if let Some(confidence) = record.get("confidence").and_then(Value::as_f64) {
            self.write_line("Confidence", &format!("{confidence:.2}"))?;
        }
        if let Some(tag) = non_empty_str(record, "tag") {
            self.write_line("Tag", &tag)?;
        }
        if let Some(morph) = record.get("morph").and_then(Value::as_object) {
            if !morph.is_empty() {
                let features = morph
                    .iter()
                    .map(|(key, value)| format!("{key}={}", scalar_to_string(value)))
                    .collect::<Vec<_>>()
                    .join(", ");
                self.write_line("Morphological Features", &features)?;
            }
        }
        if let Some(message) = non_empty_str(record, "message") {
            self.write_line("Note", &message)?;
        }

        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

fn non_empty_str(record: &Value, key: &str) -> Option<String> {
    record
        .get(key)
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Render a POS value, spelling out disagreement records
fn format_pos(pos: &Value) -> String {
    if is_disagreement(pos) {
        let parts: Vec<String> = POS_SOURCES
            .iter()
            .filter_map(|source| {
                pos.get(source)
                    .map(|value| format!("{source}:{}", scalar_to_string(value)))
            })
            .collect();
        return format!("[{}] (no consensus)", parts.join(", "));
    }

    match pos {
        Value::Object(map) => POS_SOURCES
            .iter()
            .find_map(|source| map.get(*source))
            .map(scalar_to_string)
            .unwrap_or_else(|| pos.to_string()),
        other => scalar_to_string(other),
    }
}
