//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use serde_json::Value;
use std::io::Write;

/// JSON formatter - emits one object, or an array in batch mode
pub struct JsonFormatter<W: Write> {
    writer: W,
    records: Vec<Value>,
    pretty: bool,
    batch: bool,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    ///
    /// `batch` controls whether `finish` emits an array even for a single
    /// record; `pretty` selects indented output.
    pub fn new(writer: W, pretty: bool, batch: bool) -> Self {
        Self {
            writer,
            records: Vec::new(),
            pretty,
            batch,
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_record(&mut self, record: &Value) -> Result<()> {
        self.records.push(record.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let document = if self.batch {
            Value::Array(std::mem::take(&mut self.records))
        } else {
            self.records.drain(..).next().unwrap_or(Value::Null)
        };

        let rendered = if self.pretty {
            serde_json::to_string_pretty(&document)?
        } else {
            serde_json::to_string(&document)?
        };
        writeln!(self.writer, "{rendered}")?;
        self.writer.flush()?;
        Ok(())
    }
}
