//! CSV output formatter
//!
//! Nested records are flattened with dot-joined keys; the header row is the
//! sorted union of every key seen across the batch, so heterogeneous records
//! (one word matched, another degraded) still line up.

use super::{is_disagreement, OutputFormatter, POS_SOURCES};
use anyhow::Result;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

/// CSV formatter - one flattened row per record
pub struct CsvFormatter<W: Write> {
    writer: W,
    rows: Vec<BTreeMap<String, String>>,
    headers: bool,
}

impl<W: Write> CsvFormatter<W> {
    /// Create a new CSV formatter
    pub fn new(writer: W, headers: bool) -> Self {
        Self {
            writer,
            rows: Vec::new(),
            headers,
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for CsvFormatter<W> {
    fn format_record(&mut self, record: &Value) -> Result<()> {
        let mut row = BTreeMap::new();
        flatten(record, "", &mut row);
        self.rows.push(row);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.rows.is_empty() {
            self.writer.flush()?;
            return Ok(());
        }

        let fieldnames: BTreeSet<&String> = self.rows.iter().flat_map(|row| row.keys()).collect();
        let fieldnames: Vec<&String> = fieldnames.into_iter().collect();

        if self.headers {
            let header = fieldnames
                .iter()
                .map(|name| escape(name))
                .collect::<Vec<_>>()
                .join(",");
            writeln!(self.writer, "{header}")?;
        }

        for row in &self.rows {
            let line = fieldnames
                .iter()
                .map(|name| escape(row.get(*name).map(String::as_str).unwrap_or("")))
                .collect::<Vec<_>>()
                .join(",");
            writeln!(self.writer, "{line}")?;
        }

        self.writer.flush()?;
        Ok(())
    }
}

/// Flatten one record into dot-joined scalar columns
fn flatten(value: &Value, prefix: &str, out: &mut BTreeMap<String, String>) {
    let map = match value.as_object() {
        Some(map) => map,
        None => {
            out.insert(prefix.to_string(), scalar(value));
            return;
        }
    };

    for (key, child) in map {
        let column = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };

        match child {
            Value::Object(_) if is_disagreement(child) => {
                out.insert(column, disagreement_cell(child));
            }
            Value::Object(_) => flatten(child, &column, out),
            Value::Array(items) => {
                if items.first().map(Value::is_object).unwrap_or(false) {
                    // Complex nested structures collapse to a count.
                    out.insert(column, format!("[{} items]", items.len()));
                } else {
                    let joined = items.iter().map(|item| scalar(item)).collect::<Vec<_>>();
                    out.insert(column, joined.join(", "));
                }
            }
            scalar_value => {
                out.insert(column, scalar(scalar_value));
            }
        }
    }
}

/// Render a POS disagreement map as `source:tag; source:tag`
fn disagreement_cell(pos: &Value) -> String {
    POS_SOURCES
        .iter()
        .filter_map(|source| pos.get(source).map(|value| format!("{source}:{}", scalar(value))))
        .collect::<Vec<_>>()
        .join("; ")
}

fn scalar(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// RFC 4180 quoting: only when the field needs it
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(records: &[Value]) -> String {
        let mut buffer = Vec::new();
        let mut formatter = CsvFormatter::new(&mut buffer, true);
        for record in records {
            formatter.format_record(record).unwrap();
        }
        formatter.finish().unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn flattens_nested_objects_with_dotted_columns() {
        let output = render(&[json!({
            "word": "happiness",
            "suffix_meta": {"meaning": "state or quality of", "examples": ["darkness"]}
        })]);

        let header = output.lines().next().unwrap();
        assert_eq!(header, "suffix_meta.examples,suffix_meta.meaning,word");
        assert!(output.lines().nth(1).unwrap().contains("happiness"));
    }

    #[test]
    fn scalar_lists_join_and_object_lists_collapse() {
        let output = render(&[json!({
            "source_pos": ["adjective", "noun"],
            "synsets": [{"name": "a"}, {"name": "b"}]
        })]);

        assert!(output.contains("\"adjective, noun\""));
        assert!(output.contains("[2 items]"));
    }

    #[test]
    fn disagreement_maps_render_inline() {
        let output = render(&[json!({
            "word": "running",
            "pos": {"suffix": "noun", "tagger": "verb", "consensus": false}
        })]);

        assert!(output.contains("suffix:noun; tagger:verb"));
    }

    #[test]
    fn header_is_the_union_of_all_rows() {
        let output = render(&[
            json!({"word": "cat", "message": "no suffix identified"}),
            json!({"word": "happiness", "suffix": "-ness"}),
        ]);

        let header = output.lines().next().unwrap();
        assert_eq!(header, "message,suffix,word");

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        // Missing cells are left empty.
        assert_eq!(lines[1], "no suffix identified,,cat");
        assert_eq!(lines[2], ",-ness,happiness");
    }

    #[test]
    fn fields_with_delimiters_are_quoted() {
        let output = render(&[json!({"meaning": "state, or quality"})]);
        assert!(output.contains("\"state, or quality\""));

        let output = render(&[json!({"meaning": "say \"hi\""})]);
        assert!(output.contains("\"say \"\"hi\"\"\""));
    }

    #[test]
    fn empty_batch_produces_no_output() {
        let output = render(&[]);
        assert!(output.is_empty());
    }
}
