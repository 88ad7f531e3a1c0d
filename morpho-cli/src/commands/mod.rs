//! CLI command implementations

use crate::error::CliResult;
use crate::output::{CsvFormatter, JsonFormatter, OutputFormatter, TextFormatter};
use anyhow::Context;
use clap::Subcommand;
use serde_json::Value;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

pub mod analyze;
pub mod suffix;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Identify the suffix of a single word
    Suffix(suffix::SuffixArgs),

    /// Full morphological analysis (suffix + tagger + sense lookup)
    Analyze(analyze::AnalyzeArgs),
}

impl Commands {
    /// Dispatch to the selected command
    pub fn execute(&self) -> CliResult<()> {
        match self {
            Commands::Suffix(args) => args.execute(),
            Commands::Analyze(args) => args.execute(),
        }
    }
}

/// Supported output formats
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON object, or array in batch mode
    Json,
    /// Human-readable labeled lines
    Text,
    /// Flattened CSV with a header row
    Csv,
}

/// Output options shared by every command
#[derive(Debug, clap::Args)]
pub struct OutputOptions {
    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Pretty-print JSON output (the default)
    #[arg(long)]
    pub pretty: bool,

    /// Compact JSON output (no whitespace)
    #[arg(long, conflicts_with = "pretty")]
    pub compact: bool,

    /// Comma-separated top-level fields to keep in the output
    #[arg(long, value_name = "FIELDS")]
    pub fields: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl OutputOptions {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        // try_init so repeated command construction in tests stays quiet.
        let _ = env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(log_level),
        )
        .try_init();
    }

    /// Render analysis records to the selected destination and format
    ///
    /// `batch` forces array-shaped JSON output even for a single record.
    pub fn render(&self, records: Vec<Value>, batch: bool) -> CliResult<()> {
        let records = match self.field_filter() {
            Some(fields) => records
                .into_iter()
                .map(|record| filter_fields(record, &fields))
                .collect(),
            None => records,
        };

        let writer: Box<dyn Write + Send + Sync> = match &self.output {
            Some(path) => Box::new(
                File::create(path)
                    .with_context(|| format!("cannot create output file {}", path.display()))?,
            ),
            None => Box::new(io::stdout()),
        };

        let mut formatter: Box<dyn OutputFormatter> = match self.format {
            OutputFormat::Json => Box::new(JsonFormatter::new(writer, !self.compact, batch)),
            OutputFormat::Text => Box::new(TextFormatter::new(writer)),
            OutputFormat::Csv => Box::new(CsvFormatter::new(writer, true)),
        };

        for record in &records {
            formatter.format_record(record)?;
        }
        formatter.finish()
    }

    fn field_filter(&self) -> Option<Vec<String>> {
        let fields = self.fields.as_ref()?;
        let parsed: Vec<String> = fields
            .split(',')
            .map(str::trim)
            .filter(|field| !field.is_empty())
            .map(str::to_string)
            .collect();
        (!parsed.is_empty()).then_some(parsed)
    }
}

/// Keep only the named top-level fields of a record
fn filter_fields(record: Value, fields: &[String]) -> Value {
    match record {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(key, _)| fields.iter().any(|field| field == key))
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn filter_fields_keeps_only_named_keys() {
        let record = json!({"word": "cat", "stem": "cat", "confidence": 0.0});
        let filtered = filter_fields(record, &["word".to_string(), "stem".to_string()]);

        let map = filtered.as_object().unwrap();
        assert_eq!(map.len(), 2);
        assert!(map.contains_key("word"));
        assert!(map.contains_key("stem"));
    }

    #[test]
    fn filter_fields_passes_non_objects_through() {
        let filtered = filter_fields(json!("scalar"), &["word".to_string()]);
        assert_eq!(filtered, json!("scalar"));
    }

    #[test]
    fn field_filter_trims_and_drops_empty_entries() {
        let options = OutputOptions {
            format: OutputFormat::Json,
            pretty: false,
            compact: false,
            fields: Some(" word , stem ,".to_string()),
            output: None,
            quiet: true,
            verbose: 0,
        };
        assert_eq!(
            options.field_filter(),
            Some(vec!["word".to_string(), "stem".to_string()])
        );

        let options = OutputOptions {
            fields: Some(",,".to_string()),
            ..options
        };
        assert_eq!(options.field_filter(), None);
    }
}
