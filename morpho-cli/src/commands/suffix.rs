//! Suffix identification command

use super::OutputOptions;
use crate::error::CliResult;
use clap::Args;
use morpho_core::{DictionaryStore, SuffixSegmenter, DEFAULT_MIN_STEM_LENGTH};
use std::path::PathBuf;

/// Arguments for the suffix command
#[derive(Debug, Args)]
pub struct SuffixArgs {
    /// Word to analyze
    #[arg(short, long)]
    pub word: String,

    /// Path to the suffix dictionary
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "MORPHO_DICTIONARY",
        default_value = "data/suffixes.json"
    )]
    pub dictionary: PathBuf,

    /// Minimum stem length
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MIN_STEM_LENGTH)]
    pub min_stem: usize,

    #[command(flatten)]
    pub output: OutputOptions,
}

impl SuffixArgs {
    /// Execute the suffix command
    pub fn execute(&self) -> CliResult<()> {
        self.output.init_logging();
        log::info!("identifying suffix for {:?}", self.word);

        let store = DictionaryStore::new();
        let segmenter = SuffixSegmenter::from_store(&store, &self.dictionary)?
            .with_min_stem_length(self.min_stem);

        let result = segmenter.segment(&self.word);
        if let Some(message) = &result.message {
            log::debug!("segmentation degraded: {message}");
        }

        let record = serde_json::to_value(&result)?;
        self.output.render(vec![record], false)
    }
}
