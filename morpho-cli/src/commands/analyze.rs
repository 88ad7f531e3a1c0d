//! Full analysis command: suffix + tagger + sense lookup

use super::OutputOptions;
use crate::analyzers::{LexiconTagger, WordnetLookup};
use crate::error::CliResult;
use clap::Args;
use morpho_core::{
    aggregate, DictionaryStore, SourceOutcome, SuffixSegmenter, DEFAULT_MIN_STEM_LENGTH,
};
use serde_json::Value;
use std::path::PathBuf;

/// Arguments for the analyze command
#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Single word to analyze
    #[arg(short, long, required_unless_present = "words")]
    pub word: Option<String>,

    /// Comma-separated list of words to analyze (batch mode)
    #[arg(long, conflicts_with = "word")]
    pub words: Option<String>,

    /// Optional context sentence for disambiguation
    #[arg(short, long)]
    pub context: Option<String>,

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

    /// Replace the built-in tagger lexicon with a TOML file
    #[arg(long, value_name = "FILE")]
    pub tagger_lexicon: Option<PathBuf>,

    /// Path to the sense index
    #[arg(
        long,
        value_name = "FILE",
        env = "MORPHO_WORDNET_INDEX",
        default_value = "data/wordnet.json"
    )]
    pub wordnet_index: PathBuf,

    #[command(flatten)]
    pub output: OutputOptions,
}

impl AnalyzeArgs {
    /// Execute the analyze command
    pub fn execute(&self) -> CliResult<()> {
        self.output.init_logging();

        let store = DictionaryStore::new();
        let segmenter = SuffixSegmenter::from_store(&store, &self.dictionary)?
            .with_min_stem_length(self.min_stem);

        let tagger = match &self.tagger_lexicon {
            Some(path) => LexiconTagger::from_file(path),
            None => LexiconTagger::embedded(),
        };
        let wordnet = WordnetLookup::open(&self.wordnet_index);

        if let Some(words) = &self.words {
            let words: Vec<&str> = words
                .split(',')
                .map(str::trim)
                .filter(|word| !word.is_empty())
                .collect();
            log::info!("analyzing {} words", words.len());

            let mut records = Vec::with_capacity(words.len());
            for word in words {
                records.push(self.analyze_word(&segmenter, &tagger, &wordnet, word)?);
            }
            self.output.render(records, true)
        } else {
            let word = self.word.as_deref().unwrap_or_default();
            log::info!("analyzing {word:?}");
            let record = self.analyze_word(&segmenter, &tagger, &wordnet, word)?;
            self.output.render(vec![record], false)
        }
    }

    /// Run the full pipeline for one word
    ///
    /// Collaborator failures are folded into the aggregation as degraded
    /// sources; only core contract violations propagate.
    fn analyze_word(
        &self,
        segmenter: &SuffixSegmenter,
        tagger: &LexiconTagger,
        wordnet: &WordnetLookup,
        word: &str,
    ) -> CliResult<Value> {
        let segmentation = segmenter.segment(word);

        let tagger_outcome =
            SourceOutcome::from_result(tagger.analyze(word, self.context.as_deref()));
        if let Some(marker) = tagger_outcome.failure() {
            log::debug!("tagger degraded for {word:?}: {marker}");
        }

        let sense_outcome = SourceOutcome::from_result(wordnet.analyze(word));
        if let Some(marker) = sense_outcome.failure() {
            log::debug!("sense lookup degraded for {word:?}: {marker}");
        }

        let aggregated = aggregate(&segmentation, &tagger_outcome, &sense_outcome)?;
        Ok(serde_json::to_value(&aggregated)?)
    }
}
