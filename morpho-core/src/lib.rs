//! Core analysis for English morphology
//!
//! Two strictly ordered components: the suffix segmenter splits a word into
//! stem and suffix against a loaded dictionary, and the result aggregator
//! reconciles the segmentation with the outcomes of two collaborator
//! analyzers (a POS/lemma tagger and a WordNet-style sense lookup) into a
//! single record with explicit disagreement handling.
//!
//! The crate owns no I/O beyond dictionary loading and never invokes the
//! collaborators itself; the calling layer orchestrates them and passes
//! their typed outcomes in.

#![warn(missing_docs)]

pub mod aggregator;
pub mod analyzer;
pub mod dictionary;
pub mod error;
pub mod segmenter;

pub use aggregator::{aggregate, AggregatedResult, PosConsensus, PosSource, WordnetSummary};
pub use analyzer::{SenseAnalysis, SourceOutcome, Synset, TaggerAnalysis};
pub use dictionary::{
    DictionaryMetadata, DictionaryState, DictionaryStore, PosSpec, SuffixDictionary, SuffixEntry,
};
pub use error::{CoreError, Result};
pub use segmenter::{
    SegmentationResult, SuffixMeta, SuffixSegmenter, DEFAULT_MIN_STEM_LENGTH, FREQUENCY_THRESHOLD,
    HIGH_CONFIDENCE, LOW_CONFIDENCE,
};
