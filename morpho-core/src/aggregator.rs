//! Multi-source result aggregation
//!
//! Merges a segmentation with the outcomes of the two collaborator analyzers
//! into one record. A failed or absent collaborator degrades to missing
//! fields; only a segmentation violating the core contract is an error.

use crate::analyzer::{SenseAnalysis, SourceOutcome, Synset, TaggerAnalysis};
use crate::dictionary::PosSpec;
use crate::error::{CoreError, Result};
use crate::segmenter::{SegmentationResult, SuffixMeta};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Maximum number of senses surfaced on an aggregated record
const MAX_SENSES: usize = 2;
/// Confidence boost applied when the tagger confirms the suffix POS
const TAGGER_AGREEMENT_BOOST: f64 = 0.2;

/// Analysis sources that can contribute a POS value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PosSource {
    /// The suffix segmenter
    Suffix,
    /// The POS/lemma tagger collaborator
    Tagger,
    /// The WordNet-style sense lookup collaborator
    Wordnet,
}

impl PosSource {
    /// Wire name of the source
    pub fn as_str(self) -> &'static str {
        match self {
            PosSource::Suffix => "suffix",
            PosSource::Tagger => "tagger",
            PosSource::Wordnet => "wordnet",
        }
    }
}

/// Aggregated POS: an agreed tag, a preserved disagreement, or nothing
///
/// Serializes as a bare string on agreement, as a per-source mapping plus
/// `"consensus": false` on disagreement, and as `null` when no source
/// contributed.
#[derive(Debug, Clone, PartialEq)]
pub enum PosConsensus {
    /// Every contributing source reported the same tag
    Agreement(String),
    /// Sources disagreed; every contribution is preserved
    Disagreement(BTreeMap<PosSource, String>),
    /// No source contributed a tag
    Unknown,
}

impl PosConsensus {
    /// The agreed tag, when there is consensus
    pub fn agreed(&self) -> Option<&str> {
        match self {
            PosConsensus::Agreement(tag) => Some(tag.as_str()),
            PosConsensus::Disagreement(_) | PosConsensus::Unknown => None,
        }
    }
}

impl Serialize for PosConsensus {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            PosConsensus::Agreement(tag) => serializer.serialize_str(tag),
            PosConsensus::Disagreement(values) => {
                let mut map = serializer.serialize_map(Some(values.len() + 1))?;
                for (source, tag) in values {
                    map.serialize_entry(source.as_str(), tag)?;
                }
                map.serialize_entry("consensus", &false)?;
                map.end()
            }
            PosConsensus::Unknown => serializer.serialize_none(),
        }
    }
}

/// Sense-lookup fields carried on an aggregated record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordnetSummary {
    /// POS category name to canonical form
    pub lemmas: BTreeMap<String, String>,
    /// Top senses, at most two
    pub synsets: Vec<Synset>,
}

/// Final merged record for one analyzed word
///
/// Constructed once per analysis request, serialized, then discarded.
#[derive(Debug, Clone, Serialize)]
pub struct AggregatedResult {
    /// Input word with its original casing
    pub word: String,
    /// Resolved canonical form
    pub lemma: String,
    /// Aggregated POS
    pub pos: PosConsensus,
    /// Stem from segmentation
    pub stem: String,
    /// Matched suffix pattern, if any
    pub suffix: Option<String>,
    /// Aggregated confidence in [0, 1]
    pub confidence: f64,
    /// POS of the stem before suffixation, when the segmenter produced one
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub source_pos: Vec<String>,
    /// Matched entry metadata, when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix_meta: Option<SuffixMeta>,
    /// Fine-grained tagger tag; present only when the tagger succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Tagger morphological features; present only when the tagger succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub morph: Option<BTreeMap<String, String>>,
    /// Sense-lookup block; present only when the lookup succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wordnet: Option<WordnetSummary>,
    /// Top senses duplicated at the top level for consumer convenience
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synsets: Option<Vec<Synset>>,
}

/// Merge segmentation and collaborator outcomes into one record
pub fn aggregate(
    segmentation: &SegmentationResult,
    tagger: &SourceOutcome<TaggerAnalysis>,
    sense: &SourceOutcome<SenseAnalysis>,
) -> Result<AggregatedResult> {
    validate(segmentation)?;

    let tagger_analysis = tagger.available();
    let sense_analysis = sense.available();

    // Lemma waterfall: tagger > sense lookup > stem > raw word. Strict
    // priority, first non-empty value wins.
    let lemma = [
        tagger_analysis.map(|analysis| analysis.lemma.as_str()),
        sense_analysis.and_then(|analysis| analysis.lemma.as_deref()),
        Some(segmentation.stem.as_str()),
        Some(segmentation.word.as_str()),
    ]
    .into_iter()
    .flatten()
    .find(|candidate| !candidate.is_empty())
    .unwrap_or(segmentation.word.as_str())
    .to_string();

    // One POS per source. An ambiguous suffix collapses to its first tag;
    // the alternates are dropped here (kept for output compatibility).
    let mut contributions: BTreeMap<PosSource, String> = BTreeMap::new();
    if let Some(tag) = segmentation.pos.as_ref().and_then(PosSpec::primary) {
        contributions.insert(PosSource::Suffix, tag.to_string());
    }
    if let Some(analysis) = tagger_analysis {
        if !analysis.pos.is_empty() {
            contributions.insert(PosSource::Tagger, analysis.pos.to_lowercase());
        }
    }
    if let Some(analysis) = sense_analysis {
        if let Some(pos) = analysis.pos.as_ref().filter(|pos| !pos.is_empty()) {
            contributions.insert(PosSource::Wordnet, pos.clone());
        }
    }

    let mut distinct: Vec<&String> = contributions.values().collect();
    distinct.sort();
    distinct.dedup();
    let pos = match distinct.as_slice() {
        [] => PosConsensus::Unknown,
        [only] => PosConsensus::Agreement((*only).clone()),
        _ => PosConsensus::Disagreement(contributions.clone()),
    };

    // Only tagger agreement with the suffix source moves confidence.
    let mut confidence = segmentation.confidence;
    if tagger_analysis.is_some() {
        if let (Some(suffix_pos), Some(tagger_pos)) = (
            contributions.get(&PosSource::Suffix),
            contributions.get(&PosSource::Tagger),
        ) {
            if suffix_pos == tagger_pos {
                confidence = (confidence + TAGGER_AGREEMENT_BOOST).min(1.0);
            }
        }
    }

    let (wordnet, synsets) = match sense_analysis {
        Some(analysis) => {
            let top: Vec<Synset> = analysis.synsets.iter().take(MAX_SENSES).cloned().collect();
            let top_level = if top.is_empty() { None } else { Some(top.clone()) };
            let summary = WordnetSummary {
                lemmas: analysis.lemmas.clone(),
                synsets: top,
            };
            (Some(summary), top_level)
        }
        None => (None, None),
    };

    Ok(AggregatedResult {
        word: segmentation.word.clone(),
        lemma,
        pos,
        stem: segmentation.stem.clone(),
        suffix: segmentation.suffix.clone(),
        confidence,
        source_pos: segmentation.source_pos.clone(),
        suffix_meta: segmentation.suffix_meta.clone(),
        tag: tagger_analysis.map(|analysis| analysis.tag.clone()),
        morph: tagger_analysis.map(|analysis| analysis.morph.clone()),
        wordnet,
        synsets,
    })
}

fn validate(segmentation: &SegmentationResult) -> Result<()> {
    if segmentation.word.is_empty() {
        return Err(CoreError::MalformedSegmentation("empty word".to_string()));
    }
    if !segmentation.confidence.is_finite()
        || !(0.0..=1.0).contains(&segmentation.confidence)
    {
        return Err(CoreError::MalformedSegmentation(format!(
            "confidence {} outside [0, 1]",
            segmentation.confidence
        )));
    }
    Ok(())
}
