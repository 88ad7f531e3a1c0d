//! Collaborator analyzer contracts
//!
//! The core never invokes the tagger or the sense lookup; the calling layer
//! runs them and hands their outcomes to the aggregator. Failure is data
//! here: a collaborator that is unavailable or cannot resolve a word becomes
//! a typed [`SourceOutcome::Failed`] case, never a caught generic panic.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome of one collaborator call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SourceOutcome<T> {
    /// The collaborator produced an analysis
    Available(T),
    /// The collaborator ran but could not produce one; carries its marker
    Failed(String),
    /// The collaborator was never invoked
    Absent,
}

impl<T> SourceOutcome<T> {
    /// The analysis, when one is available
    pub fn available(&self) -> Option<&T> {
        match self {
            SourceOutcome::Available(analysis) => Some(analysis),
            SourceOutcome::Failed(_) | SourceOutcome::Absent => None,
        }
    }

    /// Wrap a collaborator `Result`, turning its error into a failure marker
    pub fn from_result<E: std::fmt::Display>(result: std::result::Result<T, E>) -> Self {
        match result {
            Ok(analysis) => SourceOutcome::Available(analysis),
            Err(err) => SourceOutcome::Failed(err.to_string()),
        }
    }

    /// The failure marker, when the collaborator failed
    pub fn failure(&self) -> Option<&str> {
        match self {
            SourceOutcome::Failed(marker) => Some(marker.as_str()),
            SourceOutcome::Available(_) | SourceOutcome::Absent => None,
        }
    }
}

/// Analysis produced by the POS/lemma tagger collaborator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaggerAnalysis {
    /// Canonical form
    pub lemma: String,
    /// Coarse POS tag
    pub pos: String,
    /// Fine-grained tag
    pub tag: String,
    /// Morphological feature mapping (Tense, Number, ...)
    #[serde(default)]
    pub morph: BTreeMap<String, String>,
}

/// One word sense from the sense-lookup collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Synset {
    /// Sense identifier, e.g. "happiness.n.01"
    pub name: String,
    /// POS letter of the sense (n, v, a, s, r)
    pub pos: String,
    /// Gloss
    pub definition: String,
    /// Up to two usage examples
    #[serde(default)]
    pub examples: Vec<String>,
}

/// Analysis produced by the WordNet-style sense lookup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SenseAnalysis {
    /// Preferred canonical form
    #[serde(default)]
    pub lemma: Option<String>,
    /// Preferred POS category name
    #[serde(default)]
    pub pos: Option<String>,
    /// POS category name to canonical form
    #[serde(default)]
    pub lemmas: BTreeMap<String, String>,
    /// Ordered senses, most frequent first
    #[serde(default)]
    pub synsets: Vec<Synset>,
}
