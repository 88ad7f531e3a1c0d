//! WordNet-style sense lookup
//!
//! Reads a JSON sense index (lemma -> synsets, plus per-category exception
//! lists for irregular forms) and lemmatizes with morphy-style detachment
//! rules. A missing index degrades to a per-call failure marker, matching
//! the behavior of an uninstalled corpus.

use morpho_core::{SenseAnalysis, Synset};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Errors from the sense-lookup collaborator
#[derive(Error, Debug)]
pub enum WordnetError {
    /// Index file missing or unreadable
    #[error("sense index unavailable: {0}")]
    IndexUnavailable(String),
}

/// POS categories in lemmatization preference order, with the synset letters
/// that count as members of each category
const CATEGORIES: [(&str, &[&str]); 4] = [
    ("noun", &["n"]),
    ("verb", &["v"]),
    ("adjective", &["a", "s"]),
    ("adverb", &["r"]),
];

/// Detachment substitutions per category, longest suffix first
const NOUN_SUBSTITUTIONS: &[(&str, &str)] = &[
    ("ches", "ch"),
    ("shes", "sh"),
    ("ses", "s"),
    ("ves", "f"),
    ("xes", "x"),
    ("zes", "z"),
    ("ies", "y"),
    ("men", "man"),
    ("s", ""),
];
const VERB_SUBSTITUTIONS: &[(&str, &str)] = &[
    ("ing", "e"),
    ("ing", ""),
    ("ies", "y"),
    ("ed", "e"),
    ("ed", ""),
    ("es", "e"),
    ("es", ""),
    ("s", ""),
];
const ADJECTIVE_SUBSTITUTIONS: &[(&str, &str)] = &[
    ("est", ""),
    ("est", "e"),
    ("er", ""),
    ("er", "e"),
];

/// How many senses one lookup returns
const MAX_SENSES: usize = 3;
/// How many usage examples each sense keeps
const MAX_SENSE_EXAMPLES: usize = 2;

#[derive(Debug, Default, Deserialize)]
struct SenseIndex {
    #[serde(default)]
    entries: BTreeMap<String, Vec<Synset>>,
    /// category -> irregular form -> base form
    #[serde(default)]
    exceptions: BTreeMap<String, BTreeMap<String, String>>,
}

#[derive(Debug)]
enum IndexState {
    Ready(SenseIndex),
    Unavailable(String),
}

/// Sense lookup over a JSON index file
#[derive(Debug)]
pub struct WordnetLookup {
    index: IndexState,
}

impl WordnetLookup {
    /// Open the sense index at `path`
    ///
    /// Absence or unreadability is recorded and surfaces as
    /// [`WordnetError::IndexUnavailable`] on every call.
    pub fn open(path: &Path) -> Self {
        let index = match std::fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str::<SenseIndex>(&raw) {
                Ok(index) => IndexState::Ready(index),
                Err(err) => IndexState::Unavailable(format!("{}: {err}", path.display())),
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                IndexState::Unavailable(format!("no index at {}", path.display()))
            }
            Err(err) => IndexState::Unavailable(format!("{}: {err}", path.display())),
        };
        Self { index }
    }

    /// Look up lemmas and senses for one word
    pub fn analyze(&self, word: &str) -> Result<SenseAnalysis, WordnetError> {
        let index = match &self.index {
            IndexState::Ready(index) => index,
            IndexState::Unavailable(reason) => {
                return Err(WordnetError::IndexUnavailable(reason.clone()));
            }
        };

        let lowered = word.to_lowercase();

        let mut lemmas = BTreeMap::new();
        for (category, letters) in CATEGORIES {
            if let Some(lemma) = index.morphy(&lowered, category, letters) {
                lemmas.insert(category.to_string(), lemma);
            }
        }

        let synsets: Vec<Synset> = index
            .entries
            .get(&lowered)
            .map(|senses| {
                senses
                    .iter()
                    .take(MAX_SENSES)
                    .cloned()
                    .map(|mut synset| {
                        synset.examples.truncate(MAX_SENSE_EXAMPLES);
                        synset
                    })
                    .collect()
            })
            .unwrap_or_default();

        let (pos, lemma) = preferred(&lemmas, &synsets, &lowered);
        Ok(SenseAnalysis {
            lemma: Some(lemma),
            pos,
            lemmas,
            synsets,
        })
    }
}

/// Most likely POS and lemma: first populated category in preference order,
/// falling back to the first sense's letter with the word left unchanged
fn preferred(
    lemmas: &BTreeMap<String, String>,
    synsets: &[Synset],
    word: &str,
) -> (Option<String>, String) {
    for (category, _) in CATEGORIES {
        if let Some(lemma) = lemmas.get(category) {
            return (Some(category.to_string()), lemma.clone());
        }
    }

    if let Some(first) = synsets.first() {
        let category = match first.pos.as_str() {
            "n" => "noun",
            "v" => "verb",
            "a" | "s" => "adjective",
            "r" => "adverb",
            _ => "unknown",
        };
        return (Some(category.to_string()), word.to_string());
    }

    (None, word.to_string())
}

impl SenseIndex {
    /// Morphy-style lemmatization within one category: exceptions first,
    /// then the word itself, then detachment substitutions
    fn morphy(&self, word: &str, category: &str, letters: &[&str]) -> Option<String> {
        if let Some(base) = self
            .exceptions
            .get(category)
            .and_then(|irregulars| irregulars.get(word))
        {
            if self.has_category(base, letters) {
                return Some(base.clone());
            }
        }

        if self.has_category(word, letters) {
            return Some(word.to_string());
        }

        for (suffix, replacement) in substitutions(category) {
            let Some(stripped) = word.strip_suffix(suffix) else {
                continue;
            };
            if stripped.is_empty() {
                continue;
            }
            let candidate = format!("{stripped}{replacement}");
            if self.has_category(&candidate, letters) {
                return Some(candidate);
            }
        }

        None
    }

    fn has_category(&self, word: &str, letters: &[&str]) -> bool {
        self.entries
            .get(word)
            .map(|synsets| {
                synsets
                    .iter()
                    .any(|synset| letters.contains(&synset.pos.as_str()))
            })
            .unwrap_or(false)
    }
}

fn substitutions(category: &str) -> &'static [(&'static str, &'static str)] {
    match category {
        "noun" => NOUN_SUBSTITUTIONS,
        "verb" => VERB_SUBSTITUTIONS,
        "adjective" => ADJECTIVE_SUBSTITUTIONS,
        _ => &[],
    }
}
