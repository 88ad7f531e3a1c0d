//! Longest-match suffix segmentation
//!
//! Splits a word into stem and suffix against a loaded dictionary. Matching
//! is case-insensitive; the original casing is preserved in the output. The
//! longest matching pattern wins, subject to the stem keeping at least
//! `min_stem_length` characters.

use crate::dictionary::{DictionaryState, DictionaryStore, PosSpec, SuffixEntry};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Confidence assigned to a match backed by a well-attested suffix
pub const HIGH_CONFIDENCE: f64 = 0.9;
/// Confidence assigned to a match backed by a rare suffix
pub const LOW_CONFIDENCE: f64 = 0.7;
/// Corpus frequency above which a suffix counts as well-attested
pub const FREQUENCY_THRESHOLD: u64 = 50;
/// Default minimum stem length, guarding against over-segmentation of short
/// words ("able" must not become "a" + "-ble")
pub const DEFAULT_MIN_STEM_LENGTH: usize = 2;

/// How many dictionary examples a result carries
const MAX_EXAMPLES: usize = 3;

/// Meaning and example words of the matched dictionary entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuffixMeta {
    /// Human description from the dictionary
    #[serde(default)]
    pub meaning: Option<String>,
    /// Up to three example words
    #[serde(default)]
    pub examples: Vec<String>,
}

/// Outcome of segmenting one word
///
/// Produced fresh per call; the only shared state behind it is the read-only
/// dictionary snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentationResult {
    /// Input word with its original casing
    pub word: String,
    /// Matched pattern (with its marker), or `None` when nothing matched
    pub suffix: Option<String>,
    /// Lowercased residue, or the whole lowercased word without a match
    pub stem: String,
    /// POS annotation of the matched suffix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<PosSpec>,
    /// POS of the stem before suffixation, passed through from the entry
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source_pos: Vec<String>,
    /// Entry classification; "unknown" when the entry has none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Match confidence in [0, 1]
    pub confidence: f64,
    /// Meaning and examples of the matched entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix_meta: Option<SuffixMeta>,
    /// Set when no suffix was identified; distinguishes "no dictionary" from
    /// "no match" without changing the result shape
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Longest-match suffix segmenter over one dictionary snapshot
#[derive(Debug, Clone)]
pub struct SuffixSegmenter {
    dictionary: Arc<DictionaryState>,
    min_stem_length: usize,
}

impl SuffixSegmenter {
    /// Segmenter over an already-loaded dictionary snapshot
    pub fn new(dictionary: Arc<DictionaryState>) -> Self {
        Self {
            dictionary,
            min_stem_length: DEFAULT_MIN_STEM_LENGTH,
        }
    }

    /// Load `path` through `store` and build a segmenter over the snapshot
    pub fn from_store(store: &DictionaryStore, path: &Path) -> Result<Self> {
        Ok(Self::new(store.load(path)?))
    }

    /// Override the minimum stem length (values below 1 clamp to 1)
    pub fn with_min_stem_length(mut self, min_stem_length: usize) -> Self {
        self.min_stem_length = min_stem_length.max(1);
        self
    }

    /// Split `word` into stem and suffix using the longest matching pattern
    pub fn segment(&self, word: &str) -> SegmentationResult {
        let lowered = word.to_lowercase();

        let dictionary = match self.dictionary.dictionary() {
            Some(dictionary) => dictionary,
            None => {
                return no_match(
                    word,
                    lowered,
                    "suffix dictionary not found; returning empty analysis",
                );
            }
        };

        // Longest literal text first. Equal lengths fall back to pattern
        // order so the pick is deterministic; a well-formed dictionary does
        // not contain same-length patterns matching the same word.
        let mut patterns: Vec<(&str, &str)> = dictionary
            .suffixes
            .keys()
            .map(|pattern| (pattern.as_str(), pattern.trim_start_matches('-')))
            .collect();
        patterns.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then(a.0.cmp(b.0)));

        for (pattern, literal) in patterns {
            if literal.is_empty() || lowered.len() <= literal.len() {
                continue;
            }
            if !lowered.ends_with(literal) {
                continue;
            }
            let stem = &lowered[..lowered.len() - literal.len()];
            if stem.chars().count() < self.min_stem_length {
                // Over-segmentation guard; a shorter pattern may still fit.
                continue;
            }
            return matched(word, pattern, stem, &dictionary.suffixes[pattern]);
        }

        no_match(word, lowered, "no suffix identified")
    }
}

fn matched(word: &str, pattern: &str, stem: &str, entry: &SuffixEntry) -> SegmentationResult {
    let confidence = if entry.frequency > FREQUENCY_THRESHOLD {
        HIGH_CONFIDENCE
    } else {
        LOW_CONFIDENCE
    };

    SegmentationResult {
        word: word.to_string(),
        suffix: Some(pattern.to_string()),
        stem: stem.to_string(),
        pos: entry.pos.clone(),
        source_pos: entry.source_pos.clone(),
        category: Some(
            entry
                .category
                .clone()
                .unwrap_or_else(|| "unknown".to_string()),
        ),
        confidence,
        suffix_meta: Some(SuffixMeta {
            meaning: entry.meaning.clone(),
            examples: entry.examples.iter().take(MAX_EXAMPLES).cloned().collect(),
        }),
        message: None,
    }
}

fn no_match(word: &str, stem: String, message: &str) -> SegmentationResult {
    SegmentationResult {
        word: word.to_string(),
        suffix: None,
        stem,
        pos: None,
        source_pos: Vec::new(),
        category: None,
        confidence: 0.0,
        suffix_meta: None,
        message: Some(message.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::SuffixDictionary;
    use proptest::prelude::*;

    fn segmenter(json: &str) -> SuffixSegmenter {
        let dictionary = SuffixDictionary::from_json(json).unwrap();
        SuffixSegmenter::new(Arc::new(DictionaryState::Loaded(dictionary)))
    }

    fn sample_segmenter() -> SuffixSegmenter {
        segmenter(
            r#"{
                "suffixes": {
                    "-ness": {
                        "pos": "noun",
                        "source_pos": ["adjective"],
                        "category": "derivational",
                        "meaning": "state or quality of",
                        "examples": ["happiness", "darkness", "kindness", "fitness"],
                        "frequency": 100
                    },
                    "-s": {"pos": "noun", "category": "inflectional", "frequency": 200},
                    "-ble": {"pos": "adjective", "frequency": 10},
                    "-ly": {"pos": "adverb", "frequency": 10}
                }
            }"#,
        )
    }

    #[test]
    fn identifies_suffix_with_longest_match() {
        let result = sample_segmenter().segment("happiness");
        assert_eq!(result.suffix.as_deref(), Some("-ness"));
        assert_eq!(result.stem, "happi");
        assert_eq!(result.pos, Some(PosSpec::Single("noun".to_string())));
        assert_eq!(result.source_pos, vec!["adjective".to_string()]);
        assert_eq!(result.confidence, HIGH_CONFIDENCE);
        assert!(result.message.is_none());
    }

    #[test]
    fn preserves_original_casing_in_word_field() {
        let result = sample_segmenter().segment("HAPPINESS");
        assert_eq!(result.word, "HAPPINESS");
        assert_eq!(result.stem, "happi");
    }

    #[test]
    fn matching_is_case_invariant() {
        let lower = sample_segmenter().segment("happiness");
        let upper = sample_segmenter().segment("HAPPINESS");
        let mixed = sample_segmenter().segment("HaPpInEsS");

        for result in [&upper, &mixed] {
            assert_eq!(result.suffix, lower.suffix);
            assert_eq!(result.stem, lower.stem);
        }
    }

    #[test]
    fn no_match_returns_lowercased_word_as_stem() {
        let result = sample_segmenter().segment("Cat");
        assert_eq!(result.suffix, None);
        assert_eq!(result.stem, "cat");
        assert_eq!(result.pos, None);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.message.as_deref(), Some("no suffix identified"));
    }

    #[test]
    fn min_stem_length_rejects_over_segmentation() {
        // "able" would segment as "a" + "-ble" without the guard.
        let result = sample_segmenter().segment("able");
        assert_eq!(result.suffix, None);
        assert_eq!(result.stem, "able");
    }

    #[test]
    fn shorter_pattern_still_wins_when_longer_is_rejected() {
        // "-ness" leaves a one-char stem for "aness", so it is skipped and
        // the next-longest candidate "-s" takes the match.
        let result = sample_segmenter().segment("aness");
        assert_eq!(result.suffix.as_deref(), Some("-s"));
        assert_eq!(result.stem, "anes");

        let relaxed = sample_segmenter().with_min_stem_length(1);
        let result = relaxed.segment("aness");
        assert_eq!(result.suffix.as_deref(), Some("-ness"));
        assert_eq!(result.stem, "a");
    }

    #[test]
    fn suffix_must_leave_nonempty_residue() {
        // The word equal to the suffix text itself never matches.
        let relaxed = sample_segmenter().with_min_stem_length(1);
        let result = relaxed.segment("ness");
        assert_eq!(result.suffix, None);
    }

    #[test]
    fn frequency_threshold_sets_confidence() {
        let result = sample_segmenter().segment("quickly");
        assert_eq!(result.suffix.as_deref(), Some("-ly"));
        assert_eq!(result.confidence, LOW_CONFIDENCE);

        let result = sample_segmenter().segment("happiness");
        assert_eq!(result.confidence, HIGH_CONFIDENCE);
    }

    #[test]
    fn category_defaults_to_unknown_on_match() {
        let result = sample_segmenter().segment("visible");
        assert_eq!(result.suffix.as_deref(), Some("-ble"));
        assert_eq!(result.category.as_deref(), Some("unknown"));
    }

    #[test]
    fn examples_are_truncated_to_three() {
        let result = sample_segmenter().segment("happiness");
        let meta = result.suffix_meta.unwrap();
        assert_eq!(meta.meaning.as_deref(), Some("state or quality of"));
        assert_eq!(meta.examples, vec!["happiness", "darkness", "kindness"]);
    }

    #[test]
    fn missing_dictionary_degrades_with_message() {
        let segmenter = SuffixSegmenter::new(Arc::new(DictionaryState::Missing));
        let result = segmenter.segment("Happiness");

        assert_eq!(result.suffix, None);
        assert_eq!(result.stem, "happiness");
        assert_eq!(result.confidence, 0.0);
        let message = result.message.unwrap();
        assert!(message.contains("dictionary not found"));
    }

    #[test]
    fn empty_dictionary_is_a_plain_no_match() {
        let segmenter = segmenter(r#"{"suffixes": {}}"#);
        let result = segmenter.segment("happiness");
        assert_eq!(result.message.as_deref(), Some("no suffix identified"));
    }

    #[test]
    fn equal_length_tie_breaks_by_pattern_order() {
        // The only way two patterns share a literal is a marked and an
        // unmarked spelling of the same text; the marked one sorts first.
        let segmenter = segmenter(
            r#"{
                "suffixes": {
                    "ness": {"pos": "verb", "frequency": 1},
                    "-ness": {"pos": "noun", "frequency": 1}
                }
            }"#,
        );
        let result = segmenter.segment("happiness");
        assert_eq!(result.suffix.as_deref(), Some("-ness"));
        assert_eq!(result.pos, Some(PosSpec::Single("noun".to_string())));
    }

    proptest! {
        #[test]
        fn matched_stem_respects_min_length(word in "[a-z]{1,16}") {
            let segmenter = sample_segmenter();
            let result = segmenter.segment(&word);
            if result.suffix.is_some() {
                prop_assert!(result.stem.chars().count() >= DEFAULT_MIN_STEM_LENGTH);
            }
        }

        #[test]
        fn stem_and_suffix_reassemble_the_word(word in "[a-zA-Z]{1,16}") {
            let segmenter = sample_segmenter();
            let result = segmenter.segment(&word);
            match &result.suffix {
                Some(pattern) => {
                    let literal = pattern.trim_start_matches('-');
                    prop_assert_eq!(
                        format!("{}{}", result.stem, literal),
                        word.to_lowercase()
                    );
                }
                None => prop_assert_eq!(&result.stem, &word.to_lowercase()),
            }
        }
    }
}
