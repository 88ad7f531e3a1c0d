//! Lexicon-backed POS/lemma tagger
//!
//! Stands in for a statistical tagger: exact lexicon hits win, regular
//! inflections of known base forms are guessed, everything else is reported
//! as out of vocabulary. The built-in English lexicon is embedded in the
//! binary and parsed once per process; an external TOML file can replace it.

use morpho_core::TaggerAnalysis;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors from the tagger collaborator
#[derive(Error, Debug)]
pub enum TaggerError {
    /// Lexicon file missing or unreadable
    #[error("tagger lexicon unavailable: {0}")]
    LexiconUnavailable(String),

    /// A context sentence was given but does not contain the word
    #[error("word \"{0}\" not found in context")]
    WordNotInContext(String),

    /// Neither the word nor a recognizable base form is in the lexicon
    #[error("word \"{0}\" not covered by the tagger lexicon")]
    OutOfVocabulary(String),
}

#[derive(Debug, Clone, Deserialize)]
struct LexiconEntry {
    lemma: String,
    pos: String,
    tag: String,
    #[serde(default)]
    morph: BTreeMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
struct Lexicon {
    #[serde(default)]
    words: BTreeMap<String, LexiconEntry>,
}

static EMBEDDED: OnceLock<Lexicon> = OnceLock::new();

fn embedded_lexicon() -> &'static Lexicon {
    EMBEDDED.get_or_init(|| {
        match toml::from_str(include_str!("../../configs/tagger/english.toml")) {
            Ok(lexicon) => lexicon,
            Err(err) => {
                log::warn!("embedded tagger lexicon failed to parse: {err}");
                Lexicon::default()
            }
        }
    })
}

#[derive(Debug)]
enum Source {
    Embedded,
    File(Lexicon),
    Unavailable(String),
}

/// POS/lemma tagger over a word lexicon
#[derive(Debug)]
pub struct LexiconTagger {
    source: Source,
}

impl LexiconTagger {
    /// Tagger over the built-in English lexicon
    pub fn embedded() -> Self {
        Self {
            source: Source::Embedded,
        }
    }

    /// Tagger over an external lexicon file
    ///
    /// A missing or malformed file is recorded and surfaces as
    /// [`TaggerError::LexiconUnavailable`] on every call, so the pipeline
    /// degrades instead of aborting.
    pub fn from_file(path: &Path) -> Self {
        let source = match std::fs::read_to_string(path) {
            Ok(raw) => match toml::from_str(&raw) {
                Ok(lexicon) => Source::File(lexicon),
                Err(err) => Source::Unavailable(format!("{}: {err}", path.display())),
            },
            Err(err) => Source::Unavailable(format!("{}: {err}", path.display())),
        };
        Self { source }
    }

    fn lexicon(&self) -> Result<&Lexicon, TaggerError> {
        match &self.source {
            Source::Embedded => Ok(embedded_lexicon()),
            Source::File(lexicon) => Ok(lexicon),
            Source::Unavailable(reason) => Err(TaggerError::LexiconUnavailable(reason.clone())),
        }
    }

    /// Tag one word, optionally checking it appears in a context sentence
    pub fn analyze(
        &self,
        word: &str,
        context: Option<&str>,
    ) -> Result<TaggerAnalysis, TaggerError> {
        let lexicon = self.lexicon()?;
        let lowered = word.to_lowercase();

        if let Some(context) = context {
            let found = context
                .split(|ch: char| !ch.is_alphanumeric() && ch != '\'' && ch != '-')
                .filter(|token| !token.is_empty())
                .any(|token| token.to_lowercase() == lowered);
            if !found {
                return Err(TaggerError::WordNotInContext(word.to_string()));
            }
        }

        if let Some(entry) = lexicon.words.get(&lowered) {
            return Ok(analysis_from(entry));
        }
        if let Some(analysis) = lexicon.guess_inflected(&lowered) {
            return Ok(analysis);
        }
        Err(TaggerError::OutOfVocabulary(word.to_string()))
    }
}

fn analysis_from(entry: &LexiconEntry) -> TaggerAnalysis {
    TaggerAnalysis {
        lemma: entry.lemma.clone(),
        pos: entry.pos.clone(),
        tag: entry.tag.clone(),
        morph: entry.morph.clone(),
    }
}

fn features(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

impl Lexicon {
    /// Guess regular inflections of known base forms
    fn guess_inflected(&self, word: &str) -> Option<TaggerAnalysis> {
        if let Some(stripped) = word.strip_suffix("ing").filter(|base| base.len() >= 2) {
            if let Some(entry) = self.verb_base(stripped) {
                return Some(TaggerAnalysis {
                    lemma: entry.lemma.clone(),
                    pos: "VERB".to_string(),
                    tag: "VBG".to_string(),
                    morph: features(&[
                        ("Aspect", "Prog"),
                        ("Tense", "Pres"),
                        ("VerbForm", "Part"),
                    ]),
                });
            }
        }

        if let Some(stripped) = word.strip_suffix("ed").filter(|base| base.len() >= 2) {
            if let Some(entry) = self.verb_base(stripped) {
                return Some(TaggerAnalysis {
                    lemma: entry.lemma.clone(),
                    pos: "VERB".to_string(),
                    tag: "VBD".to_string(),
                    morph: features(&[("Tense", "Past"), ("VerbForm", "Fin")]),
                });
            }
        }

        let candidates: Vec<String> = if let Some(base) = word.strip_suffix("ies") {
            vec![format!("{base}y")]
        } else if let Some(base) = word.strip_suffix("es") {
            vec![base.to_string(), format!("{base}e")]
        } else if let Some(base) = word.strip_suffix('s') {
            vec![base.to_string()]
        } else {
            Vec::new()
        };

        for candidate in candidates {
            let Some(entry) = self.words.get(&candidate) else {
                continue;
            };
            if entry.pos.eq_ignore_ascii_case("verb") {
                return Some(TaggerAnalysis {
                    lemma: entry.lemma.clone(),
                    pos: "VERB".to_string(),
                    tag: "VBZ".to_string(),
                    morph: features(&[("Number", "Sing"), ("Person", "3"), ("Tense", "Pres")]),
                });
            }
            if entry.pos.eq_ignore_ascii_case("noun") {
                return Some(TaggerAnalysis {
                    lemma: entry.lemma.clone(),
                    pos: "NOUN".to_string(),
                    tag: "NNS".to_string(),
                    morph: features(&[("Number", "Plur")]),
                });
            }
        }

        None
    }

    /// Base lookup for -ing/-ed forms: plain stem, restored final e, or an
    /// undoubled final consonant ("running" -> "runn" -> "run")
    fn verb_base(&self, stripped: &str) -> Option<&LexiconEntry> {
        let mut candidates = vec![stripped.to_string(), format!("{stripped}e")];
        let bytes = stripped.as_bytes();
        if bytes.len() >= 3 && bytes[bytes.len() - 1] == bytes[bytes.len() - 2] {
            candidates.push(stripped[..stripped.len() - 1].to_string());
        }

        candidates.into_iter().find_map(|candidate| {
            self.words
                .get(&candidate)
                .filter(|entry| entry.pos.eq_ignore_ascii_case("verb"))
        })
    }
}
