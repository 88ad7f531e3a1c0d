//! Suffix dictionary model and load-once store
//!
//! The dictionary is a read-only JSON document with a top-level `suffixes`
//! mapping from pattern (written with a leading `-` marker) to entry, plus an
//! optional `metadata` block. Loading goes through [`DictionaryStore`], which
//! caches one immutable snapshot per resolved path so that concurrent readers
//! never contend after the first load.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// POS annotation of a suffix entry
///
/// Most suffixes carry a single tag; category-ambiguous ones ("-er" forms
/// agent nouns and comparatives) carry an ordered list, most likely first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PosSpec {
    /// Unambiguous suffix
    Single(String),
    /// Ambiguous suffix, most likely tag first
    Ambiguous(Vec<String>),
}

impl PosSpec {
    /// First (most likely) tag, if any
    pub fn primary(&self) -> Option<&str> {
        match self {
            PosSpec::Single(tag) => Some(tag.as_str()),
            PosSpec::Ambiguous(tags) => tags.first().map(String::as_str),
        }
    }
}

/// One row of the suffix dictionary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuffixEntry {
    /// POS of words formed with this suffix
    #[serde(default)]
    pub pos: Option<PosSpec>,
    /// POS of the stem before suffixation (zero or more tags)
    #[serde(default)]
    pub source_pos: Vec<String>,
    /// Free-form classification ("derivational", "inflectional", ...)
    #[serde(default)]
    pub category: Option<String>,
    /// Human description of what the suffix contributes
    #[serde(default)]
    pub meaning: Option<String>,
    /// Example words carrying the suffix
    #[serde(default)]
    pub examples: Vec<String>,
    /// Corpus occurrence count
    #[serde(default)]
    pub frequency: u64,
}

/// Optional provenance block of a dictionary file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DictionaryMetadata {
    /// Dictionary format or release version
    #[serde(default)]
    pub version: Option<String>,
    /// Where the entries were collected from
    #[serde(default)]
    pub source: Option<String>,
    /// Declared entry count
    #[serde(default)]
    pub count: Option<u64>,
}

/// An immutable suffix dictionary
///
/// Pattern uniqueness is inherent in the map key. The map is never mutated
/// after deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuffixDictionary {
    /// Pattern to entry; patterns keep their leading marker
    #[serde(default)]
    pub suffixes: BTreeMap<String, SuffixEntry>,
    /// Provenance, if the file carries it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<DictionaryMetadata>,
}

impl SuffixDictionary {
    /// Parse a dictionary from a JSON string
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Number of suffix patterns
    pub fn len(&self) -> usize {
        self.suffixes.len()
    }

    /// True when the dictionary has no patterns
    pub fn is_empty(&self) -> bool {
        self.suffixes.is_empty()
    }
}

/// Outcome of loading a dictionary path
///
/// A missing file is a valid state every lookup degrades through, not an
/// error; only an unreadable or malformed file fails the load.
#[derive(Debug)]
pub enum DictionaryState {
    /// Parsed dictionary
    Loaded(SuffixDictionary),
    /// File was absent at load time
    Missing,
}

impl DictionaryState {
    /// The dictionary, when one was loaded
    pub fn dictionary(&self) -> Option<&SuffixDictionary> {
        match self {
            DictionaryState::Loaded(dictionary) => Some(dictionary),
            DictionaryState::Missing => None,
        }
    }
}

/// Load-once dictionary cache keyed by resolved file path
///
/// Constructed once at process start and passed by handle wherever a
/// segmenter needs a dictionary. Each key is populated at most once; later
/// readers share the same `Arc` snapshot, so concurrent reads are free of
/// write contention.
#[derive(Debug, Default)]
pub struct DictionaryStore {
    cache: RwLock<HashMap<PathBuf, Arc<DictionaryState>>>,
}

impl DictionaryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the dictionary at `path`, or return the cached snapshot
    ///
    /// A missing file yields [`DictionaryState::Missing`] and is cached like
    /// any other outcome. A file that exists but fails to read or parse is a
    /// hard error and is not cached, so a fixed file can be loaded later.
    pub fn load(&self, path: &Path) -> Result<Arc<DictionaryState>> {
        let key = resolve_key(path);

        {
            let cache = self.cache.read().expect("dictionary cache poisoned");
            if let Some(state) = cache.get(&key) {
                return Ok(Arc::clone(state));
            }
        }

        let state = Arc::new(read_state(path)?);
        let mut cache = self.cache.write().expect("dictionary cache poisoned");
        // A racing loader may have populated the key first; keep its snapshot.
        let entry = cache.entry(key).or_insert(state);
        Ok(Arc::clone(entry))
    }

    /// Number of distinct paths cached so far
    pub fn cached_paths(&self) -> usize {
        self.cache.read().expect("dictionary cache poisoned").len()
    }
}

/// Cache key: canonical path when the file exists, the given path otherwise
fn resolve_key(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

fn read_state(path: &Path) -> Result<DictionaryState> {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Ok(DictionaryState::Missing);
        }
        Err(err) => {
            return Err(CoreError::Io {
                path: path.display().to_string(),
                source: err,
            });
        }
    };

    let dictionary =
        SuffixDictionary::from_json(&json).map_err(|source| CoreError::DictionaryFormat {
            path: path.display().to_string(),
            source,
        })?;
    Ok(DictionaryState::Loaded(dictionary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "metadata": {"version": "1.0", "source": "unit test", "count": 2},
        "suffixes": {
            "-ness": {
                "pos": "noun",
                "source_pos": ["adjective"],
                "category": "derivational",
                "meaning": "state or quality of",
                "examples": ["happiness", "darkness", "kindness", "fitness"],
                "frequency": 100
            },
            "-er": {
                "pos": ["noun", "adjective"],
                "frequency": 10
            }
        }
    }"#;

    #[test]
    fn parses_single_and_ambiguous_pos() {
        let dictionary = SuffixDictionary::from_json(SAMPLE).unwrap();
        assert_eq!(dictionary.len(), 2);

        let ness = &dictionary.suffixes["-ness"];
        assert_eq!(ness.pos, Some(PosSpec::Single("noun".to_string())));
        assert_eq!(ness.pos.as_ref().unwrap().primary(), Some("noun"));

        let er = &dictionary.suffixes["-er"];
        assert_eq!(
            er.pos,
            Some(PosSpec::Ambiguous(vec![
                "noun".to_string(),
                "adjective".to_string()
            ]))
        );
        assert_eq!(er.pos.as_ref().unwrap().primary(), Some("noun"));
    }

    #[test]
    fn missing_entry_fields_default() {
        let dictionary = SuffixDictionary::from_json(SAMPLE).unwrap();
        let er = &dictionary.suffixes["-er"];
        assert!(er.source_pos.is_empty());
        assert!(er.category.is_none());
        assert!(er.meaning.is_none());
        assert!(er.examples.is_empty());
        assert_eq!(er.frequency, 10);
    }

    #[test]
    fn metadata_is_optional() {
        let dictionary = SuffixDictionary::from_json(r#"{"suffixes": {}}"#).unwrap();
        assert!(dictionary.metadata.is_none());
        assert!(dictionary.is_empty());
    }

    #[test]
    fn store_caches_loaded_dictionary() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let store = DictionaryStore::new();
        let first = store.load(file.path()).unwrap();
        let second = store.load(file.path()).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(store.cached_paths(), 1);
        assert_eq!(first.dictionary().unwrap().len(), 2);
    }

    #[test]
    fn store_caches_missing_file_as_valid_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nonexistent.json");

        let store = DictionaryStore::new();
        let state = store.load(&path).unwrap();
        assert!(state.dictionary().is_none());
        assert!(matches!(*state, DictionaryState::Missing));

        // Second load hits the cache, still the degraded state.
        let again = store.load(&path).unwrap();
        assert!(Arc::ptr_eq(&state, &again));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{not json").unwrap();

        let store = DictionaryStore::new();
        let err = store.load(file.path()).unwrap_err();
        assert!(matches!(err, CoreError::DictionaryFormat { .. }));
        // Parse failures are not cached.
        assert_eq!(store.cached_paths(), 0);
    }
}
