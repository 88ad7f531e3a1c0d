//! Collaborator analyzers
//!
//! These sit outside the aggregation core: each is a black box that either
//! returns an analysis or fails with a marker the aggregator treats as a
//! degraded source. The pipeline never retries a failed collaborator.

pub mod tagger;
pub mod wordnet;

pub use tagger::{LexiconTagger, TaggerError};
pub use wordnet::{WordnetError, WordnetLookup};
