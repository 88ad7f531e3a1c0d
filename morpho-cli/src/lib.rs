//! Morpho CLI library
//!
//! Command-line surface for the morpho English morphological analyzer:
//! argument parsing, the collaborator analyzers (lexicon tagger and
//! WordNet-style sense lookup), and output formatting.

pub mod analyzers;
pub mod commands;
pub mod error;
pub mod output;

pub use error::{CliError, CliResult};
