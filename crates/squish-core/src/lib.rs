//! Core library for squish.
//!
//! Derives text-expansion shortcuts from a corpus of typed messages: count
//! n-grams, rank phrases by typing saved, and hand out short, distinct
//! abbreviations best phrase first.
//!
//! # Modules
//!
//! - [`ngrams`] - N-gram frequency counting
//! - [`ranking`] - Savings score and top-k selection
//! - [`candidates`] - Abbreviation candidates for one phrase
//! - [`assignment`] - Greedy conflict-free assignment ([`Registry`])
//! - [`matcher`] - Reusing existing abbreviations for plurals and composites
//! - [`vocabulary`] - Preset table and blacklist
//! - [`corpus`] - Loading and normalizing corpus files
//! - [`export`] - YAML and AutoKey output
//! - [`pipeline`] - The whole run in one call
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use squish_core::{SynthesisParams, Vocabulary, synthesize};
//!
//! let lines = vec!["see you tomorrow"; 10];
//! let result = synthesize(lines, &SynthesisParams::default(), &Vocabulary::builtin());
//! assert!(result.registry.get("see you tomorrow").is_some());
//! ```
#![deny(unsafe_code)]

pub mod assignment;
pub mod candidates;
pub mod config;
pub mod corpus;
pub mod dictionaries;
pub mod error;
pub mod export;
pub mod matcher;
pub mod ngrams;
pub mod pipeline;
pub mod ranking;
pub mod text;
pub mod vocabulary;

/// Default maximum corpus file size in bytes (5 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;

pub use assignment::{AssignmentOutcome, Registry, assign_abbreviations};
pub use candidates::possible_abbreviations;
pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use corpus::{Corpus, CorpusOptions};
pub use error::{ConfigError, ConfigResult, CorpusError, CorpusResult, ExportError, ExportResult};
pub use export::Shortcut;
pub use matcher::{MatchKind, PriorMatch, match_previous};
pub use ngrams::{NgramCounts, count_ngrams};
pub use pipeline::{Synthesis, SynthesisParams, synthesize};
pub use ranking::{RankedPhrase, rank_phrases};
pub use vocabulary::Vocabulary;
