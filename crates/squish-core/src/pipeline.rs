//! End-to-end synthesis: count, rank, assign.

use crate::assignment::{AssignmentOutcome, Registry, assign_abbreviations};
use crate::config::{Config, DEFAULT_MAX_NGRAM, DEFAULT_TOP_K};
use crate::export::{Shortcut, summarize};
use crate::ngrams::{NgramCounts, count_ngrams};
use crate::ranking::{DEFAULT_MIN_COUNT, RankedPhrase, rank_phrases_with_min_count};
use crate::vocabulary::Vocabulary;

/// Tuning knobs for one synthesis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynthesisParams {
    /// Longest phrase, in words.
    pub max_ngram: usize,
    /// Ranked phrases handed to assignment.
    pub top_k: usize,
    /// Phrases seen this many times or fewer are dropped.
    pub min_count: usize,
}

impl Default for SynthesisParams {
    fn default() -> Self {
        Self {
            max_ngram: DEFAULT_MAX_NGRAM,
            top_k: DEFAULT_TOP_K,
            min_count: DEFAULT_MIN_COUNT,
        }
    }
}

impl SynthesisParams {
    /// Parameters taken from a loaded configuration.
    pub const fn from_config(config: &Config) -> Self {
        Self {
            max_ngram: config.max_ngram,
            top_k: config.top_k,
            min_count: config.min_count,
        }
    }
}

/// Everything one run produced.
#[derive(Debug, Clone)]
pub struct Synthesis {
    /// N-gram frequencies of the corpus.
    pub counts: NgramCounts,
    /// Phrases considered for abbreviation, best first.
    pub ranked: Vec<RankedPhrase>,
    /// Final phrase → abbreviation mapping, presets included.
    pub registry: Registry,
    /// Per-phrase assignment results.
    pub outcome: AssignmentOutcome,
}

impl Synthesis {
    /// True when the corpus contributed no n-grams.
    pub fn is_empty_corpus(&self) -> bool {
        self.counts.is_empty()
    }

    /// Registry entries with corpus statistics, lowest score first.
    pub fn shortcuts(&self) -> Vec<Shortcut> {
        summarize(self.registry.entries(), &self.counts)
    }
}

/// Run the whole engine over normalized corpus lines.
///
/// An empty corpus is not an error: the result holds only the presets.
#[tracing::instrument(skip(lines, vocab))]
pub fn synthesize<I, S>(lines: I, params: &SynthesisParams, vocab: &Vocabulary) -> Synthesis
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let counts = count_ngrams(lines, params.max_ngram);
    if counts.is_empty() {
        tracing::warn!("corpus is empty; only presets will be emitted");
    }

    let ranked = rank_phrases_with_min_count(&counts, params.top_k, params.min_count);
    let (registry, outcome) = assign_abbreviations(&ranked, vocab);

    tracing::info!(
        ngrams = counts.len(),
        ranked = ranked.len(),
        shortcuts = registry.len(),
        skipped = outcome.skipped.len(),
        "synthesis complete"
    );

    Synthesis {
        counts,
        ranked,
        registry,
        outcome,
    }
}
