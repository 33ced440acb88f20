//! Phrase ranking by estimated typing savings.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ngrams::NgramCounts;

/// N-grams seen this many times or fewer are treated as noise.
pub const DEFAULT_MIN_COUNT: usize = 3;

/// Abbreviation length assumed when estimating savings.
pub const ASSUMED_ABBREVIATION_LEN: usize = 2;

/// A phrase worth abbreviating, with its estimated savings.
///
/// Field order matters: the derived ordering compares `score`, then
/// `phrase`, then `len`, then `count`, which is the ranking tie-break.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub struct RankedPhrase {
    /// Characters saved if every occurrence were abbreviated.
    pub score: usize,
    /// Space-joined phrase text.
    pub phrase: String,
    /// Phrase length in characters.
    pub len: usize,
    /// Occurrences in the corpus.
    pub count: usize,
}

impl RankedPhrase {
    /// Score a phrase from its text and occurrence count.
    pub fn new(phrase: impl Into<String>, count: usize) -> Self {
        let phrase = phrase.into();
        let len = phrase.chars().count();
        Self {
            score: savings_score(len, count),
            phrase,
            len,
            count,
        }
    }
}

/// Estimated characters saved: `(len - 2) * count`.
pub const fn savings_score(len: usize, count: usize) -> usize {
    len.saturating_sub(ASSUMED_ABBREVIATION_LEN) * count
}

/// Top `top_k` phrases by savings, best first, using [`DEFAULT_MIN_COUNT`].
pub fn rank_phrases(counts: &NgramCounts, top_k: usize) -> Vec<RankedPhrase> {
    rank_phrases_with_min_count(counts, top_k, DEFAULT_MIN_COUNT)
}

/// Top `top_k` phrases by savings, discarding n-grams seen `min_count`
/// times or fewer and phrases shorter than two characters.
///
/// Ties on score fall back to phrase text descending, so the result is
/// deterministic regardless of hash-map iteration order.
#[tracing::instrument(skip(counts), fields(ngrams = counts.len()))]
pub fn rank_phrases_with_min_count(
    counts: &NgramCounts,
    top_k: usize,
    min_count: usize,
) -> Vec<RankedPhrase> {
    let mut ranked: Vec<RankedPhrase> = counts
        .iter()
        .filter(|(_, count)| *count > min_count)
        .map(|(tokens, count)| RankedPhrase::new(tokens.join(" "), count))
        .filter(|p| p.len >= 2)
        .collect();

    ranked.sort_unstable_by(|a, b| b.cmp(a));
    ranked.truncate(top_k);

    tracing::debug!(kept = ranked.len(), "ranked phrases");
    ranked
}
