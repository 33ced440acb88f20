//! N-gram counting over a corpus of lines.

use std::collections::HashMap;

/// Frequency of every contiguous token sequence of length `1..=max_n`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NgramCounts {
    counts: HashMap<Vec<String>, usize>,
    max_n: usize,
    total_lines: usize,
}

impl NgramCounts {
    /// Occurrences of a token sequence.
    pub fn get(&self, tokens: &[String]) -> usize {
        self.counts.get(tokens).copied().unwrap_or(0)
    }

    /// Occurrences of a space-joined phrase.
    pub fn phrase_count(&self, phrase: &str) -> usize {
        let key: Vec<String> = phrase.split_whitespace().map(str::to_string).collect();
        self.get(&key)
    }

    /// Iterate over `(tokens, count)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&[String], usize)> {
        self.counts.iter().map(|(k, v)| (k.as_slice(), *v))
    }

    /// Number of distinct n-grams.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True when no n-gram was counted.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The longest n-gram length that was counted.
    pub const fn max_n(&self) -> usize {
        self.max_n
    }

    /// Number of input lines seen, including empty ones.
    pub const fn total_lines(&self) -> usize {
        self.total_lines
    }
}

/// Count n-grams of every length from 1 to `max_n` across all lines.
///
/// Lines are split on whitespace; empty lines contribute nothing. The result
/// does not depend on line order.
#[tracing::instrument(skip(lines))]
pub fn count_ngrams<I, S>(lines: I, max_n: usize) -> NgramCounts
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts: HashMap<Vec<String>, usize> = HashMap::new();
    let mut total_lines = 0;

    for line in lines {
        total_lines += 1;
        let tokens: Vec<String> = line
            .as_ref()
            .split_whitespace()
            .map(str::to_string)
            .collect();

        for n in 1..=max_n {
            if tokens.len() < n {
                break;
            }
            for window in tokens.windows(n) {
                *counts.entry(window.to_vec()).or_insert(0) += 1;
            }
        }
    }

    tracing::debug!(distinct = counts.len(), total_lines, "counted n-grams");
    NgramCounts {
        counts,
        max_n,
        total_lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(s: &str) -> Vec<String> {
        s.split(' ').map(str::to_string).collect()
    }

    #[test]
    fn counts_all_lengths_in_one_structure() {
        let counts = count_ngrams(["the cat sat"], 3);
        assert_eq!(counts.get(&toks("the")), 1);
        assert_eq!(counts.get(&toks("the cat")), 1);
        assert_eq!(counts.get(&toks("the cat sat")), 1);
        assert_eq!(counts.len(), 6);
    }

    #[test]
    fn repeated_windows_accumulate() {
        let counts = count_ngrams(["in the robots in the", "in the"], 2);
        assert_eq!(counts.phrase_count("in the"), 3);
        assert_eq!(counts.phrase_count("in"), 3);
        assert_eq!(counts.phrase_count("robots in"), 1);
    }

    #[test]
    fn windows_do_not_span_lines() {
        let counts = count_ngrams(["hello", "world"], 2);
        assert_eq!(counts.phrase_count("hello world"), 0);
    }

    #[test]
    fn empty_lines_contribute_nothing() {
        let counts = count_ngrams(["", "   "], 4);
        assert!(counts.is_empty());
        assert_eq!(counts.total_lines(), 2);
    }

    #[test]
    fn max_n_zero_counts_nothing() {
        let counts = count_ngrams(["a b c"], 0);
        assert!(counts.is_empty());
    }

    #[test]
    fn line_order_does_not_matter() {
        let a = count_ngrams(["x y z", "y z", "z"], 3);
        let b = count_ngrams(["z", "x y z", "y z"], 3);
        assert_eq!(a, b);
    }

    #[test]
    fn whitespace_runs_are_one_separator() {
        let counts = count_ngrams(["a   b\tc"], 2);
        assert_eq!(counts.phrase_count("a b"), 1);
        assert_eq!(counts.phrase_count("b c"), 1);
    }
}
