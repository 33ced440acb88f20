//! Conflict-free abbreviation assignment.
//!
//! The [`Registry`] starts from the preset table and walks ranked phrases
//! best-first, giving each one the first candidate that is still free and
//! saves at least two characters. Higher-value phrases therefore get first
//! pick of the short, memorable abbreviations.
//!
//! This is a greedy first-fit walk, not an optimal matching: a low-ranked
//! phrase can go without an abbreviation that a different order would have
//! found. Output is deterministic for a given ranked list and vocabulary.

use std::collections::{BTreeMap, HashSet};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::candidates::possible_abbreviations;
use crate::matcher::{PriorMatch, match_previous};
use crate::ranking::RankedPhrase;
use crate::vocabulary::Vocabulary;

/// Minimum number of characters an abbreviation must save.
pub const MIN_SAVINGS: usize = 2;

/// Whether `abbreviation` is short enough to be worth typing instead of `phrase`.
pub fn saves_enough(abbreviation: &str, phrase: &str) -> bool {
    abbreviation.chars().count() + MIN_SAVINGS <= phrase.chars().count()
}

/// Phrase → abbreviation mapping with pairwise distinct abbreviations.
///
/// Entries are only ever added. Once a phrase is present its abbreviation
/// does not change, and no abbreviation is handed out twice or taken from
/// the blacklist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    entries: BTreeMap<String, String>,
    used: HashSet<String>,
}

/// What happened to each ranked phrase during [`Registry::assign`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AssignmentOutcome {
    /// Phrases that received a derived abbreviation, in rank order.
    pub assigned: Vec<String>,
    /// Ranked phrases already covered by a preset.
    pub preset: Vec<String>,
    /// Ranked phrases left without an abbreviation.
    pub skipped: Vec<RankedPhrase>,
}

/// Result of [`Registry::extend_with_matches`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionOutcome {
    /// Phrases added, with how they matched.
    pub added: Vec<(String, PriorMatch)>,
    /// Phrases that matched but would break a registry invariant.
    pub rejected: Vec<(String, PriorMatch)>,
    /// Phrases with no match at all.
    pub unmatched: Vec<String>,
}

impl Registry {
    /// A registry holding the vocabulary's presets, with every preset
    /// abbreviation and every blacklisted string marked as used.
    pub fn seeded(vocab: &Vocabulary) -> Self {
        let entries = vocab.presets().clone();
        let used = vocab
            .blacklist()
            .iter()
            .chain(entries.values())
            .cloned()
            .collect();
        Self { entries, used }
    }

    /// Assign abbreviations to ranked phrases, best first.
    ///
    /// Phrases already present (presets) are left untouched. A phrase with
    /// no free, short-enough candidate is skipped with a warning and the
    /// walk continues.
    #[tracing::instrument(skip_all, fields(ranked = ranked.len()))]
    pub fn assign(&mut self, ranked: &[RankedPhrase]) -> AssignmentOutcome {
        let mut outcome = AssignmentOutcome::default();

        for row in ranked {
            if self.entries.contains_key(&row.phrase) {
                outcome.preset.push(row.phrase.clone());
                continue;
            }

            let choice = possible_abbreviations(&row.phrase)
                .into_iter()
                .find(|abbrev| self.is_available(abbrev) && saves_enough(abbrev, &row.phrase));

            match choice {
                Some(abbrev) => {
                    tracing::trace!(phrase = %row.phrase, abbrev = %abbrev, "assigned");
                    self.insert(row.phrase.clone(), abbrev);
                    outcome.assigned.push(row.phrase.clone());
                }
                None => {
                    tracing::warn!(phrase = %row.phrase, score = row.score, "no abbreviation available");
                    outcome.skipped.push(row.clone());
                }
            }
        }

        tracing::debug!(
            assigned = outcome.assigned.len(),
            preset = outcome.preset.len(),
            skipped = outcome.skipped.len(),
            "assignment finished"
        );
        outcome
    }

    /// Derive abbreviations for phrases outside the registry by reusing
    /// existing ones (see [`match_previous`]).
    ///
    /// A match is only accepted if its abbreviation is free and saves at
    /// least two characters; phrases already present are ignored.
    #[tracing::instrument(skip_all)]
    pub fn extend_with_matches<I, S>(&mut self, phrases: I) -> ExtensionOutcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut outcome = ExtensionOutcome::default();

        for phrase in phrases {
            let phrase = phrase.as_ref();
            if self.entries.contains_key(phrase) {
                continue;
            }
            match match_previous(&self.entries, phrase) {
                Some(found)
                    if self.is_available(&found.abbreviation)
                        && saves_enough(&found.abbreviation, phrase) =>
                {
                    self.insert(phrase.to_string(), found.abbreviation.clone());
                    outcome.added.push((phrase.to_string(), found));
                }
                Some(found) => {
                    tracing::debug!(phrase, abbrev = %found.abbreviation, "match rejected");
                    outcome.rejected.push((phrase.to_string(), found));
                }
                None => outcome.unmatched.push(phrase.to_string()),
            }
        }

        outcome
    }

    /// Whether `abbreviation` can still be handed out.
    pub fn is_available(&self, abbreviation: &str) -> bool {
        !self.used.contains(abbreviation)
    }

    /// The abbreviation assigned to `phrase`, if any.
    pub fn get(&self, phrase: &str) -> Option<&str> {
        self.entries.get(phrase).map(String::as_str)
    }

    /// All phrase → abbreviation pairs, ordered by phrase.
    pub const fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    /// Consume the registry, keeping only the mapping.
    pub fn into_entries(self) -> BTreeMap<String, String> {
        self.entries
    }

    /// Number of phrases with an abbreviation.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no phrase has an abbreviation.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, phrase: String, abbreviation: String) {
        self.used.insert(abbreviation.clone());
        self.entries.insert(phrase, abbreviation);
    }
}

/// Seed a registry from `vocab` and assign every ranked phrase.
pub fn assign_abbreviations(
    ranked: &[RankedPhrase],
    vocab: &Vocabulary,
) -> (Registry, AssignmentOutcome) {
    let mut registry = Registry::seeded(vocab);
    let outcome = registry.assign(ranked);
    (registry, outcome)
}
