//! Reuse existing abbreviations for phrases outside the ranked list.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How a phrase was matched against existing abbreviations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// The phrase is an existing key plus a trailing `s`.
    Plural,
    /// Every word of the phrase is an existing key.
    Composite,
}

/// A derived abbreviation and the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PriorMatch {
    /// The derived abbreviation.
    pub abbreviation: String,
    /// Which rule matched.
    pub kind: MatchKind,
}

/// Derive an abbreviation for `phrase` from an existing mapping.
///
/// Tries, in order:
/// 1. plural: `robots` with `robot → r` gives `rs`;
/// 2. composite: `the robot` with `the → t` and `robot → r` gives `tr`
///    (first character of each word's abbreviation).
///
/// A composite needs at least two words, so a phrase that is itself a
/// single existing key (`robot`) yields `None` rather than its own initial.
///
/// Returns `None` when neither applies. That is an ordinary answer, not an
/// error; the caller decides whether to fall back to candidate generation.
/// The result is not checked against other abbreviations in `mapping`.
pub fn match_previous(mapping: &BTreeMap<String, String>, phrase: &str) -> Option<PriorMatch> {
    if let Some(abbrev) = phrase.strip_suffix('s').and_then(|base| mapping.get(base)) {
        return Some(PriorMatch {
            abbreviation: format!("{abbrev}s"),
            kind: MatchKind::Plural,
        });
    }

    let words: Vec<&str> = phrase.split_whitespace().collect();
    if words.len() < 2 {
        return None;
    }

    let abbreviation = words
        .iter()
        .map(|word| mapping.get(*word).and_then(|abbrev| abbrev.chars().next()))
        .collect::<Option<String>>()?;

    Some(PriorMatch {
        abbreviation,
        kind: MatchKind::Composite,
    })
}
