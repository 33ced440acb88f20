//! Preset table and blacklist as one explicit value.
//!
//! Every run threads a [`Vocabulary`] into the assignment engine instead of
//! reading module-level tables, so callers can extend, replace, or empty it
//! without touching shared state.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::Config;
use crate::dictionaries::blacklist::BLACKLIST;
use crate::dictionaries::presets::PRESET_ABBREVIATIONS;

/// Presets and reserved strings for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    presets: BTreeMap<String, String>,
    blacklist: BTreeSet<String>,
}

impl Vocabulary {
    /// A vocabulary with no presets and nothing reserved.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in preset table and blacklist.
    pub fn builtin() -> Self {
        Self::empty()
            .with_presets(
                PRESET_ABBREVIATIONS
                    .iter()
                    .map(|(phrase, abbrev)| ((*phrase).to_string(), (*abbrev).to_string())),
            )
            .with_blacklist(BLACKLIST.iter().map(|s| (*s).to_string()))
    }

    /// Build the vocabulary a configuration asks for.
    ///
    /// Starts from [`Vocabulary::builtin`] unless `builtin_presets` is off,
    /// then layers the configured presets (same phrase wins) and extra
    /// reserved strings on top.
    pub fn from_config(config: &Config) -> Self {
        let base = if config.builtin_presets {
            Self::builtin()
        } else {
            Self::empty()
        };
        base.with_presets(config.presets.clone().unwrap_or_default())
            .with_blacklist(config.blacklist.clone().unwrap_or_default())
    }

    /// Add presets, replacing any existing entry for the same phrase.
    ///
    /// Preset abbreviations stay distinct and unreserved: a preset whose
    /// abbreviation is blacklisted is dropped, and a preset that reuses an
    /// abbreviation evicts the phrase that held it. Both cases are logged.
    pub fn with_presets<I>(mut self, presets: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (phrase, abbrev) in presets {
            if self.blacklist.contains(&abbrev) {
                tracing::warn!(%phrase, %abbrev, "preset abbreviation is reserved, dropping preset");
                continue;
            }
            let holder = self
                .presets
                .iter()
                .find(|(p, a)| **a == abbrev && **p != phrase)
                .map(|(p, _)| p.clone());
            if let Some(holder) = holder {
                tracing::warn!(%phrase, %abbrev, replaced = %holder, "preset abbreviation already taken");
                self.presets.remove(&holder);
            }
            self.presets.insert(phrase, abbrev);
        }
        self
    }

    /// Add reserved strings, dropping any preset that uses one.
    pub fn with_blacklist<I>(mut self, reserved: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        for entry in reserved {
            self.presets.retain(|phrase, abbrev| {
                let keep = *abbrev != entry;
                if !keep {
                    tracing::warn!(%phrase, %abbrev, "preset abbreviation is reserved, dropping preset");
                }
                keep
            });
            self.blacklist.insert(entry);
        }
        self
    }

    /// The preset phrase → abbreviation table.
    pub const fn presets(&self) -> &BTreeMap<String, String> {
        &self.presets
    }

    /// The reserved strings.
    pub const fn blacklist(&self) -> &BTreeSet<String> {
        &self.blacklist
    }

    /// Whether `candidate` is reserved.
    pub fn is_blacklisted(&self, candidate: &str) -> bool {
        self.blacklist.contains(candidate)
    }
}
