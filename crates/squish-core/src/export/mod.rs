//! Turning a registry into files people and expansion tools can use.
//!
//! - [`summarize`] attaches corpus statistics to each shortcut
//! - [`shortcuts_document`] builds the phrase → abbreviation document
//! - [`write_yaml`] / [`read_yaml`] persist it
//! - [`autokey`] writes per-shortcut AutoKey phrase files

pub mod autokey;

use std::collections::BTreeMap;

use camino::Utf8Path;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{ExportError, ExportResult};
use crate::ngrams::NgramCounts;

/// A phrase, its abbreviation, and how much typing it saves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Shortcut {
    /// The full phrase.
    pub phrase: String,
    /// What to type instead.
    pub abbreviation: String,
    /// Characters saved across the corpus: `count * (len - abbreviation len)`.
    pub score: usize,
    /// Occurrences of the phrase in the corpus.
    pub count: usize,
    /// Phrase length in characters.
    pub len: usize,
}

impl Shortcut {
    /// Build a shortcut, computing its savings from `count`.
    pub fn new(phrase: &str, abbreviation: &str, count: usize) -> Self {
        let len = phrase.chars().count();
        let saved = len.saturating_sub(abbreviation.chars().count());
        Self {
            phrase: phrase.to_string(),
            abbreviation: abbreviation.to_string(),
            score: count * saved,
            count,
            len,
        }
    }
}

/// Attach corpus counts to every registry entry, lowest score first.
///
/// Presets that never occur in the corpus get a count and score of zero.
pub fn summarize(entries: &BTreeMap<String, String>, counts: &NgramCounts) -> Vec<Shortcut> {
    let mut shortcuts: Vec<Shortcut> = entries
        .iter()
        .map(|(phrase, abbrev)| Shortcut::new(phrase, abbrev, counts.phrase_count(phrase)))
        .collect();
    shortcuts.sort_by(|a, b| (a.score, &a.phrase).cmp(&(b.score, &b.phrase)));
    shortcuts
}

/// Restore capitalization and apostrophes lost during normalization.
pub fn fix_grammar(text: &str) -> String {
    text.split(' ')
        .map(|word| match word {
            "i" => "I",
            "dont" => "don't",
            "doesnt" => "doesn't",
            other => other,
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// The phrase → abbreviation document, optionally with grammar restored.
pub fn shortcuts_document(shortcuts: &[Shortcut], fix: bool) -> BTreeMap<String, String> {
    shortcuts
        .iter()
        .map(|s| {
            let phrase = if fix {
                fix_grammar(&s.phrase)
            } else {
                s.phrase.clone()
            };
            (phrase, s.abbreviation.clone())
        })
        .collect()
}

/// Write a shortcut document as YAML, creating parent directories.
#[tracing::instrument(skip(document), fields(entries = document.len()))]
pub fn write_yaml(path: &Utf8Path, document: &BTreeMap<String, String>) -> ExportResult<()> {
    let yaml = serde_yaml::to_string(document).map_err(|source| ExportError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|source| ExportError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, yaml).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path, "shortcuts written");
    Ok(())
}

/// Read a phrase → abbreviation document written by [`write_yaml`].
pub fn read_yaml(path: &Utf8Path) -> ExportResult<BTreeMap<String, String>> {
    let content = std::fs::read_to_string(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&content).map_err(|source| ExportError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ngrams::count_ngrams;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    #[test]
    fn fix_grammar_restores_common_words() {
        assert_eq!(fix_grammar("i dont know"), "I don't know");
        assert_eq!(fix_grammar("it doesnt matter"), "it doesn't matter");
        assert_eq!(fix_grammar("inside"), "inside");
    }

    #[test]
    fn shortcut_score_uses_actual_abbreviation() {
        let s = Shortcut::new("because", "bc", 10);
        assert_eq!(s.len, 7);
        assert_eq!(s.score, 50);
    }

    #[test]
    fn summarize_sorts_lowest_score_first() {
        let counts = count_ngrams(["good morning", "good morning", "robots"], 2);
        let entries = BTreeMap::from([
            ("good morning".to_string(), "gm".to_string()),
            ("robots".to_string(), "rs".to_string()),
            ("never seen".to_string(), "ns".to_string()),
        ]);
        let summary = summarize(&entries, &counts);
        let phrases: Vec<_> = summary.iter().map(|s| s.phrase.as_str()).collect();
        assert_eq!(phrases, vec!["never seen", "robots", "good morning"]);
        assert_eq!(summary[0].score, 0);
        assert_eq!(summary[2].score, 20);
    }

    #[test]
    fn document_applies_grammar_fix_to_keys_only() {
        let shortcuts = vec![Shortcut::new("i dont know", "idk", 4)];
        let fixed = shortcuts_document(&shortcuts, true);
        assert_eq!(fixed.get("I don't know").map(String::as_str), Some("idk"));
        let raw = shortcuts_document(&shortcuts, false);
        assert!(raw.contains_key("i dont know"));
    }

    #[test]
    fn yaml_round_trip_creates_directories() {
        let tmp = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("output/shortcuts.yaml")).unwrap();
        let document = BTreeMap::from([
            ("because".to_string(), "bc".to_string()),
            ("in the robots".to_string(), "itr".to_string()),
        ]);

        write_yaml(&path, &document).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("because: bc"));
        assert_eq!(read_yaml(&path).unwrap(), document);
    }

    #[test]
    fn read_yaml_reports_missing_file() {
        let err = read_yaml(Utf8Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
    }
}
