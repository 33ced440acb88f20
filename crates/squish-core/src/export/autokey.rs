//! AutoKey phrase export.
//!
//! AutoKey stores each phrase as two files in a folder: `<name>.txt` holding
//! the expansion text and a hidden `.<name>.json` holding its settings.

use std::collections::HashSet;

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;

use crate::error::{ExportError, ExportResult};

/// Characters AutoKey treats as part of a word when matching abbreviations.
const WORD_CHARS: &str = r"[\w']";

/// Settings file for one AutoKey phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhraseConfig {
    usage_count: u32,
    omit_trigger: bool,
    prompt: bool,
    description: String,
    abbreviation: AbbreviationSettings,
    hotkey: HotkeySettings,
    modes: Vec<u8>,
    show_in_tray_menu: bool,
    match_case: bool,
    filter: WindowFilter,
    #[serde(rename = "type")]
    kind: &'static str,
    send_mode: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
struct AbbreviationSettings {
    word_chars: &'static str,
    abbreviations: Vec<String>,
    immediate: bool,
    ignore_case: bool,
    backspace: bool,
    trigger_inside: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
struct HotkeySettings {
    hot_key: Option<String>,
    modifiers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
struct WindowFilter {
    regex: Option<String>,
    is_recursive: bool,
}

impl PhraseConfig {
    /// Settings for expanding `abbreviation` into `phrase`.
    ///
    /// Triggers on a word boundary, ignores case when matching, and
    /// optionally only fires in windows whose class matches `window_filter`.
    pub fn new(phrase: &str, abbreviation: &str, window_filter: Option<&str>) -> Self {
        Self {
            usage_count: 0,
            omit_trigger: false,
            prompt: false,
            description: phrase.to_string(),
            abbreviation: AbbreviationSettings {
                word_chars: WORD_CHARS,
                abbreviations: vec![abbreviation.to_string()],
                immediate: false,
                ignore_case: true,
                backspace: true,
                trigger_inside: false,
            },
            hotkey: HotkeySettings {
                hot_key: None,
                modifiers: Vec::new(),
            },
            modes: vec![1],
            show_in_tray_menu: false,
            match_case: true,
            filter: WindowFilter {
                regex: window_filter.map(str::to_string),
                is_recursive: false,
            },
            kind: "phrase",
            send_mode: "kb",
        }
    }
}

/// Paths written for one phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseFiles {
    /// The expansion text file.
    pub text: Utf8PathBuf,
    /// The hidden settings file.
    pub config: Utf8PathBuf,
}

/// File stem for a phrase; path separators become underscores.
pub fn file_stem(phrase: &str) -> String {
    phrase.replace(['/', '\\'], "_")
}

/// Claim a file stem not yet in `taken`, suffixing `_2`, `_3`, ... when
/// two phrases map to the same name.
fn unique_stem(taken: &mut HashSet<String>, phrase: &str) -> String {
    let base = file_stem(phrase);
    let mut stem = base.clone();
    let mut n = 2;
    while !taken.insert(stem.clone()) {
        stem = format!("{base}_{n}");
        n += 1;
    }
    if stem != base {
        tracing::debug!(%phrase, %stem, "file name already used, renamed");
    }
    stem
}

/// Write the text and settings files for one phrase into `dir`.
pub fn write_phrase(
    dir: &Utf8Path,
    phrase: &str,
    abbreviation: &str,
    window_filter: Option<&str>,
) -> ExportResult<PhraseFiles> {
    write_phrase_as(dir, &file_stem(phrase), phrase, abbreviation, window_filter)
}

fn write_phrase_as(
    dir: &Utf8Path,
    stem: &str,
    phrase: &str,
    abbreviation: &str,
    window_filter: Option<&str>,
) -> ExportResult<PhraseFiles> {
    let io_err = |path: &Utf8Path| {
        let path = path.to_path_buf();
        move |source| ExportError::Io { path, source }
    };

    std::fs::create_dir_all(dir).map_err(io_err(dir))?;

    let text = dir.join(format!("{stem}.txt"));
    let config = dir.join(format!(".{stem}.json"));

    std::fs::write(&text, phrase).map_err(io_err(&text))?;

    let settings = PhraseConfig::new(phrase, abbreviation, window_filter);
    let json = serde_json::to_string_pretty(&settings).map_err(|source| ExportError::Json {
        path: config.clone(),
        source,
    })?;
    std::fs::write(&config, json).map_err(io_err(&config))?;

    Ok(PhraseFiles { text, config })
}

/// Write AutoKey files for every `(phrase, abbreviation)` pair.
///
/// Phrases whose file names collide get numbered suffixes, so no pair
/// overwrites another.
#[tracing::instrument(skip(shortcuts), fields(dir = %dir))]
pub fn write_phrases<'a, I>(
    dir: &Utf8Path,
    shortcuts: I,
    window_filter: Option<&str>,
) -> ExportResult<Vec<PhraseFiles>>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut taken = HashSet::new();
    let written = shortcuts
        .into_iter()
        .map(|(phrase, abbrev)| {
            let stem = unique_stem(&mut taken, phrase);
            write_phrase_as(dir, &stem, phrase, abbrev, window_filter)
        })
        .collect::<ExportResult<Vec<_>>>()?;
    tracing::info!(count = written.len(), "autokey phrases written");
    Ok(written)
}
