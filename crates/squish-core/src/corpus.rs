//! Corpus loading.
//!
//! Materializes the sequence of normalized lines the engine works on, from
//! a directory tree filtered by file-name regexes, from one user's messages
//! in a Slack workspace export, or from any reader (stdin in the CLI).

use std::collections::HashSet;
use std::io::BufRead;

use camino::{Utf8Path, Utf8PathBuf};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{CorpusError, CorpusResult};
use crate::text::normalize_line;

/// How corpus files are selected and cleaned.
#[derive(Debug, Clone)]
pub struct CorpusOptions {
    patterns: Vec<Regex>,
    strip_markup: bool,
    max_bytes: Option<usize>,
}

impl CorpusOptions {
    /// Compile file-name patterns; a file is read if any pattern matches.
    pub fn new<I, S>(patterns: I) -> CorpusResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| {
                Regex::new(p.as_ref()).map_err(|source| CorpusError::Pattern {
                    pattern: p.as_ref().to_string(),
                    source,
                })
            })
            .collect::<CorpusResult<Vec<_>>>()?;
        Ok(Self {
            patterns,
            strip_markup: true,
            max_bytes: None,
        })
    }

    /// Options matching a loaded configuration.
    pub fn from_config(config: &Config) -> CorpusResult<Self> {
        Ok(Self::new(&config.input_patterns)?
            .with_strip_markup(config.strip_chat_markup)
            .with_max_bytes(config.input_limit()))
    }

    /// Whether to strip chat markup from each line.
    #[must_use]
    pub const fn with_strip_markup(mut self, strip: bool) -> Self {
        self.strip_markup = strip;
        self
    }

    /// Per-file size limit in bytes, or `None` for no limit.
    #[must_use]
    pub const fn with_max_bytes(mut self, max_bytes: Option<usize>) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    fn matches(&self, file_name: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(file_name))
    }
}

/// Normalized corpus lines and where they came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Corpus {
    /// Non-empty normalized lines.
    pub lines: Vec<String>,
    /// Files that were read, in reading order.
    pub files: Vec<Utf8PathBuf>,
}

impl Corpus {
    /// Build a corpus from in-memory text, one message per line.
    pub fn from_text(text: &str, strip_markup: bool) -> Self {
        Self {
            lines: normalize_lines(text.lines(), strip_markup),
            files: Vec::new(),
        }
    }

    /// True when no usable line was found.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Load every matching file under `root`, recursively, in sorted path order.
///
/// Finding no matching file is not an error: a warning is logged and an
/// empty corpus returned.
#[tracing::instrument(skip_all, fields(root = %root))]
pub fn load_directory(root: &Utf8Path, options: &CorpusOptions) -> CorpusResult<Corpus> {
    if !root.is_dir() {
        return Err(CorpusError::MissingDirectory(root.to_path_buf()));
    }

    let mut files = Vec::new();
    collect_files(root, options, &mut files)?;

    if files.is_empty() {
        tracing::warn!(root = %root, "no corpus files matched");
    }

    let mut corpus = Corpus::default();
    for path in files {
        let content = read_corpus_file(&path, options.max_bytes)?;
        corpus
            .lines
            .extend(normalize_lines(content.lines(), options.strip_markup));
        corpus.files.push(path);
    }

    tracing::info!(
        files = corpus.files.len(),
        lines = corpus.lines.len(),
        "corpus loaded"
    );
    Ok(corpus)
}

/// Load a corpus from a reader, one message per line.
///
/// `name` identifies the stream in error messages (e.g. `<stdin>`).
pub fn load_reader<R: BufRead>(
    reader: R,
    name: &str,
    options: &CorpusOptions,
) -> CorpusResult<Corpus> {
    let raw = reader
        .lines()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| CorpusError::Read {
            path: Utf8PathBuf::from(name),
            source,
        })?;
    let lines = normalize_lines(raw.iter().map(String::as_str), options.strip_markup);
    tracing::info!(source = name, lines = lines.len(), "corpus loaded");
    Ok(Corpus {
        lines,
        files: Vec::new(),
    })
}

#[derive(Debug, Deserialize)]
struct SlackUser {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    real_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SlackMessage {
    #[serde(default)]
    user: Option<String>,
    #[serde(default)]
    text: String,
    #[serde(default)]
    subtype: Option<String>,
}

/// Raw message text and the day files it came from.
#[derive(Debug, Default)]
struct SlackExport {
    messages: Vec<String>,
    files: Vec<Utf8PathBuf>,
}

/// Raw text of every message `user` wrote in a Slack workspace export.
///
/// The export is a directory holding `users.json` and one folder per
/// channel with a JSON array of messages per day. `user` may be a user id,
/// a handle, or a real name as listed in `users.json`; without that file
/// it is taken as a user id. Channel joins and other messages carrying a
/// `subtype` are not the user's own words and are skipped.
pub fn extract_slack_messages(
    root: &Utf8Path,
    user: &str,
    max_bytes: Option<usize>,
) -> CorpusResult<Vec<String>> {
    Ok(read_slack_export(root, user, max_bytes)?.messages)
}

/// Load one user's messages from a Slack workspace export as a corpus.
///
/// See [`extract_slack_messages`] for the export layout. File-name patterns
/// do not apply; every channel's day files are read in sorted order.
#[tracing::instrument(skip_all, fields(root = %root, user = %user))]
pub fn load_slack_export(
    root: &Utf8Path,
    user: &str,
    options: &CorpusOptions,
) -> CorpusResult<Corpus> {
    let export = read_slack_export(root, user, options.max_bytes)?;
    let lines = normalize_lines(
        export.messages.iter().flat_map(|message| message.lines()),
        options.strip_markup,
    );

    if lines.is_empty() {
        tracing::warn!(user, "no messages from this user in the export");
    }
    tracing::info!(
        files = export.files.len(),
        messages = export.messages.len(),
        lines = lines.len(),
        "slack export loaded"
    );
    Ok(Corpus {
        lines,
        files: export.files,
    })
}

fn read_slack_export(
    root: &Utf8Path,
    user: &str,
    max_bytes: Option<usize>,
) -> CorpusResult<SlackExport> {
    if !root.is_dir() {
        return Err(CorpusError::MissingDirectory(root.to_path_buf()));
    }
    let ids = slack_user_ids(root, user, max_bytes)?;

    let mut export = SlackExport::default();
    for channel in sorted_entries(root)? {
        if !channel.is_dir() {
            continue;
        }
        for day in sorted_entries(&channel)? {
            if day.extension() != Some("json") || !day.is_file() {
                continue;
            }
            let messages: Vec<SlackMessage> = read_json(&day, max_bytes)?;
            export.messages.extend(
                messages
                    .into_iter()
                    .filter(|m| m.subtype.is_none())
                    .filter(|m| m.user.as_ref().is_some_and(|id| ids.contains(id)))
                    .map(|m| m.text),
            );
            export.files.push(day);
        }
    }
    Ok(export)
}

/// User ids in the export that `user` refers to.
fn slack_user_ids(
    root: &Utf8Path,
    user: &str,
    max_bytes: Option<usize>,
) -> CorpusResult<HashSet<String>> {
    let users_file = root.join("users.json");
    if !users_file.is_file() {
        tracing::debug!(user, "no users.json, matching messages by user id");
        return Ok(HashSet::from([user.to_string()]));
    }

    let users: Vec<SlackUser> = read_json(&users_file, max_bytes)?;
    let ids: HashSet<String> = users
        .into_iter()
        .filter(|u| u.id == user || u.name == user || u.real_name.as_deref() == Some(user))
        .map(|u| u.id)
        .collect();
    if ids.is_empty() {
        return Err(CorpusError::UnknownUser {
            user: user.to_string(),
            path: users_file,
        });
    }
    Ok(ids)
}

fn read_json<T: DeserializeOwned>(path: &Utf8Path, max_bytes: Option<usize>) -> CorpusResult<T> {
    let content = read_corpus_file(path, max_bytes)?;
    serde_json::from_str(&content).map_err(|source| CorpusError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn normalize_lines<'a, I>(lines: I, strip_markup: bool) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .map(|line| normalize_line(line, strip_markup))
        .filter(|line| !line.is_empty())
        .collect()
}

fn collect_files(
    dir: &Utf8Path,
    options: &CorpusOptions,
    out: &mut Vec<Utf8PathBuf>,
) -> CorpusResult<()> {
    for path in sorted_entries(dir)? {
        if path.is_dir() {
            collect_files(&path, options, out)?;
        } else if path.file_name().is_some_and(|name| options.matches(name)) {
            out.push(path);
        }
    }
    Ok(())
}

/// Entries of `dir`, sorted by path.
fn sorted_entries(dir: &Utf8Path) -> CorpusResult<Vec<Utf8PathBuf>> {
    let read_err = |source| CorpusError::Read {
        path: dir.to_path_buf(),
        source,
    };
    let mut paths = dir
        .read_dir_utf8()
        .map_err(read_err)?
        .map(|entry| entry.map(camino::Utf8DirEntry::into_path))
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_err)?;
    paths.sort();
    Ok(paths)
}

/// Read a file after checking its size against the limit.
fn read_corpus_file(path: &Utf8Path, max_bytes: Option<usize>) -> CorpusResult<String> {
    let read_err = |source| CorpusError::Read {
        path: path.to_path_buf(),
        source,
    };
    // Preflight: check file size via metadata before reading into memory.
    let metadata = std::fs::metadata(path.as_std_path()).map_err(read_err)?;
    if let Some(limit) = max_bytes
        && metadata.len() > limit as u64
    {
        return Err(CorpusError::TooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            limit,
        });
    }
    std::fs::read_to_string(path.as_std_path()).map_err(read_err)
}
