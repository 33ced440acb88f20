//! Corpus line normalization.
//!
//! Turns raw message text into the lowercase, whitespace-separated token
//! stream the n-gram counter expects.

use regex::Regex;
use std::sync::LazyLock;

/// Regex for emoji codes (`:slightly_smiling_face:`, `:+1:`).
static EMOJI_CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":[A-Za-z0-9_+\-']+:").expect("valid regex"));

/// Regex for user and channel mentions (`<@U01SL713VH8>`, `<#C024BE91L|general>`).
static MENTION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[@#!][^>]*>").expect("valid regex"));

/// Remove chat markup from a message.
///
/// Drops emoji codes, mentions, and every character that is neither
/// alphanumeric nor whitespace, then collapses whitespace. Apostrophes are
/// dropped as well; [`crate::export::fix_grammar`] restores the common ones.
pub fn strip_chat_markup(message: &str) -> String {
    let without_emoji = EMOJI_CODE_PATTERN.replace_all(message, " ");
    let without_mentions = MENTION_PATTERN.replace_all(&without_emoji, " ");
    let cleaned: String = without_mentions
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    collapse_whitespace(&cleaned)
}

/// Normalize one corpus line: optional markup stripping, lowercase,
/// single spaces, no leading or trailing whitespace.
pub fn normalize_line(line: &str, strip_markup: bool) -> String {
    let line = if strip_markup {
        strip_chat_markup(line)
    } else {
        line.to_string()
    };
    collapse_whitespace(&line.to_lowercase())
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
