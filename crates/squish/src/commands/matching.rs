//! Match command: reuse abbreviations from an existing shortcuts file.

use std::collections::BTreeMap;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use squish_core::export::read_yaml;
use squish_core::{MatchKind, PriorMatch, match_previous};

/// Arguments for the `match` subcommand.
#[derive(Args, Debug)]
pub struct MatchArgs {
    /// YAML phrase → abbreviation mapping (as written by `suggest`)
    pub shortcuts: Utf8PathBuf,

    /// Phrases to derive abbreviations for
    #[arg(required = true, num_args = 1..)]
    pub phrases: Vec<String>,
}

#[derive(Serialize)]
struct MatchRow<'a> {
    phrase: &'a str,
    #[serde(flatten)]
    found: Option<PriorMatch>,
}

/// Print the derived abbreviation (or none) for each phrase.
#[instrument(name = "cmd_match", skip_all, fields(shortcuts = %args.shortcuts))]
pub fn cmd_match(args: MatchArgs, global_json: bool) -> anyhow::Result<()> {
    debug!(phrases = args.phrases.len(), "executing match command");

    let mapping = read_yaml(&args.shortcuts)
        .with_context(|| format!("failed to load shortcuts from {}", args.shortcuts))?;
    // Keys are matched the way the corpus is normalized.
    let mapping: BTreeMap<String, String> = mapping
        .into_iter()
        .map(|(phrase, abbrev)| (phrase.to_lowercase().replace('\'', ""), abbrev))
        .collect();

    let rows: Vec<MatchRow<'_>> = args
        .phrases
        .iter()
        .map(|phrase| MatchRow {
            phrase,
            found: match_previous(&mapping, &phrase.to_lowercase()),
        })
        .collect();

    if global_json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for row in &rows {
        match row.found {
            Some(ref found) => println!(
                "{}: {} {}",
                row.phrase,
                found.abbreviation.green(),
                format!("({})", kind_label(found)).dimmed()
            ),
            None => println!("{}: {}", row.phrase, "no match".yellow()),
        }
    }

    Ok(())
}

fn kind_label(found: &PriorMatch) -> &'static str {
    match found.kind {
        MatchKind::Plural => "plural",
        MatchKind::Composite => "composite",
    }
}
