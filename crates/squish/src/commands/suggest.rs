//! Suggest command: the full corpus → shortcuts run.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use squish_core::config::Config;
use squish_core::export::{self, Shortcut, autokey};
use squish_core::synthesize;

use super::{CorpusArgs, spinner};

/// Arguments for the `suggest` subcommand.
#[derive(Args, Debug, Default)]
pub struct SuggestArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Where to write the shortcuts YAML document
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<Utf8PathBuf>,

    /// Also write AutoKey phrase files into DIR
    #[arg(long, value_name = "DIR")]
    pub autokey_dir: Option<Utf8PathBuf>,

    /// Print results without writing any file
    #[arg(long)]
    pub no_write: bool,
}

#[derive(Serialize)]
struct SuggestReport<'a> {
    lines: usize,
    files: usize,
    ranked: usize,
    empty_corpus: bool,
    skipped: Vec<&'a str>,
    shortcuts: &'a [Shortcut],
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<&'a Utf8PathBuf>,
}

/// Run the whole pipeline, print the shortcut table, and write outputs.
#[instrument(name = "cmd_suggest", skip_all, fields(data_dir = ?args.corpus.data_dir))]
pub fn cmd_suggest(
    args: SuggestArgs,
    global_json: bool,
    quiet: bool,
    config: &Config,
) -> anyhow::Result<()> {
    debug!(?args, "executing suggest command");

    let corpus = args.corpus.load(config)?;
    let params = args.corpus.params(config);
    let vocab = args.corpus.vocabulary(config);

    let pb = spinner("assigning abbreviations", quiet || global_json);
    let result = synthesize(&corpus.lines, &params, &vocab);
    pb.finish_and_clear();

    let shortcuts = result.shortcuts();
    let output = args.output.unwrap_or_else(|| config.output.clone());
    let autokey_dir = args.autokey_dir.or_else(|| config.autokey_dir.clone());

    if !args.no_write {
        let document = export::shortcuts_document(&shortcuts, config.fix_grammar);
        export::write_yaml(&output, &document)
            .with_context(|| format!("failed to write {output}"))?;

        if let Some(ref dir) = autokey_dir {
            let pairs = document.iter().map(|(p, a)| (p.as_str(), a.as_str()));
            autokey::write_phrases(dir, pairs, config.autokey_filter.as_deref())
                .with_context(|| format!("failed to write AutoKey phrases to {dir}"))?;
        }
    }

    if global_json {
        let report = SuggestReport {
            lines: corpus.lines.len(),
            files: corpus.files.len(),
            ranked: result.ranked.len(),
            empty_corpus: result.is_empty_corpus(),
            skipped: result
                .outcome
                .skipped
                .iter()
                .map(|r| r.phrase.as_str())
                .collect(),
            shortcuts: &shortcuts,
            output: (!args.no_write).then_some(&output),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for s in &shortcuts {
        println!(
            "{:5}\t{:20}:{}",
            s.score,
            s.phrase,
            s.abbreviation.green()
        );
    }

    // Empty corpora and skipped phrases are already reported as warnings.
    if !quiet && !args.no_write {
        eprintln!(
            "{} {} shortcuts to {}",
            "Wrote".bold(),
            shortcuts.len(),
            output.cyan()
        );
    }

    Ok(())
}
