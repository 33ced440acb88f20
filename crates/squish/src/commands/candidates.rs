//! Candidates command: the abbreviation candidates for one phrase.

use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use squish_core::Vocabulary;
use squish_core::assignment::saves_enough;
use squish_core::config::Config;
use squish_core::possible_abbreviations;

/// Arguments for the `candidates` subcommand.
#[derive(Args, Debug)]
pub struct CandidatesArgs {
    /// Phrase to abbreviate (words may be passed separately)
    #[arg(required = true, num_args = 1..)]
    pub phrase: Vec<String>,
}

#[derive(Serialize)]
struct CandidateRow {
    abbreviation: String,
    reserved: bool,
    saves_enough: bool,
}

/// Print every candidate in preference order, marking unusable ones.
#[instrument(name = "cmd_candidates", skip_all)]
pub fn cmd_candidates(
    args: CandidatesArgs,
    global_json: bool,
    config: &Config,
) -> anyhow::Result<()> {
    let phrase = args.phrase.join(" ").to_lowercase();
    debug!(%phrase, "executing candidates command");

    let vocab = Vocabulary::from_config(config);
    let rows: Vec<CandidateRow> = possible_abbreviations(&phrase)
        .into_iter()
        .map(|abbreviation| CandidateRow {
            reserved: vocab.is_blacklisted(&abbreviation),
            saves_enough: saves_enough(&abbreviation, &phrase),
            abbreviation,
        })
        .collect();

    if global_json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for row in &rows {
        if row.reserved {
            println!("{}  {}", row.abbreviation.dimmed(), "(reserved)".dimmed());
        } else if !row.saves_enough {
            println!("{}  {}", row.abbreviation.dimmed(), "(too long)".dimmed());
        } else {
            println!("{}", row.abbreviation.green());
        }
    }

    Ok(())
}
