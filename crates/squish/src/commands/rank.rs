//! Rank command: which phrases are worth abbreviating.

use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use squish_core::config::Config;
use squish_core::count_ngrams;
use squish_core::ranking::rank_phrases_with_min_count;

use super::{CorpusArgs, spinner};

/// Arguments for the `rank` subcommand.
#[derive(Args, Debug, Default)]
pub struct RankArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,
}

/// Print the ranked phrase list, best first.
#[instrument(name = "cmd_rank", skip_all, fields(data_dir = ?args.corpus.data_dir))]
pub fn cmd_rank(
    args: RankArgs,
    global_json: bool,
    quiet: bool,
    config: &Config,
) -> anyhow::Result<()> {
    debug!(?args, "executing rank command");

    let corpus = args.corpus.load(config)?;
    let params = args.corpus.params(config);

    let pb = spinner("counting phrases", quiet || global_json);
    let counts = count_ngrams(&corpus.lines, params.max_ngram);
    let ranked = rank_phrases_with_min_count(&counts, params.top_k, params.min_count);
    pb.finish_and_clear();

    if global_json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
    } else {
        for row in &ranked {
            println!(
                "{:6}\t{:20}\t{}",
                row.score.bold(),
                row.phrase,
                format!("x{}", row.count).dimmed()
            );
        }
        if ranked.is_empty() && !quiet {
            eprintln!("{} no phrase is frequent enough", "note:".yellow());
        }
    }

    Ok(())
}
