//! Command implementations.

use std::io::IsTerminal;
use std::time::Duration;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use squish_core::config::Config;
use squish_core::corpus::{self, Corpus, CorpusOptions};
use squish_core::{SynthesisParams, Vocabulary};

pub mod candidates;
pub mod info;
pub mod matching;
pub mod rank;
#[cfg(feature = "mcp")]
pub mod serve;
pub mod suggest;

/// Corpus selection and tuning flags shared by `suggest` and `rank`.
///
/// Every flag overrides the matching configuration value.
#[derive(Args, Debug, Default, Clone)]
pub struct CorpusArgs {
    /// Root of the input directory tree. Reads stdin when omitted.
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<Utf8PathBuf>,

    /// Treat --data-dir as a Slack workspace export and read only this
    /// user's messages (id, handle, or real name)
    #[arg(long, value_name = "USER", requires = "data_dir")]
    pub slack_user: Option<String>,

    /// Regex matched against file names under --data-dir (repeatable)
    #[arg(long = "input-file-re", value_name = "RE")]
    pub input_file_re: Vec<String>,

    /// Longest phrase, in words
    #[arg(long, value_name = "N")]
    pub max_ngram: Option<usize>,

    /// How many ranked phrases to abbreviate
    #[arg(long, value_name = "K")]
    pub top_k: Option<usize>,

    /// Ignore phrases seen this many times or fewer
    #[arg(long, value_name = "N")]
    pub min_count: Option<usize>,

    /// Start without the built-in presets and blacklist
    #[arg(long)]
    pub no_builtin_presets: bool,

    /// Keep punctuation and chat markup in corpus lines
    #[arg(long)]
    pub keep_markup: bool,
}

impl CorpusArgs {
    /// Synthesis parameters: flags first, then configuration.
    pub fn params(&self, config: &Config) -> SynthesisParams {
        let base = SynthesisParams::from_config(config);
        SynthesisParams {
            max_ngram: self.max_ngram.unwrap_or(base.max_ngram),
            top_k: self.top_k.unwrap_or(base.top_k),
            min_count: self.min_count.unwrap_or(base.min_count),
        }
    }

    /// The vocabulary for this run.
    pub fn vocabulary(&self, config: &Config) -> Vocabulary {
        if self.no_builtin_presets {
            let config = Config {
                builtin_presets: false,
                ..config.clone()
            };
            Vocabulary::from_config(&config)
        } else {
            Vocabulary::from_config(config)
        }
    }

    /// Load the corpus from `--data-dir` (a Slack export with
    /// `--slack-user`) or stdin.
    pub fn load(&self, config: &Config) -> anyhow::Result<Corpus> {
        let mut options = if self.input_file_re.is_empty() {
            CorpusOptions::from_config(config)?
        } else {
            CorpusOptions::new(&self.input_file_re)?.with_max_bytes(config.input_limit())
        };
        options = options.with_strip_markup(config.strip_chat_markup && !self.keep_markup);

        match (&self.data_dir, &self.slack_user) {
            (Some(root), Some(user)) => corpus::load_slack_export(root, user, &options)
                .with_context(|| format!("failed to load Slack export from {root}")),
            (Some(root), None) => corpus::load_directory(root, &options)
                .with_context(|| format!("failed to load corpus from {root}")),
            (None, _) => {
                let stdin = std::io::stdin();
                corpus::load_reader(stdin.lock(), "<stdin>", &options)
                    .context("failed to read corpus from stdin")
            }
        }
    }
}

/// A spinner on stderr while a long step runs; hidden when stderr is not a
/// terminal or output is quiet.
pub fn spinner(message: &str, quiet: bool) -> ProgressBar {
    if quiet || !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
