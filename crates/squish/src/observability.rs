//! Logging setup for the CLI.
//!
//! Human-readable events go to stderr; when a log directory can be resolved,
//! every event that passes the filter is also appended as JSON lines to a
//! daily-rolled file.
//!
//! Log file resolution, first match wins:
//! 1. `SQUISH_LOG_PATH` (exact file, never rolled)
//! 2. `SQUISH_LOG_DIR`
//! 3. `log_dir` from configuration
//! 4. the platform data directory (`…/squish/logs`)

use std::path::PathBuf;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

const LOG_PATH_ENV: &str = "SQUISH_LOG_PATH";
const LOG_DIR_ENV: &str = "SQUISH_LOG_DIR";
const LOG_FILE_PREFIX: &str = "squish.jsonl";

/// Where log files go.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Exact log file.
    pub log_path: Option<PathBuf>,
    /// Directory for daily log files.
    pub log_dir: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Resolve log locations from the environment, then `config_log_dir`,
    /// then platform defaults.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        let log_path = std::env::var_os(LOG_PATH_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        let log_dir = std::env::var_os(LOG_DIR_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or(config_log_dir)
            .or_else(default_log_dir);
        Self { log_path, log_dir }
    }
}

fn default_log_dir() -> Option<PathBuf> {
    squish_core::config::user_data_local_dir().map(|dir| dir.join("logs").into_std_path_buf())
}

/// Keeps the background log writer alive; drop it at the end of `main`.
#[must_use = "dropping the guard stops file logging"]
pub struct ObservabilityGuard {
    _file: Option<WorkerGuard>,
}

/// Build the event filter.
///
/// `RUST_LOG` wins when set. Otherwise `-q` means errors only, `-v` debug,
/// `-vv` trace, and the configured level applies.
pub fn env_filter(quiet: bool, verbose: u8, default_level: &str) -> EnvFilter {
    if std::env::var_os("RUST_LOG").is_some()
        && let Ok(filter) = EnvFilter::try_from_default_env()
    {
        return filter;
    }
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => default_level,
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    EnvFilter::new(level)
}

/// Level of events echoed to stderr.
///
/// Stderr stays at warnings unless `-v` or `RUST_LOG` asks for more, so
/// normal output is not drowned in progress events.
pub fn stderr_level(quiet: bool, verbose: u8) -> LevelFilter {
    if std::env::var_os("RUST_LOG").is_some() {
        return LevelFilter::TRACE;
    }
    match (quiet, verbose) {
        (true, _) => LevelFilter::ERROR,
        (false, 0) => LevelFilter::WARN,
        (false, 1) => LevelFilter::DEBUG,
        (false, _) => LevelFilter::TRACE,
    }
}

/// Install the global subscriber.
pub fn init_observability(
    cfg: &ObservabilityConfig,
    filter: EnvFilter,
    stderr: LevelFilter,
) -> anyhow::Result<ObservabilityGuard> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_filter(stderr);

    let (file_layer, guard) = match file_appender(cfg) {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    Ok(ObservabilityGuard { _file: guard })
}

/// The file appender, or `None` when no usable location exists.
fn file_appender(cfg: &ObservabilityConfig) -> Option<RollingFileAppender> {
    let (dir, rotation, prefix) = if let Some(ref path) = cfg.log_path {
        let dir = path.parent().filter(|p| !p.as_os_str().is_empty())?;
        let name = path.file_name()?.to_str()?;
        (dir, Rotation::NEVER, name)
    } else {
        (cfg.log_dir.as_deref()?, Rotation::DAILY, LOG_FILE_PREFIX)
    };
    std::fs::create_dir_all(dir).ok()?;
    RollingFileAppender::builder()
        .rotation(rotation)
        .filename_prefix(prefix)
        .build(dir)
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_locations_disable_file_logging() {
        assert!(file_appender(&ObservabilityConfig::default()).is_none());
    }

    #[test]
    fn file_appender_uses_log_path() {
        let tmp = tempfile::TempDir::new().unwrap();
        let cfg = ObservabilityConfig {
            log_path: Some(tmp.path().join("nested/run.jsonl")),
            log_dir: None,
        };
        assert!(file_appender(&cfg).is_some());
        assert!(tmp.path().join("nested").is_dir());
    }
}
