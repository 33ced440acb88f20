//! Error types for squish-core.
//!
//! The synthesis engine itself never fails: unassignable phrases and empty
//! corpora degrade to "left unabbreviated". Only the I/O surfaces around it
//! (configuration, corpus loading, export) return errors.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading a corpus.
#[derive(Error, Debug)]
pub enum CorpusError {
    /// A file-name pattern is not a valid regular expression.
    #[error("invalid input file pattern {pattern:?}: {source}")]
    Pattern {
        /// The pattern as supplied.
        pattern: String,
        /// The underlying regex error.
        source: regex::Error,
    },

    /// The corpus root does not exist or is not a directory.
    #[error("corpus directory not found: {0}")]
    MissingDirectory(Utf8PathBuf),

    /// A corpus file exceeds the configured size limit.
    #[error("input too large: {path} is {size} bytes (limit: {limit} bytes)")]
    TooLarge {
        /// The offending file.
        path: Utf8PathBuf,
        /// Its size in bytes.
        size: u64,
        /// The configured limit in bytes.
        limit: usize,
    },

    /// Reading a file or stream failed.
    #[error("failed to read {path}: {source}")]
    Read {
        /// The file or stream being read.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A Slack export file is not the JSON it should be.
    #[error("failed to parse {path}: {source}")]
    Json {
        /// The offending file.
        path: Utf8PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// The requested user is not listed in a Slack export.
    #[error("user {user:?} not found in {path}")]
    UnknownUser {
        /// The user as supplied.
        user: String,
        /// The export's user list.
        path: Utf8PathBuf,
    },
}

/// Result type alias using [`CorpusError`].
pub type CorpusResult<T> = Result<T, CorpusError>;

/// Errors that can occur while writing or reading shortcut files.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Filesystem access failed.
    #[error("failed to access {path}: {source}")]
    Io {
        /// The file or directory involved.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// YAML encoding or decoding failed.
    #[error("invalid shortcut document {path}: {source}")]
    Yaml {
        /// The document involved.
        path: Utf8PathBuf,
        /// The underlying YAML error.
        source: serde_yaml::Error,
    },

    /// JSON encoding failed.
    #[error("failed to encode {path}: {source}")]
    Json {
        /// The artifact being written.
        path: Utf8PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },
}

/// Result type alias using [`ExportError`].
pub type ExportResult<T> = Result<T, ExportError>;
