//! Error types for the chatlist application.
//!
//! Ranking itself is total and never fails. Errors only arise at the edges:
//! reading configuration, reading dialog snapshots, and installing the
//! tracing subscriber.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error returned from the binary
//!   - [`InputError`] - Snapshot file reading failures
//!   - [`ParseError`] - Malformed snapshot lines (non-fatal, logged and skipped)
//!   - [`ConfigError`](crate::config::ConfigError) - Config file read/parse failures
//!   - [`LoggingError`](crate::logging::LoggingError) - Subscriber setup failures
//!
//! Soft-pin file failures have no variant: a missing or unreadable
//! soft-pin file degrades to an empty registry.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all failure modes.
///
/// # Examples
///
/// ```no_run
/// use chatlist::model::error::{AppError, InputError};
///
/// fn run() -> Result<(), AppError> {
///     let _input = read_snapshots()?;
///     Ok(())
/// }
/// # fn read_snapshots() -> Result<(), InputError> { Ok(()) }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to read the snapshot input.
    #[error("Failed to read input: {0}")]
    InputRead(#[from] InputError),

    /// A snapshot line could not be parsed.
    ///
    /// Only surfaces when a caller chooses to treat parse errors as fatal;
    /// the CLI logs them and keeps going.
    #[error("Failed to parse dialog snapshot: {0}")]
    Parse(#[from] ParseError),

    /// Configuration file exists but is unusable.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Tracing could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),
}

/// Errors encountered when reading dialog snapshots.
#[derive(Debug, Error)]
pub enum InputError {
    /// The snapshot file does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use chatlist::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.jsonl")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.jsonl"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Generic I/O error reading the input.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors encountered when parsing one JSONL dialog snapshot.
///
/// Parse errors are non-fatal: the line is logged and skipped, ranking
/// continues with the remaining dialogs. Every variant carries the 1-based
/// line number.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The line is not valid JSON or does not match the snapshot schema.
    ///
    /// # Examples
    ///
    /// ```
    /// use chatlist::model::error::ParseError;
    ///
    /// let err = ParseError::InvalidJson {
    ///     line: 3,
    ///     message: "expected value".to_string()
    /// };
    /// assert!(err.to_string().contains("line 3"));
    /// ```
    #[error("Invalid JSON at line {line}: {message}")]
    InvalidJson {
        /// 1-based line number.
        line: usize,
        /// serde_json error message.
        message: String,
    },

    /// Neither `peer` nor `folder` was given, so the dialog has no identity.
    #[error("Missing required field '{field}' at line {line}")]
    MissingField {
        /// 1-based line number.
        line: usize,
        /// Name of the missing field.
        field: &'static str,
    },

    /// Both `peer` and `folder` were given.
    #[error("Ambiguous dialog identity at line {line}: both peer and folder set")]
    AmbiguousKey {
        /// 1-based line number.
        line: usize,
    },
}

impl ParseError {
    /// The 1-based line number the error refers to.
    pub fn line(&self) -> usize {
        match self {
            Self::InvalidJson { line, .. }
            | Self::MissingField { line, .. }
            | Self::AmbiguousKey { line } => *line,
        }
    }
}
