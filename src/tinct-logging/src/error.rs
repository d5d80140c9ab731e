//! Error types for logging operations.

use crate::target::{TargetId, TargetKind};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by loggers, targets and the registry.
#[derive(Error, Debug)]
pub enum LoggingError {
    /// A logger with this ID is already registered.
    #[error("a logger with ID {id:?} is already registered")]
    DuplicateId { id: String },

    /// No logger is registered under this ID.
    #[error("no logger registered with ID {0:?}")]
    UnknownLogger(String),

    /// The logger has no target with this handle.
    #[error("logger has no {0}")]
    UnknownTarget(TargetId),

    /// The logger has no target of this kind.
    #[error("logger has no {0} target")]
    NoTargetOfKind(TargetKind),

    /// A target was used after being closed.
    #[error("log target is closed")]
    TargetClosed,

    /// Opening or writing a log file failed.
    #[error("failed to write log file {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing to a stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A `chrono` strftime format with an unknown or incomplete specifier.
    #[error("invalid time format: {0:?}")]
    InvalidTimeFormat(String),

    /// A logger ID that is empty or contains the `.` path separator.
    #[error("invalid logger ID {id:?}: {reason}")]
    InvalidId { id: String, reason: &'static str },

    /// A severity name that is not recognized.
    #[error("unknown severity: {0:?}")]
    InvalidSeverity(String),

    /// The configuration file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration is not valid TOML for [`LoggingConfig`](crate::config::LoggingConfig).
    #[error("invalid logging config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Result type alias for logging operations.
pub type Result<T> = std::result::Result<T, LoggingError>;
