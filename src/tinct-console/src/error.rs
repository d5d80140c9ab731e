//! Error types for console operations.

use std::io;
use thiserror::Error;

/// Errors raised by console backends, windows and key listeners.
#[derive(Error, Debug)]
pub enum ConsoleError {
    /// Reading from or writing to the console failed.
    #[error("console I/O error: {0}")]
    Io(#[from] io::Error),

    /// A cursor position outside the console.
    #[error("position ({x}, {y}) is outside the {width}x{height} console")]
    OutOfBounds {
        x: u16,
        y: u16,
        width: u16,
        height: u16,
    },

    /// The terminal answered a cursor position request with something other
    /// than `ESC [ row ; col R`.
    #[error("invalid cursor position report: {0:?}")]
    InvalidCursorReport(String),

    /// The key listener thread has exited.
    #[error("key listener has stopped")]
    ListenerStopped,

    /// The key listener thread panicked.
    #[error("key listener thread panicked")]
    ListenerPanicked,
}

/// Result type alias for console operations.
pub type Result<T> = std::result::Result<T, ConsoleError>;
