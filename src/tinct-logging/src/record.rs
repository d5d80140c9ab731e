//! A single log entry as handed to targets.

use crate::severity::Severity;
use chrono::{DateTime, Local};

/// One message passed from a [`Logger`](crate::Logger) to its targets.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub severity: Severity,
    pub time: DateTime<Local>,
    pub message: String,
    /// Registered ID of the emitting logger (`parent.child` for sub-loggers).
    pub logger_id: String,
    /// Display names from the root logger down to the emitting one.
    pub logger_names: Vec<String>,
}

impl LogRecord {
    pub fn new(
        severity: Severity,
        message: impl Into<String>,
        logger_id: impl Into<String>,
        logger_names: Vec<String>,
    ) -> Self {
        Self {
            severity,
            time: Local::now(),
            message: message.into(),
            logger_id: logger_id.into(),
            logger_names,
        }
    }

    /// Name of the emitting logger itself, without its parents.
    pub fn logger_name(&self) -> &str {
        self.logger_names.last().map(String::as_str).unwrap_or_default()
    }
}
