//! Message severities.

use crate::error::LoggingError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tinct_core::{Color, Colors};

/// How severe a log message is, from [`Severity::Fatal`] to [`Severity::Trace`].
///
/// Ordering follows verbosity: `Fatal < Error < ... < Trace`. A logger set to
/// level `L` lets a message through when `message <= L`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum Severity {
    Fatal,
    Error,
    Warning,
    Message,
    #[default]
    Info,
    Debug,
    Trace,
}

impl Severity {
    /// Every severity, most severe first.
    pub const ALL: [Self; 7] = [
        Self::Fatal,
        Self::Error,
        Self::Warning,
        Self::Message,
        Self::Info,
        Self::Debug,
        Self::Trace,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Fatal => "Fatal",
            Self::Error => "Error",
            Self::Warning => "Warning",
            Self::Message => "Message",
            Self::Info => "Info",
            Self::Debug => "Debug",
            Self::Trace => "Trace",
        }
    }

    /// Terminal color for messages of this severity.
    pub fn color(&self) -> Color {
        match self {
            Self::Fatal => Color::rgb(255, 0, 0),
            Self::Error => Color::rgb(255, 80, 80),
            Self::Warning => Color::rgb(255, 255, 0),
            Self::Message => Color::Palette(Colors::White),
            Self::Info => Color::rgb(180, 180, 180),
            Self::Debug => Color::rgb(255, 160, 0),
            Self::Trace => Color::rgb(20, 200, 20),
        }
    }

    /// Fatal and error messages go to stderr.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Fatal | Self::Error)
    }

    /// Whether a logger at level `self` accepts a message of `severity`.
    pub fn allows(&self, severity: Severity) -> bool {
        severity <= *self
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Severity {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fatal" => Ok(Self::Fatal),
            "error" => Ok(Self::Error),
            "warning" | "warn" => Ok(Self::Warning),
            "message" | "msg" => Ok(Self::Message),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(LoggingError::InvalidSeverity(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(Severity::Fatal < Severity::Error);
        assert!(Severity::Debug < Severity::Trace);
        assert_eq!(Severity::ALL.iter().max(), Some(&Severity::Trace));
    }

    #[test]
    fn test_allows() {
        let level = Severity::Warning;
        assert!(level.allows(Severity::Fatal));
        assert!(level.allows(Severity::Warning));
        assert!(!level.allows(Severity::Message));
        assert!(!level.allows(Severity::Trace));
    }

    #[test]
    fn test_parse() {
        assert_eq!("WARN".parse::<Severity>().unwrap(), Severity::Warning);
        assert_eq!(" trace ".parse::<Severity>().unwrap(), Severity::Trace);
        assert!(matches!(
            "loud".parse::<Severity>(),
            Err(LoggingError::InvalidSeverity(_))
        ));
    }

    #[test]
    fn test_colors() {
        assert_eq!(Severity::Fatal.color(), Color::RED);
        assert_eq!(Severity::Warning.color().to_hex().as_deref(), Some("FFFF00"));
        assert_eq!(Severity::Message.color(), Color::Palette(Colors::White));
        assert!(Severity::Error.is_error());
        assert!(!Severity::Warning.is_error());
    }

    #[test]
    fn test_serde_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            level: Severity,
        }
        let parsed: Wrapper = toml::from_str("level = \"debug\"").unwrap();
        assert_eq!(parsed.level, Severity::Debug);
    }
}
