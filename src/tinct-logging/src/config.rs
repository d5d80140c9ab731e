//! File and environment configuration for loggers.
//!
//! ```toml
//! level = "debug"
//! terminal = true
//! colors = false
//! file = "logs/app.log"
//! format = "[{2}][{3}] {0}: {4}"
//! name_format = "{0}/{1}"
//! ```

use crate::error::{LoggingError, Result};
use crate::format::{self, LogFormat};
use crate::logger::Logger;
use crate::severity::Severity;
use crate::targets::{FileTarget, TerminalTarget};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Environment variable that overrides [`LoggingConfig::level`].
pub const ENV_LOG_LEVEL: &str = "TINCT_LOG_LEVEL";

/// Environment variable that turns terminal colors off when present.
pub const ENV_NO_COLOR: &str = "NO_COLOR";

/// How [`LoggingConfig::build_logger`] sets up a logger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: Severity,
    /// Attach a terminal target.
    pub terminal: bool,
    /// Force terminal colors on or off; detected when unset.
    pub colors: Option<bool>,
    /// Attach a file target writing here.
    pub file: Option<PathBuf>,
    /// Line template for the file target.
    pub format: Option<String>,
    /// Line template for the terminal target.
    pub terminal_format: Option<String>,
    pub name_format: Option<String>,
    pub time_format: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Severity::Info,
            terminal: true,
            colors: None,
            file: None,
            format: None,
            terminal_format: None,
            name_format: None,
            time_format: None,
        }
    }
}

impl LoggingConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| LoggingError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Applies [`ENV_LOG_LEVEL`] and [`ENV_NO_COLOR`] from the process environment.
    pub fn apply_env(self) -> Self {
        self.apply_env_with(|key| env::var(key).ok())
    }

    /// Applies environment overrides read through `lookup`.
    ///
    /// An unparseable level is reported through `tracing` and ignored.
    pub fn apply_env_with<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_LOG_LEVEL) {
            match value.parse::<Severity>() {
                Ok(level) => self.level = level,
                Err(error) => tracing::warn!(%error, "ignoring {ENV_LOG_LEVEL}"),
            }
        }
        if lookup(ENV_NO_COLOR).is_some() {
            self.colors = Some(false);
        }
        self
    }

    /// Creates a logger with the configured level and targets.
    ///
    /// # Errors
    ///
    /// Fails if the time format is invalid or the log file cannot be created.
    /// Formats are checked before any file is touched.
    pub fn build_logger(&self, id: impl Into<String>, name: impl Into<String>) -> Result<Logger> {
        let terminal_format = self.log_format(
            self.terminal_format
                .clone()
                .unwrap_or_else(format::terminal_template),
        )?;
        let file_format = self.log_format(
            self.format
                .clone()
                .unwrap_or_else(|| format::DEFAULT_TEMPLATE.to_string()),
        )?;

        let mut logger = Logger::new(id, name).with_level(self.level);

        if self.terminal {
            let mut terminal = TerminalTarget::stdio().with_format(terminal_format);
            if let Some(colors) = self.colors {
                terminal = terminal.with_colors(colors);
            }
            logger.add_target(terminal);
        }

        if let Some(path) = &self.file {
            logger.add_target(FileTarget::create(path)?.with_format(file_format));
        }

        Ok(logger)
    }

    fn log_format(&self, template: String) -> Result<LogFormat> {
        let mut format = LogFormat::new(template);
        if let Some(name_format) = &self.name_format {
            format = format.with_name_template(name_format.clone());
        }
        if let Some(time_format) = &self.time_format {
            format = format.with_time_format(time_format.clone())?;
        }
        Ok(format)
    }
}
