//! Plain-text log files.

use crate::error::{LoggingError, Result};
use crate::format::LogFormat;
use crate::record::LogRecord;
use crate::target::{Target, TargetKind};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tinct_core::ansi::strip_ansi_codes;

/// Log file used by [`Logger::with_default_targets`](crate::Logger::with_default_targets).
pub const DEFAULT_LOG_FILE: &str = "latest.log";

/// Writes one line per record to a file.
///
/// The file is created (or truncated) when the target is constructed, so a
/// bad path fails immediately rather than on the first message.
pub struct FileTarget {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    format: LogFormat,
}

impl FileTarget {
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| LoggingError::File {
                path: path.clone(),
                source,
            })?;
        }
        let file = File::create(&path).map_err(|source| LoggingError::File {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "opened log file");

        Ok(Self {
            path,
            writer: Some(BufWriter::new(file)),
            format: LogFormat::default(),
        })
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_closed(&self) -> bool {
        self.writer.is_none()
    }

    fn io_error(&self, source: std::io::Error) -> LoggingError {
        LoggingError::File {
            path: self.path.clone(),
            source,
        }
    }
}

impl Target for FileTarget {
    fn kind(&self) -> TargetKind {
        TargetKind::File
    }

    fn write(&mut self, record: &LogRecord) -> Result<()> {
        let line = strip_ansi_codes(&self.format.render(record, ""));
        let Some(writer) = self.writer.as_mut() else {
            return Err(LoggingError::TargetClosed);
        };
        if let Err(source) = writeln!(writer, "{line}") {
            return Err(self.io_error(source));
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        let result = match self.writer.as_mut() {
            Some(writer) => writer.flush(),
            None => return Ok(()),
        };
        result.map_err(|source| self.io_error(source))
    }

    fn close(&mut self) -> Result<()> {
        let Some(mut writer) = self.writer.take() else {
            return Ok(());
        };
        tracing::debug!(path = %self.path.display(), "closing log file");
        writer.flush().map_err(|source| self.io_error(source))
    }
}

impl Drop for FileTarget {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
