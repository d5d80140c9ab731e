//! Colored output to stdout and stderr.

use crate::error::{LoggingError, Result};
use crate::format::LogFormat;
use crate::record::LogRecord;
use crate::severity::Severity;
use crate::target::{Target, TargetKind};
use std::io::{self, Write};
use tinct_core::Color;
use tinct_core::ansi::{should_colorize, strip_ansi_codes};

/// Writes records to a pair of streams. Fatal and error records go to the
/// error stream, everything else to the output stream.
pub struct TerminalTarget {
    out: Box<dyn Write + Send>,
    err: Box<dyn Write + Send>,
    format: LogFormat,
    colors: bool,
    palette: [Color; 7],
    closed: bool,
}

impl TerminalTarget {
    /// Targets stdout and stderr. Colors are on when stdout is a terminal and
    /// `NO_COLOR` is unset.
    pub fn stdio() -> Self {
        Self::with_writers(io::stdout(), io::stderr()).with_colors(should_colorize())
    }

    /// Targets arbitrary writers, with colors on.
    pub fn with_writers<O, E>(out: O, err: E) -> Self
    where
        O: Write + Send + 'static,
        E: Write + Send + 'static,
    {
        Self {
            out: Box::new(out),
            err: Box::new(err),
            format: LogFormat::terminal(),
            colors: true,
            palette: Severity::ALL.map(|s| s.color()),
            closed: false,
        }
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// With colors off, every escape sequence is stripped from the line.
    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    pub fn with_severity_color(mut self, severity: Severity, color: Color) -> Self {
        self.palette[severity as usize] = color;
        self
    }

    pub fn colors(&self) -> bool {
        self.colors
    }

    pub fn format(&self) -> &LogFormat {
        &self.format
    }

    fn render(&self, record: &LogRecord) -> String {
        if self.colors {
            let color = self.palette[record.severity as usize].to_foreground_ansi();
            self.format.render(record, &color)
        } else {
            strip_ansi_codes(&self.format.render(record, ""))
        }
    }
}

impl Target for TerminalTarget {
    fn kind(&self) -> TargetKind {
        TargetKind::Terminal
    }

    fn write(&mut self, record: &LogRecord) -> Result<()> {
        if self.closed {
            return Err(LoggingError::TargetClosed);
        }
        let line = self.render(record);
        let stream = if record.severity.is_error() {
            &mut self.err
        } else {
            &mut self.out
        };
        writeln!(stream, "{line}")?;
        stream.flush()?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        self.err.flush()?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Buffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().clone()).unwrap()
        }
    }

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn record(severity: Severity) -> LogRecord {
        LogRecord::new(severity, "hello", "app", vec!["app".to_string()])
    }

    fn target() -> (TerminalTarget, Buffer, Buffer) {
        let out = Buffer::default();
        let err = Buffer::default();
        let target = TerminalTarget::with_writers(out.clone(), err.clone())
            .with_format(LogFormat::terminal().with_time_format("T").unwrap());
        (target, out, err)
    }

    #[test]
    fn test_errors_go_to_stderr() {
        let (mut target, out, err) = target();
        target.write(&record(Severity::Info)).unwrap();
        target.write(&record(Severity::Error)).unwrap();
        target.write(&record(Severity::Fatal)).unwrap();

        assert_eq!(out.contents().lines().count(), 1);
        assert_eq!(err.contents().lines().count(), 2);
    }

    #[test]
    fn test_colored_line() {
        let (mut target, out, _) = target();
        target.write(&record(Severity::Info)).unwrap();
        assert_eq!(
            out.contents(),
            "\x1b[38;2;180;180;180m[app][T][\x1b[1mInfo\x1b[22m]: hello\x1b[0m\n"
        );
    }

    #[test]
    fn test_plain_line() {
        let (target, out, _) = target();
        let mut target = target.with_colors(false);
        target.write(&record(Severity::Warning)).unwrap();
        assert_eq!(out.contents(), "[app][T][Warning]: hello\n");
    }

    #[test]
    fn test_severity_color_override() {
        let (target, out, _) = target();
        let mut target = target.with_severity_color(Severity::Info, Color::CYAN);
        target.write(&record(Severity::Info)).unwrap();
        assert!(out.contents().starts_with("\x1b[38;2;0;255;255m"));
    }

    #[test]
    fn test_write_after_close_fails() {
        let (mut target, _, _) = target();
        target.close().unwrap();
        target.close().unwrap();
        assert!(matches!(
            target.write(&record(Severity::Info)),
            Err(LoggingError::TargetClosed)
        ));
    }
}
