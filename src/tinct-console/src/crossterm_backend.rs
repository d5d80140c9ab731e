//! Native backend built on crossterm.

use crate::ansi_backend::AnsiBackend;
use crate::backend::{ConsoleBackend, Erase, Position};
use crate::error::Result;
use crossterm::{
    cursor::{self, Hide, MoveTo, Show},
    execute, queue,
    style::Print,
    terminal::{Clear, ClearType, SetTitle, disable_raw_mode, enable_raw_mode, size},
};
use std::io::{self, IsTerminal, Stderr, Stdout, Write};
use tinct_core::ColorMode;

/// A backend driving the real terminal through crossterm commands.
///
/// Output is queued and sent on [`ConsoleBackend::flush`]. A hidden cursor
/// is shown again on drop.
pub struct CrosstermBackend {
    stdout: Stdout,
    stderr: Stderr,
    mode: ColorMode,
    cursor_hidden: bool,
}

impl CrosstermBackend {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            stderr: io::stderr(),
            mode: ColorMode::detect_for_stdout(),
            cursor_hidden: false,
        }
    }

    pub fn with_color_mode(mut self, mode: ColorMode) -> Self {
        self.mode = mode;
        self
    }
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps an erase request to crossterm's clear type.
fn clear_type(erase: Erase) -> ClearType {
    match erase {
        Erase::Screen => ClearType::All,
        Erase::ScreenFromCursor => ClearType::FromCursorDown,
        Erase::Line => ClearType::CurrentLine,
        Erase::LineFromCursor => ClearType::UntilNewLine,
    }
}

impl ConsoleBackend for CrosstermBackend {
    fn write_raw(&mut self, text: &str) -> Result<()> {
        queue!(self.stdout, Print(text))?;
        Ok(())
    }

    fn write_error_raw(&mut self, text: &str) -> Result<()> {
        queue!(self.stderr, Print(text))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.flush()?;
        self.stderr.flush()?;
        Ok(())
    }

    fn size(&self) -> Result<(u16, u16)> {
        Ok(size()?)
    }

    fn move_cursor_unchecked(&mut self, (x, y): Position) -> Result<()> {
        queue!(self.stdout, MoveTo(x, y))?;
        Ok(())
    }

    fn erase(&mut self, erase: Erase) -> Result<()> {
        queue!(self.stdout, Clear(clear_type(erase)))?;
        Ok(())
    }

    fn cursor_position(&mut self) -> Result<Position> {
        self.stdout.flush()?;
        Ok(cursor::position()?)
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        execute!(self.stdout, SetTitle(title))?;
        Ok(())
    }

    fn set_cursor_visible(&mut self, visible: bool) -> Result<()> {
        if visible {
            execute!(self.stdout, Show)?;
        } else {
            execute!(self.stdout, Hide)?;
        }
        self.cursor_hidden = !visible;
        Ok(())
    }

    fn is_cursor_visible(&self) -> bool {
        !self.cursor_hidden
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn color_mode(&self) -> ColorMode {
        self.mode
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        // Best-effort cleanup on drop
        if self.cursor_hidden {
            let _ = execute!(self.stdout, Show);
        }
        let _ = self.stdout.flush();
    }
}

/// Picks the native backend when stdout is a terminal and the ANSI backend
/// otherwise.
pub fn detect_backend() -> Box<dyn ConsoleBackend> {
    if io::stdout().is_terminal() {
        tracing::debug!("using crossterm console backend");
        Box::new(CrosstermBackend::new())
    } else {
        tracing::debug!("stdout is not a terminal, using ANSI console backend");
        Box::new(AnsiBackend::stdio())
    }
}

/// Keeps the terminal in raw mode while alive.
#[derive(Debug)]
pub struct RawModeGuard {
    _private: (),
}

impl RawModeGuard {
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;
        Ok(Self { _private: () })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(error) = disable_raw_mode() {
            tracing::warn!(%error, "failed to leave raw mode");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_types() {
        assert!(matches!(clear_type(Erase::Screen), ClearType::All));
        assert!(matches!(
            clear_type(Erase::ScreenFromCursor),
            ClearType::FromCursorDown
        ));
        assert!(matches!(clear_type(Erase::Line), ClearType::CurrentLine));
        assert!(matches!(
            clear_type(Erase::LineFromCursor),
            ClearType::UntilNewLine
        ));
    }

    #[test]
    fn test_color_mode_override() {
        let backend = CrosstermBackend::new().with_color_mode(ColorMode::Basic);
        assert_eq!(backend.color_mode(), ColorMode::Basic);
        assert!(backend.is_cursor_visible());
    }
}
