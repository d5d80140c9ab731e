//! Portable backend that speaks plain ANSI escape sequences.

use crate::backend::{ConsoleBackend, Erase, Position};
use crate::error::{ConsoleError, Result};
use std::env;
use std::io::{self, BufRead, BufReader, Stderr, Stdin, Stdout, Write};
use tinct_core::ColorMode;
use tinct_core::ansi;

/// Size reported when neither an explicit size nor `COLUMNS`/`LINES` is available.
pub const FALLBACK_SIZE: (u16, u16) = (80, 24);

/// A backend that writes escape sequences to any pair of writers.
///
/// Works wherever the receiving end understands ANSI, including redirected
/// output captured for tests.
#[derive(Debug)]
pub struct AnsiBackend<W = Stdout, E = Stderr, R = BufReader<Stdin>> {
    out: W,
    err: E,
    input: R,
    mode: ColorMode,
    size: Option<(u16, u16)>,
    cursor_visible: bool,
}

impl AnsiBackend {
    /// Backend over the standard streams with colors detected from stdout.
    pub fn stdio() -> Self {
        AnsiBackend::new(io::stdout(), io::stderr(), BufReader::new(io::stdin()))
            .with_color_mode(ColorMode::detect_for_stdout())
    }
}

impl<W: Write, E: Write, R: BufRead> AnsiBackend<W, E, R> {
    /// Backend over the given streams, with true color output.
    pub fn new(out: W, err: E, input: R) -> Self {
        Self {
            out,
            err,
            input,
            mode: ColorMode::TrueColor,
            size: None,
            cursor_visible: true,
        }
    }

    pub fn with_color_mode(mut self, mode: ColorMode) -> Self {
        self.mode = mode;
        self
    }

    /// Fixes the reported size instead of reading `COLUMNS`/`LINES`.
    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.size = Some((width, height));
        self
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn error_output(&self) -> &E {
        &self.err
    }

    pub fn into_parts(self) -> (W, E, R) {
        (self.out, self.err, self.input)
    }
}

fn env_dimension(key: &str) -> Option<u16> {
    env::var(key).ok()?.trim().parse().ok().filter(|&n| n > 0)
}

/// Parses a `ESC [ row ; col R` report into a 0-based `(column, row)`.
///
/// Bytes typed before the report are skipped.
fn parse_cursor_report(reply: &[u8]) -> Result<Position> {
    let invalid =
        || ConsoleError::InvalidCursorReport(String::from_utf8_lossy(reply).into_owned());
    let text = std::str::from_utf8(reply).map_err(|_| invalid())?;
    let start = text.rfind("\x1b[").ok_or_else(invalid)?;
    let body = text[start + 2..].strip_suffix('R').ok_or_else(invalid)?;
    let (row, col) = body.split_once(';').ok_or_else(invalid)?;
    let row: u16 = row.parse().map_err(|_| invalid())?;
    let col: u16 = col.parse().map_err(|_| invalid())?;
    if row == 0 || col == 0 {
        return Err(invalid());
    }
    Ok((col - 1, row - 1))
}

impl<W: Write, E: Write, R: BufRead> ConsoleBackend for AnsiBackend<W, E, R> {
    fn write_raw(&mut self, text: &str) -> Result<()> {
        self.out.write_all(text.as_bytes())?;
        Ok(())
    }

    fn write_error_raw(&mut self, text: &str) -> Result<()> {
        self.err.write_all(text.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        self.err.flush()?;
        Ok(())
    }

    fn size(&self) -> Result<(u16, u16)> {
        if let Some(size) = self.size {
            return Ok(size);
        }
        match (env_dimension("COLUMNS"), env_dimension("LINES")) {
            (Some(width), Some(height)) => Ok((width, height)),
            _ => Ok(FALLBACK_SIZE),
        }
    }

    fn move_cursor_unchecked(&mut self, (x, y): Position) -> Result<()> {
        self.write_raw(&ansi::move_cursor(x, y))
    }

    fn erase(&mut self, erase: Erase) -> Result<()> {
        let code = match erase {
            Erase::Screen => ansi::ERASE_SCREEN,
            Erase::ScreenFromCursor => ansi::ERASE_SCREEN_FROM_CURSOR,
            Erase::Line => ansi::ERASE_LINE,
            Erase::LineFromCursor => ansi::ERASE_LINE_FROM_CURSOR,
        };
        self.write_raw(code)
    }

    fn cursor_position(&mut self) -> Result<Position> {
        self.write_raw(ansi::REQUEST_CURSOR_POSITION)?;
        self.out.flush()?;
        let mut reply = Vec::new();
        self.input.read_until(b'R', &mut reply)?;
        parse_cursor_report(&reply)
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        self.write_raw(&ansi::set_title(title))
    }

    fn set_cursor_visible(&mut self, visible: bool) -> Result<()> {
        self.write_raw(if visible {
            ansi::SHOW_CURSOR
        } else {
            ansi::HIDE_CURSOR
        })?;
        self.cursor_visible = visible;
        Ok(())
    }

    fn is_cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
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
