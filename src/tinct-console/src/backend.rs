//! The console backend abstraction.
//!
//! A backend provides a handful of primitives (raw output, cursor movement,
//! erasing, size, title, line input). Styled output, bounds-checked cursor
//! movement and the clear operations are provided on top of them.

use crate::error::{ConsoleError, Result};
use tinct_core::{Color, ColorMode, Style};

/// A cursor position, `(column, row)`, 0-based.
pub type Position = (u16, u16);

/// Parts of the screen that can be erased.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Erase {
    Screen,
    ScreenFromCursor,
    Line,
    LineFromCursor,
}

/// Default style for error output: red foreground.
pub const ERROR_STYLE: Style = Style::new().fg(Color::RED);

/// Operations every console backend supports.
pub trait ConsoleBackend {
    // ===== Primitives =====

    /// Writes `text` to the output stream as is.
    fn write_raw(&mut self, text: &str) -> Result<()>;

    /// Writes `text` to the error stream as is.
    fn write_error_raw(&mut self, text: &str) -> Result<()>;

    fn flush(&mut self) -> Result<()>;

    /// Size of the console as `(width, height)` in characters.
    fn size(&self) -> Result<(u16, u16)>;

    /// Moves the cursor without checking bounds.
    fn move_cursor_unchecked(&mut self, pos: Position) -> Result<()>;

    fn erase(&mut self, erase: Erase) -> Result<()>;

    /// Asks the terminal where the cursor is. Output queued so far is flushed first.
    fn cursor_position(&mut self) -> Result<Position>;

    fn set_title(&mut self, title: &str) -> Result<()>;

    fn set_cursor_visible(&mut self, visible: bool) -> Result<()>;

    fn is_cursor_visible(&self) -> bool;

    /// Reads a line without its terminator; `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>>;

    /// How styles are rendered by this backend.
    fn color_mode(&self) -> ColorMode;

    // ===== Provided =====

    /// Writes `text` wrapped in `style` (the default style if `None`) and a reset.
    fn write(&mut self, text: &str, style: Option<&Style>) -> Result<()> {
        let painted = style
            .copied()
            .unwrap_or_default()
            .paint_for(text, self.color_mode());
        self.write_raw(&painted)
    }

    fn write_line(&mut self, text: &str, style: Option<&Style>) -> Result<()> {
        self.write(text, style)?;
        self.write_raw("\n")
    }

    /// Writes to the error stream, red unless `style` says otherwise.
    fn write_error(&mut self, text: &str, style: Option<&Style>) -> Result<()> {
        let painted = style
            .copied()
            .unwrap_or(ERROR_STYLE)
            .paint_for(text, self.color_mode());
        self.write_error_raw(&painted)
    }

    fn write_error_line(&mut self, text: &str, style: Option<&Style>) -> Result<()> {
        self.write_error(text, style)?;
        self.write_error_raw("\n")
    }

    /// Moves the cursor, failing with [`ConsoleError::OutOfBounds`] outside the console.
    fn move_cursor(&mut self, pos: Position) -> Result<()> {
        let (width, height) = self.size()?;
        let (x, y) = pos;
        if x >= width || y >= height {
            return Err(ConsoleError::OutOfBounds {
                x,
                y,
                width,
                height,
            });
        }
        self.move_cursor_unchecked(pos)
    }

    /// Moves to `pos` and writes `text` there.
    fn set(&mut self, text: &str, pos: Position, style: Option<&Style>) -> Result<()> {
        self.move_cursor(pos)?;
        self.write(text, style)
    }

    /// Moves to `pos` and writes `text` to the error stream there.
    fn set_error(&mut self, text: &str, pos: Position, style: Option<&Style>) -> Result<()> {
        self.move_cursor(pos)?;
        self.write_error(text, style)
    }

    /// Erases the whole screen and leaves the cursor at the top left.
    fn clear(&mut self) -> Result<()> {
        self.move_cursor((0, 0))?;
        self.erase(Erase::ScreenFromCursor)
    }

    /// Erases from `pos` to the end of the screen.
    fn clear_from(&mut self, pos: Position) -> Result<()> {
        self.move_cursor(pos)?;
        self.erase(Erase::ScreenFromCursor)
    }

    /// Erases row `line`, leaving the cursor at its start.
    fn clear_line(&mut self, line: u16) -> Result<()> {
        self.move_cursor((0, line))?;
        self.erase(Erase::Line)
    }

    /// Erases from `pos` to the end of its row.
    fn clear_line_from(&mut self, pos: Position) -> Result<()> {
        self.move_cursor(pos)?;
        self.erase(Erase::LineFromCursor)
    }
}

impl<B: ConsoleBackend + ?Sized> ConsoleBackend for Box<B> {
    fn write_raw(&mut self, text: &str) -> Result<()> {
        (**self).write_raw(text)
    }

    fn write_error_raw(&mut self, text: &str) -> Result<()> {
        (**self).write_error_raw(text)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }

    fn size(&self) -> Result<(u16, u16)> {
        (**self).size()
    }

    fn move_cursor_unchecked(&mut self, pos: Position) -> Result<()> {
        (**self).move_cursor_unchecked(pos)
    }

    fn erase(&mut self, erase: Erase) -> Result<()> {
        (**self).erase(erase)
    }

    fn cursor_position(&mut self) -> Result<Position> {
        (**self).cursor_position()
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        (**self).set_title(title)
    }

    fn set_cursor_visible(&mut self, visible: bool) -> Result<()> {
        (**self).set_cursor_visible(visible)
    }

    fn is_cursor_visible(&self) -> bool {
        (**self).is_cursor_visible()
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        (**self).read_line()
    }

    fn color_mode(&self) -> ColorMode {
        (**self).color_mode()
    }
}
