//! A titled console window over a backend.

use crate::backend::{ConsoleBackend, Position};
use crate::error::Result;
use crate::keys::{KeyPress, KeySource, wait_for_key_press};
use crate::listener::KeyListener;
use tinct_core::Style;

/// A console window: a backend plus the title it was given.
///
/// Every cursor position is checked against the current size; see
/// [`Window::goto`].
#[derive(Debug)]
pub struct Window<B: ConsoleBackend> {
    backend: B,
    title: String,
}

impl<B: ConsoleBackend> Window<B> {
    /// Wraps `backend` without touching the terminal title.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            title: String::new(),
        }
    }

    /// Wraps `backend` and sets the terminal title.
    pub fn with_title(backend: B, title: impl Into<String>) -> Result<Self> {
        let mut window = Self::new(backend);
        window.set_title(title)?;
        Ok(window)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<()> {
        let title = title.into();
        self.backend.set_title(&title)?;
        self.title = title;
        Ok(())
    }

    pub fn width(&self) -> Result<u16> {
        Ok(self.backend.size()?.0)
    }

    pub fn height(&self) -> Result<u16> {
        Ok(self.backend.size()?.1)
    }

    /// Moves the cursor to `pos`.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::OutOfBounds`](crate::ConsoleError::OutOfBounds) if
    /// `pos` lies outside the window.
    pub fn goto(&mut self, pos: Position) -> Result<()> {
        self.backend.move_cursor(pos)
    }

    pub fn write(&mut self, text: impl AsRef<str>, style: Option<&Style>) -> Result<()> {
        self.backend.write(text.as_ref(), style)
    }

    pub fn write_line(&mut self, text: impl AsRef<str>, style: Option<&Style>) -> Result<()> {
        self.backend.write_line(text.as_ref(), style)
    }

    pub fn write_error(&mut self, text: impl AsRef<str>, style: Option<&Style>) -> Result<()> {
        self.backend.write_error(text.as_ref(), style)
    }

    pub fn write_error_line(&mut self, text: impl AsRef<str>, style: Option<&Style>) -> Result<()> {
        self.backend.write_error_line(text.as_ref(), style)
    }

    pub fn set(&mut self, text: impl AsRef<str>, pos: Position, style: Option<&Style>) -> Result<()> {
        self.backend.set(text.as_ref(), pos, style)
    }

    pub fn set_error(
        &mut self,
        text: impl AsRef<str>,
        pos: Position,
        style: Option<&Style>,
    ) -> Result<()> {
        self.backend.set_error(text.as_ref(), pos, style)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.backend.clear()
    }

    pub fn clear_from(&mut self, pos: Position) -> Result<()> {
        self.backend.clear_from(pos)
    }

    pub fn clear_line(&mut self, line: u16) -> Result<()> {
        self.backend.clear_line(line)
    }

    pub fn clear_line_from(&mut self, pos: Position) -> Result<()> {
        self.backend.clear_line_from(pos)
    }

    /// Current cursor position, as reported by the terminal.
    pub fn cursor_position(&mut self) -> Result<Position> {
        self.backend.cursor_position()
    }

    pub fn set_cursor_visible(&mut self, visible: bool) -> Result<()> {
        self.backend.set_cursor_visible(visible)
    }

    pub fn read_line(&mut self) -> Result<Option<String>> {
        self.backend.read_line()
    }

    pub fn flush(&mut self) -> Result<()> {
        self.backend.flush()
    }

    /// Blocks until a key is pressed on `source`.
    pub fn wait_for_key_press(&mut self, source: &mut dyn KeySource) -> Result<KeyPress> {
        self.backend.flush()?;
        wait_for_key_press(source)
    }

    /// Starts a [`KeyListener`] on `source`.
    pub fn listen<S: KeySource + 'static>(&self, source: S, capacity: usize) -> Result<KeyListener> {
        KeyListener::spawn(source, capacity)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }
}
