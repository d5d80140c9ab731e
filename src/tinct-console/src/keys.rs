//! Key presses and where they come from.

use crate::error::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

/// How long a blocking key read sleeps between cancellation checks.
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// A key, independent of modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Tab,
    BackTab,
    Backspace,
    Escape,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    Delete,
    F(u8),
    /// Anything else the terminal reports.
    Other,
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Esc => Key::Escape,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Insert => Key::Insert,
            KeyCode::Delete => Key::Delete,
            KeyCode::F(n) => Key::F(n),
            _ => Key::Other,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(' ') => f.write_str("Space"),
            Key::Char(c) => write!(f, "{}", c.to_uppercase()),
            Key::F(n) => write!(f, "F{n}"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// A single key press with its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPress {
    pub code: Key,
    /// The character the key produces, with shift applied.
    pub ch: Option<char>,
    pub alt: bool,
    pub shift: bool,
    pub control: bool,
}

impl KeyPress {
    /// An unmodified press of `code`.
    pub fn new(code: Key) -> Self {
        let ch = match code {
            Key::Char(c) => Some(c),
            Key::Enter => Some('\n'),
            Key::Tab => Some('\t'),
            _ => None,
        };
        Self {
            code,
            ch,
            alt: false,
            shift: false,
            control: false,
        }
    }

    pub fn char(c: char) -> Self {
        Self::new(Key::Char(c)).with_shift(c.is_uppercase())
    }

    pub fn with_alt(mut self, alt: bool) -> Self {
        self.alt = alt;
        self
    }

    pub fn with_shift(mut self, shift: bool) -> Self {
        self.shift = shift;
        self
    }

    pub fn with_control(mut self, control: bool) -> Self {
        self.control = control;
        self
    }
}

impl From<KeyEvent> for KeyPress {
    fn from(event: KeyEvent) -> Self {
        Self::new(event.code.into())
            .with_alt(event.modifiers.contains(KeyModifiers::ALT))
            .with_shift(event.modifiers.contains(KeyModifiers::SHIFT))
            .with_control(event.modifiers.contains(KeyModifiers::CONTROL))
    }
}

impl fmt::Display for KeyPress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.control {
            f.write_str("Ctrl+")?;
        }
        if self.alt {
            f.write_str("Alt+")?;
        }
        if self.shift && !matches!(self.code, Key::Char(_)) {
            f.write_str("Shift+")?;
        }
        write!(f, "{}", self.code)
    }
}

/// Something that produces key presses.
pub trait KeySource: Send {
    /// Waits up to `timeout` for a key press.
    fn poll(&mut self, timeout: Duration) -> Result<Option<KeyPress>>;
}

/// Key presses from the terminal, read through crossterm.
///
/// Only press events are reported; releases and repeats are skipped, as are
/// non-key events.
#[derive(Debug, Default, Clone, Copy)]
pub struct CrosstermKeySource;

impl KeySource for CrosstermKeySource {
    fn poll(&mut self, timeout: Duration) -> Result<Option<KeyPress>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key.into())),
            _ => Ok(None),
        }
    }
}

/// A fixed sequence of key presses. Once exhausted, polls time out.
#[derive(Debug, Default, Clone)]
pub struct ScriptedKeys {
    keys: VecDeque<KeyPress>,
}

impl ScriptedKeys {
    pub fn new(keys: impl IntoIterator<Item = KeyPress>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    /// One unmodified press per character of `text`.
    pub fn from_text(text: &str) -> Self {
        Self::new(text.chars().map(KeyPress::char))
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl KeySource for ScriptedKeys {
    fn poll(&mut self, timeout: Duration) -> Result<Option<KeyPress>> {
        match self.keys.pop_front() {
            Some(key) => Ok(Some(key)),
            None => {
                std::thread::sleep(timeout);
                Ok(None)
            }
        }
    }
}

/// Blocks until `source` yields a key press.
pub fn wait_for_key_press(source: &mut dyn KeySource) -> Result<KeyPress> {
    loop {
        if let Some(key) = source.poll(POLL_INTERVAL)? {
            return Ok(key);
        }
    }
}
