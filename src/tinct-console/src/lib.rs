//! Console output, windows and key input.
//!
//! Output goes through a [`ConsoleBackend`]. Two are provided:
//!
//! - [`AnsiBackend`]: portable, writes escape sequences to any writers
//! - [`CrosstermBackend`]: drives the real terminal through crossterm
//!
//! [`detect_backend`] picks one at startup. A [`Window`] adds a title and
//! bounds-checked cursor movement on top of a backend, and a [`KeyListener`]
//! delivers key presses from a background thread over a bounded channel.
//!
//! # Examples
//!
//! ```
//! use std::io::Cursor;
//! use tinct_console::{AnsiBackend, Window};
//! use tinct_core::{Color, ColorMode, Style};
//!
//! let backend = AnsiBackend::new(Vec::new(), Vec::new(), Cursor::new(Vec::new()))
//!     .with_color_mode(ColorMode::None)
//!     .with_size(40, 10);
//! let mut window = Window::new(backend);
//!
//! window.set("ready", (2, 1), Some(&Style::new().fg(Color::GREEN))).unwrap();
//! assert!(window.goto((40, 0)).is_err());
//! ```

pub mod ansi_backend;
pub mod backend;
pub mod crossterm_backend;
pub mod error;
pub mod keys;
pub mod listener;
pub mod window;

pub use ansi_backend::AnsiBackend;
pub use backend::{ConsoleBackend, ERROR_STYLE, Erase, Position};
pub use crossterm_backend::{CrosstermBackend, RawModeGuard, detect_backend};
pub use error::{ConsoleError, Result};
pub use keys::{CrosstermKeySource, Key, KeyPress, KeySource, ScriptedKeys, wait_for_key_press};
pub use listener::KeyListener;
pub use window::Window;
