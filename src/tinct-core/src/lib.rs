//! Core terminal styling for tinct.
//!
//! - [`ansi`]: escape-code table, `NO_COLOR` detection, escape stripping
//! - [`color`]: palette, 256-color table and true-color representations
//! - [`style`]: absolute styles built from colors and [`TextAttributes`]
//! - [`style_builder`]: relative, incremental styled-string construction
//! - [`capabilities`]: how many colors the terminal can show
//!
//! # Examples
//!
//! ```
//! use tinct_core::{Color, Style, StyleBuilder};
//!
//! let warning = Style::new().fg(Color::YELLOW).bold();
//! let line = StyleBuilder::new()
//!     .styled(&warning, "warning")
//!     .text(": disk almost full")
//!     .build();
//!
//! assert_eq!(tinct_core::ansi::strip_ansi_codes(&line), "warning: disk almost full");
//! ```

pub mod ansi;
pub mod capabilities;
pub mod color;
pub mod error;
pub mod style;
pub mod style_builder;

pub use capabilities::ColorMode;
pub use color::{Color, Colors};
pub use error::{ColorParseError, ColorResult};
pub use style::{Style, TextAttributes};
pub use style_builder::StyleBuilder;
