//! Incremental construction of styled strings.
//!
//! [`StyleBuilder`] appends escape codes and text to a single buffer in the
//! order they are requested. Unlike [`Style`], it is relative: turning bold on
//! stays in effect until it is turned off or reset.
//!
//! # Examples
//!
//! ```
//! use tinct_core::color::Color;
//! use tinct_core::style_builder::StyleBuilder;
//!
//! let text = StyleBuilder::new()
//!     .bold(true)
//!     .text("name")
//!     .bold(false)
//!     .text(" ")
//!     .foreground(Color::ORANGE)
//!     .text("1.0.0")
//!     .reset()
//!     .build();
//!
//! assert_eq!(tinct_core::ansi::strip_ansi_codes(&text), "name 1.0.0");
//! assert_eq!(StyleBuilder::plain().bold(true).text("name").build(), "name");
//! ```

use crate::ansi::styles;
use crate::capabilities::ColorMode;
use crate::color::Color;
use crate::style::Style;
use std::fmt::{self, Write as _};

/// Accumulates style directives and text into one string.
#[derive(Debug, Clone, Default)]
pub struct StyleBuilder {
    buf: String,
    mode: ColorMode,
}

impl StyleBuilder {
    /// Creates a builder that emits true-color escape codes.
    pub fn new() -> Self {
        Self::with_mode(ColorMode::TrueColor)
    }

    /// Creates a builder that only keeps text.
    pub fn plain() -> Self {
        Self::with_mode(ColorMode::None)
    }

    /// Creates a builder whose colors are adapted to `mode`.
    pub fn with_mode(mode: ColorMode) -> Self {
        Self {
            buf: String::new(),
            mode,
        }
    }

    /// Creates a builder that emits codes only when `colors` is true.
    pub fn with_colors(colors: bool) -> Self {
        if colors { Self::new() } else { Self::plain() }
    }

    /// The color mode this builder renders for.
    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    fn code(mut self, code: &str) -> Self {
        if self.mode.is_enabled() {
            self.buf.push_str(code);
        }
        self
    }

    fn toggle(self, on: bool, set: &str, reset: &str) -> Self {
        self.code(if on { set } else { reset })
    }

    // ===== Attributes =====

    pub fn bold(self, on: bool) -> Self {
        self.toggle(on, styles::BOLD, styles::RESET_BOLD)
    }

    pub fn faint(self, on: bool) -> Self {
        self.toggle(on, styles::FAINT, styles::RESET_FAINT)
    }

    pub fn italic(self, on: bool) -> Self {
        self.toggle(on, styles::ITALIC, styles::RESET_ITALIC)
    }

    pub fn underline(self, on: bool) -> Self {
        self.toggle(on, styles::UNDERLINE, styles::RESET_UNDERLINE)
    }

    pub fn blink(self, on: bool) -> Self {
        self.toggle(on, styles::BLINK, styles::RESET_BLINK)
    }

    pub fn inverse(self, on: bool) -> Self {
        self.toggle(on, styles::INVERSE, styles::RESET_INVERSE)
    }

    pub fn invisible(self, on: bool) -> Self {
        self.toggle(on, styles::INVISIBLE, styles::RESET_INVISIBLE)
    }

    pub fn strikethrough(self, on: bool) -> Self {
        self.toggle(on, styles::STRIKETHROUGH, styles::RESET_STRIKETHROUGH)
    }

    pub fn double_underline(self, on: bool) -> Self {
        self.toggle(on, styles::DOUBLE_UNDERLINE, styles::RESET_DOUBLE_UNDERLINE)
    }

    /// Resets all attributes and colors.
    pub fn reset(self) -> Self {
        self.code(styles::RESET_ALL)
    }

    // ===== Colors =====

    pub fn foreground(self, color: Color) -> Self {
        let code = color.adapt(self.mode).to_foreground_ansi();
        self.code(&code)
    }

    pub fn background(self, color: Color) -> Self {
        let code = color.adapt(self.mode).to_background_ansi();
        self.code(&code)
    }

    pub fn reset_foreground(self) -> Self {
        self.foreground(Color::DEFAULT)
    }

    pub fn reset_background(self) -> Self {
        self.background(Color::DEFAULT)
    }

    /// Switches to a complete [`Style`].
    pub fn style(self, style: &Style) -> Self {
        let code = style.to_ansi_for(self.mode);
        self.code(&code)
    }

    // ===== Text =====

    /// Appends text verbatim.
    pub fn text(mut self, text: impl fmt::Display) -> Self {
        // Writing to a String cannot fail.
        let _ = write!(self.buf, "{}", text);
        self
    }

    /// Appends `text` in `style`, then resets.
    pub fn styled(self, style: &Style, text: impl fmt::Display) -> Self {
        self.style(style).text(text).reset()
    }

    pub fn new_line(mut self) -> Self {
        self.buf.push('\n');
        self
    }

    /// Returns true if nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Finishes the builder and returns the accumulated string.
    pub fn build(self) -> String {
        self.buf
    }
}

impl fmt::Display for StyleBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.buf)
    }
}

impl From<StyleBuilder> for String {
    fn from(builder: StyleBuilder) -> Self {
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Colors;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_appends_in_order() {
        let s = StyleBuilder::new()
            .bold(true)
            .text("a")
            .bold(false)
            .italic(true)
            .text(1)
            .reset()
            .build();
        assert_eq!(s, "\x1b[1ma\x1b[22m\x1b[3m1\x1b[0m");
    }

    #[test]
    fn test_every_toggle_pair() {
        let on = StyleBuilder::new()
            .faint(true)
            .underline(true)
            .blink(true)
            .inverse(true)
            .invisible(true)
            .strikethrough(true)
            .double_underline(true)
            .build();
        assert_eq!(on, "\x1b[2m\x1b[4m\x1b[5m\x1b[7m\x1b[8m\x1b[9m\x1b[21m");

        let off = StyleBuilder::new()
            .faint(false)
            .underline(false)
            .blink(false)
            .inverse(false)
            .invisible(false)
            .strikethrough(false)
            .double_underline(false)
            .build();
        assert_eq!(off, "\x1b[22m\x1b[24m\x1b[25m\x1b[27m\x1b[28m\x1b[29m\x1b[24m");
    }

    #[test]
    fn test_colors() {
        let s = StyleBuilder::new()
            .foreground(Colors::Green.into())
            .background(Color::Table(17))
            .reset_foreground()
            .reset_background()
            .build();
        assert_eq!(s, "\x1b[32m\x1b[48;5;17m\x1b[39m\x1b[49m");
    }

    #[test]
    fn test_plain_keeps_only_text() {
        let s = StyleBuilder::plain()
            .bold(true)
            .foreground(Color::RED)
            .text("x")
            .new_line()
            .styled(&Style::new().underline(), "y")
            .build();
        assert_eq!(s, "x\ny");
    }

    #[test]
    fn test_with_mode_adapts() {
        let s = StyleBuilder::with_mode(ColorMode::Basic)
            .foreground(Color::RED)
            .build();
        assert_eq!(s, "\x1b[91m");
    }

    #[test]
    fn test_display_matches_build() {
        let builder = StyleBuilder::new().underline(true).text("u");
        let shown = builder.to_string();
        assert_eq!(shown, builder.build());
    }
}
