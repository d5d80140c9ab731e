//! Text styling.
//!
//! - [`TextAttributes`]: bitflags for text decorations (bold, italic, ...)
//! - [`Style`]: a complete description of how text looks, colors included
//!
//! A [`Style`] is absolute: converting it to escape codes emits a reset for
//! every attribute it does not set, so the previous style never leaks through.
//!
//! # Examples
//!
//! ```
//! use tinct_core::color::Color;
//! use tinct_core::style::Style;
//!
//! let error = Style::new().fg(Color::RED).bold();
//! let line = error.paint("failed");
//! assert!(line.starts_with("\x1b[1m"));
//! assert!(line.ends_with("failed\x1b[0m"));
//! ```

use crate::ansi::styles;
use crate::capabilities::ColorMode;
use crate::color::Color;
use bitflags::bitflags;
use smallvec::SmallVec;

bitflags! {
    /// Text decoration attributes as a compact bitfield.
    ///
    /// ```
    /// use tinct_core::style::TextAttributes;
    ///
    /// let attrs = TextAttributes::BOLD | TextAttributes::UNDERLINE;
    /// assert!(attrs.contains(TextAttributes::BOLD));
    /// assert!(!attrs.contains(TextAttributes::ITALIC));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TextAttributes: u16 {
        /// Bold/bright text.
        const BOLD             = 0b0_0000_0001;
        /// Dim/faint text.
        const FAINT            = 0b0_0000_0010;
        /// Italic text.
        const ITALIC           = 0b0_0000_0100;
        /// Underlined text.
        const UNDERLINE        = 0b0_0000_1000;
        /// Blinking text (rarely supported in modern terminals).
        const BLINK            = 0b0_0001_0000;
        /// Reverse video (swap fg and bg colors).
        const INVERSE          = 0b0_0010_0000;
        /// Hidden text.
        const INVISIBLE        = 0b0_0100_0000;
        /// Strikethrough text.
        const STRIKETHROUGH    = 0b0_1000_0000;
        /// Double underline.
        const DOUBLE_UNDERLINE = 0b1_0000_0000;
    }
}

impl TextAttributes {
    /// No attributes set (alias for `empty()`).
    pub const NONE: Self = Self::empty();

    /// Returns the SGR codes that put a terminal into exactly this attribute
    /// state: a set code for each present attribute, a reset code otherwise.
    ///
    /// Bold and faint share reset code 22, as do underline and double
    /// underline (24). The reset is only emitted when neither member of the
    /// pair is set.
    pub fn to_sgr_codes(self) -> SmallVec<[u8; 12]> {
        let mut codes = SmallVec::new();

        if self.contains(Self::BOLD) {
            codes.push(1);
        }
        if self.contains(Self::FAINT) {
            codes.push(2);
        }
        if !self.intersects(Self::BOLD | Self::FAINT) {
            codes.push(22);
        }
        codes.push(if self.contains(Self::ITALIC) { 3 } else { 23 });
        if self.contains(Self::UNDERLINE) {
            codes.push(4);
        }
        codes.push(if self.contains(Self::BLINK) { 5 } else { 25 });
        codes.push(if self.contains(Self::INVERSE) { 7 } else { 27 });
        codes.push(if self.contains(Self::INVISIBLE) { 8 } else { 28 });
        codes.push(if self.contains(Self::STRIKETHROUGH) { 9 } else { 29 });
        if self.contains(Self::DOUBLE_UNDERLINE) {
            codes.push(21);
        }
        if !self.intersects(Self::UNDERLINE | Self::DOUBLE_UNDERLINE) {
            codes.push(24);
        }

        codes
    }
}

/// Complete styling information: foreground, background and attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Style {
    /// Foreground color.
    pub fg: Color,
    /// Background color.
    pub bg: Color,
    /// Text decoration attributes.
    pub attributes: TextAttributes,
}

impl Style {
    /// A style with default colors and no attributes.
    pub const RESET: Self = Self::new();

    /// Creates a new style with default colors and no attributes.
    #[inline]
    pub const fn new() -> Self {
        Self {
            fg: Color::DEFAULT,
            bg: Color::DEFAULT,
            attributes: TextAttributes::NONE,
        }
    }

    // ===== Builder methods =====

    /// Sets the foreground color.
    #[inline]
    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = color;
        self
    }

    /// Sets the background color.
    #[inline]
    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = color;
        self
    }

    /// Replaces the attributes.
    #[inline]
    pub const fn attributes(mut self, attributes: TextAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    #[inline]
    pub const fn bold(self) -> Self {
        self.with(TextAttributes::BOLD)
    }

    #[inline]
    pub const fn faint(self) -> Self {
        self.with(TextAttributes::FAINT)
    }

    #[inline]
    pub const fn italic(self) -> Self {
        self.with(TextAttributes::ITALIC)
    }

    #[inline]
    pub const fn underline(self) -> Self {
        self.with(TextAttributes::UNDERLINE)
    }

    #[inline]
    pub const fn blink(self) -> Self {
        self.with(TextAttributes::BLINK)
    }

    #[inline]
    pub const fn inverse(self) -> Self {
        self.with(TextAttributes::INVERSE)
    }

    #[inline]
    pub const fn invisible(self) -> Self {
        self.with(TextAttributes::INVISIBLE)
    }

    #[inline]
    pub const fn strikethrough(self) -> Self {
        self.with(TextAttributes::STRIKETHROUGH)
    }

    #[inline]
    pub const fn double_underline(self) -> Self {
        self.with(TextAttributes::DOUBLE_UNDERLINE)
    }

    #[inline]
    const fn with(mut self, attr: TextAttributes) -> Self {
        self.attributes = self.attributes.union(attr);
        self
    }

    // ===== Combination =====

    /// Merges another style on top of this one.
    ///
    /// Attributes are combined; non-default colors of `other` win.
    #[must_use]
    pub fn merge(&self, other: &Style) -> Self {
        Self {
            fg: if other.fg.is_default() { self.fg } else { other.fg },
            bg: if other.bg.is_default() { self.bg } else { other.bg },
            attributes: self.attributes | other.attributes,
        }
    }

    // ===== Output =====

    /// Escape codes that switch the terminal to this style.
    pub fn to_ansi(&self) -> String {
        self.to_ansi_for(ColorMode::TrueColor)
    }

    /// Escape codes for this style with colors adapted to `mode`.
    ///
    /// Returns an empty string for [`ColorMode::None`].
    pub fn to_ansi_for(&self, mode: ColorMode) -> String {
        if !mode.is_enabled() {
            return String::new();
        }
        let mut out = String::with_capacity(64);
        for code in self.attributes.to_sgr_codes() {
            out.push_str("\x1b[");
            out.push_str(&code.to_string());
            out.push('m');
        }
        out.push_str(&self.bg.adapt(mode).to_background_ansi());
        out.push_str(&self.fg.adapt(mode).to_foreground_ansi());
        out
    }

    /// Wraps `text` in this style followed by a full reset.
    pub fn paint(&self, text: impl AsRef<str>) -> String {
        self.paint_for(text, ColorMode::TrueColor)
    }

    /// [`Style::paint`] with colors adapted to `mode`; plain text for
    /// [`ColorMode::None`].
    pub fn paint_for(&self, text: impl AsRef<str>, mode: ColorMode) -> String {
        if !mode.is_enabled() {
            return text.as_ref().to_string();
        }
        format!("{}{}{}", self.to_ansi_for(mode), text.as_ref(), styles::RESET_ALL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ansi::strip_ansi_codes;
    use crate::color::Colors;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_style_resets_everything() {
        assert_eq!(
            Style::new().to_ansi(),
            "\x1b[22m\x1b[23m\x1b[25m\x1b[27m\x1b[28m\x1b[29m\x1b[24m\x1b[49m\x1b[39m"
        );
    }

    #[test]
    fn test_bold_does_not_emit_shared_reset() {
        let codes = TextAttributes::BOLD.to_sgr_codes();
        assert_eq!(codes.as_slice(), &[1, 23, 25, 27, 28, 29, 24]);
    }

    #[test]
    fn test_double_underline_suppresses_underline_reset() {
        let codes = TextAttributes::DOUBLE_UNDERLINE.to_sgr_codes();
        assert!(codes.contains(&21));
        assert!(!codes.contains(&24));
    }

    #[test]
    fn test_colors_come_last() {
        let style = Style::new().fg(Color::ORANGE).bg(Colors::Blue.into()).italic();
        let ansi = style.to_ansi();
        assert!(ansi.contains("\x1b[3m"));
        assert!(ansi.ends_with("\x1b[44m\x1b[38;2;255;160;0m"));
    }

    #[test]
    fn test_merge() {
        let base = Style::new().fg(Color::WHITE).bold();
        let over = Style::new().bg(Color::DARK_BLUE).underline();
        let merged = base.merge(&over);
        assert_eq!(merged.fg, Color::WHITE);
        assert_eq!(merged.bg, Color::DARK_BLUE);
        assert_eq!(
            merged.attributes,
            TextAttributes::BOLD | TextAttributes::UNDERLINE
        );
    }

    #[test]
    fn test_paint() {
        let painted = Style::new().fg(Color::RED).paint("boom");
        assert!(painted.ends_with("boom\x1b[0m"));
        assert_eq!(strip_ansi_codes(&painted), "boom");
    }

    #[test]
    fn test_paint_without_colors() {
        assert_eq!(Style::new().bold().paint_for("x", ColorMode::None), "x");
        assert_eq!(Style::new().to_ansi_for(ColorMode::None), "");
    }

    #[test]
    fn test_mode_adapts_colors() {
        let ansi = Style::new().fg(Color::RED).to_ansi_for(ColorMode::Extended);
        assert!(ansi.ends_with("\x1b[38;5;196m"));
    }
}
