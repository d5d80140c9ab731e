//! Terminal color model.
//!
//! A [`Color`] is one of three representations, each mapping to a different
//! family of SGR sequences:
//!
//! - [`Color::Palette`]: the 16 standard colors plus the terminal default (`30`-`37`, `90`-`97`, `39`)
//! - [`Color::Table`]: an index into the 256-color table (`38;5;n`)
//! - [`Color::Rgb`]: a 24-bit true color (`38;2;r;g;b`)
//!
//! Background sequences use the same layout with `+10` for palette codes and
//! `48` instead of `38` for the extended forms.
//!
//! # Examples
//!
//! ```
//! use tinct_core::color::{Color, Colors};
//!
//! let orange = Color::from_hex("#FFA000").unwrap();
//! assert_eq!(orange, Color::ORANGE);
//! assert_eq!(orange.to_hex().as_deref(), Some("FFA000"));
//!
//! assert_eq!(Color::from(Colors::Red).to_foreground_ansi(), "\x1b[31m");
//! assert_eq!(Color::Table(208).to_background_ansi(), "\x1b[48;5;208m");
//! ```

use crate::capabilities::ColorMode;
use crate::error::{ColorParseError, ColorResult};
use std::fmt;
use std::str::FromStr;

/// The standard terminal palette.
///
/// Discriminants are the SGR foreground codes; the background code is the
/// foreground code plus 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Colors {
    Black = 30,
    Red = 31,
    Green = 32,
    Yellow = 33,
    Blue = 34,
    Magenta = 35,
    Cyan = 36,
    White = 37,
    /// The terminal's own default color.
    #[default]
    Default = 39,
    BrightBlack = 90,
    BrightRed = 91,
    BrightGreen = 92,
    BrightYellow = 93,
    BrightBlue = 94,
    BrightMagenta = 95,
    BrightCyan = 96,
    BrightWhite = 97,
}

impl Colors {
    /// All non-default palette entries, in table order (index 0-15).
    pub const ALL: [Self; 16] = [
        Self::Black,
        Self::Red,
        Self::Green,
        Self::Yellow,
        Self::Blue,
        Self::Magenta,
        Self::Cyan,
        Self::White,
        Self::BrightBlack,
        Self::BrightRed,
        Self::BrightGreen,
        Self::BrightYellow,
        Self::BrightBlue,
        Self::BrightMagenta,
        Self::BrightCyan,
        Self::BrightWhite,
    ];

    /// Returns the SGR foreground code.
    #[inline]
    pub const fn fg_code(self) -> u8 {
        self as u8
    }

    /// Returns the SGR background code.
    #[inline]
    pub const fn bg_code(self) -> u8 {
        self as u8 + 10
    }

    /// Returns the index of this entry in the 256-color table, if any.
    pub const fn table_index(self) -> Option<u8> {
        let code = self as u8;
        match code {
            30..=37 => Some(code - 30),
            90..=97 => Some(code - 90 + 8),
            _ => None,
        }
    }

    /// Approximate RGB value (xterm defaults). `None` for [`Colors::Default`].
    pub const fn approximate_rgb(self) -> Option<(u8, u8, u8)> {
        Some(match self {
            Self::Black => (0, 0, 0),
            Self::Red => (205, 0, 0),
            Self::Green => (0, 205, 0),
            Self::Yellow => (205, 205, 0),
            Self::Blue => (0, 0, 238),
            Self::Magenta => (205, 0, 205),
            Self::Cyan => (0, 205, 205),
            Self::White => (229, 229, 229),
            Self::BrightBlack => (127, 127, 127),
            Self::BrightRed => (255, 0, 0),
            Self::BrightGreen => (0, 255, 0),
            Self::BrightYellow => (255, 255, 0),
            Self::BrightBlue => (92, 92, 255),
            Self::BrightMagenta => (255, 0, 255),
            Self::BrightCyan => (0, 255, 255),
            Self::BrightWhite => (255, 255, 255),
            Self::Default => return None,
        })
    }
}

/// A terminal color in one of the three supported representations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// A standard palette color.
    Palette(Colors),
    /// An index into the 256-color table.
    Table(u8),
    /// A 24-bit true color.
    Rgb { r: u8, g: u8, b: u8 },
}

impl Default for Color {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<Colors> for Color {
    fn from(colors: Colors) -> Self {
        Self::Palette(colors)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::Rgb { r, g, b }
    }
}

// ============================================================================
// Named colors
// ============================================================================

impl Color {
    /// The terminal's default color.
    pub const DEFAULT: Self = Self::Palette(Colors::Default);

    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const LIGHT_RED: Self = Self::rgb(255, 80, 80);
    pub const DARK_GREEN: Self = Self::rgb(30, 190, 30);
    pub const DARK_BLUE: Self = Self::rgb(30, 30, 190);
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    pub const MAGENTA: Self = Self::rgb(255, 0, 255);
    pub const CYAN: Self = Self::rgb(0, 255, 255);
    pub const ORANGE: Self = Self::rgb(255, 160, 0);
    pub const GRAY: Self = Self::rgb(180, 180, 180);
    pub const DARK_GRAY: Self = Self::rgb(64, 64, 64);

    const NAMED: [(&'static str, Self); 14] = [
        ("black", Self::BLACK),
        ("white", Self::WHITE),
        ("red", Self::RED),
        ("green", Self::GREEN),
        ("blue", Self::BLUE),
        ("light_red", Self::LIGHT_RED),
        ("dark_green", Self::DARK_GREEN),
        ("dark_blue", Self::DARK_BLUE),
        ("yellow", Self::YELLOW),
        ("magenta", Self::MAGENTA),
        ("cyan", Self::CYAN),
        ("orange", Self::ORANGE),
        ("gray", Self::GRAY),
        ("dark_gray", Self::DARK_GRAY),
    ];
}

// ============================================================================
// Construction
// ============================================================================

impl Color {
    /// Creates a true color from its components.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb { r, g, b }
    }

    /// Parses a true color from six hex digits, with or without a leading `#`.
    ///
    /// # Errors
    ///
    /// Returns an error for empty input, any length other than six digits, or
    /// a non-hex character.
    pub fn from_hex(hex: &str) -> ColorResult<Self> {
        let hex = hex.trim();
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.is_empty() {
            return Err(ColorParseError::EmptyInput);
        }
        let len = digits.chars().count();
        if len != 6 {
            return Err(ColorParseError::InvalidLength(len));
        }
        if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidHexChar(bad));
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16);
        match (channel(0), channel(2), channel(4)) {
            (Ok(r), Ok(g), Ok(b)) => Ok(Self::rgb(r, g, b)),
            _ => Err(ColorParseError::InvalidLength(len)),
        }
    }

    /// Looks up one of the named color constants (case-insensitive, `-`,
    /// `_` and spaces are interchangeable).
    pub fn from_name(name: &str) -> ColorResult<Self> {
        let normalized: String = name
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();
        let normalized = match normalized.as_str() {
            "grey" => "gray",
            "dark_grey" => "dark_gray",
            "lightred" => "light_red",
            "darkgreen" => "dark_green",
            "darkblue" => "dark_blue",
            "darkgray" | "darkgrey" => "dark_gray",
            other => other,
        };
        if normalized == "default" {
            return Ok(Self::DEFAULT);
        }
        Self::NAMED
            .iter()
            .find(|(n, _)| *n == normalized)
            .map(|(_, c)| *c)
            .ok_or_else(|| ColorParseError::UnknownColor(name.to_string()))
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    /// Accepts `#RRGGBB`, `RRGGBB` or a color name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ColorParseError::EmptyInput);
        }
        if trimmed.starts_with('#') {
            return Self::from_hex(trimmed);
        }
        match Self::from_name(trimmed) {
            Ok(color) => Ok(color),
            Err(name_err) => {
                if trimmed.len() == 6 && trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
                    Self::from_hex(trimmed)
                } else {
                    Err(name_err)
                }
            }
        }
    }
}

// ============================================================================
// Conversion
// ============================================================================

impl Color {
    /// Returns `true` for the terminal default color.
    #[inline]
    pub fn is_default(&self) -> bool {
        matches!(self, Self::Palette(Colors::Default))
    }

    /// Exports a true color as six uppercase hex digits.
    ///
    /// Palette and table colors have no exact RGB value and return `None`.
    pub fn to_hex(&self) -> Option<String> {
        match self {
            Self::Rgb { r, g, b } => Some(format!("{:02X}{:02X}{:02X}", r, g, b)),
            _ => None,
        }
    }

    /// Returns an RGB approximation of any color except the default.
    pub fn to_rgb(&self) -> Option<(u8, u8, u8)> {
        match *self {
            Self::Rgb { r, g, b } => Some((r, g, b)),
            Self::Palette(p) => p.approximate_rgb(),
            Self::Table(index) => Some(table_to_rgb(index)),
        }
    }

    /// Foreground SGR sequence for this color.
    pub fn to_foreground_ansi(&self) -> String {
        match *self {
            Self::Palette(p) => format!("\x1b[{}m", p.fg_code()),
            Self::Table(index) => format!("\x1b[38;5;{}m", index),
            Self::Rgb { r, g, b } => format!("\x1b[38;2;{};{};{}m", r, g, b),
        }
    }

    /// Background SGR sequence for this color.
    pub fn to_background_ansi(&self) -> String {
        match *self {
            Self::Palette(p) => format!("\x1b[{}m", p.bg_code()),
            Self::Table(index) => format!("\x1b[48;5;{}m", index),
            Self::Rgb { r, g, b } => format!("\x1b[48;2;{};{};{}m", r, g, b),
        }
    }

    /// Converts this color to the richest representation the given mode
    /// supports.
    ///
    /// [`ColorMode::None`] maps everything to the default color.
    pub fn adapt(&self, mode: ColorMode) -> Self {
        match (mode, *self) {
            (ColorMode::None, _) => Self::DEFAULT,
            (_, Self::Palette(_)) | (ColorMode::TrueColor, _) => *self,
            (ColorMode::Extended, Self::Table(_)) => *self,
            (ColorMode::Extended, Self::Rgb { r, g, b }) => Self::Table(rgb_to_table(r, g, b)),
            (ColorMode::Basic, Self::Table(index)) if index < 16 => {
                Self::Palette(Colors::ALL[index as usize])
            }
            (ColorMode::Basic, other) => match other.to_rgb() {
                Some((r, g, b)) => Self::Palette(nearest_palette(r, g, b)),
                None => Self::DEFAULT,
            },
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb { .. } => write!(f, "#{}", self.to_hex().unwrap_or_default()),
            Self::Table(index) => write!(f, "table({})", index),
            Self::Palette(p) => write!(f, "{:?}", p),
        }
    }
}

const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

/// RGB value of an entry in the xterm 256-color table.
fn table_to_rgb(index: u8) -> (u8, u8, u8) {
    match index {
        0..=15 => Colors::ALL[index as usize]
            .approximate_rgb()
            .unwrap_or((0, 0, 0)),
        16..=231 => {
            let i = index - 16;
            (
                CUBE_LEVELS[(i / 36) as usize],
                CUBE_LEVELS[((i / 6) % 6) as usize],
                CUBE_LEVELS[(i % 6) as usize],
            )
        }
        _ => {
            let v = 8 + (index - 232) * 10;
            (v, v, v)
        }
    }
}

/// Maps a true color to the closest 256-color table entry.
fn rgb_to_table(r: u8, g: u8, b: u8) -> u8 {
    if r == g && g == b {
        return match r {
            0..=7 => 16,
            249..=255 => 231,
            v => 232 + ((u16::from(v) - 8) * 24 / 247) as u8,
        };
    }
    let level = |v: u8| -> u8 {
        CUBE_LEVELS
            .iter()
            .enumerate()
            .min_by_key(|(_, l)| (i16::from(**l) - i16::from(v)).unsigned_abs())
            .map(|(i, _)| i as u8)
            .unwrap_or(0)
    };
    16 + 36 * level(r) + 6 * level(g) + level(b)
}

fn nearest_palette(r: u8, g: u8, b: u8) -> Colors {
    let distance = |c: &Colors| -> u32 {
        let (pr, pg, pb) = c.approximate_rgb().unwrap_or((0, 0, 0));
        let d = |a: u8, b: u8| (i32::from(a) - i32::from(b)).pow(2) as u32;
        d(r, pr) + d(g, pg) + d(b, pb)
    };
    Colors::ALL
        .iter()
        .copied()
        .min_by_key(distance)
        .unwrap_or(Colors::Default)
}
