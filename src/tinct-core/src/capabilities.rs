//! Color support detection.
//!
//! Decides how rich a color representation the terminal can display, based on
//! `NO_COLOR`, `COLORTERM` and `TERM`.

use std::env;
use std::io::IsTerminal;

/// Color depth supported by the output stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum ColorMode {
    /// No colors or attributes at all.
    None,
    /// The 16 palette colors.
    Basic,
    /// The 256-color table.
    Extended,
    /// 24-bit RGB.
    #[default]
    TrueColor,
}

impl ColorMode {
    /// Detects the color mode from the environment.
    ///
    /// Does not look at whether stdout is a terminal; see
    /// [`ColorMode::detect_for_stdout`].
    pub fn detect() -> Self {
        Self::from_env_values(
            env::var_os("NO_COLOR").is_some(),
            env::var("COLORTERM").ok().as_deref(),
            env::var("TERM").ok().as_deref(),
        )
    }

    /// Like [`ColorMode::detect`], but yields [`ColorMode::None`] when stdout
    /// is redirected.
    pub fn detect_for_stdout() -> Self {
        if !std::io::stdout().is_terminal() {
            return Self::None;
        }
        Self::detect()
    }

    /// Same as [`ColorMode::detect_for_stdout`], for stderr.
    pub fn detect_for_stderr() -> Self {
        if !std::io::stderr().is_terminal() {
            return Self::None;
        }
        Self::detect()
    }

    /// Resolves the mode from already-read environment values.
    pub fn from_env_values(no_color: bool, colorterm: Option<&str>, term: Option<&str>) -> Self {
        if no_color {
            return Self::None;
        }

        if let Some("truecolor" | "24bit") = colorterm {
            return Self::TrueColor;
        }

        if let Some(term) = term {
            let term = term.to_lowercase();

            if term.contains("truecolor") || term.contains("24bit") || term.contains("direct") {
                return Self::TrueColor;
            }

            if term.contains("256") {
                return Self::Extended;
            }

            if term == "dumb" {
                return Self::None;
            }

            if term.contains("color")
                || term.starts_with("xterm")
                || term.starts_with("screen")
                || term.starts_with("tmux")
                || term.starts_with("rxvt")
                || term.starts_with("linux")
            {
                return Self::Basic;
            }
        }

        // Modern terminals that do not advertise anything usually handle RGB.
        Self::TrueColor
    }

    /// Returns `true` if any escape codes should be emitted.
    #[inline]
    pub fn is_enabled(self) -> bool {
        self != Self::None
    }
}
