//! ANSI escape code tables and helpers.
//!
//! Control sequences for cursor movement, erasing and SGR styling, plus
//! utilities to detect whether colored output is appropriate and to strip
//! escape codes from text that ends up somewhere other than a terminal.
//!
//! # Examples
//!
//! ```
//! use tinct_core::ansi::{self, styles};
//!
//! let bold = format!("{}hello{}", styles::BOLD, styles::RESET_BOLD);
//! assert_eq!(ansi::strip_ansi_codes(&bold), "hello");
//! assert_eq!(ansi::move_cursor(0, 0), "\x1b[1;1H");
//! ```

use std::io::IsTerminal;

/// The escape character.
pub const ESC: &str = "\x1b";

/// Control Sequence Introducer.
pub const CSI: &str = "\x1b[";

/// Erases the entire screen.
pub const ERASE_SCREEN: &str = "\x1b[2J";

/// Erases from the cursor to the end of the screen.
pub const ERASE_SCREEN_FROM_CURSOR: &str = "\x1b[0J";

/// Erases the entire current line.
pub const ERASE_LINE: &str = "\x1b[2K";

/// Erases from the cursor to the end of the line.
pub const ERASE_LINE_FROM_CURSOR: &str = "\x1b[0K";

/// Asks the terminal to report the cursor position (`CSI row;col R`).
pub const REQUEST_CURSOR_POSITION: &str = "\x1b[6n";

/// Hides the cursor.
pub const HIDE_CURSOR: &str = "\x1b[?25l";

/// Shows the cursor.
pub const SHOW_CURSOR: &str = "\x1b[?25h";

/// SGR (Select Graphic Rendition) set and reset sequences.
pub mod styles {
    /// Resets every attribute and color.
    pub const RESET_ALL: &str = "\x1b[0m";

    pub const BOLD: &str = "\x1b[1m";
    /// Bold and faint share a reset code.
    pub const RESET_BOLD: &str = "\x1b[22m";

    pub const FAINT: &str = "\x1b[2m";
    pub const RESET_FAINT: &str = "\x1b[22m";

    pub const ITALIC: &str = "\x1b[3m";
    pub const RESET_ITALIC: &str = "\x1b[23m";

    pub const UNDERLINE: &str = "\x1b[4m";
    pub const RESET_UNDERLINE: &str = "\x1b[24m";

    pub const BLINK: &str = "\x1b[5m";
    pub const RESET_BLINK: &str = "\x1b[25m";

    pub const INVERSE: &str = "\x1b[7m";
    pub const RESET_INVERSE: &str = "\x1b[27m";

    pub const INVISIBLE: &str = "\x1b[8m";
    pub const RESET_INVISIBLE: &str = "\x1b[28m";

    pub const STRIKETHROUGH: &str = "\x1b[9m";
    pub const RESET_STRIKETHROUGH: &str = "\x1b[29m";

    pub const DOUBLE_UNDERLINE: &str = "\x1b[21m";
    pub const RESET_DOUBLE_UNDERLINE: &str = "\x1b[24m";
}

/// Builds an SGR sequence from a list of numeric parameters, e.g. `[38, 5, 208]`.
pub fn sgr(params: &[u8]) -> String {
    let mut out = String::with_capacity(2 + params.len() * 4);
    out.push_str(CSI);
    for (i, p) in params.iter().enumerate() {
        if i > 0 {
            out.push(';');
        }
        out.push_str(&p.to_string());
    }
    out.push('m');
    out
}

/// Moves the cursor to a 0-based column/row position.
pub fn move_cursor(x: u16, y: u16) -> String {
    format!(
        "{CSI}{};{}H",
        u32::from(y) + 1,
        u32::from(x) + 1
    )
}

/// Sets the terminal window title (OSC 0).
pub fn set_title(title: &str) -> String {
    format!("{ESC}]0;{title}\x07")
}

/// Check if stdout should output colors/ANSI codes.
///
/// Returns false when stdout is not a terminal or `NO_COLOR` is set
/// (https://no-color.org/).
pub fn should_colorize() -> bool {
    if no_color_requested() {
        return false;
    }
    std::io::stdout().is_terminal()
}

/// Check if stderr should output colors/ANSI codes.
pub fn should_colorize_stderr() -> bool {
    if no_color_requested() {
        return false;
    }
    std::io::stderr().is_terminal()
}

/// Returns true when the `NO_COLOR` environment variable is present.
pub fn no_color_requested() -> bool {
    std::env::var_os("NO_COLOR").is_some()
}

/// Strip ANSI escape codes from a string.
///
/// Removes CSI sequences (colors, cursor movement, erasing) and OSC
/// sequences terminated by BEL or ST.
pub fn strip_ansi_codes(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\x1b' {
            match chars.peek() {
                Some('[') => {
                    chars.next();
                    // Parameters and intermediates run until the final byte.
                    for c in chars.by_ref() {
                        if c.is_ascii_alphabetic() || c == '~' {
                            break;
                        }
                    }
                    continue;
                }
                Some(']') => {
                    chars.next();
                    while let Some(c) = chars.next() {
                        if c == '\x07' {
                            break;
                        }
                        if c == '\x1b' && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                    continue;
                }
                _ => {}
            }
        }
        result.push(c);
    }

    result
}
