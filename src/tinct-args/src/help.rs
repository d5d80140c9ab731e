//! Help, version and error text.
//!
//! Layout of the help page:
//!
//! ```text
//! name 1.0.0
//! Description.
//!
//! ┎── Required Arguments
//! ┠  file: The input file.
//!
//! ┎── Options
//! ┠  -h, --help: Displays this help page.
//! ┠  -o, --output: Where to write.
//! ┃  ╠ path: Output path.
//! ```

use crate::error::ParseError;
use crate::format::{ArgumentFormatter, CategoryFormat};
use tinct_core::{Color, ColorMode, Style, StyleBuilder};

const HEADER: &str = "\u{250E}\u{2500}\u{2500}";
const ENTRY: &str = "\u{2520}";
const PARAMETER: &str = "\u{2503}  \u{2560}";

/// Color of headers and entries for positional arguments.
pub const ARGUMENT_COLOR: Color = Color::ORANGE;
/// Color of positional arguments that were not supplied.
pub const MISSING_ARGUMENT_COLOR: Color = Color::LIGHT_RED;
/// Color of headers and entries for options.
pub const OPTION_COLOR: Color = Color::DARK_GREEN;
/// Color of parse error messages.
pub const ERROR_COLOR: Color = Color::RED;

/// What to include in a help page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpOptions {
    pub show_description: bool,
    pub show_version: bool,
    /// Positional arguments from this index on are highlighted as missing.
    pub missing_from: Option<usize>,
    pub mode: ColorMode,
}

impl Default for HelpOptions {
    fn default() -> Self {
        Self {
            show_description: true,
            show_version: true,
            missing_from: None,
            mode: ColorMode::TrueColor,
        }
    }
}

impl HelpOptions {
    /// The reduced page shown above a parse error.
    pub fn for_error(error: &ParseError, mode: ColorMode) -> Self {
        let missing_from = match error {
            ParseError::TooFewArguments { received, .. } => Some(*received),
            _ => None,
        };
        Self {
            show_description: false,
            show_version: false,
            missing_from,
            mode,
        }
    }
}

/// Renders the help page.
pub fn render_help(formatter: &ArgumentFormatter, options: &HelpOptions) -> String {
    let mut out = title(formatter, options.show_version, options.mode);
    if options.show_description {
        if let Some(description) = formatter.description() {
            out = out.new_line().text(description);
        }
    }
    out = out.new_line();

    let mut position = 0;
    for category in formatter.categories().iter().filter(|c| !c.is_empty()) {
        out = out.new_line();
        out = render_category(out, category, &mut position, options.missing_from);
    }

    out.build()
}

fn title(formatter: &ArgumentFormatter, show_version: bool, mode: ColorMode) -> StyleBuilder {
    let mut out = StyleBuilder::with_mode(mode)
        .bold(true)
        .text(formatter.name())
        .bold(false);
    if show_version {
        if let Some(version) = formatter.version() {
            out = out.text(' ').text(version);
        }
    }
    out
}

fn render_category(
    mut out: StyleBuilder,
    category: &CategoryFormat,
    position: &mut usize,
    missing_from: Option<usize>,
) -> StyleBuilder {
    let header_color = if category.arguments().is_empty() {
        OPTION_COLOR
    } else {
        ARGUMENT_COLOR
    };
    out = out
        .styled(&Style::new().fg(header_color), HEADER)
        .text(' ')
        .text(category.name())
        .new_line();

    for argument in category.arguments() {
        let missing = missing_from.is_some_and(|from| *position >= from);
        let color = if missing {
            MISSING_ARGUMENT_COLOR
        } else {
            ARGUMENT_COLOR
        };
        out = out
            .styled(&Style::new().fg(color), ENTRY)
            .text(format_args!("  {}: {}", argument.name(), argument.description()))
            .new_line();
        *position += 1;
    }

    for option in category.options() {
        out = out
            .styled(&Style::new().fg(OPTION_COLOR), ENTRY)
            .text(format_args!("  {}: {}", option.display_keys(), option.description()))
            .new_line();
        for parameter in option.parameters() {
            out = out
                .styled(&Style::new().fg(OPTION_COLOR), PARAMETER)
                .text(format_args!(" {}: {}", parameter.name(), parameter.description()));
            if !parameter.is_required() {
                out = out.text(" (optional)");
            }
            out = out.new_line();
        }
    }

    out
}

/// Renders `name version` followed by the description on its own line.
pub fn render_version(formatter: &ArgumentFormatter, mode: ColorMode) -> String {
    let mut out = title(formatter, true, mode);
    if let Some(description) = formatter.description() {
        out = out.new_line().text(description);
    }
    out.build()
}

/// Renders a parse error in the error color.
pub fn render_error(error: &ParseError, mode: ColorMode) -> String {
    StyleBuilder::with_mode(mode)
        .styled(&Style::new().fg(ERROR_COLOR), error)
        .build()
}

impl ArgumentFormatter {
    /// Shorthand for [`render_help`].
    pub fn help_text(&self, options: &HelpOptions) -> String {
        render_help(self, options)
    }

    /// Shorthand for [`render_version`].
    pub fn version_text(&self, mode: ColorMode) -> String {
        render_version(self, mode)
    }
}
