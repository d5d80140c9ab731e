//! Command-line definition of the demo.

use anyhow::{Context, Result, bail};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tinct::args::{
    ArgumentFormat, ArgumentFormatter, CategoryFormat, DefinitionError, OptionFormat,
    ParameterFormat, ParseResult,
};
use tinct::core::ColorMode;

pub const NAME: &str = "tinct-demo";

/// Which part of the toolkit to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Args,
    Colors,
    Logging,
    Keys,
    Window,
}

impl Mode {
    pub const ALL: [Self; 5] = [
        Self::Args,
        Self::Colors,
        Self::Logging,
        Self::Keys,
        Self::Window,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Args => "args",
            Self::Colors => "colors",
            Self::Logging => "logging",
            Self::Keys => "keys",
            Self::Window => "window",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.to_lowercase();
        match Self::ALL.into_iter().find(|m| m.name() == lowered) {
            Some(mode) => Ok(mode),
            None => {
                let names: Vec<&str> = Self::ALL.iter().map(Mode::name).collect();
                bail!("unknown mode '{s}' (expected one of: {})", names.join(", "))
            }
        }
    }
}

/// Settings resolved from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub mode: Mode,
    pub color_mode: ColorMode,
    pub config: Option<PathBuf>,
    /// Stop the key demo after this many presses.
    pub limit: Option<usize>,
}

impl Settings {
    pub fn from_result(result: &ParseResult<'_>) -> Result<Self> {
        let mode = result
            .value_of("mode")
            .context("missing mode argument")?
            .parse::<Mode>()?;

        let color_mode = if result.has_option("no-color") {
            ColorMode::None
        } else {
            ColorMode::detect_for_stdout()
        };

        let limit = match result.parameters("limit").and_then(|p| p.first()) {
            Some(value) => Some(
                value
                    .parse::<usize>()
                    .with_context(|| format!("invalid key limit '{value}'"))?,
            ),
            None => None,
        };

        Ok(Self {
            mode,
            color_mode,
            config: result
                .parameters("config")
                .and_then(|p| p.first())
                .map(PathBuf::from),
            limit,
        })
    }
}

/// The demo's own command line, defined with `tinct::args`.
pub fn definition() -> Result<ArgumentFormatter, DefinitionError> {
    ArgumentFormatter::builder(NAME)
        .description("A tour of terminal styling, argument parsing, logging and console control.")
        .version(env!("CARGO_PKG_VERSION"))
        .argument(ArgumentFormat::new(
            "mode",
            "One of: args, colors, logging, keys, window.",
        ))
        .category(
            CategoryFormat::builder("Output")
                .option(
                    OptionFormat::builder()
                        .key("n")
                        .key("no-color")
                        .description("Disable colors and text styles.")
                        .build(),
                )
                .build(),
        )
        .category(
            CategoryFormat::builder("Logging")
                .option(
                    OptionFormat::builder()
                        .key("c")
                        .key("config")
                        .description("Logging configuration file (TOML).")
                        .parameter(ParameterFormat::new("path", "Path to the file."))
                        .build(),
                )
                .build(),
        )
        .category(
            CategoryFormat::builder("Keys")
                .option(
                    OptionFormat::builder()
                        .key("l")
                        .key("limit")
                        .description("Stop after this many key presses.")
                        .parameter(ParameterFormat::new("count", "Number of presses."))
                        .build(),
                )
                .build(),
        )
        .help_option(OptionFormat::help().build())
        .version_option(OptionFormat::version().build())
        .build()
}
