//! Tinct: terminal styling, command-line parsing, logging and console control.
//!
//! This crate re-exports the member crates:
//!
//! - [`core`]: ANSI escape codes, colors, styles and the style builder
//! - [`args`]: command-line definitions, parsing and help output
//! - [`logging`]: loggers, targets and the logger registry
//! - [`console`]: console backends, windows and key listening
//!
//! # Example
//!
//! ```
//! use tinct::prelude::*;
//!
//! let cli = ArgumentFormatter::builder("greet")
//!     .argument(ArgumentFormat::new("name", "Who to greet."))
//!     .help_option(OptionFormat::help().build())
//!     .build()
//!     .unwrap();
//!
//! let parsed = cli.parse(&["World"]).unwrap();
//! let line = StyleBuilder::plain()
//!     .text("Hello, ")
//!     .bold(true)
//!     .text(parsed.value_of("name").unwrap())
//!     .build();
//! assert_eq!(line, "Hello, World");
//! ```

pub use tinct_args as args;
pub use tinct_console as console;
pub use tinct_core as core;
pub use tinct_logging as logging;

pub mod prelude {
    pub use tinct_args::{
        ArgumentFormat, ArgumentFormatter, CategoryFormat, OptionFormat, Outcome, ParameterFormat,
        ParseError, ParseResult,
    };
    pub use tinct_console::{
        AnsiBackend, ConsoleBackend, ConsoleError, Key, KeyListener, KeyPress, KeySource, Window,
        detect_backend,
    };
    pub use tinct_core::{Color, ColorMode, Colors, Style, StyleBuilder, TextAttributes};
    pub use tinct_logging::{
        Logger, LoggerRegistry, LoggingConfig, LoggingError, Severity, Target, TargetKind,
    };
}
