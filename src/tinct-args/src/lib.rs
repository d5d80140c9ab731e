//! Command-line parsing for tinct.
//!
//! - [`format`]: immutable definitions built with consuming builders
//! - [`parser`]: the token scanner that binds arguments to a definition
//! - [`parsed`]: the bound results
//! - [`help`]: styled help, version and error text
//! - [`app`]: parse, report and decide whether to exit
//!
//! # Examples
//!
//! ```
//! use tinct_args::{ArgumentFormat, ArgumentFormatter, OptionFormat};
//!
//! let formatter = ArgumentFormatter::builder("greet")
//!     .argument(ArgumentFormat::new("name", "Who to greet."))
//!     .option(OptionFormat::builder().key("l").key("loud").build())
//!     .build()
//!     .unwrap();
//!
//! let parsed = formatter.parse(&["-l", "world"]).unwrap();
//! assert!(parsed.has_option("loud"));
//! assert_eq!(parsed.value_of("name"), Some("world"));
//! ```

pub mod app;
pub mod error;
pub mod format;
pub mod help;
pub mod parsed;
pub mod parser;

pub use app::{EXIT_FAILURE, EXIT_SUCCESS, Outcome};
pub use error::{DefinitionError, DefinitionResult, ParseError, RunError};
pub use format::{
    ArgumentFormat, ArgumentFormatter, CategoryFormat, FormatterBuilder, OptionBuilder,
    OptionFormat, OptionRole, ParameterFormat,
};
pub use help::HelpOptions;
pub use parsed::{ParseResult, ParsedArgument, ParsedOption};
pub use parser::parse;

#[cfg(test)]
mod tests;
