//! Error types for command-line definitions and parsing.

use std::io;
use thiserror::Error;

/// A command-line definition that cannot be parsed unambiguously.
///
/// Raised by [`FormatterBuilder::build`](crate::format::FormatterBuilder::build).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    /// An option was declared without any key.
    #[error("option {description:?} has no keys")]
    MissingKeys { description: String },

    /// A key is empty, contains whitespace or starts with `-`.
    #[error("invalid option key {key:?}: {reason}")]
    InvalidKey { key: String, reason: &'static str },

    /// Two options share a key.
    #[error("option key {key:?} is declared more than once")]
    DuplicateKey { key: String },

    /// A required parameter follows an optional one.
    #[error("required parameter {parameter:?} of option {option:?} follows an optional parameter")]
    RequiredAfterOptional { option: String, parameter: String },

    /// A positional argument has an empty name.
    #[error("positional argument names cannot be empty")]
    EmptyArgumentName,

    /// Two positional arguments share a name.
    #[error("positional argument {name:?} is declared more than once")]
    DuplicateArgument { name: String },
}

/// Why a token array did not match a definition.
///
/// Parsing stops at the first error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A key that no option declares.
    #[error("No such option as: {}{key}.", dashes(.long))]
    UnknownOption { key: String, long: bool },

    /// The input ran out, or another option started, before all required
    /// parameters were supplied.
    #[error(
        "Not enough parameters for {}{key}: required {required}, received {received}.",
        dashes(.long)
    )]
    MissingParameters {
        key: String,
        long: bool,
        required: usize,
        received: usize,
    },

    /// More positional values than declared positional arguments.
    #[error("Too many positional arguments: unexpected '{value}' (expected {expected}).")]
    TooManyArguments { value: String, expected: usize },

    /// Fewer positional values than declared positional arguments.
    #[error("Not enough positional arguments: expected {expected}, received {received}.")]
    TooFewArguments { expected: usize, received: usize },
}

fn dashes(long: &bool) -> &'static str {
    if *long { "--" } else { "-" }
}

/// Failure of [`ArgumentFormatter::run`](crate::format::ArgumentFormatter::run).
#[derive(Error, Debug)]
pub enum RunError {
    /// Parsing failed and the definition does not exit on errors.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Writing help, version or error text failed.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for definition building.
pub type DefinitionResult<T> = std::result::Result<T, DefinitionError>;
