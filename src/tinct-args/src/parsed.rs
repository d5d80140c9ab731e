//! Values produced by a successful parse.

use crate::format::{ArgumentFormat, ArgumentFormatter, OptionFormat};

/// An option found on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedOption<'f> {
    format: &'f OptionFormat,
    key: String,
    long: bool,
    parameters: Option<Vec<String>>,
}

impl<'f> ParsedOption<'f> {
    pub(crate) fn new(
        format: &'f OptionFormat,
        key: impl Into<String>,
        long: bool,
        parameters: Option<Vec<String>>,
    ) -> Self {
        Self {
            format,
            key: key.into(),
            long,
            parameters,
        }
    }

    /// The definition this option matched.
    pub fn format(&self) -> &'f OptionFormat {
        self.format
    }

    /// The key as typed, without dashes.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// True if the key was written in `--long` form.
    pub fn is_long(&self) -> bool {
        self.long
    }

    /// Parameter values. `None` when the option declares no parameters.
    pub fn parameters(&self) -> Option<&[String]> {
        self.parameters.as_deref()
    }

    /// A single parameter value by position.
    pub fn parameter(&self, index: usize) -> Option<&str> {
        self.parameters
            .as_ref()
            .and_then(|p| p.get(index))
            .map(String::as_str)
    }
}

/// A positional value bound to its argument definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedArgument<'f> {
    format: &'f ArgumentFormat,
    value: String,
}

impl<'f> ParsedArgument<'f> {
    pub(crate) fn new(format: &'f ArgumentFormat, value: impl Into<String>) -> Self {
        Self {
            format,
            value: value.into(),
        }
    }

    pub fn format(&self) -> &'f ArgumentFormat {
        self.format
    }

    pub fn name(&self) -> &'f str {
        self.format.name()
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Everything bound by one call to [`parse`](crate::parser::parse).
///
/// Options are kept in the order they appeared, repeats included; lookups by
/// key return the last occurrence.
#[derive(Debug, Clone)]
pub struct ParseResult<'f> {
    formatter: &'f ArgumentFormatter,
    options: Vec<ParsedOption<'f>>,
    arguments: Vec<ParsedArgument<'f>>,
}

impl<'f> ParseResult<'f> {
    pub(crate) fn new(formatter: &'f ArgumentFormatter) -> Self {
        Self {
            formatter,
            options: Vec::new(),
            arguments: Vec::new(),
        }
    }

    pub(crate) fn push_option(&mut self, option: ParsedOption<'f>) {
        self.options.push(option);
    }

    pub(crate) fn push_argument(&mut self, argument: ParsedArgument<'f>) {
        self.arguments.push(argument);
    }

    /// The definition these results were parsed against.
    pub fn formatter(&self) -> &'f ArgumentFormatter {
        self.formatter
    }

    pub fn options(&self) -> &[ParsedOption<'f>] {
        &self.options
    }

    pub fn arguments(&self) -> &[ParsedArgument<'f>] {
        &self.arguments
    }

    /// The last occurrence of the option that declares `key`, whichever of
    /// its keys was typed.
    pub fn option(&self, key: &str) -> Option<&ParsedOption<'f>> {
        self.options.iter().rev().find(|o| o.format.has_key(key))
    }

    pub fn has_option(&self, key: &str) -> bool {
        self.option(key).is_some()
    }

    /// Parameter values of the option that declares `key`.
    pub fn parameters(&self, key: &str) -> Option<&[String]> {
        self.option(key).and_then(ParsedOption::parameters)
    }

    pub fn argument(&self, name: &str) -> Option<&ParsedArgument<'f>> {
        self.arguments.iter().find(|a| a.name() == name)
    }

    /// The value bound to the positional argument `name`.
    pub fn value_of(&self, name: &str) -> Option<&str> {
        self.argument(name).map(ParsedArgument::value)
    }

    /// True if the designated help option was given.
    pub fn help_requested(&self) -> bool {
        self.contains_format(self.formatter.help_option())
    }

    /// True if the designated version option was given.
    pub fn version_requested(&self) -> bool {
        self.contains_format(self.formatter.version_option())
    }

    fn contains_format(&self, format: Option<&OptionFormat>) -> bool {
        format.is_some_and(|format| {
            self.options
                .iter()
                .any(|o| std::ptr::eq(o.format, format))
        })
    }
}
