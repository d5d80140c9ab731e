//! Token scanner that binds command-line tokens to a definition.
//!
//! Tokens are read left to right. Each unread token is classified as:
//!
//! 1. `--key`: a long option, looked up by the text after the dashes
//! 2. `-abc`: a short cluster, every character an independent key
//! 3. anything else: the next positional argument
//!
//! An option consumes exactly as many following tokens as it has parameters
//! (optional ones only when present). Inside a cluster, an option with
//! parameters ends the cluster and takes the rest of the token as its first
//! value, so `-ofile` is `-o file`.
//!
//! The first error aborts the parse.

use crate::error::ParseError;
use crate::format::{ArgumentFormat, ArgumentFormatter, OptionFormat};
use crate::parsed::{ParseResult, ParsedArgument, ParsedOption};

/// How an unread token is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'t> {
    /// The key after `--`.
    Long(&'t str),
    /// The characters after `-`.
    ShortCluster(&'t str),
    Positional(&'t str),
}

impl<'t> Token<'t> {
    fn classify(token: &'t str) -> Self {
        if let Some(key) = token.strip_prefix("--").filter(|k| !k.is_empty()) {
            Token::Long(key)
        } else if let Some(cluster) = token.strip_prefix('-').filter(|c| !c.is_empty()) {
            Token::ShortCluster(cluster)
        } else {
            Token::Positional(token)
        }
    }

    fn is_option(self) -> bool {
        !matches!(self, Token::Positional(_))
    }
}

/// Parses `args` (without the program name) against `formatter`.
///
/// # Errors
///
/// Returns the first [`ParseError`] encountered.
pub fn parse<'f, S: AsRef<str>>(
    formatter: &'f ArgumentFormatter,
    args: &[S],
) -> Result<ParseResult<'f>, ParseError> {
    Parser::new(formatter, args).run()
}

impl ArgumentFormatter {
    /// Parses `args` against this definition. See [`parse`].
    pub fn parse<S: AsRef<str>>(&self, args: &[S]) -> Result<ParseResult<'_>, ParseError> {
        parse(self, args)
    }
}

struct Parser<'f, 'a, S> {
    formatter: &'f ArgumentFormatter,
    tokens: &'a [S],
    /// Index of the next unread token.
    cursor: usize,
    positionals: Vec<&'f ArgumentFormat>,
    result: ParseResult<'f>,
    /// Set once a help or version option was bound.
    informational: bool,
    /// Set when an informational option asks to quit.
    stop: bool,
}

impl<'f, 'a, S: AsRef<str>> Parser<'f, 'a, S> {
    fn new(formatter: &'f ArgumentFormatter, tokens: &'a [S]) -> Self {
        Self {
            formatter,
            tokens,
            cursor: 0,
            positionals: formatter.all_arguments().collect(),
            result: ParseResult::new(formatter),
            informational: false,
            stop: false,
        }
    }

    fn run(mut self) -> Result<ParseResult<'f>, ParseError> {
        let tokens = self.tokens;
        while !self.stop {
            let Some(token) = tokens.get(self.cursor) else {
                break;
            };
            self.cursor += 1;

            match Token::classify(token.as_ref()) {
                Token::Long(key) => self.read_long(key)?,
                Token::ShortCluster(cluster) => self.read_cluster(cluster)?,
                Token::Positional(value) => self.read_positional(value)?,
            }
        }

        let bound = self.result.arguments().len();
        if !self.informational && bound < self.positionals.len() {
            return Err(ParseError::TooFewArguments {
                expected: self.positionals.len(),
                received: bound,
            });
        }

        Ok(self.result)
    }

    fn read_long(&mut self, key: &str) -> Result<(), ParseError> {
        let formatter = self.formatter;
        let format = formatter
            .find_option(key)
            .ok_or_else(|| ParseError::UnknownOption {
                key: key.to_string(),
                long: true,
            })?;
        let parameters = self.take_parameters(format, key, true, None)?;
        self.bind_option(format, key, true, parameters);
        Ok(())
    }

    fn read_cluster(&mut self, cluster: &str) -> Result<(), ParseError> {
        let formatter = self.formatter;
        let mut buf = [0u8; 4];
        for (offset, c) in cluster.char_indices() {
            let key: &str = c.encode_utf8(&mut buf);
            let format = formatter
                .find_option(key)
                .ok_or_else(|| ParseError::UnknownOption {
                    key: key.to_string(),
                    long: false,
                })?;

            if format.parameters().is_empty() {
                self.bind_option(format, key, false, None);
                if self.stop {
                    return Ok(());
                }
                continue;
            }

            let rest = &cluster[offset + c.len_utf8()..];
            let inline = (!rest.is_empty()).then_some(rest);
            let parameters = self.take_parameters(format, key, false, inline)?;
            self.bind_option(format, key, false, parameters);
            return Ok(());
        }
        Ok(())
    }

    fn read_positional(&mut self, value: &str) -> Result<(), ParseError> {
        let index = self.result.arguments().len();
        let Some(format) = self.positionals.get(index).copied() else {
            return Err(ParseError::TooManyArguments {
                value: value.to_string(),
                expected: self.positionals.len(),
            });
        };
        tracing::debug!(argument = format.name(), value, "bound positional argument");
        self.result.push_argument(ParsedArgument::new(format, value));
        Ok(())
    }

    /// Consumes parameter values for `format`, starting with `inline` if given.
    ///
    /// Returns `None` for options without parameters.
    fn take_parameters(
        &mut self,
        format: &OptionFormat,
        key: &str,
        long: bool,
        inline: Option<&str>,
    ) -> Result<Option<Vec<String>>, ParseError> {
        let declared = format.parameters().len();
        if declared == 0 {
            return Ok(None);
        }

        let mut values = Vec::with_capacity(declared);
        values.extend(inline.map(str::to_string));

        let tokens = self.tokens;
        while values.len() < declared {
            let Some(token) = tokens.get(self.cursor) else {
                break;
            };
            let token = token.as_ref();
            if Token::classify(token).is_option() {
                break;
            }
            values.push(token.to_string());
            self.cursor += 1;
        }

        let required = format.required_parameters();
        if values.len() < required {
            return Err(ParseError::MissingParameters {
                key: key.to_string(),
                long,
                required,
                received: values.len(),
            });
        }

        Ok(Some(values))
    }

    fn bind_option(
        &mut self,
        format: &'f OptionFormat,
        key: &str,
        long: bool,
        parameters: Option<Vec<String>>,
    ) {
        tracing::debug!(key, long, ?parameters, "bound option");

        let is_help = self
            .formatter
            .help_option()
            .is_some_and(|h| std::ptr::eq(h, format));
        let is_version = self
            .formatter
            .version_option()
            .is_some_and(|v| std::ptr::eq(v, format));
        if is_help || is_version {
            self.informational = true;
            self.stop |= format.role().quits();
        }

        self.result
            .push_option(ParsedOption::new(format, key, long, parameters));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(Token::classify("--name"), Token::Long("name"));
        assert_eq!(Token::classify("-abc"), Token::ShortCluster("abc"));
        assert_eq!(Token::classify("-"), Token::Positional("-"));
        assert_eq!(Token::classify(""), Token::Positional(""));
        assert_eq!(Token::classify("value"), Token::Positional("value"));
        // A bare `--` is a one-character cluster of `-`.
        assert_eq!(Token::classify("--"), Token::ShortCluster("-"));
        assert_eq!(Token::classify("---x"), Token::Long("-x"));
    }
}
