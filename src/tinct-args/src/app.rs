//! Parse-and-report flow for applications.
//!
//! [`ArgumentFormatter::run`] parses, prints help, version or error text, and
//! tells the caller whether to continue or exit. The library never ends the
//! process itself.

use crate::error::RunError;
use crate::format::ArgumentFormatter;
use crate::help::{HelpOptions, render_error, render_help, render_version};
use crate::parsed::ParseResult;
use std::io::{self, Write};
use tinct_core::ColorMode;

/// Exit status after showing help or version text.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit status after a parse error.
pub const EXIT_FAILURE: i32 = 1;

/// What the application should do after [`ArgumentFormatter::run`].
#[derive(Debug, Clone)]
pub enum Outcome<'f> {
    /// Parsing succeeded and the program should carry on.
    Continue(ParseResult<'f>),
    /// The program should exit with this status.
    Exit(i32),
}

impl<'f> Outcome<'f> {
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Continue(_) => None,
            Self::Exit(code) => Some(*code),
        }
    }

    /// The parse result, if the program should continue.
    pub fn into_result(self) -> Option<ParseResult<'f>> {
        match self {
            Self::Continue(result) => Some(result),
            Self::Exit(_) => None,
        }
    }
}

impl ArgumentFormatter {
    /// Parses `args` and handles help, version and errors.
    ///
    /// - help / version: printed to `out`; [`Outcome::Exit`] with `0` if the
    ///   option quits, otherwise [`Outcome::Continue`]
    /// - parse error with [`should_exit_on_error`](Self::should_exit_on_error):
    ///   the reduced help page goes to `out`, the error to `err`, and the
    ///   outcome is [`Outcome::Exit`] with `1`
    /// - parse error otherwise: returned as [`RunError::Parse`] with nothing printed
    pub fn run<'f, S: AsRef<str>>(
        &'f self,
        args: &[S],
        out: &mut dyn Write,
        err: &mut dyn Write,
        mode: ColorMode,
    ) -> Result<Outcome<'f>, RunError> {
        let result = match self.parse(args) {
            Ok(result) => result,
            Err(error) => {
                tracing::debug!(%error, "argument parsing failed");
                if !self.should_exit_on_error() {
                    return Err(error.into());
                }
                let help = render_help(self, &HelpOptions::for_error(&error, mode));
                write!(out, "{help}")?;
                out.flush()?;
                writeln!(err, "\n{}", render_error(&error, mode))?;
                err.flush()?;
                return Ok(Outcome::Exit(EXIT_FAILURE));
            }
        };

        let mut quit = false;
        if result.help_requested() {
            let options = HelpOptions {
                mode,
                ..HelpOptions::default()
            };
            write!(out, "{}", render_help(self, &options))?;
            quit |= self.help_option().is_some_and(|o| o.role().quits());
        }
        if result.version_requested() {
            writeln!(out, "{}", render_version(self, mode))?;
            quit |= self.version_option().is_some_and(|o| o.role().quits());
        }
        out.flush()?;

        if quit {
            return Ok(Outcome::Exit(EXIT_SUCCESS));
        }
        Ok(Outcome::Continue(result))
    }

    /// [`ArgumentFormatter::run`] over the process arguments and standard
    /// streams, with colors detected from stdout.
    pub fn run_env(&self) -> Result<Outcome<'_>, RunError> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let mode = ColorMode::detect_for_stdout();
        let mut out = io::stdout().lock();
        let mut err = io::stderr().lock();
        self.run(&args, &mut out, &mut err, mode)
    }
}
