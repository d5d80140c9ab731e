//! Integration tests for the parse-and-report flow.

use pretty_assertions::assert_eq;
use tinct_args::{
    ArgumentFormat, ArgumentFormatter, EXIT_FAILURE, EXIT_SUCCESS, OptionFormat, Outcome,
    ParameterFormat, ParseError, RunError,
};
use tinct_core::ColorMode;

// ============================================================================
// Helpers
// ============================================================================

fn formatter(exit_on_error: bool) -> ArgumentFormatter {
    ArgumentFormatter::builder("zip")
        .description("Packs files.")
        .version("0.3.1")
        .should_exit_on_error(exit_on_error)
        .argument(ArgumentFormat::new("archive", "Archive to create."))
        .option(
            OptionFormat::builder()
                .key("l")
                .key("level")
                .description("Compression level.")
                .parameter(ParameterFormat::new("n", "0 to 9."))
                .build(),
        )
        .help_option(OptionFormat::help().build())
        .version_option(OptionFormat::version().build())
        .build()
        .expect("valid definition")
}

struct Captured {
    out: Vec<u8>,
    err: Vec<u8>,
}

impl Captured {
    fn new() -> Self {
        Self {
            out: Vec::new(),
            err: Vec::new(),
        }
    }

    fn out(&self) -> String {
        String::from_utf8(self.out.clone()).unwrap()
    }

    fn err(&self) -> String {
        String::from_utf8(self.err.clone()).unwrap()
    }
}

fn run<'f>(
    formatter: &'f ArgumentFormatter,
    args: &[&str],
    captured: &mut Captured,
) -> Result<Outcome<'f>, RunError> {
    formatter.run(args, &mut captured.out, &mut captured.err, ColorMode::None)
}

// ============================================================================
// Successful runs
// ============================================================================

#[test]
fn test_continue_prints_nothing() {
    let f = formatter(true);
    let mut captured = Captured::new();
    let outcome = run(&f, &["-l", "9", "out.zip"], &mut captured).unwrap();

    assert_eq!(outcome.exit_code(), None);
    let result = outcome.into_result().unwrap();
    assert_eq!(result.value_of("archive"), Some("out.zip"));
    assert_eq!(result.parameters("level").unwrap(), &["9".to_string()]);
    assert!(captured.out().is_empty());
    assert!(captured.err().is_empty());
}

#[test]
fn test_help_exits_zero() {
    let f = formatter(true);
    let mut captured = Captured::new();
    let outcome = run(&f, &["--help"], &mut captured).unwrap();

    assert_eq!(outcome.exit_code(), Some(EXIT_SUCCESS));
    let out = captured.out();
    assert!(out.starts_with("zip 0.3.1\nPacks files.\n"));
    assert!(out.contains("┠  archive: Archive to create."));
    assert!(out.contains("┠  -l, --level: Compression level."));
    assert!(out.contains("┃  ╠ n: 0 to 9."));
    assert!(captured.err().is_empty());
}

#[test]
fn test_version_exits_zero() {
    let f = formatter(true);
    let mut captured = Captured::new();
    let outcome = run(&f, &["-v"], &mut captured).unwrap();

    assert_eq!(outcome.exit_code(), Some(EXIT_SUCCESS));
    assert_eq!(captured.out(), "zip 0.3.1\nPacks files.\n");
}

#[test]
fn test_help_without_quit_continues() {
    let f = ArgumentFormatter::builder("tool")
        .argument(ArgumentFormat::new("file", ""))
        .help_option(OptionFormat::help().quit(false).build())
        .build()
        .unwrap();
    let mut captured = Captured::new();
    let outcome = run(&f, &["-h", "x"], &mut captured).unwrap();

    let result = outcome.into_result().unwrap();
    assert!(result.help_requested());
    assert_eq!(result.value_of("file"), Some("x"));
    assert!(captured.out().contains("Displays this help page."));
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_error_prints_help_and_exits_one() {
    let f = formatter(true);
    let mut captured = Captured::new();
    let outcome = run(&f, &["--bogus"], &mut captured).unwrap();

    assert_eq!(outcome.exit_code(), Some(EXIT_FAILURE));
    let out = captured.out();
    assert!(out.starts_with("zip\n"));
    assert!(!out.contains("Packs files."));
    assert_eq!(captured.err(), "\nNo such option as: --bogus.\n");
}

#[test]
fn test_too_few_reported_after_help() {
    let f = formatter(true);
    let mut captured = Captured::new();
    let outcome = run(&f, &[], &mut captured).unwrap();

    assert_eq!(outcome.exit_code(), Some(EXIT_FAILURE));
    assert!(captured.err().contains("expected 1, received 0"));
}

#[test]
fn test_error_returned_when_not_exiting() {
    let f = formatter(false);
    let mut captured = Captured::new();
    let err = run(&f, &["a", "b"], &mut captured).unwrap_err();

    match err {
        RunError::Parse(ParseError::TooManyArguments { value, expected }) => {
            assert_eq!(value, "b");
            assert_eq!(expected, 1);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(captured.out().is_empty());
    assert!(captured.err().is_empty());
}

#[test]
fn test_colored_error_uses_red() {
    let f = formatter(true);
    let mut out = Vec::new();
    let mut err = Vec::new();
    let outcome = f
        .run(&["-x"], &mut out, &mut err, ColorMode::TrueColor)
        .unwrap();

    assert_eq!(outcome.exit_code(), Some(EXIT_FAILURE));
    let err = String::from_utf8(err).unwrap();
    assert!(err.contains("\x1b[38;2;255;0;0m"));
    assert!(err.contains("No such option as: -x."));
}
