//! Tests for the token scanner.

use crate::error::ParseError;
use crate::format::{ArgumentFormat, ArgumentFormatter, CategoryFormat, OptionFormat, ParameterFormat};
use pretty_assertions::assert_eq;

fn flag(key: &str) -> OptionFormat {
    OptionFormat::builder().key(key).build()
}

fn with_params(keys: &[&str], count: usize) -> OptionFormat {
    let mut builder = OptionFormat::builder().keys(keys.iter().copied());
    for i in 0..count {
        builder = builder.parameter(ParameterFormat::new(format!("p{i}"), ""));
    }
    builder.build()
}

fn definition() -> ArgumentFormatter {
    ArgumentFormatter::builder("test")
        .argument(ArgumentFormat::new("first", ""))
        .argument(ArgumentFormat::new("second", ""))
        .option(flag("a"))
        .option(flag("b"))
        .option(with_params(&["o", "output"], 1))
        .option(with_params(&["r", "range"], 2))
        .help_option(OptionFormat::help().build())
        .version_option(OptionFormat::version().build())
        .build()
        .unwrap()
}

fn keys(result: &crate::ParseResult<'_>) -> Vec<String> {
    result.options().iter().map(|o| o.key().to_string()).collect()
}

mod positional_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_binds_in_order() {
        let f = definition();
        let result = f.parse(&["x", "y"]).unwrap();
        assert_eq!(result.value_of("first"), Some("x"));
        assert_eq!(result.value_of("second"), Some("y"));
        assert_eq!(result.arguments().len(), 2);
        assert!(result.options().is_empty());
    }

    #[test]
    fn test_order_follows_categories() {
        let f = ArgumentFormatter::builder("test")
            .category(
                CategoryFormat::builder("A")
                    .argument(ArgumentFormat::new("one", ""))
                    .build(),
            )
            .category(
                CategoryFormat::builder("B")
                    .argument(ArgumentFormat::new("two", ""))
                    .build(),
            )
            .build()
            .unwrap();
        let result = f.parse(&["1", "2"]).unwrap();
        assert_eq!(result.arguments()[0].name(), "one");
        assert_eq!(result.arguments()[1].value(), "2");
    }

    #[test]
    fn test_too_many() {
        let err = definition().parse(&["x", "y", "z"]).unwrap_err();
        assert_eq!(
            err,
            ParseError::TooManyArguments {
                value: "z".into(),
                expected: 2
            }
        );
    }

    #[test]
    fn test_too_few() {
        let err = definition().parse(&["x"]).unwrap_err();
        assert_eq!(
            err,
            ParseError::TooFewArguments {
                expected: 2,
                received: 1
            }
        );
        assert_eq!(
            err.to_string(),
            "Not enough positional arguments: expected 2, received 1."
        );
    }

    #[test]
    fn test_dash_and_empty_are_positional() {
        let def = definition();
        let result = def.parse(&["-", ""]).unwrap();
        assert_eq!(result.value_of("first"), Some("-"));
        assert_eq!(result.value_of("second"), Some(""));
    }

    #[test]
    fn test_interleaved_with_options() {
        let def = definition();
        let result = def.parse(&["x", "-a", "y", "--output", "f"]).unwrap();
        assert_eq!(result.value_of("second"), Some("y"));
        assert_eq!(result.parameters("o"), Some(&["f".to_string()][..]));
    }
}

mod option_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_long_option() {
        let def = definition();
        let result = def.parse(&["--output", "out.txt", "x", "y"]).unwrap();
        let option = result.option("o").unwrap();
        assert_eq!(option.key(), "output");
        assert!(option.is_long());
        assert_eq!(option.parameter(0), Some("out.txt"));
    }

    #[test]
    fn test_long_lookup_finds_single_char_key() {
        let def = definition();
        let result = def.parse(&["--a", "x", "y"]).unwrap();
        assert!(result.has_option("a"));
        assert!(result.option("a").unwrap().is_long());
    }

    #[test]
    fn test_unknown_long() {
        let err = definition().parse(&["--nope"]).unwrap_err();
        assert_eq!(
            err,
            ParseError::UnknownOption {
                key: "nope".into(),
                long: true
            }
        );
        assert!(err.to_string().contains("nope"));
        assert_eq!(err.to_string(), "No such option as: --nope.");
    }

    #[test]
    fn test_unknown_short() {
        let err = definition().parse(&["-z"]).unwrap_err();
        assert_eq!(err.to_string(), "No such option as: -z.");
    }

    #[test]
    fn test_bare_double_dash_is_unknown_short_key() {
        let err = definition().parse(&["--"]).unwrap_err();
        assert_eq!(
            err,
            ParseError::UnknownOption {
                key: "-".into(),
                long: false
            }
        );
    }

    #[test]
    fn test_no_parameters_gives_none() {
        let def = definition();
        let result = def.parse(&["-a", "x", "y"]).unwrap();
        assert_eq!(result.option("a").unwrap().parameters(), None);
    }

    #[test]
    fn test_multiple_parameters() {
        let def = definition();
        let result = def.parse(&["--range", "1", "9", "x", "y"]).unwrap();
        assert_eq!(
            result.parameters("range").unwrap(),
            &["1".to_string(), "9".to_string()]
        );
        assert_eq!(result.value_of("first"), Some("x"));
    }

    #[test]
    fn test_missing_parameters_at_end() {
        let err = definition().parse(&["x", "y", "--range", "1"]).unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingParameters {
                key: "range".into(),
                long: true,
                required: 2,
                received: 1
            }
        );
        assert_eq!(
            err.to_string(),
            "Not enough parameters for --range: required 2, received 1."
        );
    }

    #[test]
    fn test_missing_parameters_before_next_option() {
        let err = definition().parse(&["-r", "1", "-a", "x", "y"]).unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingParameters {
                key: "r".into(),
                long: false,
                required: 2,
                received: 1
            }
        );
    }

    #[test]
    fn test_optional_parameter() {
        let f = ArgumentFormatter::builder("test")
            .option(
                OptionFormat::builder()
                    .key("c")
                    .parameter(ParameterFormat::new("name", ""))
                    .parameter(ParameterFormat::new("extra", "").optional())
                    .build(),
            )
            .option(flag("q"))
            .build()
            .unwrap();

        let full = f.parse(&["-c", "a", "b"]).unwrap();
        assert_eq!(full.parameters("c").unwrap().len(), 2);

        let partial = f.parse(&["-c", "a", "-q"]).unwrap();
        assert_eq!(partial.parameters("c").unwrap(), &["a".to_string()]);
        assert!(partial.has_option("q"));

        let err = f.parse(&["-c"]).unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingParameters {
                key: "c".into(),
                long: false,
                required: 1,
                received: 0
            }
        );
    }

    #[test]
    fn test_repeated_option_last_wins() {
        let def = definition();
        let result = def.parse(&["-o", "1", "--output", "2", "x", "y"]).unwrap();
        assert_eq!(result.options().len(), 2);
        assert_eq!(result.option("output").unwrap().parameter(0), Some("2"));
    }
}

mod cluster_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cluster_equals_separate_flags() {
        let f = definition();
        let clustered = f.parse(&["-ab", "x", "y"]).unwrap();
        let separate = f.parse(&["-a", "-b", "x", "y"]).unwrap();
        assert_eq!(clustered.options(), separate.options());
        assert_eq!(keys(&clustered), vec!["a", "b"]);
    }

    #[test]
    fn test_parameterized_option_ends_cluster() {
        let def = definition();
        let result = def.parse(&["-abo", "file", "x", "y"]).unwrap();
        assert_eq!(keys(&result), vec!["a", "b", "o"]);
        assert_eq!(result.parameters("o").unwrap(), &["file".to_string()]);
        assert_eq!(result.value_of("first"), Some("x"));
    }

    #[test]
    fn test_rest_of_cluster_is_first_parameter() {
        let def = definition();
        let result = def.parse(&["-ofile", "x", "y"]).unwrap();
        assert_eq!(result.parameters("o").unwrap(), &["file".to_string()]);

        let def = definition();
        let result = def.parse(&["-r1", "2", "x", "y"]).unwrap();
        assert_eq!(
            result.parameters("r").unwrap(),
            &["1".to_string(), "2".to_string()]
        );
    }

    #[test]
    fn test_unknown_key_mid_cluster() {
        let err = definition().parse(&["-azb"]).unwrap_err();
        assert_eq!(
            err,
            ParseError::UnknownOption {
                key: "z".into(),
                long: false
            }
        );
    }

    #[test]
    fn test_multibyte_keys() {
        let f = ArgumentFormatter::builder("test")
            .option(flag("é"))
            .option(with_params(&["ß"], 1))
            .build()
            .unwrap();
        let result = f.parse(&["-éßvalue"]).unwrap();
        assert!(result.has_option("é"));
        assert_eq!(result.parameters("ß").unwrap(), &["value".to_string()]);
    }
}

mod informational_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_help_skips_positional_check() {
        let def = definition();
        let result = def.parse(&["-h"]).unwrap();
        assert!(result.help_requested());
        assert!(!result.version_requested());
        assert!(result.arguments().is_empty());
    }

    #[test]
    fn test_quitting_help_stops_scanning() {
        let def = definition();
        let result = def.parse(&["--help", "--nope", "a", "b", "c"]).unwrap();
        assert!(result.help_requested());
        assert_eq!(result.options().len(), 1);
    }

    #[test]
    fn test_help_in_cluster_stops_scanning() {
        let def = definition();
        let result = def.parse(&["-ahz"]).unwrap();
        assert_eq!(keys(&result), vec!["a", "h"]);
    }

    #[test]
    fn test_version_skips_positional_check() {
        let def = definition();
        let result = def.parse(&["--version"]).unwrap();
        assert!(result.version_requested());
    }

    #[test]
    fn test_non_quitting_help_keeps_scanning() {
        let f = ArgumentFormatter::builder("test")
            .argument(ArgumentFormat::new("file", ""))
            .help_option(OptionFormat::help().quit(false).build())
            .build()
            .unwrap();

        let result = f.parse(&["-h", "input"]).unwrap();
        assert!(result.help_requested());
        assert_eq!(result.value_of("file"), Some("input"));

        // Still no positional requirement once help was asked for.
        assert!(f.parse(&["-h"]).is_ok());

        let err = f.parse(&["-h", "--nope"]).unwrap_err();
        assert!(matches!(err, ParseError::UnknownOption { .. }));
    }

    #[test]
    fn test_errors_before_help_still_fail() {
        let err = definition().parse(&["--nope", "-h"]).unwrap_err();
        assert!(matches!(err, ParseError::UnknownOption { .. }));
    }
}

#[test]
fn test_results_are_fresh_per_parse() {
    let f = definition();
    let first = f.parse(&["-a", "x", "y"]).unwrap();
    let second = f.parse(&["p", "q"]).unwrap();
    assert!(first.has_option("a"));
    assert!(!second.has_option("a"));
    assert_eq!(second.value_of("first"), Some("p"));
}

#[test]
fn test_owned_string_arguments() {
    let f = definition();
    let args: Vec<String> = vec!["-b".into(), "one".into(), "two".into()];
    let result = crate::parse(&f, &args).unwrap();
    assert!(result.has_option("b"));
    assert_eq!(result.argument("second").unwrap().value(), "two");
}
