//! Parses a few canned command lines against a sample definition.

use crate::cli::Settings;
use anyhow::Result;
use std::io::Write;
use tinct::args::{
    ArgumentFormat, ArgumentFormatter, CategoryFormat, DefinitionError, HelpOptions,
    OptionFormat, ParameterFormat, ParseResult, help,
};
use tinct::core::{Color, ColorMode, Style, StyleBuilder};

/// Command lines shown by the demo, each a list of tokens.
const SAMPLES: &[&[&str]] = &[
    &["notes.zip", "notes.txt"],
    &["-vq", "-l9", "out.zip", "a.txt"],
    &["backup.zip", "src", "--level", "3", "--exclude", "*.tmp"],
    &["--exclude"],
    &["-x", "out.zip", "a.txt"],
    &["out.zip"],
    &["out.zip", "a.txt", "b.txt"],
    &["--help", "ignored"],
];

pub fn sample_definition() -> Result<ArgumentFormatter, DefinitionError> {
    ArgumentFormatter::builder("zip")
        .description("Packs files into an archive.")
        .version("0.3.1")
        .argument(ArgumentFormat::new("archive", "Archive to create."))
        .argument(ArgumentFormat::new("input", "File or directory to pack."))
        .option(
            OptionFormat::builder()
                .key("l")
                .key("level")
                .description("Compression level.")
                .parameter(ParameterFormat::new("n", "0 to 9."))
                .build(),
        )
        .option(
            OptionFormat::builder()
                .key("q")
                .key("quiet")
                .description("Print nothing.")
                .build(),
        )
        .category(
            CategoryFormat::builder("Filters")
                .option(
                    OptionFormat::builder()
                        .key("e")
                        .key("exclude")
                        .description("Skip matching files.")
                        .parameter(ParameterFormat::new("pattern", "Glob pattern."))
                        .parameter(ParameterFormat::new("more", "Another pattern.").optional())
                        .build(),
                )
                .build(),
        )
        .help_option(OptionFormat::help().build())
        .version_option(OptionFormat::version().replace_keys(["V", "version"]).build())
        .should_exit_on_error(false)
        .build()
}

pub fn run(settings: &Settings, out: &mut dyn Write) -> Result<()> {
    let mode = settings.color_mode;
    let zip = sample_definition()?;
    let prompt = Style::new().fg(Color::GRAY);

    for &tokens in SAMPLES {
        let line = StyleBuilder::with_mode(mode)
            .styled(&prompt, "$ zip ")
            .bold(true)
            .text(tokens.join(" "))
            .build();
        writeln!(out, "{line}")?;

        match zip.parse(tokens) {
            Ok(result) => describe(&result, mode, out)?,
            Err(error) => writeln!(out, "  {}", help::render_error(&error, mode))?,
        }
        writeln!(out)?;
    }

    let options = HelpOptions {
        mode,
        ..HelpOptions::default()
    };
    write!(out, "{}", help::render_help(&zip, &options))?;
    Ok(())
}

fn describe(result: &ParseResult<'_>, mode: ColorMode, out: &mut dyn Write) -> Result<()> {
    let key_style = Style::new().fg(Color::CYAN);

    if result.help_requested() {
        writeln!(out, "  help requested")?;
    }
    if result.version_requested() {
        writeln!(out, "  version requested")?;
    }
    for argument in result.arguments() {
        let line = StyleBuilder::with_mode(mode)
            .text("  ")
            .styled(&key_style, argument.name())
            .text(format_args!(" = {:?}", argument.value()))
            .build();
        writeln!(out, "{line}")?;
    }
    for option in result.options() {
        let dashes = if option.is_long() { "--" } else { "-" };
        let mut line = StyleBuilder::with_mode(mode)
            .text("  ")
            .styled(&key_style, format_args!("{dashes}{}", option.key()));
        if let Some(parameters) = option.parameters() {
            line = line.text(format_args!(" {parameters:?}"));
        }
        writeln!(out, "{}", line.build())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Mode;
    use pretty_assertions::assert_eq;

    fn settings() -> Settings {
        Settings {
            mode: Mode::Args,
            color_mode: ColorMode::None,
            config: None,
            limit: None,
        }
    }

    fn render() -> String {
        let mut out = Vec::new();
        run(&settings(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_sample_definition_parses() {
        let zip = sample_definition().unwrap();
        let result = zip.parse(&["-vq", "-l9", "out.zip", "a.txt"]).unwrap_err();
        // `-v` is not a key: the version option was given `-V` and `--version`.
        assert_eq!(result.to_string(), "No such option as: -v.");

        let result = zip.parse(&["-q", "-l9", "out.zip", "a.txt"]).unwrap();
        assert_eq!(result.parameters("level").unwrap(), &["9".to_string()]);
        assert_eq!(result.value_of("input"), Some("a.txt"));
    }

    #[test]
    fn test_output_lists_bindings_and_errors() {
        let text = render();
        assert!(text.contains("$ zip notes.zip notes.txt\n  archive = \"notes.zip\"\n"));
        assert!(text.contains("  --exclude [\"*.tmp\"]\n"));
        assert!(text.contains("  No such option as: -x."));
        assert!(text.contains("Not enough parameters for --exclude: required 1, received 0."));
        assert!(text.contains("expected 2, received 1"));
        assert!(text.contains("  help requested\n"));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn test_output_ends_with_help_page() {
        let text = render();
        assert!(text.contains("zip 0.3.1\nPacks files into an archive.\n"));
        assert!(text.contains("┎── Filters\n"));
        assert!(text.contains("┃  ╠ more: Another pattern. (optional)\n"));
        assert!(text.contains("┠  -V, --version: "));
        assert!(text.ends_with("┠  -q, --quiet: Print nothing.\n"));
    }
}
