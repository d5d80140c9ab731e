//! Line templates for log output.
//!
//! Templates use positional placeholders:
//!
//! | Placeholder | Value                         |
//! |-------------|-------------------------------|
//! | `{0}`       | hierarchical logger name      |
//! | `{1}`       | logger ID                     |
//! | `{2}`       | timestamp                     |
//! | `{3}`       | severity                      |
//! | `{4}`       | message                       |
//! | `{5}`       | severity color (terminal)     |
//!
//! `{{` and `}}` produce literal braces. Placeholders without a value are
//! kept as written.
//!
//! The name template joins a parent and a child name (`{0}` and `{1}`) and is
//! applied from the root down, so a logger `db` under `app` renders as
//! `app: db` with the default template.

use crate::error::{LoggingError, Result};
use crate::record::LogRecord;
use chrono::format::{Item, StrftimeItems};
use tinct_core::ansi::styles;

/// Default line layout for files and plain output.
pub const DEFAULT_TEMPLATE: &str = "[{0}][{2}][{3}]: {4}";

/// Default parent/child name join.
pub const DEFAULT_NAME_TEMPLATE: &str = "{0}: {1}";

/// Default `chrono` timestamp format.
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Default line layout for colored terminal output.
pub fn terminal_template() -> String {
    format!(
        "{{5}}[{{0}}][{{2}}][{bold}{{3}}{reset_bold}]: {{4}}{reset}",
        bold = styles::BOLD,
        reset_bold = styles::RESET_BOLD,
        reset = styles::RESET_ALL,
    )
}

/// How log records are turned into lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFormat {
    template: String,
    name_template: String,
    time_format: String,
}

impl Default for LogFormat {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
            name_template: DEFAULT_NAME_TEMPLATE.to_string(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
        }
    }
}

impl LogFormat {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            ..Self::default()
        }
    }

    /// The default layout with color and a bold severity.
    pub fn terminal() -> Self {
        Self::new(terminal_template())
    }

    pub fn with_name_template(mut self, template: impl Into<String>) -> Self {
        self.name_template = template.into();
        self
    }

    /// Replaces the `chrono` strftime format used for `{2}`.
    ///
    /// # Errors
    ///
    /// [`LoggingError::InvalidTimeFormat`] if `format` has a specifier
    /// `chrono` cannot render.
    pub fn with_time_format(mut self, format: impl Into<String>) -> Result<Self> {
        let format = format.into();
        validate_time_format(&format)?;
        self.time_format = format;
        Ok(self)
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn name_template(&self) -> &str {
        &self.name_template
    }

    pub fn time_format(&self) -> &str {
        &self.time_format
    }

    /// Joins `names` from the root down with the name template.
    pub fn full_name(&self, names: &[String]) -> String {
        let mut iter = names.iter();
        let Some(first) = iter.next() else {
            return String::new();
        };
        iter.fold(first.clone(), |parent, child| {
            substitute(&self.name_template, &[&parent, child])
        })
    }

    /// Renders `record`. `color` fills `{5}` and is usually an SGR sequence or empty.
    pub fn render(&self, record: &LogRecord, color: &str) -> String {
        let name = self.full_name(&record.logger_names);
        let time = record.time.format(&self.time_format).to_string();
        substitute(
            &self.template,
            &[
                &name,
                &record.logger_id,
                &time,
                record.severity.name(),
                &record.message,
                color,
            ],
        )
    }
}

/// Checks that every specifier in `format` is one `chrono` can render.
pub fn validate_time_format(format: &str) -> Result<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(LoggingError::InvalidTimeFormat(format.to_string()));
    }
    Ok(())
}

/// Replaces `{N}` with `args[N]`.
pub fn substitute(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len() + 32);
    let mut rest = template;

    while let Some(pos) = rest.find(['{', '}']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if tail.starts_with("{{") {
            out.push('{');
            rest = &tail[2..];
            continue;
        }
        if tail.starts_with("}}") {
            out.push('}');
            rest = &tail[2..];
            continue;
        }

        if tail.starts_with('{') {
            if let Some(end) = tail.find('}') {
                let value = tail[1..end]
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| args.get(index));
                if let Some(value) = value {
                    out.push_str(value);
                    rest = &tail[end + 1..];
                    continue;
                }
            }
        }

        out.push_str(&tail[..1]);
        rest = &tail[1..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::severity::Severity;
    use chrono::{Local, TimeZone};
    use pretty_assertions::assert_eq;

    fn record(names: &[&str]) -> LogRecord {
        let mut record = LogRecord::new(
            Severity::Warning,
            "disk almost full",
            "app.db",
            names.iter().map(|n| n.to_string()).collect(),
        );
        record.time = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();
        record
    }

    #[test]
    fn test_substitute() {
        assert_eq!(substitute("{0}-{1}", &["a", "b"]), "a-b");
        assert_eq!(substitute("{1}{1}", &["a", "b"]), "bb");
        assert_eq!(substitute("{{0}} {0}", &["x"]), "{0} x");
        assert_eq!(substitute("{9} {x} {", &["a"]), "{9} {x} {");
        assert_eq!(substitute("a } b", &[]), "a } b");
        assert_eq!(substitute("ü{0}ü", &["é"]), "üéü");
    }

    #[test]
    fn test_default_render() {
        let line = LogFormat::default().render(&record(&["app"]), "");
        assert_eq!(line, "[app][2024-03-09 14:05:00][Warning]: disk almost full");
    }

    #[test]
    fn test_name_applied_recursively() {
        let format = LogFormat::default();
        let names: Vec<String> = ["app", "db", "pool"].iter().map(|s| s.to_string()).collect();
        assert_eq!(format.full_name(&names), "app: db: pool");

        let arrows = format.with_name_template("{0} > {1}");
        assert_eq!(arrows.full_name(&names), "app > db > pool");
        assert_eq!(arrows.full_name(&[]), "");
    }

    #[test]
    fn test_id_placeholder() {
        let line = LogFormat::new("{1} {3}").render(&record(&["app", "db"]), "");
        assert_eq!(line, "app.db Warning");
    }

    #[test]
    fn test_terminal_template() {
        let line = LogFormat::terminal().render(&record(&["app"]), "<c>");
        assert_eq!(
            line,
            "<c>[app][2024-03-09 14:05:00][\x1b[1mWarning\x1b[22m]: disk almost full\x1b[0m"
        );
    }

    #[test]
    fn test_custom_time_format() {
        let format = LogFormat::new("{2}").with_time_format("%H:%M").unwrap();
        assert_eq!(format.render(&record(&["app"]), ""), "14:05");
    }

    #[test]
    fn test_invalid_time_format_rejected() {
        for bad in ["%Q", "%Y-%"] {
            let err = LogFormat::default().with_time_format(bad).unwrap_err();
            assert!(matches!(err, LoggingError::InvalidTimeFormat(ref f) if f == bad));
        }
        assert!(validate_time_format("%Y %%literal T").is_ok());
    }
}
