//! Command-line definitions.
//!
//! A definition is assembled from immutable values:
//!
//! - [`ParameterFormat`]: a named value that follows an option
//! - [`OptionFormat`]: a keyed flag (`-v`, `--verbose`) with ordered parameters
//! - [`ArgumentFormat`]: a positional value, bound by order
//! - [`CategoryFormat`]: a named group of arguments and options used for help layout
//! - [`ArgumentFormatter`]: the root definition handed to the parser
//!
//! Every value is produced by a consuming builder, and the root is validated
//! once in [`FormatterBuilder::build`], which rejects duplicate option keys.
//!
//! # Examples
//!
//! ```
//! use tinct_args::format::{ArgumentFormat, ArgumentFormatter, OptionFormat, ParameterFormat};
//!
//! let formatter = ArgumentFormatter::builder("copy")
//!     .description("Copies a file.")
//!     .version("1.2.0")
//!     .argument(ArgumentFormat::new("source", "The file to copy."))
//!     .argument(ArgumentFormat::new("target", "Where to put it."))
//!     .option(
//!         OptionFormat::builder()
//!             .key("m")
//!             .key("mode")
//!             .description("File mode of the copy.")
//!             .parameter(ParameterFormat::new("octal", "Mode such as 644."))
//!             .build(),
//!     )
//!     .help_option(OptionFormat::help().build())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(formatter.all_arguments().count(), 2);
//! assert!(formatter.find_option("mode").is_some());
//! ```

use crate::error::{DefinitionError, DefinitionResult};
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Category that collects arguments added directly to the formatter builder.
pub const DEFAULT_ARGUMENTS_CATEGORY: &str = "Required Arguments";

/// Category that collects options added directly to the formatter builder,
/// including the help and version options.
pub const DEFAULT_OPTIONS_CATEGORY: &str = "Options";

// ============================================================================
// Parameters
// ============================================================================

/// A value consumed after an option key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterFormat {
    name: String,
    description: String,
    required: bool,
}

impl ParameterFormat {
    /// Creates a required parameter.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required: true,
        }
    }

    /// Marks this parameter as optional.
    ///
    /// Optional parameters are consumed when a value is available and may only
    /// follow required ones.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_required(&self) -> bool {
        self.required
    }
}

// ============================================================================
// Options
// ============================================================================

/// What an option does beyond being recorded in the parse result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptionRole {
    /// An ordinary option.
    #[default]
    Regular,
    /// Shows the help page; `quit` ends the program afterwards.
    Help { quit: bool },
    /// Shows name, version and description; `quit` ends the program afterwards.
    Version { quit: bool },
}

impl OptionRole {
    /// Whether the program should stop after this option is handled.
    pub fn quits(self) -> bool {
        match self {
            Self::Regular => false,
            Self::Help { quit } | Self::Version { quit } => quit,
        }
    }
}

/// A keyed option such as `-o file` or `--verbose`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionFormat {
    keys: Vec<String>,
    description: String,
    parameters: Vec<ParameterFormat>,
    role: OptionRole,
}

impl OptionFormat {
    /// Starts an ordinary option.
    pub fn builder() -> OptionBuilder {
        OptionBuilder::default()
    }

    /// Starts a help option with keys `h` and `help`.
    pub fn help() -> OptionBuilder {
        OptionBuilder {
            keys: vec!["h".to_string(), "help".to_string()],
            description: "Displays this help page.".to_string(),
            parameters: Vec::new(),
            role: OptionRole::Help { quit: true },
        }
    }

    /// Starts a version option with keys `v` and `version`.
    pub fn version() -> OptionBuilder {
        OptionBuilder {
            keys: vec!["v".to_string(), "version".to_string()],
            description: "Displays the version and description of this program.".to_string(),
            parameters: Vec::new(),
            role: OptionRole::Version { quit: true },
        }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn parameters(&self) -> &[ParameterFormat] {
        &self.parameters
    }

    pub fn role(&self) -> OptionRole {
        self.role
    }

    /// Returns true if `key` (without dashes) is one of this option's keys.
    pub fn has_key(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    /// Number of parameters that must be supplied.
    pub fn required_parameters(&self) -> usize {
        self.parameters.iter().filter(|p| p.required).count()
    }

    /// The keys as they are typed: `-k` for one-character keys, `--key`
    /// otherwise, joined by `, `.
    pub fn display_keys(&self) -> String {
        self.keys
            .iter()
            .map(|k| display_key(k))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Formats a single key with its dash prefix.
pub fn display_key(key: &str) -> String {
    if key.chars().count() == 1 {
        format!("-{key}")
    } else {
        format!("--{key}")
    }
}

/// Builder for [`OptionFormat`].
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct OptionBuilder {
    keys: Vec<String>,
    description: String,
    parameters: Vec<ParameterFormat>,
    role: OptionRole,
}

impl OptionBuilder {
    /// Adds a key, written without dashes.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.keys.push(key.into());
        self
    }

    /// Adds several keys.
    pub fn keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Replaces every key declared so far.
    pub fn replace_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Appends a parameter. Parameters are consumed in declaration order.
    pub fn parameter(mut self, parameter: ParameterFormat) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Sets whether a help or version option ends the program. Has no effect
    /// on ordinary options.
    pub fn quit(mut self, quit: bool) -> Self {
        self.role = match self.role {
            OptionRole::Regular => OptionRole::Regular,
            OptionRole::Help { .. } => OptionRole::Help { quit },
            OptionRole::Version { .. } => OptionRole::Version { quit },
        };
        self
    }

    pub fn build(self) -> OptionFormat {
        OptionFormat {
            keys: self.keys,
            description: self.description,
            parameters: self.parameters,
            role: self.role,
        }
    }
}

// ============================================================================
// Positional arguments
// ============================================================================

/// A positional argument. Its position is its place in the definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentFormat {
    name: String,
    description: String,
}

impl ArgumentFormat {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

// ============================================================================
// Categories
// ============================================================================

/// A named group of arguments and options. Only affects help output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFormat {
    name: String,
    arguments: Vec<ArgumentFormat>,
    options: Vec<OptionFormat>,
}

impl CategoryFormat {
    pub fn builder(name: impl Into<String>) -> CategoryBuilder {
        CategoryBuilder {
            category: CategoryFormat {
                name: name.into(),
                arguments: Vec::new(),
                options: Vec::new(),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arguments(&self) -> &[ArgumentFormat] {
        &self.arguments
    }

    pub fn options(&self) -> &[OptionFormat] {
        &self.options
    }

    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty() && self.options.is_empty()
    }
}

/// Builder for [`CategoryFormat`].
#[derive(Debug, Clone)]
#[must_use]
pub struct CategoryBuilder {
    category: CategoryFormat,
}

impl CategoryBuilder {
    pub fn argument(mut self, argument: ArgumentFormat) -> Self {
        self.category.arguments.push(argument);
        self
    }

    pub fn option(mut self, option: OptionFormat) -> Self {
        self.category.options.push(option);
        self
    }

    pub fn build(self) -> CategoryFormat {
        self.category
    }
}

// ============================================================================
// Formatter
// ============================================================================

/// Location of an option inside the category list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OptionSlot {
    category: usize,
    index: usize,
}

/// The complete, validated command-line definition.
#[derive(Debug, Clone)]
pub struct ArgumentFormatter {
    name: String,
    description: Option<String>,
    version: Option<String>,
    should_exit_on_error: bool,
    categories: Vec<CategoryFormat>,
    keys: HashMap<String, OptionSlot>,
    help: Option<OptionSlot>,
    version_option: Option<OptionSlot>,
}

impl ArgumentFormatter {
    /// Starts a definition for the program `name`.
    pub fn builder(name: impl Into<String>) -> FormatterBuilder {
        FormatterBuilder {
            name: name.into(),
            description: None,
            version: None,
            should_exit_on_error: true,
            categories: Vec::new(),
            arguments: Vec::new(),
            options: Vec::new(),
            help: None,
            version_option: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Whether a parse error should print help and end the program.
    pub fn should_exit_on_error(&self) -> bool {
        self.should_exit_on_error
    }

    pub fn categories(&self) -> &[CategoryFormat] {
        &self.categories
    }

    /// Every positional argument, in category order then declaration order.
    pub fn all_arguments(&self) -> impl Iterator<Item = &ArgumentFormat> + '_ {
        self.categories.iter().flat_map(|c| c.arguments.iter())
    }

    /// Every option, in category order then declaration order.
    pub fn all_options(&self) -> impl Iterator<Item = &OptionFormat> + '_ {
        self.categories.iter().flat_map(|c| c.options.iter())
    }

    /// Looks up an option by one of its keys (without dashes).
    pub fn find_option(&self, key: &str) -> Option<&OptionFormat> {
        self.keys.get(key).map(|slot| self.option_at(*slot))
    }

    /// The designated help option.
    pub fn help_option(&self) -> Option<&OptionFormat> {
        self.help.map(|slot| self.option_at(slot))
    }

    /// The designated version option.
    pub fn version_option(&self) -> Option<&OptionFormat> {
        self.version_option.map(|slot| self.option_at(slot))
    }

    fn option_at(&self, slot: OptionSlot) -> &OptionFormat {
        &self.categories[slot.category].options[slot.index]
    }
}

/// Builder for [`ArgumentFormatter`].
///
/// Arguments and options added directly land in the
/// [`DEFAULT_ARGUMENTS_CATEGORY`] and [`DEFAULT_OPTIONS_CATEGORY`] groups. The
/// arguments group comes first, then explicit categories in insertion order,
/// then the options group.
#[derive(Debug, Clone)]
#[must_use]
pub struct FormatterBuilder {
    name: String,
    description: Option<String>,
    version: Option<String>,
    should_exit_on_error: bool,
    categories: Vec<CategoryFormat>,
    arguments: Vec<ArgumentFormat>,
    options: Vec<OptionFormat>,
    help: Option<OptionFormat>,
    version_option: Option<OptionFormat>,
}

impl FormatterBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets whether a parse error prints help and exits with status 1.
    pub fn should_exit_on_error(mut self, exit: bool) -> Self {
        self.should_exit_on_error = exit;
        self
    }

    pub fn argument(mut self, argument: ArgumentFormat) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Adds an option. Help and version options are routed to
    /// [`FormatterBuilder::help_option`] and [`FormatterBuilder::version_option`].
    pub fn option(self, option: OptionFormat) -> Self {
        match option.role {
            OptionRole::Regular => {
                let mut this = self;
                this.options.push(option);
                this
            }
            OptionRole::Help { .. } => self.help_option(option),
            OptionRole::Version { .. } => self.version_option(option),
        }
    }

    pub fn category(mut self, category: CategoryFormat) -> Self {
        self.categories.push(category);
        self
    }

    /// Designates the help option, replacing any earlier one.
    pub fn help_option(mut self, option: OptionFormat) -> Self {
        let option = OptionFormat {
            role: match option.role {
                OptionRole::Help { quit } => OptionRole::Help { quit },
                _ => OptionRole::Help { quit: true },
            },
            ..option
        };
        if let Some(previous) = self.help.replace(option) {
            tracing::warn!(
                keys = %previous.display_keys(),
                "help option replaced by a later declaration"
            );
        }
        self
    }

    /// Designates the version option, replacing any earlier one.
    pub fn version_option(mut self, option: OptionFormat) -> Self {
        let option = OptionFormat {
            role: match option.role {
                OptionRole::Version { quit } => OptionRole::Version { quit },
                _ => OptionRole::Version { quit: true },
            },
            ..option
        };
        if let Some(previous) = self.version_option.replace(option) {
            tracing::warn!(
                keys = %previous.display_keys(),
                "version option replaced by a later declaration"
            );
        }
        self
    }

    /// Validates the definition and freezes it.
    ///
    /// # Errors
    ///
    /// Fails when an option has no keys or a malformed key, when a key is used
    /// twice, when a required parameter follows an optional one, or when two
    /// positional arguments share a name.
    pub fn build(self) -> DefinitionResult<ArgumentFormatter> {
        let mut categories = Vec::with_capacity(self.categories.len() + 2);

        if !self.arguments.is_empty() {
            categories.push(CategoryFormat {
                name: DEFAULT_ARGUMENTS_CATEGORY.to_string(),
                arguments: self.arguments,
                options: Vec::new(),
            });
        }
        categories.extend(self.categories);

        let mut options: Vec<OptionFormat> = Vec::new();
        options.extend(self.help);
        options.extend(self.version_option);
        options.extend(self.options);
        if !options.is_empty() {
            categories.push(CategoryFormat {
                name: DEFAULT_OPTIONS_CATEGORY.to_string(),
                arguments: Vec::new(),
                options,
            });
        }

        validate_arguments(&categories)?;

        let mut keys = HashMap::new();
        let mut help = None;
        let mut version_option = None;
        for (category_index, category) in categories.iter().enumerate() {
            for (index, option) in category.options.iter().enumerate() {
                validate_option(option)?;
                let slot = OptionSlot {
                    category: category_index,
                    index,
                };
                for key in &option.keys {
                    match keys.entry(key.clone()) {
                        Entry::Occupied(_) => {
                            return Err(DefinitionError::DuplicateKey { key: key.clone() });
                        }
                        Entry::Vacant(entry) => {
                            entry.insert(slot);
                        }
                    }
                }
                match option.role {
                    OptionRole::Regular => {}
                    OptionRole::Help { .. } => {
                        if help.replace(slot).is_some() {
                            tracing::warn!(
                                keys = %option.display_keys(),
                                "more than one help option declared; the last one is used"
                            );
                        }
                    }
                    OptionRole::Version { .. } => {
                        if version_option.replace(slot).is_some() {
                            tracing::warn!(
                                keys = %option.display_keys(),
                                "more than one version option declared; the last one is used"
                            );
                        }
                    }
                }
            }
        }

        Ok(ArgumentFormatter {
            name: self.name,
            description: self.description,
            version: self.version,
            should_exit_on_error: self.should_exit_on_error,
            categories,
            keys,
            help,
            version_option,
        })
    }
}

fn validate_option(option: &OptionFormat) -> DefinitionResult<()> {
    if option.keys.is_empty() {
        return Err(DefinitionError::MissingKeys {
            description: option.description.clone(),
        });
    }

    for key in &option.keys {
        let reason = if key.is_empty() {
            Some("key is empty")
        } else if key.starts_with('-') {
            Some("keys are declared without leading dashes")
        } else if key.chars().any(char::is_whitespace) {
            Some("key contains whitespace")
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(DefinitionError::InvalidKey {
                key: key.clone(),
                reason,
            });
        }
    }

    let mut seen_optional = false;
    for parameter in &option.parameters {
        if !parameter.required {
            seen_optional = true;
        } else if seen_optional {
            return Err(DefinitionError::RequiredAfterOptional {
                option: option.display_keys(),
                parameter: parameter.name.clone(),
            });
        }
    }

    Ok(())
}

fn validate_arguments(categories: &[CategoryFormat]) -> DefinitionResult<()> {
    let mut names = std::collections::HashSet::new();
    for argument in categories.iter().flat_map(|c| c.arguments.iter()) {
        if argument.name.is_empty() {
            return Err(DefinitionError::EmptyArgumentName);
        }
        if !names.insert(argument.name.as_str()) {
            return Err(DefinitionError::DuplicateArgument {
                name: argument.name.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn flag(key: &str) -> OptionFormat {
        OptionFormat::builder().key(key).description(key).build()
    }

    #[test]
    fn test_default_categories_order() {
        let formatter = ArgumentFormatter::builder("app")
            .option(flag("a"))
            .category(
                CategoryFormat::builder("Input")
                    .argument(ArgumentFormat::new("second", ""))
                    .option(flag("b"))
                    .build(),
            )
            .argument(ArgumentFormat::new("first", ""))
            .help_option(OptionFormat::help().build())
            .build()
            .unwrap();

        let names: Vec<_> = formatter.categories().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec![DEFAULT_ARGUMENTS_CATEGORY, "Input", DEFAULT_OPTIONS_CATEGORY]);

        let args: Vec<_> = formatter.all_arguments().map(|a| a.name()).collect();
        assert_eq!(args, vec!["first", "second"]);

        let options: Vec<_> = formatter
            .all_options()
            .map(|o| o.keys()[0].as_str())
            .collect();
        assert_eq!(options, vec!["b", "h", "a"]);
    }

    #[test]
    fn test_duplicate_keys_rejected_across_categories() {
        let err = ArgumentFormatter::builder("app")
            .option(flag("x"))
            .category(CategoryFormat::builder("Other").option(flag("x")).build())
            .build()
            .unwrap_err();
        assert_eq!(err, DefinitionError::DuplicateKey { key: "x".into() });
    }

    #[test]
    fn test_help_key_clash_rejected() {
        let err = ArgumentFormatter::builder("app")
            .option(OptionFormat::builder().key("h").key("host").build())
            .help_option(OptionFormat::help().build())
            .build()
            .unwrap_err();
        assert_eq!(err, DefinitionError::DuplicateKey { key: "h".into() });
    }

    #[test]
    fn test_invalid_keys() {
        let build = |key: &str| {
            ArgumentFormatter::builder("app")
                .option(OptionFormat::builder().key(key).build())
                .build()
        };
        assert!(matches!(build(""), Err(DefinitionError::InvalidKey { .. })));
        assert!(matches!(build("-x"), Err(DefinitionError::InvalidKey { .. })));
        assert!(matches!(build("a b"), Err(DefinitionError::InvalidKey { .. })));

        let err = ArgumentFormatter::builder("app")
            .option(OptionFormat::builder().description("nothing").build())
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            DefinitionError::MissingKeys {
                description: "nothing".into()
            }
        );
    }

    #[test]
    fn test_required_after_optional() {
        let err = ArgumentFormatter::builder("app")
            .option(
                OptionFormat::builder()
                    .key("r")
                    .parameter(ParameterFormat::new("a", "").optional())
                    .parameter(ParameterFormat::new("b", ""))
                    .build(),
            )
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            DefinitionError::RequiredAfterOptional {
                option: "-r".into(),
                parameter: "b".into()
            }
        );
    }

    #[test]
    fn test_duplicate_argument_names() {
        let err = ArgumentFormatter::builder("app")
            .argument(ArgumentFormat::new("file", ""))
            .category(
                CategoryFormat::builder("More")
                    .argument(ArgumentFormat::new("file", ""))
                    .build(),
            )
            .build()
            .unwrap_err();
        assert_eq!(err, DefinitionError::DuplicateArgument { name: "file".into() });
    }

    #[test]
    fn test_later_help_option_replaces_earlier() {
        let formatter = ArgumentFormatter::builder("app")
            .help_option(OptionFormat::help().build())
            .help_option(OptionFormat::help().replace_keys(["?"]).quit(false).build())
            .build()
            .unwrap();

        let help = formatter.help_option().unwrap();
        assert_eq!(help.keys(), ["?".to_string()]);
        assert_eq!(help.role(), OptionRole::Help { quit: false });
        assert!(formatter.find_option("h").is_none());
    }

    #[test]
    fn test_option_routes_help_and_version() {
        let formatter = ArgumentFormatter::builder("app")
            .option(OptionFormat::help().build())
            .option(OptionFormat::version().build())
            .build()
            .unwrap();
        assert!(formatter.help_option().unwrap().has_key("help"));
        assert!(formatter.version_option().unwrap().has_key("version"));
        assert_eq!(formatter.find_option("v"), formatter.version_option());
    }

    #[test]
    fn test_help_role_inside_category_is_designated() {
        let formatter = ArgumentFormatter::builder("app")
            .category(
                CategoryFormat::builder("General")
                    .option(OptionFormat::help().build())
                    .build(),
            )
            .build()
            .unwrap();
        assert!(formatter.help_option().is_some());
        assert_eq!(formatter.categories().len(), 1);
    }

    #[test]
    fn test_display_keys() {
        let option = OptionFormat::builder().key("o").key("output").build();
        assert_eq!(option.display_keys(), "-o, --output");
        assert_eq!(display_key("é"), "-é");
    }

    #[test]
    fn test_default_help_and_version_text() {
        let help = OptionFormat::help().build();
        assert_eq!(help.description(), "Displays this help page.");
        assert!(help.role().quits());

        let version = OptionFormat::version().quit(false).build();
        assert_eq!(
            version.description(),
            "Displays the version and description of this program."
        );
        assert!(!version.role().quits());
    }

    #[test]
    fn test_quit_ignored_for_regular_options() {
        let option = OptionFormat::builder().key("q").quit(true).build();
        assert_eq!(option.role(), OptionRole::Regular);
    }

    #[test]
    fn test_required_parameter_count() {
        let option = OptionFormat::builder()
            .key("p")
            .parameter(ParameterFormat::new("a", ""))
            .parameter(ParameterFormat::new("b", ""))
            .parameter(ParameterFormat::new("c", "").optional())
            .build();
        assert_eq!(option.required_parameters(), 2);
        assert_eq!(option.parameters().len(), 3);
    }
}
