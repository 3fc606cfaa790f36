//! Options controlling which sources a parse consults and how.

use std::fmt;
use std::sync::Arc;

use camino::Utf8PathBuf;

use crate::config::ConfigParser;
use crate::env::Environment;

/// What to do when two flags derive the same environment variable name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AmbiguityPolicy {
    /// Abort the parse with [`crate::FlagError::AmbiguousName`].
    #[default]
    Reject,
    /// Ignore the colliding variable for every flag involved.
    Skip,
}

/// Where the config file path comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigFile {
    /// A fixed path.
    Path(Utf8PathBuf),
    /// The current value of the named flag, read after arguments and the
    /// environment are applied. An empty value means no config file.
    Flag(String),
}

/// Immutable settings for one parse.
///
/// Environment parsing is off until [`ParseOptions::env_vars`] or
/// [`ParseOptions::env_prefix`] enables it, and the config file step is
/// skipped until both a location and a parser are configured.
///
/// # Examples
///
/// ```
/// use layerflags::{Environment, ParseOptions, PlainParser};
///
/// let options = ParseOptions::new()
///     .env_prefix("APP")
///     .environment(Environment::from_pairs([("APP_PORT", "8080")]))
///     .config_file_flag("config")
///     .config_parser(PlainParser)
///     .allow_missing_config_file(true);
/// assert_eq!(options.prefix(), Some("APP"));
/// ```
#[derive(Clone, Default)]
pub struct ParseOptions {
    pub(crate) env_enabled: bool,
    pub(crate) env_prefix: Option<String>,
    pub(crate) env_case_sensitive: bool,
    pub(crate) env_short_names: bool,
    pub(crate) env_split: Option<String>,
    pub(crate) ambiguity: AmbiguityPolicy,
    pub(crate) environment: Environment,
    pub(crate) config_file: Option<ConfigFile>,
    pub(crate) config_parser: Option<Arc<dyn ConfigParser>>,
    pub(crate) allow_missing_config: bool,
    pub(crate) ignore_undefined: bool,
}

impl ParseOptions {
    /// Creates options that only consult command-line arguments.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables environment parsing without a prefix.
    #[must_use]
    pub const fn env_vars(mut self) -> Self {
        self.env_enabled = true;
        self
    }

    /// Enables environment parsing with variables named `PREFIX_NAME`.
    ///
    /// Trailing underscores on `prefix` are ignored.
    #[must_use]
    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        let raw = prefix.into();
        let trimmed = raw.trim_end_matches('_');
        self.env_prefix = (!trimmed.is_empty()).then(|| trimmed.to_owned());
        self.env_enabled = true;
        self
    }

    /// Matches variable names exactly instead of ignoring case.
    #[must_use]
    pub const fn env_case_sensitive(mut self, sensitive: bool) -> Self {
        self.env_case_sensitive = sensitive;
        self
    }

    /// Also derives a variable from each flag's short name.
    #[must_use]
    pub const fn env_short_names(mut self, enabled: bool) -> Self {
        self.env_short_names = enabled;
        self
    }

    /// Splits each variable's value on `separator`, applying every piece.
    #[must_use]
    pub fn env_split(mut self, separator: impl Into<String>) -> Self {
        let text = separator.into();
        self.env_split = (!text.is_empty()).then_some(text);
        self
    }

    /// Chooses how colliding variable names are handled.
    #[must_use]
    pub const fn ambiguity(mut self, policy: AmbiguityPolicy) -> Self {
        self.ambiguity = policy;
        self
    }

    /// Supplies the environment snapshot scanned by the parse.
    #[must_use]
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Reads configuration from a fixed path.
    #[must_use]
    pub fn config_file(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.config_file = Some(ConfigFile::Path(path.into()));
        self
    }

    /// Reads the config file path from the named flag.
    #[must_use]
    pub fn config_file_flag(mut self, flag: impl Into<String>) -> Self {
        self.config_file = Some(ConfigFile::Flag(flag.into()));
        self
    }

    /// Sets the parser used for the config file.
    #[must_use]
    pub fn config_parser(mut self, parser: impl ConfigParser + 'static) -> Self {
        self.config_parser = Some(Arc::new(parser));
        self
    }

    /// Treats a missing config file as empty instead of failing.
    #[must_use]
    pub const fn allow_missing_config_file(mut self, allow: bool) -> Self {
        self.allow_missing_config = allow;
        self
    }

    /// Skips config entries that name no flag instead of failing.
    #[must_use]
    pub const fn ignore_undefined_config_names(mut self, ignore: bool) -> Self {
        self.ignore_undefined = ignore;
        self
    }

    /// Returns the normalised environment prefix.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.env_prefix.as_deref()
    }
}

impl fmt::Debug for ParseOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseOptions")
            .field("env_enabled", &self.env_enabled)
            .field("env_prefix", &self.env_prefix)
            .field("env_case_sensitive", &self.env_case_sensitive)
            .field("env_short_names", &self.env_short_names)
            .field("env_split", &self.env_split)
            .field("ambiguity", &self.ambiguity)
            .field("environment", &self.environment.len())
            .field("config_file", &self.config_file)
            .field("config_parser", &self.config_parser.as_ref().map(|_| "<parser>"))
            .field("allow_missing_config", &self.allow_missing_config)
            .field("ignore_undefined", &self.ignore_undefined)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::ParseOptions;

    #[rstest]
    #[case("APP", Some("APP"))]
    #[case("APP_", Some("APP"))]
    #[case("APP__", Some("APP"))]
    #[case("_", None)]
    #[case("", None)]
    fn normalises_prefix(#[case] raw: &str, #[case] expected: Option<&str>) {
        let options = ParseOptions::new().env_prefix(raw);
        assert_eq!(options.prefix(), expected);
        assert!(options.env_enabled);
    }

    #[test]
    fn defaults_consult_arguments_only() {
        let options = ParseOptions::new();
        assert!(!options.env_enabled);
        assert!(options.config_file.is_none());
        assert!(options.config_parser.is_none());
    }

    #[test]
    fn empty_split_separator_disables_splitting() {
        assert!(ParseOptions::new().env_split("").env_split.is_none());
        assert_eq!(
            ParseOptions::new().env_split(",").env_split.as_deref(),
            Some(",")
        );
    }
}
