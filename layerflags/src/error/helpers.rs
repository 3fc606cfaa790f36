//! Constructors and classification helpers for `FlagError`.

use camino::Utf8Path;

use super::{BoxError, FlagError};

impl FlagError {
    /// Returns `true` when the error is the `-h`/`--help` sentinel.
    ///
    /// Entry points use this to print usage and exit successfully instead of
    /// reporting a failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use layerflags::FlagError;
    /// assert!(FlagError::HelpRequested.is_help_request());
    /// ```
    #[must_use]
    pub const fn is_help_request(&self) -> bool {
        matches!(self, Self::HelpRequested)
    }

    /// Returns `true` when the selected command had nothing to execute.
    #[must_use]
    pub const fn is_no_exec(&self) -> bool {
        matches!(self, Self::NoExec { .. })
    }

    /// Wraps a decoder failure raised by a config parser.
    ///
    /// The path is filled in by the resolver once the error leaves the
    /// parser.
    #[must_use]
    pub fn config_parse(source: impl Into<BoxError>) -> Self {
        Self::ConfigParse {
            path: None,
            source: source.into(),
        }
    }

    /// Error for a config file entry that names no visible flag.
    #[must_use]
    pub fn undefined_config_name(name: &str) -> Self {
        Self::config_parse(format!("undefined flag name {name:?}"))
    }

    /// Attaches `path` to a [`FlagError::ConfigParse`] that lacks one.
    ///
    /// Every other variant is returned unchanged.
    #[must_use]
    pub(crate) fn with_config_path(self, path: &Utf8Path) -> Self {
        match self {
            Self::ConfigParse { path: None, source } => Self::ConfigParse {
                path: Some(path.to_owned()),
                source,
            },
            other => other,
        }
    }
}
