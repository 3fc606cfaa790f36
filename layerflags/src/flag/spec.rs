//! Declaration-time description of a flag.

use crate::{FlagError, FlagResult};

/// Names and usage of a flag about to be registered.
///
/// # Examples
///
/// ```
/// use layerflags::FlagSpec;
///
/// let spec = FlagSpec::default()
///     .short('d')
///     .long("delta")
///     .usage("interval between ticks");
/// assert_eq!(spec.long_name(), Some("delta"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagSpec {
    pub(super) short: Option<char>,
    pub(super) long: Option<String>,
    pub(super) usage: String,
    pub(super) placeholder: Option<String>,
}

impl FlagSpec {
    /// Sets the single-character name.
    #[must_use]
    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    /// Sets the multi-character name.
    #[must_use]
    pub fn long(mut self, long: impl Into<String>) -> Self {
        self.long = Some(long.into());
        self
    }

    /// Sets the usage text.
    #[must_use]
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    /// Overrides the value placeholder shown in usage.
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Returns the short name, if any.
    #[must_use]
    pub const fn short_name(&self) -> Option<char> {
        self.short
    }

    /// Returns the long name, if any.
    #[must_use]
    pub fn long_name(&self) -> Option<&str> {
        self.long.as_deref()
    }

    pub(super) fn validate(&self) -> FlagResult<()> {
        let invalid = |reason: String| Err(FlagError::InvalidFlag { reason });
        if self.short.is_none() && self.long.is_none() {
            return invalid(String::from("a flag needs a short or a long name"));
        }
        if let Some(short) = self.short
            && (short == '-' || short == '=' || short.is_whitespace())
        {
            return invalid(format!("{short:?} cannot be a short name"));
        }
        if let Some(long) = &self.long {
            if long.chars().count() < 2 {
                return invalid(format!("long name {long:?} needs at least two characters"));
            }
            if long.starts_with('-') || long.contains('=') || long.contains(char::is_whitespace) {
                return invalid(format!(
                    "long name {long:?} cannot start with '-' or contain '=' or whitespace"
                ));
            }
        }
        Ok(())
    }
}
