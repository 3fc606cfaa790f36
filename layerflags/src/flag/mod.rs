//! Flag declarations and the sets that own them.

mod handle;
mod set;
mod spec;

use crate::value::FlagValue;
use crate::{FlagError, FlagResult};

pub use handle::Handle;
pub use set::FlagSet;
pub use spec::FlagSpec;

/// Identity of a flag across the sets visible to one parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct FlagRef {
    pub(crate) set_id: u64,
    pub(crate) index: usize,
}

/// A named, typed, settable parameter owned by a [`FlagSet`].
#[derive(Debug)]
pub struct Flag {
    short: Option<char>,
    long: Option<String>,
    usage: String,
    placeholder: Option<String>,
    group: String,
    default_text: String,
    value: Box<dyn FlagValue>,
    is_set: bool,
}

impl Flag {
    fn new(spec: FlagSpec, value: Box<dyn FlagValue>, group: &str) -> Self {
        let FlagSpec {
            short,
            long,
            usage,
            placeholder,
        } = spec;
        Self {
            short,
            long,
            usage,
            placeholder,
            group: group.to_owned(),
            default_text: value.format(),
            value,
            is_set: false,
        }
    }

    /// Single-character name, used as `-x`.
    #[must_use]
    pub const fn short(&self) -> Option<char> {
        self.short
    }

    /// Multi-character name, used as `--name`.
    #[must_use]
    pub fn long(&self) -> Option<&str> {
        self.long.as_deref()
    }

    /// Human-facing name: `--long` when present, otherwise `-s`.
    #[must_use]
    pub fn display_name(&self) -> String {
        match (&self.long, self.short) {
            (Some(long), _) => format!("--{long}"),
            (None, Some(short)) => format!("-{short}"),
            (None, None) => String::new(),
        }
    }

    /// Usage text supplied at declaration.
    #[must_use]
    pub fn usage(&self) -> &str {
        &self.usage
    }

    /// Placeholder for the value in usage output, falling back to the
    /// value kind's type hint.
    #[must_use]
    pub fn placeholder(&self) -> &str {
        self.placeholder
            .as_deref()
            .unwrap_or_else(|| self.value.placeholder())
    }

    /// Name of the flag set that declared this flag.
    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Formatted value at declaration time.
    #[must_use]
    pub fn default_text(&self) -> &str {
        &self.default_text
    }

    /// Formatted current value.
    #[must_use]
    pub fn value_text(&self) -> String {
        self.value.format()
    }

    /// Whether the flag can be given without a value.
    #[must_use]
    pub fn is_bool(&self) -> bool {
        self.value.is_bool()
    }

    /// Whether any source has applied a value since the last reset.
    #[must_use]
    pub const fn is_set(&self) -> bool {
        self.is_set
    }

    /// Borrows the value holder.
    #[must_use]
    pub fn value(&self) -> &dyn FlagValue {
        self.value.as_ref()
    }

    /// Whether `name` is this flag's long name, or its short name when
    /// `name` is a single character.
    pub(crate) fn is_named(&self, name: &str) -> bool {
        self.long.as_deref() == Some(name) || self.short.is_some_and(|s| single_char(name) == Some(s))
    }

    /// Applies `raw` and marks the flag as set.
    pub(crate) fn apply(&mut self, raw: &str) -> FlagResult<()> {
        self.value
            .set(raw)
            .map_err(|reason| FlagError::ParseValue {
                flag: self.display_name(),
                value: raw.to_owned(),
                reason,
            })?;
        self.is_set = true;
        Ok(())
    }

    fn reset(&mut self) {
        self.value.reset();
        self.is_set = false;
    }

    fn names(&self) -> impl Iterator<Item = String> + '_ {
        self.short
            .map(String::from)
            .into_iter()
            .chain(self.long.iter().cloned())
    }
}

/// Returns the only character of `name`, if it has exactly one.
pub(crate) fn single_char(name: &str) -> Option<char> {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
