//! String holder restricted to a fixed set of alternatives.

use super::FlagValue;
use crate::ValueError;

/// One of a declared list of strings. The first alternative is the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    alternatives: Vec<String>,
    value: String,
}

impl Choice {
    /// Creates a choice over `alternatives`.
    ///
    /// Returns `None` when no alternative is given.
    #[must_use]
    pub fn new<I, S>(alternatives: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = alternatives.into_iter().map(Into::into).collect();
        let value = names.first()?.clone();
        Some(Self {
            alternatives: names,
            value,
        })
    }

    /// Returns the selected alternative.
    #[must_use]
    pub fn get(&self) -> &str {
        &self.value
    }

    /// Returns every permitted alternative in declaration order.
    #[must_use]
    pub fn alternatives(&self) -> &[String] {
        &self.alternatives
    }
}

impl FlagValue for Choice {
    fn set(&mut self, raw: &str) -> Result<(), ValueError> {
        if !self.alternatives.iter().any(|alt| alt == raw) {
            return Err(ValueError::new(format!(
                "must be one of: {}",
                self.alternatives.join(", ")
            )));
        }
        raw.clone_into(&mut self.value);
        Ok(())
    }

    fn format(&self) -> String {
        self.value.clone()
    }

    fn reset(&mut self) {
        if let Some(first) = self.alternatives.first() {
            self.value.clone_from(first);
        }
    }

    fn placeholder(&self) -> &'static str {
        "CHOICE"
    }
}
