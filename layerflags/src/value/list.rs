//! Repeatable holders that collect one entry per `set`.

use super::{FlagValue, ParseValue};
use crate::ValueError;

/// Ordered collection of `T`.
///
/// The first `set` after declaration or [`FlagValue::reset`] discards the
/// default entries; later calls append.
#[derive(Debug, Clone, PartialEq)]
pub struct List<T> {
    values: Vec<T>,
    default: Vec<T>,
    replaced_default: bool,
}

impl<T: ParseValue> List<T> {
    /// Creates a list starting out with `default`.
    #[must_use]
    pub fn new(default: Vec<T>) -> Self {
        Self {
            values: default.clone(),
            default,
            replaced_default: false,
        }
    }

    /// Returns the collected entries in the order they were set.
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    fn push(&mut self, value: T) {
        if !self.replaced_default {
            self.values.clear();
            self.replaced_default = true;
        }
        self.values.push(value);
    }
}

impl<T: ParseValue> Default for List<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T: ParseValue> FlagValue for List<T> {
    fn set(&mut self, raw: &str) -> Result<(), ValueError> {
        let value = T::parse_value(raw)?;
        self.push(value);
        Ok(())
    }

    fn format(&self) -> String {
        format_entries(&self.values)
    }

    fn reset(&mut self) {
        self.values.clone_from(&self.default);
        self.replaced_default = false;
    }

    fn placeholder(&self) -> &'static str {
        T::PLACEHOLDER
    }
}

/// [`List`] that ignores entries equal to one already collected.
#[derive(Debug, Clone, PartialEq)]
pub struct UniqueList<T>(List<T>);

impl<T: ParseValue> UniqueList<T> {
    /// Creates a list starting out with `default`.
    #[must_use]
    pub fn new(default: Vec<T>) -> Self {
        Self(List::new(default))
    }

    /// Returns the distinct entries in first-seen order.
    #[must_use]
    pub fn values(&self) -> &[T] {
        self.0.values()
    }
}

impl<T: ParseValue> Default for UniqueList<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T: ParseValue> FlagValue for UniqueList<T> {
    fn set(&mut self, raw: &str) -> Result<(), ValueError> {
        let value = T::parse_value(raw)?;
        if self.0.replaced_default && self.0.values.contains(&value) {
            return Ok(());
        }
        self.0.push(value);
        Ok(())
    }

    fn format(&self) -> String {
        self.0.format()
    }

    fn reset(&mut self) {
        self.0.reset();
    }

    fn placeholder(&self) -> &'static str {
        T::PLACEHOLDER
    }
}

fn format_entries<T: ParseValue>(values: &[T]) -> String {
    values
        .iter()
        .map(ParseValue::format_value)
        .collect::<Vec<_>>()
        .join(", ")
}
