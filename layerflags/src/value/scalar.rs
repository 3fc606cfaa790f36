//! Single-valued holders: each `set` overwrites the previous value.

use super::{FlagValue, ParseValue};
use crate::ValueError;

/// Holder for one value of `T`.
///
/// # Examples
///
/// ```
/// use layerflags::value::{FlagValue, Scalar};
///
/// let mut port = Scalar::new(8080_u64);
/// port.set("9090")?;
/// assert_eq!(*port.get(), 9090);
/// port.reset();
/// assert_eq!(*port.get(), 8080);
/// # Ok::<_, layerflags::ValueError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Scalar<T> {
    value: T,
    default: T,
}

impl<T: ParseValue> Scalar<T> {
    /// Creates a holder whose current and default value is `default`.
    #[must_use]
    pub fn new(default: T) -> Self {
        Self {
            value: default.clone(),
            default,
        }
    }

    /// Returns the current value.
    #[must_use]
    pub const fn get(&self) -> &T {
        &self.value
    }

    /// Returns the declared default.
    #[must_use]
    pub const fn default_value(&self) -> &T {
        &self.default
    }
}

impl<T: ParseValue> FlagValue for Scalar<T> {
    fn set(&mut self, raw: &str) -> Result<(), ValueError> {
        self.value = T::parse_value(raw)?;
        Ok(())
    }

    fn format(&self) -> String {
        self.value.format_value()
    }

    fn is_bool(&self) -> bool {
        T::IS_BOOL
    }

    fn reset(&mut self) {
        self.value = self.default.clone();
    }

    fn placeholder(&self) -> &'static str {
        T::PLACEHOLDER
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::Scalar;
    use crate::value::FlagValue;

    #[test]
    fn failed_set_keeps_previous_value() {
        let mut delta = Scalar::new(Duration::from_secs(1));
        assert!(delta.set("soon").is_err());
        assert_eq!(*delta.get(), Duration::from_secs(1));
    }

    #[test]
    fn repeated_sets_overwrite() {
        let mut name = Scalar::new(String::new());
        name.set("first").ok();
        name.set("second").ok();
        assert_eq!(name.get(), "second");
        assert_eq!(name.format(), "second");
    }

    #[test]
    fn only_booleans_stand_alone() {
        assert!(Scalar::new(false).is_bool());
        assert!(!Scalar::new(0_i64).is_bool());
        assert_eq!(Scalar::new(0.5_f64).placeholder(), "FLOAT");
    }
}
