//! Typed value holders backing each flag.
//!
//! Every flag owns a boxed [`FlagValue`]. The resolver only ever talks to
//! that capability: it hands over raw text from arguments, environment
//! variables, or config files and lets the holder decide how to convert it
//! and whether repetition overwrites or appends.

mod choice;
mod duration;
mod list;
mod scalar;

use std::any::Any;
use std::fmt;

use crate::ValueError;

pub use choice::Choice;
pub use list::{List, UniqueList};
pub use scalar::Scalar;

/// Upcast helper so handles can recover the concrete holder type.
pub trait AsAny: Any {
    /// Returns `self` as [`Any`].
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Capability implemented by every flag value holder.
pub trait FlagValue: AsAny + fmt::Debug {
    /// Parses `raw` and applies it to the held value.
    ///
    /// # Errors
    ///
    /// Returns a [`ValueError`] when `raw` cannot be converted.
    fn set(&mut self, raw: &str) -> Result<(), ValueError>;

    /// Renders the current value in the form `set` accepts.
    fn format(&self) -> String;

    /// Whether the flag may appear on the command line without a value.
    fn is_bool(&self) -> bool {
        false
    }

    /// Restores the value supplied at declaration time.
    fn reset(&mut self);

    /// Short type hint shown in usage, such as `STRING` or `DURATION`.
    fn placeholder(&self) -> &'static str;
}

/// Conversion between text and a single typed value.
pub trait ParseValue: Clone + fmt::Debug + PartialEq + 'static {
    /// Type hint shown in usage.
    const PLACEHOLDER: &'static str;

    /// Whether a bare flag (no `=value`) means `true`.
    const IS_BOOL: bool = false;

    /// Parses `raw` into a value.
    ///
    /// # Errors
    ///
    /// Returns a [`ValueError`] describing why `raw` was rejected.
    fn parse_value(raw: &str) -> Result<Self, ValueError>;

    /// Renders the value so that `parse_value` round-trips it.
    fn format_value(&self) -> String;
}

impl ParseValue for bool {
    const PLACEHOLDER: &'static str = "BOOL";
    const IS_BOOL: bool = true;

    fn parse_value(raw: &str) -> Result<Self, ValueError> {
        match raw {
            "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
            "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
            _ => Err(ValueError::new("expected a boolean")),
        }
    }

    fn format_value(&self) -> String {
        self.to_string()
    }
}

impl ParseValue for String {
    const PLACEHOLDER: &'static str = "STRING";

    fn parse_value(raw: &str) -> Result<Self, ValueError> {
        Ok(raw.to_owned())
    }

    fn format_value(&self) -> String {
        self.clone()
    }
}

macro_rules! number_value {
    ($($ty:ty => $placeholder:literal),* $(,)?) => {
        $(
            impl ParseValue for $ty {
                const PLACEHOLDER: &'static str = $placeholder;

                fn parse_value(raw: &str) -> Result<Self, ValueError> {
                    raw.trim().parse().map_err(|err| ValueError::new(format!("{err}")))
                }

                fn format_value(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

number_value! {
    i64 => "INT",
    i32 => "INT",
    u64 => "UINT",
    u32 => "UINT",
    f64 => "FLOAT",
}

impl ParseValue for std::time::Duration {
    const PLACEHOLDER: &'static str = "DURATION";

    fn parse_value(raw: &str) -> Result<Self, ValueError> {
        duration::parse(raw)
    }

    fn format_value(&self) -> String {
        duration::format(*self)
    }
}
