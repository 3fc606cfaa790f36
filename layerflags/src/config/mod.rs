//! Config files as a flag source.
//!
//! A [`ConfigParser`] turns a byte stream into `(name, value)` pairs and
//! hands each pair to a setter supplied by the resolver. Tree-shaped formats
//! decode into a [`Node`] first and are flattened into dotted names.

mod dotenv;
mod node;
mod plain;
#[cfg(any(feature = "serde_json", feature = "toml"))]
mod structured;

use std::io::Read;

use crate::FlagResult;

pub use dotenv::DotEnvParser;
pub use node::{Node, flatten};
pub use plain::PlainParser;
#[cfg(feature = "serde_json")]
pub use structured::JsonParser;
#[cfg(feature = "toml")]
pub use structured::TomlParser;
#[cfg(feature = "yaml")]
pub use structured::YamlParser;

/// Callback receiving one `(name, value)` pair from a config parser.
pub type Setter<'a> = dyn FnMut(&str, &str) -> FlagResult<()> + 'a;

/// Capability implemented by every config file format.
pub trait ConfigParser {
    /// Reads `reader` to the end, calling `set` once per value.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FlagError::ConfigParse`] when the input cannot be
    /// decoded, and propagates any error returned by `set` unchanged.
    fn parse(&self, reader: &mut dyn Read, set: &mut Setter<'_>) -> FlagResult<()>;
}

/// Cuts a trailing comment: a `#` that starts `value` or follows whitespace.
fn strip_comment(value: &str) -> &str {
    let mut after_space = true;
    for (offset, c) in value.char_indices() {
        if c == '#' && after_space {
            return value.get(..offset).unwrap_or_default().trim_end();
        }
        after_space = c.is_whitespace();
    }
    value
}
