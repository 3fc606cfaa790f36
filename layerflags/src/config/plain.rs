//! Whitespace-separated `name value` files.

use std::io::{BufRead, BufReader, Read};

use super::{ConfigParser, Setter, strip_comment};
use crate::{FlagError, FlagResult};

/// Parser for files holding one `name value` pair per line.
///
/// Line rules:
///
/// - blank lines and lines starting with `#` are skipped;
/// - leading hyphens on the name are ignored;
/// - a `#` that follows whitespace begins a trailing comment, including one
///   right after the name, so `name #note` has no value;
/// - a `#` inside the value text (`value#fragment`) is kept;
/// - a name without a value means `true`.
///
/// # Examples
///
/// ```
/// use layerflags::{ConfigParser, PlainParser};
///
/// let mut input = "# defaults\n--verbose\nport 8080 # http\n".as_bytes();
/// let mut seen = Vec::new();
/// PlainParser.parse(&mut input, &mut |name: &str, value: &str| {
///     seen.push(format!("{name}={value}"));
///     Ok(())
/// })?;
/// assert_eq!(seen, ["verbose=true", "port=8080"]);
/// # Ok::<_, layerflags::FlagError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainParser;

impl ConfigParser for PlainParser {
    fn parse(&self, reader: &mut dyn Read, set: &mut Setter<'_>) -> FlagResult<()> {
        for line in BufReader::new(reader).lines() {
            let text = line.map_err(FlagError::config_parse)?;
            let entry = text.trim();
            if entry.is_empty() || entry.starts_with('#') {
                continue;
            }
            let (name, rest) = entry
                .split_once(char::is_whitespace)
                .unwrap_or((entry, ""));
            let value = strip_comment(rest.trim());
            set(
                name.trim_start_matches('-'),
                if value.is_empty() { "true" } else { value },
            )?;
        }
        Ok(())
    }
}
