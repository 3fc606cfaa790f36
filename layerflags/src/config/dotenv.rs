//! `.env` style `NAME=value` files.

use std::io::{BufRead, BufReader, Read};

use super::{ConfigParser, Setter, strip_comment};
use crate::{FlagError, FlagResult};

/// Parser for `.env` files.
///
/// Keys are mapped to flag names by stripping the optional prefix,
/// lowercasing, and replacing `_` with `-`, so `APP_LOG_LEVEL=debug` sets
/// `log-level` when the prefix is `APP`.
#[derive(Debug, Clone, Default)]
pub struct DotEnvParser {
    prefix: Option<String>,
}

impl DotEnvParser {
    /// Creates a parser that maps keys without stripping a prefix.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser that strips `PREFIX_` (case-insensitively) from keys.
    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        let raw = prefix.into();
        let trimmed = raw.trim_end_matches('_');
        Self {
            prefix: (!trimmed.is_empty()).then(|| format!("{trimmed}_")),
        }
    }

    fn flag_name(&self, key: &str) -> String {
        let bare = self
            .prefix
            .as_deref()
            .and_then(|prefix| {
                key.split_at_checked(prefix.len())
                    .filter(|(head, _)| head.eq_ignore_ascii_case(prefix))
                    .map(|(_, tail)| tail)
            })
            .unwrap_or(key);
        bare.to_lowercase().replace('_', "-")
    }
}

impl ConfigParser for DotEnvParser {
    fn parse(&self, reader: &mut dyn Read, set: &mut Setter<'_>) -> FlagResult<()> {
        for (number, line) in BufReader::new(reader).lines().enumerate() {
            let text = line.map_err(FlagError::config_parse)?;
            let entry = text.trim();
            if entry.is_empty() || entry.starts_with('#') {
                continue;
            }
            let assignment = entry.strip_prefix("export ").map_or(entry, str::trim_start);
            let parsed = assignment
                .split_once('=')
                .filter(|(key, _)| !key.trim().is_empty())
                .ok_or_else(|| String::from("expected NAME=value"))
                .and_then(|(key, raw)| Ok((key.trim(), unquote(raw.trim())?)));
            let (key, value) = parsed
                .map_err(|reason| FlagError::config_parse(format!("line {}: {reason}", number + 1)))?;
            set(&self.flag_name(key), &value)?;
        }
        Ok(())
    }
}

fn unquote(raw: &str) -> Result<String, String> {
    let (value, rest) = if let Some(body) = raw.strip_prefix('"') {
        double_quoted(body)?
    } else if let Some(body) = raw.strip_prefix('\'') {
        let (value, rest) = body
            .split_once('\'')
            .ok_or_else(|| String::from("unterminated single quote"))?;
        (value.to_owned(), rest)
    } else {
        return Ok(strip_comment(raw).to_owned());
    };
    let trailing = rest.trim();
    if trailing.is_empty() || trailing.starts_with('#') {
        Ok(value)
    } else {
        Err(format!("unexpected text after closing quote: {trailing}"))
    }
}

fn double_quoted(body: &str) -> Result<(String, &str), String> {
    let mut value = String::new();
    let mut chars = body.char_indices();
    while let Some((offset, c)) = chars.next() {
        match c {
            '"' => return Ok((value, body.get(offset + 1..).unwrap_or_default())),
            '\\' => match chars.next().map(|(_, escaped)| escaped) {
                Some('n') => value.push('\n'),
                Some('t') => value.push('\t'),
                Some('r') => value.push('\r'),
                Some('"') => value.push('"'),
                Some('\\') => value.push('\\'),
                Some(other) => return Err(format!("unsupported escape \\{other}")),
                None => break,
            },
            other => value.push(other),
        }
    }
    Err(String::from("unterminated double quote"))
}
