//! Command-line tokenizer applying arguments to a single flag set.
//!
//! Grammar: `--name`, `--name=value`, `--name value`, `-n`, `-n=value`,
//! `-n value`. `--` ends flag scanning, as does the first positional
//! argument, so a parent command leaves its subcommand's flags untouched.

use crate::flag::single_char;
use crate::{FlagError, FlagResult, FlagSet};

#[derive(Debug, PartialEq, Eq)]
enum Token {
    Terminator,
    Positional,
    Flag {
        name: String,
        inline: Option<String>,
        long: bool,
    },
}

fn classify(token: &str) -> Token {
    if token == "--" {
        return Token::Terminator;
    }
    let (body, long) = if let Some(body) = token.strip_prefix("--") {
        (body, true)
    } else if let Some(body) = token.strip_prefix('-').filter(|body| !body.is_empty()) {
        (body, false)
    } else {
        return Token::Positional;
    };
    let (name, inline) = match body.split_once('=') {
        Some((name, value)) => (name, Some(value.to_owned())),
        None => (body, None),
    };
    Token::Flag {
        name: name.to_owned(),
        inline,
        long,
    }
}

fn lookup(set: &FlagSet, name: &str, long: bool) -> FlagResult<usize> {
    let found = if long {
        set.position_long(name)
    } else {
        single_char(name).and_then(|short| set.position_short(short))
    };
    found.ok_or_else(|| match (long, name) {
        (true, "help") | (false, "h") => FlagError::HelpRequested,
        _ => FlagError::UnknownFlag {
            name: name.to_owned(),
        },
    })
}

/// Applies `args` to `set` and returns the positional arguments.
///
/// Only `set`'s own flags are recognised.
///
/// # Errors
///
/// Returns [`FlagError::UnknownFlag`], [`FlagError::MissingValue`],
/// [`FlagError::ParseValue`], or the [`FlagError::HelpRequested`] sentinel.
pub(crate) fn apply(set: &mut FlagSet, args: Vec<String>) -> FlagResult<Vec<String>> {
    let mut tokens = args.into_iter();
    let mut positional = Vec::new();
    while let Some(token) = tokens.next() {
        let (name, inline, long) = match classify(&token) {
            Token::Terminator => {
                positional.extend(tokens);
                break;
            }
            Token::Positional => {
                positional.push(token);
                positional.extend(tokens);
                break;
            }
            Token::Flag { name, inline, long } => (name, inline, long),
        };

        let index = lookup(set, &name, long)?;
        let Some(flag) = set.flag_at_mut(index) else {
            return Err(FlagError::UnknownFlag { name });
        };
        let value = match inline {
            Some(value) => value,
            None if flag.is_bool() => String::from("true"),
            None => tokens.next().ok_or_else(|| FlagError::MissingValue {
                flag: flag.display_name(),
            })?,
        };
        flag.apply(&value)?;
        tracing::trace!(flag = %flag.display_name(), %value, source = "args", "applied flag");
    }
    Ok(positional)
}
