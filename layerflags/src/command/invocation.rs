//! Read-only view handed to postparse hooks and exec callbacks.

use crate::flag::{Flag, Handle};
use crate::value::FlagValue;
use crate::FlagSet;

/// The command being run, its leftover arguments, and every flag set on the
/// path from it to the root.
///
/// Flags declared by ancestors stay readable through [`Invocation::get`], so
/// a subcommand can consult a root `--verbose` without re-declaring it.
#[derive(Debug)]
pub struct Invocation<'a> {
    command: &'a str,
    args: &'a [String],
    chain: Vec<&'a FlagSet>,
}

impl<'a> Invocation<'a> {
    pub(super) const fn new(command: &'a str, args: &'a [String], chain: Vec<&'a FlagSet>) -> Self {
        Self {
            command,
            args,
            chain,
        }
    }

    /// Name of the command receiving the callback.
    #[must_use]
    pub const fn command(&self) -> &'a str {
        self.command
    }

    /// Positional arguments left over after this command's flags (and any
    /// matched subcommand name) were consumed.
    #[must_use]
    pub const fn args(&self) -> &'a [String] {
        self.args
    }

    /// Reads the value behind `handle` from whichever set in the chain
    /// issued it.
    #[must_use]
    pub fn get<V: FlagValue>(&self, handle: &Handle<V>) -> Option<&'a V> {
        self.chain.iter().copied().find_map(|set| set.get(handle))
    }

    /// Looks a flag up by name, nearest command first.
    #[must_use]
    pub fn flag(&self, name: &str) -> Option<&'a Flag> {
        self.chain.iter().copied().find_map(|set| set.flag(name))
    }

    /// Flag sets from this command up to the root.
    #[must_use]
    pub fn flag_sets(&self) -> &[&'a FlagSet] {
        &self.chain
    }
}
