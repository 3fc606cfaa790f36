//! Tree-shaped command dispatch on top of flag resolution.
//!
//! Each [`Command`] owns a [`FlagSet`] and its subcommands. Parsing walks
//! the tree: a node resolves its own flags (with ancestor flags visible to
//! the environment and config file phases), runs its postparse hook, and
//! hands the remaining arguments to the child named by the first positional
//! argument. Running invokes the exec callback of the last node reached.

mod invocation;

use std::fmt;

use uncased::UncasedStr;

use crate::{BoxError, FlagError, FlagResult, FlagSet, ParseOptions, resolve};

pub use invocation::Invocation;

/// Postparse hook or exec callback.
pub type Callback = Box<dyn FnMut(&Invocation<'_>) -> Result<(), BoxError>>;

/// Where a command is in its parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CommandState {
    /// Not parsed since creation or the last reset.
    #[default]
    Unparsed,
    /// Own flags resolved.
    FlagsParsed,
    /// Postparse hook (if any) completed.
    Postparsed,
    /// Arguments were handed to the subcommand at this index.
    Delegated(usize),
    /// This command is the one `run` executes.
    Terminal,
}

/// A node in a command tree.
///
/// # Examples
///
/// ```
/// use layerflags::{Command, FlagSpec, ParseOptions};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut root = Command::new("app");
/// let verbose = root.flags_mut().bool(FlagSpec::default().short('v'))?;
///
/// let mut greet = Command::new("greet");
/// let loud = greet.flags_mut().bool(FlagSpec::default().long("loud"))?;
/// let greet = greet.exec(move |inv| {
///     assert_eq!(inv.get(&verbose).map(|v| *v.get()), Some(true));
///     assert_eq!(inv.get(&loud).map(|v| *v.get()), Some(true));
///     assert_eq!(inv.args(), ["world"]);
///     Ok(())
/// });
///
/// let mut root = root.subcommand(greet);
/// root.parse_and_run(["-v", "GREET", "--loud", "world"], &ParseOptions::new())?;
/// assert_eq!(root.selected().name(), "greet");
/// # Ok(())
/// # }
/// ```
pub struct Command {
    name: String,
    usage: String,
    short_help: String,
    long_help: String,
    flags: FlagSet,
    subcommands: Vec<Self>,
    postparse: Option<Callback>,
    exec: Option<Callback>,
    state: CommandState,
}

impl Command {
    /// Creates a command whose flag set shares its name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let command_name = name.into();
        Self {
            flags: FlagSet::new(command_name.clone()),
            name: command_name,
            usage: String::new(),
            short_help: String::new(),
            long_help: String::new(),
            subcommands: Vec::new(),
            postparse: None,
            exec: None,
            state: CommandState::Unparsed,
        }
    }

    /// Sets the one-line usage pattern, such as `repeat [-n times] <arg>`.
    #[must_use]
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    /// Sets the summary shown in a parent's subcommand list.
    #[must_use]
    pub fn short_help(mut self, help: impl Into<String>) -> Self {
        self.short_help = help.into();
        self
    }

    /// Sets the detailed description.
    #[must_use]
    pub fn long_help(mut self, help: impl Into<String>) -> Self {
        self.long_help = help.into();
        self
    }

    /// Appends a subcommand. Matching follows declaration order.
    #[must_use]
    pub fn subcommand(mut self, child: Self) -> Self {
        self.subcommands.push(child);
        self
    }

    /// Sets a hook run after this command's flags are resolved and before
    /// dispatch continues.
    #[must_use]
    pub fn postparse<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&Invocation<'_>) -> Result<(), BoxError> + 'static,
    {
        self.postparse = Some(Box::new(hook));
        self
    }

    /// Sets the callback run when this command is the one selected.
    #[must_use]
    pub fn exec<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&Invocation<'_>) -> Result<(), BoxError> + 'static,
    {
        self.exec = Some(Box::new(callback));
        self
    }

    /// Command name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Usage pattern.
    #[must_use]
    pub fn usage_text(&self) -> &str {
        &self.usage
    }

    /// Summary line.
    #[must_use]
    pub fn short_help_text(&self) -> &str {
        &self.short_help
    }

    /// Detailed description.
    #[must_use]
    pub fn long_help_text(&self) -> &str {
        &self.long_help
    }

    /// Flags declared by this command.
    #[must_use]
    pub const fn flags(&self) -> &FlagSet {
        &self.flags
    }

    /// Mutable access for declaring flags.
    pub const fn flags_mut(&mut self) -> &mut FlagSet {
        &mut self.flags
    }

    /// Direct subcommands in declaration order.
    #[must_use]
    pub fn subcommands(&self) -> &[Self] {
        &self.subcommands
    }

    /// Current parse state.
    #[must_use]
    pub const fn state(&self) -> CommandState {
        self.state
    }

    /// Follows delegations from this command to the one `run` would
    /// execute. Returns `self` before parsing.
    #[must_use]
    pub fn selected(&self) -> &Self {
        match self.state {
            CommandState::Delegated(index) => self
                .subcommands
                .get(index)
                .map_or(self, Self::selected),
            _ => self,
        }
    }

    /// Commands from this one down to the selected command.
    #[must_use]
    pub fn selected_path(&self) -> Vec<&Self> {
        let mut path = vec![self];
        let mut current = self;
        while let CommandState::Delegated(index) = current.state {
            let Some(child) = current.subcommands.get(index) else {
                break;
            };
            path.push(child);
            current = child;
        }
        path
    }

    /// Resolves flags from the root down to the command named by the
    /// arguments.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::DuplicateFlag`] when a command shares a flag name
    /// with an ancestor, [`FlagError::Postparse`] when a hook fails, and any
    /// error of the underlying flag resolution.
    pub fn parse<I, S>(&mut self, args: I, options: &ParseOptions) -> FlagResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ancestors = Vec::new();
        parse_node(
            self,
            &mut ancestors,
            args.into_iter().map(Into::into).collect(),
            options,
        )
    }

    /// Runs the exec callback of the selected command.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::NotParsed`] before [`Command::parse`] or when
    /// the parse stopped before reaching a terminal command,
    /// [`FlagError::NoExec`] when the selected command has no callback, and
    /// [`FlagError::Exec`] wrapping a callback failure.
    pub fn run(&mut self) -> FlagResult<()> {
        if self.state == CommandState::Unparsed {
            return Err(FlagError::NotParsed {
                command: self.name.clone(),
            });
        }
        let mut chain = Vec::new();
        run_node(self, &mut chain)
    }

    /// Parses and then runs.
    ///
    /// # Errors
    ///
    /// See [`Command::parse`] and [`Command::run`].
    pub fn parse_and_run<I, S>(&mut self, args: I, options: &ParseOptions) -> FlagResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parse(args, options)?;
        self.run()
    }

    /// Restores every flag in the tree to its default and forgets the parse.
    pub fn reset(&mut self) {
        self.flags.reset();
        self.state = CommandState::Unparsed;
        for child in &mut self.subcommands {
            child.reset();
        }
    }
}

fn parse_node<'a>(
    node: &'a mut Command,
    ancestors: &mut Vec<&'a mut FlagSet>,
    args: Vec<String>,
    options: &ParseOptions,
) -> FlagResult<()> {
    let Command {
        name,
        flags,
        subcommands,
        postparse,
        state,
        ..
    } = node;

    for ancestor in ancestors.iter() {
        flags.ensure_disjoint(ancestor)?;
    }
    resolve::parse(flags, ancestors.as_mut_slice(), args, options)?;
    *state = CommandState::FlagsParsed;
    tracing::debug!(command = %name, args = ?flags.args(), "parsed command flags");

    if let Some(hook) = postparse.as_mut() {
        let chain = std::iter::once(&*flags)
            .chain(ancestors.iter().map(|set| &**set))
            .collect();
        hook(&Invocation::new(name, flags.args(), chain)).map_err(|source| {
            FlagError::Postparse {
                command: name.clone(),
                source,
            }
        })?;
    }
    *state = CommandState::Postparsed;

    let Some((first, rest)) = flags.args().split_first() else {
        *state = CommandState::Terminal;
        return Ok(());
    };
    if subcommands.iter().any(|child| child.name.is_empty()) {
        return Err(FlagError::InvalidFlag {
            reason: format!("command {name} has a subcommand without a name"),
        });
    }
    let Some(index) = subcommands
        .iter()
        .position(|child| UncasedStr::new(&child.name) == UncasedStr::new(first))
    else {
        *state = CommandState::Terminal;
        return Ok(());
    };
    let remaining = rest.to_vec();
    *state = CommandState::Delegated(index);
    tracing::debug!(command = %name, subcommand = %first, "delegating to subcommand");

    let Some(child) = subcommands.get_mut(index) else {
        return Ok(());
    };
    ancestors.insert(0, flags);
    parse_node(child, ancestors, remaining, options)
}

fn run_node<'a>(node: &'a mut Command, chain: &mut Vec<&'a FlagSet>) -> FlagResult<()> {
    let Command {
        name,
        flags,
        subcommands,
        exec,
        state,
        ..
    } = node;
    chain.insert(0, &*flags);

    if let CommandState::Delegated(index) = *state
        && let Some(child) = subcommands.get_mut(index)
    {
        return run_node(child, chain);
    }
    if *state != CommandState::Terminal {
        return Err(FlagError::NotParsed {
            command: name.clone(),
        });
    }
    let Some(callback) = exec.as_mut() else {
        return Err(FlagError::NoExec {
            command: name.clone(),
        });
    };
    tracing::debug!(command = %name, "running command");
    callback(&Invocation::new(name, flags.args(), chain.clone())).map_err(|source| {
        FlagError::Exec {
            command: name.clone(),
            source,
        }
    })
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("usage", &self.usage)
            .field("flags", &self.flags)
            .field("subcommands", &self.subcommands)
            .field("postparse", &self.postparse.is_some())
            .field("exec", &self.exec.is_some())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
