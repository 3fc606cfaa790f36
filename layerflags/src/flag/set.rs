//! Ordered, owning collection of flags.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use super::{Flag, FlagSpec, Handle, single_char};
use crate::value::{AsAny, Choice, FlagValue, List, Scalar, UniqueList};
use crate::{FlagError, FlagResult, ParseOptions};

static NEXT_SET_ID: AtomicU64 = AtomicU64::new(1);

/// Ordered collection of [`Flag`]s plus the positional arguments left over
/// by the last parse.
///
/// # Examples
///
/// ```
/// use layerflags::{FlagSet, FlagSpec, ParseOptions};
///
/// # fn main() -> layerflags::FlagResult<()> {
/// let mut flags = FlagSet::new("app");
/// let verbose = flags.bool(FlagSpec::default().short('v').long("verbose"))?;
/// flags.parse(["-v", "input.txt"], &ParseOptions::new())?;
/// assert_eq!(flags.get(&verbose).map(|v| *v.get()), Some(true));
/// assert_eq!(flags.args(), ["input.txt"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct FlagSet {
    id: u64,
    name: String,
    flags: Vec<Flag>,
    args: Vec<String>,
    parsed: bool,
}

impl FlagSet {
    /// Creates an empty set. `name` appears in diagnostics and as the group
    /// of every flag declared here.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: NEXT_SET_ID.fetch_add(1, Ordering::Relaxed),
            name: name.into(),
            flags: Vec::new(),
            args: Vec::new(),
            parsed: false,
        }
    }

    /// Returns the set's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registers a flag backed by `value`.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::InvalidFlag`] for malformed names and
    /// [`FlagError::DuplicateFlag`] when a name is already taken in this set.
    pub fn add<V: FlagValue>(&mut self, spec: FlagSpec, value: V) -> FlagResult<Handle<V>> {
        spec.validate()?;
        let taken = spec
            .short
            .map(String::from)
            .into_iter()
            .chain(spec.long.iter().cloned())
            .find(|name| self.flags.iter().any(|flag| flag.is_named(name)));
        if let Some(name) = taken {
            return Err(FlagError::DuplicateFlag {
                name,
                set: self.name.clone(),
            });
        }
        let index = self.flags.len();
        self.flags.push(Flag::new(spec, Box::new(value), &self.name));
        Ok(Handle::new(self.id, index))
    }

    /// Registers a boolean flag defaulting to `false`.
    ///
    /// # Errors
    ///
    /// See [`FlagSet::add`].
    pub fn bool(&mut self, spec: FlagSpec) -> FlagResult<Handle<Scalar<bool>>> {
        self.add(spec, Scalar::new(false))
    }

    /// Registers a string flag.
    ///
    /// # Errors
    ///
    /// See [`FlagSet::add`].
    pub fn string(
        &mut self,
        spec: FlagSpec,
        default: impl Into<String>,
    ) -> FlagResult<Handle<Scalar<String>>> {
        self.add(spec, Scalar::new(default.into()))
    }

    /// Registers a signed integer flag.
    ///
    /// # Errors
    ///
    /// See [`FlagSet::add`].
    pub fn int(&mut self, spec: FlagSpec, default: i64) -> FlagResult<Handle<Scalar<i64>>> {
        self.add(spec, Scalar::new(default))
    }

    /// Registers an unsigned integer flag.
    ///
    /// # Errors
    ///
    /// See [`FlagSet::add`].
    pub fn uint(&mut self, spec: FlagSpec, default: u64) -> FlagResult<Handle<Scalar<u64>>> {
        self.add(spec, Scalar::new(default))
    }

    /// Registers a floating point flag.
    ///
    /// # Errors
    ///
    /// See [`FlagSet::add`].
    pub fn float(&mut self, spec: FlagSpec, default: f64) -> FlagResult<Handle<Scalar<f64>>> {
        self.add(spec, Scalar::new(default))
    }

    /// Registers a duration flag such as `--timeout 1m30s`.
    ///
    /// # Errors
    ///
    /// See [`FlagSet::add`].
    pub fn duration(
        &mut self,
        spec: FlagSpec,
        default: Duration,
    ) -> FlagResult<Handle<Scalar<Duration>>> {
        self.add(spec, Scalar::new(default))
    }

    /// Registers a repeatable string flag collecting every value.
    ///
    /// # Errors
    ///
    /// See [`FlagSet::add`].
    pub fn string_list(&mut self, spec: FlagSpec) -> FlagResult<Handle<List<String>>> {
        self.add(spec, List::default())
    }

    /// Registers a repeatable string flag collecting distinct values.
    ///
    /// # Errors
    ///
    /// See [`FlagSet::add`].
    pub fn string_set(&mut self, spec: FlagSpec) -> FlagResult<Handle<UniqueList<String>>> {
        self.add(spec, UniqueList::default())
    }

    /// Registers a flag restricted to `alternatives`; the first one is the
    /// default.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::InvalidFlag`] when `alternatives` is empty, and
    /// otherwise see [`FlagSet::add`].
    pub fn choice<I, S>(&mut self, spec: FlagSpec, alternatives: I) -> FlagResult<Handle<Choice>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let choice = Choice::new(alternatives).ok_or_else(|| FlagError::InvalidFlag {
            reason: String::from("a choice flag needs at least one alternative"),
        })?;
        self.add(spec, choice)
    }

    /// Reads the value holder behind `handle`.
    ///
    /// Returns `None` when `handle` was issued by a different set.
    #[must_use]
    pub fn get<V: FlagValue>(&self, handle: &Handle<V>) -> Option<&V> {
        if handle.set_id != self.id {
            return None;
        }
        let flag = self.flags.get(handle.index)?;
        AsAny::as_any(flag.value()).downcast_ref::<V>()
    }

    /// Looks a flag up by long name, or by short name when `name` is one
    /// character.
    #[must_use]
    pub fn flag(&self, name: &str) -> Option<&Flag> {
        self.position(name).and_then(|index| self.flags.get(index))
    }

    /// Flags in declaration order.
    #[must_use]
    pub fn flags(&self) -> &[Flag] {
        &self.flags
    }

    /// Positional arguments left over by the last parse.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Whether the set has been parsed since creation or the last reset.
    #[must_use]
    pub const fn is_parsed(&self) -> bool {
        self.parsed
    }

    /// Restores every flag to its default, clears the leftover arguments,
    /// and allows the set to be parsed again.
    pub fn reset(&mut self) {
        for flag in &mut self.flags {
            flag.reset();
        }
        self.args.clear();
        self.parsed = false;
    }

    /// Resolves this set from `args`, then the environment snapshot and the
    /// config file configured in `options`.
    ///
    /// # Errors
    ///
    /// Returns the first failure from any source; see [`FlagError`].
    pub fn parse<I, S>(&mut self, args: I, options: &ParseOptions) -> FlagResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let collected = args.into_iter().map(Into::into).collect();
        crate::resolve::parse(self, &mut [], collected, options)
    }

    pub(crate) const fn id(&self) -> u64 {
        self.id
    }

    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.position_long(name).or_else(|| {
            single_char(name).and_then(|short| self.position_short(short))
        })
    }

    pub(crate) fn position_long(&self, name: &str) -> Option<usize> {
        self.flags.iter().position(|flag| flag.long() == Some(name))
    }

    pub(crate) fn position_short(&self, short: char) -> Option<usize> {
        self.flags.iter().position(|flag| flag.short() == Some(short))
    }

    pub(crate) fn flag_at_mut(&mut self, index: usize) -> Option<&mut Flag> {
        self.flags.get_mut(index)
    }

    pub(crate) fn begin_parse(&mut self) -> FlagResult<()> {
        if self.parsed {
            return Err(FlagError::AlreadyParsed {
                set: self.name.clone(),
            });
        }
        self.parsed = true;
        Ok(())
    }

    pub(crate) fn set_args(&mut self, args: Vec<String>) {
        self.args = args;
    }

    /// Fails when a flag of this set shares a name with a flag of `other`.
    pub(crate) fn ensure_disjoint(&self, other: &Self) -> FlagResult<()> {
        let clash = self
            .flags
            .iter()
            .flat_map(Flag::names)
            .find(|name| other.flags.iter().any(|flag| flag.is_named(name)));
        match clash {
            Some(name) => Err(FlagError::DuplicateFlag {
                name,
                set: self.name.clone(),
            }),
            None => Ok(()),
        }
    }
}
