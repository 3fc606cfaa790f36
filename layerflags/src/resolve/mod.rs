//! Precedence merger: arguments, then environment, then config file.
//!
//! Each phase only touches flags that were unset when the phase began, so
//! precedence is argument > environment > config file > default. A config
//! file can still deliver several values to one repeatable flag because the
//! snapshot is taken once per phase, not per value.

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;

use camino::Utf8PathBuf;

use crate::env::NameIndex;
use crate::flag::{Flag, FlagRef, single_char};
use crate::{ConfigFile, FlagError, FlagResult, FlagSet, ParseOptions, args};

/// Target set plus the ancestor sets visible to its env and config phases,
/// nearest ancestor first.
struct Chain<'c, 'a> {
    target: &'c mut FlagSet,
    ancestors: &'c mut [&'a mut FlagSet],
}

impl Chain<'_, '_> {
    fn sets(&self) -> Vec<&FlagSet> {
        std::iter::once(&*self.target)
            .chain(self.ancestors.iter().map(|set| &**set))
            .collect()
    }

    /// Flags across the chain that no source has set yet.
    fn unset(&self) -> HashSet<FlagRef> {
        self.sets()
            .into_iter()
            .flat_map(|set| {
                set.flags()
                    .iter()
                    .enumerate()
                    .filter(|(_, flag)| !flag.is_set())
                    .map(|(index, _)| FlagRef {
                        set_id: set.id(),
                        index,
                    })
            })
            .collect()
    }

    /// Exact long name first, then a one-character short name.
    fn find(&self, name: &str) -> Option<FlagRef> {
        let sets = self.sets();
        let by_long = sets.iter().find_map(|set| {
            set.position_long(name).map(|index| FlagRef {
                set_id: set.id(),
                index,
            })
        });
        by_long.or_else(|| {
            let short = single_char(name)?;
            sets.iter().find_map(|set| {
                set.position_short(short).map(|index| FlagRef {
                    set_id: set.id(),
                    index,
                })
            })
        })
    }

    fn flag(&self, flag_ref: FlagRef) -> Option<&Flag> {
        self.sets()
            .into_iter()
            .find(|set| set.id() == flag_ref.set_id)
            .and_then(|set| set.flags().get(flag_ref.index))
    }

    fn flag_mut(&mut self, flag_ref: FlagRef) -> Option<&mut Flag> {
        if self.target.id() == flag_ref.set_id {
            return self.target.flag_at_mut(flag_ref.index);
        }
        self.ancestors
            .iter_mut()
            .find(|set| set.id() == flag_ref.set_id)
            .and_then(|set| set.flag_at_mut(flag_ref.index))
    }
}

/// Resolves `target` from `args`, then the environment snapshot, then the
/// config file, with `ancestors` visible to the last two phases.
///
/// # Errors
///
/// Returns the first failure of any phase unchanged.
pub(crate) fn parse(
    target: &mut FlagSet,
    ancestors: &mut [&mut FlagSet],
    args: Vec<String>,
    options: &ParseOptions,
) -> FlagResult<()> {
    target.begin_parse()?;
    let positional = args::apply(target, args)?;
    tracing::debug!(set = target.name(), positional = positional.len(), "applied arguments");
    target.set_args(positional);

    let mut chain = Chain { target, ancestors };
    if options.env_enabled {
        apply_env(&mut chain, options)?;
    }
    if let Some(location) = &options.config_file {
        apply_config(&mut chain, location, options)?;
    }
    Ok(())
}

fn apply_env(chain: &mut Chain<'_, '_>, options: &ParseOptions) -> FlagResult<()> {
    let index = NameIndex::build(&chain.sets(), options)?;
    let mut pending = chain.unset();
    tracing::debug!(
        set = chain.target.name(),
        variables = options.environment.len(),
        pending = pending.len(),
        "resolving environment"
    );
    for (variable, value) in options.environment.iter() {
        let Some(flag_ref) = index.resolve(variable) else {
            continue;
        };
        if !pending.remove(&flag_ref) {
            continue;
        }
        let Some(flag) = chain.flag_mut(flag_ref) else {
            continue;
        };
        match options.env_split.as_deref() {
            Some(separator) => {
                for piece in value.split(separator) {
                    flag.apply(piece)?;
                }
            }
            None => flag.apply(value)?,
        }
        tracing::trace!(flag = %flag.display_name(), variable, source = "env", "applied flag");
    }
    Ok(())
}

fn config_path(chain: &Chain<'_, '_>, location: &ConfigFile) -> FlagResult<Option<Utf8PathBuf>> {
    match location {
        ConfigFile::Path(path) => Ok(Some(path.clone())),
        ConfigFile::Flag(name) => {
            let flag = chain
                .find(name)
                .and_then(|flag_ref| chain.flag(flag_ref))
                .ok_or_else(|| FlagError::UnknownFlag { name: name.clone() })?;
            let value = flag.value_text();
            Ok((!value.is_empty()).then(|| Utf8PathBuf::from(value)))
        }
    }
}

fn apply_config(
    chain: &mut Chain<'_, '_>,
    location: &ConfigFile,
    options: &ParseOptions,
) -> FlagResult<()> {
    let Some(parser) = options.config_parser.as_deref() else {
        tracing::debug!("config file configured without a parser; skipping");
        return Ok(());
    };
    let Some(path) = config_path(chain, location)? else {
        tracing::debug!("config file flag is empty; skipping");
        return Ok(());
    };
    let contents = match fs::read(&path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            if options.allow_missing_config {
                tracing::debug!(%path, "config file not found; skipping");
                return Ok(());
            }
            return Err(FlagError::ConfigFileMissing { path });
        }
        Err(source) => return Err(FlagError::ConfigRead { path, source }),
    };
    tracing::debug!(%path, bytes = contents.len(), "read config file");

    let pending = chain.unset();
    let ignore_undefined = options.ignore_undefined;
    let mut setter = |name: &str, value: &str| -> FlagResult<()> {
        let Some(flag_ref) = chain.find(name) else {
            if ignore_undefined {
                tracing::trace!(name, "ignoring undefined config name");
                return Ok(());
            }
            return Err(FlagError::undefined_config_name(name));
        };
        if !pending.contains(&flag_ref) {
            return Ok(());
        }
        if let Some(flag) = chain.flag_mut(flag_ref) {
            flag.apply(value)?;
            tracing::trace!(flag = %flag.display_name(), source = "config", "applied flag");
        }
        Ok(())
    };
    parser
        .parse(&mut contents.as_slice(), &mut setter)
        .map_err(|err| err.with_config_path(&path))
}
