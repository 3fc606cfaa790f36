//! Reverse index from derived variable names to flags.

use std::collections::HashMap;

use uncased::Uncased;

use super::candidate_names;
use crate::flag::FlagRef;
use crate::{AmbiguityPolicy, FlagError, FlagResult, FlagSet, ParseOptions};

/// Lookup key honouring the configured case sensitivity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum EnvKey {
    Exact(String),
    Folded(Uncased<'static>),
}

impl EnvKey {
    fn new(name: &str, case_sensitive: bool) -> Self {
        if case_sensitive {
            Self::Exact(name.to_owned())
        } else {
            Self::Folded(Uncased::from(name.to_owned()))
        }
    }
}

#[derive(Debug)]
struct Bucket {
    variable: String,
    flags: Vec<(FlagRef, String)>,
}

/// Maps every candidate variable name to the single flag it targets.
#[derive(Debug)]
pub(crate) struct NameIndex {
    lookup: HashMap<EnvKey, FlagRef>,
    case_sensitive: bool,
}

impl NameIndex {
    /// Indexes every flag of `sets` (nearest set first).
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::AmbiguousName`] for the first variable claimed by
    /// more than one flag, unless the policy is [`AmbiguityPolicy::Skip`].
    pub(crate) fn build(sets: &[&FlagSet], options: &ParseOptions) -> FlagResult<Self> {
        let case_sensitive = options.env_case_sensitive;
        let mut positions: HashMap<EnvKey, usize> = HashMap::new();
        let mut buckets: Vec<Bucket> = Vec::new();

        for set in sets {
            for (index, flag) in set.flags().iter().enumerate() {
                let flag_ref = FlagRef {
                    set_id: set.id(),
                    index,
                };
                for variable in candidate_names(flag, options) {
                    let key = EnvKey::new(&variable, case_sensitive);
                    let slot = *positions.entry(key).or_insert_with(|| {
                        buckets.push(Bucket {
                            variable,
                            flags: Vec::new(),
                        });
                        buckets.len() - 1
                    });
                    let Some(bucket) = buckets.get_mut(slot) else {
                        continue;
                    };
                    if !bucket.flags.iter().any(|(seen, _)| *seen == flag_ref) {
                        bucket.flags.push((flag_ref, flag.display_name()));
                    }
                }
            }
        }

        let mut lookup = HashMap::with_capacity(buckets.len());
        for bucket in buckets {
            match bucket.flags.as_slice() {
                [(flag_ref, _)] => {
                    lookup.insert(EnvKey::new(&bucket.variable, case_sensitive), *flag_ref);
                }
                _ if options.ambiguity == AmbiguityPolicy::Skip => {
                    tracing::warn!(
                        variable = %bucket.variable,
                        flags = ?bucket.flags.iter().map(|(_, name)| name).collect::<Vec<_>>(),
                        "skipping ambiguous environment variable"
                    );
                }
                _ => {
                    return Err(FlagError::AmbiguousName {
                        variable: bucket.variable,
                        flags: bucket.flags.into_iter().map(|(_, name)| name).collect(),
                    });
                }
            }
        }
        Ok(Self {
            lookup,
            case_sensitive,
        })
    }

    /// Returns the flag targeted by `variable`, if any.
    pub(crate) fn resolve(&self, variable: &str) -> Option<FlagRef> {
        self.lookup
            .get(&EnvKey::new(variable, self.case_sensitive))
            .copied()
    }
}
