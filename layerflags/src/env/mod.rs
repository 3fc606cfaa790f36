//! Environment variables as a flag source.
//!
//! Variable names are derived from flag names, so two flags can end up
//! competing for one variable (`--log-level` and `--log.level` both map to
//! `LOG_LEVEL`). [`NameIndex`] detects this before any value is applied.

mod index;
mod names;
mod snapshot;

pub(crate) use index::NameIndex;
pub use names::candidate_names;
pub use snapshot::Environment;
