//! Test helpers shared across crates in the workspace.
//!
//! - [`env`]: guards that mutate the process environment and restore it.
//! - [`files`]: a temporary directory for config files with UTF-8 paths.
//! - [`recorder`]: collects the `(name, value)` pairs a config parser emits.

pub mod env;
pub mod files;
pub mod recorder;
