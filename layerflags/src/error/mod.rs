//! Error types produced while declaring, parsing, and dispatching flags.

mod helpers;
mod types;

pub use types::{BoxError, FlagError, ValueError};

/// Result alias used throughout the crate.
pub type FlagResult<T> = Result<T, FlagError>;

#[cfg(test)]
mod tests;
