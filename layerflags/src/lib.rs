//! Layered flag resolution.
//!
//! Flags are declared once on a [`FlagSet`] and resolved from three sources
//! with a fixed precedence: command-line arguments, then an injected
//! [`Environment`] snapshot, then a config file, then the declared default.
//! A [`Command`] tree dispatches to subcommands using the same resolution,
//! with ancestor flags visible to the environment and config file phases.
//!
//! ```
//! use std::time::Duration;
//!
//! use layerflags::{Environment, FlagSet, FlagSpec, ParseOptions};
//!
//! # fn main() -> layerflags::FlagResult<()> {
//! let mut flags = FlagSet::new("app");
//! let verbose = flags.bool(FlagSpec::default().short('v').long("verbose"))?;
//! let delta = flags.duration(
//!     FlagSpec::default().short('d').long("delta"),
//!     Duration::from_secs(1),
//! )?;
//!
//! let options = ParseOptions::new()
//!     .env_prefix("PREFIX")
//!     .environment(Environment::from_pairs([("PREFIX_DELTA", "33ms")]));
//! flags.parse(Vec::<String>::new(), &options)?;
//!
//! assert_eq!(flags.get(&verbose).map(|v| *v.get()), Some(false));
//! assert_eq!(flags.get(&delta).map(|v| *v.get()), Some(Duration::from_millis(33)));
//! # Ok(())
//! # }
//! ```

mod args;
pub mod command;
pub mod config;
pub mod env;
mod error;
pub mod flag;
mod options;
mod resolve;
pub mod value;

pub use command::{Command, CommandState, Invocation};
pub use config::{ConfigParser, DotEnvParser, Node, PlainParser};
#[cfg(feature = "serde_json")]
pub use config::JsonParser;
#[cfg(feature = "toml")]
pub use config::TomlParser;
#[cfg(feature = "yaml")]
pub use config::YamlParser;
pub use env::Environment;
pub use error::{BoxError, FlagError, FlagResult, ValueError};
pub use flag::{Flag, FlagSet, FlagSpec, Handle};
pub use options::{AmbiguityPolicy, ConfigFile, ParseOptions};
