//! Primary error enum for flag declaration, resolution, and dispatch.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Boxed error returned by config decoders and command callbacks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while declaring or resolving flags.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FlagError {
    /// An argument named a flag the target set does not declare.
    #[error("unknown flag: {name}")]
    UnknownFlag {
        /// Flag name as written, without leading hyphens.
        name: String,
    },

    /// A value-taking flag was the last argument.
    #[error("missing value for flag {flag}")]
    MissingValue {
        /// Display name of the flag.
        flag: String,
    },

    /// A raw value could not be converted into the flag's type.
    #[error("invalid value {value:?} for flag {flag}: {reason}")]
    ParseValue {
        /// Display name of the flag.
        flag: String,
        /// Offending text.
        value: String,
        /// Explanation from the value holder.
        reason: ValueError,
    },

    /// A flag declaration was malformed.
    #[error("invalid flag declaration: {reason}")]
    InvalidFlag {
        /// Why the declaration was rejected.
        reason: String,
    },

    /// Two flags visible to the same parse share a name.
    #[error("duplicate flag name {name} in {set}")]
    DuplicateFlag {
        /// The colliding short or long name.
        name: String,
        /// Name of the set that attempted the registration.
        set: String,
    },

    /// The set was parsed before and has not been reset.
    #[error("flag set {set} has already been parsed")]
    AlreadyParsed {
        /// Name of the set.
        set: String,
    },

    /// `run` reached a command whose parse did not complete.
    #[error("command {command} has not been parsed")]
    NotParsed {
        /// Name of the command.
        command: String,
    },

    /// Several flags derive the same environment variable name.
    #[error("environment variable {variable} is ambiguous between flags {}", .flags.join(", "))]
    AmbiguousName {
        /// The derived variable name that collides.
        variable: String,
        /// Display names of every flag mapping to `variable`.
        flags: Vec<String>,
    },

    /// The configured config file does not exist.
    #[error("config file {path} does not exist")]
    ConfigFileMissing {
        /// Resolved path.
        path: Utf8PathBuf,
    },

    /// The config file exists but could not be read.
    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        /// Resolved path.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The config file could not be decoded, or named an undefined flag.
    #[error("config file {}: {source}", .path.as_ref().map_or("<input>", |p| p.as_str()))]
    ConfigParse {
        /// Path of the file, once known to the resolver.
        path: Option<Utf8PathBuf>,
        /// Underlying decoder or lookup failure.
        #[source]
        source: BoxError,
    },

    /// A structured document held a scalar that has no string form.
    #[error("cannot convert {value} to a flag value")]
    StringConversion {
        /// Description of the unsupported value.
        value: String,
    },

    /// `-h` or `--help` was given and not declared by the set.
    #[error("help requested")]
    HelpRequested,

    /// The selected command has nothing to execute.
    #[error("command {command} has no exec function")]
    NoExec {
        /// Name of the selected command.
        command: String,
    },

    /// A postparse hook rejected the parsed flags.
    #[error("{command}: {source}")]
    Postparse {
        /// Name of the command owning the hook.
        command: String,
        /// Error returned by the hook.
        #[source]
        source: BoxError,
    },

    /// An exec callback failed.
    #[error("{command}: {source}")]
    Exec {
        /// Name of the command owning the callback.
        command: String,
        /// Error returned by the callback.
        #[source]
        source: BoxError,
    },
}

/// Conversion failure reported by a flag value holder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValueError(String);

impl ValueError {
    /// Creates a conversion failure with the given explanation.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    /// Returns the explanation.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.0
    }
}
