//! Helpers for safely mutating environment variables in tests.
//!
//! Each mutation acquires a global re-entrant mutex and returns an RAII guard
//! that restores the previous state when dropped. Stacked guards for one key
//! restore in LIFO order. Use [`lock`] when a test needs exclusive access
//! across several operations, for example while capturing
//! `Environment::from_process`.
//!
//! # Examples
//!
//! ```
//! use layerflags_test_helpers::env;
//!
//! let _g = env::set_var("KEY", "VALUE");
//! // `KEY` is set to `VALUE` for the duration of the guard.
//! ```

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// RAII guard restoring an environment variable to its prior value on drop.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

/// RAII guard that serialises environment access for its lifetime.
#[must_use = "dropping releases the environment lock"]
pub struct EnvVarLock {
    _guard: ReentrantMutexGuard<'static, ()>,
}

/// Holds the environment lock together with the guards it restores.
///
/// # Examples
///
/// ```
/// use layerflags_test_helpers::env;
///
/// let _scope = env::scope([env::set_var("A_KEY", "1"), env::remove_var("B_KEY")]);
/// assert_eq!(std::env::var("A_KEY").ok().as_deref(), Some("1"));
/// ```
#[must_use = "dropping releases the environment lock and restores guards"]
pub struct EnvScope {
    guards: Vec<EnvVarGuard>,
    _lock: EnvVarLock,
}

fn mutate<F>(key: String, mutator: F) -> EnvVarGuard
where
    F: FnOnce(&str),
{
    let _guard = ENV_MUTEX.lock();
    let original = env::var_os(&key);
    mutator(&key);
    EnvVarGuard { key, original }
}

/// Sets an environment variable and returns a guard restoring its prior value.
pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    // SAFETY: `mutate` holds `ENV_MUTEX` while the closure runs.
    mutate(key.into(), |k| unsafe { env::set_var(k, value.as_ref()) })
}

/// Removes an environment variable and returns a guard restoring its prior value.
pub fn remove_var<K>(key: K) -> EnvVarGuard
where
    K: Into<String>,
{
    // SAFETY: `mutate` holds `ENV_MUTEX` while the closure runs.
    mutate(key.into(), |k| unsafe { env::remove_var(k) })
}

/// Removes every variable whose name starts with `prefix`, holding the lock
/// until the returned scope is dropped.
///
/// # Examples
///
/// ```
/// use layerflags_test_helpers::env;
///
/// let _outer = env::set_var("DEMO_PREFIX_X", "1");
/// let scope = env::clear_prefix("DEMO_PREFIX_");
/// assert!(std::env::var("DEMO_PREFIX_X").is_err());
/// drop(scope);
/// assert!(std::env::var("DEMO_PREFIX_X").is_ok());
/// ```
pub fn clear_prefix(prefix: &str) -> EnvScope {
    let lock = lock();
    let keys: Vec<String> = env::vars_os()
        .filter_map(|(key, _)| key.into_string().ok())
        .filter(|key| key.starts_with(prefix))
        .collect();
    let guards = keys.into_iter().map(remove_var).collect();
    EnvScope {
        guards,
        _lock: lock,
    }
}

/// Acquires the global environment lock for the lifetime of the guard.
pub fn lock() -> EnvVarLock {
    EnvVarLock {
        _guard: ENV_MUTEX.lock(),
    }
}

/// Creates a scope that holds the global lock and retains `guards`.
pub fn scope<I>(guards: I) -> EnvScope
where
    I: IntoIterator<Item = EnvVarGuard>,
{
    let lock = lock();
    EnvScope {
        guards: guards.into_iter().collect(),
        _lock: lock,
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _guard = ENV_MUTEX.lock();
        if let Some(value) = self.original.take() {
            // SAFETY: We hold `ENV_MUTEX` during restoration.
            unsafe { env::set_var(&self.key, value) };
        } else {
            // SAFETY: We hold `ENV_MUTEX` during restoration.
            unsafe { env::remove_var(&self.key) };
        }
    }
}

impl Drop for EnvScope {
    fn drop(&mut self) {
        // Restore in LIFO order while the lock is still held.
        while let Some(guard) = self.guards.pop() {
            drop(guard);
        }
    }
}

impl fmt::Debug for EnvVarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarGuard")
            .field("key", &self.key)
            .field("had_original", &self.original.is_some())
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for EnvScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvScope")
            .field("guards", &self.guards)
            .finish_non_exhaustive()
    }
}
