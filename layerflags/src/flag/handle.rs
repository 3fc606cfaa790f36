//! Typed references to registered flags.

use std::fmt;
use std::marker::PhantomData;

/// Typed reference to a flag, returned when the flag is registered.
///
/// A handle remembers which [`crate::FlagSet`] issued it, so reading it from
/// any other set yields `None`.
pub struct Handle<V> {
    pub(crate) set_id: u64,
    pub(crate) index: usize,
    marker: PhantomData<fn() -> V>,
}

impl<V> Handle<V> {
    pub(super) const fn new(set_id: u64, index: usize) -> Self {
        Self {
            set_id,
            index,
            marker: PhantomData,
        }
    }
}

impl<V> Clone for Handle<V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for Handle<V> {}

impl<V> fmt::Debug for Handle<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("set_id", &self.set_id)
            .field("index", &self.index)
            .finish()
    }
}
