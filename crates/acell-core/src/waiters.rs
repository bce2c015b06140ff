//! Waiter identity and the insertion-ordered map of pending reads.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;
use tokio::sync::oneshot;

/// Opaque identity for a pending `Read`, allocated once per read call.
///
/// Equality is by identity: two `WaiterId`s allocated from separate calls to
/// [`WaiterId::new`] are never equal, regardless of what either read observes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WaiterId(u64);

impl WaiterId {
    pub(crate) fn new() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// An insertion-ordered `WaiterId -> reply channel` map.
///
/// Backed by [`IndexMap`] so that the callbacks registered while the Cell was
/// empty are woken in the order they were registered, and a `Nevermind` can
/// remove a single waiter in O(1) without disturbing the relative order of
/// the rest.
pub(crate) struct WaiterMap<T> {
    inner: IndexMap<WaiterId, oneshot::Sender<(Arc<T>, u64)>>,
}

impl<T> WaiterMap<T> {
    pub(crate) fn new() -> Self {
        Self {
            inner: IndexMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, id: WaiterId, reply: oneshot::Sender<(Arc<T>, u64)>) {
        self.inner.insert(id, reply);
    }

    /// Removes `id` if present, reporting whether it was found.
    pub(crate) fn remove(&mut self, id: WaiterId) -> bool {
        self.inner.shift_remove(&id).is_some()
    }

    /// Drains every waiter in the order it was inserted, for broadcasting the
    /// first value on the Cell's empty-to-non-empty transition.
    pub(crate) fn drain_in_order(
        &mut self,
    ) -> impl Iterator<Item = (WaiterId, oneshot::Sender<(Arc<T>, u64)>)> + '_ {
        self.inner.drain(..)
    }

    pub(crate) fn len(&self) -> usize {
        self.inner.len()
    }
}
