//! Fork-and-broadcast background execution.

use std::future::Future;
use std::sync::Arc;

use crate::cell::Cell;
use crate::error::Result;

/// A read-only handle to a computation forked by [`start`].
///
/// Cloning a `Started<T>` is cheap and every clone observes the same
/// memoised result: the computation itself runs exactly once, regardless of
/// how many readers call [`get`](Started::get), including readers that only
/// arrive after it has already completed.
pub struct Started<T> {
    cell: Cell<T>,
}

impl<T> Clone for Started<T> {
    fn clone(&self) -> Self {
        Self {
            cell: self.cell.clone(),
        }
    }
}

impl<T: Send + Sync + 'static> Started<T> {
    /// The computation's result, waiting for it to complete if necessary.
    pub async fn get(&self) -> Result<Arc<T>> {
        self.cell.get().await
    }
}

/// Forks `f` onto the executor and returns a broadcast handle for its result.
///
/// `f` starts running immediately, before `start` returns; it runs exactly
/// once no matter how many times the returned handle is cloned or awaited.
pub fn start<T, Fut>(f: Fut) -> Started<T>
where
    T: Send + Sync + 'static,
    Fut: Future<Output = T> + Send + 'static,
{
    let cell = Cell::create();
    cell.set_async(f);
    Started { cell }
}
