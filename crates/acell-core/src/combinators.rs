//! Thin compositions over [`start`]: `parallel_traverse`, `parallel_sequence`,
//! `ref_of`, and the deprecated `join`.
//!
//! Grounded on `venus-core`'s `ParallelExecutor::execute_parallel`
//! (`crates/venus-core/src/execute/parallel.rs`), which fans work out and
//! collects it back in the original order; the difference here is that each
//! unit of work is an arbitrary future rather than a compiled cell.

use std::future::Future;
use std::sync::Arc;

use crate::cell::Cell;
use crate::error::Result;
use crate::start::start;

/// Applies `f` to each element of `items`, forks all of the resulting
/// computations concurrently, and collects their results in the original
/// order.
pub async fn parallel_traverse<I, T, Fut, F>(items: I, f: F) -> Result<Vec<Arc<T>>>
where
    I: IntoIterator,
    F: Fn(I::Item) -> Fut,
    Fut: Future<Output = T> + Send + 'static,
    T: Send + Sync + 'static,
{
    let handles: Vec<_> = items.into_iter().map(|item| start(f(item))).collect();
    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.get().await?);
    }
    Ok(results)
}

/// `parallel_traverse` with the identity function: forks every action in
/// `actions` concurrently and collects their results in order.
pub async fn parallel_sequence<I, Fut, T>(actions: I) -> Result<Vec<Arc<T>>>
where
    I: IntoIterator<Item = Fut>,
    Fut: Future<Output = T> + Send + 'static,
    T: Send + Sync + 'static,
{
    parallel_traverse(actions, |action| action).await
}

/// Wraps an already-available value in a pre-set Cell.
pub fn ref_of<T: Send + Sync + 'static>(value: T) -> Cell<T> {
    Cell::create_of(value)
}

/// Forks `f` and waits for its single result.
///
/// Equivalent to `start(f).get()`. Kept only for call sites migrating off an
/// older fire-and-await-immediately idiom; prefer holding on to the handle
/// returned by [`start`] when more than one reader needs the result.
#[deprecated(note = "use `start(f).get()`, or hold on to `start(f)`'s handle directly")]
pub async fn join<T, Fut>(f: Fut) -> Result<Arc<T>>
where
    T: Send + Sync + 'static,
    Fut: Future<Output = T> + Send + 'static,
{
    start(f).get().await
}
