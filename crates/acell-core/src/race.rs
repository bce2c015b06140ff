//! First-winner selection between two asynchronous computations.
//!
//! Grounded on `venus-core`'s `ParallelExecutor`, which already guards shared
//! state behind `Arc<Mutex<..>>` with a small `lock_error` helper
//! (`crates/venus-core/src/execute/parallel.rs`); the `actor_ref` slot below
//! plays the same role, but is emptied rather than merely locked, so the
//! losing branch's still-running future can't resurrect the winner's Cell.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::cell::Cell;
use crate::error::Result;
use crate::mailbox::Mailbox;

/// The disjoint union of two computations' outcomes, as produced by the free
/// [`race`] function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Either<A, B> {
    Left(A),
    Right(B),
}

impl<T: Send + Sync + 'static> Cell<T> {
    /// Feeds this Cell from whichever of `f1`/`f2` completes first.
    ///
    /// Both computations are spawned unconditionally and run to completion
    /// even if they lose: there is no cancellation of the loser. The `won`
    /// flag and the `actor_ref` slot realize a compare-and-set-then-sever
    /// dance: whichever branch wins the CAS takes the mailbox handle out of
    /// the shared slot before sending `Set`, so the loser's still-running
    /// future, which also holds a clone of that slot, can never observe or
    /// reuse it.
    pub fn race<F1, F2>(&self, f1: F1, f2: F2)
    where
        F1: Future<Output = T> + Send + 'static,
        F2: Future<Output = T> + Send + 'static,
    {
        let won = Arc::new(AtomicBool::new(false));
        let actor_ref: Arc<Mutex<Option<Arc<Mailbox<T>>>>> =
            Arc::new(Mutex::new(Some(Arc::clone(&self.mailbox))));

        spawn_branch(f1, Arc::clone(&won), Arc::clone(&actor_ref));
        spawn_branch(f2, won, actor_ref);
    }
}

fn spawn_branch<T, Fut>(
    fut: Fut,
    won: Arc<AtomicBool>,
    actor_ref: Arc<Mutex<Option<Arc<Mailbox<T>>>>>,
) where
    T: Send + Sync + 'static,
    Fut: Future<Output = T> + Send + 'static,
{
    tokio::spawn(async move {
        let result = fut.await;
        if won
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            let mailbox = actor_ref.lock().unwrap_or_else(|e| e.into_inner()).take();
            if let Some(mailbox) = mailbox {
                tracing::debug!("race won, setting cell");
                let _ = mailbox.set(Arc::new(result)).await;
            }
        } else {
            tracing::debug!("race lost, discarding result");
        }
    });
}

/// First-winner selection between two arbitrary computations.
///
/// Allocates a private [`Cell`] over `Either<A, B>`, races `fa` mapped into
/// `Either::Left` against `fb` mapped into `Either::Right`, and reads the
/// result back out.
pub async fn race<A, B>(
    fa: impl Future<Output = A> + Send + 'static,
    fb: impl Future<Output = B> + Send + 'static,
) -> Result<Arc<Either<A, B>>>
where
    A: Send + Sync + 'static,
    B: Send + Sync + 'static,
{
    let cell = Cell::<Either<A, B>>::create();
    cell.race(
        async move { Either::Left(fa.await) },
        async move { Either::Right(fb.await) },
    );
    cell.get().await
}
