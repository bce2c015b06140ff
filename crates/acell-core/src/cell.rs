//! The public Cell API: creation, reads, compare-and-swap, and set.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::oneshot;

use crate::error::Result;
use crate::mailbox::Mailbox;
use crate::waiters::WaiterId;

/// An asynchronous single-assignment-with-updates reference cell.
///
/// A `Cell<T>` starts empty. The first [`set_async`](Cell::set_async) (or
/// [`set_sync`](Cell::set_sync)) transitions it to holding a value and
/// broadcasts that value to every reader parked on [`get`](Cell::get) at the
/// moment of the transition; every subsequent set simply replaces the value.
/// Replacement can be done unconditionally (`set_*`) or optimistically, via
/// [`access`](Cell::access)/[`try_modify`](Cell::try_modify), guarded by a
/// monotonically increasing version stamp.
///
/// Cloning a `Cell` is cheap (it clones an `Arc` to the shared mailbox); all
/// clones observe the same underlying state.
pub struct Cell<T> {
    pub(crate) mailbox: Arc<Mailbox<T>>,
}

impl<T> Clone for Cell<T> {
    fn clone(&self) -> Self {
        Self {
            mailbox: Arc::clone(&self.mailbox),
        }
    }
}

/// The paired result of a successful [`try_modify`](Cell::try_modify) or
/// [`modify`](Cell::modify): the value immediately before the compare-and-swap,
/// and the value it was replaced with.
pub struct Change<T> {
    pub previous: Arc<T>,
    pub now: Arc<T>,
}

impl<T: PartialEq> Change<T> {
    /// Whether `now` differs from `previous` by `==`.
    ///
    /// For modifications where `f` can return its input unchanged, this is
    /// the cheapest way to tell whether the CAS actually changed anything.
    pub fn modified(&self) -> bool {
        self.previous.as_ref() != self.now.as_ref()
    }
}

/// A one-shot compare-and-swap handle returned alongside a read from
/// [`Cell::access`].
///
/// Consumed by value on its one legal use: reusing a setter after it has
/// already succeeded or failed would compare against a stale version, so the
/// type system takes the handle away rather than leaving that up to callers.
pub struct Setter<T> {
    mailbox: Arc<Mailbox<T>>,
    expected_version: u64,
}

impl<T: Send + Sync + 'static> Setter<T> {
    /// Attempts to replace the value read alongside this setter with `value`,
    /// succeeding iff no other `Set`/`TrySet` has linearized since that read.
    pub async fn set(self, value: T) -> Result<bool> {
        self.set_arc(Arc::new(value)).await
    }

    pub(crate) async fn set_arc(self, value: Arc<T>) -> Result<bool> {
        self.mailbox.try_set(self.expected_version, value).await
    }
}

/// The read half returned by [`Cell::cancellable_get`].
///
/// The underlying `Read` was already enqueued when this handle was created;
/// awaiting it only waits for the reply that was already in flight.
pub struct ReadHandle<T> {
    reply: oneshot::Receiver<(Arc<T>, u64)>,
}

impl<T> ReadHandle<T> {
    /// Waits for the value this handle's read was registered for.
    pub async fn get(self) -> Result<Arc<T>> {
        self.reply
            .await
            .map(|(value, _version)| value)
            .map_err(|_| crate::error::Error::ActorGone)
    }
}

/// The cancel half returned by [`Cell::cancellable_get`].
pub struct CancelHandle<T> {
    mailbox: Arc<Mailbox<T>>,
    id: WaiterId,
}

impl<T: Send + Sync + 'static> CancelHandle<T> {
    /// Cancels the paired read. Returns whether the read was still parked
    /// (`true`) or had already been delivered (`false`); idempotent either
    /// way, so cancelling twice or cancelling after delivery is harmless.
    pub async fn cancel(self) -> Result<bool> {
        self.mailbox.nevermind(self.id).await
    }
}

impl<T: Send + Sync + 'static> Cell<T> {
    /// Creates a fresh, empty Cell.
    pub fn create() -> Self {
        Self {
            mailbox: Mailbox::spawn(None),
        }
    }

    /// Creates a Cell already holding `value`.
    ///
    /// The actor is initialized with `value` in place before it can receive
    /// any message, rather than spawned empty and then `Set`; this avoids a
    /// window in which a `get` issued immediately after `create_of` could
    /// race the initializing set.
    pub fn create_of(value: T) -> Self {
        Self {
            mailbox: Mailbox::spawn(Some(Arc::new(value))),
        }
    }

    /// The current value, or waits for the first [`set_async`](Self::set_async)
    /// if the Cell is still empty.
    pub async fn get(&self) -> Result<Arc<T>> {
        self.mailbox.read().await.map(|(value, _version)| value)
    }

    /// Like [`get`](Self::get), but the read can be cancelled before it
    /// completes. The read is enqueued immediately; only awaiting its result
    /// is deferred to the caller.
    pub fn cancellable_get(&self) -> (ReadHandle<T>, CancelHandle<T>) {
        let id = WaiterId::new();
        let (reply_tx, reply_rx) = oneshot::channel();
        self.mailbox.send_read(id, reply_tx);
        (
            ReadHandle { reply: reply_rx },
            CancelHandle {
                mailbox: Arc::clone(&self.mailbox),
                id,
            },
        )
    }

    /// A CAS-ready read: the current value, plus a one-shot [`Setter`] that
    /// succeeds only if nothing else has set the Cell since this read.
    pub async fn access(&self) -> Result<(Arc<T>, Setter<T>)> {
        let (value, version) = self.mailbox.read().await?;
        Ok((
            value,
            Setter {
                mailbox: Arc::clone(&self.mailbox),
                expected_version: version,
            },
        ))
    }

    /// A single compare-and-swap attempt: reads the current value, computes
    /// `f(&prev)`, and tries to set it. Returns `None` if another writer won
    /// the race; `f` is not retried.
    pub async fn try_modify<F>(&self, f: F) -> Result<Option<Change<T>>>
    where
        F: FnOnce(&T) -> T,
    {
        let (previous, setter) = self.access().await?;
        let now = Arc::new(f(&previous));
        let ok = setter.set_arc(Arc::clone(&now)).await?;
        Ok(ok.then_some(Change { previous, now }))
    }

    /// Retries [`try_modify`](Self::try_modify) until it wins a compare-and-swap.
    ///
    /// `f` must be safe to invoke more than once: under contention it is
    /// called again, from scratch, against the latest value each time.
    pub async fn modify<F>(&self, f: F) -> Result<Change<T>>
    where
        F: Fn(&T) -> T,
    {
        loop {
            if let Some(change) = self.try_modify(&f).await? {
                return Ok(change);
            }
        }
    }

    /// As [`try_modify`](Self::try_modify), but `f` also returns an auxiliary
    /// value `B` handed back to the caller alongside the [`Change`].
    pub async fn try_modify2<F, B>(&self, f: F) -> Result<Option<(Change<T>, B)>>
    where
        F: FnOnce(&T) -> (T, B),
    {
        let (previous, setter) = self.access().await?;
        let (now, aux) = f(&previous);
        let now = Arc::new(now);
        let ok = setter.set_arc(Arc::clone(&now)).await?;
        Ok(ok.then_some((Change { previous, now }, aux)))
    }

    /// As [`modify`](Self::modify), for the auxiliary-value variant.
    pub async fn modify2<F, B>(&self, f: F) -> Result<(Change<T>, B)>
    where
        F: Fn(&T) -> (T, B),
    {
        loop {
            if let Some(result) = self.try_modify2(&f).await? {
                return Ok(result);
            }
        }
    }

    /// Submits `fa` to the executor; once it completes, unconditionally sets
    /// the Cell to its result. Returns as soon as `fa` has been submitted,
    /// without waiting for it (or the resulting `Set`) to complete.
    pub fn set_async<Fut>(&self, fa: Fut)
    where
        Fut: Future<Output = T> + Send + 'static,
    {
        let mailbox = Arc::clone(&self.mailbox);
        tokio::spawn(async move {
            let value = fa.await;
            let _ = mailbox.set(Arc::new(value)).await;
        });
    }

    /// `set_async(ready(value))`.
    pub fn set_async_pure(&self, value: T) {
        self.set_async(std::future::ready(value));
    }

    /// Awaits `fa`, then sets the Cell and waits for the set to take effect
    /// before returning.
    pub async fn set_sync<Fut>(&self, fa: Fut) -> Result<()>
    where
        Fut: Future<Output = T> + Send + 'static,
    {
        let value = fa.await;
        self.mailbox.set(Arc::new(value)).await
    }

    /// `set_sync(ready(value))`.
    pub async fn set_sync_pure(&self, value: T) -> Result<()> {
        self.mailbox.set(Arc::new(value)).await
    }
}
