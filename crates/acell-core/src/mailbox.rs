//! The single-consumer serializing actor that owns all Cell-private state.
//!
//! Everything in this module is private to the crate. [`Mailbox`] is the
//! thread-safe handle producers hold; the actor loop spawned by
//! [`Mailbox::spawn`] is the sole mutator of [`State`] — no other code ever
//! touches a Cell's value, version, or waiters directly.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use crate::error::{Error, Result};
use crate::waiters::{WaiterId, WaiterMap};

/// The four message shapes the actor understands.
pub(crate) enum Msg<T> {
    Read {
        id: WaiterId,
        reply: oneshot::Sender<(Arc<T>, u64)>,
    },
    Set {
        value: Arc<T>,
        ack: oneshot::Sender<()>,
    },
    TrySet {
        expected_version: u64,
        value: Arc<T>,
        reply: oneshot::Sender<bool>,
    },
    Nevermind {
        id: WaiterId,
        reply: oneshot::Sender<bool>,
    },
}

struct State<T> {
    value: Option<Arc<T>>,
    version: u64,
    waiters: WaiterMap<T>,
}

/// A cheaply-cloneable handle to a Cell's mailbox.
///
/// Holding a `Mailbox` keeps its actor task alive; once every `Mailbox`
/// (including the one embedded in every [`crate::Cell`] clone) is dropped,
/// the channel closes and the actor task exits on its next receive.
pub(crate) struct Mailbox<T> {
    tx: mpsc::UnboundedSender<Msg<T>>,
}

impl<T: Send + Sync + 'static> Mailbox<T> {
    /// Spawns a fresh actor, optionally already holding `initial`.
    pub(crate) fn spawn(initial: Option<Arc<T>>) -> Arc<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        let version = if initial.is_some() { 1 } else { 0 };
        let state = State {
            value: initial,
            version,
            waiters: WaiterMap::new(),
        };
        tokio::spawn(run(rx, state));
        Arc::new(Self { tx })
    }

    /// Sends a `Read` without waiting for a reply; used by `cancellable_get`,
    /// which must enqueue the read eagerly but let the caller await it later.
    pub(crate) fn send_read(&self, id: WaiterId, reply: oneshot::Sender<(Arc<T>, u64)>) {
        let _ = self.tx.send(Msg::Read { id, reply });
    }

    pub(crate) async fn read(&self) -> Result<(Arc<T>, u64)> {
        let id = WaiterId::new();
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send_read(id, reply_tx);
        reply_rx.await.map_err(|_| Error::ActorGone)
    }

    pub(crate) async fn set(&self, value: Arc<T>) -> Result<()> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.tx
            .send(Msg::Set {
                value,
                ack: ack_tx,
            })
            .map_err(|_| Error::ActorGone)?;
        ack_rx.await.map_err(|_| Error::ActorGone)
    }

    pub(crate) async fn try_set(&self, expected_version: u64, value: Arc<T>) -> Result<bool> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(Msg::TrySet {
                expected_version,
                value,
                reply: reply_tx,
            })
            .map_err(|_| Error::ActorGone)?;
        reply_rx.await.map_err(|_| Error::ActorGone)
    }

    pub(crate) async fn nevermind(&self, id: WaiterId) -> Result<bool> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(Msg::Nevermind { id, reply: reply_tx })
            .map_err(|_| Error::ActorGone)?;
        reply_rx.await.map_err(|_| Error::ActorGone)
    }
}

async fn run<T: Send + Sync + 'static>(mut rx: mpsc::UnboundedReceiver<Msg<T>>, mut state: State<T>) {
    tracing::debug!("cell actor started");
    while let Some(msg) = rx.recv().await {
        match msg {
            Msg::Read { id, reply } => match &state.value {
                Some(value) => {
                    // Delivering through the oneshot channel wakes the
                    // waiting task via the executor rather than running any
                    // of its code on this thread, so a slow reader can never
                    // hold up this actor's loop.
                    let _ = reply.send((Arc::clone(value), state.version));
                }
                None => {
                    tracing::debug!(waiters = state.waiters.len() + 1, "read parked, cell empty");
                    state.waiters.insert(id, reply);
                }
            },
            Msg::Set { value, ack } => {
                state.version += 1;
                if state.value.is_none() {
                    let mut woken = 0usize;
                    for (_, waiter_reply) in state.waiters.drain_in_order() {
                        let _ = waiter_reply.send((Arc::clone(&value), state.version));
                        woken += 1;
                    }
                    if woken > 0 {
                        tracing::debug!(woken, version = state.version, "broadcasting first value");
                    }
                }
                state.value = Some(value);
                let _ = ack.send(());
            }
            Msg::TrySet {
                expected_version,
                value,
                reply,
            } => {
                if expected_version == state.version {
                    state.version += 1;
                    if state.value.is_none() {
                        for (_, waiter_reply) in state.waiters.drain_in_order() {
                            let _ = waiter_reply.send((Arc::clone(&value), state.version));
                        }
                    }
                    state.value = Some(value);
                    let _ = reply.send(true);
                } else {
                    tracing::debug!(expected_version, actual_version = state.version, "cas lost");
                    let _ = reply.send(false);
                }
            }
            Msg::Nevermind { id, reply } => {
                let found = state.waiters.remove(id);
                let _ = reply.send(found);
            }
        }
    }
    tracing::debug!("cell actor stopped");
}
