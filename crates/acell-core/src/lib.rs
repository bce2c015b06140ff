//! An asynchronous single-assignment-with-updates reference cell.
//!
//! # ⚠️ Scope
//!
//! This crate implements exactly one concurrency primitive and the two
//! combinators built directly on top of it:
//!
//! - [`Cell<T>`] — a Cell starts empty; its first [`set_async`](Cell::set_async)
//!   broadcasts to every reader parked on [`get`](Cell::get); every later set
//!   (unconditional or optimistic, via [`access`](Cell::access)/
//!   [`try_modify`](Cell::try_modify)) replaces the value for whoever reads
//!   next. All of it is serialized by a single background task per Cell, so
//!   there are no locks on the Cell's own body.
//! - [`race`] — first-winner selection between two computations, with the
//!   loser's result discarded and its handle to the winner's Cell severed so
//!   it can be reclaimed even while the loser keeps running.
//! - [`start`] — fork a computation in the background and broadcast its
//!   single result to any number of later readers.
//!
//! What this crate does *not* provide: the executor (it assumes a Tokio
//! runtime is already running), timers or timeouts (race a [`Cell::get`]
//! against a `tokio::time::sleep` if you need one), and persistence or
//! cross-process coordination of any kind.
//!
//! ```
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> acell_core::Result<()> {
//! let cell = acell_core::Cell::create();
//! cell.set_async_pure(42);
//! assert_eq!(*cell.get().await?, 42);
//! # Ok(())
//! # }
//! ```

mod cell;
mod combinators;
mod error;
mod mailbox;
mod race;
mod start;
mod waiters;

pub use cell::{CancelHandle, Cell, Change, ReadHandle, Setter};
pub use combinators::{join, parallel_sequence, parallel_traverse, ref_of};
pub use error::{Error, Result};
pub use race::{Either, race};
pub use start::{Started, start};
