//! Error type for `acell-core`'s own operational failures.
//!
//! A [`Cell`](crate::Cell) never synthesises an error about the value it
//! transports — whatever the producing computation yielded, good or bad, is
//! delivered to readers unchanged. The only failure the library itself can
//! report is that the Cell's actor is no longer there to answer at all.

use thiserror::Error;

/// Result type for `acell-core` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Operational errors raised by the library itself, never by a user computation.
#[derive(Debug, Error)]
pub enum Error {
    /// The Cell's actor task has already exited (every handle to its mailbox
    /// was dropped) before it could answer this message.
    #[error("cell actor is no longer running")]
    ActorGone,
}
