//! Typed error types for the db crate.

use std::time::Duration;

use thiserror::Error;

/// Raised while dialing a new backing-store session.
#[derive(Debug, Error)]
#[error("backing store handshake failed: {message}")]
pub struct ConnectError {
    /// Driver-reported reason the handshake did not complete.
    pub message: String,
}

impl ConnectError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Errors returned by a session's `execute`/`query` methods.
///
/// The pool-facing caller uses the variant to decide what to do with the
/// session afterwards:
/// - `Remote`     — the store processed and rejected the command; the
///                  session is still usable and goes back to the pool.
/// - `Connection` — the session itself failed; it must be discarded.
#[derive(Debug, Error)]
pub enum ExecError {
    /// The store rejected the command (constraint violation, bad procedure).
    #[error("store rejected command: {0}")]
    Remote(String),

    /// The session failed at the socket or protocol level.
    #[error("connection failure: {0}")]
    Connection(String),
}

/// Errors returned by [`crate::Pool::acquire`].
#[derive(Debug, Error)]
pub enum PoolError {
    /// All slots stayed busy for the whole acquire timeout.
    #[error("no connection became available within {waited:?}")]
    Exhausted {
        /// How long the caller waited before giving up.
        waited: Duration,
    },

    /// A fresh session had to be dialed and the handshake failed.
    #[error(transparent)]
    Connect(#[from] ConnectError),
}
