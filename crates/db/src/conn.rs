//! The `Connection`/`Connector` seam — the contract every backend fulfils.
//!
//! The pool hands out `Box<dyn Connection>` trait objects; the `commands`
//! crate executes through them without knowing which backend is behind the
//! seam. The production backend lives in [`crate::mysql`], the test double
//! in [`crate::mock`].

use async_trait::async_trait;

use crate::error::{ConnectError, ExecError};
use crate::models::Row;
use crate::params::Param;

/// One live backing-store session.
///
/// A session is owned exclusively by whoever holds it: the pool while idle,
/// a single caller while in use. Both methods take `&mut self` so exclusive
/// ownership is enforced by the borrow checker rather than convention.
#[async_trait]
pub trait Connection: Send {
    /// Run a command that produces no result rows.
    ///
    /// `template` uses driver placeholders (`?`); `params` are bound
    /// positionally. Returns the number of affected rows.
    ///
    /// # Errors
    /// [`ExecError::Remote`] if the store rejected the command,
    /// [`ExecError::Connection`] if the session itself failed.
    async fn execute(&mut self, template: &str, params: &[Param]) -> Result<u64, ExecError>;

    /// Run a command and collect its result rows in store order.
    ///
    /// An empty `Vec` is a valid outcome.
    ///
    /// # Errors
    /// Same split as [`Connection::execute`].
    async fn query(&mut self, template: &str, params: &[Param]) -> Result<Vec<Row>, ExecError>;
}

/// Dials new sessions against one configured endpoint.
///
/// The pool owns exactly one connector and calls it lazily: on first use,
/// and again whenever a broken session was discarded.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Perform the network handshake and return a fresh session.
    ///
    /// # Errors
    /// [`ConnectError`] if the endpoint cannot be reached or refuses the
    /// handshake; the pool propagates this to the acquiring caller.
    async fn connect(&self) -> Result<Box<dyn Connection>, ConnectError>;
}
