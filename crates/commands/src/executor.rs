//! Command executor.
//!
//! `CommandExecutor` is the polymorphic operator over the catalog:
//! 1. Looks the logical name up in the catalog.
//! 2. Validates the supplied parameters against the declared arity —
//!    before any pool interaction.
//! 3. Acquires a session, runs the bound template, and releases the
//!    session on every exit path: healthy after success or a store-level
//!    rejection, discarded after a connection-level fault.
//!
//! Exactly one release happens per successful acquire — the RAII guard
//! makes a leak or a double release unrepresentable.

use tracing::{instrument, warn};
use uuid::Uuid;

use db::{ExecError, Param, Pool, PooledConnection, Row};

use crate::catalog::{self, CommandSpec};
use crate::error::CommandError;

/// Runs catalog commands through pool-acquired sessions.
///
/// Cheap to clone; clones share the pool. Construct one at process start
/// and hand clones to whatever serves inbound device/application traffic.
#[derive(Clone)]
pub struct CommandExecutor {
    pool: Pool,
}

impl CommandExecutor {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// The pool this executor draws sessions from.
    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    /// Run a command that produces no result rows; returns the
    /// affected-row count.
    ///
    /// # Errors
    /// `UnknownCommand`/`ArityMismatch` for catalog misuse (no session is
    /// touched), `PoolExhausted`/`ConnectFailed` from acquisition,
    /// `RemoteExecutionFailed` when the store rejects the command.
    #[instrument(skip(self, params), fields(invocation = %Uuid::new_v4()))]
    pub async fn execute(&self, name: &str, params: &[Param]) -> Result<u64, CommandError> {
        let spec = bind(name, params)?;
        let mut guard = self.pool.acquire().await?;
        match guard.conn_mut().execute(spec.template, params).await {
            Ok(affected) => Ok(affected),
            Err(err) => Err(release_failed(spec, guard, err)),
        }
    }

    /// Run a command and collect its result rows in store order. An empty
    /// result is a valid, non-error outcome.
    ///
    /// # Errors
    /// Same taxonomy as [`CommandExecutor::execute`]; shape problems in the
    /// returned rows surface later, from the typed `ops` layer, as
    /// `MalformedResult`.
    #[instrument(skip(self, params), fields(invocation = %Uuid::new_v4()))]
    pub async fn query(&self, name: &str, params: &[Param]) -> Result<Vec<Row>, CommandError> {
        let spec = bind(name, params)?;
        let mut guard = self.pool.acquire().await?;
        match guard.conn_mut().query(spec.template, params).await {
            Ok(rows) => Ok(rows),
            Err(err) => Err(release_failed(spec, guard, err)),
        }
    }
}

/// Catalog lookup plus arity validation. Runs before any pool interaction.
fn bind(name: &str, params: &[Param]) -> Result<&'static CommandSpec, CommandError> {
    let spec = catalog::lookup(name).ok_or_else(|| CommandError::UnknownCommand(name.to_owned()))?;
    if params.len() != spec.params.len() {
        return Err(CommandError::ArityMismatch {
            name: spec.name,
            expected: spec.params.len(),
            got: params.len(),
        });
    }
    Ok(spec)
}

/// Release the session according to the failure class and map the error.
///
/// A store-level rejection re-idles the session; a connection-level fault
/// discards it so a later acquire dials a replacement.
fn release_failed(spec: &CommandSpec, guard: PooledConnection, err: ExecError) -> CommandError {
    match err {
        ExecError::Remote(message) => {
            drop(guard);
            CommandError::RemoteExecutionFailed {
                name: spec.name,
                message,
            }
        }
        ExecError::Connection(message) => {
            warn!(command = spec.name, "session lost mid-command, discarding");
            guard.discard();
            CommandError::ConnectFailed(message)
        }
    }
}
