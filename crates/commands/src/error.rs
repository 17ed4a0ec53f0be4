//! Command-level error types.

use std::time::Duration;

use thiserror::Error;

use db::{ConnectError, PoolError};

/// Errors surfaced by [`crate::CommandExecutor`].
///
/// No retry happens in this layer — retry policy, if any, belongs to the
/// caller. A `RemoteExecutionFailed` is a normal failure value (duplicate
/// registration and friends), not a crash.
#[derive(Debug, Error)]
pub enum CommandError {
    // ------ Catalog misuse ------

    /// The name is not registered in the catalog.
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    /// The supplied parameter count does not match the declaration.
    #[error("command '{name}' expects {expected} parameters, got {got}")]
    ArityMismatch {
        name: &'static str,
        expected: usize,
        got: usize,
    },

    // ------ Pool / connection ------

    /// Every pool slot stayed busy for the whole acquire timeout.
    #[error("connection pool exhausted after {waited:?}")]
    PoolExhausted { waited: Duration },

    /// The backing store could not be reached, or the session failed
    /// mid-command and was discarded.
    #[error("backing store unreachable: {0}")]
    ConnectFailed(String),

    // ------ Execution ------

    /// The store processed and rejected the command.
    #[error("command '{name}' rejected by the store: {message}")]
    RemoteExecutionFailed {
        name: &'static str,
        message: String,
    },

    /// A query produced rows in an unexpected shape.
    #[error("command '{name}' returned a malformed result: {detail}")]
    MalformedResult {
        name: &'static str,
        detail: String,
    },
}

impl From<PoolError> for CommandError {
    fn from(err: PoolError) -> Self {
        match err {
            PoolError::Exhausted { waited } => Self::PoolExhausted { waited },
            PoolError::Connect(ConnectError { message }) => Self::ConnectFailed(message),
        }
    }
}
