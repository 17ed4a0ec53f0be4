//! HTTP handlers — thin translation from requests to typed operations.

pub mod bindings;
pub mod devices;
pub mod telemetry;

use axum::http::StatusCode;
use commands::CommandError;
use tracing::warn;

/// Map a command-layer failure onto an HTTP status.
///
/// Catalog misuse can only come from a handler bug, so it is a 500. Pool
/// pressure is 503 so the device layer can back off and retry. A store
/// rejection (duplicate registration and friends) is a 409 the caller can
/// act on.
pub(crate) fn error_status(err: CommandError) -> StatusCode {
    warn!("command failed: {err}");
    match err {
        CommandError::UnknownCommand(_) | CommandError::ArityMismatch { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        CommandError::PoolExhausted { .. } => StatusCode::SERVICE_UNAVAILABLE,
        CommandError::ConnectFailed(_) | CommandError::MalformedResult { .. } => {
            StatusCode::BAD_GATEWAY
        }
        CommandError::RemoteExecutionFailed { .. } => StatusCode::CONFLICT,
    }
}
