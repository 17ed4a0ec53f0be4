//! `db` crate — pooled backing-store access.
//!
//! Provides the `Connection`/`Connector` seam, a bounded connection pool,
//! the positional value model for query results, and two backends: the
//! production MySQL backend and a programmable mock for tests.
//! No command semantics live here — those belong to the `commands` crate.

pub mod conn;
pub mod error;
pub mod mock;
pub mod models;
pub mod mysql;
pub mod params;
pub mod pool;

pub use conn::{Connection, Connector};
pub use error::{ConnectError, ExecError, PoolError};
pub use models::{Row, Value};
pub use params::{Param, ParamKind};
pub use pool::{Pool, PoolConfig, PooledConnection};
