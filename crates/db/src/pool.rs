//! Bounded backing-store connection pool.
//!
//! One `Pool` owns every session dialed against one configured endpoint.
//! Slot accounting is a tokio `Semaphore` (capacity = `max_size`), so the
//! number of sessions handed out can never exceed the configured maximum
//! and waiters are woken in FIFO order — no starvation. The idle list is a
//! LIFO stack behind a mutex held only around push/pop, never across a
//! store round-trip.
//!
//! Exhaustion policy: `acquire` waits up to `acquire_timeout` for a slot,
//! then fails with [`PoolError::Exhausted`]. A zero timeout degenerates to
//! a try-acquire. Sessions are dialed lazily — on first use, and again
//! after a broken session was discarded.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::{debug, warn};

use crate::conn::{Connection, Connector};
use crate::error::PoolError;

/// Tuning knobs for a [`Pool`].
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Maximum number of sessions alive at once (floor 1).
    pub max_size: usize,
    /// How long `acquire` may wait for a slot before failing.
    pub acquire_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_size: 8,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

impl PoolConfig {
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size.max(1);
        self
    }

    pub fn with_acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }
}

struct PoolShared {
    connector: Box<dyn Connector>,
    idle: Mutex<Vec<Box<dyn Connection>>>,
    slots: Arc<Semaphore>,
    config: PoolConfig,
}

/// A bounded pool of reusable backing-store sessions.
///
/// Cheap to clone; all clones share the same slots and idle list.
/// Construct one at process start and drop it at shutdown — dropping the
/// last clone closes every idle session.
#[derive(Clone)]
pub struct Pool {
    shared: Arc<PoolShared>,
}

impl Pool {
    /// Create a pool over `connector`. No session is dialed until the
    /// first [`Pool::acquire`].
    pub fn new(connector: Box<dyn Connector>, config: PoolConfig) -> Self {
        let max = config.max_size.max(1);
        Self {
            shared: Arc::new(PoolShared {
                connector,
                idle: Mutex::new(Vec::with_capacity(max)),
                slots: Arc::new(Semaphore::new(max)),
                config: PoolConfig { max_size: max, ..config },
            }),
        }
    }

    /// Take a session out of the pool, dialing a fresh one if none is idle
    /// and the pool is below capacity.
    ///
    /// # Errors
    /// - [`PoolError::Exhausted`] if every slot stayed busy for the whole
    ///   acquire timeout.
    /// - [`PoolError::Connect`] if a fresh session had to be dialed and the
    ///   handshake failed; the slot is freed again before returning.
    pub async fn acquire(&self) -> Result<PooledConnection, PoolError> {
        let timeout = self.shared.config.acquire_timeout;

        let permit = if timeout.is_zero() {
            self.shared
                .slots
                .clone()
                .try_acquire_owned()
                .map_err(|_| PoolError::Exhausted { waited: Duration::ZERO })?
        } else {
            match tokio::time::timeout(timeout, self.shared.slots.clone().acquire_owned()).await {
                Ok(Ok(permit)) => permit,
                // The semaphore is never closed while a Pool clone is alive.
                Ok(Err(_)) | Err(_) => return Err(PoolError::Exhausted { waited: timeout }),
            }
        };

        let reused = self.shared.idle.lock().unwrap().pop();
        let conn = match reused {
            Some(conn) => conn,
            None => match self.shared.connector.connect().await {
                Ok(conn) => {
                    debug!(in_use = self.in_use(), "dialed fresh backing-store session");
                    conn
                }
                // Dropping `permit` here frees the slot for the next caller.
                Err(err) => return Err(PoolError::Connect(err)),
            },
        };

        Ok(PooledConnection {
            shared: Arc::clone(&self.shared),
            conn: Some(conn),
            _permit: permit,
        })
    }

    /// Number of sessions currently handed out.
    pub fn in_use(&self) -> usize {
        self.shared.config.max_size - self.shared.slots.available_permits()
    }

    /// Number of idle sessions ready for reuse.
    pub fn idle(&self) -> usize {
        self.shared.idle.lock().unwrap().len()
    }

    /// The configured capacity.
    pub fn max_size(&self) -> usize {
        self.shared.config.max_size
    }
}

/// A session checked out of the pool.
///
/// Dropping the guard returns the session to the idle list (healthy
/// release). Call [`PooledConnection::discard`] instead when the session
/// failed at the connection level — the session is destroyed and its slot
/// freed, so a later `acquire` dials a replacement. Either way the slot is
/// given back exactly once; a double release is unrepresentable.
pub struct PooledConnection {
    shared: Arc<PoolShared>,
    conn: Option<Box<dyn Connection>>,
    // Released after `Drop::drop` has re-idled the session, so a woken
    // waiter always finds it.
    _permit: OwnedSemaphorePermit,
}

impl PooledConnection {
    /// The underlying session.
    ///
    /// # Panics
    /// Panics if called after [`PooledConnection::discard`] (structurally
    /// unreachable — `discard` consumes the guard).
    pub fn conn_mut(&mut self) -> &mut dyn Connection {
        self.conn
            .as_mut()
            .expect("BUG: pooled session used after discard")
            .as_mut()
    }

    /// Destroy a broken session instead of re-idling it.
    pub fn discard(mut self) {
        if self.conn.take().is_some() {
            warn!("discarding broken backing-store session");
        }
    }
}

impl Drop for PooledConnection {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take() {
            self.shared.idle.lock().unwrap().push(conn);
        }
    }
}
