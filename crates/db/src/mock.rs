//! `MockConnector`/`MockConnection` — test doubles for the backend seam.
//!
//! Useful in unit and integration tests where a live backing store is
//! either unavailable or irrelevant. The connector records every dial and
//! every call so tests can verify pool accounting and release discipline.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::conn::{Connection, Connector};
use crate::error::{ConnectError, ExecError};
use crate::models::Row;
use crate::params::Param;

/// Outcome injected for one `execute`/`query` call.
pub enum MockCall {
    /// `execute` reports this many affected rows.
    Affected(u64),
    /// `query` returns these rows.
    Rows(Vec<Row>),
    /// Fail with a store-level rejection; the session stays healthy.
    FailRemote(String),
    /// Fail at the connection level; the session must be discarded.
    FailConnection(String),
}

/// A scriptable connector.
///
/// Each dialed session consumes the next script from `scripted`; once the
/// scripts run out, further sessions (and further calls on a session whose
/// script is exhausted) succeed with empty results.
pub struct MockConnector {
    scripts: Mutex<VecDeque<Vec<MockCall>>>,
    refuse: Option<String>,
    /// Dial attempts so far, including refused ones.
    pub dials: Arc<AtomicUsize>,
    /// Every (template, params) seen by any session, in call order.
    pub calls: Arc<Mutex<Vec<(String, Vec<Param>)>>>,
}

impl MockConnector {
    /// A connector whose sessions succeed on every call.
    pub fn healthy() -> Self {
        Self::scripted(Vec::new())
    }

    /// A connector handing each dialed session the next script in order.
    pub fn scripted(scripts: Vec<Vec<MockCall>>) -> Self {
        Self {
            scripts: Mutex::new(scripts.into_iter().collect()),
            refuse: None,
            dials: Arc::new(AtomicUsize::new(0)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A connector that refuses every handshake.
    pub fn refusing(message: impl Into<String>) -> Self {
        Self {
            scripts: Mutex::new(VecDeque::new()),
            refuse: Some(message.into()),
            dials: Arc::new(AtomicUsize::new(0)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of dial attempts so far.
    pub fn dial_count(&self) -> usize {
        self.dials.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Connector for MockConnector {
    async fn connect(&self) -> Result<Box<dyn Connection>, ConnectError> {
        self.dials.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = &self.refuse {
            return Err(ConnectError::new(message.clone()));
        }

        let script = self.scripts.lock().unwrap().pop_front().unwrap_or_default();
        Ok(Box::new(MockConnection {
            script: script.into_iter().collect(),
            calls: Arc::clone(&self.calls),
        }))
    }
}

/// A session that replays its script, then succeeds with empty results.
pub struct MockConnection {
    script: VecDeque<MockCall>,
    calls: Arc<Mutex<Vec<(String, Vec<Param>)>>>,
}

impl MockConnection {
    fn record(&self, template: &str, params: &[Param]) {
        self.calls
            .lock()
            .unwrap()
            .push((template.to_owned(), params.to_vec()));
    }
}

#[async_trait]
impl Connection for MockConnection {
    async fn execute(&mut self, template: &str, params: &[Param]) -> Result<u64, ExecError> {
        self.record(template, params);
        match self.script.pop_front() {
            None => Ok(1),
            Some(MockCall::Affected(n)) => Ok(n),
            Some(MockCall::Rows(rows)) => Ok(rows.len() as u64),
            Some(MockCall::FailRemote(m)) => Err(ExecError::Remote(m)),
            Some(MockCall::FailConnection(m)) => Err(ExecError::Connection(m)),
        }
    }

    async fn query(&mut self, template: &str, params: &[Param]) -> Result<Vec<Row>, ExecError> {
        self.record(template, params);
        match self.script.pop_front() {
            None | Some(MockCall::Affected(_)) => Ok(Vec::new()),
            Some(MockCall::Rows(rows)) => Ok(rows),
            Some(MockCall::FailRemote(m)) => Err(ExecError::Remote(m)),
            Some(MockCall::FailConnection(m)) => Err(ExecError::Connection(m)),
        }
    }
}
