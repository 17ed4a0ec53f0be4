//! MySQL backend over a raw `sqlx` connection.
//!
//! Pooling stays on our side of the seam — each `MySqlSession` wraps a
//! single raw [`MySqlConnection`], and parameters are bound through the
//! driver's `?` placeholders, never by string formatting.

use async_trait::async_trait;
use sqlx::mysql::{MySqlArguments, MySqlConnection, MySqlRow};
use sqlx::query::Query;
use sqlx::{Connection as SqlxConnection, MySql, Row as SqlxRow};
use tracing::info;

use crate::conn::{Connection, Connector};
use crate::error::{ConnectError, ExecError};
use crate::models::{Row, Value};
use crate::params::Param;
use crate::pool::{Pool, PoolConfig};

/// Create a [`Pool`] backed by MySQL sessions against `database_url`.
///
/// No session is dialed here; the first `acquire` performs the handshake.
pub fn create_pool(database_url: &str, config: PoolConfig) -> Pool {
    info!(max_size = config.max_size, "initializing backing-store pool");
    Pool::new(Box::new(MySqlConnector::new(database_url)), config)
}

/// Dials raw MySQL connections against one URL.
pub struct MySqlConnector {
    url: String,
}

impl MySqlConnector {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[async_trait]
impl Connector for MySqlConnector {
    async fn connect(&self) -> Result<Box<dyn Connection>, ConnectError> {
        let conn = MySqlConnection::connect(&self.url)
            .await
            .map_err(|e| ConnectError::new(e.to_string()))?;
        Ok(Box::new(MySqlSession { conn }))
    }
}

/// One live MySQL session.
pub struct MySqlSession {
    conn: MySqlConnection,
}

#[async_trait]
impl Connection for MySqlSession {
    async fn execute(&mut self, template: &str, params: &[Param]) -> Result<u64, ExecError> {
        let mut query = sqlx::query(template);
        for param in params {
            query = bind(query, param);
        }
        let done = query.execute(&mut self.conn).await.map_err(classify)?;
        Ok(done.rows_affected())
    }

    async fn query(&mut self, template: &str, params: &[Param]) -> Result<Vec<Row>, ExecError> {
        let mut query = sqlx::query(template);
        for param in params {
            query = bind(query, param);
        }
        let rows = query.fetch_all(&mut self.conn).await.map_err(classify)?;
        Ok(rows.iter().map(decode_row).collect())
    }
}

fn bind<'q>(query: Query<'q, MySql, MySqlArguments>, param: &Param) -> Query<'q, MySql, MySqlArguments> {
    match param {
        Param::DeviceId(v) | Param::Int(v) => query.bind(*v),
        Param::Text(s) => query.bind(s.clone()),
    }
}

fn decode_row(row: &MySqlRow) -> Row {
    (0..row.len()).map(|idx| decode_cell(row, idx)).collect()
}

fn decode_cell(row: &MySqlRow, idx: usize) -> Value {
    if let Ok(cell) = row.try_get::<Option<i64>, _>(idx) {
        return cell.map(Value::Long).unwrap_or(Value::Null);
    }
    if let Ok(cell) = row.try_get::<Option<u64>, _>(idx) {
        return match cell {
            Some(v) => match i64::try_from(v) {
                Ok(v) => Value::Long(v),
                Err(_) => Value::Text(v.to_string()),
            },
            None => Value::Null,
        };
    }
    if let Ok(cell) = row.try_get::<Option<String>, _>(idx) {
        return cell.map(Value::Text).unwrap_or(Value::Null);
    }
    Value::Null
}

/// Split driver failures into store-level rejections (session stays
/// healthy) and connection-level faults (session must be discarded).
fn classify(err: sqlx::Error) -> ExecError {
    match err {
        sqlx::Error::Database(db) => ExecError::Remote(db.to_string()),
        e @ (sqlx::Error::RowNotFound
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::Decode(_)) => ExecError::Remote(e.to_string()),
        other => ExecError::Connection(other.to_string()),
    }
}
