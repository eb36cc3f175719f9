//! Handle to the monitored PostgreSQL server.
//!
//! Every query goes through the simple-query protocol, so result values arrive
//! as text the same way for statistics views, helper-schema tables and scalar
//! calls. Callers parse what they need.

#[cfg(test)]
pub(crate) mod mock;

use native_tls::TlsConnector;
use postgres::{Client, NoTls, SimpleQueryMessage};
use postgres_native_tls::MakeTlsConnector;
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised by the connection layer.
#[derive(Debug, Error)]
pub enum DbError {
    /// Could not establish the connection.
    #[error("connection failed: {0}")]
    Connect(String),
    /// Server rejected or failed a query.
    #[error("{0}")]
    Query(String),
    /// Handle was already released.
    #[error("conn closed")]
    Closed,
}

/// Text result set of a single query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl QueryResult {
    /// Builds a result from string literals; `None` cells model SQL NULL.
    pub fn from_rows(columns: &[&str], rows: Vec<Vec<Option<&str>>>) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: rows
                .into_iter()
                .map(|r| r.into_iter().map(|v| v.map(str::to_string)).collect())
                .collect(),
        }
    }

    /// First cell of the first row, if any.
    pub fn scalar(&self) -> Option<String> {
        self.rows.first().and_then(|r| r.first().cloned().flatten())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value of the named column in `row`, `None` for SQL NULL or an unknown column.
    pub fn get<'a>(&self, row: &'a [Option<String>], column: &str) -> Option<&'a str> {
        let idx = self.columns.iter().position(|c| c == column)?;
        row.get(idx)?.as_deref()
    }
}

/// Capabilities the monitor needs from the server connection.
///
/// Only one logical operation uses the handle at a time; the scheduler owns it
/// and lends it to sources and the session controller in turn.
pub trait Connection: Send {
    /// Executes a query and returns all rows as text.
    fn query(&mut self, sql: &str) -> Result<QueryResult, DbError>;

    /// Executes a query expected to return a single value.
    fn query_scalar(&mut self, sql: &str) -> Result<Option<String>, DbError> {
        Ok(self.query(sql)?.scalar())
    }

    /// Whether the handle has been released or lost.
    fn is_closed(&self) -> bool;

    /// Releases the handle. Further calls fail with [`DbError::Closed`].
    fn close(&mut self);

    /// `server_version_num` of the monitored server (e.g. 160002).
    fn server_version_num(&self) -> i32;
}

/// SSL negotiation mode, a subset of libpq's `sslmode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SslMode {
    Disable,
    #[default]
    Prefer,
    Require,
}

impl SslMode {
    fn as_str(self) -> &'static str {
        match self {
            SslMode::Disable => "disable",
            SslMode::Prefer => "prefer",
            SslMode::Require => "require",
        }
    }
}

/// Connection parameters for the monitored server.
#[derive(Debug, Clone)]
pub struct ConnectParams {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: Option<String>,
    pub dbname: String,
    pub sslmode: SslMode,
}

impl ConnectParams {
    /// libpq-style `key=value` connection string.
    pub fn connection_string(&self) -> String {
        let mut s = format!(
            "host={} port={} user={} dbname={} sslmode={} application_name=pgtop",
            self.host,
            self.port,
            self.user,
            self.dbname,
            self.sslmode.as_str()
        );
        if let Some(password) = self.password.as_deref().filter(|p| !p.is_empty()) {
            s.push_str(&format!(" password={}", password));
        }
        s
    }

    /// True when the server shares this machine, so OS counters can be read
    /// from local pseudo-files instead of the helper schema.
    pub fn is_local(&self) -> bool {
        self.host.starts_with('/')
            || matches!(self.host.as_str(), "localhost" | "127.0.0.1" | "::1")
    }
}

/// [`Connection`] backed by a synchronous `postgres::Client`.
pub struct PgConnection {
    client: Option<Client>,
    server_version_num: i32,
}

impl PgConnection {
    /// Connects and detects the server version.
    pub fn connect(params: &ConnectParams) -> Result<Self, DbError> {
        let conn_str = params.connection_string();
        let client = match params.sslmode {
            SslMode::Disable => Client::connect(&conn_str, NoTls),
            SslMode::Prefer | SslMode::Require => {
                let connector = TlsConnector::builder()
                    .danger_accept_invalid_certs(true)
                    .build()
                    .map_err(|e| DbError::Connect(e.to_string()))?;
                Client::connect(&conn_str, MakeTlsConnector::new(connector))
            }
        }
        .map_err(|e| DbError::Connect(format_postgres_error(&e)))?;

        let mut conn = Self {
            client: Some(client),
            server_version_num: 0,
        };
        conn.server_version_num = conn
            .query_scalar("SHOW server_version_num")?
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);

        info!(
            host = %params.host,
            port = params.port,
            version = conn.server_version_num,
            "connected to PostgreSQL"
        );
        Ok(conn)
    }
}

impl Connection for PgConnection {
    fn query(&mut self, sql: &str) -> Result<QueryResult, DbError> {
        let client = self.client.as_mut().ok_or(DbError::Closed)?;
        let messages = client
            .simple_query(sql)
            .map_err(|e| DbError::Query(format_postgres_error(&e)))?;

        let mut result = QueryResult::default();
        for message in messages {
            if let SimpleQueryMessage::Row(row) = message {
                if result.columns.is_empty() {
                    result.columns = row.columns().iter().map(|c| c.name().to_string()).collect();
                }
                result
                    .rows
                    .push((0..row.len()).map(|i| row.get(i).map(str::to_string)).collect());
            }
        }
        Ok(result)
    }

    fn is_closed(&self) -> bool {
        self.client.as_ref().is_none_or(|c| c.is_closed())
    }

    fn close(&mut self) {
        if let Some(client) = self.client.take() {
            if let Err(e) = client.close() {
                debug!(error = %e, "error while closing connection");
            }
            info!("connection released");
        }
    }

    fn server_version_num(&self) -> i32 {
        self.server_version_num
    }
}

/// Formats a PostgreSQL error for the status line.
pub(crate) fn format_postgres_error(e: &postgres::Error) -> String {
    if let Some(db_error) = e.as_db_error() {
        format!("{}: {}", db_error.severity(), db_error.message())
    } else {
        let msg = e.to_string();
        if msg.contains("Connection refused") {
            "connection refused".to_string()
        } else if msg.contains("password authentication failed") {
            "password authentication failed".to_string()
        } else {
            msg
        }
    }
}
