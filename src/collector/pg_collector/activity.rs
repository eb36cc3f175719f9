//! pg_stat_activity sessions used for classification and signalling.

use tracing::debug;

use super::queries::build_sessions_query;
use crate::connection::{Connection, DbError, QueryResult};

/// One backend session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionRecord {
    pub pid: i32,
    /// `state` column: idle, active, idle in transaction, ...; empty when NULL.
    pub state: String,
    /// `Lock` when the session is blocked on a heavyweight lock.
    pub wait_event_type: String,
    pub usename: String,
    pub datname: String,
    /// Seconds since the transaction started, `None` outside a transaction.
    pub xact_age: Option<f64>,
    /// Seconds since the current or last query started.
    pub query_age: Option<f64>,
    pub query: String,
}

impl SessionRecord {
    /// True when the transaction or the query is strictly older than `secs`.
    pub fn older_than(&self, secs: u64) -> bool {
        let threshold = secs as f64;
        self.xact_age.is_some_and(|a| a > threshold) || self.query_age.is_some_and(|a| a > threshold)
    }

    fn from_row(result: &QueryResult, row: &[Option<String>]) -> Option<Self> {
        let text = |name: &str| result.get(row, name).unwrap_or_default().to_string();
        let age = |name: &str| result.get(row, name).and_then(|v| v.parse().ok());

        Some(Self {
            pid: result.get(row, "pid")?.parse().ok()?,
            state: text("state"),
            wait_event_type: text("wait_event_type"),
            usename: text("usename"),
            datname: text("datname"),
            xact_age: age("xact_age"),
            query_age: age("query_age"),
            query: text("query"),
        })
    }
}

/// Reads every client session of the server.
///
/// Rows without a usable pid are skipped.
pub fn read_sessions(conn: &mut dyn Connection) -> Result<Vec<SessionRecord>, DbError> {
    let query = build_sessions_query(conn.server_version_num());
    let result = conn.query(&query)?;

    let sessions: Vec<SessionRecord> = result
        .rows
        .iter()
        .filter_map(|row| SessionRecord::from_row(&result, row))
        .collect();

    debug!(count = sessions.len(), "sessions read");
    Ok(sessions)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::connection::QueryResult;

    pub const COLUMNS: [&str; 8] = [
        "pid",
        "state",
        "wait_event_type",
        "usename",
        "datname",
        "xact_age",
        "query_age",
        "query",
    ];

    /// Result set with one row per `(pid, state, wait_event_type, age)`.
    pub fn sessions(rows: &[(&str, &str, &str, &str)]) -> QueryResult {
        QueryResult::from_rows(
            &COLUMNS,
            rows.iter()
                .map(|(pid, state, wait, age)| {
                    vec![
                        Some(*pid),
                        Some(*state),
                        Some(*wait),
                        Some("app"),
                        Some("db"),
                        Some(*age),
                        Some(*age),
                        Some("select 1"),
                    ]
                })
                .collect(),
        )
    }
}
