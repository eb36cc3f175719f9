//! In-memory stand-in for the monitored server, used by unit tests.

use std::collections::HashSet;

use super::{Connection, DbError, QueryResult};

/// Canned-response connection.
///
/// Queries are matched by substring against registered responses, in
/// registration order. `pg_cancel_backend`/`pg_terminate_backend` calls are
/// interpreted against the set of live backend pids: terminate removes the
/// pid, a missing pid answers `f`, a denied pid fails with an error.
#[derive(Debug)]
pub struct MockConnection {
    responses: Vec<(String, Result<QueryResult, String>)>,
    live_pids: HashSet<i32>,
    denied_pids: HashSet<i32>,
    backend_pid: i32,
    version: i32,
    closed: bool,
    /// Every statement executed, in order.
    pub log: Vec<String>,
}

impl MockConnection {
    pub fn new() -> Self {
        Self {
            responses: Vec::new(),
            live_pids: HashSet::new(),
            denied_pids: HashSet::new(),
            backend_pid: 1000,
            version: 160000,
            closed: false,
            log: Vec::new(),
        }
    }

    pub fn with_version(mut self, version: i32) -> Self {
        self.version = version;
        self
    }

    pub fn with_backend_pid(mut self, pid: i32) -> Self {
        self.backend_pid = pid;
        self
    }

    pub fn respond(&mut self, needle: &str, result: QueryResult) {
        self.responses.push((needle.to_string(), Ok(result)));
    }

    pub fn fail(&mut self, needle: &str, message: &str) {
        self.responses
            .push((needle.to_string(), Err(message.to_string())));
    }

    pub fn add_backend(&mut self, pid: i32) {
        self.live_pids.insert(pid);
    }

    pub fn deny_backend(&mut self, pid: i32) {
        self.live_pids.insert(pid);
        self.denied_pids.insert(pid);
    }

    pub fn is_live(&self, pid: i32) -> bool {
        self.live_pids.contains(&pid)
    }

    /// Number of signal function calls issued so far.
    pub fn signal_calls(&self) -> usize {
        self.log
            .iter()
            .filter(|q| q.contains("pg_cancel_backend") || q.contains("pg_terminate_backend"))
            .count()
    }

    fn signal(&mut self, sql: &str) -> Option<Result<Option<String>, DbError>> {
        let (terminate, rest) = if let Some(rest) = sql.strip_prefix("SELECT pg_terminate_backend(") {
            (true, rest)
        } else if let Some(rest) = sql.strip_prefix("SELECT pg_cancel_backend(") {
            (false, rest)
        } else {
            return None;
        };
        let pid: i32 = rest.trim_end_matches(')').parse().ok()?;
        if self.denied_pids.contains(&pid) {
            return Some(Err(DbError::Query(
                "ERROR: permission denied to terminate process".to_string(),
            )));
        }
        let live = if terminate {
            self.live_pids.remove(&pid)
        } else {
            self.live_pids.contains(&pid)
        };
        Some(Ok(Some(if live { "t" } else { "f" }.to_string())))
    }
}

impl Connection for MockConnection {
    fn query(&mut self, sql: &str) -> Result<QueryResult, DbError> {
        if self.closed {
            return Err(DbError::Closed);
        }
        self.log.push(sql.to_string());
        if sql == "SELECT pg_backend_pid()" {
            return Ok(QueryResult::from_rows(
                &["pg_backend_pid"],
                vec![vec![Some(self.backend_pid.to_string().as_str())]],
            ));
        }
        match self.responses.iter().find(|(needle, _)| sql.contains(needle.as_str())) {
            Some((_, Ok(result))) => Ok(result.clone()),
            Some((_, Err(msg))) => Err(DbError::Query(msg.clone())),
            None => Ok(QueryResult::default()),
        }
    }

    fn query_scalar(&mut self, sql: &str) -> Result<Option<String>, DbError> {
        if self.closed {
            return Err(DbError::Closed);
        }
        if let Some(result) = self.signal(sql) {
            self.log.push(sql.to_string());
            return result;
        }
        Ok(self.query(sql)?.scalar())
    }

    fn is_closed(&self) -> bool {
        self.closed
    }

    fn close(&mut self) {
        self.closed = true;
    }

    fn server_version_num(&self) -> i32 {
        self.version
    }
}
