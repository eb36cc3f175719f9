//! Session classification and cancel/terminate dispatch.
//!
//! Every outcome, including refusals, ends up as a single `Signals: ...` line
//! for the status bar; nothing here is fatal to the monitor.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::collector::pg_collector::queries::BACKEND_PID_QUERY;
use crate::collector::pg_collector::{SessionRecord, read_sessions};
use crate::config::{Config, View};
use crate::connection::{Connection, DbError};

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// State group of a session. Every session falls into exactly one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    Idle,
    Active,
    IdleInTransaction,
    Waiting,
    Others,
}

impl Group {
    /// Display order of groups in the mask string.
    pub const ORDER: [Group; 5] = [
        Group::Idle,
        Group::IdleInTransaction,
        Group::Active,
        Group::Waiting,
        Group::Others,
    ];

    pub fn bit(self) -> u8 {
        match self {
            Group::Active => 1,
            Group::Idle => 2,
            Group::IdleInTransaction => 4,
            Group::Waiting => 8,
            Group::Others => 16,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Group::Idle => "idle",
            Group::IdleInTransaction => "idle_xact",
            Group::Active => "active",
            Group::Waiting => "waiting",
            Group::Others => "others",
        }
    }

    /// Answer letter used when building a mask.
    fn from_letter(c: char) -> Option<Group> {
        match c {
            'i' => Some(Group::Idle),
            'x' => Some(Group::IdleInTransaction),
            'a' => Some(Group::Active),
            'w' => Some(Group::Waiting),
            'o' => Some(Group::Others),
            _ => None,
        }
    }
}

/// Classifies a session. A session blocked on a lock is `Waiting` whatever
/// its state; unknown or empty states are `Others`.
pub fn classify(session: &SessionRecord) -> Group {
    if session.wait_event_type == "Lock" {
        return Group::Waiting;
    }
    match session.state.as_str() {
        "idle" => Group::Idle,
        "active" => Group::Active,
        "idle in transaction" | "idle in transaction (aborted)" => Group::IdleInTransaction,
        _ => Group::Others,
    }
}

/// Session counts per group, for the header line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivitySummary {
    pub total: usize,
    pub idle: usize,
    pub idle_xact: usize,
    pub active: usize,
    pub waiting: usize,
    pub others: usize,
}

impl ActivitySummary {
    pub fn from_sessions(sessions: &[SessionRecord]) -> Self {
        let mut s = Self {
            total: sessions.len(),
            ..Self::default()
        };
        for session in sessions {
            match classify(session) {
                Group::Idle => s.idle += 1,
                Group::IdleInTransaction => s.idle_xact += 1,
                Group::Active => s.active += 1,
                Group::Waiting => s.waiting += 1,
                Group::Others => s.others += 1,
            }
        }
        s
    }
}

impl fmt::Display for ActivitySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "activity:{:3} total,{:3} idle,{:3} idle_in_xact,{:3} active,{:3} waiting,{:3} others",
            self.total, self.idle, self.idle_xact, self.active, self.waiting, self.others
        )
    }
}

// ---------------------------------------------------------------------------
// Mask
// ---------------------------------------------------------------------------

/// Union of groups targeted by a group signal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcMask(u8);

impl ProcMask {
    pub const EMPTY: ProcMask = ProcMask(0);

    /// Builds a mask from answer letters (`i`, `x`, `a`, `w`, `o`); other
    /// characters are ignored.
    pub fn from_answer(answer: &str) -> Self {
        answer
            .chars()
            .filter_map(Group::from_letter)
            .fold(Self::EMPTY, |mask, g| mask.with(g))
    }

    pub fn with(self, group: Group) -> Self {
        ProcMask(self.0 | group.bit())
    }

    pub fn union(self, other: ProcMask) -> Self {
        ProcMask(self.0 | other.0)
    }

    pub fn contains(self, group: Group) -> bool {
        self.0 & group.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

impl fmt::Display for ProcMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Mask: ")?;
        if self.is_empty() {
            return f.write_str("empty ");
        }
        for group in Group::ORDER.iter().filter(|g| self.contains(**g)) {
            write!(f, "{} ", group.name())?;
        }
        Ok(())
    }
}

/// Replaces the configured mask with the one described by `answer` and
/// returns the rendered mask.
pub fn set_mask(config: &mut Config, answer: &str) -> String {
    config.mask = ProcMask::from_answer(answer);
    debug!(mask = config.mask.bits(), "process mask set");
    config.mask.to_string()
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalMode {
    /// Abort the current statement (`pg_cancel_backend`).
    Cancel,
    /// Drop the connection (`pg_terminate_backend`).
    Terminate,
}

impl SignalMode {
    fn function(self) -> &'static str {
        match self {
            SignalMode::Cancel => "pg_cancel_backend",
            SignalMode::Terminate => "pg_terminate_backend",
        }
    }

    fn past_tense(self) -> &'static str {
        match self {
            SignalMode::Cancel => "cancelled",
            SignalMode::Terminate => "terminated",
        }
    }
}

impl FromStr for SignalMode {
    type Err = SignalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cancel" => Ok(SignalMode::Cancel),
            "terminate" => Ok(SignalMode::Terminate),
            _ => Err(SignalError::UnknownMode),
        }
    }
}

impl fmt::Display for SignalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SignalMode::Cancel => "cancel",
            SignalMode::Terminate => "terminate",
        })
    }
}

/// Result of signalling one backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalOutcome {
    Succeeded,
    /// No such backend any more; terminate is idempotent.
    AlreadyGone,
    /// The server refused (e.g. insufficient privileges).
    Rejected(String),
}

/// Reasons a signal request is not carried out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignalError {
    #[error("invalid target '{0}', expected a process id")]
    InvalidTarget(String),
    #[error("unknown mode")]
    UnknownMode,
    #[error("process mask is empty")]
    EmptyMask,
    #[error("sending signals allowed in {} only", View::Activity.title())]
    WrongView,
    #[error("conn closed")]
    ConnectionClosed,
    #[error("{0}")]
    Query(String),
}

impl From<DbError> for SignalError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::Closed => SignalError::ConnectionClosed,
            other => SignalError::Query(other.to_string()),
        }
    }
}

/// Aggregated result of a group signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSummary {
    pub mode: SignalMode,
    pub signalled: usize,
    pub already_gone: usize,
    /// Pid and server message of every refused target.
    pub rejected: Vec<(i32, String)>,
}

impl GroupSummary {
    fn new(mode: SignalMode) -> Self {
        Self {
            mode,
            signalled: 0,
            already_gone: 0,
            rejected: Vec::new(),
        }
    }

    fn record(&mut self, pid: i32, outcome: SignalOutcome) {
        match outcome {
            SignalOutcome::Succeeded => self.signalled += 1,
            SignalOutcome::AlreadyGone => self.already_gone += 1,
            SignalOutcome::Rejected(reason) => self.rejected.push((pid, reason)),
        }
    }

    pub fn attempted(&self) -> usize {
        self.signalled + self.already_gone + self.rejected.len()
    }
}

impl fmt::Display for GroupSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.attempted() == 0 {
            return f.write_str("Signals: do nothing, nothing matched");
        }
        write!(
            f,
            "Signals: {} {} processes",
            self.mode.past_tense(),
            self.signalled
        )?;
        if self.already_gone > 0 {
            write!(f, ", {} already gone", self.already_gone)?;
        }
        if let Some((_, reason)) = self.rejected.first() {
            write!(f, ", {} rejected ({})", self.rejected.len(), reason)?;
        }
        Ok(())
    }
}

fn parse_target(target: &str) -> Result<i32, SignalError> {
    match target.trim().parse::<i32>() {
        Ok(pid) if pid > 0 => Ok(pid),
        _ => Err(SignalError::InvalidTarget(target.trim().to_string())),
    }
}

/// Sends one signal function call. Server errors become `Rejected`; a lost
/// connection is returned as an error so callers stop dispatching.
fn dispatch(conn: &mut dyn Connection, mode: SignalMode, pid: i32) -> Result<SignalOutcome, SignalError> {
    let sql = format!("SELECT {}({})", mode.function(), pid);
    match conn.query_scalar(&sql) {
        Ok(Some(v)) if v == "t" => Ok(SignalOutcome::Succeeded),
        Ok(_) => Ok(SignalOutcome::AlreadyGone),
        Err(DbError::Closed) => Err(SignalError::ConnectionClosed),
        Err(e) => Ok(SignalOutcome::Rejected(e.to_string())),
    }
}

/// Cancels or terminates sessions of the monitored server.
///
/// Holds no session state between calls; the pid of the monitor's own
/// backend is looked up once and then reused.
#[derive(Debug, Default)]
pub struct SessionController {
    own_pid: Option<i32>,
}

impl SessionController {
    pub fn new() -> Self {
        Self::default()
    }

    fn own_pid(&mut self, conn: &mut dyn Connection) -> Result<Option<i32>, SignalError> {
        if self.own_pid.is_none() {
            self.own_pid = conn
                .query_scalar(BACKEND_PID_QUERY)?
                .and_then(|v| v.parse().ok());
        }
        Ok(self.own_pid)
    }

    /// Signals a single backend given as typed by the operator.
    pub fn signal_single(
        &mut self,
        conn: &mut dyn Connection,
        target: &str,
        mode: &str,
    ) -> Result<SignalOutcome, SignalError> {
        let mode: SignalMode = mode.parse()?;
        let pid = parse_target(target)?;
        if conn.is_closed() {
            return Err(SignalError::ConnectionClosed);
        }

        let outcome = dispatch(conn, mode, pid)?;
        info!(pid, %mode, ?outcome, "signal sent");
        Ok(outcome)
    }

    /// Signals every session whose group is in the configured mask and whose
    /// transaction or query is older than the configured minimum age.
    ///
    /// The monitor's own backend is never signalled. A refused target does not
    /// stop the others.
    pub fn signal_group(
        &mut self,
        conn: &mut dyn Connection,
        config: &Config,
        mode: &str,
    ) -> Result<GroupSummary, SignalError> {
        if config.view != View::Activity {
            return Err(SignalError::WrongView);
        }
        if config.mask.is_empty() {
            return Err(SignalError::EmptyMask);
        }
        let mode: SignalMode = mode.parse()?;
        if conn.is_closed() {
            return Err(SignalError::ConnectionClosed);
        }

        let own_pid = self.own_pid(conn)?;
        let min_age = config.query.min_age_secs();
        let targets: Vec<i32> = read_sessions(conn)?
            .iter()
            .filter(|s| Some(s.pid) != own_pid)
            .filter(|s| config.mask.contains(classify(s)))
            .filter(|s| s.older_than(min_age))
            .map(|s| s.pid)
            .collect();

        let mut summary = GroupSummary::new(mode);
        for pid in targets {
            let outcome = dispatch(conn, mode, pid)?;
            if let SignalOutcome::Rejected(reason) = &outcome {
                warn!(pid, %mode, reason = %reason, "signal rejected");
            }
            summary.record(pid, outcome);
        }

        info!(
            %mode,
            mask = config.mask.bits(),
            signalled = summary.signalled,
            rejected = summary.rejected.len(),
            "group signal finished"
        );
        Ok(summary)
    }

    /// [`SessionController::signal_single`] rendered as a status line.
    pub fn single_status(&mut self, conn: &mut dyn Connection, target: &str, mode: &str) -> String {
        match self.signal_single(conn, target, mode) {
            Ok(SignalOutcome::Succeeded | SignalOutcome::AlreadyGone) => "Signals: done".to_string(),
            Ok(SignalOutcome::Rejected(reason)) => format!("Signals: do nothing, {}", reason),
            Err(e) => error_status(&e),
        }
    }

    /// [`SessionController::signal_group`] rendered as a status line.
    pub fn group_status(&mut self, conn: &mut dyn Connection, config: &Config, mode: &str) -> String {
        match self.signal_group(conn, config, mode) {
            Ok(summary) => summary.to_string(),
            Err(e) => error_status(&e),
        }
    }
}

fn error_status(e: &SignalError) -> String {
    match e {
        SignalError::WrongView => format!("Signals: {}", e),
        _ => format!("Signals: do nothing, {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::pg_collector::fixtures;
    use crate::connection::mock::MockConnection;

    fn session(state: &str, wait: &str) -> SessionRecord {
        SessionRecord {
            pid: 1,
            state: state.to_string(),
            wait_event_type: wait.to_string(),
            ..Default::default()
        }
    }

    fn activity_config(mask: &str) -> Config {
        let mut config = Config::default();
        config.view = View::Activity;
        config.mask = ProcMask::from_answer(mask);
        config
    }

    /// Server with a backend per `(pid, state, wait)`; the monitor itself is pid 1000.
    fn server(rows: &[(&str, &str, &str)]) -> MockConnection {
        let mut conn = MockConnection::new();
        let rows: Vec<_> = rows.iter().map(|(p, s, w)| (*p, *s, *w, "5")).collect();
        conn.respond("FROM pg_stat_activity", fixtures::sessions(&rows));
        for (pid, _, _, _) in &rows {
            conn.add_backend(pid.parse().unwrap());
        }
        conn
    }

    // --- classification ---

    #[test]
    fn classify_states() {
        assert_eq!(classify(&session("idle", "")), Group::Idle);
        assert_eq!(classify(&session("active", "")), Group::Active);
        assert_eq!(classify(&session("idle in transaction", "")), Group::IdleInTransaction);
        assert_eq!(
            classify(&session("idle in transaction (aborted)", "")),
            Group::IdleInTransaction
        );
        assert_eq!(classify(&session("fastpath function call", "")), Group::Others);
        assert_eq!(classify(&session("disabled", "")), Group::Others);
        assert_eq!(classify(&session("", "")), Group::Others);
    }

    #[test]
    fn classify_lock_wait_wins() {
        assert_eq!(classify(&session("active", "Lock")), Group::Waiting);
        assert_eq!(classify(&session("active", "IO")), Group::Active);
    }

    #[test]
    fn activity_summary_counts_groups() {
        let sessions = vec![
            session("idle", ""),
            session("idle", ""),
            session("active", "Lock"),
            session("idle in transaction", ""),
        ];
        let s = ActivitySummary::from_sessions(&sessions);
        assert_eq!(s.total, 4);
        assert_eq!(s.idle, 2);
        assert_eq!(s.waiting, 1);
        assert_eq!(s.idle_xact, 1);
        assert!(s.to_string().starts_with("activity:  4 total,  2 idle"));
    }

    // --- mask ---

    #[test]
    fn mask_from_answer() {
        let cases = [
            ("", 0),
            ("i", 2),
            ("ix", 6),
            ("aw", 9),
            ("iax", 7),
            ("aox", 21),
            ("wixa", 15),
            ("woix", 30),
            ("iowax", 31),
        ];
        for (answer, want) in cases {
            assert_eq!(ProcMask::from_answer(answer).bits(), want, "answer {answer:?}");
        }
    }

    #[test]
    fn mask_rendering() {
        let cases = [
            (0, "Mask: empty "),
            (2, "Mask: idle "),
            (6, "Mask: idle idle_xact "),
            (7, "Mask: idle idle_xact active "),
            (15, "Mask: idle idle_xact active waiting "),
            (31, "Mask: idle idle_xact active waiting others "),
        ];
        for (bits, want) in cases {
            assert_eq!(ProcMask(bits).to_string(), want);
        }
    }

    #[test]
    fn mask_union_is_order_independent() {
        let stepwise = ProcMask::EMPTY
            .with(Group::Idle)
            .with(Group::Active)
            .union(ProcMask::from_answer("x"));
        let at_once = ProcMask::from_answer("xai");
        assert_eq!(stepwise, at_once);
        assert_eq!(stepwise.to_string(), "Mask: idle idle_xact active ");
    }

    #[test]
    fn set_mask_replaces_and_renders() {
        let mut config = Config::default();
        config.mask = ProcMask::from_answer("w");
        assert_eq!(set_mask(&mut config, "ix"), "Mask: idle idle_xact ");
        assert_eq!(config.mask.bits(), 6);
        assert_eq!(set_mask(&mut config, ""), "Mask: empty ");
    }

    // --- single target ---

    #[test]
    fn single_cancel_then_terminate_twice() {
        let mut conn = MockConnection::new();
        conn.add_backend(4242);
        let mut ctl = SessionController::new();

        assert_eq!(ctl.single_status(&mut conn, "4242", "cancel"), "Signals: done");
        assert_eq!(ctl.single_status(&mut conn, "4242", "terminate"), "Signals: done");
        assert!(!conn.is_live(4242));
        assert_eq!(ctl.single_status(&mut conn, "4242", "terminate"), "Signals: done");
        assert_eq!(
            ctl.signal_single(&mut conn, "4242", "terminate"),
            Ok(SignalOutcome::AlreadyGone)
        );
    }

    #[test]
    fn single_invalid_target_makes_no_call() {
        let mut conn = MockConnection::new();
        let mut ctl = SessionController::new();
        for target in ["invalid", "", "-5", "0", "12abc"] {
            assert!(matches!(
                ctl.signal_single(&mut conn, target, "terminate"),
                Err(SignalError::InvalidTarget(_))
            ));
        }
        assert!(
            ctl.single_status(&mut conn, "invalid", "terminate")
                .starts_with("Signals: do nothing, invalid target 'invalid'")
        );
        assert!(conn.log.is_empty());
    }

    #[test]
    fn single_unknown_mode() {
        let mut conn = MockConnection::new();
        let mut ctl = SessionController::new();
        assert_eq!(
            ctl.single_status(&mut conn, "4242", "invalid"),
            "Signals: do nothing, unknown mode"
        );
        assert!(conn.log.is_empty());
    }

    #[test]
    fn single_on_closed_connection() {
        let mut conn = MockConnection::new();
        conn.add_backend(4242);
        conn.close();
        let mut ctl = SessionController::new();
        assert_eq!(
            ctl.single_status(&mut conn, "4242", "cancel"),
            "Signals: do nothing, conn closed"
        );
        assert!(conn.is_live(4242));
    }

    #[test]
    fn single_rejected_by_server() {
        let mut conn = MockConnection::new();
        conn.deny_backend(10);
        let mut ctl = SessionController::new();
        assert_eq!(
            ctl.single_status(&mut conn, "10", "terminate"),
            "Signals: do nothing, ERROR: permission denied to terminate process"
        );
    }

    // --- group ---

    #[test]
    fn group_refuses_outside_activity_view() {
        let mut conn = MockConnection::new();
        let mut ctl = SessionController::new();
        let mut config = activity_config("i");
        config.view = View::Tables;
        for mode in ["cancel", "terminate", "invalid"] {
            assert_eq!(
                ctl.group_status(&mut conn, &config, mode),
                "Signals: sending signals allowed in pg_stat_activity only"
            );
        }
        config.mask = ProcMask::EMPTY;
        assert_eq!(ctl.signal_group(&mut conn, &config, "cancel"), Err(SignalError::WrongView));
        assert!(conn.log.is_empty());
    }

    #[test]
    fn group_refuses_empty_mask() {
        let mut conn = MockConnection::new();
        let mut ctl = SessionController::new();
        let config = activity_config("");
        for mode in ["cancel", "terminate"] {
            assert_eq!(
                ctl.group_status(&mut conn, &config, mode),
                "Signals: do nothing, process mask is empty"
            );
        }
    }

    #[test]
    fn group_unknown_mode() {
        let mut conn = MockConnection::new();
        let mut ctl = SessionController::new();
        assert_eq!(
            ctl.group_status(&mut conn, &activity_config("i"), "invalid"),
            "Signals: do nothing, unknown mode"
        );
        assert!(conn.log.is_empty());
    }

    #[test]
    fn group_terminates_matching_sessions_only() {
        let mut conn = server(&[
            ("101", "idle", ""),
            ("102", "active", ""),
            ("103", "idle in transaction", ""),
            ("104", "active", "Lock"),
            ("1000", "idle", ""),
        ]);
        let mut ctl = SessionController::new();
        let status = ctl.group_status(&mut conn, &activity_config("ix"), "terminate");

        assert_eq!(status, "Signals: terminated 2 processes");
        assert!(!conn.is_live(101));
        assert!(conn.is_live(102));
        assert!(!conn.is_live(103));
        assert!(conn.is_live(104));
        // Own backend is never a target.
        assert!(conn.is_live(1000));
    }

    #[test]
    fn group_skips_own_backend() {
        let rows = [("101", "idle", "", "5"), ("102", "idle", "", "5")];
        let mut conn = MockConnection::new().with_backend_pid(101);
        conn.respond("FROM pg_stat_activity", fixtures::sessions(&rows));
        conn.add_backend(101);
        conn.add_backend(102);
        let mut ctl = SessionController::new();

        let summary = ctl.signal_group(&mut conn, &activity_config("i"), "terminate").unwrap();
        assert_eq!(summary.signalled, 1);
        assert!(conn.is_live(101));
        assert!(!conn.is_live(102));
    }

    #[test]
    fn group_cancel_reports_cancelled() {
        let mut conn = server(&[("101", "active", ""), ("102", "active", "")]);
        let mut ctl = SessionController::new();
        let status = ctl.group_status(&mut conn, &activity_config("a"), "cancel");
        assert!(status.contains("Signals: cancelled"), "{status}");
        assert_eq!(conn.signal_calls(), 2);
    }

    #[test]
    fn group_continues_after_rejection() {
        let mut conn = server(&[("101", "idle", ""), ("102", "idle", ""), ("103", "idle", "")]);
        conn.deny_backend(102);
        let mut ctl = SessionController::new();

        let summary = ctl.signal_group(&mut conn, &activity_config("i"), "terminate").unwrap();
        assert_eq!(summary.signalled, 2);
        assert_eq!(summary.rejected.len(), 1);
        assert_eq!(summary.rejected[0].0, 102);
        assert_eq!(
            summary.to_string(),
            "Signals: terminated 2 processes, 1 rejected (ERROR: permission denied to terminate process)"
        );
    }

    #[test]
    fn group_counts_already_gone() {
        let mut conn = server(&[("101", "idle", ""), ("102", "idle", "")]);
        let mut ctl = SessionController::new();
        ctl.signal_single(&mut conn, "102", "terminate").unwrap();

        let summary = ctl.signal_group(&mut conn, &activity_config("i"), "terminate").unwrap();
        assert_eq!(summary.signalled, 1);
        assert_eq!(summary.already_gone, 1);
        assert_eq!(summary.to_string(), "Signals: terminated 1 processes, 1 already gone");
    }

    #[test]
    fn group_respects_min_age() {
        let mut conn = server(&[("101", "idle", "")]);
        let mut config = activity_config("i");
        config.query.set_min_age("00:01:00").unwrap();
        let mut ctl = SessionController::new();
        assert_eq!(
            ctl.group_status(&mut conn, &config, "terminate"),
            "Signals: do nothing, nothing matched"
        );
        assert!(conn.is_live(101));
    }

    #[test]
    fn group_on_closed_connection() {
        let mut conn = server(&[("101", "idle", "")]);
        conn.close();
        let mut ctl = SessionController::new();
        assert_eq!(
            ctl.group_status(&mut conn, &activity_config("i"), "cancel"),
            "Signals: do nothing, conn closed"
        );
    }
}
