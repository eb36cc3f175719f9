//! Sampling/render cycle interleaved with operator commands.
//!
//! The scheduler is the only owner of the server connection. It waits on the
//! command channel with the tick deadline as timeout, so a command interrupts
//! the wait at once; a command already queued when the deadline expires is
//! still served before the tick.

use std::io;
use std::sync::mpsc::{Receiver, RecvTimeoutError, TryRecvError};
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::collector::pg_collector::{StatRow, read_sessions};
use crate::collector::{
    CpuId, CpuStat, DeviceId, DiskStats, OsSources, Snapshot, Source, StatViewSource,
};
use crate::config::{Config, View};
use crate::connection::Connection;
use crate::models::{CpuMetric, DiskMetric, TableRow};
use crate::rates::{CpuFamily, DiskFamily, TableFamily, diff_snapshots, passthrough};
use crate::signal::{self, ActivitySummary, SessionController};
use crate::view::TableViewModel;

/// Delay of the re-sample that follows a baseline tick.
pub const WARMUP: Duration = Duration::from_millis(250);

/// Operator requests accepted by the scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Shutdown,
    /// Fire the next tick now.
    ForceUpdate,
    /// Re-render the latest metrics (prompt change, terminal resize).
    Redraw,
    SwitchView(View),
    SortNext,
    SortPrev,
    /// Replace the process mask from answer letters.
    SetMask(String),
    ShowMask,
    SignalSingle { mode: String, target: String },
    SignalGroup { mode: String },
    SetMinAge(String),
}

/// Everything a display needs for one screen.
#[derive(Debug, Clone)]
pub struct Frame {
    pub wall_time: DateTime<Local>,
    pub view: View,
    pub interval: Duration,
    pub cpu: Vec<CpuMetric>,
    pub disks: Vec<DiskMetric>,
    pub activity: Option<ActivitySummary>,
    pub table: TableViewModel,
}

/// Display collaborator.
pub trait DisplaySink {
    fn render(&mut self, frame: &Frame) -> io::Result<()>;

    /// Shows a one-line message until the next one replaces it.
    fn status(&mut self, message: &str) -> io::Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Sampling,
    Rendering,
    WaitingNextTick,
    ShutDown,
}

/// Latest derived metrics, re-rendered after commands.
#[derive(Debug, Default)]
struct Latest {
    cpu: Vec<CpuMetric>,
    disks: Vec<DiskMetric>,
    activity: Option<ActivitySummary>,
    rows: Vec<TableRow>,
}

/// Owns the connection, the sources and the previous snapshots.
pub struct Scheduler<S: DisplaySink> {
    conn: Box<dyn Connection>,
    config: Config,
    os: OsSources,
    stats: StatViewSource,
    controller: SessionController,
    sink: S,
    commands: Receiver<Command>,
    state: SchedulerState,
    deadline: Instant,

    prev_disks: Option<Snapshot<DeviceId, DiskStats>>,
    prev_cpu: Option<Snapshot<CpuId, CpuStat>>,
    prev_table: Option<Snapshot<String, StatRow>>,
    latest: Latest,
}

/// Samples `source`, reporting a failure to `errors` and keeping the previous
/// snapshot for the next tick.
fn sample_or_keep<K: Ord, R>(
    source: &mut dyn Source<K, R>,
    conn: &mut dyn Connection,
    errors: &mut Vec<String>,
) -> Option<Snapshot<K, R>> {
    match source.sample(conn) {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            warn!(source = %source.name(), error = %e, "sampling failed, previous snapshot kept");
            errors.push(e.to_string());
            None
        }
    }
}

impl<S: DisplaySink> Scheduler<S> {
    pub fn new(
        conn: Box<dyn Connection>,
        config: Config,
        os: OsSources,
        sink: S,
        commands: Receiver<Command>,
    ) -> Self {
        let stats = StatViewSource::new(config.view, &config.query);
        Self {
            conn,
            config,
            os,
            stats,
            controller: SessionController::new(),
            sink,
            commands,
            state: SchedulerState::WaitingNextTick,
            deadline: Instant::now(),
            prev_disks: None,
            prev_cpu: None,
            prev_table: None,
            latest: Latest::default(),
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn connection(&self) -> &dyn Connection {
        self.conn.as_ref()
    }

    /// Runs until a shutdown command arrives or every sender is gone, then
    /// releases the connection.
    pub fn run(&mut self) -> io::Result<()> {
        info!(view = %self.config.view, interval = ?self.config.interval, "scheduler started");
        let result = self.run_loop();
        self.shutdown();
        result
    }

    fn run_loop(&mut self) -> io::Result<()> {
        while self.state != SchedulerState::ShutDown {
            match self.next_command() {
                Some(cmd) => self.handle(cmd)?,
                None => {
                    let baseline = self.tick()?;
                    let wait = if baseline { WARMUP } else { self.config.interval };
                    self.deadline = Instant::now() + wait;
                }
            }
        }
        Ok(())
    }

    /// Next queued command, waiting at most until the tick deadline.
    /// `None` means the deadline expired.
    fn next_command(&mut self) -> Option<Command> {
        match self.commands.try_recv() {
            Ok(cmd) => return Some(cmd),
            Err(TryRecvError::Disconnected) => return Some(Command::Shutdown),
            Err(TryRecvError::Empty) => {}
        }
        let wait = self.deadline.saturating_duration_since(Instant::now());
        match self.commands.recv_timeout(wait) {
            Ok(cmd) => Some(cmd),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => Some(Command::Shutdown),
        }
    }

    /// One sample/diff/render pass. Returns true when some family had no
    /// baseline yet, so the caller schedules a warm-up re-sample.
    fn tick(&mut self) -> io::Result<bool> {
        let started = Instant::now();
        self.state = SchedulerState::Sampling;
        let hz = self.config.ticks_per_second;

        // Sample every source before any diff.
        let mut errors = Vec::new();
        let conn = self.conn.as_mut();
        let disks = sample_or_keep(self.os.disks.as_mut(), conn, &mut errors);
        let cpu = sample_or_keep(self.os.cpu.as_mut(), conn, &mut errors);
        let table = sample_or_keep(&mut self.stats, conn, &mut errors);
        let sessions = match read_sessions(conn) {
            Ok(sessions) => Some(sessions),
            Err(e) => {
                warn!(error = %e, "reading sessions failed");
                errors.push(e.to_string());
                None
            }
        };

        // Only a family that got its first snapshot now needs a quick re-sample;
        // a failing source waits for the regular interval.
        let baseline = (disks.is_some() && self.prev_disks.is_none())
            || (cpu.is_some() && self.prev_cpu.is_none())
            || (table.is_some() && self.prev_table.is_none());

        if let Some(curr) = disks {
            if let Some(prev) = &self.prev_disks {
                self.latest.disks = diff_snapshots(&DiskFamily, prev, &curr, hz);
            }
            self.prev_disks = Some(curr);
        }
        if let Some(curr) = cpu {
            if let Some(prev) = &self.prev_cpu {
                self.latest.cpu = diff_snapshots(&CpuFamily, prev, &curr, hz);
            }
            self.prev_cpu = Some(curr);
        }
        if let Some(curr) = table {
            match (self.config.view.diff_range(), &self.prev_table) {
                (None, _) => self.latest.rows = passthrough(&curr, self.stats.row_order()),
                (Some(diff_cols), Some(prev)) => {
                    self.latest.rows = diff_snapshots(&TableFamily { diff_cols }, prev, &curr, hz);
                }
                (Some(_), None) => self.latest.rows.clear(),
            }
            self.prev_table = Some(curr);
        }
        self.latest.activity = sessions.as_deref().map(ActivitySummary::from_sessions);

        self.state = SchedulerState::Rendering;
        self.render_latest()?;
        if !errors.is_empty() {
            self.sink.status(&errors.join("; "))?;
        }
        self.state = SchedulerState::WaitingNextTick;

        debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            disks = self.latest.disks.len(),
            rows = self.latest.rows.len(),
            baseline,
            "tick finished"
        );
        Ok(baseline)
    }

    fn render_latest(&mut self) -> io::Result<()> {
        let view = self.config.view;
        let frame = Frame {
            wall_time: Local::now(),
            view,
            interval: self.config.interval,
            cpu: self.latest.cpu.clone(),
            disks: self.latest.disks.clone(),
            activity: self.latest.activity,
            table: TableViewModel::build(
                view,
                self.stats.columns(),
                self.latest.rows.clone(),
                self.config.sort(view),
            ),
        };
        self.sink.render(&frame)
    }

    /// Drops the table baseline; the next tick fires at once.
    fn reset_table(&mut self) {
        self.stats.configure(self.config.view, &self.config.query);
        self.prev_table = None;
        self.latest.rows.clear();
        self.deadline = Instant::now();
    }

    fn handle(&mut self, cmd: Command) -> io::Result<()> {
        debug!(?cmd, "command");
        let status = match cmd {
            Command::Shutdown => {
                self.state = SchedulerState::ShutDown;
                return Ok(());
            }
            Command::ForceUpdate => {
                self.deadline = Instant::now();
                None
            }
            Command::Redraw => None,
            Command::SwitchView(view) => {
                if view != self.config.view {
                    self.config.view = view;
                    self.reset_table();
                }
                None
            }
            Command::SortNext => self.shift_sort(true),
            Command::SortPrev => self.shift_sort(false),
            Command::SetMask(answer) => Some(signal::set_mask(&mut self.config, &answer)),
            Command::ShowMask => Some(self.config.mask.to_string()),
            Command::SignalSingle { mode, target } => {
                let status = self
                    .controller
                    .single_status(self.conn.as_mut(), &target, &mode);
                self.deadline = Instant::now();
                Some(status)
            }
            Command::SignalGroup { mode } => {
                let status = self
                    .controller
                    .group_status(self.conn.as_mut(), &self.config, &mode);
                self.deadline = Instant::now();
                Some(status)
            }
            Command::SetMinAge(value) => match self.config.query.set_min_age(&value) {
                Ok(()) => {
                    self.reset_table();
                    Some(format!("Min age: {}", self.config.query.min_age()))
                }
                Err(e) => Some(format!("Min age: do nothing, {}", e)),
            },
        };

        self.render_latest()?;
        if let Some(message) = status {
            self.sink.status(&message)?;
        }
        Ok(())
    }

    fn shift_sort(&mut self, forward: bool) -> Option<String> {
        if self.config.shift_sort(forward) {
            None
        } else {
            Some(format!("Sort: not available in {}", self.config.view))
        }
    }

    /// Drops queued commands unexecuted and releases the connection.
    fn shutdown(&mut self) {
        let dropped = std::iter::from_fn(|| self.commands.try_recv().ok()).count();
        self.conn.close();
        self.state = SchedulerState::ShutDown;
        info!(dropped_commands = dropped, "scheduler stopped");
    }
}
