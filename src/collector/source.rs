//! Counter sources and the snapshots they produce.

use std::collections::BTreeMap;
use std::time::Instant;

use chrono::{DateTime, Local};
use thiserror::Error;

use crate::connection::{Connection, DbError};

/// Errors raised while taking a snapshot.
///
/// All of them are local to one sampling tick: the scheduler keeps the
/// previous snapshot of the failing source and reports the message.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Counter data did not have the expected shape.
    #[error("{origin} bad content: {reason}, line: {line}")]
    Format {
        origin: String,
        line: String,
        reason: String,
    },
    #[error("{path}: {error}")]
    Io {
        path: String,
        #[source]
        error: std::io::Error,
    },
    #[error(transparent)]
    Db(#[from] DbError),
}

impl SourceError {
    pub fn format(origin: &str, line: &str, reason: impl Into<String>) -> Self {
        SourceError::Format {
            origin: origin.to_string(),
            line: line.to_string(),
            reason: reason.into(),
        }
    }
}

/// One timestamped read of every tracked entity of a counter family.
#[derive(Debug, Clone)]
pub struct Snapshot<K: Ord, R> {
    pub entries: BTreeMap<K, R>,
    /// Monotonic instant the snapshot was taken.
    pub taken_at: Instant,
    pub wall_time: DateTime<Local>,
    /// Host uptime in clock ticks, when the source exposes one.
    pub uptime_ticks: Option<f64>,
}

impl<K: Ord, R> Snapshot<K, R> {
    pub fn new(entries: BTreeMap<K, R>, uptime_ticks: Option<f64>) -> Self {
        Self {
            entries,
            taken_at: Instant::now(),
            wall_time: Local::now(),
            uptime_ticks,
        }
    }

    /// Snapshot of a family that is absent on the monitored machine.
    pub fn empty() -> Self {
        Self::new(BTreeMap::new(), None)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Elapsed interval between `prev` and `self`, in clock ticks.
    ///
    /// Prefers the uptime counters; falls back to the monotonic clock. Never
    /// returns less than one tick.
    pub fn interval_ticks(&self, prev: &Self, ticks_per_second: f64) -> f64 {
        let itv = match (prev.uptime_ticks, self.uptime_ticks) {
            (Some(p), Some(c)) => c - p,
            _ => {
                self.taken_at
                    .saturating_duration_since(prev.taken_at)
                    .as_secs_f64()
                    * ticks_per_second
            }
        };
        if itv > 0.0 { itv } else { 1.0 }
    }
}

/// Producer of snapshots for one counter family.
///
/// Local variants ignore the connection and read OS pseudo-files; remote
/// variants query the monitored server for the same shape of data.
pub trait Source<K: Ord, R>: Send {
    fn name(&self) -> &str;

    fn sample(&mut self, conn: &mut dyn Connection) -> Result<Snapshot<K, R>, SourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn snap(uptime: Option<f64>) -> Snapshot<u32, u64> {
        Snapshot::new(BTreeMap::from([(1, 10)]), uptime)
    }

    #[test]
    fn interval_from_uptime() {
        let prev = snap(Some(1000.0));
        let curr = snap(Some(1100.0));
        assert_eq!(curr.interval_ticks(&prev, 100.0), 100.0);
    }

    #[test]
    fn interval_never_below_one_tick() {
        let prev = snap(Some(1000.0));
        let curr = snap(Some(1000.0));
        assert_eq!(curr.interval_ticks(&prev, 100.0), 1.0);
        assert_eq!(prev.interval_ticks(&curr, 100.0), 1.0);
    }

    #[test]
    fn interval_from_monotonic_clock() {
        let prev = snap(None);
        let mut curr = snap(None);
        curr.taken_at = prev.taken_at + Duration::from_secs(2);
        assert!((curr.interval_ticks(&prev, 100.0) - 200.0).abs() < 1e-9);
    }

    #[test]
    fn format_error_message_carries_line() {
        let e = SourceError::format("/proc/diskstats", "8 0 sda x", "wrong number of columns");
        assert_eq!(
            e.to_string(),
            "/proc/diskstats bad content: wrong number of columns, line: 8 0 sda x"
        );
    }
}
