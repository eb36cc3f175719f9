//! Sources backed by the monitored PostgreSQL server.
//!
//! - `pg_stat_*` statistics views, one at a time (the selected view)
//! - `pg_stat_activity` sessions, for classification and signalling
//! - OS counters of a remote host via the `pgcenter` helper schema
//!
//! All queries are read-only and go through the scheduler's connection.

mod activity;
pub(crate) mod queries;
mod stats;
mod system;

pub use activity::{SessionRecord, read_sessions};
pub use stats::{StatRow, StatViewSource};
pub use system::{RemoteCpuStat, RemoteDiskstats};

#[cfg(test)]
pub(crate) use activity::fixtures;
