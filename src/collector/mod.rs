//! Counter sources for the host and the monitored server.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          OsSources                           │
//! │  ┌─────────────────────────┐   ┌──────────────────────────┐  │
//! │  │ LocalDiskstats/CpuStat  │   │ RemoteDiskstats/CpuStat  │  │
//! │  │  - /proc/diskstats      │   │  - pgcenter.sys_proc_*   │  │
//! │  │  - /proc/stat, uptime   │   │    (helper schema)       │  │
//! │  └───────────┬─────────────┘   └────────────┬─────────────┘  │
//! │       ┌──────▼──────┐               ┌───────▼──────┐         │
//! │       │  FileSystem │ (trait)       │  Connection  │ (trait) │
//! │       └──────┬──────┘               └──────────────┘         │
//! └──────────────┼───────────────────────────────────────────────┘
//!         ┌──────┴──────┐
//!   ┌─────▼─────┐ ┌─────▼─────┐
//!   │  RealFs   │ │  MockFs   │
//!   └───────────┘ └───────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use pgtop::collector::{OsSources, RealFs};
//!
//! let os = OsSources::local(RealFs::new(), "/proc", 100.0);
//! let snapshot = os.disks.sample(&mut conn)?;
//! ```

#[cfg(test)]
pub mod mock;
pub mod pg_collector;
pub mod procfs;
pub mod source;
pub mod traits;

pub use pg_collector::{RemoteCpuStat, RemoteDiskstats, SessionRecord, StatViewSource};
pub use procfs::{CpuId, CpuStat, DeviceId, DiskStats, LocalCpuStat, LocalDiskstats};
pub use source::{Snapshot, Source, SourceError};
pub use traits::{FileSystem, RealFs};

use std::path::Path;

/// Host-level sources: block devices and CPU.
pub struct OsSources {
    pub disks: Box<dyn Source<DeviceId, DiskStats>>,
    pub cpu: Box<dyn Source<CpuId, CpuStat>>,
}

impl OsSources {
    /// Sources reading this machine's pseudo-files.
    pub fn local<F>(fs: F, proc_path: impl AsRef<Path>, ticks_per_second: f64) -> Self
    where
        F: FileSystem + Clone + 'static,
    {
        let proc_path = proc_path.as_ref();
        Self {
            disks: Box::new(LocalDiskstats::new(fs.clone(), proc_path, ticks_per_second)),
            cpu: Box::new(LocalCpuStat::new(fs, proc_path)),
        }
    }

    /// Sources querying the helper schema on the monitored server.
    pub fn remote(ticks_per_second: f64) -> Self {
        Self {
            disks: Box::new(RemoteDiskstats::new(ticks_per_second)),
            cpu: Box::new(RemoteCpuStat::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::MockFs;
    use crate::connection::mock::MockConnection;

    #[test]
    fn local_sources_read_files() {
        let mut os = OsSources::local(MockFs::typical_system(), "/proc", 100.0);
        let mut conn = MockConnection::new();
        assert_eq!(os.disks.sample(&mut conn).unwrap().len(), 3);
        assert_eq!(os.cpu.sample(&mut conn).unwrap().len(), 3);
        assert!(conn.log.is_empty());
    }

    #[test]
    fn consecutive_local_samples_diff_to_rates() {
        let mut conn = MockConnection::new();
        let mut before = OsSources::local(MockFs::typical_system(), "/proc", 100.0);
        let mut after = OsSources::local(MockFs::typical_system_next_second(), "/proc", 100.0);
        let prev = before.disks.sample(&mut conn).unwrap();
        let curr = after.disks.sample(&mut conn).unwrap();

        let metrics = crate::rates::diff_snapshots(&crate::rates::DiskFamily, &prev, &curr, 100.0);
        let sda = metrics.iter().find(|m| m.device == "sda").unwrap();
        assert!((sda.rps - 100.0).abs() < 1e-6);
        assert_eq!(sda.wps, 0.0);
        let sda1 = metrics.iter().find(|m| m.device == "sda1").unwrap();
        assert_eq!(sda1.rps, 0.0);
    }

    #[test]
    fn remote_sources_query_server() {
        let mut os = OsSources::remote(100.0);
        let mut conn = MockConnection::new();
        // No helper schema: the probe answers nothing, so the snapshot is empty.
        assert!(os.disks.sample(&mut conn).unwrap().is_empty());
        assert!(!conn.log.is_empty());
    }
}
