//! Local sources reading block-device and CPU counters from `/proc`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::parser::{CpuId, CpuStat, DeviceId, DiskStats, parse_cpu_stat, parse_diskstats, parse_uptime};
use crate::collector::source::{Snapshot, Source, SourceError};
use crate::collector::traits::FileSystem;
use crate::connection::Connection;

fn read_file<F: FileSystem>(fs: &F, path: &Path) -> Result<String, SourceError> {
    fs.read_to_string(path).map_err(|error| SourceError::Io {
        path: path.display().to_string(),
        error,
    })
}

fn read_uptime<F: FileSystem>(
    fs: &F,
    proc_path: &Path,
    ticks_per_second: f64,
) -> Result<f64, SourceError> {
    let path = proc_path.join("uptime");
    let content = read_file(fs, &path)?;
    parse_uptime(&content, ticks_per_second)
        .map_err(|e| SourceError::format(&path.display().to_string(), &e.line, e.reason))
}

/// Block-device counters from `<proc>/diskstats`.
pub struct LocalDiskstats<F: FileSystem> {
    fs: F,
    proc_path: PathBuf,
    ticks_per_second: f64,
}

impl<F: FileSystem> LocalDiskstats<F> {
    pub fn new(fs: F, proc_path: impl AsRef<Path>, ticks_per_second: f64) -> Self {
        Self {
            fs,
            proc_path: proc_path.as_ref().to_path_buf(),
            ticks_per_second,
        }
    }
}

impl<F: FileSystem> Source<DeviceId, DiskStats> for LocalDiskstats<F> {
    fn name(&self) -> &str {
        "diskstats"
    }

    fn sample(
        &mut self,
        _conn: &mut dyn Connection,
    ) -> Result<Snapshot<DeviceId, DiskStats>, SourceError> {
        let path = self.proc_path.join("diskstats");
        if !self.fs.exists(&path) {
            debug!(path = %path.display(), "diskstats not available");
            return Ok(Snapshot::empty());
        }

        let uptime = read_uptime(&self.fs, &self.proc_path, self.ticks_per_second)?;
        let content = read_file(&self.fs, &path)?;
        let disks = parse_diskstats(&content)
            .map_err(|e| SourceError::format(&path.display().to_string(), &e.line, e.reason))?;

        Ok(Snapshot::new(disks.into_iter().collect(), Some(uptime)))
    }
}

/// CPU tick counters from `<proc>/stat`.
pub struct LocalCpuStat<F: FileSystem> {
    fs: F,
    proc_path: PathBuf,
}

impl<F: FileSystem> LocalCpuStat<F> {
    pub fn new(fs: F, proc_path: impl AsRef<Path>) -> Self {
        Self {
            fs,
            proc_path: proc_path.as_ref().to_path_buf(),
        }
    }
}

impl<F: FileSystem> Source<CpuId, CpuStat> for LocalCpuStat<F> {
    fn name(&self) -> &str {
        "cpustat"
    }

    fn sample(&mut self, _conn: &mut dyn Connection) -> Result<Snapshot<CpuId, CpuStat>, SourceError> {
        let path = self.proc_path.join("stat");
        if !self.fs.exists(&path) {
            return Ok(Snapshot::empty());
        }

        let content = read_file(&self.fs, &path)?;
        let cpus: BTreeMap<CpuId, CpuStat> = parse_cpu_stat(&content)
            .map_err(|e| SourceError::format(&path.display().to_string(), &e.line, e.reason))?
            .into_iter()
            .collect();

        // The aggregate line doubles as the uptime clock for this family.
        let uptime = cpus.get(&CpuId::All).map(|c| c.total() as f64);
        Ok(Snapshot::new(cpus, uptime))
    }
}
