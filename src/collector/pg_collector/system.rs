//! OS counters of a remote host, read through the `pgcenter` helper schema.
//!
//! The helper views expose the pseudo-file contents one line per row, so rows
//! are turned back into lines and go through the same parsers as local files.

use std::collections::BTreeMap;

use tracing::{debug, info};

use super::queries::{
    HELPER_SCHEMA_QUERY, REMOTE_CPUSTAT_QUERY, REMOTE_DISKSTATS_QUERY, REMOTE_UPTIME_QUERY,
};
use crate::collector::procfs::parser::{
    CpuId, CpuStat, DeviceId, DiskStats, ParseError, parse_cpu_stat, parse_diskstats, parse_uptime,
};
use crate::collector::source::{Snapshot, Source, SourceError};
use crate::connection::{Connection, QueryResult};

/// Caches whether the helper schema is installed on the server.
#[derive(Debug, Default)]
struct SchemaProbe {
    available: Option<bool>,
}

impl SchemaProbe {
    fn check(&mut self, conn: &mut dyn Connection) -> Result<bool, SourceError> {
        if let Some(available) = self.available {
            return Ok(available);
        }
        let available = conn.query_scalar(HELPER_SCHEMA_QUERY)?.as_deref() == Some("t");
        if !available {
            info!("helper schema 'pgcenter' not found, remote OS statistics disabled");
        }
        self.available = Some(available);
        Ok(available)
    }
}

/// Joins each row into a whitespace-separated line. NULL counters read as 0.
fn rows_as_lines(result: &QueryResult) -> String {
    result
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|v| v.as_deref().unwrap_or("0"))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn remote_format_error(origin: &str, e: ParseError) -> SourceError {
    SourceError::format(origin, &e.line, e.reason)
}

fn remote_uptime(conn: &mut dyn Connection, ticks_per_second: f64) -> Result<f64, SourceError> {
    let result = conn.query(REMOTE_UPTIME_QUERY)?;
    parse_uptime(&rows_as_lines(&result), ticks_per_second)
        .map_err(|e| remote_format_error("pgcenter.sys_proc_uptime", e))
}

/// Block-device counters from `pgcenter.sys_proc_diskstats`.
#[derive(Debug)]
pub struct RemoteDiskstats {
    ticks_per_second: f64,
    probe: SchemaProbe,
}

impl RemoteDiskstats {
    pub fn new(ticks_per_second: f64) -> Self {
        Self {
            ticks_per_second,
            probe: SchemaProbe::default(),
        }
    }
}

impl Source<DeviceId, DiskStats> for RemoteDiskstats {
    fn name(&self) -> &str {
        "diskstats"
    }

    fn sample(&mut self, conn: &mut dyn Connection) -> Result<Snapshot<DeviceId, DiskStats>, SourceError> {
        if !self.probe.check(conn)? {
            return Ok(Snapshot::empty());
        }

        let uptime = remote_uptime(conn, self.ticks_per_second)?;
        let result = conn.query(REMOTE_DISKSTATS_QUERY)?;
        let disks = parse_diskstats(&rows_as_lines(&result))
            .map_err(|e| remote_format_error("pgcenter.sys_proc_diskstats", e))?;

        debug!(devices = disks.len(), "remote diskstats sampled");
        Ok(Snapshot::new(disks.into_iter().collect(), Some(uptime)))
    }
}

/// CPU counters from `pgcenter.sys_proc_stat`.
#[derive(Debug, Default)]
pub struct RemoteCpuStat {
    probe: SchemaProbe,
}

impl RemoteCpuStat {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Source<CpuId, CpuStat> for RemoteCpuStat {
    fn name(&self) -> &str {
        "cpustat"
    }

    fn sample(&mut self, conn: &mut dyn Connection) -> Result<Snapshot<CpuId, CpuStat>, SourceError> {
        if !self.probe.check(conn)? {
            return Ok(Snapshot::empty());
        }

        let result = conn.query(REMOTE_CPUSTAT_QUERY)?;
        let cpus: BTreeMap<CpuId, CpuStat> = parse_cpu_stat(&rows_as_lines(&result))
            .map_err(|e| remote_format_error("pgcenter.sys_proc_stat", e))?
            .into_iter()
            .collect();

        let uptime = cpus.get(&CpuId::All).map(|c| c.total() as f64);
        Ok(Snapshot::new(cpus, uptime))
    }
}
