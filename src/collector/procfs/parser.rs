//! Parsers for `/proc` filesystem files.
//!
//! These are pure functions that parse the content of `/proc` files into
//! structured data, so they can be tested with string inputs.

use std::str::FromStr;

use thiserror::Error;

/// Error type for parsing failures. Carries the offending line.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{reason}, line: {line}")]
pub struct ParseError {
    pub line: String,
    pub reason: String,
}

impl ParseError {
    pub fn new(line: &str, reason: impl Into<String>) -> Self {
        Self {
            line: line.to_string(),
            reason: reason.into(),
        }
    }
}

fn parse_num<T: FromStr>(line: &str, field: &str, name: &str) -> Result<T, ParseError> {
    field
        .parse()
        .map_err(|_| ParseError::new(line, format!("invalid {}: '{}'", name, field)))
}

// ============ Disk Stats Parser ============

/// Device name prefixes of pseudo block devices skipped at read time.
const PSEUDO_DEVICE_PREFIXES: [&str; 3] = ["ram", "loop", "fd"];

/// True for RAM disks, loop devices and floppies.
pub fn is_pseudo_device(name: &str) -> bool {
    PSEUDO_DEVICE_PREFIXES.iter().any(|p| name.starts_with(p))
}

/// Identity of a block device; orders by major, then minor number.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeviceId {
    pub major: u32,
    pub minor: u32,
    pub name: String,
}

/// Counters of one block device from `/proc/diskstats`.
///
/// Kernels before 4.18 report 14 columns, 4.18+ add four discard counters,
/// 5.5+ add two flush counters; missing counters stay zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiskStats {
    /// Reads completed successfully.
    pub reads: u64,
    pub r_merged: u64,
    pub read_sectors: u64,
    /// Time spent reading (ms).
    pub read_time: u64,
    /// Writes completed successfully.
    pub writes: u64,
    pub w_merged: u64,
    pub write_sectors: u64,
    /// Time spent writing (ms).
    pub write_time: u64,
    /// I/Os currently in progress (gauge, not a counter).
    pub io_in_progress: u64,
    /// Time spent doing I/Os (ms).
    pub io_time: u64,
    /// Weighted time spent doing I/Os (ms).
    pub io_weighted_time: u64,
    pub discards: u64,
    pub d_merged: u64,
    pub discard_sectors: u64,
    pub discard_time: u64,
    pub flushes: u64,
    pub flush_time: u64,
}

impl DiskStats {
    /// Builds a record from the counter columns (everything after the name).
    pub fn from_counters(values: &[u64]) -> Self {
        let v = |i: usize| values.get(i).copied().unwrap_or(0);
        Self {
            reads: v(0),
            r_merged: v(1),
            read_sectors: v(2),
            read_time: v(3),
            writes: v(4),
            w_merged: v(5),
            write_sectors: v(6),
            write_time: v(7),
            io_in_progress: v(8),
            io_time: v(9),
            io_weighted_time: v(10),
            discards: v(11),
            d_merged: v(12),
            discard_sectors: v(13),
            discard_time: v(14),
            flushes: v(15),
            flush_time: v(16),
        }
    }
}

/// Parses `/proc/diskstats` content, skipping pseudo devices.
///
/// Format: `major minor name reads r_merged r_sectors r_time writes w_merged
/// w_sectors w_time io_pending io_time w_io_time [discards ...] [flushes ...]`
pub fn parse_diskstats(content: &str) -> Result<Vec<(DeviceId, DiskStats)>, ParseError> {
    let mut disks = Vec::new();

    for line in content.lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }
        if !matches!(parts.len(), 14 | 18 | 20) {
            return Err(ParseError::new(
                line,
                format!("unknown file format, wrong number of columns ({})", parts.len()),
            ));
        }

        let major: u32 = parse_num(line, parts[0], "major")?;
        let minor: u32 = parse_num(line, parts[1], "minor")?;
        let name = parts[2];

        let counters = parts[3..]
            .iter()
            .enumerate()
            .map(|(i, s)| parse_num::<u64>(line, s, &format!("column {}", i + 4)))
            .collect::<Result<Vec<_>, _>>()?;

        if is_pseudo_device(name) {
            continue;
        }

        disks.push((
            DeviceId {
                major,
                minor,
                name: name.to_string(),
            },
            DiskStats::from_counters(&counters),
        ));
    }

    Ok(disks)
}

// ============ CPU Stats Parser ============

/// CPU entity: the aggregate `cpu` line or a single core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CpuId {
    All,
    Core(u32),
}

impl std::fmt::Display for CpuId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CpuId::All => write!(f, "all"),
            CpuId::Core(n) => write!(f, "cpu{}", n),
        }
    }
}

/// Tick counters of one CPU line from `/proc/stat`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CpuStat {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
    pub steal: u64,
    pub guest: u64,
    pub guest_nice: u64,
}

impl CpuStat {
    /// Total ticks. Guest time is already accounted in user/nice.
    pub fn total(&self) -> u64 {
        [
            self.user,
            self.nice,
            self.system,
            self.idle,
            self.iowait,
            self.irq,
            self.softirq,
            self.steal,
        ]
        .into_iter()
        .fold(0, u64::saturating_add)
    }

    /// System time including interrupt servicing.
    pub fn system_all(&self) -> u64 {
        self.system.saturating_add(self.irq).saturating_add(self.softirq)
    }
}

/// Parses the `cpu` lines of `/proc/stat`; other lines are ignored.
///
/// Old kernels report fewer than ten counters; missing ones stay zero.
pub fn parse_cpu_stat(content: &str) -> Result<Vec<(CpuId, CpuStat)>, ParseError> {
    let mut cpus = Vec::new();

    for line in content.lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(label) = parts.first() else {
            continue;
        };
        let Some(suffix) = label.strip_prefix("cpu") else {
            continue;
        };

        let id = if suffix.is_empty() {
            CpuId::All
        } else {
            CpuId::Core(parse_num(line, suffix, "cpu number")?)
        };

        if parts.len() < 5 {
            return Err(ParseError::new(line, "too few cpu counters"));
        }

        let values = parts[1..]
            .iter()
            .take(10)
            .map(|s| parse_num::<u64>(line, s, "cpu counter"))
            .collect::<Result<Vec<_>, _>>()?;
        let v = |i: usize| values.get(i).copied().unwrap_or(0);

        cpus.push((
            id,
            CpuStat {
                user: v(0),
                nice: v(1),
                system: v(2),
                idle: v(3),
                iowait: v(4),
                irq: v(5),
                softirq: v(6),
                steal: v(7),
                guest: v(8),
                guest_nice: v(9),
            },
        ));
    }

    Ok(cpus)
}

// ============ Uptime Parser ============

/// Parses `/proc/uptime` and converts the first field to clock ticks.
pub fn parse_uptime(content: &str, ticks_per_second: f64) -> Result<f64, ParseError> {
    let line = content.lines().next().unwrap_or("");
    let secs: f64 = line
        .split_whitespace()
        .next()
        .ok_or_else(|| ParseError::new(line, "empty uptime"))?
        .parse()
        .map_err(|_| ParseError::new(line, "invalid uptime"))?;
    Ok(secs * ticks_per_second)
}
