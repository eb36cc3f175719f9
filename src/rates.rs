//! Diff engine: turns two snapshots of a counter family into per-second metrics.
//!
//! This module is the single place where counter deltas are taken. Every
//! family goes through [`diff`], which handles entity alignment, and the
//! family's [`CounterFamily::derive`], which only sees one matched pair.

use std::ops::RangeInclusive;

use crate::collector::procfs::{CpuId, CpuStat, DeviceId, DiskStats};
use crate::collector::source::Snapshot;
use crate::models::{Cell, CpuMetric, DiskMetric, TableRow};

/// Sectors per megabyte (512-byte sectors).
const SECTORS_PER_MB: f64 = 2048.0;

// ---------------------------------------------------------------------------
// Delta helpers
// ---------------------------------------------------------------------------

/// Compute u64 delta, returning `None` on counter regression (reset).
pub fn du64(curr: u64, prev: u64) -> Option<u64> {
    (curr >= prev).then_some(curr - prev)
}

/// Delta as f64, zero on regression.
fn delta(curr: u64, prev: u64) -> f64 {
    du64(curr, prev).unwrap_or(0) as f64
}

/// Per-second rate of a monotonic counter.
///
/// `interval` is in clock ticks, `scale` is ticks per second (or 100 for a
/// percentage of the interval). A decrease yields 0, never a negative rate.
pub fn safe_rate(prev: f64, curr: f64, interval: f64, scale: f64) -> f64 {
    if curr < prev || interval <= 0.0 {
        return 0.0;
    }
    (curr - prev) / interval * scale
}

/// `num / den`, or 0 when the denominator is not positive.
pub fn ratio(num: f64, den: f64) -> f64 {
    if den > 0.0 { num / den } else { 0.0 }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Family-specific part of the diff.
pub trait CounterFamily {
    type Key: Ord;
    type Record;
    type Metric;

    /// When true, a change in entity count between the two snapshots makes
    /// the whole tick empty instead of aligning what matches.
    fn strict_cardinality(&self) -> bool;

    /// Entities whose activity counters are all zero are not displayed.
    fn is_active(&self, curr: &Self::Record) -> bool;

    /// Interval used for this entity; defaults to the snapshot interval.
    fn entity_interval(&self, _prev: &Self::Record, _curr: &Self::Record, snapshot_interval: f64) -> f64 {
        snapshot_interval
    }

    fn derive(
        &self,
        key: &Self::Key,
        prev: &Self::Record,
        curr: &Self::Record,
        interval: f64,
        ticks_per_second: f64,
    ) -> Self::Metric;
}

/// Derives metrics for every entity present and active in both snapshots.
///
/// Output follows key order. Entities new in `curr` have no baseline and are
/// skipped; entities gone from `curr` are dropped.
pub fn diff<F: CounterFamily>(
    family: &F,
    prev: &Snapshot<F::Key, F::Record>,
    curr: &Snapshot<F::Key, F::Record>,
    interval: f64,
    ticks_per_second: f64,
) -> Vec<F::Metric> {
    if family.strict_cardinality() && prev.len() != curr.len() {
        return Vec::new();
    }

    curr.entries
        .iter()
        .filter(|(_, c)| family.is_active(c))
        .filter_map(|(key, c)| {
            let p = prev.entries.get(key)?;
            let itv = family.entity_interval(p, c, interval);
            Some(family.derive(key, p, c, itv, ticks_per_second))
        })
        .collect()
}

/// [`diff`] with the interval taken from the snapshots themselves.
pub fn diff_snapshots<F: CounterFamily>(
    family: &F,
    prev: &Snapshot<F::Key, F::Record>,
    curr: &Snapshot<F::Key, F::Record>,
    ticks_per_second: f64,
) -> Vec<F::Metric> {
    let interval = curr.interval_ticks(prev, ticks_per_second);
    diff(family, prev, curr, interval, ticks_per_second)
}

// ---------------------------------------------------------------------------
// Block devices
// ---------------------------------------------------------------------------

/// Block devices, aligned strictly: a device appearing or vanishing skips the tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskFamily;

impl CounterFamily for DiskFamily {
    type Key = DeviceId;
    type Record = DiskStats;
    type Metric = DiskMetric;

    fn strict_cardinality(&self) -> bool {
        true
    }

    fn is_active(&self, curr: &DiskStats) -> bool {
        curr.reads.saturating_add(curr.writes) > 0
    }

    fn derive(
        &self,
        key: &DeviceId,
        p: &DiskStats,
        c: &DiskStats,
        itv: f64,
        hz: f64,
    ) -> DiskMetric {
        let rate = |prev: u64, curr: u64| safe_rate(prev as f64, curr as f64, itv, hz);
        let ios = delta(c.reads, p.reads) + delta(c.writes, p.writes);

        DiskMetric {
            device: key.name.clone(),
            rps: rate(p.reads, c.reads),
            wps: rate(p.writes, c.writes),
            rmrgps: rate(p.r_merged, c.r_merged),
            wmrgps: rate(p.w_merged, c.w_merged),
            rmbps: rate(p.read_sectors, c.read_sectors) / SECTORS_PER_MB,
            wmbps: rate(p.write_sectors, c.write_sectors) / SECTORS_PER_MB,
            avgrq_sz: ratio(
                delta(c.read_sectors, p.read_sectors) + delta(c.write_sectors, p.write_sectors),
                ios,
            ),
            avgqu_sz: rate(p.io_weighted_time, c.io_weighted_time) / 1000.0,
            r#await: ratio(
                delta(c.read_time, p.read_time) + delta(c.write_time, p.write_time),
                ios,
            ),
            r_await: ratio(delta(c.read_time, p.read_time), delta(c.reads, p.reads)),
            w_await: ratio(delta(c.write_time, p.write_time), delta(c.writes, p.writes)),
            // io_time is in ms: ms per second / 10 = percent busy.
            util: rate(p.io_time, c.io_time) / 10.0,
        }
    }
}

// ---------------------------------------------------------------------------
// CPU
// ---------------------------------------------------------------------------

/// CPU lines; each CPU is normalised by its own total tick delta.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuFamily;

impl CounterFamily for CpuFamily {
    type Key = CpuId;
    type Record = CpuStat;
    type Metric = CpuMetric;

    fn strict_cardinality(&self) -> bool {
        true
    }

    fn is_active(&self, curr: &CpuStat) -> bool {
        curr.total() > 0
    }

    fn entity_interval(&self, prev: &CpuStat, curr: &CpuStat, _snapshot_interval: f64) -> f64 {
        match delta(curr.total(), prev.total()) {
            d if d > 0.0 => d,
            _ => 1.0,
        }
    }

    fn derive(&self, key: &CpuId, p: &CpuStat, c: &CpuStat, itv: f64, _hz: f64) -> CpuMetric {
        let pct = |prev: u64, curr: u64| safe_rate(prev as f64, curr as f64, itv, 100.0);

        CpuMetric {
            cpu: *key,
            user: pct(p.user, c.user),
            sys: pct(p.system_all(), c.system_all()),
            nice: pct(p.nice, c.nice),
            idle: pct(p.idle, c.idle),
            iowait: pct(p.iowait, c.iowait),
            irq: pct(p.irq, c.irq),
            softirq: pct(p.softirq, c.softirq),
            steal: pct(p.steal, c.steal),
        }
    }
}

// ---------------------------------------------------------------------------
// Statistics views
// ---------------------------------------------------------------------------

/// Rows of a statistics view keyed by their first column.
///
/// Columns inside `diff_cols` are counters and become per-second rates; all
/// other columns are copied from the current row.
#[derive(Debug, Clone)]
pub struct TableFamily {
    pub diff_cols: RangeInclusive<usize>,
}

fn parse_counter(v: Option<&String>) -> f64 {
    v.and_then(|s| s.trim().parse().ok()).unwrap_or(0.0)
}

impl CounterFamily for TableFamily {
    type Key = String;
    type Record = Vec<Option<String>>;
    type Metric = TableRow;

    // Rows are matched by key; tables and databases come and go freely.
    fn strict_cardinality(&self) -> bool {
        false
    }

    fn is_active(&self, _curr: &Self::Record) -> bool {
        true
    }

    fn derive(
        &self,
        _key: &String,
        p: &Self::Record,
        c: &Self::Record,
        itv: f64,
        hz: f64,
    ) -> TableRow {
        c.iter()
            .enumerate()
            .map(|(i, value)| {
                if self.diff_cols.contains(&i) {
                    let prev = parse_counter(p.get(i).and_then(Option::as_ref));
                    Cell::Rate(safe_rate(prev, parse_counter(value.as_ref()), itv, hz))
                } else {
                    Cell::from(value.as_ref())
                }
            })
            .collect()
    }
}

/// Rows of a view shown as-is, without diffing, in `order` (the order the
/// rows were returned in).
pub fn passthrough(curr: &Snapshot<String, Vec<Option<String>>>, order: &[String]) -> Vec<TableRow> {
    order
        .iter()
        .filter_map(|key| curr.entries.get(key))
        .map(|row| row.iter().map(|v| Cell::from(v.as_ref())).collect())
        .collect()
}
