//! Derived metrics produced by the diff engine, one struct per counter family.

use std::cmp::Ordering;
use std::fmt;

use crate::collector::procfs::CpuId;

/// Per-second block-device metrics (iostat -x layout).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiskMetric {
    pub device: String,
    /// Reads completed per second.
    pub rps: f64,
    /// Writes completed per second.
    pub wps: f64,
    pub rmrgps: f64,
    pub wmrgps: f64,
    /// Megabytes read per second.
    pub rmbps: f64,
    pub wmbps: f64,
    /// Average request size in sectors.
    pub avgrq_sz: f64,
    /// Average queue length.
    pub avgqu_sz: f64,
    /// Average time per request (ms), reads and writes together.
    pub r#await: f64,
    pub r_await: f64,
    pub w_await: f64,
    /// Share of wall time the device was busy, percent.
    pub util: f64,
}

impl DiskMetric {
    pub const HEADERS: [&'static str; 13] = [
        "Device", "r/s", "w/s", "rmrg/s", "wmrg/s", "rMB/s", "wMB/s", "avgrq-sz", "avgqu-sz",
        "await", "r_await", "w_await", "%util",
    ];

    /// Display values in [`DiskMetric::HEADERS`] order.
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.device.clone(),
            format!("{:.2}", self.rps),
            format!("{:.2}", self.wps),
            format!("{:.2}", self.rmrgps),
            format!("{:.2}", self.wmrgps),
            format!("{:.2}", self.rmbps),
            format!("{:.2}", self.wmbps),
            format!("{:.2}", self.avgrq_sz),
            format!("{:.2}", self.avgqu_sz),
            format!("{:.2}", self.r#await),
            format!("{:.2}", self.r_await),
            format!("{:.2}", self.w_await),
            format!("{:.2}", self.util),
        ]
    }
}

/// CPU time shares over the interval, percent of that CPU's ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct CpuMetric {
    pub cpu: CpuId,
    pub user: f64,
    /// System time including irq and softirq.
    pub sys: f64,
    pub nice: f64,
    pub idle: f64,
    pub iowait: f64,
    pub irq: f64,
    pub softirq: f64,
    pub steal: f64,
}

impl fmt::Display for CpuMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {:4.1} us, {:4.1} sy, {:4.1} ni, {:4.1} id, {:4.1} wa, {:4.1} hi, {:4.1} si, {:4.1} st",
            self.cpu,
            self.user,
            self.sys,
            self.nice,
            self.idle,
            self.iowait,
            self.irq,
            self.softirq,
            self.steal
        )
    }
}

/// One cell of a statistics-view row.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Rate-converted counter.
    Rate(f64),
    /// Value copied as the server returned it.
    Text(String),
    Null,
}

impl Cell {
    /// Numeric value of the cell, if it has one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Rate(v) => Some(*v),
            Cell::Text(s) => s.trim().parse().ok(),
            Cell::Null => None,
        }
    }

    /// Numeric comparison when both sides are numbers, textual otherwise.
    pub fn compare(&self, other: &Cell) -> Ordering {
        match (self.as_number(), other.as_number()) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            _ => self.to_string().cmp(&other.to_string()),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Rate(v) => f.write_str(&crate::fmt::format_rate_cell(*v)),
            Cell::Text(s) => f.write_str(s),
            Cell::Null => Ok(()),
        }
    }
}

impl From<Option<&String>> for Cell {
    fn from(v: Option<&String>) -> Self {
        match v {
            Some(s) => Cell::Text(s.clone()),
            None => Cell::Null,
        }
    }
}

/// Row of a statistics view after diffing.
pub type TableRow = Vec<Cell>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_numeric_compare() {
        assert_eq!(Cell::Rate(10.0).compare(&Cell::Text("9".into())), Ordering::Greater);
        assert_eq!(Cell::Text("10".into()).compare(&Cell::Text("9".into())), Ordering::Greater);
    }

    #[test]
    fn cell_text_compare_fallback() {
        assert_eq!(Cell::Text("abc".into()).compare(&Cell::Text("abd".into())), Ordering::Less);
        assert_eq!(Cell::Null.compare(&Cell::Text("a".into())), Ordering::Less);
    }

    #[test]
    fn disk_metric_cells_match_headers() {
        let m = DiskMetric {
            device: "sda".into(),
            rps: 100.0,
            ..Default::default()
        };
        let cells = m.cells();
        assert_eq!(cells.len(), DiskMetric::HEADERS.len());
        assert_eq!(cells[1], "100.00");
    }
}
