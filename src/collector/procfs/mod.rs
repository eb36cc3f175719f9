//! Local sources for the Linux `/proc` filesystem.

pub mod parser;
pub mod system;

pub use parser::{CpuId, CpuStat, DeviceId, DiskStats, ParseError, is_pseudo_device};
pub use system::{LocalCpuStat, LocalDiskstats};
