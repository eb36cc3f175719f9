//! Pre-built mock filesystem scenarios for testing.

use super::filesystem::MockFs;

impl MockFs {
    /// A small host: two cores, two disks with a partition, one loop device.
    pub fn typical_system() -> Self {
        let mut fs = Self::new();

        fs.add_file("/proc/uptime", "12345.67 98765.43\n");
        fs.add_file(
            "/proc/stat",
            "\
cpu  10000 500 3000 80000 1000 200 100 0 0 0
cpu0 5000 250 1500 40000 500 100 50 0 0 0
cpu1 5000 250 1500 40000 500 100 50 0 0 0
intr 1000000 50 0 0 0 0 0 0 0 1 0 0 0 100 0 0 1000
ctxt 500000
btime 1700000000
processes 10000
procs_running 2
procs_blocked 0
",
        );
        fs.add_file(
            "/proc/diskstats",
            "\
   7       0 loop0 120 0 2400 12 0 0 0 0 0 16 12 0 0 0 0 0 0
   8       0 sda 1234 10 56789 100 5678 20 98765 200 0 150 300 0 0 0 0 0 0
   8       1 sda1 1000 5 50000 80 5000 10 90000 180 0 130 260 0 0 0 0 0 0
 259       0 nvme0n1 9999 0 123456 500 8888 0 654321 400 5 1000 2000 0 0 0 0 0 0
",
        );

        fs
    }

    /// Same host one second later: sda served 100 more reads, nothing else moved.
    pub fn typical_system_next_second() -> Self {
        let mut fs = Self::typical_system();
        fs.set_diskstats(
            12346.67,
            "\
   7       0 loop0 120 0 2400 12 0 0 0 0 0 16 12 0 0 0 0 0 0
   8       0 sda 1334 10 57789 150 5678 20 98765 200 0 200 350 0 0 0 0 0 0
   8       1 sda1 1000 5 50000 80 5000 10 90000 180 0 130 260 0 0 0 0 0 0
 259       0 nvme0n1 9999 0 123456 500 8888 0 654321 400 5 1000 2000 0 0 0 0 0 0
",
        );
        fs.add_file(
            "/proc/stat",
            "\
cpu  10100 500 3050 80040 1010 200 100 0 0 0
cpu0 5080 250 1520 40000 500 100 50 0 0 0
cpu1 5020 250 1530 40040 510 100 50 0 0 0
",
        );
        fs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::traits::FileSystem;
    use std::path::Path;

    #[test]
    fn test_typical_system_has_required_files() {
        let fs = MockFs::typical_system();
        assert!(fs.exists(Path::new("/proc/stat")));
        assert!(fs.exists(Path::new("/proc/uptime")));
        assert!(fs.exists(Path::new("/proc/diskstats")));
    }

    #[test]
    fn test_next_second_advances_uptime() {
        let fs = MockFs::typical_system_next_second();
        let uptime = fs.read_to_string(Path::new("/proc/uptime")).unwrap();
        assert!(uptime.starts_with("12346.67"));
    }
}
