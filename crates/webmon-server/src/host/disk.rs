//! statvfs-based disk source.
//!
//! Reads the filesystem holding the configured path directly, so any mount
//! type works (tmpfs, overlay, rootfs). Usage is computed against the space
//! visible to unprivileged users: `used / (used + available)`, where blocks
//! reserved for root count as neither.

use std::path::Path;

use webmon_core::error::{Result, WebmonError};

use super::DiskSource;

/// Raw block counts from one statvfs call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FsStats {
    pub fragment_size: u64,
    pub blocks: u64,
    pub blocks_free: u64,
    pub blocks_available: u64,
}

impl FsStats {
    pub fn used_bytes(&self) -> u64 {
        self.blocks.saturating_sub(self.blocks_free) * self.fragment_size
    }

    pub fn available_bytes(&self) -> u64 {
        self.blocks_available * self.fragment_size
    }

    /// Used share of user-visible space, rounded to one decimal place.
    pub fn usage_percent(&self) -> f64 {
        let used = self.used_bytes();
        let visible = used + self.available_bytes();
        if visible == 0 {
            return 0.0;
        }
        let p = used as f64 / visible as f64 * 100.0;
        (p * 10.0).round() / 10.0
    }
}

#[cfg(unix)]
pub fn fs_stats(path: &Path) -> Result<FsStats> {
    let st = nix::sys::statvfs::statvfs(path).map_err(|e| {
        WebmonError::Sampling(format!("statvfs {} failed: {e}", path.display()))
    })?;
    Ok(FsStats {
        fragment_size: u64::from(st.fragment_size()),
        blocks: u64::from(st.blocks()),
        blocks_free: u64::from(st.blocks_free()),
        blocks_available: u64::from(st.blocks_available()),
    })
}

#[cfg(not(unix))]
pub fn fs_stats(path: &Path) -> Result<FsStats> {
    Err(WebmonError::Sampling(format!(
        "disk usage of {} unsupported on this platform",
        path.display()
    )))
}

/// Disk source issuing one statvfs call per request.
#[derive(Debug, Default)]
pub struct StatvfsDisks;

impl DiskSource for StatvfsDisks {
    fn usage_percent(&self, mount: &Path) -> Result<f64> {
        Ok(fs_stats(mount)?.usage_percent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(blocks: u64, blocks_free: u64, blocks_available: u64) -> FsStats {
        FsStats {
            fragment_size: 4096,
            blocks,
            blocks_free,
            blocks_available,
        }
    }

    #[test]
    fn reserved_blocks_excluded() {
        // 700 used, 250 available to users, 50 reserved for root.
        let s = stats(1000, 300, 250);
        assert_eq!(s.used_bytes(), 700 * 4096);
        assert_eq!(s.usage_percent(), 73.7);
    }

    #[test]
    fn no_reserved_blocks() {
        assert_eq!(stats(3, 2, 2).usage_percent(), 33.3);
        assert_eq!(stats(10, 10, 10).usage_percent(), 0.0);
        assert_eq!(stats(10, 0, 0).usage_percent(), 100.0);
    }

    #[test]
    fn empty_filesystem_reads_zero() {
        assert_eq!(stats(0, 0, 0).usage_percent(), 0.0);
    }

    #[cfg(unix)]
    #[test]
    fn root_matches_statvfs_reading() {
        let reading = StatvfsDisks.usage_percent(Path::new("/")).expect("statvfs /");
        let st = nix::sys::statvfs::statvfs("/").expect("statvfs /");
        let used = (st.blocks() - st.blocks_free()) as f64;
        let avail = st.blocks_available() as f64;
        let expected = if used + avail == 0.0 { 0.0 } else { used / (used + avail) * 100.0 };

        assert!((0.0..=100.0).contains(&reading));
        assert!(
            (reading - expected).abs() < 0.5,
            "source={reading} statvfs={expected}"
        );
    }

    #[cfg(unix)]
    #[test]
    fn missing_path_is_sampling_error() {
        let err = StatvfsDisks
            .usage_percent(Path::new("/definitely/not/a/mount/point"))
            .expect_err("must fail");
        assert_eq!(err.code().as_str(), "SAMPLING_FAILED");
    }
}
