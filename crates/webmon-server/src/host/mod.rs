//! Host resource sources.
//!
//! The sampler and the `/status` handler read the host through these traits so
//! tests can substitute scripted sources.

mod disk;
mod system;

use std::path::Path;

use webmon_core::error::Result;

pub use disk::{fs_stats, FsStats, StatvfsDisks};
pub use system::SysinfoHost;

/// CPU and memory readings taken by the background sampler.
pub trait HostSource: Send + 'static {
    /// Start a CPU measurement window. Utilisation is averaged from here to
    /// the next `cpu_usage_percent` call.
    fn begin_cpu_window(&mut self);

    /// Average CPU utilisation over the current window, in percent.
    fn cpu_usage_percent(&mut self) -> Result<f64>;

    /// Memory in use, in bytes.
    fn memory_used_bytes(&mut self) -> Result<u64>;
}

/// Filesystem usage, read on demand.
pub trait DiskSource: Send + Sync {
    /// Used space of the filesystem holding `mount`, in percent.
    fn usage_percent(&self, mount: &Path) -> Result<f64>;
}
