//! sysinfo-based CPU and memory source.

use sysinfo::System;
use webmon_core::error::{Result, WebmonError};

use super::HostSource;

/// CPU/memory source backed by a long-lived `sysinfo::System`.
pub struct SysinfoHost {
    system: System,
}

impl SysinfoHost {
    pub fn new() -> Self {
        Self {
            system: System::new(),
        }
    }
}

impl Default for SysinfoHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostSource for SysinfoHost {
    fn begin_cpu_window(&mut self) {
        self.system.refresh_cpu_usage();
    }

    fn cpu_usage_percent(&mut self) -> Result<f64> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(WebmonError::Sampling("cpu stats unsupported on this platform".into()));
        }
        self.system.refresh_cpu_usage();
        if self.system.cpus().is_empty() {
            return Err(WebmonError::Sampling("no cpus reported".into()));
        }
        let usage = f64::from(self.system.global_cpu_usage());
        if !usage.is_finite() {
            return Err(WebmonError::Sampling(format!("cpu usage not finite: {usage}")));
        }
        Ok(usage.clamp(0.0, 100.0))
    }

    fn memory_used_bytes(&mut self) -> Result<u64> {
        self.system.refresh_memory();
        if self.system.total_memory() == 0 {
            return Err(WebmonError::Sampling("memory stats unavailable".into()));
        }
        Ok(self.system.used_memory())
    }
}
