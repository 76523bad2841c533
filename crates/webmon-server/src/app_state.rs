//! Shared application state.
//!
//! Composition root for the server: owns the config, the metric registry and
//! the disk source. Handlers and the sampler receive clones of these, never a
//! global.

use std::sync::Arc;

use webmon_core::error::Result;

use crate::config::WebmonConfig;
use crate::host::{DiskSource, StatvfsDisks};
use crate::obs::metrics::WebappMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: WebmonConfig,
    metrics: WebappMetrics,
    disk: Arc<dyn DiskSource>,
}

impl AppState {
    /// Build application state with the statvfs disk source.
    /// Metric registration errors are returned, not panicked on.
    pub fn new(cfg: WebmonConfig) -> Result<Self> {
        Self::with_disk_source(cfg, Arc::new(StatvfsDisks))
    }

    pub fn with_disk_source(cfg: WebmonConfig, disk: Arc<dyn DiskSource>) -> Result<Self> {
        let metrics = WebappMetrics::new()?;
        Ok(Self {
            inner: Arc::new(AppStateInner { cfg, metrics, disk }),
        })
    }

    pub fn cfg(&self) -> &WebmonConfig {
        &self.inner.cfg
    }

    pub fn metrics(&self) -> &WebappMetrics {
        &self.inner.metrics
    }

    pub fn disk_source(&self) -> &dyn DiskSource {
        self.inner.disk.as_ref()
    }
}
