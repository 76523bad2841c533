//! The five `webapp_*` families and the helpers that record into them.

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use webmon_core::error::Result;
use webmon_core::metrics::{Buckets, Counter, Gauge, Histogram, Registry};

/// Metric names. Part of the scrape contract.
pub mod names {
    /// Total HTTP requests, labelled by path and status code.
    pub const REQUESTS_TOTAL: &str = "webapp_requests_total";
    /// Request latency in seconds, labelled by path.
    pub const REQUEST_DURATION_SECONDS: &str = "webapp_request_duration_seconds";
    /// Host CPU utilisation over the last sampler window.
    pub const CPU_USAGE_PERCENT: &str = "webapp_cpu_usage_percent";
    /// Host memory in use.
    pub const MEMORY_USAGE_BYTES: &str = "webapp_memory_usage_bytes";
    /// Filesystem usage of the configured mount, sampled by `/status`.
    pub const DISK_USAGE_PERCENT: &str = "webapp_disk_usage_percent";
}

/// Label keys.
pub mod labels {
    pub const PATH: &str = "path";
    pub const STATUS_CODE: &str = "status_code";
}

#[derive(Clone)]
pub struct WebappMetrics {
    registry: Arc<Registry>,
    pub requests: Counter,
    pub request_duration: Histogram,
    pub cpu_usage: Gauge,
    pub memory_usage: Gauge,
    pub disk_usage: Gauge,
}

impl WebappMetrics {
    /// Build a fresh registry holding every family. Fails on any registration
    /// error, which must abort startup.
    pub fn new() -> Result<Self> {
        let mut registry = Registry::new();

        let requests = registry.counter(
            names::REQUESTS_TOTAL,
            "Total HTTP requests received",
            &[labels::PATH, labels::STATUS_CODE],
        )?;
        let request_duration = registry.histogram(
            names::REQUEST_DURATION_SECONDS,
            "Histogram of request durations",
            &[labels::PATH],
            Buckets::default(),
        )?;
        let cpu_usage = registry.gauge(names::CPU_USAGE_PERCENT, "System CPU usage percentage", &[])?;
        let memory_usage =
            registry.gauge(names::MEMORY_USAGE_BYTES, "System memory usage in bytes", &[])?;
        let disk_usage =
            registry.gauge(names::DISK_USAGE_PERCENT, "System disk usage percentage", &[])?;

        Ok(Self {
            registry: Arc::new(registry),
            requests,
            request_duration,
            cpu_usage,
            memory_usage,
            disk_usage,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Record latency, then count the request under its status code.
    pub fn record_request(&self, path: &str, status: StatusCode, elapsed: Duration) -> Result<()> {
        self.request_duration.observe_duration(&[path], elapsed)?;
        self.requests.inc(&[path, status.as_str()])
    }

    /// Render every family in the text exposition format.
    pub fn render(&self) -> String {
        self.registry.render()
    }
}
