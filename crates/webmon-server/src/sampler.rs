//! Background host sampler.
//!
//! One task for the process lifetime. Each cycle opens a CPU measurement
//! window, waits it out, then writes CPU and memory gauges and immediately
//! opens the next window. Read failures are logged and the gauge keeps its
//! previous value. Cancellation is observed during the wait; shutdown never
//! joins the task.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::host::HostSource;
use crate::obs::metrics::WebappMetrics;

pub fn spawn<P: HostSource>(
    metrics: WebappMetrics,
    source: P,
    window: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(run(metrics, source, window, cancel))
}

async fn run<P: HostSource>(
    metrics: WebappMetrics,
    mut source: P,
    window: Duration,
    cancel: CancellationToken,
) {
    tracing::info!(window_ms = window.as_millis() as u64, "system sampler started");
    loop {
        source.begin_cpu_window();
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("system sampler cancelled");
                return;
            }
            _ = tokio::time::sleep(window) => {}
        }
        sample_once(&mut source, &metrics);
    }
}

/// Close the current CPU window and write both gauges.
pub fn sample_once<P: HostSource + ?Sized>(source: &mut P, metrics: &WebappMetrics) {
    match source.cpu_usage_percent() {
        Ok(cpu) => {
            if let Err(e) = metrics.cpu_usage.set(&[], cpu) {
                tracing::warn!(error = %e, "cpu gauge update failed");
            }
        }
        Err(e) => tracing::warn!(error = %e, "cpu sample failed, keeping last value"),
    }

    match source.memory_used_bytes() {
        Ok(bytes) => {
            if let Err(e) = metrics.memory_usage.set(&[], bytes as f64) {
                tracing::warn!(error = %e, "memory gauge update failed");
            }
        }
        Err(e) => tracing::warn!(error = %e, "memory sample failed, keeping last value"),
    }

    tracing::trace!("system sample recorded");
}
