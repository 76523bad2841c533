use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;

use super::desc::Desc;
use super::snapshot::{sorted, SeriesSnapshot, SeriesValue};
use crate::error::Result;

/// Point-in-time value family. Values are `f64` stored as raw bits.
#[derive(Clone)]
pub struct Gauge {
    inner: Arc<GaugeInner>,
}

struct GaugeInner {
    desc: Desc,
    series: DashMap<Vec<String>, AtomicU64>,
}

impl Gauge {
    pub(crate) fn new(desc: Desc) -> Self {
        Self {
            inner: Arc::new(GaugeInner {
                desc,
                series: DashMap::new(),
            }),
        }
    }

    pub fn desc(&self) -> &Desc {
        &self.inner.desc
    }

    /// Overwrite the current value.
    pub fn set(&self, labels: &[&str], v: f64) -> Result<()> {
        let key = self.inner.desc.series_key(labels)?;
        if let Some(slot) = self.inner.series.get(&key) {
            slot.store(v.to_bits(), Ordering::Relaxed);
            return Ok(());
        }
        self.inner
            .series
            .entry(key)
            .or_insert_with(|| AtomicU64::new(0))
            .store(v.to_bits(), Ordering::Relaxed);
        Ok(())
    }

    /// Last value set, `None` if the gauge was never set.
    pub fn get(&self, labels: &[&str]) -> Result<Option<f64>> {
        let key = self.inner.desc.series_key(labels)?;
        Ok(self
            .inner
            .series
            .get(&key)
            .map(|g| f64::from_bits(g.load(Ordering::Relaxed))))
    }

    pub(crate) fn collect(&self) -> Vec<SeriesSnapshot> {
        sorted(
            self.inner
                .series
                .iter()
                .map(|r| SeriesSnapshot {
                    label_values: r.key().clone(),
                    value: SeriesValue::Gauge(f64::from_bits(r.value().load(Ordering::Relaxed))),
                })
                .collect(),
        )
    }
}
